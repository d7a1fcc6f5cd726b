//! Store module - narrow persistence contracts and the plain-text
//! implementation
//!
//! The engine never talks to files directly; it goes through these traits.
//! Everything the core computes works on already-loaded data, so a missing
//! or unreachable store degrades to an advisory error on the operation
//! that touched it, never a crash of anything pure.

pub mod project;
pub mod yaml;

use std::path::PathBuf;

use thiserror::Error;

use crate::core::workflow::OrderStatus;
use crate::entities::gauge::Gauge;
use crate::entities::order::Order;
use crate::entities::report::InspectionReport;

/// General order listing is bounded to the most recent entries
pub const ORDER_LIST_CAP: usize = 100;

/// Today's listing is bounded tighter
pub const TODAY_LIST_CAP: usize = 50;

/// Errors from store operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("order {0} not found")]
    OrderNotFound(String),

    #[error("gauge {0} not found")]
    GaugeNotFound(String),

    #[error("order {0} already exists")]
    DuplicateOrder(String),

    #[error("gauge {0} already exists")]
    DuplicateGauge(String),

    #[error("id '{0}' is not usable as a file name")]
    InvalidId(String),

    #[error("failed to parse {path}: {message}")]
    Malformed { path: PathBuf, message: String },

    #[error("failed to write {path}: {message}")]
    Encode { path: PathBuf, message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Order persistence contract
pub trait OrderStore {
    fn create(&self, order: Order) -> Result<Order, StoreError>;
    fn get(&self, id: &str) -> Result<Order, StoreError>;
    /// Most recent first, bounded to [`ORDER_LIST_CAP`]
    fn list(&self, status: Option<OrderStatus>) -> Result<Vec<Order>, StoreError>;
    /// Orders created during the local calendar day, most recent first,
    /// bounded to [`TODAY_LIST_CAP`]
    fn list_today(&self, status: Option<OrderStatus>) -> Result<Vec<Order>, StoreError>;
    fn update(&self, order: &Order) -> Result<(), StoreError>;
}

/// Gauge catalog contract. Persists only raw calibration fields; the
/// engine augments with computed status and days-left.
pub trait GaugeStore {
    fn add(&self, gauge: Gauge) -> Result<Gauge, StoreError>;
    fn get(&self, id: &str) -> Result<Gauge, StoreError>;
    /// Newest catalog entries first
    fn list_all(&self) -> Result<Vec<Gauge>, StoreError>;
    fn update(&self, gauge: &Gauge) -> Result<(), StoreError>;
}

/// Per-order report state. Saves are whole-file: last write wins, no merge.
pub trait ReportStore {
    fn load(&self, order_id: &str) -> Result<Option<InspectionReport>, StoreError>;
    fn save(&self, report: &InspectionReport) -> Result<(), StoreError>;
}

pub use project::{Project, ProjectError};
pub use yaml::YamlStore;
