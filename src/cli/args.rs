//! Top-level argument definitions

use clap::{Parser, Subcommand, ValueEnum};

use crate::cli::commands;
use crate::core::calibration::GaugeStatus;
use crate::core::workflow::{OrderStatus, Role};

#[derive(Parser, Debug)]
#[command(
    name = "inspectflow",
    version,
    about = "Plain-text inspection packets and tolerance validation for API 8-RD threaded connections"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize an inspectflow project in the current directory
    Init,

    /// Inspection order management
    #[command(subcommand)]
    Order(commands::order::OrderCommands),

    /// Gauge catalog and per-packet gauge usage
    #[command(subcommand)]
    Gauge(commands::gauge::GaugeCommands),

    /// Inspection packet assembly
    #[command(subcommand)]
    Packet(commands::packet::PacketCommands),

    /// Dimensional reports and signatures
    #[command(subcommand)]
    Report(commands::report::ReportCommands),

    /// Generate shell completions
    Completions(commands::completions::CompletionsArgs),
}

/// Acting role for gated commands
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum RoleArg {
    Operator,
    Inspector,
}

impl From<RoleArg> for Role {
    fn from(arg: RoleArg) -> Self {
        match arg {
            RoleArg::Operator => Role::Operator,
            RoleArg::Inspector => Role::Inspector,
        }
    }
}

/// Order status argument
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum StatusArg {
    Queued,
    InProgress,
    Done,
}

impl From<StatusArg> for OrderStatus {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::Queued => OrderStatus::Queued,
            StatusArg::InProgress => OrderStatus::InProgress,
            StatusArg::Done => OrderStatus::Done,
        }
    }
}

/// Gauge catalog status filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GaugeFilter {
    All,
    Ok,
    /// Due soon (within the review window)
    Due,
    Expired,
    Broken,
}

impl GaugeFilter {
    pub fn matches(&self, status: GaugeStatus) -> bool {
        match self {
            GaugeFilter::All => true,
            GaugeFilter::Ok => status == GaugeStatus::Ok,
            GaugeFilter::Due => status == GaugeStatus::DueSoon,
            GaugeFilter::Expired => status == GaugeStatus::Expired,
            GaugeFilter::Broken => status == GaugeStatus::Broken,
        }
    }
}

/// Output format for list/show commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}
