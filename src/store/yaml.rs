//! Plain-text YAML store - one file per entity
//!
//! Orders, gauges and reports live as individual `.yaml` files under the
//! project data directory, keyed by their id. Saves rewrite the whole file:
//! two concurrent writers to the same order's report resolve last-write-wins
//! with no merge.

use std::path::{Path, PathBuf};

use chrono::Local;
use walkdir::WalkDir;

use crate::core::workflow::OrderStatus;
use crate::entities::gauge::Gauge;
use crate::entities::order::Order;
use crate::entities::report::InspectionReport;
use crate::store::project::Project;
use crate::store::{
    GaugeStore, OrderStore, ReportStore, StoreError, ORDER_LIST_CAP, TODAY_LIST_CAP,
};

/// File-backed store rooted at a discovered project
#[derive(Debug, Clone)]
pub struct YamlStore {
    project: Project,
}

impl YamlStore {
    pub fn new(project: Project) -> Self {
        Self { project }
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    fn entity_path(dir: &Path, id: &str) -> Result<PathBuf, StoreError> {
        if id.is_empty()
            || id.contains(['/', '\\'])
            || id == "."
            || id == ".."
        {
            return Err(StoreError::InvalidId(id.to_string()));
        }
        Ok(dir.join(format!("{}.yaml", id)))
    }

    fn read_file<T: serde::de::DeserializeOwned + 'static>(path: &Path) -> Result<T, StoreError> {
        let contents = std::fs::read_to_string(path)?;
        serde_yml::from_str(&contents).map_err(|e| StoreError::Malformed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    fn write_file<T: serde::Serialize>(path: &Path, value: &T) -> Result<(), StoreError> {
        let contents = serde_yml::to_string(value).map_err(|e| StoreError::Encode {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    fn scan_dir<T: serde::de::DeserializeOwned + 'static>(dir: &Path) -> Result<Vec<T>, StoreError> {
        let mut items = Vec::new();
        for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
            let entry = entry.map_err(|e| StoreError::Io(e.into()))?;
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                items.push(Self::read_file(path)?);
            }
        }
        Ok(items)
    }
}

impl OrderStore for YamlStore {
    fn create(&self, order: Order) -> Result<Order, StoreError> {
        let path = Self::entity_path(&self.project.orders_dir(), &order.id)?;
        if path.exists() {
            return Err(StoreError::DuplicateOrder(order.id));
        }
        Self::write_file(&path, &order)?;
        Ok(order)
    }

    fn get(&self, id: &str) -> Result<Order, StoreError> {
        let path = Self::entity_path(&self.project.orders_dir(), id)?;
        if !path.exists() {
            return Err(StoreError::OrderNotFound(id.to_string()));
        }
        Self::read_file(&path)
    }

    fn list(&self, status: Option<OrderStatus>) -> Result<Vec<Order>, StoreError> {
        let mut orders: Vec<Order> = Self::scan_dir(&self.project.orders_dir())?;
        if let Some(status) = status {
            orders.retain(|o| o.status == status);
        }
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        orders.truncate(ORDER_LIST_CAP);
        Ok(orders)
    }

    fn list_today(&self, status: Option<OrderStatus>) -> Result<Vec<Order>, StoreError> {
        let today = Local::now().date_naive();
        let mut orders = self.list(status)?;
        orders.retain(|o| o.created_at.with_timezone(&Local).date_naive() == today);
        orders.truncate(TODAY_LIST_CAP);
        Ok(orders)
    }

    fn update(&self, order: &Order) -> Result<(), StoreError> {
        let path = Self::entity_path(&self.project.orders_dir(), &order.id)?;
        if !path.exists() {
            return Err(StoreError::OrderNotFound(order.id.clone()));
        }
        Self::write_file(&path, order)
    }
}

impl GaugeStore for YamlStore {
    fn add(&self, gauge: Gauge) -> Result<Gauge, StoreError> {
        let path = Self::entity_path(&self.project.gauges_dir(), &gauge.id)?;
        if path.exists() {
            return Err(StoreError::DuplicateGauge(gauge.id));
        }
        Self::write_file(&path, &gauge)?;
        Ok(gauge)
    }

    fn get(&self, id: &str) -> Result<Gauge, StoreError> {
        let path = Self::entity_path(&self.project.gauges_dir(), id)?;
        if !path.exists() {
            return Err(StoreError::GaugeNotFound(id.to_string()));
        }
        Self::read_file(&path)
    }

    fn list_all(&self) -> Result<Vec<Gauge>, StoreError> {
        let mut gauges: Vec<Gauge> = Self::scan_dir(&self.project.gauges_dir())?;
        gauges.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(gauges)
    }

    fn update(&self, gauge: &Gauge) -> Result<(), StoreError> {
        let path = Self::entity_path(&self.project.gauges_dir(), &gauge.id)?;
        if !path.exists() {
            return Err(StoreError::GaugeNotFound(gauge.id.clone()));
        }
        Self::write_file(&path, gauge)
    }
}

impl ReportStore for YamlStore {
    fn load(&self, order_id: &str) -> Result<Option<InspectionReport>, StoreError> {
        let path = Self::entity_path(&self.project.reports_dir(), order_id)?;
        if !path.exists() {
            return Ok(None);
        }
        Self::read_file(&path).map(Some)
    }

    fn save(&self, report: &InspectionReport) -> Result<(), StoreError> {
        let path = Self::entity_path(&self.project.reports_dir(), &report.order_id)?;
        Self::write_file(&path, report)
    }
}
