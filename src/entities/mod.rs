//! Entity type definitions

pub mod gauge;
pub mod order;
pub mod packet;
pub mod report;

pub use gauge::{Gauge, GaugeUseRecord};
pub use order::Order;
pub use packet::Packet;
pub use report::InspectionReport;
