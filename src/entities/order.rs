//! Order entity - one inspection order for a threaded connection

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::workflow::OrderStatus;

/// An inspection order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Short opaque identifier ("441" or generated "ORD-...")
    pub id: String,

    /// Part number under inspection
    pub part_number: String,

    /// Thread specification the connection must meet (e.g. "2-3/8\" 8RD")
    pub required_thread: String,

    /// Current lifecycle status
    #[serde(default)]
    pub status: OrderStatus,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}
