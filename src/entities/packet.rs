//! Packet entity - the assembled inspection bundle for one order

use serde::{Deserialize, Serialize};

use crate::entities::report::InspectionReport;

/// The bundle handed to the shop floor for one order: SOP references,
/// the work checklist, and the report being filled in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Packet {
    pub order_id: String,

    /// Standard operating procedure references
    pub sop_links: Vec<String>,

    /// Work checklist items
    pub checklist: Vec<String>,

    /// The report captured against this packet
    pub report: InspectionReport,
}
