//! Packet assembly
//!
//! The SOP set and checklist come from a fixed template: the same order
//! always yields the same content, and re-opening a packet never disturbs
//! row data already captured. Header fields are seeded from the order
//! record when a fresh report is created; a missing order record yields
//! blank header fields, not an error.

use crate::entities::order::Order;
use crate::entities::packet::Packet;
use crate::entities::report::InspectionReport;

/// Standard operating procedures attached to every packet
pub const SOP_LINKS: [&str; 2] = ["SOP-THREAD-GENERAL.pdf", "SOP-NDT-MT-LEVEL2.pdf"];

/// Work checklist attached to every packet
pub const CHECKLIST: [&str; 4] = [
    "Verify gauge calibration",
    "Confirm thread spec vs order",
    "Record measurements",
    "Sign inspector certificate",
];

/// Assemble the packet for an order.
///
/// `saved` is the previously captured report, if any; passing it back in
/// makes the call idempotent. `order` is the creation-time side data used
/// to seed the header of a fresh report.
pub fn open_packet(order_id: &str, order: Option<&Order>, saved: Option<InspectionReport>) -> Packet {
    let report = saved.unwrap_or_else(|| {
        let mut report = InspectionReport::new(order_id);
        if let Some(order) = order {
            report.header.part = order.part_number.clone();
            report.header.description = order.required_thread.clone();
            report.infer_variant();
        }
        report
    });

    Packet {
        order_id: order_id.to_string(),
        sop_links: SOP_LINKS.iter().map(|s| s.to_string()).collect(),
        checklist: CHECKLIST.iter().map(|s| s.to_string()).collect(),
        report,
    }
}
