//! InspectFlow: plain-text inspection toolkit for threaded connections
//!
//! A Unix-style toolkit for recording dimensional inspections of API 8-RD
//! threaded connections as plain text files: fixed tolerance tables, gauge
//! calibration tracking, and role-gated order/report workflows.

pub mod cli;
pub mod core;
pub mod entities;
pub mod store;
