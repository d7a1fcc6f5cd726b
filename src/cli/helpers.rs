//! Shared helper functions for CLI commands

use chrono::{DateTime, Local, NaiveDate, NaiveTime, TimeZone, Utc};
use console::style;
use miette::{IntoDiagnostic, Result};

use crate::core::calibration::GaugeStatus;
use crate::core::packet;
use crate::entities::report::InspectionReport;
use crate::store::{OrderStore, Project, ReportStore, YamlStore};

/// Discover the enclosing project and open its store
pub fn discover_store() -> Result<YamlStore> {
    let project = Project::discover().into_diagnostic()?;
    Ok(YamlStore::new(project))
}

/// Load the saved report for an order, or assemble a fresh one seeded from
/// the order record when present. A missing order only means blank header
/// fields, never a failure.
pub fn load_or_new_report(store: &YamlStore, order_id: &str) -> Result<InspectionReport> {
    if let Some(saved) = store.load(order_id).into_diagnostic()? {
        return Ok(saved);
    }
    let order = store.get(order_id).ok();
    Ok(packet::open_packet(order_id, order.as_ref(), None).report)
}

/// Load the saved report for an order, failing when none exists yet
pub fn load_existing_report(store: &YamlStore, order_id: &str) -> Result<InspectionReport> {
    store
        .load(order_id)
        .into_diagnostic()?
        .ok_or_else(|| miette::miette!("no packet opened for order {} yet", order_id))
}

/// Format a timestamp for table output in local time
pub fn format_ts(ts: DateTime<Utc>) -> String {
    ts.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()
}

/// Parse a YYYY-MM-DD date into a UTC midnight timestamp
pub fn parse_date(s: &str) -> Result<DateTime<Utc>> {
    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|e| miette::miette!("invalid date '{}': {} (expected YYYY-MM-DD)", s, e))?;
    Ok(Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN)))
}

/// Truncate a string to max_len, adding "..." if truncated
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        format!("{}...", &s[..max_len.saturating_sub(3)])
    }
}

/// Styled one-word status chip for gauge statuses
pub fn gauge_status_chip(status: GaugeStatus) -> String {
    match status {
        GaugeStatus::Ok => style("OK").green().to_string(),
        GaugeStatus::DueSoon => style("DUE SOON").yellow().to_string(),
        GaugeStatus::Expired => style("EXPIRED").red().to_string(),
        GaugeStatus::Broken => style("BROKEN").dim().to_string(),
    }
}
