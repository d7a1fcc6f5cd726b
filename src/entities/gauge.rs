//! Gauge entity - calibrated measurement tooling

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::calibration::GaugeStatus;

fn is_false(v: &bool) -> bool {
    !v
}

/// A measurement gauge. The store persists only the raw calibration
/// fields; status and days-left are computed by the calibration engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gauge {
    /// Short opaque identifier ("g1" or generated "GAU-...")
    pub id: String,

    /// Display name (e.g. "Thread Plug Gauge - 2-3/8\" 8RD")
    pub name: String,

    /// Gauge kind (plug, ring, standoff tool, ...)
    #[serde(rename = "type", default, skip_serializing_if = "String::is_empty")]
    pub gauge_type: String,

    /// Storage location
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub location: String,

    /// Date of the most recent calibration
    pub last_calibrated: DateTime<Utc>,

    /// Calibration cycle length
    pub calibration_interval_days: u32,

    /// Authoritative expiry of the current calibration
    pub expires_at: DateTime<Utc>,

    /// Manual out-of-service flag; not derivable from dates
    #[serde(default, skip_serializing_if = "is_false")]
    pub broken: bool,

    /// Catalog entry timestamp
    pub created_at: DateTime<Utc>,
}

/// Record of a gauge attached to one packet: a snapshot of eligibility at
/// the moment of selection. Immutable once recorded, except that the
/// missing role timestamp may be added later.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GaugeUseRecord {
    pub gauge_id: String,

    /// Computed status at the moment of selection
    pub status_at_use: GaugeStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirmed_by_operator_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verified_by_inspector_at: Option<DateTime<Utc>>,
}
