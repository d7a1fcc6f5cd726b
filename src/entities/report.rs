//! Inspection report entity - the 8-RD dimensional report for one order
//!
//! Rows and header blocks are fixed-field records (not open maps) so that
//! tolerance evaluation is exhaustive over the known columns and the whole
//! report round-trips losslessly through serde.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::calibration::{self, CalibrationError};
use crate::core::measurement::{self, Evaluation};
use crate::core::signing::SignatureBlock;
use crate::core::tolerance::DimensionKey;
use crate::core::workflow::Role;
use crate::entities::gauge::{Gauge, GaugeUseRecord};

/// Rows a fresh report starts with
pub const DEFAULT_ROW_COUNT: usize = 12;

/// Connection end being inspected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
#[derive(Default)]
pub enum Variant {
    #[default]
    Pin,
    Box,
}

impl std::fmt::Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Variant::Pin => write!(f, "PIN"),
            Variant::Box => write!(f, "BOX"),
        }
    }
}

/// Accept/reject disposition of one row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[derive(Default)]
pub enum RowResult {
    Accept,
    Reject,
    #[default]
    Unset,
}

impl RowResult {
    pub fn is_unset(&self) -> bool {
        matches!(self, RowResult::Unset)
    }
}

impl std::fmt::Display for RowResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RowResult::Accept => write!(f, "ACCEPT"),
            RowResult::Reject => write!(f, "REJECT"),
            RowResult::Unset => write!(f, ""),
        }
    }
}

impl std::str::FromStr for RowResult {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "ACCEPT" => Ok(RowResult::Accept),
            "REJECT" => Ok(RowResult::Reject),
            "" | "UNSET" => Ok(RowResult::Unset),
            _ => Err(format!(
                "Unknown result: '{}'. Use accept, reject or unset",
                s
            )),
        }
    }
}

/// Report header metadata
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HeaderBlock {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub company: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub customer: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub drawing: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub part: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub heat: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub work_order: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub gauge_doc: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
}

/// Visual check results
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VisualChecks {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub threads: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub shoulder: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub surface: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub notes: String,
}

/// One dimensional-check row. Measurement cells hold raw text verbatim;
/// evaluation happens on demand against the fixed tolerance table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DimensionRow {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub serial: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub l1: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub lead: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub taper_a: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub taper_b: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub taper_c: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub taper_avg: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub thread_height: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub od: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub standoff: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub l4: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub seal_face_minus_l1: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub overall_length: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub remarks: String,

    #[serde(default, skip_serializing_if = "RowResult::is_unset")]
    pub result: RowResult,
}

impl DimensionRow {
    /// A blank row with a 1-based serial number
    pub fn numbered(n: usize) -> Self {
        Self {
            serial: n.to_string(),
            ..Self::default()
        }
    }

    /// Raw text of one measurement cell
    pub fn get(&self, key: DimensionKey) -> &str {
        match key {
            DimensionKey::L1 => &self.l1,
            DimensionKey::Lead => &self.lead,
            DimensionKey::TaperA => &self.taper_a,
            DimensionKey::TaperB => &self.taper_b,
            DimensionKey::TaperC => &self.taper_c,
            DimensionKey::TaperAvg => &self.taper_avg,
            DimensionKey::ThreadHeight => &self.thread_height,
            DimensionKey::Od => &self.od,
            DimensionKey::Id => &self.id,
            DimensionKey::Standoff => &self.standoff,
            DimensionKey::L4 => &self.l4,
            DimensionKey::SealFaceMinusL1 => &self.seal_face_minus_l1,
            DimensionKey::OverallLength => &self.overall_length,
        }
    }

    /// Replace one measurement cell. The raw text is stored verbatim, even
    /// when invalid - correction is the operator's, flagged on evaluation.
    pub fn set(&mut self, key: DimensionKey, raw: impl Into<String>) {
        let raw = raw.into();
        match key {
            DimensionKey::L1 => self.l1 = raw,
            DimensionKey::Lead => self.lead = raw,
            DimensionKey::TaperA => self.taper_a = raw,
            DimensionKey::TaperB => self.taper_b = raw,
            DimensionKey::TaperC => self.taper_c = raw,
            DimensionKey::TaperAvg => self.taper_avg = raw,
            DimensionKey::ThreadHeight => self.thread_height = raw,
            DimensionKey::Od => self.od = raw,
            DimensionKey::Id => self.id = raw,
            DimensionKey::Standoff => self.standoff = raw,
            DimensionKey::L4 => self.l4 = raw,
            DimensionKey::SealFaceMinusL1 => self.seal_face_minus_l1 = raw,
            DimensionKey::OverallLength => self.overall_length = raw,
        }
    }

    /// Evaluate one cell against the tolerance table
    pub fn evaluate(&self, key: DimensionKey) -> Evaluation {
        measurement::evaluate(key, self.get(key))
    }

    /// Keys whose current value is out of tolerance
    pub fn out_of_tolerance_keys(&self) -> Vec<DimensionKey> {
        DimensionKey::ALL
            .into_iter()
            .filter(|key| self.evaluate(*key).out_of_tolerance)
            .collect()
    }

    /// Keys holding text that is not numeric-like and needs correction
    pub fn invalid_keys(&self) -> Vec<DimensionKey> {
        DimensionKey::ALL
            .into_iter()
            .filter(|key| self.evaluate(*key).reading.is_invalid())
            .collect()
    }

    /// Collapse transitional tokens left behind when the row is committed
    pub fn commit(&mut self) {
        for key in DimensionKey::ALL {
            let normalized = measurement::normalize_on_commit(self.get(key)).to_string();
            self.set(key, normalized);
        }
    }
}

/// The full inspection report for one order: the persisted per-order state
/// (rows, header, gauge selection, signatures) that round-trips through
/// serde so callers can debounce saves at their own cadence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InspectionReport {
    pub order_id: String,

    #[serde(default)]
    pub variant: Variant,

    #[serde(default)]
    pub header: HeaderBlock,

    #[serde(default)]
    pub visual: VisualChecks,

    #[serde(default)]
    pub dimensions: Vec<DimensionRow>,

    /// Gauges attached to this packet
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub gauge_uses: Vec<GaugeUseRecord>,

    #[serde(default)]
    pub signatures: SignatureBlock,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub notes: String,
}

impl InspectionReport {
    /// A fresh report with the standard pre-serialized rows
    pub fn new(order_id: impl Into<String>) -> Self {
        Self {
            order_id: order_id.into(),
            variant: Variant::default(),
            header: HeaderBlock::default(),
            visual: VisualChecks::default(),
            dimensions: (1..=DEFAULT_ROW_COUNT).map(DimensionRow::numbered).collect(),
            gauge_uses: Vec::new(),
            signatures: SignatureBlock::default(),
            notes: String::new(),
        }
    }

    /// Append a blank row, serial following the current count
    pub fn add_row(&mut self) {
        self.dimensions.push(DimensionRow::numbered(self.dimensions.len() + 1));
    }

    /// Drop the last row; a report never goes below one row
    pub fn remove_last_row(&mut self) -> bool {
        if self.dimensions.len() <= 1 {
            return false;
        }
        self.dimensions.pop();
        true
    }

    /// Infer PIN/BOX from the header description. BOX wins when both words
    /// appear, matching the order the source applies the patterns in.
    pub fn infer_variant(&mut self) {
        if contains_word(&self.header.description, "PIN") {
            self.variant = Variant::Pin;
        }
        if contains_word(&self.header.description, "BOX") {
            self.variant = Variant::Box;
        }
    }

    /// The use record for a gauge, if attached
    pub fn find_use(&self, gauge_id: &str) -> Option<&GaugeUseRecord> {
        self.gauge_uses.iter().find(|u| u.gauge_id == gauge_id)
    }

    /// Attach a gauge, or countersign an existing attachment.
    ///
    /// First call snapshots status and stamps the actor's timestamp; a
    /// later call in the other role fills the missing timestamp without
    /// touching the one already present. Eligibility is re-checked here.
    pub fn record_gauge_use(
        &mut self,
        gauge: &Gauge,
        actor: Role,
        now: DateTime<Utc>,
    ) -> Result<(), CalibrationError> {
        match self.gauge_uses.iter_mut().find(|u| u.gauge_id == gauge.id) {
            Some(existing) => {
                calibration::countersign_use(existing, actor, now);
                Ok(())
            }
            None => {
                let record = calibration::record_use(gauge, actor, now)?;
                self.gauge_uses.push(record);
                Ok(())
            }
        }
    }

    /// Detach a gauge entirely - no tombstone is kept
    pub fn remove_gauge_use(&mut self, gauge_id: &str) -> bool {
        let before = self.gauge_uses.len();
        self.gauge_uses.retain(|u| u.gauge_id != gauge_id);
        self.gauge_uses.len() < before
    }

    /// Inspector re-verification of an attached gauge
    pub fn verify_gauge_use(
        &mut self,
        gauge_id: &str,
        actor: Role,
        now: DateTime<Utc>,
    ) -> Result<(), CalibrationError> {
        let record = self
            .gauge_uses
            .iter_mut()
            .find(|u| u.gauge_id == gauge_id)
            .ok_or_else(|| CalibrationError::NotInUse {
                id: gauge_id.to_string(),
            })?;
        calibration::verify_use(record, actor, now)
    }
}

/// Case-insensitive whole-word search
fn contains_word(text: &str, word: &str) -> bool {
    let text = text.to_uppercase();
    let mut start = 0;
    while let Some(pos) = text[start..].find(word) {
        let at = start + pos;
        let end = at + word.len();
        let left_ok = at == 0 || !text.as_bytes()[at - 1].is_ascii_alphanumeric();
        let right_ok = end == text.len() || !text.as_bytes()[end].is_ascii_alphanumeric();
        if left_ok && right_ok {
            return true;
        }
        start = at + 1;
    }
    false
}
