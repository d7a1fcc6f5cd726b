//! Fixed tolerance table for 8-RD dimensional checks (API 5B)
//!
//! Six of the thirteen report columns carry an acceptance rule; the rest are
//! informational and never evaluate out of tolerance. Plus/minus tolerances
//! are centered at 0 (e.g. L1 +/-.002 means |value| <= .002); range rules
//! are inclusive min-max bands.

use serde::{Deserialize, Serialize};

/// The thirteen measurement columns of an 8-RD dimensional report, in
/// column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DimensionKey {
    L1,
    Lead,
    TaperA,
    TaperB,
    TaperC,
    TaperAvg,
    ThreadHeight,
    Od,
    Id,
    Standoff,
    L4,
    SealFaceMinusL1,
    OverallLength,
}

impl DimensionKey {
    /// All keys in report column order
    pub const ALL: [DimensionKey; 13] = [
        DimensionKey::L1,
        DimensionKey::Lead,
        DimensionKey::TaperA,
        DimensionKey::TaperB,
        DimensionKey::TaperC,
        DimensionKey::TaperAvg,
        DimensionKey::ThreadHeight,
        DimensionKey::Od,
        DimensionKey::Id,
        DimensionKey::Standoff,
        DimensionKey::L4,
        DimensionKey::SealFaceMinusL1,
        DimensionKey::OverallLength,
    ];

    /// Column header label
    pub fn label(&self) -> &'static str {
        match self {
            DimensionKey::L1 => "Pitch Dia (L1)",
            DimensionKey::Lead => "Lead",
            DimensionKey::TaperA => "Taper A",
            DimensionKey::TaperB => "Taper B",
            DimensionKey::TaperC => "Taper C",
            DimensionKey::TaperAvg => "Taper Avg",
            DimensionKey::ThreadHeight => "Thread Height",
            DimensionKey::Od => "OD",
            DimensionKey::Id => "ID",
            DimensionKey::Standoff => "Standoff",
            DimensionKey::L4 => "L4",
            DimensionKey::SealFaceMinusL1 => "SF - L1",
            DimensionKey::OverallLength => "OAL",
        }
    }

    /// Human-readable tolerance note for column headers, when a rule exists
    pub fn tolerance_note(&self) -> Option<&'static str> {
        match self {
            DimensionKey::L1 => Some("+/- .002"),
            DimensionKey::Lead => Some(".002 - .006"),
            DimensionKey::TaperAvg => Some(".061 - .066"),
            DimensionKey::ThreadHeight => Some(".020 - .030"),
            DimensionKey::Id => Some("5.275 - 5.375"),
            DimensionKey::Standoff => Some("+/- .125"),
            _ => None,
        }
    }

    /// Wire/flag name of the key (matches the serde representation)
    pub fn as_str(&self) -> &'static str {
        match self {
            DimensionKey::L1 => "l1",
            DimensionKey::Lead => "lead",
            DimensionKey::TaperA => "taperA",
            DimensionKey::TaperB => "taperB",
            DimensionKey::TaperC => "taperC",
            DimensionKey::TaperAvg => "taperAvg",
            DimensionKey::ThreadHeight => "threadHeight",
            DimensionKey::Od => "od",
            DimensionKey::Id => "id",
            DimensionKey::Standoff => "standoff",
            DimensionKey::L4 => "l4",
            DimensionKey::SealFaceMinusL1 => "sealFaceMinusL1",
            DimensionKey::OverallLength => "overallLength",
        }
    }
}

impl std::fmt::Display for DimensionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DimensionKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Accept camelCase wire names and kebab/snake CLI spellings
        let folded: String = s
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_lowercase();
        match folded.as_str() {
            "l1" => Ok(DimensionKey::L1),
            "lead" => Ok(DimensionKey::Lead),
            "tapera" => Ok(DimensionKey::TaperA),
            "taperb" => Ok(DimensionKey::TaperB),
            "taperc" => Ok(DimensionKey::TaperC),
            "taperavg" => Ok(DimensionKey::TaperAvg),
            "threadheight" => Ok(DimensionKey::ThreadHeight),
            "od" => Ok(DimensionKey::Od),
            "id" => Ok(DimensionKey::Id),
            "standoff" => Ok(DimensionKey::Standoff),
            "l4" => Ok(DimensionKey::L4),
            "sealfaceminusl1" | "sfminusl1" => Ok(DimensionKey::SealFaceMinusL1),
            "overalllength" | "oal" => Ok(DimensionKey::OverallLength),
            _ => Err(format!(
                "Unknown dimension key: '{}'. Use one of: l1, lead, taper-a, taper-b, taper-c, \
                 taper-avg, thread-height, od, id, standoff, l4, seal-face-minus-l1, overall-length",
                s
            )),
        }
    }
}

/// An acceptance rule for one dimension
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToleranceRule {
    /// Symmetric band around zero: passes when |value| <= bound
    Centered { bound: f64 },
    /// Inclusive band: passes when min <= value <= max
    Range { min: f64, max: f64 },
}

impl ToleranceRule {
    /// Whether a fully-formed reading satisfies this rule (bounds inclusive)
    pub fn permits(&self, value: f64) -> bool {
        match *self {
            ToleranceRule::Centered { bound } => value.abs() <= bound,
            ToleranceRule::Range { min, max } => value >= min && value <= max,
        }
    }
}

/// Acceptance rule for a dimension key, if one is specified
pub fn rule_for(key: DimensionKey) -> Option<ToleranceRule> {
    match key {
        DimensionKey::L1 => Some(ToleranceRule::Centered { bound: 0.002 }),
        DimensionKey::Lead => Some(ToleranceRule::Range {
            min: 0.002,
            max: 0.006,
        }),
        DimensionKey::TaperAvg => Some(ToleranceRule::Range {
            min: 0.061,
            max: 0.066,
        }),
        DimensionKey::ThreadHeight => Some(ToleranceRule::Range {
            min: 0.020,
            max: 0.030,
        }),
        DimensionKey::Standoff => Some(ToleranceRule::Centered { bound: 0.125 }),
        DimensionKey::Id => Some(ToleranceRule::Range {
            min: 5.275,
            max: 5.375,
        }),
        _ => None,
    }
}

/// Whether a fully-formed value violates the rule for its key.
/// Keys without a rule never evaluate out of tolerance.
pub fn is_out_of_tolerance(key: DimensionKey, value: f64) -> bool {
    rule_for(key).map(|rule| !rule.permits(value)).unwrap_or(false)
}
