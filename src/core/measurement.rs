//! Measurement text evaluation
//!
//! Measurement cells hold raw text exactly as typed. A cell is either empty,
//! a transitional partial token (a bare sign or decimal point awaiting more
//! digits), a fully-formed signed decimal, or invalid input that is flagged
//! for correction but never dropped. Tolerance evaluation applies only to
//! fully-formed values.

use crate::core::tolerance::{self, DimensionKey};

/// Classification of one raw measurement cell
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Reading {
    /// Empty cell - nothing entered
    Empty,
    /// Transitional token: `-`, `.` or `-.`
    Partial,
    /// Fully-formed signed decimal
    Value(f64),
    /// Not numeric-like; the raw text stays in place for re-editing
    Invalid,
}

impl Reading {
    /// The parsed number, when fully formed
    pub fn value(&self) -> Option<f64> {
        match self {
            Reading::Value(v) => Some(*v),
            _ => None,
        }
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, Reading::Invalid)
    }

    pub fn is_partial(&self) -> bool {
        matches!(self, Reading::Partial)
    }
}

/// Classify raw measurement text
pub fn parse_reading(raw: &str) -> Reading {
    match raw {
        "" => Reading::Empty,
        "-" | "." | "-." => Reading::Partial,
        _ if is_well_formed(raw) => match raw.parse::<f64>() {
            Ok(v) if v.is_finite() => Reading::Value(v),
            _ => Reading::Invalid,
        },
        _ => Reading::Invalid,
    }
}

/// An optionally-signed decimal: integer ("12", "-3") or fractional
/// (".5", "-0.002"). A trailing bare dot ("1.") is not fully formed.
fn is_well_formed(raw: &str) -> bool {
    let digits = raw.strip_prefix('-').unwrap_or(raw);
    if digits.is_empty() {
        return false;
    }
    match digits.split_once('.') {
        None => digits.bytes().all(|b| b.is_ascii_digit()),
        Some((int, frac)) => {
            !frac.is_empty()
                && int.bytes().all(|b| b.is_ascii_digit())
                && frac.bytes().all(|b| b.is_ascii_digit())
        }
    }
}

/// Whether text is acceptable in a numeric cell mid-edit: empty,
/// transitional, or fully formed. Invalid text gets a correction flag.
pub fn is_numeric_like(raw: &str) -> bool {
    !parse_reading(raw).is_invalid()
}

/// Collapse a transitional token left behind at commit time
pub fn normalize_on_commit(raw: &str) -> &str {
    if parse_reading(raw).is_partial() {
        ""
    } else {
        raw
    }
}

/// Result of evaluating one cell against the tolerance table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    pub reading: Reading,
    pub out_of_tolerance: bool,
}

/// Evaluate raw measurement text for a dimension key.
///
/// Pure function of (key, text, fixed table): no side effects, safe to call
/// from any number of concurrent contexts.
pub fn evaluate(key: DimensionKey, raw: &str) -> Evaluation {
    let reading = parse_reading(raw);
    let out_of_tolerance = reading
        .value()
        .map(|v| tolerance::is_out_of_tolerance(key, v))
        .unwrap_or(false);
    Evaluation {
        reading,
        out_of_tolerance,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_and_transitional() {
        assert_eq!(parse_reading(""), Reading::Empty);
        assert_eq!(parse_reading("-"), Reading::Partial);
        assert_eq!(parse_reading("."), Reading::Partial);
        assert_eq!(parse_reading("-."), Reading::Partial);
    }

    #[test]
    fn test_well_formed_values() {
        assert_eq!(parse_reading("0.002"), Reading::Value(0.002));
        assert_eq!(parse_reading("-0.003"), Reading::Value(-0.003));
        assert_eq!(parse_reading(".5"), Reading::Value(0.5));
        assert_eq!(parse_reading("-.125"), Reading::Value(-0.125));
        assert_eq!(parse_reading("12"), Reading::Value(12.0));
        assert_eq!(parse_reading("-7"), Reading::Value(-7.0));
    }

    #[test]
    fn test_invalid_text() {
        assert_eq!(parse_reading("abc"), Reading::Invalid);
        assert_eq!(parse_reading("1.2.3"), Reading::Invalid);
        assert_eq!(parse_reading("1."), Reading::Invalid);
        assert_eq!(parse_reading("--1"), Reading::Invalid);
        assert_eq!(parse_reading("1e3"), Reading::Invalid);
        assert_eq!(parse_reading(" 1"), Reading::Invalid);
        assert_eq!(parse_reading("+1"), Reading::Invalid);
    }

    #[test]
    fn test_numeric_like_flag() {
        assert!(is_numeric_like(""));
        assert!(is_numeric_like("-."));
        assert!(is_numeric_like("-0.002"));
        assert!(!is_numeric_like("n/a"));
    }

    #[test]
    fn test_normalize_on_commit() {
        assert_eq!(normalize_on_commit("-."), "");
        assert_eq!(normalize_on_commit("."), "");
        assert_eq!(normalize_on_commit("-"), "");
        assert_eq!(normalize_on_commit("0.004"), "0.004");
        assert_eq!(normalize_on_commit("junk"), "junk");
    }

    #[test]
    fn test_evaluate_only_on_full_values() {
        // Transitional tokens never register out of tolerance
        for raw in ["", "-", ".", "-."] {
            let eval = evaluate(DimensionKey::L1, raw);
            assert!(!eval.out_of_tolerance, "raw {:?} flagged", raw);
        }
        // Invalid text is flagged as invalid but not out of tolerance
        let eval = evaluate(DimensionKey::L1, "oops");
        assert!(eval.reading.is_invalid());
        assert!(!eval.out_of_tolerance);
    }

    #[test]
    fn test_evaluate_applies_table() {
        assert!(!evaluate(DimensionKey::L1, "0.002").out_of_tolerance);
        assert!(evaluate(DimensionKey::L1, "0.0021").out_of_tolerance);
        assert!(evaluate(DimensionKey::L1, "-0.003").out_of_tolerance);
        assert!(!evaluate(DimensionKey::Standoff, "-0.125").out_of_tolerance);
        assert!(evaluate(DimensionKey::Standoff, "-0.126").out_of_tolerance);
        // Unruled keys pass anything fully formed
        assert!(!evaluate(DimensionKey::Od, "99.9").out_of_tolerance);
    }
}
