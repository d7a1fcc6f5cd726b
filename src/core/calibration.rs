//! Gauge calibration lifecycle
//!
//! Status derives from the calibration expiry date alone; `broken` is a
//! stored manual override that wins over dates. Expired and broken gauges
//! are blocked from use. Due-soon gauges are usable but carry a review flag.
//!
//! Eligibility is re-checked at the point of recording use - the calling
//! surface is expected to disable the action, but is not trusted to.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::workflow::Role;
use crate::entities::gauge::{Gauge, GaugeUseRecord};

/// Gauges within this many days of expiry are flagged due-soon
pub const DUE_SOON_WINDOW_DAYS: i64 = 7;

/// Computed usability status of a gauge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GaugeStatus {
    Ok,
    DueSoon,
    Expired,
    Broken,
}

impl std::fmt::Display for GaugeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GaugeStatus::Ok => write!(f, "ok"),
            GaugeStatus::DueSoon => write!(f, "due_soon"),
            GaugeStatus::Expired => write!(f, "expired"),
            GaugeStatus::Broken => write!(f, "broken"),
        }
    }
}

/// Whole days until calibration expiry, rounded up.
///
/// Matches the catalog convention: an expiry later today is 1 day left,
/// the expiry instant itself is 0.
pub fn days_left(expires_at: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    const DAY_SECONDS: i64 = 24 * 60 * 60;
    let secs = (expires_at - now).num_seconds();
    secs.div_euclid(DAY_SECONDS) + i64::from(secs.rem_euclid(DAY_SECONDS) > 0)
}

/// Compute a gauge's status at a point in time.
///
/// Pure in `(expires_at, broken, now)`.
pub fn status_of(gauge: &Gauge, now: DateTime<Utc>) -> GaugeStatus {
    if gauge.broken {
        return GaugeStatus::Broken;
    }
    let left = days_left(gauge.expires_at, now);
    if left <= 0 {
        GaugeStatus::Expired
    } else if left <= DUE_SOON_WINDOW_DAYS {
        GaugeStatus::DueSoon
    } else {
        GaugeStatus::Ok
    }
}

/// Whether a gauge in this status may be attached to a packet
pub fn is_eligible_for_use(status: GaugeStatus) -> bool {
    !matches!(status, GaugeStatus::Expired | GaugeStatus::Broken)
}

/// Due-soon gauges are usable but must be surfaced for review downstream
pub fn needs_review(status: GaugeStatus) -> bool {
    status == GaugeStatus::DueSoon
}

/// Errors from gauge use recording
#[derive(Debug, Error)]
pub enum CalibrationError {
    #[error("gauge {id} is {status} and cannot be used")]
    GaugeIneligible { id: String, status: GaugeStatus },

    #[error("gauge {id} is not recorded as used on this packet")]
    NotInUse { id: String },

    #[error("gauge verification requires the INSPECTOR role")]
    VerificationRequiresInspector,
}

/// Record use of a gauge on a packet.
///
/// Snapshots the status at the moment of selection and stamps the
/// actor-appropriate confirmation field. Ineligible gauges are rejected
/// here regardless of what the caller checked.
pub fn record_use(
    gauge: &Gauge,
    actor: Role,
    now: DateTime<Utc>,
) -> Result<GaugeUseRecord, CalibrationError> {
    let status = status_of(gauge, now);
    if !is_eligible_for_use(status) {
        return Err(CalibrationError::GaugeIneligible {
            id: gauge.id.clone(),
            status,
        });
    }
    Ok(GaugeUseRecord {
        gauge_id: gauge.id.clone(),
        status_at_use: status,
        confirmed_by_operator_at: (actor == Role::Operator).then_some(now),
        verified_by_inspector_at: (actor == Role::Inspector).then_some(now),
    })
}

/// Add the missing role timestamp to an existing use record.
///
/// A timestamp already present is never overwritten here; explicit
/// re-verification goes through [`verify_use`].
pub fn countersign_use(record: &mut GaugeUseRecord, actor: Role, now: DateTime<Utc>) {
    match actor {
        Role::Operator => {
            record.confirmed_by_operator_at.get_or_insert(now);
        }
        Role::Inspector => {
            record.verified_by_inspector_at.get_or_insert(now);
        }
    }
}

/// Explicit inspector re-verification; overwrites only the inspector slot
pub fn verify_use(
    record: &mut GaugeUseRecord,
    actor: Role,
    now: DateTime<Utc>,
) -> Result<(), CalibrationError> {
    if actor != Role::Inspector {
        return Err(CalibrationError::VerificationRequiresInspector);
    }
    record.verified_by_inspector_at = Some(now);
    Ok(())
}

/// A gauge augmented with its computed lifecycle fields, as the catalog
/// serves it. The store itself persists only the raw calibration fields.
#[derive(Debug, Clone, Serialize)]
pub struct GaugeView {
    #[serde(flatten)]
    pub gauge: Gauge,
    pub days_left: i64,
    pub status: GaugeStatus,
}

/// Augment a stored gauge with computed status and days-left
pub fn with_status(gauge: Gauge, now: DateTime<Utc>) -> GaugeView {
    let days_left = days_left(gauge.expires_at, now);
    let status = status_of(&gauge, now);
    GaugeView {
        gauge,
        days_left,
        status,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn gauge_expiring_in(days: i64, now: DateTime<Utc>) -> Gauge {
        Gauge {
            id: "g1".to_string(),
            name: "Thread Plug Gauge - 2-3/8\" 8RD".to_string(),
            gauge_type: "plug".to_string(),
            location: String::new(),
            last_calibrated: now - Duration::days(60),
            calibration_interval_days: 90,
            expires_at: now + Duration::days(days),
            broken: false,
            created_at: now,
        }
    }

    #[test]
    fn test_days_left_rounds_up() {
        let now = Utc::now();
        assert_eq!(days_left(now, now), 0);
        assert_eq!(days_left(now + Duration::seconds(1), now), 1);
        assert_eq!(days_left(now + Duration::days(7), now), 7);
        assert_eq!(days_left(now - Duration::seconds(1), now), 0);
        assert_eq!(days_left(now - Duration::days(10), now), -10);
        assert_eq!(days_left(now - Duration::hours(25), now), -1);
    }

    #[test]
    fn test_status_thresholds() {
        let now = Utc::now();
        // days_left 0 -> expired, 7 -> due_soon, 8 -> ok
        assert_eq!(status_of(&gauge_expiring_in(0, now), now), GaugeStatus::Expired);
        assert_eq!(status_of(&gauge_expiring_in(-10, now), now), GaugeStatus::Expired);
        assert_eq!(status_of(&gauge_expiring_in(7, now), now), GaugeStatus::DueSoon);
        assert_eq!(status_of(&gauge_expiring_in(1, now), now), GaugeStatus::DueSoon);
        assert_eq!(status_of(&gauge_expiring_in(8, now), now), GaugeStatus::Ok);
        assert_eq!(status_of(&gauge_expiring_in(30, now), now), GaugeStatus::Ok);
    }

    #[test]
    fn test_broken_wins_over_dates() {
        let now = Utc::now();
        let mut gauge = gauge_expiring_in(30, now);
        gauge.broken = true;
        assert_eq!(status_of(&gauge, now), GaugeStatus::Broken);
    }

    #[test]
    fn test_eligibility() {
        assert!(is_eligible_for_use(GaugeStatus::Ok));
        assert!(is_eligible_for_use(GaugeStatus::DueSoon));
        assert!(!is_eligible_for_use(GaugeStatus::Expired));
        assert!(!is_eligible_for_use(GaugeStatus::Broken));

        assert!(needs_review(GaugeStatus::DueSoon));
        assert!(!needs_review(GaugeStatus::Ok));
    }

    #[test]
    fn test_record_use_rejects_ineligible() {
        let now = Utc::now();
        let expired = gauge_expiring_in(-1, now);
        let err = record_use(&expired, Role::Operator, now).unwrap_err();
        assert!(matches!(err, CalibrationError::GaugeIneligible { .. }));

        let mut broken = gauge_expiring_in(30, now);
        broken.broken = true;
        assert!(record_use(&broken, Role::Inspector, now).is_err());
    }

    #[test]
    fn test_record_use_snapshots_status() {
        let now = Utc::now();
        let due = gauge_expiring_in(3, now);
        let record = record_use(&due, Role::Operator, now).unwrap();
        assert_eq!(record.status_at_use, GaugeStatus::DueSoon);
        assert_eq!(record.confirmed_by_operator_at, Some(now));
        assert_eq!(record.verified_by_inspector_at, None);
    }

    #[test]
    fn test_countersign_fills_missing_slot_only() {
        let now = Utc::now();
        let later = now + Duration::minutes(10);
        let gauge = gauge_expiring_in(30, now);

        let mut record = record_use(&gauge, Role::Operator, now).unwrap();
        countersign_use(&mut record, Role::Inspector, later);
        assert_eq!(record.confirmed_by_operator_at, Some(now));
        assert_eq!(record.verified_by_inspector_at, Some(later));

        // A second operator confirmation does not move the first timestamp
        countersign_use(&mut record, Role::Operator, later);
        assert_eq!(record.confirmed_by_operator_at, Some(now));
    }

    #[test]
    fn test_verify_use_is_inspector_only_and_overwrites() {
        let now = Utc::now();
        let later = now + Duration::minutes(5);
        let gauge = gauge_expiring_in(30, now);
        let mut record = record_use(&gauge, Role::Inspector, now).unwrap();

        assert!(matches!(
            verify_use(&mut record, Role::Operator, later),
            Err(CalibrationError::VerificationRequiresInspector)
        ));

        verify_use(&mut record, Role::Inspector, later).unwrap();
        assert_eq!(record.verified_by_inspector_at, Some(later));
    }

    #[test]
    fn test_with_status_augmentation() {
        let now = Utc::now();
        let view = with_status(gauge_expiring_in(30, now), now);
        assert_eq!(view.days_left, 30);
        assert_eq!(view.status, GaugeStatus::Ok);
    }
}
