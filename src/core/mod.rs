//! Core module - the validation engine

pub mod calibration;
pub mod identity;
pub mod measurement;
pub mod packet;
pub mod signing;
pub mod tolerance;
pub mod workflow;

pub use calibration::{
    days_left, is_eligible_for_use, needs_review, record_use, status_of, with_status,
    CalibrationError, GaugeStatus, GaugeView,
};
pub use identity::{EntityId, EntityPrefix, IdParseError};
pub use measurement::{evaluate, parse_reading, Evaluation, Reading};
pub use packet::open_packet;
pub use signing::{SignatureBlock, SigningState};
pub use tolerance::{is_out_of_tolerance, rule_for, DimensionKey, ToleranceRule};
pub use workflow::{
    advance, allowed_transitions, create_order, is_valid_transition, OrderStatus, Role,
    WorkflowError,
};
