//! Order lifecycle - role-gated status transitions
//!
//! Orders move QUEUED -> IN_PROGRESS -> DONE, forward only and one step at
//! a time. Creation is an inspector act; closing an order is too. The acting
//! role is threaded into every call rather than read from ambient state, so
//! authorization is enforced here and testable without global setup.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::identity;
use crate::entities::order::Order;

/// Acting role for engine calls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Operator,
    Inspector,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Operator => write!(f, "OPERATOR"),
            Role::Inspector => write!(f, "INSPECTOR"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "OPERATOR" => Ok(Role::Operator),
            "INSPECTOR" => Ok(Role::Inspector),
            _ => Err(format!("Unknown role: '{}'. Use operator or inspector", s)),
        }
    }
}

/// Order status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[derive(Default)]
pub enum OrderStatus {
    #[default]
    Queued,
    InProgress,
    Done,
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderStatus::Queued => write!(f, "QUEUED"),
            OrderStatus::InProgress => write!(f, "IN_PROGRESS"),
            OrderStatus::Done => write!(f, "DONE"),
        }
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let folded: String = s
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_uppercase();
        match folded.as_str() {
            "QUEUED" => Ok(OrderStatus::Queued),
            "INPROGRESS" => Ok(OrderStatus::InProgress),
            "DONE" => Ok(OrderStatus::Done),
            _ => Err(format!(
                "Unknown status: '{}'. Use queued, in-progress or done",
                s
            )),
        }
    }
}

/// Errors from order lifecycle operations
#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("invalid status transition: {from} -> {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    #[error("{action} requires the {required} role (acting as {actual})")]
    Unauthorized {
        action: &'static str,
        required: Role,
        actual: Role,
    },

    #[error("order is missing a required field: {0}")]
    MissingField(&'static str),
}

/// Check if a status transition is valid (forward only, single step)
pub fn is_valid_transition(from: OrderStatus, to: OrderStatus) -> bool {
    matches!(
        (from, to),
        (OrderStatus::Queued, OrderStatus::InProgress)
            | (OrderStatus::InProgress, OrderStatus::Done)
    )
}

/// Get allowed transitions from the current status
pub fn allowed_transitions(current: OrderStatus) -> Vec<OrderStatus> {
    match current {
        OrderStatus::Queued => vec![OrderStatus::InProgress],
        OrderStatus::InProgress => vec![OrderStatus::Done],
        OrderStatus::Done => vec![],
    }
}

/// Create a new order. Inspector only; a missing id gets a generated one.
pub fn create_order(
    actor: Role,
    id: Option<String>,
    part_number: &str,
    required_thread: &str,
    status: Option<OrderStatus>,
    now: DateTime<Utc>,
) -> Result<Order, WorkflowError> {
    if actor != Role::Inspector {
        return Err(WorkflowError::Unauthorized {
            action: "creating an order",
            required: Role::Inspector,
            actual: actor,
        });
    }
    if part_number.trim().is_empty() {
        return Err(WorkflowError::MissingField("part_number"));
    }
    if required_thread.trim().is_empty() {
        return Err(WorkflowError::MissingField("required_thread"));
    }

    let id = id.unwrap_or_else(identity::generate_order_id);
    Ok(Order {
        id,
        part_number: part_number.to_string(),
        required_thread: required_thread.to_string(),
        status: status.unwrap_or_default(),
        created_at: now,
    })
}

/// Advance an order to the target status.
///
/// Either role may start work (QUEUED -> IN_PROGRESS); only an inspector may
/// close an order (IN_PROGRESS -> DONE).
pub fn advance(order: &mut Order, target: OrderStatus, actor: Role) -> Result<(), WorkflowError> {
    if !is_valid_transition(order.status, target) {
        return Err(WorkflowError::InvalidTransition {
            from: order.status,
            to: target,
        });
    }
    if target == OrderStatus::Done && actor != Role::Inspector {
        return Err(WorkflowError::Unauthorized {
            action: "closing an order",
            required: Role::Inspector,
            actual: actor,
        });
    }
    order.status = target;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn queued_order() -> Order {
        create_order(
            Role::Inspector,
            Some("441".to_string()),
            "PN-8821",
            "2-3/8\" 8RD",
            None,
            Utc::now(),
        )
        .unwrap()
    }

    #[test]
    fn test_valid_transitions() {
        assert!(is_valid_transition(OrderStatus::Queued, OrderStatus::InProgress));
        assert!(is_valid_transition(OrderStatus::InProgress, OrderStatus::Done));

        // No skips, no regressions
        assert!(!is_valid_transition(OrderStatus::Queued, OrderStatus::Done));
        assert!(!is_valid_transition(OrderStatus::InProgress, OrderStatus::Queued));
        assert!(!is_valid_transition(OrderStatus::Done, OrderStatus::InProgress));
        assert!(!is_valid_transition(OrderStatus::Done, OrderStatus::Queued));
        assert!(!is_valid_transition(OrderStatus::Queued, OrderStatus::Queued));
    }

    #[test]
    fn test_allowed_transitions() {
        assert_eq!(
            allowed_transitions(OrderStatus::Queued),
            vec![OrderStatus::InProgress]
        );
        assert_eq!(
            allowed_transitions(OrderStatus::InProgress),
            vec![OrderStatus::Done]
        );
        assert!(allowed_transitions(OrderStatus::Done).is_empty());
    }

    #[test]
    fn test_creation_is_inspector_only() {
        let err =
            create_order(Role::Operator, None, "PN-1", "NC38", None, Utc::now()).unwrap_err();
        assert!(matches!(err, WorkflowError::Unauthorized { .. }));
    }

    #[test]
    fn test_creation_generates_unique_ids() {
        let now = Utc::now();
        let a = create_order(Role::Inspector, None, "PN-1", "NC38", None, now).unwrap();
        let b = create_order(Role::Inspector, None, "PN-1", "NC38", None, now).unwrap();
        assert_ne!(a.id, b.id);
        assert!(a.id.starts_with("ORD-"));
    }

    #[test]
    fn test_creation_keeps_manual_id_and_status() {
        let order = create_order(
            Role::Inspector,
            Some("442".to_string()),
            "PN-8822",
            "3-1/2\" 8RD",
            Some(OrderStatus::InProgress),
            Utc::now(),
        )
        .unwrap();
        assert_eq!(order.id, "442");
        assert_eq!(order.status, OrderStatus::InProgress);
    }

    #[test]
    fn test_creation_requires_fields() {
        let err = create_order(Role::Inspector, None, " ", "NC38", None, Utc::now()).unwrap_err();
        assert!(matches!(err, WorkflowError::MissingField("part_number")));
    }

    #[test]
    fn test_advance_forward_only() {
        let mut order = queued_order();
        advance(&mut order, OrderStatus::InProgress, Role::Operator).unwrap();
        assert_eq!(order.status, OrderStatus::InProgress);

        let err = advance(&mut order, OrderStatus::Queued, Role::Inspector).unwrap_err();
        assert!(matches!(err, WorkflowError::InvalidTransition { .. }));
    }

    #[test]
    fn test_closing_requires_inspector() {
        let mut order = queued_order();
        advance(&mut order, OrderStatus::InProgress, Role::Operator).unwrap();

        let err = advance(&mut order, OrderStatus::Done, Role::Operator).unwrap_err();
        assert!(matches!(err, WorkflowError::Unauthorized { .. }));
        assert_eq!(order.status, OrderStatus::InProgress);

        advance(&mut order, OrderStatus::Done, Role::Inspector).unwrap();
        assert_eq!(order.status, OrderStatus::Done);
    }

    #[test]
    fn test_status_wire_format() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::InProgress).unwrap(),
            "\"IN_PROGRESS\""
        );
        assert_eq!(
            "in-progress".parse::<OrderStatus>().unwrap(),
            OrderStatus::InProgress
        );
        assert_eq!("QUEUED".parse::<OrderStatus>().unwrap(), OrderStatus::Queued);
    }
}
