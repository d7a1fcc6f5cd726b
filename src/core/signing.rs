//! Report signing protocol
//!
//! Operator and inspector signatures are independent timestamps; either may
//! land first, and a report is complete once both are present. Signing again
//! in the same role overwrites that role's own timestamp (intentional
//! re-sign), never the other role's. Printing is not gated on completeness.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::workflow::Role;

/// Signature progress of a report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SigningState {
    Unsigned,
    OperatorSigned,
    InspectorSigned,
    Complete,
}

impl std::fmt::Display for SigningState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SigningState::Unsigned => write!(f, "unsigned"),
            SigningState::OperatorSigned => write!(f, "operator-signed"),
            SigningState::InspectorSigned => write!(f, "inspector-signed"),
            SigningState::Complete => write!(f, "complete"),
        }
    }
}

/// Signature block carried by every report
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SignatureBlock {
    /// Operator's printed name
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub operator_name: String,

    /// Inspector's printed name
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub inspector_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator_signed_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inspector_signed_at: Option<DateTime<Utc>>,
}

impl SignatureBlock {
    /// Stamp the acting role's signature. Re-signing overwrites the prior
    /// timestamp for that role; the other role's signature is untouched.
    pub fn sign(&mut self, role: Role, now: DateTime<Utc>) {
        match role {
            Role::Operator => self.operator_signed_at = Some(now),
            Role::Inspector => self.inspector_signed_at = Some(now),
        }
    }

    pub fn signed_at(&self, role: Role) -> Option<DateTime<Utc>> {
        match role {
            Role::Operator => self.operator_signed_at,
            Role::Inspector => self.inspector_signed_at,
        }
    }

    /// Both signatures present
    pub fn is_complete(&self) -> bool {
        self.operator_signed_at.is_some() && self.inspector_signed_at.is_some()
    }

    pub fn state(&self) -> SigningState {
        match (self.operator_signed_at, self.inspector_signed_at) {
            (None, None) => SigningState::Unsigned,
            (Some(_), None) => SigningState::OperatorSigned,
            (None, Some(_)) => SigningState::InspectorSigned,
            (Some(_), Some(_)) => SigningState::Complete,
        }
    }
}
