//! Entity identity - prefixed ULID identifiers
//!
//! Generated ids look like `ORD-01J8ZK...`. Stores treat ids as opaque
//! strings, so manually assigned short ids (e.g. "441") remain valid; this
//! module only guarantees that *generated* ids never collide.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;
use ulid::Ulid;

/// Entity type prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityPrefix {
    /// Inspection order
    Ord,
    /// Measurement gauge
    Gau,
}

impl EntityPrefix {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityPrefix::Ord => "ORD",
            EntityPrefix::Gau => "GAU",
        }
    }
}

impl fmt::Display for EntityPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityPrefix {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ORD" => Ok(EntityPrefix::Ord),
            "GAU" => Ok(EntityPrefix::Gau),
            other => Err(IdParseError::UnknownPrefix(other.to_string())),
        }
    }
}

/// Errors from parsing an entity id string
#[derive(Debug, Error)]
pub enum IdParseError {
    #[error("id is missing a 'PREFIX-' part: {0}")]
    MissingPrefix(String),

    #[error("unknown entity prefix: {0}")]
    UnknownPrefix(String),

    #[error("invalid ULID in id: {0}")]
    InvalidUlid(String),
}

/// A generated entity identifier: `PREFIX-ULID`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityId {
    prefix: EntityPrefix,
    ulid: Ulid,
}

impl EntityId {
    /// Generate a fresh id for the given prefix
    pub fn new(prefix: EntityPrefix) -> Self {
        Self {
            prefix,
            ulid: Ulid::new(),
        }
    }

    pub fn prefix(&self) -> EntityPrefix {
        self.prefix
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.prefix, self.ulid)
    }
}

impl FromStr for EntityId {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (prefix, ulid) = s
            .split_once('-')
            .ok_or_else(|| IdParseError::MissingPrefix(s.to_string()))?;
        let prefix = prefix.parse()?;
        let ulid = Ulid::from_string(ulid).map_err(|_| IdParseError::InvalidUlid(s.to_string()))?;
        Ok(Self { prefix, ulid })
    }
}

impl Serialize for EntityId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for EntityId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Generate a fresh order id string
pub fn generate_order_id() -> String {
    EntityId::new(EntityPrefix::Ord).to_string()
}

/// Generate a fresh gauge id string
pub fn generate_gauge_id() -> String {
    EntityId::new(EntityPrefix::Gau).to_string()
}
