//! Monument condition vocabulary.
//!
//! # Invariants
//! - Parsing never fails: unknown text is kept verbatim as `Other`.
//! - `as_str` returns exactly what gets persisted and serialized.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Physical condition of a monument.
///
/// The canonical set is `MISSING`, `DAMAGED` and `GOOD`, but the registry
/// accepts any administrative wording, so the set stays open.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Condition {
    Missing,
    Damaged,
    Good,
    /// Any non-canonical condition text, stored as given.
    Other(String),
}

impl Condition {
    /// The canonical conditions, in the order seeding draws from.
    pub const CANONICAL: [Condition; 3] = [Condition::Missing, Condition::Damaged, Condition::Good];

    pub fn as_str(&self) -> &str {
        match self {
            Self::Missing => "MISSING",
            Self::Damaged => "DAMAGED",
            Self::Good => "GOOD",
            Self::Other(text) => text.as_str(),
        }
    }

    pub fn is_canonical(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl From<&str> for Condition {
    fn from(value: &str) -> Self {
        match value {
            "MISSING" => Self::Missing,
            "DAMAGED" => Self::Damaged,
            "GOOD" => Self::Good,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for Condition {
    fn from(value: String) -> Self {
        match value.as_str() {
            "MISSING" | "DAMAGED" | "GOOD" => Self::from(value.as_str()),
            _ => Self::Other(value),
        }
    }
}

impl FromStr for Condition {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl Display for Condition {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Condition {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Condition {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::from)
    }
}
