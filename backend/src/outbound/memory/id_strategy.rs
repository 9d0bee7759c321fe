//! Identifier allocation strategies for the in-memory store.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How the store picks the id of a newly inserted record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IdStrategy {
    /// A counter that never goes backwards, so ids are never reused.
    #[default]
    Monotonic,
    /// Highest live id plus one. Deleting the highest record frees its id
    /// for the next insert.
    MaxPlusOne,
}

impl IdStrategy {
    /// Configuration spelling of the strategy.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Monotonic => "monotonic",
            Self::MaxPlusOne => "max-plus-one",
        }
    }
}

impl fmt::Display for IdStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned for an unrecognised strategy name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown id strategy {0:?}; expected monotonic or max-plus-one")]
pub struct ParseIdStrategyError(String);

impl FromStr for IdStrategy {
    type Err = ParseIdStrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "monotonic" => Ok(Self::Monotonic),
            "max-plus-one" | "max_plus_one" => Ok(Self::MaxPlusOne),
            _ => Err(ParseIdStrategyError(s.to_owned())),
        }
    }
}
