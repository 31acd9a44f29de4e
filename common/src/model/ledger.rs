use crate::model::violation::Violation;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How a processed file ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BatchOutcome {
    /// An XML upload passed validation and was stored.
    Validated,
    /// The batch failed validation; nothing was stored.
    Rejected,
    /// A corrected spreadsheet passed validation and was stored.
    Corrected,
}

impl BatchOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Validated => "validated",
            Self::Rejected => "rejected",
            Self::Corrected => "corrected",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "validated" => Some(Self::Validated),
            "rejected" => Some(Self::Rejected),
            "corrected" => Some(Self::Corrected),
            _ => None,
        }
    }
}

/// One insert-only ledger entry, written exactly once per pipeline run and
/// never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub filename: String,
    pub outcome: BatchOutcome,
    pub accepted: usize,
    pub rejected: usize,
    pub violations: Vec<Violation>,
    pub created_at: DateTime<Utc>,
}
