use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the six record fields a rule can apply to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldName {
    Id,
    Name,
    Rank,
    Unit,
    ServiceDate,
    Status,
}

impl FieldName {
    /// The field name as it appears in the XML tags and in messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Name => "name",
            Self::Rank => "rank",
            Self::Unit => "unit",
            Self::ServiceDate => "service_date",
            Self::Status => "status",
        }
    }
}

/// The schema rule that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    /// The input contained no soldier collection at all.
    MissingRoster,
    /// The soldier collection was present but empty.
    EmptyRoster,
    /// The file could not be parsed; fatal, no candidates extracted.
    ParseFailure,
    MissingField,
    FieldTooLong,
    BadDateFormat,
    NotACalendarDate,
    UnknownStatus,
}

/// A single schema violation, kept structured internally. Human-readable
/// rendering happens only at the report/API boundary via `Display`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// 1-based position of the offending record within the batch.
    /// Batch-level violations are attributed to row 1.
    pub ordinal: usize,
    pub field: Option<FieldName>,
    pub rule: Rule,
    pub detail: String,
}

impl Violation {
    pub fn batch(rule: Rule, detail: impl Into<String>) -> Self {
        Violation {
            ordinal: 1,
            field: None,
            rule,
            detail: detail.into(),
        }
    }

    pub fn field(ordinal: usize, field: FieldName, rule: Rule, detail: impl Into<String>) -> Self {
        Violation {
            ordinal,
            field: Some(field),
            rule,
            detail: detail.into(),
        }
    }

    pub fn is_batch_level(&self) -> bool {
        matches!(
            self.rule,
            Rule::MissingRoster | Rule::EmptyRoster | Rule::ParseFailure
        )
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_batch_level() {
            write!(f, "{}", self.detail)
        } else {
            write!(f, "soldier {}: {}", self.ordinal, self.detail)
        }
    }
}
