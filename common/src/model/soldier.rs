use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Service status of a soldier. The three literals are case-sensitive on
/// input; anything else is a schema violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoldierStatus {
    Active,
    Retired,
    Deceased,
}

impl SoldierStatus {
    pub const LITERALS: [&'static str; 3] = ["Active", "Retired", "Deceased"];

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Active" => Some(Self::Active),
            "Retired" => Some(Self::Retired),
            "Deceased" => Some(Self::Deceased),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Retired => "Retired",
            Self::Deceased => "Deceased",
        }
    }
}

/// A record as extracted from an uploaded file, before validation.
///
/// Every field is optional because the input may be missing any of them;
/// empty and whitespace-only values are treated as absent. Candidates are
/// kept around even when invalid so the annotated report can show the
/// original values next to the remarks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: Option<String>,
    pub name: Option<String>,
    pub rank: Option<String>,
    pub unit: Option<String>,
    pub service_date: Option<String>,
    pub status: Option<String>,
}

/// The canonical, fully validated record. All conversions (XML tree,
/// spreadsheet row, stored row) go through this struct so the field list
/// exists in exactly one place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Soldier {
    pub id: String,
    pub name: String,
    pub rank: String,
    pub unit: String,
    pub service_date: NaiveDate,
    pub status: SoldierStatus,
}

impl TryFrom<&Candidate> for Soldier {
    type Error = String;

    /// Converts a candidate that already passed schema validation. Fails
    /// with a field name if the candidate is not actually valid.
    fn try_from(c: &Candidate) -> Result<Self, String> {
        fn required(value: &Option<String>, field: &str) -> Result<String, String> {
            value
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .ok_or_else(|| format!("{} is missing", field))
        }

        let date_text = required(&c.service_date, "service_date")?;
        let status_text = required(&c.status, "status")?;

        Ok(Soldier {
            id: required(&c.id, "id")?,
            name: required(&c.name, "name")?,
            rank: required(&c.rank, "rank")?,
            unit: required(&c.unit, "unit")?,
            service_date: NaiveDate::parse_from_str(&date_text, "%Y-%m-%d")
                .map_err(|_| format!("service_date '{}' is not a valid date", date_text))?,
            status: SoldierStatus::parse(&status_text)
                .ok_or_else(|| format!("status '{}' is not a valid status", status_text))?,
        })
    }
}

impl From<&Soldier> for Candidate {
    fn from(s: &Soldier) -> Self {
        Candidate {
            id: Some(s.id.clone()),
            name: Some(s.name.clone()),
            rank: Some(s.rank.clone()),
            unit: Some(s.unit.clone()),
            service_date: Some(s.service_date.format("%Y-%m-%d").to_string()),
            status: Some(s.status.as_str().to_string()),
        }
    }
}

/// A soldier as persisted in the document store: the canonical record plus
/// the two system timestamps that exist in no other representation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSoldier {
    #[serde(flatten)]
    pub soldier: Soldier,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
