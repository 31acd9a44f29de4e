//! Request and response payloads for the HTTP API.

use crate::model::ledger::BatchOutcome;
use crate::model::soldier::StoredSoldier;
use serde::{Deserialize, Serialize};

/// Verdict summary returned by the upload and re-upload endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessResponse {
    pub outcome: BatchOutcome,
    pub accepted: usize,
    pub rejected: usize,
    /// Human-readable violation messages, in the order they were found.
    pub violations: Vec<String>,
    /// Name of the annotated report in the reports area, when rejected.
    pub report: Option<String>,
}

/// Query parameters for the soldier listing endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SoldierListQuery {
    /// Exact status match, one of the three literals.
    pub status: Option<String>,
    /// Case-insensitive unit substring match.
    pub unit: Option<String>,
    /// 1-based page number.
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

/// One page of stored soldiers plus the total matching count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SoldierPage {
    pub soldiers: Vec<StoredSoldier>,
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
}

/// Query parameters for the ledger listing endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LogQuery {
    pub limit: Option<u32>,
}

/// Contents of one holding area.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AreaSummary {
    pub area: String,
    pub count: usize,
    pub files: Vec<String>,
}

/// Holding-area contents plus aggregate store counts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryResponse {
    pub areas: Vec<AreaSummary>,
    pub soldiers: u64,
    pub log_entries: u64,
}
