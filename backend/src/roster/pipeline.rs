//! The per-file conversion pipeline:
//! `RECEIVED → PARSING → VALIDATING → {ACCEPTED, REJECTED}`.
//!
//! One run is fully synchronous (handlers put it on the blocking pool) and
//! independent of any other run; the store is the only shared resource.
//! Schema validation is all-or-nothing per batch, persistence is
//! fault-isolated per record.

use chrono::Utc;
use common::model::ledger::{BatchOutcome, LogEntry};
use common::model::soldier::Soldier;
use common::model::verdict::Verdict;
use common::model::violation::{Rule, Violation};
use common::requests::ProcessResponse;
use log::{error, info, warn};
use uuid::Uuid;

use crate::config::Config;
use crate::error::Result;
use crate::roster::{sheet, validate, xml};
use crate::storage;
use crate::storage::files::{self, Area};

/// The declared shape of an incoming file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Xml,
    Sheet,
}

/// Runs one uploaded file through the pipeline and returns the verdict
/// summary. Errors are infrastructure failures only; a batch that merely
/// fails validation still returns `Ok` with a rejected outcome.
pub fn process_file(
    cfg: &Config,
    filename: &str,
    bytes: &[u8],
    kind: InputKind,
) -> Result<ProcessResponse> {
    let run_id = Uuid::new_v4();
    let stored_name = format!("{}_{}", run_id, sanitize_filename(filename));
    files::write(cfg, Area::Uploads, &stored_name, bytes)?;

    let parsed = match kind {
        InputKind::Xml => xml::parse_roster(bytes),
        InputKind::Sheet => sheet::parse_sheet(bytes),
    };
    let verdict = match parsed {
        Ok(batch) => validate::validate_batch(batch),
        // Parse failure is terminal: one violation, no candidates.
        Err(message) => Verdict::new(Vec::new(), vec![Violation::batch(Rule::ParseFailure, message)]),
    };

    let conn = storage::open(&cfg.db_path)?;
    let now = Utc::now();

    if verdict.is_valid {
        let mut accepted = 0usize;
        for candidate in &verdict.soldiers {
            match Soldier::try_from(candidate) {
                Ok(soldier) => match storage::upsert_soldier(&conn, &soldier, now) {
                    Ok(()) => accepted += 1,
                    Err(e) => error!("failed to store soldier {}: {}", soldier.id, e),
                },
                Err(e) => error!("validated candidate could not be converted: {}", e),
            }
        }

        files::move_between(cfg, Area::Uploads, Area::Validated, &stored_name)?;

        let outcome = match kind {
            InputKind::Xml => BatchOutcome::Validated,
            InputKind::Sheet => BatchOutcome::Corrected,
        };
        storage::insert_log(
            &conn,
            &LogEntry {
                filename: filename.to_string(),
                outcome,
                accepted,
                rejected: 0,
                violations: Vec::new(),
                created_at: now,
            },
        )?;

        info!("{}: accepted, {} soldier(s) stored", filename, accepted);
        Ok(ProcessResponse {
            outcome,
            accepted,
            rejected: 0,
            violations: Vec::new(),
            report: None,
        })
    } else {
        let report_name = format!("{}_violations.csv", run_id);
        let report = sheet::write_annotated(&verdict.soldiers, &verdict.violations)?;
        files::write(cfg, Area::Reports, &report_name, &report)?;
        files::move_between(cfg, Area::Uploads, Area::Invalid, &stored_name)?;

        storage::insert_log(
            &conn,
            &LogEntry {
                filename: filename.to_string(),
                outcome: BatchOutcome::Rejected,
                accepted: 0,
                rejected: verdict.soldiers.len(),
                violations: verdict.violations.clone(),
                created_at: now,
            },
        )?;

        warn!(
            "{}: rejected with {} violation(s), report {}",
            filename,
            verdict.violations.len(),
            report_name
        );
        Ok(ProcessResponse {
            outcome: BatchOutcome::Rejected,
            accepted: 0,
            rejected: verdict.soldiers.len(),
            violations: verdict.violations.iter().map(|v| v.to_string()).collect(),
            report: Some(report_name),
        })
    }
}

/// Makes an uploaded file name safe to place inside a holding area.
fn sanitize_filename(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let cleaned = cleaned.replace("..", "_").trim_start_matches('.').to_string();
    if cleaned.is_empty() {
        "upload".to_string()
    } else {
        cleaned
    }
}
