//! The document store: one `soldiers` collection keyed by identifier and an
//! insert-only `process_log` ledger, both in a single SQLite file.

use chrono::{DateTime, NaiveDate, Utc};
use common::model::ledger::{BatchOutcome, LogEntry};
use common::model::soldier::{Soldier, SoldierStatus, StoredSoldier};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

pub mod files;

pub fn open(db_path: &Path) -> rusqlite::Result<Connection> {
    Connection::open(db_path)
}

pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS soldiers (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            rank TEXT NOT NULL,
            unit TEXT NOT NULL,
            service_date TEXT NOT NULL,
            status TEXT NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );
        CREATE TABLE IF NOT EXISTS process_log (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            filename TEXT NOT NULL,
            outcome TEXT NOT NULL,
            accepted INTEGER NOT NULL,
            rejected INTEGER NOT NULL,
            violations TEXT NOT NULL,
            created_at TEXT NOT NULL
        );",
    )
}

/// On-demand connectivity probe; nothing is cached.
pub fn health_check(db_path: &Path) -> rusqlite::Result<()> {
    let conn = open(db_path)?;
    conn.query_row("SELECT 1", [], |_| Ok(()))
}

/// Inserts or updates a soldier by identifier. Last valid submission wins;
/// `created_at` survives re-submission, `updated_at` is refreshed.
pub fn upsert_soldier(
    conn: &Connection,
    soldier: &Soldier,
    now: DateTime<Utc>,
) -> rusqlite::Result<()> {
    conn.execute(
        "INSERT INTO soldiers (id, name, rank, unit, service_date, status, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)
         ON CONFLICT(id) DO UPDATE SET
            name = excluded.name,
            rank = excluded.rank,
            unit = excluded.unit,
            service_date = excluded.service_date,
            status = excluded.status,
            updated_at = excluded.updated_at",
        params![
            soldier.id,
            soldier.name,
            soldier.rank,
            soldier.unit,
            soldier.service_date.format("%Y-%m-%d").to_string(),
            soldier.status.as_str(),
            now.to_rfc3339(),
        ],
    )?;
    Ok(())
}

const SOLDIER_COLUMNS: &str = "id, name, rank, unit, service_date, status, created_at, updated_at";

fn conversion_error(
    index: usize,
    message: impl Into<Box<dyn std::error::Error + Send + Sync>>,
) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(index, Type::Text, message.into())
}

fn parse_timestamp(index: usize, text: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(text)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| conversion_error(index, e.to_string()))
}

fn soldier_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<StoredSoldier> {
    let service_date: String = row.get(4)?;
    let status: String = row.get(5)?;
    let created_at: String = row.get(6)?;
    let updated_at: String = row.get(7)?;

    Ok(StoredSoldier {
        soldier: Soldier {
            id: row.get(0)?,
            name: row.get(1)?,
            rank: row.get(2)?,
            unit: row.get(3)?,
            service_date: NaiveDate::parse_from_str(&service_date, "%Y-%m-%d")
                .map_err(|e| conversion_error(4, e.to_string()))?,
            status: SoldierStatus::parse(&status)
                .ok_or_else(|| conversion_error(5, format!("unknown status '{}'", status)))?,
        },
        created_at: parse_timestamp(6, &created_at)?,
        updated_at: parse_timestamp(7, &updated_at)?,
    })
}

pub fn find_soldier(conn: &Connection, id: &str) -> rusqlite::Result<Option<StoredSoldier>> {
    conn.query_row(
        &format!("SELECT {} FROM soldiers WHERE id = ?1", SOLDIER_COLUMNS),
        params![id],
        soldier_from_row,
    )
    .optional()
}

/// Filtered, paginated listing. Status matches exactly; the unit filter is a
/// case-insensitive substring match.
#[derive(Debug, Clone, Default)]
pub struct SoldierFilter {
    pub status: Option<SoldierStatus>,
    pub unit: Option<String>,
    /// 1-based page number.
    pub page: u32,
    pub page_size: u32,
}

pub fn list_soldiers(
    conn: &Connection,
    filter: &SoldierFilter,
) -> rusqlite::Result<(Vec<StoredSoldier>, u64)> {
    let status = filter.status.map(|s| s.as_str().to_string());
    let unit_like = filter.unit.as_ref().map(|u| format!("%{}%", u.to_lowercase()));

    let total: u64 = conn.query_row(
        "SELECT COUNT(*) FROM soldiers
         WHERE (?1 IS NULL OR status = ?1)
           AND (?2 IS NULL OR LOWER(unit) LIKE ?2)",
        params![status, unit_like],
        |row| row.get(0),
    )?;

    let page = filter.page.max(1);
    let offset = (page as i64 - 1) * filter.page_size as i64;
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM soldiers
         WHERE (?1 IS NULL OR status = ?1)
           AND (?2 IS NULL OR LOWER(unit) LIKE ?2)
         ORDER BY id
         LIMIT ?3 OFFSET ?4",
        SOLDIER_COLUMNS
    ))?;
    let soldiers = stmt
        .query_map(
            params![status, unit_like, filter.page_size as i64, offset],
            soldier_from_row,
        )?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok((soldiers, total))
}

/// Every stored soldier in identifier order, for the spreadsheet export.
pub fn all_soldiers(conn: &Connection) -> rusqlite::Result<Vec<StoredSoldier>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM soldiers ORDER BY id",
        SOLDIER_COLUMNS
    ))?;
    let rows = stmt
        .query_map([], soldier_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>();
    rows
}

pub fn count_soldiers(conn: &Connection) -> rusqlite::Result<u64> {
    conn.query_row("SELECT COUNT(*) FROM soldiers", [], |row| row.get(0))
}

/// Appends one ledger entry. Entries are never updated or deleted.
pub fn insert_log(conn: &Connection, entry: &LogEntry) -> rusqlite::Result<()> {
    let violations = serde_json::to_string(&entry.violations)
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;
    conn.execute(
        "INSERT INTO process_log (filename, outcome, accepted, rejected, violations, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            entry.filename,
            entry.outcome.as_str(),
            entry.accepted as i64,
            entry.rejected as i64,
            violations,
            entry.created_at.to_rfc3339(),
        ],
    )?;
    Ok(())
}

pub fn recent_logs(conn: &Connection, limit: u32) -> rusqlite::Result<Vec<LogEntry>> {
    let mut stmt = conn.prepare(
        "SELECT filename, outcome, accepted, rejected, violations, created_at
         FROM process_log ORDER BY id DESC LIMIT ?1",
    )?;
    let rows = stmt.query_map(params![limit as i64], |row| {
        let outcome: String = row.get(1)?;
        let violations: String = row.get(4)?;
        let created_at: String = row.get(5)?;
        Ok(LogEntry {
            filename: row.get(0)?,
            outcome: BatchOutcome::parse(&outcome)
                .ok_or_else(|| conversion_error(1, format!("unknown outcome '{}'", outcome)))?,
            accepted: row.get::<_, i64>(2)? as usize,
            rejected: row.get::<_, i64>(3)? as usize,
            violations: serde_json::from_str(&violations)
                .map_err(|e| conversion_error(4, e.to_string()))?,
            created_at: parse_timestamp(5, &created_at)?,
        })
    })?
    .collect::<rusqlite::Result<Vec<_>>>();
    rows
}

pub fn count_logs(conn: &Connection) -> rusqlite::Result<u64> {
    conn.query_row("SELECT COUNT(*) FROM process_log", [], |row| row.get(0))
}
