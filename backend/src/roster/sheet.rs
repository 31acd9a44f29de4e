//! Tabular form: the spreadsheet representation of a roster batch.
//!
//! Row 1 is the fixed six-column header; every following row maps
//! positionally onto the six fields. The annotated report adds a seventh
//! "Schema Violations" column and a trailing summary block listing every
//! violation verbatim.

use common::model::soldier::Candidate;
use common::model::violation::Violation;

use crate::error::Result;

pub const HEADER: [&str; 6] = ["ID", "Name", "Rank", "Unit", "Service Date", "Status"];
pub const REMARKS_HEADER: &str = "Schema Violations";
const SUMMARY_TITLE: &str = "Schema Violations Summary";

fn cell(record: &csv::StringRecord, index: usize) -> Option<String> {
    record
        .get(index)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

/// Parses spreadsheet bytes into the candidate collection.
///
/// `Ok(None)` means the sheet had no rows at all, not even a header. Rows
/// missing both an identifier and a name are dropped as blank trailing
/// rows, not reported as violations.
pub fn parse_sheet(bytes: &[u8]) -> std::result::Result<Option<Vec<Candidate>>, String> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes);

    let mut rows = reader.records();
    match rows.next() {
        None => return Ok(None),
        Some(Err(e)) => return Err(format!("spreadsheet could not be parsed: {}", e)),
        Some(Ok(_header)) => {}
    }

    let mut candidates = Vec::new();
    for row in rows {
        let record = row.map_err(|e| format!("spreadsheet could not be parsed: {}", e))?;
        let candidate = Candidate {
            id: cell(&record, 0),
            name: cell(&record, 1),
            rank: cell(&record, 2),
            unit: cell(&record, 3),
            service_date: cell(&record, 4),
            status: cell(&record, 5),
        };
        // Blank filler rows carry neither identifier nor name.
        if candidate.id.is_none() && candidate.name.is_none() {
            continue;
        }
        candidates.push(candidate);
    }

    Ok(Some(candidates))
}

fn candidate_cells(c: &Candidate) -> [&str; 6] {
    [
        c.id.as_deref().unwrap_or(""),
        c.name.as_deref().unwrap_or(""),
        c.rank.as_deref().unwrap_or(""),
        c.unit.as_deref().unwrap_or(""),
        c.service_date.as_deref().unwrap_or(""),
        c.status.as_deref().unwrap_or(""),
    ]
}

/// Renders a plain six-column sheet, e.g. for the store export.
pub fn write_sheet(candidates: &[Candidate]) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    {
        let mut writer = csv::Writer::from_writer(&mut buffer);
        writer.write_record(HEADER)?;
        for candidate in candidates {
            writer.write_record(candidate_cells(candidate))?;
        }
        writer.flush()?;
    }
    Ok(buffer)
}

/// Renders the annotated report for a rejected batch: the original values,
/// a remarks column populated per ordinal (batch-level violations land on
/// row 1), and a trailing summary block with every violation verbatim.
pub fn write_annotated(candidates: &[Candidate], violations: &[Violation]) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    {
        let mut writer = csv::WriterBuilder::new()
            .flexible(true)
            .from_writer(&mut buffer);

        let mut header: Vec<&str> = HEADER.to_vec();
        header.push(REMARKS_HEADER);
        writer.write_record(&header)?;

        for (index, candidate) in candidates.iter().enumerate() {
            let ordinal = index + 1;
            let remarks = violations
                .iter()
                .filter(|v| v.ordinal == ordinal)
                .map(|v| v.to_string())
                .collect::<Vec<_>>()
                .join("; ");

            let cells = candidate_cells(candidate);
            let mut row: Vec<&str> = cells.to_vec();
            row.push(&remarks);
            writer.write_record(&row)?;
        }

        writer.write_record(&[""])?;
        writer.write_record(&[SUMMARY_TITLE])?;
        for violation in violations {
            writer.write_record(&[violation.to_string()])?;
        }

        writer.flush()?;
    }
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::model::violation::{FieldName, Rule};

    fn candidate(id: &str, name: &str) -> Candidate {
        Candidate {
            id: Some(id.to_string()),
            name: Some(name.to_string()),
            rank: Some("Cpl".to_string()),
            unit: Some("1st Bn".to_string()),
            service_date: Some("2020-01-15".to_string()),
            status: Some("Active".to_string()),
        }
    }

    #[test]
    fn round_trips_a_batch_field_for_field() {
        let original = vec![candidate("S-1", "Ada"), candidate("S-2", "Ben")];
        let bytes = write_sheet(&original).unwrap();
        let parsed = parse_sheet(&bytes).unwrap().unwrap();
        assert_eq!(parsed, original);
    }

    #[test]
    fn drops_rows_without_identifier_and_name() {
        let sheet = "ID,Name,Rank,Unit,Service Date,Status\n\
                     S-1,Ada,Cpl,1st Bn,2020-01-15,Active\n\
                     ,,,,,\n";
        let parsed = parse_sheet(sheet.as_bytes()).unwrap().unwrap();
        assert_eq!(parsed.len(), 1);
    }

    #[test]
    fn keeps_rows_with_only_an_identifier() {
        let sheet = "ID,Name,Rank,Unit,Service Date,Status\nS-1,,,,,\n";
        let parsed = parse_sheet(sheet.as_bytes()).unwrap().unwrap();
        assert_eq!(parsed.len(), 1);
        assert!(parsed[0].name.is_none());
    }

    #[test]
    fn empty_input_has_no_collection() {
        assert!(parse_sheet(b"").unwrap().is_none());
    }

    #[test]
    fn header_only_sheet_is_an_empty_batch() {
        let sheet = "ID,Name,Rank,Unit,Service Date,Status\n";
        let parsed = parse_sheet(sheet.as_bytes()).unwrap();
        assert_eq!(parsed, Some(vec![]));
    }

    #[test]
    fn annotated_report_attributes_remarks_by_ordinal() {
        let candidates = vec![candidate("S-1", "Ada"), candidate("S-2", "Ben")];
        let violations = vec![Violation::field(
            2,
            FieldName::Status,
            Rule::UnknownStatus,
            "status must be one of Active, Retired, Deceased (got \"active\")",
        )];

        let bytes = write_annotated(&candidates, &violations).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert!(lines[0].ends_with(REMARKS_HEADER));
        // Row for soldier 1 has an empty remarks cell, row 2 does not.
        assert!(lines[1].ends_with(","));
        assert!(lines[2].contains("soldier 2"));
        assert!(text.contains(SUMMARY_TITLE));
    }

    #[test]
    fn batch_level_violations_land_on_row_one() {
        let candidates = vec![candidate("S-1", "Ada")];
        let violations = vec![Violation::batch(Rule::EmptyRoster, "roster has no records")];
        let bytes = write_annotated(&candidates, &violations).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[1].contains("roster has no records"));
    }
}
