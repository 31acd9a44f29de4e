//! The schema validator: a pure function from a parsed batch to a verdict.
//!
//! Every check runs on every candidate so a single pass reports the full
//! violation list; nothing short-circuits. Each violation carries the
//! 1-based ordinal of the offending record, which is what lets the
//! annotated report attribute remarks to rows.

use common::model::soldier::{Candidate, SoldierStatus};
use common::model::verdict::Verdict;
use common::model::violation::{FieldName, Rule, Violation};
use once_cell::sync::Lazy;
use regex::Regex;

const MAX_ID: usize = 50;
const MAX_NAME: usize = 100;
const MAX_RANK: usize = 50;
const MAX_UNIT: usize = 100;

static DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4})-(\d{2})-(\d{2})$").expect("date pattern is valid"));

/// Validates one batch. `None` means the input had no record collection at
/// all; both fatal batch-level cases produce a verdict with no candidates.
pub fn validate_batch(batch: Option<Vec<Candidate>>) -> Verdict {
    let soldiers = match batch {
        None => {
            return Verdict::new(
                Vec::new(),
                vec![Violation::batch(
                    Rule::MissingRoster,
                    "input contains no soldier records",
                )],
            )
        }
        Some(soldiers) if soldiers.is_empty() => {
            return Verdict::new(
                Vec::new(),
                vec![Violation::batch(
                    Rule::EmptyRoster,
                    "roster has no records",
                )],
            )
        }
        Some(soldiers) => soldiers,
    };

    let mut violations = Vec::new();
    for (index, candidate) in soldiers.iter().enumerate() {
        check_candidate(index + 1, candidate, &mut violations);
    }

    Verdict::new(soldiers, violations)
}

fn check_candidate(ordinal: usize, candidate: &Candidate, out: &mut Vec<Violation>) {
    check_text(ordinal, FieldName::Id, &candidate.id, MAX_ID, out);
    check_text(ordinal, FieldName::Name, &candidate.name, MAX_NAME, out);
    check_text(ordinal, FieldName::Rank, &candidate.rank, MAX_RANK, out);
    check_text(ordinal, FieldName::Unit, &candidate.unit, MAX_UNIT, out);
    check_service_date(ordinal, &candidate.service_date, out);
    check_status(ordinal, &candidate.status, out);
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn check_text(
    ordinal: usize,
    field: FieldName,
    value: &Option<String>,
    max_len: usize,
    out: &mut Vec<Violation>,
) {
    match present(value) {
        None => out.push(Violation::field(
            ordinal,
            field,
            Rule::MissingField,
            format!("{} is required", field.as_str()),
        )),
        Some(text) => {
            if text.chars().count() > max_len {
                out.push(Violation::field(
                    ordinal,
                    field,
                    Rule::FieldTooLong,
                    format!("{} exceeds {} characters", field.as_str(), max_len),
                ));
            }
        }
    }
}

fn check_service_date(ordinal: usize, value: &Option<String>, out: &mut Vec<Violation>) {
    let text = match present(value) {
        None => {
            out.push(Violation::field(
                ordinal,
                FieldName::ServiceDate,
                Rule::MissingField,
                "service_date is required",
            ));
            return;
        }
        Some(text) => text,
    };

    // Format first: the literal YYYY-MM-DD shape with a plausible month and
    // day. A shape match can still name an impossible day (2021-02-30),
    // which is reported as a distinct calendar violation.
    let captures = match DATE_RE.captures(text) {
        Some(captures) => captures,
        None => {
            out.push(bad_format(ordinal, text));
            return;
        }
    };
    let month: u32 = captures[2].parse().unwrap_or(0);
    let day: u32 = captures[3].parse().unwrap_or(0);
    if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
        out.push(bad_format(ordinal, text));
        return;
    }

    if chrono::NaiveDate::parse_from_str(text, "%Y-%m-%d").is_err() {
        out.push(Violation::field(
            ordinal,
            FieldName::ServiceDate,
            Rule::NotACalendarDate,
            format!("service_date \"{}\" is not a real calendar date", text),
        ));
    }
}

fn bad_format(ordinal: usize, text: &str) -> Violation {
    Violation::field(
        ordinal,
        FieldName::ServiceDate,
        Rule::BadDateFormat,
        format!("service_date must use the YYYY-MM-DD format (got \"{}\")", text),
    )
}

fn check_status(ordinal: usize, value: &Option<String>, out: &mut Vec<Violation>) {
    let text = match present(value) {
        None => {
            out.push(Violation::field(
                ordinal,
                FieldName::Status,
                Rule::MissingField,
                "status is required",
            ));
            return;
        }
        Some(text) => text,
    };

    if SoldierStatus::parse(text).is_none() {
        out.push(Violation::field(
            ordinal,
            FieldName::Status,
            Rule::UnknownStatus,
            format!(
                "status must be one of {} (got \"{}\")",
                SoldierStatus::LITERALS.join(", "),
                text
            ),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_candidate() -> Candidate {
        Candidate {
            id: Some("S-100".to_string()),
            name: Some("Ada Lovelace".to_string()),
            rank: Some("Sergeant".to_string()),
            unit: Some("2nd Battalion".to_string()),
            service_date: Some("2019-05-01".to_string()),
            status: Some("Active".to_string()),
        }
    }

    #[test]
    fn valid_batch_passes_with_no_violations() {
        let verdict = validate_batch(Some(vec![valid_candidate(), valid_candidate()]));
        assert!(verdict.is_valid);
        assert!(verdict.violations.is_empty());
        assert_eq!(verdict.soldiers.len(), 2);
    }

    #[test]
    fn missing_collection_is_a_fatal_batch_violation() {
        let verdict = validate_batch(None);
        assert!(!verdict.is_valid);
        assert!(verdict.soldiers.is_empty());
        assert_eq!(verdict.violations.len(), 1);
        assert_eq!(verdict.violations[0].rule, Rule::MissingRoster);
    }

    #[test]
    fn empty_collection_is_a_fatal_batch_violation() {
        let verdict = validate_batch(Some(vec![]));
        assert!(!verdict.is_valid);
        assert_eq!(verdict.violations[0].rule, Rule::EmptyRoster);
    }

    #[test]
    fn each_missing_field_reports_exactly_one_presence_violation() {
        let fields = [
            FieldName::Id,
            FieldName::Name,
            FieldName::Rank,
            FieldName::Unit,
            FieldName::ServiceDate,
            FieldName::Status,
        ];
        for field in fields {
            let mut candidate = valid_candidate();
            match field {
                FieldName::Id => candidate.id = None,
                FieldName::Name => candidate.name = None,
                FieldName::Rank => candidate.rank = None,
                FieldName::Unit => candidate.unit = None,
                FieldName::ServiceDate => candidate.service_date = None,
                FieldName::Status => candidate.status = None,
            }
            let verdict = validate_batch(Some(vec![valid_candidate(), candidate]));
            assert_eq!(verdict.violations.len(), 1, "field {:?}", field);
            let violation = &verdict.violations[0];
            assert_eq!(violation.rule, Rule::MissingField);
            assert_eq!(violation.field, Some(field));
            assert_eq!(violation.ordinal, 2);
        }
    }

    #[test]
    fn empty_string_counts_as_missing() {
        let mut candidate = valid_candidate();
        candidate.rank = Some("   ".to_string());
        let verdict = validate_batch(Some(vec![candidate]));
        assert_eq!(verdict.violations.len(), 1);
        assert_eq!(verdict.violations[0].rule, Rule::MissingField);
    }

    #[test]
    fn overlong_fields_are_reported() {
        let mut candidate = valid_candidate();
        candidate.id = Some("x".repeat(51));
        candidate.name = Some("y".repeat(101));
        let verdict = validate_batch(Some(vec![candidate]));
        assert_eq!(verdict.violations.len(), 2);
        assert!(verdict
            .violations
            .iter()
            .all(|v| v.rule == Rule::FieldTooLong));
    }

    #[test]
    fn month_thirteen_fails_the_format_rule() {
        let mut candidate = valid_candidate();
        candidate.service_date = Some("2021-13-01".to_string());
        let verdict = validate_batch(Some(vec![candidate]));
        assert_eq!(verdict.violations.len(), 1);
        assert_eq!(verdict.violations[0].rule, Rule::BadDateFormat);
    }

    #[test]
    fn february_thirtieth_fails_the_calendar_rule_not_the_format_rule() {
        let mut candidate = valid_candidate();
        candidate.service_date = Some("2021-02-30".to_string());
        let verdict = validate_batch(Some(vec![candidate]));
        assert_eq!(verdict.violations.len(), 1);
        assert_eq!(verdict.violations[0].rule, Rule::NotACalendarDate);
    }

    #[test]
    fn non_date_text_fails_the_format_rule() {
        let mut candidate = valid_candidate();
        candidate.service_date = Some("May 1st 2019".to_string());
        let verdict = validate_batch(Some(vec![candidate]));
        assert_eq!(verdict.violations[0].rule, Rule::BadDateFormat);
    }

    #[test]
    fn status_literals_are_case_sensitive() {
        let mut candidate = valid_candidate();
        candidate.status = Some("active".to_string());
        let verdict = validate_batch(Some(vec![candidate]));
        assert_eq!(verdict.violations.len(), 1);
        assert_eq!(verdict.violations[0].rule, Rule::UnknownStatus);
    }

    #[test]
    fn unknown_status_echoes_the_offending_value_and_ordinal() {
        let mut bad = valid_candidate();
        bad.status = Some("Missing in Action".to_string());
        let verdict = validate_batch(Some(vec![valid_candidate(), bad]));
        let message = verdict.violations[0].to_string();
        assert!(message.contains("soldier 2"), "message: {}", message);
        assert!(message.contains("Missing in Action"), "message: {}", message);
    }

    #[test]
    fn all_checks_run_without_short_circuiting() {
        let broken = Candidate::default();
        let verdict = validate_batch(Some(vec![broken, valid_candidate()]));
        // All six presence rules fire for the first candidate.
        assert_eq!(verdict.violations.len(), 6);
        assert!(verdict.violations.iter().all(|v| v.ordinal == 1));
        assert_eq!(verdict.soldiers.len(), 2);
    }
}
