//! Tree form: the XML representation of a roster batch.
//!
//! Expected shape is a `<roster>` root wrapping one or more `<soldier>`
//! elements, each with the six text children `id`, `name`, `rank`, `unit`,
//! `service_date` and `status`. A singleton batch deserializes into a
//! one-element collection, so serializers that omit repetition still work.

use common::model::soldier::Candidate;
use quick_xml::de::from_str;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct RosterXml {
    /// `None` when the document has no `<soldier>` children at all; the
    /// validator reports that as a batch-level violation rather than a
    /// parse failure.
    #[serde(rename = "soldier")]
    soldiers: Option<Vec<SoldierXml>>,
}

#[derive(Debug, Deserialize)]
struct SoldierXml {
    id: Option<String>,
    name: Option<String>,
    rank: Option<String>,
    unit: Option<String>,
    service_date: Option<String>,
    status: Option<String>,
}

impl From<SoldierXml> for Candidate {
    fn from(s: SoldierXml) -> Self {
        Candidate {
            id: s.id,
            name: s.name,
            rank: s.rank,
            unit: s.unit,
            service_date: s.service_date,
            status: s.status,
        }
    }
}

/// Parses raw XML bytes into the candidate collection.
///
/// `Ok(None)` means the document parsed but contained no soldier
/// collection. `Err` carries a human-readable parse message and is fatal
/// for the file.
pub fn parse_roster(bytes: &[u8]) -> Result<Option<Vec<Candidate>>, String> {
    let text =
        std::str::from_utf8(bytes).map_err(|_| "file is not valid UTF-8".to_string())?;

    let roster: RosterXml =
        from_str(text).map_err(|e| format!("XML could not be parsed: {}", e))?;

    Ok(roster
        .soldiers
        .map(|soldiers| soldiers.into_iter().map(Candidate::from).collect()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn soldier_xml(id: &str, name: &str) -> String {
        format!(
            "<soldier><id>{}</id><name>{}</name><rank>Sgt</rank><unit>2nd Bn</unit>\
             <service_date>2019-05-01</service_date><status>Active</status></soldier>",
            id, name
        )
    }

    #[test]
    fn parses_multiple_soldiers_in_order() {
        let xml = format!(
            "<roster>{}{}</roster>",
            soldier_xml("S-1", "Ada"),
            soldier_xml("S-2", "Ben")
        );
        let candidates = parse_roster(xml.as_bytes()).unwrap().unwrap();
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].id.as_deref(), Some("S-1"));
        assert_eq!(candidates[1].name.as_deref(), Some("Ben"));
    }

    #[test]
    fn singleton_batch_coerces_to_one_element_collection() {
        let xml = format!("<roster>{}</roster>", soldier_xml("S-9", "Cara"));
        let candidates = parse_roster(xml.as_bytes()).unwrap().unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].status.as_deref(), Some("Active"));
    }

    #[test]
    fn missing_soldier_collection_yields_none() {
        let parsed = parse_roster(b"<roster></roster>").unwrap();
        assert!(parsed.is_none());
    }

    #[test]
    fn missing_fields_are_none() {
        let xml = "<roster><soldier><id>S-3</id><name>Dan</name></soldier></roster>";
        let candidates = parse_roster(xml.as_bytes()).unwrap().unwrap();
        assert!(candidates[0].rank.is_none());
        assert!(candidates[0].service_date.is_none());
    }

    #[test]
    fn malformed_xml_is_a_parse_error() {
        let err = parse_roster(b"<roster><soldier>").unwrap_err();
        assert!(err.contains("parsed"), "unexpected message: {}", err);
    }
}
