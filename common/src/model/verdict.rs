use crate::model::soldier::Candidate;
use crate::model::violation::Violation;
use serde::{Deserialize, Serialize};

/// The result of validating one uploaded batch.
///
/// `soldiers` always holds every extracted candidate, valid or not, so a
/// rejected batch can still be rendered for correction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub is_valid: bool,
    pub soldiers: Vec<Candidate>,
    pub violations: Vec<Violation>,
}

impl Verdict {
    pub fn new(soldiers: Vec<Candidate>, violations: Vec<Violation>) -> Self {
        Verdict {
            is_valid: violations.is_empty(),
            soldiers,
            violations,
        }
    }
}
