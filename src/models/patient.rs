//! Patient record extracted from the daily census

use serde::{Deserialize, Serialize};

/// One patient row from the census listing
///
/// Created once per qualifying row during a single extraction pass and
/// immutable thereafter; records live only for the duration of one
/// reconciliation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientRecord {
    /// Physical bed identifier; may encode the unit via a numeric prefix
    pub bed: String,
    /// Hospital registration number, the join key across sources
    pub registration: String,
    /// Patient name as printed in the census
    pub name: String,
    /// Sex as printed in the census
    pub sex: String,
    /// Age with separators stripped (digits only)
    pub age: String,
    /// Admitting diagnosis; carried through for the census export, not
    /// used by the reconciler
    pub diagnosis: String,
    /// Admission date, free-form as sourced
    pub admission_date: String,
    /// Canonical unit resolved from the bed identifier and section label
    pub unit: String,
}

impl PatientRecord {
    /// Registration-number validity predicate for census rows
    ///
    /// Registration numbers are numeric-ish but may contain separators, so
    /// the predicate is: at least five characters and at least one digit.
    #[must_use]
    pub fn is_valid_registration(raw: &str) -> bool {
        raw.len() >= 5 && raw.chars().any(|c| c.is_ascii_digit())
    }
}
