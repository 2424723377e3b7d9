//! Interactive review of incomplete reconciled records
//!
//! Both sources are human-curated and frequently incomplete, so records
//! with unresolved fields are surfaced for correction instead of being
//! dropped. The review set is the mutable working copy one interactive
//! session edits; report generation reads it at the moment of export, so
//! corrections and exports are strictly sequenced.

use serde::{Deserialize, Serialize};

use crate::models::isolation::PRECAUTION_JOIN;
use crate::models::ReconciledRecord;
use crate::reconcile::ReconciliationOutcome;

/// Field a correction targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CorrectionField {
    /// Bed identifier
    Bed,
    /// Patient name
    PatientName,
    /// Sex
    Sex,
    /// Age
    Age,
    /// Admission date
    AdmissionDate,
    /// Precaution types, given as a " / "-joined list
    PrecautionTypes,
}

/// One field-level overwrite keyed by registration number
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Correction {
    /// Registration number identifying the record
    pub registration: String,
    /// Field to overwrite
    pub field: CorrectionField,
    /// New value; blank values are ignored
    pub value: String,
}

/// Mutable working copy of a reconciliation outcome
///
/// Corrections apply only to records currently in the review subset.
/// Applying re-evaluates the record's completeness and moves it to the
/// complete subset once nothing is left unresolved; re-submitting the same
/// correction is a no-op with respect to subset membership. Conflicting
/// corrections to the same field resolve last-write-wins.
#[derive(Debug, Clone)]
pub struct ReviewSet {
    complete: Vec<ReconciledRecord>,
    review: Vec<ReconciledRecord>,
}

impl ReviewSet {
    /// Take ownership of a reconciliation outcome for interactive editing
    #[must_use]
    pub fn new(outcome: ReconciliationOutcome) -> Self {
        Self {
            complete: outcome.complete,
            review: outcome.review,
        }
    }

    /// Records with every field resolved
    #[must_use]
    pub fn complete(&self) -> &[ReconciledRecord] {
        &self.complete
    }

    /// Records still awaiting correction
    #[must_use]
    pub fn review(&self) -> &[ReconciledRecord] {
        &self.review
    }

    /// All records, complete first, as read at export time
    pub fn records(&self) -> impl Iterator<Item = &ReconciledRecord> {
        self.complete.iter().chain(self.review.iter())
    }

    /// Apply one correction
    ///
    /// Returns `true` when the correction completed the record and moved
    /// it to the complete subset. Corrections addressed to records not
    /// currently under review, and blank correction values, are no-ops.
    pub fn apply(&mut self, correction: &Correction) -> bool {
        let value = correction.value.trim();
        if value.is_empty() {
            return false;
        }

        let Some(idx) = self
            .review
            .iter()
            .position(|r| r.registration == correction.registration.trim())
        else {
            return false;
        };

        set_field(&mut self.review[idx], correction.field, value);

        if self.review[idx].needs_review() {
            return false;
        }
        let record = self.review.remove(idx);
        self.complete.push(record);
        true
    }
}

fn set_field(record: &mut ReconciledRecord, field: CorrectionField, value: &str) {
    match field {
        CorrectionField::Bed => record.bed = Some(value.to_string()),
        CorrectionField::PatientName => record.patient_name = Some(value.to_string()),
        CorrectionField::Sex => record.sex = Some(value.to_string()),
        CorrectionField::Age => record.age = Some(value.to_string()),
        CorrectionField::AdmissionDate => record.admission_date = Some(value.to_string()),
        CorrectionField::PrecautionTypes => {
            record.precautions = value
                .split(PRECAUTION_JOIN)
                .map(|p| p.trim().to_string())
                .filter(|p| !p.is_empty())
                .collect();
        }
    }
}
