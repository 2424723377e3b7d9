//! Reconciled record merging census and isolation sources

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::models::isolation::PRECAUTION_JOIN;

/// Placeholder rendered for fields whose value could not be determined
/// from either source
///
/// The placeholder exists only in exported rows; in-memory fields stay
/// `None` so real data equal to the literal can never collide with it.
pub const PENDING: &str = "Pending";

/// Merge of a census patient and (optionally) an isolation record sharing
/// a registration number
///
/// Records present in only one source are passed through with the missing
/// counterpart fields left unset; no record is ever dropped for being
/// one-sided.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconciledRecord {
    /// Bed identifier, census value preferred over the sheet's
    pub bed: Option<String>,
    /// Hospital registration number, the join key
    pub registration: String,
    /// Patient name, census value preferred over the sheet's
    pub patient_name: Option<String>,
    /// Sex; only the census carries it
    pub sex: Option<String>,
    /// Age; only the census carries it
    pub age: Option<String>,
    /// Admission date; only the census carries it
    pub admission_date: Option<String>,
    /// Resolved unit, used for report routing
    pub unit: String,
    /// Active precaution types, empty when none apply
    pub precautions: SmallVec<[String; 2]>,
    /// Supply item this record contributes to the planning report
    pub supply_item: String,
}

impl ReconciledRecord {
    /// Whether any field still awaits a human-supplied value
    #[must_use]
    pub fn needs_review(&self) -> bool {
        self.bed.is_none()
            || self.patient_name.is_none()
            || self.sex.is_none()
            || self.age.is_none()
            || self.admission_date.is_none()
    }

    /// Render the fixed 8-column report row
    ///
    /// Columns: bed, registration, patient name, sex, age, admission date,
    /// precaution type, supply item. Unknown fields render as [`PENDING`].
    #[must_use]
    pub fn to_report_row(&self) -> [String; 8] {
        let cell = |v: &Option<String>| v.clone().unwrap_or_else(|| PENDING.to_string());
        [
            cell(&self.bed),
            self.registration.clone(),
            cell(&self.patient_name),
            cell(&self.sex),
            cell(&self.age),
            cell(&self.admission_date),
            self.precautions.join(PRECAUTION_JOIN),
            self.supply_item.clone(),
        ]
    }
}
