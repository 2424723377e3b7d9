//! Reconciliation of census and isolation records
//!
//! Joins the two sources on registration number with a deterministic
//! precedence policy: the census is refreshed same-day, so its bed and
//! identity values win; the isolation sheet owns the precaution types.
//! Patients present in only one source pass through with the counterpart
//! fields unset, and the result is partitioned into records that are
//! complete and records that still need human review.

pub mod review;

use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::{smallvec, SmallVec};

use crate::config::ReconcilerConfig;
use crate::models::{IsolationRecord, PatientRecord, ReconciledRecord};
use crate::units;

pub use review::{Correction, CorrectionField, ReviewSet};

/// Result of one reconciliation run
///
/// Invariant: the two subsets are disjoint, their union is the full
/// output, and membership in `review` is exactly the records whose
/// `needs_review()` holds.
#[derive(Debug, Clone, Default)]
pub struct ReconciliationOutcome {
    /// Records with every field resolved
    pub complete: Vec<ReconciledRecord>,
    /// Records awaiting human correction
    pub review: Vec<ReconciledRecord>,
}

impl ReconciliationOutcome {
    /// Total number of reconciled records across both subsets
    #[must_use]
    pub fn len(&self) -> usize {
        self.complete.len() + self.review.len()
    }

    /// Whether the run produced no records at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.complete.is_empty() && self.review.is_empty()
    }
}

/// Merge census patients with isolation records on registration number
#[must_use]
pub fn reconcile(
    patients: &[PatientRecord],
    isolations: &[IsolationRecord],
    config: &ReconcilerConfig,
) -> ReconciliationOutcome {
    let mut by_registration: FxHashMap<&str, &IsolationRecord> = FxHashMap::default();
    for isolation in isolations {
        // First entry wins on duplicate registrations within the sheet
        by_registration
            .entry(isolation.registration.trim())
            .or_insert(isolation);
    }

    let mut matched: FxHashSet<&str> = FxHashSet::default();
    let mut outcome = ReconciliationOutcome::default();

    for patient in patients {
        let key = patient.registration.trim();
        let isolation = by_registration.get(key).copied();
        if isolation.is_some() {
            matched.insert(key);
        }
        push(&mut outcome, merge(patient, isolation, config));
    }

    // Patients known only to the isolation sheet are surfaced, never
    // silently dropped
    for isolation in isolations {
        if matched.contains(isolation.registration.trim()) {
            continue;
        }
        push(&mut outcome, from_isolation_only(isolation, config));
    }

    outcome
}

fn push(outcome: &mut ReconciliationOutcome, record: ReconciledRecord) {
    if record.needs_review() {
        outcome.review.push(record);
    } else {
        outcome.complete.push(record);
    }
}

/// Merge one census patient with its isolation record, if any
fn merge(
    patient: &PatientRecord,
    isolation: Option<&IsolationRecord>,
    config: &ReconcilerConfig,
) -> ReconciledRecord {
    let precautions = match isolation {
        Some(iso) => iso.precaution_types.clone(),
        None => baseline_precautions(&patient.unit, config),
    };

    ReconciledRecord {
        bed: non_empty(&patient.bed).or_else(|| isolation.and_then(|i| non_empty(&i.bed))),
        registration: patient.registration.trim().to_string(),
        patient_name: non_empty(&patient.name)
            .or_else(|| isolation.and_then(|i| non_empty(&i.name))),
        sex: non_empty(&patient.sex),
        age: non_empty(&patient.age),
        admission_date: non_empty(&patient.admission_date),
        unit: patient.unit.clone(),
        precautions,
        supply_item: config.supply_item.clone(),
    }
}

/// Build the sentinel-filled counterpart for a patient absent from the
/// census extraction
fn from_isolation_only(isolation: &IsolationRecord, config: &ReconcilerConfig) -> ReconciledRecord {
    // The bed prefix is the only unit signal available on this side
    let unit = units::classify(&isolation.bed, "");

    ReconciledRecord {
        bed: non_empty(&isolation.bed),
        registration: isolation.registration.trim().to_string(),
        patient_name: non_empty(&isolation.name),
        sex: None,
        age: None,
        admission_date: None,
        unit,
        precautions: isolation.precaution_types.clone(),
        supply_item: config.supply_item.clone(),
    }
}

/// Baseline precaution profile for critical units with no isolation entry
fn baseline_precautions(unit: &str, config: &ReconcilerConfig) -> SmallVec<[String; 2]> {
    if config.baseline_units.iter().any(|u| u == unit) {
        smallvec![config.baseline_precaution.clone()]
    } else {
        SmallVec::new()
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
