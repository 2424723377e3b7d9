//! A Rust library for reconciling a hospital census export with the active
//! isolation precaution list, producing per-department supply-planning
//! record sets.

pub mod census;
pub mod config;
pub mod error;
pub mod isolation;
pub mod models;
pub mod reconcile;
pub mod report;
pub mod units;

// Re-export the most common types for easier use
// Core types
pub use config::{ConsolidationPolicy, ReconcilerConfig};
pub use error::{CensusError, Result};
pub use models::{IsolationRecord, PatientRecord, ReconciledRecord, PENDING};

// Pipeline stages
pub use census::extract;
pub use isolation::{normalize, IsolationCache, IsolationSet, IsolationSource, SheetSource};
pub use reconcile::{reconcile, Correction, CorrectionField, ReconciliationOutcome, ReviewSet};

// Report routing
pub use report::{active_isolation_records, group_buckets, unit_buckets};
pub use units::{classify, coordinating_group, CoordinatingGroup};
