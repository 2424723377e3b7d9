//! Domain models for the census reconciliation pipeline
//!
//! One fixed-shape record type per pipeline stage: census extraction,
//! isolation normalization, and the reconciled merge of the two. Fields
//! that can legitimately be unknown are `Option`s; the export layer is the
//! only place a placeholder string is rendered.

pub mod isolation;
pub mod patient;
pub mod reconciled;

// Re-export commonly used types
pub use isolation::IsolationRecord;
pub use patient::PatientRecord;
pub use reconciled::{ReconciledRecord, PENDING};
