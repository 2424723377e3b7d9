//! Configuration for the reconciliation pipeline.

use std::time::Duration;

/// Policy for collapsing an isolation-sheet row group into one record
///
/// The sheet allows one patient to span several physical rows; when those
/// rows disagree on a column, this policy decides which value survives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsolidationPolicy {
    /// Take the first non-blank value per column across the group
    FirstNonBlank,
    /// Seed from the row with the fewest blanks, then fill remaining
    /// blanks with the first non-blank value per column
    MostComplete,
}

/// Configuration for the `Reconciler`
#[derive(Debug, Clone)]
pub struct ReconcilerConfig {
    /// Units whose patients receive a baseline precaution profile when the
    /// isolation sheet has no entry for them
    pub baseline_units: Vec<String>,
    /// Precaution label applied by the baseline profile
    pub baseline_precaution: String,
    /// Supply item every reconciled record contributes to planning
    pub supply_item: String,
    /// How multi-row sheet groups are collapsed
    pub consolidation: ConsolidationPolicy,
    /// Timeout for fetching the isolation sheet; expiry is treated
    /// identically to fetch failure
    pub fetch_timeout: Duration,
}

impl Default for ReconcilerConfig {
    fn default() -> Self {
        Self {
            baseline_units: vec![
                "UNIDAD CORONARIA".to_string(),
                "UCIA".to_string(),
                "TERAPIA POSQUIRURGICA".to_string(),
                "U.C.I.N.".to_string(),
                "U.T.I.P.".to_string(),
                "UNIDAD DE QUEMADOS".to_string(),
            ],
            baseline_precaution: "ESTANDAR".to_string(),     // profile for critical units
            supply_item: "KIT DE AISLAMIENTO".to_string(),   // constant domain value
            consolidation: ConsolidationPolicy::FirstNonBlank,
            fetch_timeout: Duration::from_secs(10),          // expiry == fetch failure
        }
    }
}

impl ReconcilerConfig {
    /// Create a new instance with default values
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}
