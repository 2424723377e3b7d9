//! Isolation record consolidated from the precaution sheet

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Separator used when rendering the precaution set as a single cell
pub const PRECAUTION_JOIN: &str = " / ";

/// One logical patient from the isolation sheet
///
/// Corresponds 1:1 to a (bed, name) pair after continuation rows have been
/// consolidated. A new generation of records is built on every refresh of
/// the sheet; nothing accumulates across fetches.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IsolationRecord {
    /// Bed identifier as recorded in the sheet; may be stale
    pub bed: String,
    /// Hospital registration number, the join key across sources
    pub registration: String,
    /// Patient name as recorded in the sheet
    pub name: String,
    /// Deduplicated precaution types in first-seen order
    ///
    /// Most patients carry one or two precautions, a continuation row per
    /// extra type.
    pub precaution_types: SmallVec<[String; 2]>,
    /// End date of the isolation; any non-blank value marks it closed
    pub end_date: Option<String>,
}

impl IsolationRecord {
    /// Whether the isolation is still active
    ///
    /// The canonical active predicate is the absence of an end date, not a
    /// separate status flag.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.end_date.is_none()
    }

    /// Render the precaution set as a single display cell
    #[must_use]
    pub fn joined_precautions(&self) -> String {
        self.precaution_types.join(PRECAUTION_JOIN)
    }
}
