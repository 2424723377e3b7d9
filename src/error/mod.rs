//! Error handling for the census reconciliation pipeline.

use std::io;

/// Specialized error type for census and isolation processing
#[derive(Debug, thiserror::Error)]
pub enum CensusError {
    /// Error opening or reading an input file
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The census document contained no table at all
    #[error("no table found in census document")]
    NoTableFound,

    /// The isolation sheet header did not contain the required columns
    #[error("isolation sheet columns not found: expected {expected:?}, found {found:?}")]
    MissingColumns {
        /// Column names the sheet is required to carry
        expected: Vec<String>,
        /// Header names actually present in the scanned window
        found: Vec<String>,
    },

    /// Error fetching the isolation sheet over HTTP
    #[error("isolation sheet fetch failed: {0}")]
    Fetch(#[from] reqwest::Error),

    /// Error decoding the isolation sheet as CSV
    #[error("isolation sheet decode failed: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type for census reconciliation operations
pub type Result<T> = std::result::Result<T, CensusError>;
