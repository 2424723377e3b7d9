//! Isolation sheet retrieval and caching
//!
//! The sheet is an external network resource published as CSV at a fixed
//! address. A fetch failure must not abort the census-side computation: it
//! degrades the isolation side to an empty set carrying a `degraded` flag,
//! so callers can tell "no data available" apart from "no active
//! isolations". A missing-column failure on a successfully fetched sheet
//! is schema drift and propagates as a blocking error instead.

use std::time::Duration;

use chrono::{DateTime, Utc};
use log::warn;

use crate::config::ConsolidationPolicy;
use crate::error::{CensusError, Result};
use crate::isolation;
use crate::models::IsolationRecord;

/// One generation of active isolation records
#[derive(Debug, Clone, Default)]
pub struct IsolationSet {
    /// Consolidated active records; empty when none are active or when
    /// the fetch degraded
    pub records: Vec<IsolationRecord>,
    /// True when the set is empty because the source was unreachable or
    /// undecodable, not because the sheet held no active isolations
    pub degraded: bool,
}

/// Provider of raw isolation sheet rows
pub trait SheetSource {
    /// Retrieve the sheet as raw rows
    fn fetch_rows(&self) -> Result<Vec<Vec<String>>>;

    /// Fetch and normalize the active isolation set
    ///
    /// Network and decode failures degrade to an empty set with a
    /// warning; a located-but-incomplete header propagates as
    /// [`CensusError::MissingColumns`].
    fn load_active(&self, policy: ConsolidationPolicy) -> Result<IsolationSet> {
        match self.fetch_rows() {
            Ok(rows) => {
                let records = isolation::normalize(&rows, policy)?;
                Ok(IsolationSet {
                    records,
                    degraded: false,
                })
            }
            Err(err @ (CensusError::Fetch(_) | CensusError::Csv(_) | CensusError::Io(_))) => {
                warn!("isolation source unavailable, continuing without isolation data: {err}");
                Ok(IsolationSet {
                    records: Vec::new(),
                    degraded: true,
                })
            }
            Err(err) => Err(err),
        }
    }
}

/// Fetches the published isolation sheet over HTTP
#[derive(Debug)]
pub struct IsolationSource {
    url: String,
    client: reqwest::blocking::Client,
}

impl IsolationSource {
    /// Build a source for the given retrieval address
    ///
    /// The timeout applies to the whole request; expiry is treated
    /// identically to fetch failure.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;
        Ok(Self {
            url: url.into(),
            client,
        })
    }
}

impl SheetSource for IsolationSource {
    fn fetch_rows(&self) -> Result<Vec<Vec<String>>> {
        let body = self
            .client
            .get(&self.url)
            .send()?
            .error_for_status()?
            .text()?;
        parse_csv_rows(&body)
    }
}

/// Decode a CSV body into raw rows, tolerating ragged row lengths
pub fn parse_csv_rows(body: &str) -> Result<Vec<Vec<String>>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(body.as_bytes());

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(ToString::to_string).collect());
    }
    Ok(rows)
}

/// Memoized isolation set with explicit invalidation
///
/// Repeated reads within a session serve the cached generation; a
/// user-triggered invalidation forces a re-fetch on the next read, and the
/// previous generation is discarded entirely.
#[derive(Debug)]
pub struct IsolationCache<S = IsolationSource> {
    source: S,
    policy: ConsolidationPolicy,
    cached: Option<(IsolationSet, DateTime<Utc>)>,
}

impl<S: SheetSource> IsolationCache<S> {
    /// Wrap a source in a cache
    #[must_use]
    pub fn new(source: S, policy: ConsolidationPolicy) -> Self {
        Self {
            source,
            policy,
            cached: None,
        }
    }

    /// Current generation, fetching if none is cached
    pub fn get(&mut self) -> Result<&IsolationSet> {
        let entry = match self.cached.take() {
            Some(entry) => entry,
            None => (self.source.load_active(self.policy)?, Utc::now()),
        };
        let entry = self.cached.insert(entry);
        Ok(&entry.0)
    }

    /// Drop the cached generation; the next read re-fetches
    pub fn invalidate(&mut self) {
        self.cached = None;
    }

    /// When the cached generation was fetched, if any
    #[must_use]
    pub fn fetched_at(&self) -> Option<DateTime<Utc>> {
        self.cached.as_ref().map(|(_, at)| *at)
    }
}
