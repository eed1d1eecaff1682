//! Append-only benchmark run history, keyed by tool tag.
//!
//! The store wraps the persisted document one-to-one: appends go to the end
//! of the per-tool run list and nothing is ever mutated or evicted. Mutation
//! takes `&mut self`, so a shared store is single-writer by construction and
//! readers always borrow a consistent snapshot.

use tracing::debug;

use crate::error::ValidationError;
use crate::schema::{BenchmarkData, BenchmarkRun};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BenchmarkStore {
    data: BenchmarkData,
}

impl BenchmarkStore {
    /// Creates an empty store for the given repository URL.
    pub fn new(repo_url: impl Into<String>) -> Self {
        Self {
            data: BenchmarkData {
                last_update: 0,
                repo_url: repo_url.into(),
                entries: Default::default(),
            },
        }
    }

    /// Wraps an already-parsed document. Loaded runs are taken as-is; only
    /// runs arriving through [`BenchmarkStore::append`] are validated.
    pub fn from_data(data: BenchmarkData) -> Self {
        Self { data }
    }

    pub fn data(&self) -> &BenchmarkData {
        &self.data
    }

    pub fn into_data(self) -> BenchmarkData {
        self.data
    }

    /// Adds one run to the end of the history for its tool.
    ///
    /// Duplicate commit ids are valid (CI re-runs the same commit); the run
    /// is rejected only when it carries no measurements or a non-positive
    /// timestamp, and a rejected run leaves the store untouched.
    pub fn append(&mut self, run: BenchmarkRun) -> Result<(), ValidationError> {
        if run.benches.is_empty() {
            return Err(ValidationError::EmptyMeasurements);
        }
        if run.date <= 0 {
            return Err(ValidationError::NonPositiveTimestamp(run.date));
        }

        debug!(
            tool = %run.tool,
            commit = %run.commit.id,
            date = run.date,
            benches = run.benches.len(),
            "appending run"
        );

        self.data.last_update = self.data.last_update.max(run.date);
        self.data
            .entries
            .entry(run.tool.clone())
            .or_default()
            .push(run);
        Ok(())
    }

    /// All runs recorded under `tool`, in append order (not necessarily
    /// timestamp order). Unknown tools yield an empty slice, not an error.
    pub fn history(&self, tool: &str) -> &[BenchmarkRun] {
        self.data
            .entries
            .get(tool)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Highest run timestamp seen so far; 0 for a store with no runs.
    pub fn last_update(&self) -> i64 {
        self.data.last_update
    }

    pub fn repo_url(&self) -> &str {
        &self.data.repo_url
    }

    pub fn set_repo_url(&mut self, repo_url: impl Into<String>) {
        self.data.repo_url = repo_url.into();
    }

    /// Tool tags with at least one recorded run, in sorted order.
    pub fn tools(&self) -> impl Iterator<Item = &str> {
        self.data.entries.keys().map(String::as_str)
    }

    /// Total number of runs across all tools.
    pub fn run_count(&self) -> usize {
        self.data.entries.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.data.entries.values().all(Vec::is_empty)
    }
}
