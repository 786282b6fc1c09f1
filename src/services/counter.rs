use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CounterError {
    #[error("failed to determine data directory")]
    NoDataDir,
    #[error("counter store io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse counter store: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Default, Serialize, Deserialize, PartialEq)]
struct CounterState {
    report_counter: u64,
    /// Submission totals keyed by stable numeric user id, not display name.
    #[serde(default)]
    submissions: BTreeMap<u64, u64>,
}

/// File-backed counters for report numbering and per-user submission totals.
///
/// Every mutation re-reads the store, applies the increment, and writes the
/// result via a temp file and rename, all under one lock. Concurrent
/// submissions within the process serialize on the lock; a crash mid-write
/// leaves the previous store intact.
pub struct ReportCounter {
    store_path: PathBuf,
    lock: Mutex<()>,
}

impl ReportCounter {
    /// Create a counter rooted at the platform data directory.
    pub fn new() -> Result<Self, CounterError> {
        let data_dir = dirs::data_dir()
            .ok_or(CounterError::NoDataDir)?
            .join("mission-report");

        fs::create_dir_all(&data_dir)?;
        Ok(Self::with_path(data_dir.join("counters.json")))
    }

    /// Create a counter backed by an explicit store file.
    pub fn with_path(store_path: PathBuf) -> Self {
        Self {
            store_path,
            lock: Mutex::new(()),
        }
    }

    /// Allocate the next report number.
    pub fn next_report_number(&self) -> Result<u64, CounterError> {
        let _guard = self.lock.lock();

        let mut state = self.read_state()?;
        state.report_counter += 1;
        self.write_state(&state)?;

        Ok(state.report_counter)
    }

    /// Record one submission for the user and return their new total.
    pub fn record_submission(&self, user_id: u64) -> Result<u64, CounterError> {
        let _guard = self.lock.lock();

        let mut state = self.read_state()?;
        let total = state.submissions.entry(user_id).or_insert(0);
        *total += 1;
        let total = *total;
        self.write_state(&state)?;

        Ok(total)
    }

    /// Current submission total for the user, zero if never seen.
    pub fn submission_count(&self, user_id: u64) -> Result<u64, CounterError> {
        let _guard = self.lock.lock();
        let state = self.read_state()?;
        Ok(state.submissions.get(&user_id).copied().unwrap_or(0))
    }

    pub fn store_path(&self) -> &Path {
        &self.store_path
    }

    fn read_state(&self) -> Result<CounterState, CounterError> {
        if !self.store_path.exists() {
            return Ok(CounterState::default());
        }

        let content = fs::read_to_string(&self.store_path)?;
        let state = serde_json::from_str(&content)?;
        Ok(state)
    }

    fn write_state(&self, state: &CounterState) -> Result<(), CounterError> {
        if let Some(parent) = self.store_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(state)?;
        let tmp_path = self.store_path.with_extension("json.tmp");
        fs::write(&tmp_path, json)?;
        fs::rename(&tmp_path, &self.store_path)?;
        Ok(())
    }
}
