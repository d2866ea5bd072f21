use super::FeedbackStore;
use crate::error::{FolioError, Result};
use crate::model::{EntryId, FeedbackEntry, NewEntry};
use chrono::Utc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

#[derive(Default)]
struct State {
    entries: Vec<FeedbackEntry>,
    next_seq: i64,
}

/// In-memory store for testing.
///
/// Ids are sequential like the table backend. The `simulate_*` switches make
/// reads or writes fail so callers' error paths can be exercised.
#[derive(Default)]
pub struct InMemoryStore {
    state: Mutex<State>,
    simulate_read_error: AtomicBool,
    simulate_write_error: AtomicBool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an already-stored entry, keeping its id and timestamp.
    pub fn insert(&self, entry: FeedbackEntry) {
        if let Ok(mut state) = self.state.lock() {
            state.entries.push(entry);
        }
    }

    pub fn set_simulate_read_error(&self, simulate: bool) {
        self.simulate_read_error.store(simulate, Ordering::SeqCst);
    }

    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.simulate_write_error.store(simulate, Ordering::SeqCst);
    }

    fn state(&self) -> Result<std::sync::MutexGuard<'_, State>> {
        self.state
            .lock()
            .map_err(|_| FolioError::StoreUnavailable("memory store poisoned".to_string()))
    }

    fn check_write(&self) -> Result<()> {
        if self.simulate_write_error.load(Ordering::SeqCst) {
            return Err(FolioError::StoreUnavailable("Simulated write error".to_string()));
        }
        Ok(())
    }
}

impl FeedbackStore for InMemoryStore {
    fn create(&self, entry: NewEntry) -> Result<FeedbackEntry> {
        self.check_write()?;
        let mut state = self.state()?;
        state.next_seq += 1;
        let stored = entry.into_entry(EntryId::from(state.next_seq), Utc::now());
        state.entries.push(stored.clone());
        Ok(stored)
    }

    fn list(&self) -> Result<Vec<FeedbackEntry>> {
        if self.simulate_read_error.load(Ordering::SeqCst) {
            return Err(FolioError::StoreCorrupt("Simulated read error".to_string()));
        }
        Ok(self.state()?.entries.clone())
    }

    fn delete(&self, id: &EntryId) -> Result<bool> {
        self.check_write()?;
        let mut state = self.state()?;
        let before = state.entries.len();
        state.entries.retain(|e| &e.id != id);
        Ok(state.entries.len() != before)
    }

    fn location(&self) -> String {
        "memory://feedback".to_string()
    }
}
