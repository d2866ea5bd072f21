//! # Storage Layer
//!
//! Every backend implements [`FeedbackStore`]: create, list, delete. There is
//! no update; entries are immutable once stored.
//!
//! ## Backends
//!
//! - [`document::DocumentStore`]: the whole collection lives in one JSON
//!   file. Each mutation loads the file, changes it and writes it back. All
//!   mutations of one store instance run inside a single lock, otherwise two
//!   overlapping creates would both load the old collection and the second
//!   write would drop the first entry.
//! - [`table::TableStore`]: one SQLite row per entry. The database assigns
//!   the integer id and the creation timestamp; each create/delete is one
//!   statement, so SQLite serializes concurrent writers for us.
//! - [`memory::InMemoryStore`]: for testing logic without I/O, with switches
//!   to simulate failing reads and writes.
//!
//! The backend is picked once, at construction ([`open_store`]), and the
//! resulting store is handed explicitly to whoever serves requests.
//!
//! ## Failure semantics
//!
//! `list` reports failures like any other call. Admin read paths go through
//! [`FeedbackStore::snapshot`] instead, which logs the failure and answers
//! with an empty collection: "no feedback yet" beats a broken admin page.
//! Writes never degrade; a failed `create` leaves the store as it was.
//!
//! ## Storage Layout
//!
//! ```text
//! data/
//! ├── feedback.json   # document backend: JSON array of entries
//! └── feedback.db     # table backend: SQLite, table `feedback`
//! ```

use crate::config::FolioConfig;
use crate::error::{FolioError, Result};
use crate::model::{EntryId, FeedbackEntry, NewEntry};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub mod document;
pub mod memory;
pub mod table;

/// Abstract interface for feedback storage.
///
/// Implementations take `&self` and synchronize internally, so one
/// instance can be shared across request handlers.
pub trait FeedbackStore: Send + Sync {
    /// Persist a validated entry. The entry is durable when this returns.
    fn create(&self, entry: NewEntry) -> Result<FeedbackEntry>;

    /// All stored entries, in no particular order.
    fn list(&self) -> Result<Vec<FeedbackEntry>>;

    /// Remove the entry with `id`. Returns false when there was none.
    fn delete(&self, id: &EntryId) -> Result<bool>;

    /// Where the data lives, for diagnostics.
    fn location(&self) -> String;

    /// `list`, degraded: failures are logged and read as an empty store.
    fn snapshot(&self) -> Vec<FeedbackEntry> {
        match self.list() {
            Ok(entries) => entries,
            Err(err) => {
                tracing::warn!(
                    store = %self.location(),
                    error = %err,
                    "Could not load feedback, showing an empty list"
                );
                Vec::new()
            }
        }
    }
}

impl<S: FeedbackStore + ?Sized> FeedbackStore for Box<S> {
    fn create(&self, entry: NewEntry) -> Result<FeedbackEntry> {
        (**self).create(entry)
    }

    fn list(&self) -> Result<Vec<FeedbackEntry>> {
        (**self).list()
    }

    fn delete(&self, id: &EntryId) -> Result<bool> {
        (**self).delete(id)
    }

    fn location(&self) -> String {
        (**self).location()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    Document,
    Table,
}

impl FromStr for Backend {
    type Err = FolioError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "document" | "json" => Ok(Backend::Document),
            "table" | "sqlite" => Ok(Backend::Table),
            other => Err(FolioError::Config(format!(
                "unknown backend '{}' (expected 'document' or 'table')",
                other
            ))),
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Backend::Document => f.write_str("document"),
            Backend::Table => f.write_str("table"),
        }
    }
}

/// Open the backend named by `config`, creating its medium if absent.
pub fn open_store(config: &FolioConfig) -> Result<Box<dyn FeedbackStore>> {
    let store: Box<dyn FeedbackStore> = match config.backend()? {
        Backend::Document => Box::new(document::DocumentStore::open(&config.document_path)?),
        Backend::Table => Box::new(table::TableStore::open(&config.table_path)?),
    };
    tracing::debug!(store = %store.location(), "Feedback store ready");
    Ok(store)
}
