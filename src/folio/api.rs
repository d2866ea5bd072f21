//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the single
//! entry point for every client: the HTTP server and the CLI both go through
//! it, so both apply identical validation, filtering and ordering.
//!
//! The facade:
//! - **Dispatches** to the command functions
//! - **Supplies the clock** (`Local::now()`) that date-range filters and
//!   export filenames are computed against
//! - **Returns structured types**, never formatted text
//!
//! `FolioApi<S: FeedbackStore>` is generic over the backend:
//! - Production: `FolioApi<Box<dyn FeedbackStore>>`, chosen from config
//! - Testing: `FolioApi<InMemoryStore>`

use crate::commands::{self, CmdResult};
use crate::error::Result;
use crate::model::{EntryId, FeedbackEntry, Submission};
use crate::query::FeedbackQuery;
use crate::store::FeedbackStore;
use chrono::Local;
use serde::Serialize;

/// What the admin page and the JSON listing are built from.
#[derive(Debug, Clone, Serialize)]
pub struct FeedbackView {
    pub entries: Vec<FeedbackEntry>,
    pub count: usize,
    pub contact_types: Vec<String>,
    pub filters: FeedbackQuery,
}

pub struct FolioApi<S: FeedbackStore> {
    store: S,
}

impl<S: FeedbackStore> FolioApi<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn submit(&self, submission: &Submission) -> Result<CmdResult> {
        commands::submit::run(&self.store, submission)
    }

    pub fn list(&self, query: &FeedbackQuery) -> Result<CmdResult> {
        commands::list::run(&self.store, query, &Local::now())
    }

    /// Filtered entries, newest first, with the data an admin page needs.
    pub fn feedback_view(&self, query: &FeedbackQuery) -> Result<FeedbackView> {
        let result = self.list(query)?;
        Ok(FeedbackView {
            count: result.listed_entries.len(),
            entries: result.listed_entries,
            contact_types: result.contact_types,
            filters: query.clone(),
        })
    }

    pub fn delete(&self, ids: &[EntryId]) -> Result<CmdResult> {
        commands::delete::run(&self.store, ids)
    }

    pub fn export_csv(&self, query: &FeedbackQuery) -> Result<CmdResult> {
        commands::export::run(&self.store, query, &Local::now())
    }
}
