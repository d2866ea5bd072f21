use super::FeedbackStore;
use crate::error::{FolioError, Result};
use crate::identity::ClockIds;
use crate::model::{EntryId, FeedbackEntry, NewEntry};
use chrono::Utc;
use std::collections::HashSet;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use uuid::Uuid;

/// All entries in one JSON array, rewritten in full on every mutation.
pub struct DocumentStore {
    path: PathBuf,
    /// Held for the whole load-modify-write of every mutation.
    write_lock: Mutex<ClockIds>,
}

impl DocumentStore {
    /// Open the store at `path`, creating an empty collection if the file
    /// does not exist yet.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let store = Self {
            path: path.as_ref().to_path_buf(),
            write_lock: Mutex::new(ClockIds::new()),
        };
        if !store.path.exists() {
            store.save(&[])?;
            tracing::debug!(path = %store.path.display(), "Created empty feedback document");
        }
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock(&self) -> Result<MutexGuard<'_, ClockIds>> {
        self.write_lock
            .lock()
            .map_err(|_| FolioError::StoreUnavailable("document lock poisoned".to_string()))
    }

    fn load(&self) -> Result<Vec<FeedbackEntry>> {
        let content = fs::read_to_string(&self.path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => {
                FolioError::StoreUnavailable(format!("{} does not exist", self.path.display()))
            }
            _ => FolioError::StoreUnavailable(format!("{}: {}", self.path.display(), e)),
        })?;
        serde_json::from_str(&content)
            .map_err(|e| FolioError::StoreCorrupt(format!("{}: {}", self.path.display(), e)))
    }

    fn save(&self, entries: &[FeedbackEntry]) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        if !dir.exists() {
            fs::create_dir_all(&dir).map_err(FolioError::Io)?;
        }

        let content = serde_json::to_string_pretty(entries).map_err(FolioError::Serialization)?;

        // Atomic write: readers see the old or the new collection, never half
        let tmp_file = dir.join(format!(".feedback-{}.tmp", Uuid::new_v4()));
        if let Err(e) = fs::write(&tmp_file, content) {
            let _ = fs::remove_file(&tmp_file);
            return Err(FolioError::Io(e));
        }
        if let Err(e) = fs::rename(&tmp_file, &self.path) {
            let _ = fs::remove_file(&tmp_file);
            return Err(FolioError::Io(e));
        }
        Ok(())
    }
}

impl FeedbackStore for DocumentStore {
    fn create(&self, entry: NewEntry) -> Result<FeedbackEntry> {
        let mut ids = self.lock()?;
        let mut entries = self.load()?;

        let taken: HashSet<&str> = entries.iter().map(|e| e.id.as_str()).collect();
        let (id, timestamp) = ids.next(Utc::now(), &taken);
        drop(taken);

        let stored = entry.into_entry(id, timestamp);
        entries.push(stored.clone());
        self.save(&entries)?;

        tracing::debug!(id = %stored.id, total = entries.len(), "Appended feedback entry");
        Ok(stored)
    }

    fn list(&self) -> Result<Vec<FeedbackEntry>> {
        // Writers replace the file by rename, so an unlocked read is consistent
        self.load()
    }

    fn delete(&self, id: &EntryId) -> Result<bool> {
        let _guard = self.lock()?;
        let mut entries = self.load()?;
        let before = entries.len();
        entries.retain(|e| &e.id != id);
        if entries.len() == before {
            return Ok(false);
        }
        self.save(&entries)?;
        Ok(true)
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}
