use super::FeedbackStore;
use crate::error::{FolioError, Result};
use crate::model::{EntryId, FeedbackEntry, NewEntry, Phone};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS feedback (
    id           INTEGER PRIMARY KEY AUTOINCREMENT,
    full_name    TEXT NOT NULL,
    email        TEXT NOT NULL,
    phone        TEXT,
    contact_type TEXT NOT NULL,
    comment      TEXT NOT NULL,
    timestamp    TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
);
"#;

/// One SQLite row per entry. Ids and timestamps come from the database.
pub struct TableStore {
    location: String,
    // rusqlite connections are Send but not Sync
    conn: Mutex<Connection>,
}

impl TableStore {
    /// Open (or create) the database at `path` and apply the schema.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(FolioError::Io)?;
            }
        }
        let conn = Connection::open(path).map_err(|e| {
            FolioError::StoreUnavailable(format!("failed to open {}: {}", path.display(), e))
        })?;
        let store = Self::with_connection(conn, path.display().to_string())?;
        tracing::debug!(path = %path.display(), "Feedback table initialized");
        Ok(store)
    }

    /// A private database that lives as long as the store.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|e| {
            FolioError::StoreUnavailable(format!("failed to open in-memory db: {}", e))
        })?;
        Self::with_connection(conn, ":memory:".to_string())
    }

    pub fn path(&self) -> PathBuf {
        PathBuf::from(&self.location)
    }

    fn with_connection(conn: Connection, location: String) -> Result<Self> {
        conn.execute_batch(SCHEMA_SQL)?;
        Ok(Self {
            location,
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| FolioError::StoreUnavailable("table connection poisoned".to_string()))
    }
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| FolioError::StoreCorrupt(format!("bad timestamp {:?}: {}", raw, e)))
}

struct Row {
    id: i64,
    full_name: String,
    email: String,
    phone: Option<String>,
    contact_type: String,
    comment: String,
    timestamp: String,
}

impl Row {
    fn into_entry(self) -> Result<FeedbackEntry> {
        Ok(FeedbackEntry {
            id: EntryId::from(self.id),
            full_name: self.full_name,
            email: self.email,
            phone: Phone::from_option(self.phone.as_deref()),
            contact_type: self.contact_type,
            comment: self.comment,
            timestamp: parse_timestamp(&self.timestamp)?,
        })
    }
}

impl FeedbackStore for TableStore {
    fn create(&self, entry: NewEntry) -> Result<FeedbackEntry> {
        let conn = self.conn()?;
        let (seq, stamped): (i64, String) = conn.query_row(
            r#"
            INSERT INTO feedback (full_name, email, phone, contact_type, comment)
            VALUES (?1, ?2, ?3, ?4, ?5)
            RETURNING id, timestamp
            "#,
            params![
                entry.full_name(),
                entry.email(),
                entry.phone().as_option(),
                entry.contact_type(),
                entry.comment(),
            ],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;
        drop(conn);

        let timestamp = parse_timestamp(&stamped)?;
        tracing::debug!(id = seq, "Inserted feedback row");
        Ok(entry.into_entry(EntryId::from(seq), timestamp))
    }

    fn list(&self) -> Result<Vec<FeedbackEntry>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, full_name, email, phone, contact_type, comment, timestamp FROM feedback",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(Row {
                id: row.get(0)?,
                full_name: row.get(1)?,
                email: row.get(2)?,
                phone: row.get(3)?,
                contact_type: row.get(4)?,
                comment: row.get(5)?,
                timestamp: row.get(6)?,
            })
        })?;

        let mut entries = Vec::new();
        for row in rows {
            entries.push(row?.into_entry()?);
        }
        Ok(entries)
    }

    fn delete(&self, id: &EntryId) -> Result<bool> {
        let Some(seq) = id.as_seq() else {
            return Ok(false);
        };
        let conn = self.conn()?;
        let removed = conn.execute("DELETE FROM feedback WHERE id = ?1", params![seq])?;
        Ok(removed > 0)
    }

    fn location(&self) -> String {
        self.location.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Submission;
    use crate::validate::validate;

    fn new_entry(name: &str, phone: Option<&str>) -> NewEntry {
        validate(&Submission {
            full_name: name.into(),
            email: format!("{}@example.com", name.to_lowercase()),
            phone: phone.map(String::from),
            contact_type: "business".into(),
            comment: "Let's work together".into(),
        })
        .unwrap()
    }

    #[test]
    fn assigns_sequential_ids() {
        let store = TableStore::open_in_memory().unwrap();
        let a = store.create(new_entry("Ann", None)).unwrap();
        let b = store.create(new_entry("Bob", None)).unwrap();
        assert_eq!(a.id, EntryId::from(1));
        assert_eq!(b.id, EntryId::from(2));
    }

    #[test]
    fn create_then_list_round_trips_fields() {
        let store = TableStore::open_in_memory().unwrap();
        let stored = store.create(new_entry("Ann", Some("555-0100"))).unwrap();

        let listed = store.list().unwrap();
        assert_eq!(listed, vec![stored.clone()]);
        assert_eq!(stored.phone, Phone::Provided("555-0100".into()));
        assert_eq!(stored.contact_type, "business");
    }

    #[test]
    fn absent_phone_is_stored_as_null() {
        let store = TableStore::open_in_memory().unwrap();
        store.create(new_entry("Ann", None)).unwrap();

        let conn = store.conn().unwrap();
        let phone: Option<String> = conn
            .query_row("SELECT phone FROM feedback", [], |row| row.get(0))
            .unwrap();
        assert_eq!(phone, None);
    }

    #[test]
    fn database_stamps_creation_time() {
        let store = TableStore::open_in_memory().unwrap();
        let before = Utc::now() - chrono::Duration::seconds(1);
        let stored = store.create(new_entry("Ann", None)).unwrap();
        assert!(stored.timestamp >= before);
        assert!(stored.timestamp <= Utc::now() + chrono::Duration::seconds(1));
    }

    #[test]
    fn delete_reports_whether_a_row_went_away() {
        let store = TableStore::open_in_memory().unwrap();
        let a = store.create(new_entry("Ann", None)).unwrap();

        assert!(!store.delete(&EntryId::from(99)).unwrap());
        assert!(!store.delete(&EntryId::from("20240101000000000000x")).unwrap());
        assert!(store.delete(&a.id).unwrap());
        assert!(!store.delete(&a.id).unwrap());
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn lookalike_ids_do_not_delete() {
        let store = TableStore::open_in_memory().unwrap();
        let a = store.create(new_entry("Ann", None)).unwrap();
        assert_eq!(a.id, EntryId::from(1));

        assert!(!store.delete(&EntryId::from("+01")).unwrap());
        assert!(!store.delete(&EntryId::from("01")).unwrap());
        assert!(!store.delete(&EntryId::from("+1")).unwrap());
        assert_eq!(store.list().unwrap(), vec![a]);
    }

    #[test]
    fn ids_are_never_reused_after_delete() {
        let store = TableStore::open_in_memory().unwrap();
        let a = store.create(new_entry("Ann", None)).unwrap();
        store.delete(&a.id).unwrap();
        let b = store.create(new_entry("Bob", None)).unwrap();
        assert_eq!(b.id, EntryId::from(2));
    }

    #[test]
    fn bad_timestamp_row_is_corrupt() {
        let store = TableStore::open_in_memory().unwrap();
        store
            .conn()
            .unwrap()
            .execute(
                "INSERT INTO feedback (full_name, email, contact_type, comment, timestamp)
                 VALUES ('A', 'a@b.co', 'general', 'x', 'yesterday')",
                [],
            )
            .unwrap();
        assert!(matches!(store.list(), Err(FolioError::StoreCorrupt(_))));
        assert!(store.snapshot().is_empty());
    }

    #[test]
    fn reopening_keeps_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("feedback.db");
        {
            let store = TableStore::open(&path).unwrap();
            store.create(new_entry("Ann", None)).unwrap();
        }
        let store = TableStore::open(&path).unwrap();
        assert_eq!(store.list().unwrap().len(), 1);
    }
}
