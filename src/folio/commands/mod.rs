use crate::model::{EntryId, FeedbackEntry};

pub mod delete;
pub mod export;
pub mod list;
pub mod submit;

pub const THANK_YOU: &str = "Thank you for your message! We will get back to you soon.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }
}

/// A rendered CSV report ready to hand to a client.
#[derive(Debug, Clone)]
pub struct CsvExport {
    pub filename: String,
    pub rows: usize,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    /// Entries created by the command.
    pub affected_entries: Vec<FeedbackEntry>,
    /// Entries to show, already filtered and sorted.
    pub listed_entries: Vec<FeedbackEntry>,
    /// Every contact type present in the store, for filter choices.
    pub contact_types: Vec<String>,
    pub removed_ids: Vec<EntryId>,
    pub missing_ids: Vec<EntryId>,
    pub export: Option<CsvExport>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_entries(mut self, entries: Vec<FeedbackEntry>) -> Self {
        self.affected_entries = entries;
        self
    }

    pub fn with_listed_entries(mut self, entries: Vec<FeedbackEntry>) -> Self {
        self.listed_entries = entries;
        self
    }

    pub fn with_contact_types(mut self, types: Vec<String>) -> Self {
        self.contact_types = types;
        self
    }

    pub fn with_export(mut self, export: CsvExport) -> Self {
        self.export = Some(export);
        self
    }
}
