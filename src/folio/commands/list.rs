use crate::commands::CmdResult;
use crate::error::Result;
use crate::query::{contact_types, filter_entries, sort_newest_first, FeedbackQuery};
use crate::store::FeedbackStore;
use chrono::{DateTime, TimeZone};

/// The admin view: every matching entry, newest first.
///
/// Reads through [`FeedbackStore::snapshot`], so a broken store shows up as
/// an empty list rather than an error.
pub fn run<S: FeedbackStore + ?Sized, Tz: TimeZone>(
    store: &S,
    query: &FeedbackQuery,
    now: &DateTime<Tz>,
) -> Result<CmdResult> {
    let entries = store.snapshot();
    let types = contact_types(&entries);

    let mut listed = filter_entries(entries, query, now);
    sort_newest_first(&mut listed);

    Ok(CmdResult::default()
        .with_listed_entries(listed)
        .with_contact_types(types))
}
