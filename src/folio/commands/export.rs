use crate::commands::{list, CmdMessage, CmdResult, CsvExport};
use crate::error::Result;
use crate::export::{export_filename, to_csv};
use crate::query::FeedbackQuery;
use crate::store::FeedbackStore;
use chrono::{DateTime, TimeZone};
use std::fmt;

/// CSV report of the same entries the admin view would show.
pub fn run<S, Tz>(store: &S, query: &FeedbackQuery, now: &DateTime<Tz>) -> Result<CmdResult>
where
    S: FeedbackStore + ?Sized,
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let view = list::run(store, query, now)?;
    let entries = view.listed_entries;

    let export = CsvExport {
        filename: export_filename(now.date_naive()),
        rows: entries.len(),
        bytes: to_csv(&entries, &now.timezone())?,
    };

    let mut result = CmdResult::default();
    if entries.is_empty() {
        result.add_message(CmdMessage::info("No feedback matches, exporting header only."));
    } else {
        result.add_message(CmdMessage::success(format!(
            "Exported {} entries",
            entries.len()
        )));
    }
    Ok(result.with_export(export))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EntryId, FeedbackEntry, Phone};
    use crate::store::memory::InMemoryStore;
    use chrono::{Duration, Utc};

    fn seed(store: &InMemoryStore, id: i64, name: &str, age: Duration) {
        store.insert(FeedbackEntry {
            id: EntryId::from(id),
            full_name: name.into(),
            email: format!("{}@example.com", name.to_lowercase()),
            phone: Phone::NotProvided,
            contact_type: "general".into(),
            comment: "hello".into(),
            timestamp: Utc::now() - age,
        });
    }

    #[test]
    fn exports_filtered_entries_newest_first() {
        let store = InMemoryStore::new();
        seed(&store, 1, "Old", Duration::days(3));
        seed(&store, 2, "New", Duration::minutes(1));
        seed(&store, 3, "Ancient", Duration::days(40));

        let query = FeedbackQuery::from_raw(None, None, Some("week")).unwrap();
        let result = run(&store, &query, &Utc::now()).unwrap();
        let export = result.export.unwrap();

        assert_eq!(export.rows, 2);
        let text = String::from_utf8(export.bytes).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].contains(",New,"));
        assert!(lines[2].contains(",Old,"));
    }

    #[test]
    fn filename_uses_todays_date() {
        let store = InMemoryStore::new();
        let now = Utc::now();
        let result = run(&store, &FeedbackQuery::default(), &now).unwrap();
        let export = result.export.unwrap();
        assert_eq!(
            export.filename,
            format!("feedback_export_{}.csv", now.format("%Y-%m-%d"))
        );
        assert_eq!(export.rows, 0);
    }
}
