//! CSV report of feedback entries.
//!
//! Columns: `Date,Name,Email,Phone,Type,Message`. Rows follow the order they
//! are given in; callers sort first. Quoting follows RFC 4180, so commas,
//! quotes and line breaks inside messages survive a round trip through a
//! spreadsheet. Dates are shown in the time zone the report was asked for
//! in, the same one `today` filters and the file name use.

use crate::error::{FolioError, Result};
use crate::model::FeedbackEntry;
use chrono::{NaiveDate, TimeZone};
use std::fmt;

pub const CSV_HEADER: [&str; 6] = ["Date", "Name", "Email", "Phone", "Type", "Message"];

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Serialize `entries` as CSV bytes, header first, with dates in `tz`.
pub fn to_csv<Tz>(entries: &[FeedbackEntry], tz: &Tz) -> Result<Vec<u8>>
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(CSV_HEADER)?;
    for entry in entries {
        let date = entry
            .timestamp
            .with_timezone(tz)
            .format(DATE_FORMAT)
            .to_string();
        let kind = display_contact_type(&entry.contact_type);
        writer.write_record([
            date.as_str(),
            entry.full_name.as_str(),
            entry.email.as_str(),
            entry.phone.as_option().unwrap_or(""),
            kind.as_str(),
            entry.comment.as_str(),
        ])?;
    }
    writer
        .into_inner()
        .map_err(|e| FolioError::Io(e.into_error()))
}

/// Suggested download name, e.g. `feedback_export_2024-06-15.csv`.
pub fn export_filename(day: NaiveDate) -> String {
    format!("feedback_export_{}.csv", day.format("%Y-%m-%d"))
}

/// `job_offer` → `Job Offer`.
pub fn display_contact_type(raw: &str) -> String {
    raw.replace('_', " ")
        .split_whitespace()
        .map(title_case)
        .collect::<Vec<_>>()
        .join(" ")
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
