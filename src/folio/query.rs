//! Filtering and ordering for the admin views.
//!
//! A [`FeedbackQuery`] combines up to three criteria, all of which must hold:
//!
//! - `search`: case-insensitive substring of the name, email or comment
//! - `contact_type`: exact match
//! - `date_range`: `today` (same calendar day as now), `week` (last 7 days)
//!   or `month` (last 30 days)
//!
//! Blank criteria are treated as absent, since HTML forms submit `""` for
//! untouched inputs.

use crate::error::{FolioError, Result};
use crate::model::FeedbackEntry;
use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateRange {
    Today,
    Week,
    Month,
}

impl DateRange {
    /// Whether `timestamp` falls in this range, judged from `now`.
    ///
    /// `today` compares calendar days in `now`'s time zone.
    pub fn contains<Tz: TimeZone>(&self, timestamp: DateTime<Utc>, now: &DateTime<Tz>) -> bool {
        match self {
            DateRange::Today => {
                timestamp.with_timezone(&now.timezone()).date_naive() == now.date_naive()
            }
            DateRange::Week => timestamp >= now.with_timezone(&Utc) - Duration::days(7),
            DateRange::Month => timestamp >= now.with_timezone(&Utc) - Duration::days(30),
        }
    }
}

impl FromStr for DateRange {
    type Err = FolioError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "today" => Ok(DateRange::Today),
            "week" => Ok(DateRange::Week),
            "month" => Ok(DateRange::Month),
            other => Err(FolioError::InvalidQuery(format!(
                "unknown date range '{}' (expected today, week or month)",
                other
            ))),
        }
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DateRange::Today => "today",
            DateRange::Week => "week",
            DateRange::Month => "month",
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FeedbackQuery {
    pub search: Option<String>,
    pub contact_type: Option<String>,
    pub date_range: Option<DateRange>,
}

impl FeedbackQuery {
    /// Build a query from raw request values, dropping blank ones.
    pub fn from_raw(
        search: Option<&str>,
        contact_type: Option<&str>,
        date_range: Option<&str>,
    ) -> Result<Self> {
        let date_range = match non_blank(date_range) {
            Some(raw) => Some(raw.parse()?),
            None => None,
        };
        Ok(Self {
            search: non_blank(search).map(str::to_string),
            contact_type: non_blank(contact_type).map(str::to_string),
            date_range,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.search.is_none() && self.contact_type.is_none() && self.date_range.is_none()
    }

    pub fn matches<Tz: TimeZone>(&self, entry: &FeedbackEntry, now: &DateTime<Tz>) -> bool {
        if let Some(term) = &self.search {
            let term = term.to_lowercase();
            let hit = [&entry.full_name, &entry.email, &entry.comment]
                .iter()
                .any(|field| field.to_lowercase().contains(&term));
            if !hit {
                return false;
            }
        }
        if let Some(kind) = &self.contact_type {
            if &entry.contact_type != kind {
                return false;
            }
        }
        if let Some(range) = &self.date_range {
            if !range.contains(entry.timestamp, now) {
                return false;
            }
        }
        true
    }
}

fn non_blank(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|s| !s.is_empty())
}

/// Keep the entries matching `query`, preserving their order.
pub fn filter_entries<Tz: TimeZone>(
    entries: Vec<FeedbackEntry>,
    query: &FeedbackQuery,
    now: &DateTime<Tz>,
) -> Vec<FeedbackEntry> {
    if query.is_empty() {
        return entries;
    }
    entries
        .into_iter()
        .filter(|entry| query.matches(entry, now))
        .collect()
}

/// Most recent first. Stable, so equal timestamps keep their input order.
pub fn sort_newest_first(entries: &mut [FeedbackEntry]) {
    entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
}

/// Distinct contact types, sorted, for the admin filter choices.
pub fn contact_types(entries: &[FeedbackEntry]) -> Vec<String> {
    entries
        .iter()
        .map(|e| e.contact_type.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
