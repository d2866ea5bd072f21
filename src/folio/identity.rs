//! Clock-derived entry ids for the document store.
//!
//! Ids render the creation instant as `YYYYMMDDHHMMSSffffff` (UTC,
//! microseconds). The width is fixed, so string order equals time order.
//!
//! A bare clock reading is not unique: two submissions inside the same
//! microsecond, or a clock stepping backwards, would repeat an id. The
//! generator therefore remembers the last instant it issued and never
//! issues one at or before it. This only holds while every call goes
//! through the same generator, which is why [`crate::store::document`]
//! keeps it inside its write lock. Separate processes writing the same
//! file are not coordinated.

use crate::model::EntryId;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashSet;

const ID_FORMAT: &str = "%Y%m%d%H%M%S%6f";

#[derive(Debug, Default)]
pub struct ClockIds {
    last: Option<DateTime<Utc>>,
}

impl ClockIds {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue the next id for an entry created at `now`.
    ///
    /// Returns the id and the instant it encodes; the caller stamps the
    /// entry with that instant so id order and timestamp order agree.
    /// `taken` holds ids already in the collection, which covers ids issued
    /// by an earlier process that wrote the same file.
    pub fn next(&mut self, now: DateTime<Utc>, taken: &HashSet<&str>) -> (EntryId, DateTime<Utc>) {
        let mut instant = truncate_to_micros(now);
        if let Some(last) = self.last {
            if instant <= last {
                instant = last + Duration::microseconds(1);
            }
        }
        while taken.contains(render(instant).as_str()) {
            instant += Duration::microseconds(1);
        }
        self.last = Some(instant);
        (EntryId::new(render(instant)), instant)
    }
}

fn render(instant: DateTime<Utc>) -> String {
    instant.format(ID_FORMAT).to_string()
}

fn truncate_to_micros(instant: DateTime<Utc>) -> DateTime<Utc> {
    let extra_nanos = instant.timestamp_subsec_nanos() % 1_000;
    instant - Duration::nanoseconds(i64::from(extra_nanos))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(micros: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 17, 9, 30, 0).unwrap() + Duration::microseconds(micros.into())
    }

    #[test]
    fn renders_fixed_width_instant() {
        let mut ids = ClockIds::new();
        let (id, instant) = ids.next(at(42), &HashSet::new());
        assert_eq!(id.as_str(), "20240517093000000042");
        assert_eq!(instant, at(42));
    }

    #[test]
    fn same_instant_yields_distinct_increasing_ids() {
        let mut ids = ClockIds::new();
        let taken = HashSet::new();
        let (a, _) = ids.next(at(5), &taken);
        let (b, _) = ids.next(at(5), &taken);
        let (c, _) = ids.next(at(3), &taken);
        assert!(a < b && b < c);
        assert_eq!(b.as_str(), "20240517093000000006");
    }

    #[test]
    fn skips_ids_already_in_collection() {
        let mut ids = ClockIds::new();
        let taken: HashSet<&str> = ["20240517093000000010", "20240517093000000011"]
            .into_iter()
            .collect();
        let (id, _) = ids.next(at(10), &taken);
        assert_eq!(id.as_str(), "20240517093000000012");
    }

    #[test]
    fn drops_sub_microsecond_precision() {
        let mut ids = ClockIds::new();
        let now = at(1) + Duration::nanoseconds(999);
        let (_, instant) = ids.next(now, &HashSet::new());
        assert_eq!(instant, at(1));
    }
}
