//! Business-hours evaluation for the `open_now` filter.

use chrono::{DateTime, Datelike, FixedOffset, NaiveTime, Offset, Utc};
use storeloc_core::StoreRecord;

pub trait HoursEvaluator: Send + Sync {
    fn is_open_now(&self, store: &StoreRecord, now: DateTime<Utc>) -> bool;
}

/// Reads a store's `"HH:MM-HH:MM"` hours for the current weekday.
///
/// Times are interpreted in a single fixed UTC offset. Both ends of the range
/// are inclusive. A range whose close time is earlier than its open time runs
/// past midnight. `"closed"` and anything unparseable count as closed.
#[derive(Debug, Clone, Copy)]
pub struct WeeklyHoursEvaluator {
    offset: FixedOffset,
}

impl WeeklyHoursEvaluator {
    #[must_use]
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    #[must_use]
    pub fn utc() -> Self {
        Self::new(Utc.fix())
    }
}

impl Default for WeeklyHoursEvaluator {
    fn default() -> Self {
        Self::utc()
    }
}

impl HoursEvaluator for WeeklyHoursEvaluator {
    fn is_open_now(&self, store: &StoreRecord, now: DateTime<Utc>) -> bool {
        let local = now.with_timezone(&self.offset);
        let today = store.hours.for_weekday(local.weekday());
        parse_hours_range(today).is_some_and(|(open, close)| {
            let time = local.time();
            if open <= close {
                open <= time && time <= close
            } else {
                time >= open || time <= close
            }
        })
    }
}

/// Parse `"HH:MM-HH:MM"`; `None` for `"closed"` or malformed input.
fn parse_hours_range(raw: &str) -> Option<(NaiveTime, NaiveTime)> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("closed") {
        return None;
    }
    let (open, close) = raw.split_once('-')?;
    let open = NaiveTime::parse_from_str(open.trim(), "%H:%M").ok()?;
    let close = NaiveTime::parse_from_str(close.trim(), "%H:%M").ok()?;
    Some((open, close))
}
