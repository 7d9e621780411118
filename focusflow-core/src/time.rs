//! Date helpers: deadline parsing and the formats used on the wire.

use anyhow::Result;
use chrono::{Duration, NaiveDate, NaiveTime};

/// Days added to "today" when a task is created without a deadline.
pub const DEFAULT_DEADLINE_DAYS: i64 = 7;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a deadline like "2026-02-20".
pub fn parse_deadline(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
        .map_err(|e| anyhow::anyhow!("invalid deadline '{s}': {e}"))
}

pub fn format_date(d: NaiveDate) -> String {
    d.format(DATE_FORMAT).to_string()
}

pub fn default_deadline(today: NaiveDate) -> NaiveDate {
    today + Duration::days(DEFAULT_DEADLINE_DAYS)
}

/// Whole days from `today` until `deadline` (negative when overdue).
pub fn days_until(deadline: NaiveDate, today: NaiveDate) -> i64 {
    (deadline - today).num_days()
}

/// 12-hour clock label, e.g. "09:00 AM".
pub fn clock_label(t: NaiveTime) -> String {
    t.format("%I:%M %p").to_string()
}

/// Serde adapter for `HH:MM` times.
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%H:%M";

    pub fn serialize<S: Serializer>(t: &NaiveTime, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&t.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(d)?;
        NaiveTime::parse_from_str(&raw, FORMAT).map_err(serde::de::Error::custom)
    }
}
