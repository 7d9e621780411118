//! Task proposals and the quick-add text parser.
//!
//! The parser is keyword based and deterministic. It never fails: anything it
//! cannot read falls back to a default (Medium, 60 minutes, due in a week).
//! Priority, tag and duration keywords match anywhere in the text, so "follow up"
//! reads as Low. Date words must stand alone.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use crate::error::ProposalError;
use crate::task::Priority;
use crate::time::{default_deadline, format_date, parse_deadline};

/// Structured input for creating a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskProposal {
    pub title: String,
    pub priority: Priority,
    /// Minutes.
    pub duration: i32,
    #[serde(default)]
    pub deadline: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl TaskProposal {
    pub fn validate(&self) -> Result<(), ProposalError> {
        if self.title.trim().is_empty() {
            return Err(ProposalError::EmptyTitle);
        }
        if self.duration <= 0 {
            return Err(ProposalError::NonPositiveDuration(self.duration));
        }
        if let Some(d) = &self.deadline {
            parse_deadline(d).map_err(|_| ProposalError::InvalidDeadline(d.clone()))?;
        }
        Ok(())
    }
}

static ISO_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d{4}-\d{2}-\d{2})\b").expect("valid regex"));
static IN_DAYS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bin (\d{1,3}) days?\b").expect("valid regex"));
static EXPLICIT_DURATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(\d{1,4})\s*(h|hr|hrs|hours?|m|min|mins|minutes?)\b").expect("valid regex")
});

/// Turn free text into a proposal.
pub fn parse_text(text: &str, today: NaiveDate) -> TaskProposal {
    let lower = text.to_lowercase();

    TaskProposal {
        title: text.trim().to_string(),
        priority: parse_priority(&lower),
        duration: parse_duration(&lower),
        deadline: Some(format_date(parse_due_date(&lower, today))),
        tags: parse_tags(&lower),
    }
}

fn contains_word(haystack: &str, word: &str) -> bool {
    haystack
        .split(|c: char| !c.is_alphanumeric())
        .any(|w| w == word)
}

fn parse_priority(lower: &str) -> Priority {
    if ["urgent", "asap", "critical"].iter().any(|w| lower.contains(w)) {
        Priority::High
    } else if ["low", "whenever"].iter().any(|w| lower.contains(w)) {
        Priority::Low
    } else {
        Priority::Medium
    }
}

fn parse_tags(lower: &str) -> Vec<String> {
    let mut tags = Vec::new();
    if lower.contains("report") || lower.contains("write") {
        tags.push("Writing".to_string());
    }
    if lower.contains("code") || lower.contains("api") {
        tags.push("Dev".to_string());
    }
    if lower.contains("meeting") {
        tags.push("Meeting".to_string());
    }
    tags
}

fn parse_duration(lower: &str) -> i32 {
    if let Some(caps) = EXPLICIT_DURATION.captures(lower) {
        let amount: i32 = caps[1].parse().unwrap_or(0);
        let minutes = if caps[2].starts_with('h') { amount * 60 } else { amount };
        if minutes > 0 {
            return minutes;
        }
    }

    let mut duration = 60;
    if lower.contains("quick") {
        duration = 30;
    }
    if lower.contains("long") {
        duration = 120;
    }
    duration
}

fn parse_due_date(lower: &str, today: NaiveDate) -> NaiveDate {
    if let Some(d) = ISO_DATE
        .captures(lower)
        .and_then(|c| parse_deadline(&c[1]).ok())
    {
        return d;
    }
    if let Some(days) = IN_DAYS
        .captures(lower)
        .and_then(|c| c[1].parse::<i64>().ok())
    {
        return today + Duration::days(days);
    }
    if contains_word(lower, "today") || contains_word(lower, "tonight") {
        return today;
    }
    if contains_word(lower, "tomorrow") {
        return today + Duration::days(1);
    }
    if lower.contains("next week") {
        return today + Duration::days(7);
    }
    if let Some(wd) = lower
        .split(|c: char| !c.is_alphanumeric())
        .find_map(weekday_from_word)
    {
        return next_weekday(today, wd);
    }
    default_deadline(today)
}

fn weekday_from_word(word: &str) -> Option<Weekday> {
    match word {
        "monday" => Some(Weekday::Mon),
        "tuesday" => Some(Weekday::Tue),
        "wednesday" => Some(Weekday::Wed),
        "thursday" => Some(Weekday::Thu),
        "friday" => Some(Weekday::Fri),
        "saturday" => Some(Weekday::Sat),
        "sunday" => Some(Weekday::Sun),
        _ => None,
    }
}

/// First `wd` strictly after `today`.
fn next_weekday(today: NaiveDate, wd: Weekday) -> NaiveDate {
    let from = today.weekday().num_days_from_monday() as i64;
    let to = wd.num_days_from_monday() as i64;
    let mut delta = (to - from).rem_euclid(7);
    if delta == 0 {
        delta = 7;
    }
    today + Duration::days(delta)
}
