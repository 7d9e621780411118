//! Schedule output types.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{Duration, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::time::{clock_label, hhmm};

pub const BREAK_ID: &str = "break";
pub const BREAK_TITLE: &str = "🧠 Brain Break";
pub const BREAK_COLOR: &str = "hsl(150, 40%, 90%)";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    Work,
    Break,
}

/// A placed interval on one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleBlock {
    #[serde(with = "hhmm")]
    pub start: NaiveTime,
    pub task_id: String,
    pub task_title: String,
    #[serde(rename = "type")]
    pub kind: BlockKind,
    /// Minutes.
    pub duration: i32,
    pub color: String,
}

impl ScheduleBlock {
    pub fn end(&self) -> NaiveTime {
        self.start + Duration::minutes(i64::from(self.duration))
    }

    /// "09:00 AM"-style start label.
    pub fn time_label(&self) -> String {
        clock_label(self.start)
    }
}

/// Result of one planning run.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WeeklySchedule {
    /// Only days with at least one block.
    pub schedule: BTreeMap<NaiveDate, Vec<ScheduleBlock>>,
    /// Titles of units that did not fit anywhere in the horizon.
    pub unscheduled: BTreeSet<String>,
}

impl WeeklySchedule {
    pub fn blocks_on(&self, day: NaiveDate) -> &[ScheduleBlock] {
        self.schedule.get(&day).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Work minutes placed for a task id or any of its chunks.
    pub fn work_minutes_for(&self, task_id: &str) -> i32 {
        let chunk_prefix = format!("{task_id}_chunk_");
        self.schedule
            .values()
            .flatten()
            .filter(|b| b.kind == BlockKind::Work)
            .filter(|b| b.task_id == task_id || b.task_id.starts_with(&chunk_prefix))
            .map(|b| b.duration)
            .sum()
    }

    pub fn total_work_minutes(&self) -> i32 {
        self.schedule
            .values()
            .flatten()
            .filter(|b| b.kind == BlockKind::Work)
            .map(|b| b.duration)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.schedule.is_empty() && self.unscheduled.is_empty()
    }
}
