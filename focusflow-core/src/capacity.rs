//! Per-day capacity ledger for one planning run.

use chrono::{Duration, NaiveDate, NaiveDateTime};

use crate::chunking::Chunk;
use crate::config::SchedulerConfig;
use crate::schedule::{BREAK_COLOR, BREAK_ID, BREAK_TITLE, BlockKind, ScheduleBlock};

#[derive(Debug, Clone)]
pub struct DailyCapacity {
    date: NaiveDate,
    cursor: NaiveDateTime,
    close: NaiveDateTime,
    long_task_threshold: i32,
    blocks: Vec<ScheduleBlock>,
    long_task_minutes: i32,
}

impl DailyCapacity {
    pub fn new(date: NaiveDate, cfg: &SchedulerConfig) -> Self {
        Self {
            date,
            cursor: date.and_time(cfg.day_start),
            close: date.and_time(cfg.day_end),
            long_task_threshold: cfg.long_task_threshold,
            blocks: Vec::new(),
            long_task_minutes: 0,
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn free_minutes(&self) -> i64 {
        (self.close - self.cursor).num_minutes()
    }

    pub fn has_time(&self, minutes: i32) -> bool {
        self.free_minutes() >= i64::from(minutes)
    }

    /// Minutes booked today by work on long tasks.
    pub fn long_task_minutes(&self) -> i32 {
        self.long_task_minutes
    }

    pub fn blocks(&self) -> &[ScheduleBlock] {
        &self.blocks
    }

    pub fn into_blocks(self) -> Vec<ScheduleBlock> {
        self.blocks
    }

    /// Append a block at the cursor and advance it. Callers check `has_time` first.
    pub fn add_block(&mut self, unit: &Chunk, minutes: i32, kind: BlockKind) {
        let block = match kind {
            BlockKind::Work => ScheduleBlock {
                start: self.cursor.time(),
                task_id: unit.id.clone(),
                task_title: unit.title.clone(),
                kind,
                duration: minutes,
                color: unit.priority.color().to_string(),
            },
            BlockKind::Break => ScheduleBlock {
                start: self.cursor.time(),
                task_id: BREAK_ID.to_string(),
                task_title: BREAK_TITLE.to_string(),
                kind,
                duration: minutes,
                color: BREAK_COLOR.to_string(),
            },
        };
        self.blocks.push(block);
        self.cursor += Duration::minutes(i64::from(minutes));

        if kind == BlockKind::Work && unit.parent_duration > self.long_task_threshold {
            self.long_task_minutes += minutes;
        }
    }
}
