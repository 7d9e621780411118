//! Chunking: turn pending tasks into schedulable units.
//!
//! Tasks due soon stay whole. Longer tasks with room before their deadline
//! are sliced into parts sized to finish a day early; each part is a fresh
//! value, the source task is never modified.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::SchedulerConfig;
use crate::error::ChunkError;
use crate::scoring::score_task;
use crate::task::{Priority, Task};
use crate::time::{days_until, parse_deadline};

/// One schedulable unit: a whole task or one slice of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    pub id: String,
    pub parent_id: String,
    pub title: String,
    pub priority: Priority,

    /// Minutes in this slice.
    pub duration: i32,
    /// Minutes still to place in the current run.
    pub remaining: i32,
    /// Duration of the whole parent task.
    pub parent_duration: i32,

    pub deadline: Option<NaiveDate>,
    pub score: f64,

    /// True for slices produced by splitting.
    pub is_virtual: bool,
}

impl Chunk {
    /// The whole task as a single unit.
    pub fn whole(task: &Task, today: NaiveDate) -> Self {
        Self {
            id: task.id.clone(),
            parent_id: task.id.clone(),
            title: task.title.clone(),
            priority: task.priority,
            duration: task.duration,
            remaining: task.duration,
            parent_duration: task.duration,
            deadline: task.deadline_date(),
            score: score_task(task, today),
            is_virtual: false,
        }
    }

    fn part(task: &Task, deadline: NaiveDate, index: usize, minutes: i32, score: f64) -> Self {
        Self {
            id: format!("{}_chunk_{}", task.id, index),
            parent_id: task.id.clone(),
            title: format!("{} (Part {})", task.title, index + 1),
            priority: task.priority,
            duration: minutes,
            remaining: minutes,
            parent_duration: task.duration,
            deadline: Some(deadline),
            score,
            is_virtual: true,
        }
    }

    /// Record `minutes` as placed.
    pub fn consume(&mut self, minutes: i32) {
        self.remaining -= minutes;
    }

    pub fn is_done(&self) -> bool {
        self.remaining <= 0
    }

    /// Whether work on this unit counts against the per-day long-task budget.
    pub fn is_long(&self, cfg: &SchedulerConfig) -> bool {
        self.parent_duration > cfg.long_task_threshold
    }
}

/// Largest slice size for a task due in `days_until_due` days.
pub fn chunk_cap(
    duration: i32,
    days_until_due: i64,
    cfg: &SchedulerConfig,
) -> Result<i32, ChunkError> {
    if duration <= cfg.split_threshold {
        return Ok(duration);
    }
    let days_available = (days_until_due - 1).max(1);
    let daily_effort = i64::from(duration)
        .checked_add(days_available - 1)
        .map(|n| n / days_available)
        .and_then(|n| i32::try_from(n).ok())
        .ok_or(ChunkError::Overflow(duration))?;
    Ok(daily_effort.max(cfg.min_chunk_cap))
}

/// Split one task. Errors mean "schedule it whole instead".
pub fn try_split(
    task: &Task,
    today: NaiveDate,
    cfg: &SchedulerConfig,
) -> Result<Vec<Chunk>, ChunkError> {
    let raw = task.deadline.as_deref().ok_or(ChunkError::MissingDeadline)?;
    let deadline = parse_deadline(raw).map_err(|_| ChunkError::InvalidDeadline(raw.to_string()))?;
    let days_until_due = days_until(deadline, today);

    if days_until_due <= cfg.no_split_window_days {
        return Ok(vec![Chunk::whole(task, today)]);
    }
    if task.duration <= 0 {
        return Err(ChunkError::NonPositiveDuration(task.duration));
    }

    let cap = chunk_cap(task.duration, days_until_due, cfg)?;
    let base = score_task(task, today);

    let mut chunks = Vec::new();
    let mut remaining = task.duration;
    while remaining > 0 {
        let minutes = remaining.min(cap);
        let index = chunks.len();
        let score = base - cfg.chunk_index_penalty * index as f64;
        chunks.push(Chunk::part(task, deadline, index, minutes, score));
        remaining -= minutes;
    }
    Ok(chunks)
}

/// Split one task, falling back to a single unsplit unit on any error.
pub fn split_task(task: &Task, today: NaiveDate, cfg: &SchedulerConfig) -> Vec<Chunk> {
    match try_split(task, today, cfg) {
        Ok(chunks) => {
            debug!(task_id = %task.id, chunks = chunks.len(), "chunked task");
            chunks
        }
        Err(e) => {
            warn!(
                task_id = %task.id,
                title = %task.title,
                error = %e,
                "could not spread task; scheduling it whole"
            );
            vec![Chunk::whole(task, today)]
        }
    }
}

/// Chunk every pending task in the snapshot, preserving snapshot order.
pub fn chunk_pending(tasks: &[Task], today: NaiveDate, cfg: &SchedulerConfig) -> Vec<Chunk> {
    tasks
        .iter()
        .filter(|t| t.is_pending())
        .flat_map(|t| split_task(t, today, cfg))
        .collect()
}
