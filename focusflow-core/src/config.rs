//! Engine tuning knobs. Defaults are the production constants.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::time::hhmm;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Days planned, today included.
    pub horizon_days: u32,

    #[serde(with = "hhmm")]
    pub day_start: NaiveTime,
    #[serde(with = "hhmm")]
    pub day_end: NaiveTime,

    /// Longest single work block, minutes.
    pub max_work_block: i32,
    pub break_minutes: i32,

    /// Per-day cap on minutes given to split chunks of long tasks.
    pub long_task_daily_budget: i32,
    /// Tasks longer than this (minutes) count against the daily budget.
    pub long_task_threshold: i32,

    /// Tasks due within this many days are never split.
    pub no_split_window_days: i64,
    /// Tasks longer than this (minutes) are spread over the days before the deadline.
    pub split_threshold: i32,
    pub min_chunk_cap: i32,

    pub chunk_index_penalty: f64,
    pub requeue_penalty: f64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            horizon_days: 14,
            day_start: NaiveTime::from_hms_opt(9, 0, 0).unwrap_or(NaiveTime::MIN),
            day_end: NaiveTime::from_hms_opt(18, 0, 0).unwrap_or(NaiveTime::MIN),
            max_work_block: 90,
            break_minutes: 15,
            long_task_daily_budget: 180,
            long_task_threshold: 120,
            no_split_window_days: 2,
            split_threshold: 300,
            min_chunk_cap: 120,
            chunk_index_penalty: 5.0,
            requeue_penalty: 1.0,
        }
    }
}

impl SchedulerConfig {
    /// Working window length in minutes.
    pub fn window_minutes(&self) -> i64 {
        (self.day_end - self.day_start).num_minutes()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.horizon_days == 0 {
            return Err("horizon_days must be at least 1".to_string());
        }
        if self.day_end <= self.day_start {
            return Err("day_end must be after day_start".to_string());
        }
        if self.max_work_block <= 0 {
            return Err("max_work_block must be positive".to_string());
        }
        if self.break_minutes < 0 {
            return Err("break_minutes must not be negative".to_string());
        }
        if self.min_chunk_cap <= 0 {
            return Err("min_chunk_cap must be positive".to_string());
        }
        if self.split_threshold <= 0 || self.long_task_threshold <= 0 {
            return Err("thresholds must be positive".to_string());
        }
        if self.long_task_daily_budget < 0 {
            return Err("long_task_daily_budget must not be negative".to_string());
        }
        if self.no_split_window_days < 0 {
            return Err("no_split_window_days must not be negative".to_string());
        }
        for (name, value) in [
            ("chunk_index_penalty", self.chunk_index_penalty),
            ("requeue_penalty", self.requeue_penalty),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(format!("{name} must be a non-negative number"));
            }
        }
        Ok(())
    }
}
