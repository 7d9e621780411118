//! Placement loop and schedule assembly.
//!
//! Greedy, deterministic, single pass over a work queue:
//! - every unit takes the first day in the horizon with room for its next block
//! - blocks are capped at `max_work_block`, each followed by a break when it fits
//! - a unit with minutes left goes straight back to the front of the queue
//! - a unit no day can take is reported by title as unscheduled

use std::collections::BTreeSet;

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::capacity::DailyCapacity;
use crate::chunking::{Chunk, chunk_pending};
use crate::config::SchedulerConfig;
use crate::schedule::{BlockKind, WeeklySchedule};
use crate::task::Task;
use crate::work_queue::WorkQueue;

/// Counters from one planning run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStats {
    pub units: usize,
    pub dequeues: u64,
    pub retries: u64,
    pub blocks_placed: usize,
}

/// Plan every pending task in `tasks` over the horizon starting at `today`.
pub fn generate_schedule(
    tasks: &[Task],
    today: NaiveDate,
    cfg: &SchedulerConfig,
) -> WeeklySchedule {
    generate_schedule_with_stats(tasks, today, cfg).0
}

#[instrument(skip(tasks, cfg), fields(tasks = tasks.len(), today = %today))]
pub fn generate_schedule_with_stats(
    tasks: &[Task],
    today: NaiveDate,
    cfg: &SchedulerConfig,
) -> (WeeklySchedule, RunStats) {
    let mut days: Vec<DailyCapacity> = (0..cfg.horizon_days)
        .map(|i| DailyCapacity::new(today + Duration::days(i64::from(i)), cfg))
        .collect();

    let units = chunk_pending(tasks, today, cfg);
    let unit_count = units.len();
    let mut queue = WorkQueue::from_units(units);
    let mut unscheduled = BTreeSet::new();

    while let Some(mut unit) = queue.pop_front() {
        if unit.is_done() {
            debug!(unit = %unit.id, remaining = unit.remaining, "nothing left to place");
            continue;
        }

        match place_next_block(&mut days, &mut unit, cfg) {
            Some(day) => {
                debug!(unit = %unit.id, %day, remaining = unit.remaining, "placed block");
                if !unit.is_done() {
                    unit.score -= cfg.requeue_penalty;
                    queue.retry_front(unit);
                }
            }
            None => {
                debug!(unit = %unit.id, remaining = unit.remaining, "no room in horizon");
                unscheduled.insert(unit.title);
            }
        }
    }

    let blocks_placed = days.iter().map(|d| d.blocks().len()).sum();
    let stats = RunStats {
        units: unit_count,
        dequeues: queue.dequeued(),
        retries: queue.retries(),
        blocks_placed,
    };

    let schedule = assemble(days, unscheduled);
    info!(
        units = stats.units,
        dequeues = stats.dequeues,
        days = schedule.schedule.len(),
        unscheduled = schedule.unscheduled.len(),
        "schedule generated"
    );
    (schedule, stats)
}

/// Place the unit's next work block on the first eligible day.
fn place_next_block(
    days: &mut [DailyCapacity],
    unit: &mut Chunk,
    cfg: &SchedulerConfig,
) -> Option<NaiveDate> {
    let work = unit.remaining.min(cfg.max_work_block);
    // A zero-minute block would never finish the unit.
    if work <= 0 {
        return None;
    }

    for day in days.iter_mut() {
        if unit.deadline.is_some_and(|due| due < day.date()) {
            continue;
        }
        if unit.is_virtual && day.long_task_minutes() > cfg.long_task_daily_budget {
            continue;
        }
        if !day.has_time(work) {
            continue;
        }

        day.add_block(unit, work, BlockKind::Work);
        unit.consume(work);
        if cfg.break_minutes > 0 && day.has_time(cfg.break_minutes) {
            day.add_block(unit, cfg.break_minutes, BlockKind::Break);
        }
        return Some(day.date());
    }

    None
}

fn assemble(days: Vec<DailyCapacity>, unscheduled: BTreeSet<String>) -> WeeklySchedule {
    let schedule = days
        .into_iter()
        .filter(|d| !d.blocks().is_empty())
        .map(|d| (d.date(), d.into_blocks()))
        .collect();
    WeeklySchedule { schedule, unscheduled }
}
