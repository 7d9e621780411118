//! Priority scoring: base weight by priority, scaled by deadline urgency,
//! plus a small bonus for effort.

use chrono::NaiveDate;

use crate::task::{Priority, Task};
use crate::time::days_until;

pub fn base_score(priority: Priority) -> f64 {
    match priority {
        Priority::High => 150.0,
        Priority::Medium => 100.0,
        Priority::Low => 50.0,
    }
}

/// Urgency multiplier for a number of whole days left.
pub fn urgency_multiplier(days_left: i64) -> f64 {
    match days_left {
        d if d <= 0 => 3.0,
        d if d <= 2 => 2.0,
        d if d <= 5 => 1.5,
        _ => 1.0,
    }
}

pub fn effort_bonus(duration_minutes: i32) -> f64 {
    f64::from(duration_minutes) / 60.0 * 5.0
}

/// Score a task; higher means schedule sooner.
///
/// Without a usable deadline this is just the base score: no urgency
/// multiplier and no effort bonus.
pub fn score(
    priority: Priority,
    deadline: Option<NaiveDate>,
    duration_minutes: i32,
    today: NaiveDate,
) -> f64 {
    let base = base_score(priority);
    let Some(due) = deadline else {
        return base;
    };
    base * urgency_multiplier(days_until(due, today)) + effort_bonus(duration_minutes)
}

pub fn score_task(task: &Task, today: NaiveDate) -> f64 {
    score(task.priority, task.deadline_date(), task.duration, today)
}
