use chrono::NaiveDate;
use focusflow_core::{Priority, Task};

/// Backlog overview shown by `focusflow stats`.
#[derive(Debug, Clone, PartialEq)]
pub struct BacklogStats {
    pub total: usize,
    pub completed: usize,
    /// Percent, rounded.
    pub completion_rate: u32,
    pub completed_minutes: i32,
    pub pending: usize,
    pub pending_high: usize,
    /// Pending tasks due within two days (overdue included).
    pub due_soon: usize,
}

pub fn backlog_stats(tasks: &[Task], today: NaiveDate) -> BacklogStats {
    let total = tasks.len();
    let completed = tasks.iter().filter(|t| !t.is_pending()).count();
    let completion_rate = if total > 0 {
        (completed as f64 / total as f64 * 100.0).round() as u32
    } else {
        0
    };
    let pending: Vec<&Task> = tasks.iter().filter(|t| t.is_pending()).collect();

    BacklogStats {
        total,
        completed,
        completion_rate,
        completed_minutes: tasks.iter().filter(|t| !t.is_pending()).map(|t| t.duration).sum(),
        pending: pending.len(),
        pending_high: pending.iter().filter(|t| t.priority == Priority::High).count(),
        due_soon: pending
            .iter()
            .filter_map(|t| t.deadline_date())
            .filter(|d| (*d - today).num_days() <= 2)
            .count(),
    }
}
