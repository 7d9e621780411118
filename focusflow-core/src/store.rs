//! Task store abstraction.
//!
//! The engine never holds a live store; it asks for a snapshot at the start
//! of each run. Persistence (JSON file, sqlite, ...) lives behind this trait.

use anyhow::{Result, bail};
use chrono::NaiveDate;
use uuid::Uuid;

use crate::proposal::TaskProposal;
use crate::scoring::score_task;
use crate::task::{Task, TaskStatus};
use crate::time::{default_deadline, format_date};

pub trait TaskStore {
    /// Copy of every record, in insertion order.
    fn snapshot(&self) -> Result<Vec<Task>>;

    /// Validate and insert a proposal, returning the stored record.
    fn create(&mut self, proposal: TaskProposal, today: NaiveDate) -> Result<Task>;

    /// Remove a record. Returns whether anything was removed.
    fn delete(&mut self, id: &str) -> Result<bool>;

    fn clear(&mut self) -> Result<()>;

    /// Set a record's status. Returns the updated record, if it exists.
    fn set_status(&mut self, id: &str, status: TaskStatus) -> Result<Option<Task>>;
}

/// Build a stored record from a proposal: fresh id, pending, default deadline.
pub fn new_record(proposal: TaskProposal, today: NaiveDate) -> Result<Task> {
    if let Err(e) = proposal.validate() {
        bail!("rejected task proposal: {e}");
    }

    let deadline = proposal
        .deadline
        .unwrap_or_else(|| format_date(default_deadline(today)));

    let mut task = Task {
        id: Uuid::new_v4().to_string(),
        title: proposal.title.trim().to_string(),
        priority: proposal.priority,
        duration: proposal.duration,
        deadline: Some(deadline),
        tags: proposal.tags,
        status: TaskStatus::Pending,
        score: 0.0,
    };
    task.score = score_task(&task, today);
    Ok(task)
}

/// Rescore a snapshot for `today` and order it by score, highest first.
pub fn ranked_tasks(mut tasks: Vec<Task>, today: NaiveDate) -> Vec<Task> {
    for t in tasks.iter_mut() {
        t.score = score_task(t, today);
    }
    tasks.sort_by(|a, b| b.score.total_cmp(&a.score));
    tasks
}

/// Volatile store, mainly for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskStore {
    tasks: Vec<Task>,
}

impl InMemoryTaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

impl TaskStore for InMemoryTaskStore {
    fn snapshot(&self) -> Result<Vec<Task>> {
        Ok(self.tasks.clone())
    }

    fn create(&mut self, proposal: TaskProposal, today: NaiveDate) -> Result<Task> {
        let task = new_record(proposal, today)?;
        self.tasks.push(task.clone());
        Ok(task)
    }

    fn delete(&mut self, id: &str) -> Result<bool> {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        Ok(self.tasks.len() != before)
    }

    fn clear(&mut self) -> Result<()> {
        self.tasks.clear();
        Ok(())
    }

    fn set_status(&mut self, id: &str, status: TaskStatus) -> Result<Option<Task>> {
        Ok(self.tasks.iter_mut().find(|t| t.id == id).map(|t| {
            t.status = status;
            t.clone()
        }))
    }
}
