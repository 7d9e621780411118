//! Task model shared by the store, the proposal parser and the scheduling engine.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::time::parse_deadline;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    #[default]
    Pending,
    Completed,
}

impl TaskStatus {
    pub fn toggled(self) -> Self {
        match self {
            TaskStatus::Pending => TaskStatus::Completed,
            TaskStatus::Completed => TaskStatus::Pending,
        }
    }
}

/// User-facing priority label.
///
/// Labels outside the closed set are read as `Low`, which is also what the
/// scorer and the block colors fall back to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "high" => Some(Priority::High),
            "medium" => Some(Priority::Medium),
            "low" => Some(Priority::Low),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }

    /// Display color for work blocks of this priority.
    pub fn color(&self) -> &'static str {
        match self {
            Priority::High => "hsl(10 80% 65%)",
            Priority::Medium => "hsl(180 60% 50%)",
            Priority::Low => "hsl(240 5% 65%)",
        }
    }
}

impl From<String> for Priority {
    fn from(label: String) -> Self {
        Priority::from_label(&label).unwrap_or(Priority::Low)
    }
}

impl From<Priority> for String {
    fn from(p: Priority) -> Self {
        p.label().to_string()
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.label())
    }
}

/// A stored task record.
///
/// The deadline is kept exactly as it was submitted; use [`Task::deadline_date`]
/// to get the parsed calendar date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub priority: Priority,

    /// Minutes.
    pub duration: i32,

    /// "YYYY-MM-DD". May be absent or malformed in records coming from outside.
    #[serde(default)]
    pub deadline: Option<String>,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default)]
    pub status: TaskStatus,

    /// Derived; recomputed whenever tasks are listed or scheduled.
    #[serde(default)]
    pub score: f64,
}

impl Task {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            priority: Priority::Medium,
            duration: 60,
            deadline: None,
            tags: Vec::new(),
            status: TaskStatus::Pending,
            score: 0.0,
        }
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_duration(mut self, minutes: i32) -> Self {
        self.duration = minutes;
        self
    }

    pub fn with_deadline(mut self, deadline: impl Into<String>) -> Self {
        self.deadline = Some(deadline.into());
        self
    }

    pub fn with_deadline_date(self, deadline: NaiveDate) -> Self {
        self.with_deadline(crate::time::format_date(deadline))
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    /// Parsed deadline, or `None` when missing or not a valid calendar date.
    pub fn deadline_date(&self) -> Option<NaiveDate> {
        self.deadline.as_deref().and_then(|d| parse_deadline(d).ok())
    }

    pub fn is_pending(&self) -> bool {
        self.status == TaskStatus::Pending
    }
}
