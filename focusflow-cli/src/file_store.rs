//! JSON-file task store (`~/.focusflow/tasks.json`).
//!
//! Every operation reads the file fresh and writes it back whole, so a
//! snapshot is simply the parsed file contents at that moment.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use focusflow_core::{Task, TaskProposal, TaskStatus, TaskStore, new_record};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Vec<Task>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let s = fs::read_to_string(&self.path)
            .with_context(|| format!("read {}", self.path.display()))?;
        if s.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&s).with_context(|| format!("parse {}", self.path.display()))
    }

    fn save(&self, tasks: &[Task]) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
        }
        let json = serde_json::to_string_pretty(tasks)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).with_context(|| format!("write {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .with_context(|| format!("replace {}", self.path.display()))?;
        Ok(())
    }
}

impl TaskStore for JsonFileStore {
    fn snapshot(&self) -> Result<Vec<Task>> {
        self.load()
    }

    fn create(&mut self, proposal: TaskProposal, today: NaiveDate) -> Result<Task> {
        let mut tasks = self.load()?;
        let task = new_record(proposal, today)?;
        tasks.push(task.clone());
        self.save(&tasks)?;
        Ok(task)
    }

    fn delete(&mut self, id: &str) -> Result<bool> {
        let mut tasks = self.load()?;
        let before = tasks.len();
        tasks.retain(|t| t.id != id);
        let removed = tasks.len() != before;
        if removed {
            self.save(&tasks)?;
        }
        Ok(removed)
    }

    fn clear(&mut self) -> Result<()> {
        self.save(&[])
    }

    fn set_status(&mut self, id: &str, status: TaskStatus) -> Result<Option<Task>> {
        let mut tasks = self.load()?;
        let Some(task) = tasks.iter_mut().find(|t| t.id == id) else {
            return Ok(None);
        };
        task.status = status;
        let updated = task.clone();
        self.save(&tasks)?;
        Ok(Some(updated))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use focusflow_core::Priority;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
    }

    fn proposal(title: &str) -> TaskProposal {
        TaskProposal {
            title: title.to_string(),
            priority: Priority::Low,
            duration: 45,
            deadline: None,
            tags: vec![],
        }
    }

    #[test]
    fn missing_file_is_an_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path().join("tasks.json"));
        assert!(store.snapshot().unwrap().is_empty());
    }

    #[test]
    fn records_persist_across_handles() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("tasks.json");

        let mut store = JsonFileStore::open(&path);
        let created = store.create(proposal("Laundry"), today()).unwrap();

        let reopened = JsonFileStore::open(&path);
        let tasks = reopened.snapshot().unwrap();
        assert_eq!(tasks, vec![created]);
    }

    #[test]
    fn delete_status_and_clear() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::open(dir.path().join("tasks.json"));
        let a = store.create(proposal("A"), today()).unwrap();
        let b = store.create(proposal("B"), today()).unwrap();

        assert!(store.delete(&a.id).unwrap());
        assert!(!store.delete("nope").unwrap());

        let done = store.set_status(&b.id, TaskStatus::Completed).unwrap().unwrap();
        assert_eq!(done.status, TaskStatus::Completed);
        assert_eq!(store.snapshot().unwrap()[0].status, TaskStatus::Completed);

        store.clear().unwrap();
        assert!(store.snapshot().unwrap().is_empty());
    }

    #[test]
    fn records_from_outside_keep_malformed_deadlines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tasks.json");
        fs::write(
            &path,
            r#"[{"id":"x1","title":"Imported","priority":"Urgent","duration":30,"deadline":"next week"}]"#,
        )
        .unwrap();

        let tasks = JsonFileStore::open(&path).snapshot().unwrap();
        assert_eq!(tasks[0].priority, Priority::Low);
        assert_eq!(tasks[0].deadline.as_deref(), Some("next week"));
        assert!(tasks[0].deadline_date().is_none());
    }
}
