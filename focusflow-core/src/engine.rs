//! Scheduling engine: ties a task store to the planner.
//!
//! Each run takes one snapshot from the store and plans over it; later store
//! writes never affect a run in progress.

use anyhow::{Context, Result, anyhow};
use chrono::NaiveDate;

use crate::config::SchedulerConfig;
use crate::planner::{RunStats, generate_schedule_with_stats};
use crate::schedule::WeeklySchedule;
use crate::store::{TaskStore, ranked_tasks};
use crate::task::Task;

#[derive(Debug, Clone, PartialEq)]
pub struct PlanOutput {
    pub schedule: WeeklySchedule,
    pub stats: RunStats,
}

#[derive(Debug, Clone)]
pub struct SchedulingEngine<S: TaskStore> {
    store: S,
    config: SchedulerConfig,
}

impl<S: TaskStore> SchedulingEngine<S> {
    /// Rejects configs the planner cannot run with.
    pub fn new(store: S, config: SchedulerConfig) -> Result<Self> {
        config
            .validate()
            .map_err(|e| anyhow!("invalid scheduler config: {e}"))?;
        Ok(Self { store, config })
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Plan the current backlog starting at `today`.
    pub fn plan(&self, today: NaiveDate) -> Result<PlanOutput> {
        let snapshot = self.store.snapshot().context("snapshot task store")?;
        let (schedule, stats) = generate_schedule_with_stats(&snapshot, today, &self.config);
        Ok(PlanOutput { schedule, stats })
    }

    /// All tasks, rescored for `today`, highest score first.
    pub fn ranked(&self, today: NaiveDate) -> Result<Vec<Task>> {
        let snapshot = self.store.snapshot().context("snapshot task store")?;
        Ok(ranked_tasks(snapshot, today))
    }
}
