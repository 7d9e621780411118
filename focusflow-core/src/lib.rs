//! focusflow-core: task model, scoring, chunking and the greedy day planner.

pub mod capacity;
pub mod chunking;
pub mod config;
pub mod engine;
pub mod error;
pub mod planner;
pub mod proposal;
pub mod schedule;
pub mod scoring;
pub mod store;
pub mod task;
pub mod time;
pub mod work_queue;

pub use capacity::DailyCapacity;
pub use chunking::{Chunk, chunk_pending, split_task, try_split};
pub use config::SchedulerConfig;
pub use engine::{PlanOutput, SchedulingEngine};
pub use error::{ChunkError, ProposalError};
pub use planner::{RunStats, generate_schedule, generate_schedule_with_stats};
pub use proposal::{TaskProposal, parse_text};
pub use schedule::{BlockKind, ScheduleBlock, WeeklySchedule};
pub use scoring::{score, score_task};
pub use store::{InMemoryTaskStore, TaskStore, new_record, ranked_tasks};
pub use task::{Priority, Task, TaskStatus};
pub use work_queue::WorkQueue;
