use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use focusflow_core::time::{clock_label, parse_deadline};
use focusflow_core::{
    Priority, SchedulingEngine, TaskProposal, TaskStore, WeeklySchedule, parse_text,
};
use tracing::debug;

mod calendar;
mod config;
mod file_store;
mod logging;
mod state;
mod stats;

use file_store::JsonFileStore;

const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("FOCUSFLOW_BUILD_SHA"), ")");

#[derive(Parser, Debug)]
#[command(name = "focusflow", version = VERSION, about = "FocusFlow task planner")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Add a task from explicit fields
    Add {
        #[arg(long)]
        title: String,

        /// High, Medium or Low
        #[arg(long, default_value = "Medium")]
        priority: String,

        /// Minutes
        #[arg(long, default_value_t = 60)]
        duration: i32,

        /// YYYY-MM-DD (default: one week out)
        #[arg(long)]
        deadline: Option<String>,

        /// Repeatable
        #[arg(long = "tag")]
        tags: Vec<String>,
    },

    /// Add a task from a free-text description, e.g. "urgent report 2h friday #work"
    Quick { text: String },

    /// Show what quick-add would create, without saving
    Parse { text: String },

    /// List tasks, highest score first
    List,

    /// Delete a task by id
    Delete { id: String },

    /// Toggle a task between pending and completed
    Done { id: String },

    /// Remove every task
    Reset,

    /// Build the plan for the coming days
    Schedule {
        /// Plan as if today were YYYY-MM-DD
        #[arg(long)]
        today: Option<String>,

        /// Print the schedule as JSON
        #[arg(long, conflicts_with = "ics")]
        json: bool,

        /// Print work blocks as an ICS calendar
        #[arg(long)]
        ics: bool,
    },

    /// Backlog summary
    Stats,

    /// Config file helpers
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write ~/.focusflow/config.toml with defaults
    Init,
}

fn main() -> Result<()> {
    let command = match Cli::parse().command {
        Command::Config {
            command: ConfigCommand::Init,
        } => return config::init_config(),
        other => other,
    };

    let cfg = config::load_config()?;
    logging::init(&cfg.general.log_level);

    let store = JsonFileStore::open(state::tasks_path()?);
    debug!(path = %store.path().display(), "task store");
    let mut engine = SchedulingEngine::new(store, cfg.engine.clone())?;

    match command {
        Command::Add {
            title,
            priority,
            duration,
            deadline,
            tags,
        } => {
            let Some(priority) = Priority::from_label(&priority) else {
                bail!("unknown priority: {priority} (expected High, Medium or Low)");
            };
            if let Some(d) = deadline.as_deref() {
                parse_deadline(d)?;
            }
            let proposal = TaskProposal {
                title,
                priority,
                duration,
                deadline,
                tags,
            };
            let task = engine.store_mut().create(proposal, cfg.today()?)?;
            println!("Added {} ({})", task.title, task.id);
        }

        Command::Quick { text } => {
            let today = cfg.today()?;
            let proposal = parse_text(&text, today);
            let task = engine.store_mut().create(proposal, today)?;
            println!(
                "Added {} [{} | {} min | due {}] ({})",
                task.title,
                task.priority,
                task.duration,
                task.deadline.as_deref().unwrap_or("-"),
                task.id
            );
        }

        Command::Parse { text } => {
            let proposal = parse_text(&text, cfg.today()?);
            println!("{}", serde_json::to_string_pretty(&proposal)?);
        }

        Command::List => {
            let tasks = engine.ranked(cfg.today()?)?;
            if tasks.is_empty() {
                println!("No tasks.");
            }
            for t in &tasks {
                let mark = if t.is_pending() { " " } else { "x" };
                println!(
                    "[{mark}] {:>7.1}  {:<6} {:>4}m  due {:<10}  {}  ({})",
                    t.score,
                    t.priority,
                    t.duration,
                    t.deadline.as_deref().unwrap_or("-"),
                    t.title,
                    t.id
                );
            }
        }

        Command::Delete { id } => {
            if engine.store_mut().delete(&id)? {
                println!("Deleted {id}");
            } else {
                bail!("no task with id {id}");
            }
        }

        Command::Done { id } => {
            let current = engine
                .store()
                .snapshot()?
                .into_iter()
                .find(|t| t.id == id)
                .with_context(|| format!("no task with id {id}"))?;
            let next = current.status.toggled();
            if let Some(t) = engine.store_mut().set_status(&id, next)? {
                println!("{} -> {:?}", t.title, t.status);
            }
        }

        Command::Reset => {
            engine.store_mut().clear()?;
            println!("All tasks removed.");
        }

        Command::Schedule { today, json, ics } => {
            let today = match today {
                Some(s) => parse_today(&s)?,
                None => cfg.today()?,
            };
            let out = engine.plan(today)?;
            debug!(stats = ?out.stats, "plan finished");

            if json {
                println!("{}", serde_json::to_string_pretty(&out.schedule)?);
            } else if ics {
                let events = calendar::schedule_to_events(&out.schedule);
                print!("{}", calendar::events_to_ics(&events));
            } else {
                print_schedule(&out.schedule);
            }
        }

        Command::Stats => {
            let tasks = engine.store().snapshot()?;
            let s = stats::backlog_stats(&tasks, cfg.today()?);
            println!(
                "Tasks:            {} ({} completed, {}%)",
                s.total, s.completed, s.completion_rate
            );
            println!("Focused minutes:  {}", s.completed_minutes);
            println!("Pending:          {} ({} high priority)", s.pending, s.pending_high);
            println!("Due within 2 days: {}", s.due_soon);
        }

        Command::Config { .. } => {}
    }

    Ok(())
}

fn parse_today(s: &str) -> Result<NaiveDate> {
    parse_deadline(s).with_context(|| format!("--today expects YYYY-MM-DD, got {s:?}"))
}

fn print_schedule(schedule: &WeeklySchedule) {
    if schedule.is_empty() && schedule.unscheduled.is_empty() {
        println!("Nothing to schedule.");
        return;
    }

    for (day, blocks) in &schedule.schedule {
        println!("{}", day.format("%A %Y-%m-%d"));
        for b in blocks {
            println!(
                "  {} - {}  {:<40} {:>3}m",
                b.time_label(),
                clock_label(b.end()),
                b.task_title,
                b.duration
            );
        }
        println!();
    }

    if !schedule.unscheduled.is_empty() {
        println!("Unscheduled:");
        for title in &schedule.unscheduled {
            println!("  - {title}");
        }
    }
}
