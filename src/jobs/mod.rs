//! Cron-driven dispatch runs for the `schedule` command.

pub mod error;
pub mod scheduler;

pub use error::{JobError, JobResult};
pub use scheduler::ScheduleRunner;
