use thiserror::Error;

use crate::error::AppError;

#[derive(Debug, Error)]
pub enum JobError {
    #[error("Invalid cron expression '{expression}': {reason}")]
    InvalidCronExpression { expression: String, reason: String },

    #[error("Scheduler error: {0}")]
    Scheduler(String),
}

pub type JobResult<T> = Result<T, JobError>;

impl From<JobError> for AppError {
    fn from(err: JobError) -> Self {
        match err {
            JobError::InvalidCronExpression { expression, reason } => AppError::Validation {
                field: "schedule.cron".to_string(),
                reason: format!("'{expression}': {reason}"),
            },
            JobError::Scheduler(message) => AppError::Scheduler { message },
        }
    }
}
