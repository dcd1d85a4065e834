//! Schedule command handler
//!
//! Runs the configured message on a cron schedule until Ctrl-C.

use crate::config::settings::Settings;
use crate::error::{AppError, AppResult};
use crate::jobs::ScheduleRunner;
use crate::services::notifications::{Dispatcher, Message};

/// Handler for the schedule command
pub struct ScheduleCommandHandler {
    config: Settings,
}

impl ScheduleCommandHandler {
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    /// Registers the cron job and blocks until Ctrl-C
    ///
    /// # Errors
    /// - Missing or invalid cron expression, missing title
    /// - Scheduler start or shutdown failures
    pub async fn execute(&self) -> AppResult<()> {
        let schedule = &self.config.schedule;
        schedule.validate()?;

        let message = Message::new(
            schedule.title.trim(),
            schedule.content.clone(),
            schedule.content_type,
        );
        let dispatcher = Dispatcher::from_settings(&self.config)?;

        let runner = ScheduleRunner::new(dispatcher, message).await?;
        runner.schedule(schedule.cron.trim()).await?;
        runner.start().await?;

        println!(
            "✓ Scheduler started with cron '{}', press Ctrl-C to stop",
            schedule.cron.trim()
        );

        tokio::signal::ctrl_c()
            .await
            .map_err(|source| AppError::Io {
                context: "waiting for Ctrl-C".to_string(),
                source,
            })?;

        tracing::info!("Shutdown signal received, stopping scheduler");
        runner.stop().await?;
        Ok(())
    }
}
