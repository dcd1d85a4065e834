use std::sync::Arc;
use tokio::sync::Mutex;
use tokio_cron_scheduler::{Job, JobScheduler as TokioCronScheduler};

use crate::jobs::error::{JobError, JobResult};
use crate::services::notifications::{Dispatcher, Message, RunReport};

/// Pushes the same message on every tick of a cron expression
///
/// A tick that fires while the previous run is still in flight is skipped.
pub struct ScheduleRunner {
    scheduler: Arc<Mutex<TokioCronScheduler>>,
    dispatcher: Arc<Dispatcher>,
    message: Arc<Message>,
    in_flight: Arc<Mutex<()>>,
}

impl ScheduleRunner {
    pub async fn new(dispatcher: Dispatcher, message: Message) -> JobResult<Self> {
        let scheduler = TokioCronScheduler::new()
            .await
            .map_err(|e| JobError::Scheduler(e.to_string()))?;

        Ok(Self {
            scheduler: Arc::new(Mutex::new(scheduler)),
            dispatcher: Arc::new(dispatcher),
            message: Arc::new(message),
            in_flight: Arc::new(Mutex::new(())),
        })
    }

    /// Registers the dispatch job under `cron`
    pub async fn schedule(&self, cron: &str) -> JobResult<()> {
        let dispatcher = Arc::clone(&self.dispatcher);
        let message = Arc::clone(&self.message);
        let in_flight = Arc::clone(&self.in_flight);

        let job = Job::new_async(cron, move |_uuid, _lock| {
            let dispatcher = Arc::clone(&dispatcher);
            let message = Arc::clone(&message);
            let in_flight = Arc::clone(&in_flight);

            Box::pin(async move {
                if let Some(report) = run_tick(&dispatcher, &message, &in_flight).await
                    && report.all_failed()
                {
                    tracing::error!(summary = %report.summary(), "Scheduled run delivered nothing");
                }
            })
        })
        .map_err(|e| JobError::InvalidCronExpression {
            expression: cron.to_string(),
            reason: e.to_string(),
        })?;

        self.scheduler
            .lock()
            .await
            .add(job)
            .await
            .map_err(|e| JobError::Scheduler(e.to_string()))?;

        tracing::info!(cron, title = self.message.title(), "Scheduled notification registered");
        Ok(())
    }

    pub async fn start(&self) -> JobResult<()> {
        self.scheduler
            .lock()
            .await
            .start()
            .await
            .map_err(|e| JobError::Scheduler(e.to_string()))
    }

    /// Stop the scheduler gracefully
    pub async fn stop(&self) -> JobResult<()> {
        self.scheduler
            .lock()
            .await
            .shutdown()
            .await
            .map_err(|e| JobError::Scheduler(e.to_string()))
    }
}

/// One scheduled dispatch; `None` when the previous run has not finished
pub async fn run_tick(
    dispatcher: &Dispatcher,
    message: &Message,
    in_flight: &Mutex<()>,
) -> Option<RunReport> {
    let Ok(_guard) = in_flight.try_lock() else {
        tracing::warn!("Previous scheduled run still in progress, skipping tick");
        return None;
    };
    Some(dispatcher.push_message(message).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_invalid_cron_is_rejected() {
        let runner = ScheduleRunner::new(Dispatcher::new(Vec::new()), Message::plain("T", "c"))
            .await
            .unwrap();
        let err = runner.schedule("not a cron").await.unwrap_err();
        assert!(matches!(err, JobError::InvalidCronExpression { .. }));
    }

    #[tokio::test]
    async fn test_valid_cron_is_registered() {
        let runner = ScheduleRunner::new(Dispatcher::new(Vec::new()), Message::plain("T", "c"))
            .await
            .unwrap();
        assert!(runner.schedule("0 0 9 * * *").await.is_ok());
    }

    #[tokio::test]
    async fn test_tick_skipped_while_previous_run_in_flight() {
        let dispatcher = Dispatcher::new(Vec::new());
        let message = Message::plain("T", "c");
        let in_flight = Mutex::new(());

        let held = in_flight.lock().await;
        assert!(run_tick(&dispatcher, &message, &in_flight).await.is_none());
        drop(held);

        let report = run_tick(&dispatcher, &message, &in_flight).await;
        assert!(report.is_some_and(|r| r.is_empty()));
    }
}
