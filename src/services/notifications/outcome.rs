//! Per-channel outcomes and the aggregated run report.

use super::error::ChannelError;
use super::provider::Delivery;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeStatus {
    Delivered,
    /// Skipped before any network call: required settings are missing
    NotConfigured,
    Failed,
}

impl OutcomeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutcomeStatus::Delivered => "delivered",
            OutcomeStatus::NotConfigured => "not_configured",
            OutcomeStatus::Failed => "failed",
        }
    }
}

/// Result of one channel attempt within a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outcome {
    pub channel_name: String,
    pub status: OutcomeStatus,
    pub error_message: Option<String>,
    /// Partial-failure details of a run that still delivered
    pub notes: Vec<String>,
    pub duration_ms: u64,
}

impl Outcome {
    pub fn delivered(channel: &str, delivery: Delivery, duration_ms: u64) -> Self {
        Self {
            channel_name: channel.to_string(),
            status: OutcomeStatus::Delivered,
            error_message: None,
            notes: delivery.notes,
            duration_ms,
        }
    }

    pub fn not_configured(channel: &str, error: &ChannelError) -> Self {
        Self {
            channel_name: channel.to_string(),
            status: OutcomeStatus::NotConfigured,
            error_message: Some(format!("{channel} is {error}")),
            notes: Vec::new(),
            duration_ms: 0,
        }
    }

    pub fn failed(channel: &str, error: &ChannelError, duration_ms: u64) -> Self {
        Self {
            channel_name: channel.to_string(),
            status: OutcomeStatus::Failed,
            error_message: Some(error.to_string()),
            notes: Vec::new(),
            duration_ms,
        }
    }

    pub fn success(&self) -> bool {
        self.status == OutcomeStatus::Delivered
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.status, &self.error_message) {
            (OutcomeStatus::Delivered, _) if self.notes.is_empty() => {
                write!(f, "[{}] delivered", self.channel_name)
            }
            (OutcomeStatus::Delivered, _) => write!(
                f,
                "[{}] delivered ({})",
                self.channel_name,
                self.notes.join("; ")
            ),
            (OutcomeStatus::NotConfigured, Some(reason)) => {
                write!(f, "[{}] skipped: {}", self.channel_name, reason)
            }
            (status, Some(reason)) => {
                write!(f, "[{}] {}: {}", self.channel_name, status.as_str(), reason)
            }
            (status, None) => write!(f, "[{}] {}", self.channel_name, status.as_str()),
        }
    }
}

/// Ordered outcomes of one dispatch run, in configured channel order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunReport {
    outcomes: Vec<Outcome>,
}

impl RunReport {
    pub fn new(outcomes: Vec<Outcome>) -> Self {
        Self { outcomes }
    }

    pub fn outcomes(&self) -> &[Outcome] {
        &self.outcomes
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn get(&self, channel: &str) -> Option<&Outcome> {
        self.outcomes.iter().find(|o| o.channel_name == channel)
    }

    fn count(&self, status: OutcomeStatus) -> usize {
        self.outcomes.iter().filter(|o| o.status == status).count()
    }

    pub fn delivered(&self) -> usize {
        self.count(OutcomeStatus::Delivered)
    }

    pub fn failed(&self) -> usize {
        self.count(OutcomeStatus::Failed)
    }

    pub fn not_configured(&self) -> usize {
        self.count(OutcomeStatus::NotConfigured)
    }

    /// Channels that were actually attempted
    pub fn attempted(&self) -> usize {
        self.delivered() + self.failed()
    }

    /// At least one channel was attempted and none of them delivered.
    ///
    /// Unconfigured channels do not count as failures.
    pub fn all_failed(&self) -> bool {
        self.failed() > 0 && self.delivered() == 0
    }

    pub fn summary(&self) -> String {
        format!(
            "{} delivered, {} failed, {} not configured",
            self.delivered(),
            self.failed(),
            self.not_configured()
        )
    }

    /// Emits one structured event per outcome
    pub fn log_outcomes(&self) {
        for outcome in &self.outcomes {
            match outcome.status {
                OutcomeStatus::Delivered => tracing::info!(
                    channel = %outcome.channel_name,
                    status = outcome.status.as_str(),
                    duration_ms = outcome.duration_ms,
                    notes = ?outcome.notes,
                    "Notification delivered"
                ),
                OutcomeStatus::NotConfigured => tracing::info!(
                    channel = %outcome.channel_name,
                    status = outcome.status.as_str(),
                    reason = outcome.error_message.as_deref().unwrap_or_default(),
                    "Channel skipped"
                ),
                OutcomeStatus::Failed => tracing::warn!(
                    channel = %outcome.channel_name,
                    status = outcome.status.as_str(),
                    duration_ms = outcome.duration_ms,
                    error = outcome.error_message.as_deref().unwrap_or_default(),
                    "Notification failed"
                ),
            }
        }
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for outcome in &self.outcomes {
            writeln!(f, "{outcome}")?;
        }
        write!(f, "{}", self.summary())
    }
}
