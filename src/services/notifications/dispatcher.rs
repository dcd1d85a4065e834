//! Dispatch orchestrator.
//!
//! Runs the version gate once, then attempts every registered channel
//! concurrently and collects one outcome per channel.

use super::error::ChannelError;
use super::outcome::{Outcome, RunReport};
use super::provider::{Channel, DispatchContext, Message};
use super::registry::build_channels;
use super::resolver::Readiness;
use super::version_gate::{VersionGate, VersionState};
use crate::config::Settings;
use crate::error::AppResult;
use crate::external::build_http_client;
use futures::future::join_all;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Sends one message to every configured channel
#[derive(Clone)]
pub struct Dispatcher {
    channels: Vec<Arc<dyn Channel>>,
    version_gate: Option<Arc<VersionGate>>,
    channel_timeout: Duration,
    current_version: String,
}

impl Dispatcher {
    /// Creates a dispatcher over a fixed list of channels
    ///
    /// # Arguments
    /// * `channels` - Channels in report order
    pub fn new(channels: Vec<Arc<dyn Channel>>) -> Self {
        Self {
            channels,
            version_gate: None,
            channel_timeout: Duration::from_secs(60),
            current_version: crate::pkg_version().to_string(),
        }
    }

    pub fn with_version_gate(mut self, gate: VersionGate) -> Self {
        self.current_version = gate.current_version().to_string();
        self.version_gate = Some(Arc::new(gate));
        self
    }

    pub fn with_channel_timeout(mut self, timeout: Duration) -> Self {
        self.channel_timeout = timeout;
        self
    }

    /// Builds the shared HTTP client, all channels and the version gate
    pub fn from_settings(settings: &Settings) -> AppResult<Self> {
        let client = build_http_client(&settings.http)?;
        let gate = VersionGate::new(
            client.clone(),
            &settings.version_check,
            crate::pkg_version(),
        );

        Ok(Self::new(build_channels(settings, &client))
            .with_version_gate(gate)
            .with_channel_timeout(Duration::from_secs(
                settings.dispatch.channel_timeout_secs,
            )))
    }

    pub fn channels(&self) -> &[Arc<dyn Channel>] {
        &self.channels
    }

    /// Name and readiness of every channel, no network access
    pub fn readiness(&self) -> Vec<(&'static str, Readiness)> {
        self.channels
            .iter()
            .map(|channel| (channel.name(), channel.readiness()))
            .collect()
    }

    /// Checks the release feed; without a gate the current version is assumed
    pub async fn version_state(&self) -> VersionState {
        match &self.version_gate {
            Some(gate) => gate.check().await,
            None => VersionState::current(self.current_version.clone(), String::new()),
        }
    }

    // ========================================================================
    // Message Sending
    // ========================================================================

    /// Delivers `message` to every configured channel
    ///
    /// Never fails: every channel problem becomes an entry of the report.
    /// Outcomes are in registration order regardless of completion order.
    pub async fn push_message(&self, message: &Message) -> RunReport {
        let version = self.version_state().await;
        if version.has_update {
            tracing::info!(
                current = %version.current_version_label,
                latest = %version.latest_version_label,
                url = %version.release_url,
                "A newer release is available"
            );
        }
        let ctx = DispatchContext { version };

        tracing::info!(
            title = message.title(),
            channels = self.channels.len(),
            "Dispatching notification"
        );

        let attempts = self
            .channels
            .iter()
            .map(|channel| self.attempt(channel.as_ref(), message, &ctx));
        let report = RunReport::new(join_all(attempts).await);

        report.log_outcomes();
        tracing::info!(summary = %report.summary(), "Dispatch finished");
        report
    }

    async fn attempt(
        &self,
        channel: &dyn Channel,
        message: &Message,
        ctx: &DispatchContext,
    ) -> Outcome {
        let name = channel.name();

        if let Readiness::NotConfigured { missing } = channel.readiness() {
            return Outcome::not_configured(name, &ChannelError::not_configured(name, missing));
        }

        let start = Instant::now();
        let result = tokio::time::timeout(self.channel_timeout, channel.send(message, ctx)).await;
        let duration_ms = start.elapsed().as_millis() as u64;

        match result {
            Ok(Ok(delivery)) => Outcome::delivered(name, delivery, duration_ms),
            Ok(Err(error)) => {
                tracing::debug!(
                    channel = name,
                    kind = error.kind(),
                    error = %error,
                    "Channel attempt failed"
                );
                Outcome::failed(name, &error, duration_ms)
            }
            Err(_) => {
                let error = ChannelError::transport(
                    name,
                    format!("timed out after {:?}", self.channel_timeout),
                );
                Outcome::failed(name, &error, duration_ms)
            }
        }
    }
}
