//! Bark notification provider implementation.
//!
//! Sends push notifications to iOS devices via Bark server API.
//!
//! Bark API Reference: https://github.com/Finb/Bark

use super::error::ChannelError;
use super::http_delivery::{Ack, deliver};
use super::provider::{Channel, Delivery, DispatchContext, Message};
use super::resolver::{Readiness, RequiredFields};
use crate::models::BarkConfig;
use async_trait::async_trait;
use serde_json::json;

/// Bark notification provider
///
/// Sends push notifications to iOS devices through a Bark server.
/// Bark is an open-source iOS push notification service that supports
/// custom icons, sounds, deep links, and more.
///
/// # Example
/// ```ignore
/// let config = BarkConfig {
///     server_url: "https://bark.example.com".to_string(),
///     device_key: "YourDeviceKey".to_string(),
///     icon: Some("https://example.com/icon.png".to_string()),
///     sound: Some("notification.wav".to_string()),
///     ..Default::default()
/// };
/// let provider = BarkProvider::new(config, client);
/// let delivery = provider.send(&message, &ctx).await?;
/// ```
#[derive(Clone)]
pub struct BarkProvider {
    config: BarkConfig,
    client: reqwest::Client,
}

impl BarkProvider {
    pub fn new(config: BarkConfig, client: reqwest::Client) -> Self {
        Self { config, client }
    }

    /// Builds the JSON body for the Bark push API
    fn build_request_body(&self, message: &Message) -> serde_json::Value {
        let mut body = json!({
            "title": message.title(),
            "body": message.content(),
        });

        let optional = [
            ("group", &self.config.group),
            ("sound", &self.config.sound),
            ("icon", &self.config.icon),
            ("level", &self.config.level),
            ("url", &self.config.url),
        ];
        for (key, value) in optional {
            if let Some(value) = value.as_deref().filter(|v| !v.trim().is_empty()) {
                body[key] = json!(value);
            }
        }

        body
    }
}

#[async_trait]
impl Channel for BarkProvider {
    fn name(&self) -> &'static str {
        "bark"
    }

    fn readiness(&self) -> Readiness {
        self.config.readiness()
    }

    async fn send(
        &self,
        message: &Message,
        _ctx: &DispatchContext,
    ) -> Result<Delivery, ChannelError> {
        let request = self
            .client
            .post(self.config.build_api_url())
            .json(&self.build_request_body(message));

        deliver(self.name(), request, Ack::HttpOnly).await
    }
}
