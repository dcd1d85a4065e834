//! Webhook notification provider implementation.
//!
//! Sends the message as JSON to a configured URL with a configurable
//! method and extra headers.

use super::error::ChannelError;
use super::http_delivery::{Ack, deliver};
use super::provider::{Channel, Delivery, DispatchContext, Message};
use super::resolver::{Readiness, RequiredFields};
use crate::models::WebhookConfig;
use async_trait::async_trait;
use reqwest::Method;
use serde_json::json;

/// Webhook notification provider
///
/// # Example
/// ```ignore
/// let config = WebhookConfig {
///     url: "https://example.com/webhook".to_string(),
///     method: "POST".to_string(),
///     headers: HashMap::new(),
/// };
/// let provider = WebhookProvider::new(config, client);
/// let delivery = provider.send(&message, &ctx).await?;
/// ```
pub struct WebhookProvider {
    config: WebhookConfig,
    client: reqwest::Client,
}

impl WebhookProvider {
    pub fn new(config: WebhookConfig, client: reqwest::Client) -> Self {
        Self { config, client }
    }

    /// Parses HTTP method string into reqwest Method
    fn parse_method(&self) -> Result<Method, ChannelError> {
        let method = self.config.method.trim();
        if method.is_empty() {
            return Ok(Method::POST);
        }
        method.to_ascii_uppercase().parse().map_err(|_| {
            ChannelError::render(
                self.name(),
                format!("invalid HTTP method: {}", self.config.method),
            )
        })
    }
}

#[async_trait]
impl Channel for WebhookProvider {
    fn name(&self) -> &'static str {
        "webhook"
    }

    fn readiness(&self) -> Readiness {
        self.config.readiness()
    }

    async fn send(
        &self,
        message: &Message,
        _ctx: &DispatchContext,
    ) -> Result<Delivery, ChannelError> {
        let method = self.parse_method()?;
        let mut request = self
            .client
            .request(method, self.config.url.trim())
            .json(&json!({
                "title": message.title(),
                "content": message.content(),
                "content_type": message.content_type(),
            }));

        // Add custom headers
        for (key, value) in &self.config.headers {
            request = request.header(key, value);
        }

        deliver(self.name(), request, Ack::HttpOnly).await
    }
}
