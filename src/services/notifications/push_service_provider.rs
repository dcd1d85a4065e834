//! Token-based push services: PushPlus and ServerChan.

use super::error::ChannelError;
use super::http_delivery::{Ack, deliver};
use super::provider::{Channel, ContentType, Delivery, DispatchContext, Message};
use super::resolver::{Readiness, RequiredFields};
use crate::models::{PushPlusConfig, ServerChanConfig};
use async_trait::async_trait;
use serde_json::{Value, json};

/// PushPlus (pushplus.plus) provider
pub struct PushPlusProvider {
    config: PushPlusConfig,
    client: reqwest::Client,
}

impl PushPlusProvider {
    pub fn new(config: PushPlusConfig, client: reqwest::Client) -> Self {
        Self { config, client }
    }

    fn build_request_body(&self, message: &Message) -> Value {
        let template = match message.content_type() {
            ContentType::Html => "html",
            ContentType::Plain => "txt",
        };

        json!({
            "token": self.config.token.trim(),
            "title": message.title(),
            "content": message.content(),
            "topic": self.config.topic,
            "template": template,
            "channel": self.config.channel,
            "webhook": "",
            "callbackUrl": "",
            "timestamp": "",
        })
    }
}

#[async_trait]
impl Channel for PushPlusProvider {
    fn name(&self) -> &'static str {
        "pushplus"
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
            .post(self.config.api_url.trim())
            .json(&self.build_request_body(message));

        deliver(self.name(), request, Ack::PushPlus).await
    }
}

/// ServerChan (sct.ftqq.com) provider
pub struct ServerChanProvider {
    config: ServerChanConfig,
    client: reqwest::Client,
}

impl ServerChanProvider {
    pub fn new(config: ServerChanConfig, client: reqwest::Client) -> Self {
        Self { config, client }
    }

    fn build_request_body(&self, message: &Message) -> Value {
        json!({
            "title": message.title(),
            "desp": message.content(),
            "channel": self.config.channel,
        })
    }
}

#[async_trait]
impl Channel for ServerChanProvider {
    fn name(&self) -> &'static str {
        "serverchan"
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

        deliver(self.name(), request, Ack::ServerChan).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::notifications::VersionState;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn ctx() -> DispatchContext {
        DispatchContext {
            version: VersionState::current("0.1.0", ""),
        }
    }

    #[test]
    fn test_pushplus_template_follows_content_type() {
        let provider = PushPlusProvider::new(
            PushPlusConfig {
                token: "tok".to_string(),
                ..Default::default()
            },
            reqwest::Client::new(),
        );

        let body = provider.build_request_body(&Message::plain("T", "c"));
        assert_eq!(body["template"], "txt");
        assert_eq!(body["channel"], "wechat");
        assert_eq!(body["topic"], "");
        assert_eq!(body["callbackUrl"], "");

        let body = provider.build_request_body(&Message::html("T", "<b>c</b>"));
        assert_eq!(body["template"], "html");
    }

    #[tokio::test]
    async fn test_pushplus_rejected_code() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/send"))
            .and(body_partial_json(json!({"token": "tok", "title": "T"})))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"code": 903, "msg": "invalid token"})),
            )
            .mount(&server)
            .await;

        let provider = PushPlusProvider::new(
            PushPlusConfig {
                token: "tok".to_string(),
                api_url: format!("{}/send", server.uri()),
                ..Default::default()
            },
            reqwest::Client::new(),
        );
        let err = provider
            .send(&Message::plain("T", "c"), &ctx())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("invalid token"));
    }

    #[tokio::test]
    async fn test_serverchan_posts_to_key_url() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/SCT123.send"))
            .and(body_partial_json(json!({"title": "T", "desp": "body", "channel": "9"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"code": 0})))
            .expect(1)
            .mount(&server)
            .await;

        let provider = ServerChanProvider::new(
            ServerChanConfig {
                send_key: "SCT123".to_string(),
                base_url: server.uri(),
                ..Default::default()
            },
            reqwest::Client::new(),
        );
        assert!(provider
            .send(&Message::plain("T", "body"), &ctx())
            .await
            .is_ok());
    }
}
