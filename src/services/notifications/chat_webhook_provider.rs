//! Chat robot webhooks: DingTalk, WeCom and Feishu.

use super::error::ChannelError;
use super::http_delivery::{Ack, deliver};
use super::provider::{Channel, Delivery, DispatchContext, Message};
use super::resolver::{Readiness, RequiredFields};
use crate::models::{FeishuConfig, TextWebhookConfig};
use async_trait::async_trait;
use serde_json::{Value, json};

/// Robot webhook taking a plain-text payload
///
/// DingTalk and WeCom share the same wire format, only the name differs.
pub struct TextWebhookProvider {
    name: &'static str,
    config: TextWebhookConfig,
    client: reqwest::Client,
}

impl TextWebhookProvider {
    pub fn dingtalk(config: TextWebhookConfig, client: reqwest::Client) -> Self {
        Self {
            name: "dingtalk",
            config,
            client,
        }
    }

    pub fn wecom(config: TextWebhookConfig, client: reqwest::Client) -> Self {
        Self {
            name: "wecom",
            config,
            client,
        }
    }

    fn build_request_body(message: &Message) -> Value {
        json!({
            "msgtype": "text",
            "text": {
                "content": message.content(),
            },
        })
    }
}

#[async_trait]
impl Channel for TextWebhookProvider {
    fn name(&self) -> &'static str {
        self.name
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
            .post(self.config.webhook_url.trim())
            .json(&Self::build_request_body(message));

        deliver(self.name, request, Ack::ErrCode).await
    }
}

/// Feishu bot webhook sending an interactive card
pub struct FeishuProvider {
    config: FeishuConfig,
    client: reqwest::Client,
}

impl FeishuProvider {
    pub fn new(config: FeishuConfig, client: reqwest::Client) -> Self {
        Self { config, client }
    }

    fn build_request_body(&self, message: &Message) -> Value {
        json!({
            "msg_type": "interactive",
            "card": {
                "elements": [
                    {
                        "tag": "markdown",
                        "content": message.content(),
                        "text_align": "left",
                    }
                ],
                "header": {
                    "template": self.config.header_template,
                    "title": {
                        "content": message.title(),
                        "tag": "plain_text",
                    },
                },
            },
        })
    }
}

#[async_trait]
impl Channel for FeishuProvider {
    fn name(&self) -> &'static str {
        "feishu"
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
            .post(self.config.webhook_url.trim())
            .json(&self.build_request_body(message));

        deliver(self.name(), request, Ack::Feishu).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::notifications::VersionState;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn ctx() -> DispatchContext {
        DispatchContext {
            version: VersionState::current("0.1.0", ""),
        }
    }

    #[tokio::test]
    async fn test_dingtalk_posts_text_payload() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/robot/send"))
            .and(body_json(json!({"msgtype": "text", "text": {"content": "disk full"}})))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"errcode": 0, "errmsg": "ok"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let provider = TextWebhookProvider::dingtalk(
            TextWebhookConfig {
                webhook_url: format!("{}/robot/send", server.uri()),
            },
            reqwest::Client::new(),
        );
        let delivery = provider
            .send(&Message::plain("Alert", "disk full"), &ctx())
            .await
            .unwrap();
        assert_eq!(delivery.status_code, Some(200));
    }

    #[tokio::test]
    async fn test_wecom_nonzero_errcode_is_rejection() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"errcode": 93000, "errmsg": "invalid webhook url"})),
            )
            .mount(&server)
            .await;

        let provider = TextWebhookProvider::wecom(
            TextWebhookConfig {
                webhook_url: server.uri(),
            },
            reqwest::Client::new(),
        );
        assert_eq!(provider.name(), "wecom");
        let err = provider
            .send(&Message::plain("Alert", "x"), &ctx())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), "protocol");
        assert!(err.to_string().contains("invalid webhook url"));
    }

    #[test]
    fn test_feishu_card_shape() {
        let provider = FeishuProvider::new(
            FeishuConfig {
                webhook_url: "https://open.feishu.cn/hook/x".to_string(),
                ..Default::default()
            },
            reqwest::Client::new(),
        );
        let body = provider.build_request_body(&Message::plain("Daily", "**done**"));
        assert_eq!(body["msg_type"], "interactive");
        assert_eq!(body["card"]["elements"][0]["tag"], "markdown");
        assert_eq!(body["card"]["elements"][0]["content"], "**done**");
        assert_eq!(body["card"]["elements"][0]["text_align"], "left");
        assert_eq!(body["card"]["header"]["template"], "blue");
        assert_eq!(body["card"]["header"]["title"]["content"], "Daily");
        assert_eq!(body["card"]["header"]["title"]["tag"], "plain_text");
    }

    #[tokio::test]
    async fn test_feishu_status_code_field() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"StatusCode": 0})))
            .mount(&server)
            .await;

        let provider = FeishuProvider::new(
            FeishuConfig {
                webhook_url: server.uri(),
                ..Default::default()
            },
            reqwest::Client::new(),
        );
        assert!(provider
            .send(&Message::plain("Daily", "ok"), &ctx())
            .await
            .is_ok());
    }
}
