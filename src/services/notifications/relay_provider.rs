//! Aibotk relay: one message, up to two targets.
//!
//! The room and the contact are independent legs posted concurrently.
//! The channel counts as delivered when at least one configured leg
//! succeeds; failed legs of a delivered run end up in `Delivery::notes`.

use super::error::ChannelError;
use super::http_delivery::{Ack, deliver};
use super::provider::{Channel, Delivery, DispatchContext, Message};
use super::resolver::{Readiness, RequiredFields};
use crate::models::AibotkConfig;
use async_trait::async_trait;
use futures::future::OptionFuture;
use serde_json::{Value, json};

const ROOM_PATH: &str = "/openapi/v1/chat/room";
const CONTACT_PATH: &str = "/openapi/v1/chat/contact";

/// Text message type on the relay side
const TEXT_MESSAGE: u8 = 1;

pub struct AibotkProvider {
    config: AibotkConfig,
    client: reqwest::Client,
}

impl AibotkProvider {
    pub fn new(config: AibotkConfig, client: reqwest::Client) -> Self {
        Self { config, client }
    }

    fn room_body(&self, room: &str, message: &Message) -> Value {
        json!({
            "apiKey": self.config.api_key.trim(),
            "roomName": room,
            "message": {
                "type": TEXT_MESSAGE,
                "content": message.content(),
            },
        })
    }

    fn contact_body(&self, contact: &str, message: &Message) -> Value {
        json!({
            "apiKey": self.config.api_key.trim(),
            "name": contact,
            "message": {
                "type": TEXT_MESSAGE,
                "content": message.content(),
            },
        })
    }

    async fn post(&self, path: &str, body: Value) -> Result<Delivery, ChannelError> {
        let request = self.client.post(self.config.endpoint(path)).json(&body);
        deliver(self.name(), request, Ack::HttpOnly).await
    }
}

#[async_trait]
impl Channel for AibotkProvider {
    fn name(&self) -> &'static str {
        "aibotk"
    }

    fn readiness(&self) -> Readiness {
        self.config.readiness()
    }

    async fn send(
        &self,
        message: &Message,
        _ctx: &DispatchContext,
    ) -> Result<Delivery, ChannelError> {
        let room_leg: OptionFuture<_> = self
            .config
            .room()
            .map(|room| async move {
                let result = self.post(ROOM_PATH, self.room_body(room, message)).await;
                (format!("room '{room}'"), result)
            })
            .into();
        let contact_leg: OptionFuture<_> = self
            .config
            .contact()
            .map(|contact| async move {
                let result = self
                    .post(CONTACT_PATH, self.contact_body(contact, message))
                    .await;
                (format!("contact '{contact}'"), result)
            })
            .into();

        let (room, contact) = tokio::join!(room_leg, contact_leg);
        merge_legs(self.name(), room.into_iter().chain(contact).collect())
    }
}

/// Folds per-target results into one channel result
fn merge_legs(
    channel: &'static str,
    legs: Vec<(String, Result<Delivery, ChannelError>)>,
) -> Result<Delivery, ChannelError> {
    let mut delivered: Option<Delivery> = None;
    let mut failures: Vec<(String, ChannelError)> = Vec::new();

    for (target, result) in legs {
        match result {
            Ok(delivery) => {
                delivered.get_or_insert(delivery);
            }
            Err(e) => failures.push((target, e)),
        }
    }

    match delivered {
        Some(mut delivery) => {
            for (target, error) in failures {
                tracing::warn!(channel, target = %target, error = %error, "Relay target failed");
                delivery.notes.push(format!("{target} failed: {error}"));
            }
            Ok(delivery)
        }
        None if failures.len() <= 1 => match failures.pop() {
            Some((target, error)) => Err(error.with_target(&target)),
            None => Err(ChannelError::not_configured(
                channel,
                vec!["room_name or contact_name"],
            )),
        },
        None => {
            let combined = failures
                .iter()
                .map(|(target, error)| format!("{target}: {}", error.detail()))
                .collect::<Vec<_>>()
                .join("; ");
            // Several legs may fail differently; the first decides the kind
            Err(match &failures[0].1 {
                ChannelError::Protocol { .. } => ChannelError::protocol(channel, None, combined),
                ChannelError::Render { .. } => ChannelError::render(channel, combined),
                _ => ChannelError::transport(channel, combined),
            })
        }
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

    fn provider(server: &MockServer, room: &str, contact: &str) -> AibotkProvider {
        AibotkProvider::new(
            AibotkConfig {
                hook_url: format!("{}/", server.uri()),
                api_key: "key".to_string(),
                room_name: room.to_string(),
                contact_name: contact.to_string(),
            },
            reqwest::Client::new(),
        )
    }

    #[tokio::test]
    async fn test_posts_both_targets() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(ROOM_PATH))
            .and(body_partial_json(json!({
                "apiKey": "key",
                "roomName": "ops",
                "message": {"type": 1, "content": "hi"}
            })))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path(CONTACT_PATH))
            .and(body_partial_json(json!({"apiKey": "key", "name": "leo"})))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let delivery = provider(&server, "ops", "leo")
            .send(&Message::plain("T", "hi"), &ctx())
            .await
            .unwrap();
        assert!(delivery.notes.is_empty());
    }

    #[tokio::test]
    async fn test_only_configured_target_is_posted() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(CONTACT_PATH))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path(ROOM_PATH))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        assert!(provider(&server, "", "leo")
            .send(&Message::plain("T", "hi"), &ctx())
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_partial_failure_is_delivered_with_note() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(ROOM_PATH))
            .respond_with(ResponseTemplate::new(500).set_body_string("room gone"))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path(CONTACT_PATH))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let delivery = provider(&server, "ops", "leo")
            .send(&Message::plain("T", "hi"), &ctx())
            .await
            .unwrap();
        assert_eq!(delivery.notes.len(), 1);
        assert!(delivery.notes[0].starts_with("room 'ops' failed"));
        assert!(delivery.notes[0].contains("room gone"));
    }

    #[test]
    fn test_unreachable_room_still_delivers_with_note() {
        let legs = vec![
            (
                "room 'ops'".to_string(),
                Err(ChannelError::transport("aibotk", "connection refused")),
            ),
            (
                "contact 'leo'".to_string(),
                Ok(Delivery {
                    status_code: Some(200),
                    ..Default::default()
                }),
            ),
        ];

        let delivery = merge_legs("aibotk", legs).unwrap();
        assert_eq!(delivery.status_code, Some(200));
        assert_eq!(
            delivery.notes,
            vec!["room 'ops' failed: transport error: connection refused".to_string()]
        );
    }

    #[tokio::test]
    async fn test_all_targets_failing_names_each_target() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let err = provider(&server, "ops", "leo")
            .send(&Message::plain("T", "hi"), &ctx())
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "rejected by remote: room 'ops': HTTP 500: empty response; \
             contact 'leo': HTTP 500: empty response"
        );
    }

    #[test]
    fn test_merge_single_failure_keeps_kind() {
        let legs = vec![(
            "room 'ops'".to_string(),
            Err(ChannelError::protocol("aibotk", Some(502), "bad gateway")),
        )];
        let err = merge_legs("aibotk", legs).unwrap_err();
        assert_eq!(err.kind(), "protocol");
        assert_eq!(
            err.to_string(),
            "rejected by remote (HTTP 502): room 'ops': bad gateway"
        );
    }
}
