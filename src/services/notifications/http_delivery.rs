//! Shared request/response handling for HTTP channels.

use super::error::{ChannelError, snippet};
use super::provider::Delivery;
use reqwest::RequestBuilder;
use serde_json::Value;

/// How a 2xx response body proves the message was accepted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Ack {
    /// Any 2xx response is enough
    HttpOnly,
    /// `errcode == 0` when present (DingTalk, WeCom)
    ErrCode,
    /// `code` or `StatusCode == 0` when present
    Feishu,
    /// `code == 200` when present
    PushPlus,
    /// `code == 0` when present
    ServerChan,
}

impl Ack {
    /// Returns a rejection message when the body reports an error
    pub(crate) fn check(&self, body: &str) -> Option<String> {
        if *self == Ack::HttpOnly {
            return None;
        }
        // Non-JSON bodies carry no application-level status
        let json: Value = serde_json::from_str(body).ok()?;

        let (field, expected) = match self {
            Ack::HttpOnly => return None,
            Ack::ErrCode => ("errcode", 0),
            Ack::Feishu => {
                if json.get("code").is_some() {
                    ("code", 0)
                } else {
                    ("StatusCode", 0)
                }
            }
            Ack::PushPlus => ("code", 200),
            Ack::ServerChan => ("code", 0),
        };

        let code = json.get(field)?;
        if code.as_i64() == Some(expected) {
            return None;
        }

        let detail = ["errmsg", "msg", "message", "StatusMessage"]
            .iter()
            .find_map(|key| json.get(*key).and_then(Value::as_str))
            .unwrap_or_default();
        Some(if detail.is_empty() {
            format!("{field} {code}")
        } else {
            format!("{field} {code}: {detail}")
        })
    }
}

/// Sends a prepared request and classifies the answer
pub(crate) async fn deliver(
    channel: &'static str,
    request: RequestBuilder,
    ack: Ack,
) -> Result<Delivery, ChannelError> {
    let response = request
        .send()
        .await
        .map_err(|e| ChannelError::from_reqwest(channel, &e))?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| ChannelError::from_reqwest(channel, &e))?;

    if !status.is_success() {
        return Err(ChannelError::protocol(
            channel,
            Some(status.as_u16()),
            snippet(&body),
        ));
    }

    if let Some(rejection) = ack.check(&body) {
        return Err(ChannelError::protocol(channel, Some(status.as_u16()), rejection));
    }

    tracing::debug!(channel, status = status.as_u16(), "Remote accepted message");

    Ok(Delivery {
        status_code: Some(status.as_u16()),
        notes: Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_errcode_ack() {
        assert_eq!(Ack::ErrCode.check(r#"{"errcode":0,"errmsg":"ok"}"#), None);
        assert_eq!(
            Ack::ErrCode.check(r#"{"errcode":310000,"errmsg":"keywords not in content"}"#),
            Some("errcode 310000: keywords not in content".to_string())
        );
        // Missing field or non-JSON body is accepted on 2xx
        assert_eq!(Ack::ErrCode.check(r#"{"ok":true}"#), None);
        assert_eq!(Ack::ErrCode.check("ok"), None);
    }

    #[test]
    fn test_feishu_ack_accepts_either_field() {
        assert_eq!(Ack::Feishu.check(r#"{"code":0,"msg":"success"}"#), None);
        assert_eq!(Ack::Feishu.check(r#"{"StatusCode":0}"#), None);
        assert_eq!(
            Ack::Feishu.check(r#"{"code":19021,"msg":"sign match fail"}"#),
            Some("code 19021: sign match fail".to_string())
        );
    }

    #[test]
    fn test_push_service_acks() {
        assert_eq!(Ack::PushPlus.check(r#"{"code":200,"msg":"ok"}"#), None);
        assert!(Ack::PushPlus.check(r#"{"code":900,"msg":"token invalid"}"#).is_some());
        assert_eq!(Ack::ServerChan.check(r#"{"code":0}"#), None);
        assert!(Ack::ServerChan.check(r#"{"code":40001,"message":"bad key"}"#).is_some());
        assert_eq!(Ack::HttpOnly.check(r#"{"code":1}"#), None);
    }

    #[tokio::test]
    async fn test_deliver_maps_http_errors() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let request = reqwest::Client::new().post(server.uri());
        let err = deliver("webhook", request, Ack::HttpOnly)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "rejected by remote (HTTP 500): boom");
    }

    #[tokio::test]
    async fn test_deliver_success_keeps_status_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"errcode":0}"#))
            .mount(&server)
            .await;

        let request = reqwest::Client::new().post(server.uri());
        let delivery = deliver("dingtalk", request, Ack::ErrCode).await.unwrap();
        assert_eq!(delivery.status_code, Some(200));
        assert!(delivery.notes.is_empty());
    }
}
