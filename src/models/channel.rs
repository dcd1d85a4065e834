//! Channel configuration models.
//!
//! One struct per delivery channel. Every field defaults to empty so a
//! channel that is not mentioned in any configuration source simply ends
//! up "not configured" instead of failing deserialization.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ============================================================================
// Default value functions
// ============================================================================

fn default_smtp_port() -> u16 {
    465
}

fn default_true() -> bool {
    true
}

fn default_smtp_timeout() -> u64 {
    30
}

fn default_method() -> String {
    "POST".to_string()
}

fn default_pushplus_url() -> String {
    "http://www.pushplus.plus/send".to_string()
}

fn default_pushplus_channel() -> String {
    "wechat".to_string()
}

fn default_serverchan_base_url() -> String {
    "https://sctapi.ftqq.com".to_string()
}

fn default_serverchan_channel() -> String {
    "9".to_string()
}

fn default_feishu_template() -> String {
    "blue".to_string()
}

// ============================================================================
// Email
// ============================================================================

/// SMTP email channel configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailConfig {
    /// Login address; the SMTP host is derived from its domain
    #[serde(default)]
    pub user: String,

    /// SMTP password or app-specific authorization code
    #[serde(default)]
    pub password: String,

    /// Recipient address, falls back to `user` when empty
    #[serde(default)]
    pub to: String,

    /// Explicit SMTP host, overrides the `smtp.<domain>` convention
    #[serde(default)]
    pub smtp_host: Option<String>,

    /// Implicit-TLS SMTP port
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,

    /// Skip server certificate validation.
    ///
    /// Enabled by default so self-signed or mismatched certificates of
    /// small mail providers do not block delivery. Operators who can rely
    /// on a proper certificate chain should turn this off.
    #[serde(default = "default_true")]
    pub accept_invalid_certs: bool,

    /// SMTP session timeout in seconds
    #[serde(default = "default_smtp_timeout")]
    pub timeout_secs: u64,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            user: String::new(),
            password: String::new(),
            to: String::new(),
            smtp_host: None,
            smtp_port: default_smtp_port(),
            accept_invalid_certs: default_true(),
            timeout_secs: default_smtp_timeout(),
        }
    }
}

impl EmailConfig {
    /// Domain part of the login address, if any
    pub fn user_domain(&self) -> Option<&str> {
        self.user
            .trim()
            .split_once('@')
            .map(|(_, domain)| domain)
            .filter(|domain| !domain.is_empty())
    }

    /// SMTP host to connect to
    ///
    /// Uses `smtp_host` when set, otherwise `smtp.<domain-of-user>`.
    pub fn resolved_smtp_host(&self) -> Option<String> {
        match self.smtp_host.as_deref().map(str::trim) {
            Some(host) if !host.is_empty() => Some(host.to_string()),
            _ => self.user_domain().map(|domain| format!("smtp.{domain}")),
        }
    }

    /// Recipient address, `user` when `to` is blank
    pub fn recipient(&self) -> &str {
        if self.to.trim().is_empty() {
            self.user.trim()
        } else {
            self.to.trim()
        }
    }
}

// ============================================================================
// Chat webhooks
// ============================================================================

/// Text-payload chat webhook (DingTalk robot, WeCom robot)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextWebhookConfig {
    #[serde(default)]
    pub webhook_url: String,
}

/// Feishu / Lark bot webhook sending interactive cards
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeishuConfig {
    #[serde(default)]
    pub webhook_url: String,

    /// Card header colour template
    #[serde(default = "default_feishu_template")]
    pub header_template: String,
}

impl Default for FeishuConfig {
    fn default() -> Self {
        Self {
            webhook_url: String::new(),
            header_template: default_feishu_template(),
        }
    }
}

// ============================================================================
// Push relays
// ============================================================================

/// Aibotk relay: fans out to a chat room and/or a contact
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AibotkConfig {
    /// Base URL of the relay, the `/openapi/v1/chat/*` paths are appended
    #[serde(default)]
    pub hook_url: String,

    #[serde(default)]
    pub api_key: String,

    /// Room (group chat) to deliver to
    #[serde(default)]
    pub room_name: String,

    /// Contact (single user) to deliver to
    #[serde(default)]
    pub contact_name: String,
}

impl AibotkConfig {
    pub fn room(&self) -> Option<&str> {
        Some(self.room_name.trim()).filter(|name| !name.is_empty())
    }

    pub fn contact(&self) -> Option<&str> {
        Some(self.contact_name.trim()).filter(|name| !name.is_empty())
    }

    /// Joins the relay base URL with an API path
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.hook_url.trim().trim_end_matches('/'), path)
    }
}

/// PushPlus token push service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushPlusConfig {
    #[serde(default)]
    pub token: String,

    #[serde(default = "default_pushplus_url")]
    pub api_url: String,

    /// Delivery channel on the PushPlus side (wechat, webhook, mail, ...)
    #[serde(default = "default_pushplus_channel")]
    pub channel: String,

    /// Group topic code, empty for one-to-one pushes
    #[serde(default)]
    pub topic: String,
}

impl Default for PushPlusConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            api_url: default_pushplus_url(),
            channel: default_pushplus_channel(),
            topic: String::new(),
        }
    }
}

/// ServerChan (Server酱) push service, keyed by the SendKey in the URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerChanConfig {
    #[serde(default)]
    pub send_key: String,

    #[serde(default = "default_serverchan_base_url")]
    pub base_url: String,

    /// Message channel selector, `9` is the WeChat service account
    #[serde(default = "default_serverchan_channel")]
    pub channel: String,
}

impl Default for ServerChanConfig {
    fn default() -> Self {
        Self {
            send_key: String::new(),
            base_url: default_serverchan_base_url(),
            channel: default_serverchan_channel(),
        }
    }
}

impl ServerChanConfig {
    pub fn build_api_url(&self) -> String {
        format!(
            "{}/{}.send",
            self.base_url.trim().trim_end_matches('/'),
            self.send_key.trim()
        )
    }
}

/// Bark iOS push configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BarkConfig {
    #[serde(default)]
    pub server_url: String,

    #[serde(default)]
    pub device_key: String,

    #[serde(default)]
    pub group: Option<String>,

    #[serde(default)]
    pub sound: Option<String>,

    #[serde(default)]
    pub icon: Option<String>,

    /// passive, active or timeSensitive
    #[serde(default)]
    pub level: Option<String>,

    /// URL opened when the notification is tapped
    #[serde(default)]
    pub url: Option<String>,
}

impl BarkConfig {
    pub fn build_api_url(&self) -> String {
        format!(
            "{}/push/{}",
            self.server_url.trim().trim_end_matches('/'),
            self.device_key.trim()
        )
    }
}

// ============================================================================
// Generic webhook
// ============================================================================

/// Generic JSON webhook
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookConfig {
    #[serde(default)]
    pub url: String,

    /// HTTP method, POST unless overridden
    #[serde(default = "default_method")]
    pub method: String,

    #[serde(default)]
    pub headers: HashMap<String, String>,
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            method: default_method(),
            headers: HashMap::new(),
        }
    }
}

// ============================================================================
// All channels
// ============================================================================

/// Settings for every known channel
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelsConfig {
    #[serde(default)]
    pub email: EmailConfig,

    #[serde(default)]
    pub dingtalk: TextWebhookConfig,

    #[serde(default)]
    pub wecom: TextWebhookConfig,

    #[serde(default)]
    pub aibotk: AibotkConfig,

    #[serde(default)]
    pub pushplus: PushPlusConfig,

    #[serde(default)]
    pub serverchan: ServerChanConfig,

    #[serde(default)]
    pub feishu: FeishuConfig,

    #[serde(default)]
    pub bark: BarkConfig,

    #[serde(default)]
    pub webhook: WebhookConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_smtp_host_derived_from_user_domain() {
        let config = EmailConfig {
            user: "bot@qq.com".to_string(),
            ..Default::default()
        };
        assert_eq!(config.resolved_smtp_host().as_deref(), Some("smtp.qq.com"));
    }

    #[test]
    fn test_smtp_host_override_wins() {
        let config = EmailConfig {
            user: "bot@qq.com".to_string(),
            smtp_host: Some("mail.internal".to_string()),
            ..Default::default()
        };
        assert_eq!(config.resolved_smtp_host().as_deref(), Some("mail.internal"));
    }

    #[test]
    fn test_smtp_host_missing_without_domain() {
        let config = EmailConfig {
            user: "not-an-address".to_string(),
            ..Default::default()
        };
        assert_eq!(config.resolved_smtp_host(), None);

        let config = EmailConfig {
            user: "trailing@".to_string(),
            ..Default::default()
        };
        assert_eq!(config.resolved_smtp_host(), None);
    }

    #[test]
    fn test_recipient_falls_back_to_user() {
        let mut config = EmailConfig {
            user: "bot@163.com".to_string(),
            ..Default::default()
        };
        assert_eq!(config.recipient(), "bot@163.com");

        config.to = "ops@example.com".to_string();
        assert_eq!(config.recipient(), "ops@example.com");
    }

    #[test]
    fn test_aibotk_endpoint_trims_trailing_slash() {
        let config = AibotkConfig {
            hook_url: "https://api-bot.aibotk.com/".to_string(),
            ..Default::default()
        };
        assert_eq!(
            config.endpoint("/openapi/v1/chat/room"),
            "https://api-bot.aibotk.com/openapi/v1/chat/room"
        );
    }

    #[test]
    fn test_serverchan_api_url() {
        let config = ServerChanConfig {
            send_key: "SCT123".to_string(),
            ..Default::default()
        };
        assert_eq!(config.build_api_url(), "https://sctapi.ftqq.com/SCT123.send");
    }

    #[test]
    fn test_bark_api_url_trailing_slash() {
        let config = BarkConfig {
            server_url: "https://bark.example.com/".to_string(),
            device_key: "test_key_123".to_string(),
            ..Default::default()
        };
        assert_eq!(
            config.build_api_url(),
            "https://bark.example.com/push/test_key_123"
        );
    }

    #[test]
    fn test_channels_config_deserializes_partial_toml() {
        let toml = r#"
[dingtalk]
webhook_url = "https://oapi.dingtalk.com/robot/send?access_token=abc"

[email]
user = "bot@qq.com"
"#;
        let config: ChannelsConfig = config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()
            .and_then(|c| c.try_deserialize())
            .unwrap();

        assert_eq!(
            config.dingtalk.webhook_url,
            "https://oapi.dingtalk.com/robot/send?access_token=abc"
        );
        assert_eq!(config.email.smtp_port, 465);
        assert!(config.email.accept_invalid_certs);
        assert!(config.wecom.webhook_url.is_empty());
        assert_eq!(config.pushplus.api_url, "http://www.pushplus.plus/send");
    }
}
