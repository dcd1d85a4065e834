//! Channel readiness resolution.
//!
//! Readiness is a pure function of a channel's settings: no I/O, no
//! network lookups. A channel that is not ready is reported as not
//! configured and its sender is never invoked.

use crate::models::{
    AibotkConfig, BarkConfig, EmailConfig, FeishuConfig, PushPlusConfig, ServerChanConfig,
    TextWebhookConfig, WebhookConfig,
};

/// Resolver verdict for one channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Readiness {
    Ready,
    NotConfigured { missing: Vec<&'static str> },
}

impl Readiness {
    pub fn from_missing(missing: Vec<&'static str>) -> Self {
        if missing.is_empty() {
            Readiness::Ready
        } else {
            Readiness::NotConfigured { missing }
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Readiness::Ready)
    }

    pub fn missing(&self) -> &[&'static str] {
        match self {
            Readiness::Ready => &[],
            Readiness::NotConfigured { missing } => missing,
        }
    }
}

/// Lists the required settings a channel configuration lacks
pub trait RequiredFields {
    fn missing_fields(&self) -> Vec<&'static str>;

    fn readiness(&self) -> Readiness {
        Readiness::from_missing(self.missing_fields())
    }
}

fn blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Collects the names of blank fields, in declaration order
fn require(fields: &[(&'static str, &str)]) -> Vec<&'static str> {
    fields
        .iter()
        .filter(|(_, value)| blank(value))
        .map(|(name, _)| *name)
        .collect()
}

impl RequiredFields for EmailConfig {
    fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = require(&[
            ("user", self.user.as_str()),
            ("password", self.password.as_str()),
        ]);
        // The SMTP host is derived from the address domain
        if !blank(&self.user) && self.resolved_smtp_host().is_none() {
            missing.insert(0, "user (an address with a domain)");
        }
        missing
    }
}

impl RequiredFields for TextWebhookConfig {
    fn missing_fields(&self) -> Vec<&'static str> {
        require(&[("webhook_url", self.webhook_url.as_str())])
    }
}

impl RequiredFields for FeishuConfig {
    fn missing_fields(&self) -> Vec<&'static str> {
        require(&[("webhook_url", self.webhook_url.as_str())])
    }
}

impl RequiredFields for AibotkConfig {
    fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = require(&[
            ("hook_url", self.hook_url.as_str()),
            ("api_key", self.api_key.as_str()),
        ]);
        if self.room().is_none() && self.contact().is_none() {
            missing.push("room_name or contact_name");
        }
        missing
    }
}

impl RequiredFields for PushPlusConfig {
    fn missing_fields(&self) -> Vec<&'static str> {
        require(&[("token", self.token.as_str())])
    }
}

impl RequiredFields for ServerChanConfig {
    fn missing_fields(&self) -> Vec<&'static str> {
        require(&[("send_key", self.send_key.as_str())])
    }
}

impl RequiredFields for BarkConfig {
    fn missing_fields(&self) -> Vec<&'static str> {
        require(&[
            ("server_url", self.server_url.as_str()),
            ("device_key", self.device_key.as_str()),
        ])
    }
}

impl RequiredFields for WebhookConfig {
    fn missing_fields(&self) -> Vec<&'static str> {
        require(&[("url", self.url.as_str())])
    }
}
