//! Errors raised inside a single channel attempt.
//!
//! The dispatcher turns every one of these into a report entry; none of
//! them ever reaches the caller of `push_message`.

use thiserror::Error;

/// Longest remote response snippet kept in an error message
const MAX_SNIPPET: usize = 300;

#[derive(Debug, Error)]
pub enum ChannelError {
    /// Required settings absent, the channel was never attempted
    #[error("not configured: missing {}", .missing.join(", "))]
    NotConfigured {
        channel: &'static str,
        missing: Vec<&'static str>,
    },

    /// Network, DNS, TLS or SMTP connection failure, including timeouts
    #[error("transport error: {message}")]
    Transport {
        channel: &'static str,
        message: String,
    },

    /// The remote answered but did not accept the message
    #[error("rejected by remote{}: {message}", format_status(.status))]
    Protocol {
        channel: &'static str,
        status: Option<u16>,
        message: String,
    },

    /// The outgoing message could not be built
    #[error("failed to build message: {message}")]
    Render {
        channel: &'static str,
        message: String,
    },
}

fn format_status(status: &Option<u16>) -> String {
    status.map(|s| format!(" (HTTP {s})")).unwrap_or_default()
}

impl ChannelError {
    pub fn not_configured(channel: &'static str, missing: Vec<&'static str>) -> Self {
        Self::NotConfigured { channel, missing }
    }

    pub fn transport(channel: &'static str, message: impl Into<String>) -> Self {
        Self::Transport {
            channel,
            message: message.into(),
        }
    }

    pub fn protocol(
        channel: &'static str,
        status: Option<u16>,
        message: impl Into<String>,
    ) -> Self {
        Self::Protocol {
            channel,
            status,
            message: message.into(),
        }
    }

    pub fn render(channel: &'static str, message: impl Into<String>) -> Self {
        Self::Render {
            channel,
            message: message.into(),
        }
    }

    /// Maps a reqwest failure; reqwest's own Display hides the root cause
    pub fn from_reqwest(channel: &'static str, error: &reqwest::Error) -> Self {
        if error.is_timeout() {
            return Self::transport(channel, "request timed out");
        }
        if error.is_builder() {
            return Self::render(channel, error_chain(error));
        }
        Self::transport(channel, error_chain(error))
    }

    pub fn channel(&self) -> &'static str {
        match self {
            Self::NotConfigured { channel, .. }
            | Self::Transport { channel, .. }
            | Self::Protocol { channel, .. }
            | Self::Render { channel, .. } => channel,
        }
    }

    /// Short machine-readable kind for structured logs
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotConfigured { .. } => "not_configured",
            Self::Transport { .. } => "transport",
            Self::Protocol { .. } => "protocol",
            Self::Render { .. } => "render",
        }
    }

    /// The variant's payload without the kind prefix
    pub fn detail(&self) -> String {
        match self {
            Self::NotConfigured { missing, .. } => format!("missing {}", missing.join(", ")),
            Self::Transport { message, .. } | Self::Render { message, .. } => message.clone(),
            Self::Protocol {
                status: Some(status),
                message,
                ..
            } => format!("HTTP {status}: {message}"),
            Self::Protocol { message, .. } => message.clone(),
        }
    }

    /// Same error, message prefixed with which leg of a fan-out failed
    pub fn with_target(self, target: &str) -> Self {
        match self {
            Self::Transport { channel, message } => Self::Transport {
                channel,
                message: format!("{target}: {message}"),
            },
            Self::Protocol {
                channel,
                status,
                message,
            } => Self::Protocol {
                channel,
                status,
                message: format!("{target}: {message}"),
            },
            Self::Render { channel, message } => Self::Render {
                channel,
                message: format!("{target}: {message}"),
            },
            other => other,
        }
    }
}

/// Joins an error with all of its sources: "a: b: c"
pub(crate) fn error_chain(error: &(dyn std::error::Error + 'static)) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        let cause_text = cause.to_string();
        if !message.contains(&cause_text) {
            message.push_str(": ");
            message.push_str(&cause_text);
        }
        source = cause.source();
    }
    message
}

/// Trims a remote response body for inclusion in error messages
pub(crate) fn snippet(body: &str) -> String {
    let body = body.trim();
    if body.is_empty() {
        return "empty response".to_string();
    }
    match body.char_indices().nth(MAX_SNIPPET) {
        Some((idx, _)) => format!("{}…", &body[..idx]),
        None => body.to_string(),
    }
}
