//! Core channel trait and the data shared by every send attempt.

use super::error::ChannelError;
use super::resolver::Readiness;
use super::version_gate::VersionState;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// How `Message::content` should be interpreted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    #[default]
    Plain,
    Html,
}

impl ContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Plain => "plain",
            ContentType::Html => "html",
        }
    }
}

/// Message to be delivered to every configured channel
///
/// Immutable once built; a dispatch run hands the same `&Message` to all
/// channels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    title: String,
    content: String,
    #[serde(default)]
    content_type: ContentType,
}

impl Message {
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        content_type: ContentType,
    ) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            content_type,
        }
    }

    pub fn plain(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self::new(title, content, ContentType::Plain)
    }

    pub fn html(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self::new(title, content, ContentType::Html)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn content_type(&self) -> ContentType {
        self.content_type
    }

    pub fn is_html(&self) -> bool {
        self.content_type == ContentType::Html
    }
}

/// Read-only per-run data handed to every channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchContext {
    pub version: VersionState,
}

/// What a channel reports after a successful send
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Delivery {
    /// HTTP status code or provider-specific status
    pub status_code: Option<u16>,
    /// Non-fatal problems, e.g. one leg of a fan-out that failed
    pub notes: Vec<String>,
}

/// A delivery channel (email, webhook, push relay, ...)
///
/// Uses `async_trait` to support async methods with dynamic dispatch.
/// Implementations must never panic on bad input or remote failures:
/// everything that can go wrong while sending comes back as a
/// [`ChannelError`].
///
/// # Example Implementation
/// ```ignore
/// use async_trait::async_trait;
///
/// pub struct LogChannel;
///
/// #[async_trait]
/// impl Channel for LogChannel {
///     fn name(&self) -> &'static str {
///         "log"
///     }
///
///     fn readiness(&self) -> Readiness {
///         Readiness::Ready
///     }
///
///     async fn send(
///         &self,
///         message: &Message,
///         _ctx: &DispatchContext,
///     ) -> Result<Delivery, ChannelError> {
///         tracing::info!(title = message.title(), "log channel");
///         Ok(Delivery::default())
///     }
/// }
/// ```
#[async_trait]
pub trait Channel: Send + Sync {
    /// Stable identifier used in reports and logs (e.g. "email", "dingtalk")
    fn name(&self) -> &'static str;

    /// Whether every required setting is present. Must not perform I/O.
    fn readiness(&self) -> Readiness;

    fn is_ready(&self) -> bool {
        self.readiness().is_ready()
    }

    /// Sends the message. Only called when [`Channel::readiness`] is ready.
    async fn send(
        &self,
        message: &Message,
        ctx: &DispatchContext,
    ) -> Result<Delivery, ChannelError>;
}
