//! Notification system with pluggable channels.
//!
//! A [`Dispatcher`] owns a fixed-order list of [`Channel`]s built once from
//! configuration. Each run checks the release feed, asks every channel
//! whether it is configured, sends where it is, and returns a
//! [`RunReport`] with one [`Outcome`] per channel. A failing channel never
//! affects the others.

mod bark_provider;
mod chat_webhook_provider;
mod email_provider;
mod error;
mod http_delivery;
mod outcome;
mod provider;
mod push_service_provider;
mod registry;
mod relay_provider;
mod resolver;
mod webhook_provider;

pub mod dispatcher;
pub mod template;
pub mod version_gate;

pub use bark_provider::BarkProvider;
pub use chat_webhook_provider::{FeishuProvider, TextWebhookProvider};
pub use dispatcher::Dispatcher;
pub use email_provider::EmailProvider;
pub use error::ChannelError;
pub use outcome::{Outcome, OutcomeStatus, RunReport};
pub use provider::{Channel, ContentType, Delivery, DispatchContext, Message};
pub use push_service_provider::{PushPlusProvider, ServerChanProvider};
pub use registry::build_channels;
pub use relay_provider::AibotkProvider;
pub use resolver::{Readiness, RequiredFields};
pub use template::Branding;
pub use version_gate::{VersionGate, VersionState};
pub use webhook_provider::WebhookProvider;
