//! Builds the fixed-order channel list from settings.

use super::bark_provider::BarkProvider;
use super::chat_webhook_provider::{FeishuProvider, TextWebhookProvider};
use super::email_provider::EmailProvider;
use super::provider::Channel;
use super::push_service_provider::{PushPlusProvider, ServerChanProvider};
use super::relay_provider::AibotkProvider;
use super::template::Branding;
use super::webhook_provider::WebhookProvider;
use crate::config::Settings;
use std::sync::Arc;

/// Every known channel, configured or not, in report order
pub fn build_channels(settings: &Settings, client: &reqwest::Client) -> Vec<Arc<dyn Channel>> {
    let channels = &settings.channels;
    let branding = Branding::from(&settings.application);

    vec![
        Arc::new(EmailProvider::new(channels.email.clone(), branding)),
        Arc::new(TextWebhookProvider::dingtalk(
            channels.dingtalk.clone(),
            client.clone(),
        )),
        Arc::new(TextWebhookProvider::wecom(
            channels.wecom.clone(),
            client.clone(),
        )),
        Arc::new(AibotkProvider::new(channels.aibotk.clone(), client.clone())),
        Arc::new(PushPlusProvider::new(
            channels.pushplus.clone(),
            client.clone(),
        )),
        Arc::new(ServerChanProvider::new(
            channels.serverchan.clone(),
            client.clone(),
        )),
        Arc::new(FeishuProvider::new(channels.feishu.clone(), client.clone())),
        Arc::new(BarkProvider::new(channels.bark.clone(), client.clone())),
        Arc::new(WebhookProvider::new(channels.webhook.clone(), client.clone())),
    ]
}
