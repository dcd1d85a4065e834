mod channel;

pub use channel::{
    AibotkConfig, BarkConfig, ChannelsConfig, EmailConfig, FeishuConfig, PushPlusConfig,
    ServerChanConfig, TextWebhookConfig, WebhookConfig,
};
