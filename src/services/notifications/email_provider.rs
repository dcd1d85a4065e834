//! SMTP email provider.
//!
//! Connects with implicit TLS (port 465 by default) to `smtp.<domain>`
//! of the login address and sends the rendered HTML template with the
//! logo attached inline.

use super::error::{ChannelError, error_chain};
use super::provider::{Channel, Delivery, DispatchContext, Message};
use super::resolver::{Readiness, RequiredFields};
use super::template::{self, Branding, LOGO_CID};
use crate::models::EmailConfig;
use async_trait::async_trait;
use lettre::message::header::ContentType as MimeType;
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::transport::smtp::client::{Tls, TlsParameters};
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Tokio1Executor};
use std::time::Duration;

const LOGO_SVG: &str = include_str!("../../../assets/logo.svg");

pub struct EmailProvider {
    config: EmailConfig,
    branding: Branding,
}

impl EmailProvider {
    pub fn new(config: EmailConfig, branding: Branding) -> Self {
        Self { config, branding }
    }

    fn render_error(&self, error: impl std::fmt::Display) -> ChannelError {
        ChannelError::render(self.name(), error.to_string())
    }

    /// Builds the MIME message: HTML body plus the inline logo
    fn build_email(
        &self,
        message: &Message,
        ctx: &DispatchContext,
    ) -> Result<lettre::Message, ChannelError> {
        let sender: Address = self
            .config
            .user
            .trim()
            .parse()
            .map_err(|e| self.render_error(format!("invalid sender address: {e}")))?;
        let from = Mailbox::new(Some(self.branding.name.clone()), sender);

        let mut builder = lettre::Message::builder().from(from).subject(message.title());
        for recipient in self
            .config
            .recipient()
            .split(',')
            .map(str::trim)
            .filter(|r| !r.is_empty())
        {
            let mailbox: Mailbox = recipient
                .parse()
                .map_err(|e| self.render_error(format!("invalid recipient '{recipient}': {e}")))?;
            builder = builder.to(mailbox);
        }

        let html = template::render(message, &ctx.version, &self.branding);
        let logo_type = MimeType::parse("image/svg+xml").map_err(|e| self.render_error(e))?;
        let logo = Attachment::new_inline(LOGO_CID.to_string())
            .body(LOGO_SVG.as_bytes().to_vec(), logo_type);

        builder
            .multipart(
                MultiPart::related()
                    .singlepart(SinglePart::html(html))
                    .singlepart(logo),
            )
            .map_err(|e| self.render_error(e))
    }

    fn build_transport(&self) -> Result<AsyncSmtpTransport<Tokio1Executor>, ChannelError> {
        let host = self.config.resolved_smtp_host().ok_or_else(|| {
            ChannelError::not_configured(self.name(), vec!["user (an address with a domain)"])
        })?;

        let tls = TlsParameters::builder(host.clone())
            .dangerous_accept_invalid_certs(self.config.accept_invalid_certs)
            .build()
            .map_err(|e| ChannelError::transport(self.name(), error_chain(&e)))?;

        let credentials = Credentials::new(
            self.config.user.trim().to_string(),
            self.config.password.clone(),
        );

        Ok(AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(host)
            .port(self.config.smtp_port)
            .tls(Tls::Wrapper(tls))
            .credentials(credentials)
            .timeout(Some(Duration::from_secs(self.config.timeout_secs)))
            .build())
    }
}

#[async_trait]
impl Channel for EmailProvider {
    fn name(&self) -> &'static str {
        "email"
    }

    fn readiness(&self) -> Readiness {
        self.config.readiness()
    }

    async fn send(
        &self,
        message: &Message,
        ctx: &DispatchContext,
    ) -> Result<Delivery, ChannelError> {
        let email = self.build_email(message, ctx)?;
        let transport = self.build_transport()?;

        let response = transport.send(email).await.map_err(|e| {
            // 4xx/5xx replies mean the server answered and refused
            if e.is_permanent() || e.is_transient() {
                ChannelError::protocol(self.name(), None, error_chain(&e))
            } else {
                ChannelError::transport(self.name(), error_chain(&e))
            }
        })?;

        let reply = response.message().collect::<Vec<_>>().join(" ");
        tracing::debug!(channel = self.name(), reply = %reply, "SMTP server accepted message");

        Ok(Delivery {
            status_code: response.code().to_string().parse().ok(),
            notes: Vec::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::notifications::VersionState;

    fn branding() -> Branding {
        Branding {
            name: "notify-hub".to_string(),
            author: "notify-hub contributors".to_string(),
            author_url: "https://example.com".to_string(),
        }
    }

    fn ctx() -> DispatchContext {
        DispatchContext {
            version: VersionState::current("0.1.0", "https://example.com"),
        }
    }

    fn config() -> EmailConfig {
        EmailConfig {
            user: "bot@example.com".to_string(),
            password: "secret".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_build_email_layout() {
        let provider = EmailProvider::new(config(), branding());
        let email = provider
            .build_email(&Message::plain("Daily report", "a < b"), &ctx())
            .unwrap();
        let raw = String::from_utf8_lossy(&email.formatted()).to_string();

        assert!(raw.contains("Subject: Daily report"));
        assert!(raw.contains("multipart/related"));
        assert!(raw.contains("Content-ID: <logo-site.png>"));
        assert!(raw.contains("bot@example.com"));
    }

    #[test]
    fn test_multiple_recipients() {
        let provider = EmailProvider::new(
            EmailConfig {
                to: "a@example.com, b@example.com".to_string(),
                ..config()
            },
            branding(),
        );
        let email = provider
            .build_email(&Message::plain("T", "c"), &ctx())
            .unwrap();
        assert_eq!(email.envelope().to().len(), 2);
    }

    #[test]
    fn test_invalid_recipient_is_render_error() {
        let provider = EmailProvider::new(
            EmailConfig {
                to: "not an address".to_string(),
                ..config()
            },
            branding(),
        );
        let err = provider
            .build_email(&Message::plain("T", "c"), &ctx())
            .unwrap_err();
        assert_eq!(err.kind(), "render");
    }

    #[tokio::test]
    async fn test_closed_port_fails_without_panicking() {
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();

        let provider = EmailProvider::new(
            EmailConfig {
                smtp_host: Some("127.0.0.1".to_string()),
                smtp_port: port,
                timeout_secs: 5,
                ..config()
            },
            branding(),
        );
        let err = provider
            .send(&Message::plain("T", "c"), &ctx())
            .await
            .unwrap_err();
        assert_ne!(err.kind(), "not_configured");
        assert!(!err.to_string().is_empty());
    }
}
