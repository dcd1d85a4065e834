//! Send command handler
//!
//! Builds the message from the command line, runs one dispatch and prints
//! the per-channel report.

use crate::cli::parser::SendArgs;
use crate::config::settings::Settings;
use crate::error::{AppError, AppResult};
use crate::services::notifications::{ContentType, Dispatcher, Message};

/// Handler for the send command
pub struct SendCommandHandler {
    config: Settings,
}

impl SendCommandHandler {
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    /// Runs one dispatch
    ///
    /// # Errors
    /// - Content file cannot be read
    /// - HTTP client cannot be built
    /// - Strict mode and no channel delivered the message
    pub async fn execute(&self, args: &SendArgs) -> AppResult<()> {
        let message = build_message(args)?;
        let dispatcher = Dispatcher::from_settings(&self.config)?;

        let report = dispatcher.push_message(&message).await;
        println!("{report}");

        if args.strict && report.delivered() == 0 {
            return Err(AppError::Delivery {
                message: format!("no channel delivered the message ({})", report.summary()),
            });
        }
        Ok(())
    }
}

/// Reads the body from `--content` or `--content-file`
pub fn build_message(args: &SendArgs) -> AppResult<Message> {
    let content = match (&args.content, &args.content_file) {
        (Some(content), _) => content.clone(),
        (None, Some(path)) => std::fs::read_to_string(path).map_err(|source| AppError::Io {
            context: format!("reading content file '{}'", path.display()),
            source,
        })?,
        (None, None) => {
            return Err(AppError::BadRequest {
                message: "either --content or --content-file is required".to_string(),
            });
        }
    };

    let content_type = if args.html {
        ContentType::Html
    } else {
        ContentType::Plain
    };
    Ok(Message::new(args.title.trim(), content, content_type))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn args() -> SendArgs {
        SendArgs {
            title: " Report ".to_string(),
            content: None,
            content_file: None,
            html: false,
            strict: false,
        }
    }

    #[test]
    fn test_inline_content() {
        let message = build_message(&SendArgs {
            content: Some("a < b".to_string()),
            ..args()
        })
        .unwrap();
        assert_eq!(message.title(), "Report");
        assert_eq!(message.content(), "a < b");
        assert!(!message.is_html());
    }

    #[test]
    fn test_content_file_as_html() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("body.html");
        std::fs::write(&path, "<h1>hi</h1>").unwrap();

        let message = build_message(&SendArgs {
            content_file: Some(path),
            html: true,
            ..args()
        })
        .unwrap();
        assert_eq!(message.content(), "<h1>hi</h1>");
        assert!(message.is_html());
    }

    #[test]
    fn test_missing_content_file_is_io_error() {
        let err = build_message(&SendArgs {
            content_file: Some("/definitely/not/here.txt".into()),
            ..args()
        })
        .unwrap_err();
        assert!(matches!(err, AppError::Io { .. }));
    }

    #[tokio::test]
    async fn test_non_strict_send_succeeds_with_nothing_configured() {
        let mut settings = Settings::default();
        settings.version_check.enabled = false;

        let handler = SendCommandHandler::new(settings);
        let result = handler
            .execute(&SendArgs {
                content: Some("c".to_string()),
                ..args()
            })
            .await;
        assert!(result.is_ok());
    }
}
