//! Configuration validation logic
//!
//! Validation checks shape only (positive timeouts, parseable URLs, known
//! log levels). Whether a channel has everything it needs to send is a
//! separate readiness question answered per run by the resolver, so an
//! empty channel section is never a validation error here.

use reqwest::{Method, Url};

use crate::config::error::ConfigError;
use crate::config::settings::{
    DispatchConfig, HttpConfig, LoggerSettings, ScheduleConfig, Settings, VersionCheckConfig,
};
use crate::models::ChannelsConfig;

/// Valid log levels
const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Valid log formats
const VALID_LOG_FORMATS: &[&str] = &["full", "compact", "json"];

/// Valid Bark interruption levels
const VALID_BARK_LEVELS: &[&str] = &["passive", "active", "timeSensitive"];

/// Checks a URL field when it is set; blank means "not configured"
fn validate_optional_url(field: &str, value: &str) -> Result<(), ConfigError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(());
    }

    let url = Url::parse(value)
        .map_err(|_| ConfigError::validation(field, format!("Invalid URL format: {value}")))?;

    if url.scheme() != "https" && url.scheme() != "http" {
        return Err(ConfigError::validation(
            field,
            "URL must use http or https protocol",
        ));
    }

    Ok(())
}

fn validate_positive(field: &str, value: u64) -> Result<(), ConfigError> {
    if value == 0 {
        return Err(ConfigError::validation(
            field,
            "Timeout must be greater than 0 seconds.",
        ));
    }
    Ok(())
}

impl HttpConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_positive("http.timeout_secs", self.timeout_secs)?;
        validate_positive("http.connect_timeout_secs", self.connect_timeout_secs)
    }
}

impl DispatchConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_positive("dispatch.channel_timeout_secs", self.channel_timeout_secs)
    }
}

impl VersionCheckConfig {
    /// The releases URL is only required while the check is enabled
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.enabled {
            return Ok(());
        }
        if self.releases_url.trim().is_empty() {
            return Err(ConfigError::validation(
                "version_check.releases_url",
                "Releases URL is required while the version check is enabled.",
            ));
        }
        validate_optional_url("version_check.releases_url", &self.releases_url)?;
        validate_positive("version_check.timeout_secs", self.timeout_secs)
    }
}

impl ScheduleConfig {
    /// Validate the scheduled message
    ///
    /// Only called by the `schedule` command; the other commands never
    /// read this section.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cron.trim().is_empty() {
            return Err(ConfigError::validation(
                "schedule.cron",
                "A cron expression is required to run the scheduler.",
            ));
        }
        if self.title.trim().is_empty() {
            return Err(ConfigError::validation(
                "schedule.title",
                "Scheduled messages need a title.",
            ));
        }
        Ok(())
    }
}

impl LoggerSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let level = self.level.to_lowercase();
        if !VALID_LOG_LEVELS.contains(&level.as_str()) {
            return Err(ConfigError::validation(
                "logger.level",
                format!(
                    "Invalid log level '{}'. Valid levels are: {}",
                    self.level,
                    VALID_LOG_LEVELS.join(", ")
                ),
            ));
        }

        let format = self.file.format.to_lowercase();
        if !VALID_LOG_FORMATS.contains(&format.as_str()) {
            return Err(ConfigError::validation(
                "logger.file.format",
                format!(
                    "Invalid log format '{}'. Valid formats are: {}",
                    self.file.format,
                    VALID_LOG_FORMATS.join(", ")
                ),
            ));
        }

        if !self.console.enabled && !self.file.enabled {
            return Err(ConfigError::validation(
                "logger",
                "At least one output (console or file) must be enabled",
            ));
        }

        if self.file.enabled && self.file.path.trim().is_empty() {
            return Err(ConfigError::validation(
                "logger.file.path",
                "File path cannot be empty when file output is enabled",
            ));
        }

        Ok(())
    }
}

impl ChannelsConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.email.smtp_port == 0 {
            return Err(ConfigError::validation(
                "channels.email.smtp_port",
                "SMTP port must be between 1 and 65535.",
            ));
        }
        validate_positive("channels.email.timeout_secs", self.email.timeout_secs)?;

        validate_optional_url("channels.dingtalk.webhook_url", &self.dingtalk.webhook_url)?;
        validate_optional_url("channels.wecom.webhook_url", &self.wecom.webhook_url)?;
        validate_optional_url("channels.feishu.webhook_url", &self.feishu.webhook_url)?;
        validate_optional_url("channels.aibotk.hook_url", &self.aibotk.hook_url)?;
        validate_optional_url("channels.pushplus.api_url", &self.pushplus.api_url)?;
        validate_optional_url("channels.serverchan.base_url", &self.serverchan.base_url)?;
        validate_optional_url("channels.bark.server_url", &self.bark.server_url)?;
        validate_optional_url("channels.webhook.url", &self.webhook.url)?;

        if let Some(level) = &self.bark.level
            && !VALID_BARK_LEVELS.contains(&level.as_str())
        {
            return Err(ConfigError::validation(
                "channels.bark.level",
                "Level must be one of: passive, active, timeSensitive",
            ));
        }

        self.webhook.method.parse::<Method>().map_err(|_| {
            ConfigError::validation(
                "channels.webhook.method",
                format!("Invalid HTTP method: {}", self.webhook.method),
            )
        })?;

        Ok(())
    }
}

impl Settings {
    /// Validate every section that all commands depend on
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.logger.validate()?;
        self.http.validate()?;
        self.dispatch.validate()?;
        self.version_check.validate()?;
        self.channels.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field_of(result: Result<(), ConfigError>) -> String {
        match result {
            Err(ConfigError::ValidationError { field, .. }) => field,
            other => panic!("Expected ValidationError, got {other:?}"),
        }
    }

    #[test]
    fn test_default_settings_are_valid() {
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn test_zero_http_timeout_rejected() {
        let mut settings = Settings::default();
        settings.http.timeout_secs = 0;
        assert_eq!(field_of(settings.validate()), "http.timeout_secs");
    }

    #[test]
    fn test_invalid_webhook_url_rejected() {
        let mut settings = Settings::default();
        settings.channels.feishu.webhook_url = "not a url".to_string();
        assert_eq!(field_of(settings.validate()), "channels.feishu.webhook_url");
    }

    #[test]
    fn test_non_http_scheme_rejected() {
        let mut settings = Settings::default();
        settings.channels.dingtalk.webhook_url = "ftp://example.com/hook".to_string();
        assert_eq!(field_of(settings.validate()), "channels.dingtalk.webhook_url");
    }

    #[test]
    fn test_blank_channel_urls_are_not_errors() {
        let mut settings = Settings::default();
        settings.channels.wecom.webhook_url = "   ".to_string();
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_invalid_log_level_rejected() {
        let mut settings = Settings::default();
        settings.logger.level = "loud".to_string();
        assert_eq!(field_of(settings.validate()), "logger.level");
    }

    #[test]
    fn test_disabled_version_check_skips_url() {
        let mut settings = Settings::default();
        settings.version_check.enabled = false;
        settings.version_check.releases_url = String::new();
        assert!(settings.validate().is_ok());

        settings.version_check.enabled = true;
        assert_eq!(field_of(settings.validate()), "version_check.releases_url");
    }

    #[test]
    fn test_invalid_bark_level_rejected() {
        let mut settings = Settings::default();
        settings.channels.bark.level = Some("loud".to_string());
        assert_eq!(field_of(settings.validate()), "channels.bark.level");
    }

    #[test]
    fn test_invalid_webhook_method_rejected() {
        let mut settings = Settings::default();
        settings.channels.webhook.method = "PO ST".to_string();
        assert_eq!(field_of(settings.validate()), "channels.webhook.method");
    }

    #[test]
    fn test_schedule_requires_cron_and_title() {
        let mut schedule = ScheduleConfig::default();
        assert_eq!(field_of(schedule.validate()), "schedule.cron");

        schedule.cron = "0 0 9 * * *".to_string();
        assert_eq!(field_of(schedule.validate()), "schedule.title");

        schedule.title = "Daily report".to_string();
        assert!(schedule.validate().is_ok());
    }
}
