//! Configuration settings structures for notify-hub
//!
//! This module defines all configuration structures that can be loaded from
//! TOML files and environment variables.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::error::ConfigError;
use crate::logger::{ConsoleConfig, FileConfig, LogFormat, LoggerConfig};
use crate::models::ChannelsConfig;
use crate::services::notifications::ContentType;

// ============================================================================
// Default value functions
// ============================================================================

fn default_app_name() -> String {
    "notify-hub".to_string()
}

fn default_author() -> String {
    "notify-hub".to_string()
}

fn default_homepage() -> String {
    env!("CARGO_PKG_HOMEPAGE").to_string()
}

fn default_releases_url() -> String {
    "https://api.github.com/repos/notify-hub/notify-hub/releases".to_string()
}

fn default_http_timeout() -> u64 {
    30
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_channel_timeout() -> u64 {
    60
}

fn default_version_check_timeout() -> u64 {
    10
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_log_path() -> String {
    "logs/notify-hub.log".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

// ============================================================================
// Application Configuration
// ============================================================================

/// Branding shown in outgoing email (sender name, footer attribution)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Display name used as email sender name and in the footer
    #[serde(default = "default_app_name")]
    pub name: String,

    /// Attribution in the email footer
    #[serde(default = "default_author")]
    pub author: String,

    /// Link behind the attribution
    #[serde(default = "default_homepage")]
    pub author_url: String,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            author: default_author(),
            author_url: default_homepage(),
        }
    }
}

// ============================================================================
// HTTP / Dispatch Configuration
// ============================================================================

/// Shared HTTP client settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Whole-request timeout in seconds
    #[serde(default = "default_http_timeout")]
    pub timeout_secs: u64,

    /// TCP/TLS connect timeout in seconds
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_http_timeout(),
            connect_timeout_secs: default_connect_timeout(),
        }
    }
}

/// Dispatch run settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchConfig {
    /// Upper bound for one channel attempt, all of its calls included
    #[serde(default = "default_channel_timeout")]
    pub channel_timeout_secs: u64,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            channel_timeout_secs: default_channel_timeout(),
        }
    }
}

// ============================================================================
// Version Check Configuration
// ============================================================================

/// Release feed polled before every dispatch run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionCheckConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// GitHub-style releases JSON array
    #[serde(default = "default_releases_url")]
    pub releases_url: String,

    /// Fallback link when a release entry carries no `html_url`
    #[serde(default = "default_homepage")]
    pub homepage: String,

    #[serde(default = "default_version_check_timeout")]
    pub timeout_secs: u64,
}

impl Default for VersionCheckConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            releases_url: default_releases_url(),
            homepage: default_homepage(),
            timeout_secs: default_version_check_timeout(),
        }
    }
}

// ============================================================================
// Schedule Configuration
// ============================================================================

/// Message pushed on every tick of the `schedule` command
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// Six-field cron expression (seconds first), e.g. `0 0 9 * * *`
    #[serde(default)]
    pub cron: String,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub content: String,

    #[serde(default)]
    pub content_type: ContentType,
}

// ============================================================================
// Logger Settings
// ============================================================================

/// Console output settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsoleSettings {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_true")]
    pub colored: bool,
}

impl Default for ConsoleSettings {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            colored: default_true(),
        }
    }
}

/// File output settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSettings {
    #[serde(default)]
    pub enabled: bool,

    #[serde(default = "default_log_path")]
    pub path: String,

    /// Append to an existing file instead of truncating it
    #[serde(default = "default_true")]
    pub append: bool,

    /// Log format: "full", "compact", or "json"
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for FileSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            path: default_log_path(),
            append: default_true(),
            format: default_log_format(),
        }
    }
}

/// Logger configuration settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggerSettings {
    /// Log level: "trace", "debug", "info", "warn", "error"
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub console: ConsoleSettings,

    #[serde(default)]
    pub file: FileSettings,
}

impl Default for LoggerSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            console: ConsoleSettings::default(),
            file: FileSettings::default(),
        }
    }
}

impl LoggerSettings {
    /// Convert the file representation into the runtime LoggerConfig
    pub fn into_logger_config(self) -> Result<LoggerConfig, ConfigError> {
        let console = ConsoleConfig::new(self.console.enabled, self.console.colored);
        let format = self
            .file
            .format
            .parse::<LogFormat>()
            .map_err(|e| ConfigError::validation("logger.file.format", e.to_string()))?;
        let file = FileConfig::new(
            self.file.enabled,
            PathBuf::from(self.file.path),
            self.file.append,
            format,
        );

        LoggerConfig::new(console, file, self.level)
            .map_err(|e| ConfigError::validation("logger", e.to_string()))
    }
}

// ============================================================================
// Main Settings Structure
// ============================================================================

/// Complete application settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub application: ApplicationConfig,

    #[serde(default)]
    pub logger: LoggerSettings,

    #[serde(default)]
    pub http: HttpConfig,

    #[serde(default)]
    pub dispatch: DispatchConfig,

    #[serde(default)]
    pub version_check: VersionCheckConfig,

    #[serde(default)]
    pub schedule: ScheduleConfig,

    #[serde(default)]
    pub channels: ChannelsConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_default_values() {
        let settings = Settings::default();
        assert_eq!(settings.application.name, "notify-hub");
        assert_eq!(settings.http.timeout_secs, 30);
        assert_eq!(settings.dispatch.channel_timeout_secs, 60);
        assert!(settings.version_check.enabled);
        assert_eq!(settings.schedule.content_type, ContentType::Plain);
        assert_eq!(settings.logger.level, "info");
    }

    #[test]
    fn test_logger_settings_into_logger_config() {
        let settings = LoggerSettings {
            level: "debug".to_string(),
            file: FileSettings {
                enabled: true,
                format: "compact".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };

        let config = settings.into_logger_config().unwrap();
        assert_eq!(config.level, "debug");
        assert!(config.file.enabled);
        assert_eq!(config.file.format, LogFormat::Compact);
    }

    #[test]
    fn test_logger_settings_rejects_unknown_format() {
        let settings = LoggerSettings {
            file: FileSettings {
                format: "yaml".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };

        match settings.into_logger_config() {
            Err(ConfigError::ValidationError { field, .. }) => {
                assert_eq!(field, "logger.file.format")
            }
            other => panic!("Expected ValidationError, got {other:?}"),
        }
    }

    #[test]
    fn test_schedule_content_type_deserializes_lowercase() {
        let toml = r#"
[schedule]
cron = "0 0 9 * * *"
title = "Daily"
content = "<b>hi</b>"
content_type = "html"
"#;
        let settings: Settings = config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()
            .and_then(|c| c.try_deserialize())
            .unwrap();

        assert_eq!(settings.schedule.content_type, ContentType::Html);
        assert_eq!(settings.schedule.cron, "0 0 9 * * *");
    }
}
