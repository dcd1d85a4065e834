//! CLI argument parsing with clap
//!
//! This module defines the command-line interface structure using clap,
//! including all commands, arguments, and their documentation.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Push one message to every configured notification channel
#[derive(Parser, Debug)]
#[command(name = "notify-hub")]
#[command(about = "Push one message to every configured notification channel")]
#[command(long_about = "
notify-hub delivers a message to every configured channel (email, DingTalk,
WeCom, Aibotk, PushPlus, ServerChan, Feishu, Bark and a generic webhook) and
reports one outcome per channel. Channels without credentials are skipped.

EXAMPLES:
    # Send a plain-text message
    notify-hub send --title \"Backup done\" --content \"42 files copied\"

    # Send an HTML body read from a file, fail if nothing was delivered
    notify-hub send --title \"Daily report\" --content-file report.html --html --strict

    # Show which channels are configured
    notify-hub channels

    # Check whether a newer release is available
    notify-hub check-update

    # Push the configured scheduled message every day at 09:00
    notify-hub schedule --cron \"0 0 9 * * *\"

    # Use a custom configuration file with verbose logging
    notify-hub --config /etc/notify-hub/config.toml --verbose send --title T --content C

Every setting can also be given as an environment variable, for example
NOTIFY_HUB_CHANNELS__EMAIL__USER=bot@example.com.
")]
#[command(version = crate::clap_long_version())]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path
    ///
    /// Use exactly this TOML file instead of the layered `config/` directory.
    /// The file must exist and be readable.
    ///
    /// Example: --config /etc/notify-hub/config.toml
    #[arg(
        short,
        long,
        global = true,
        value_name = "FILE",
        value_parser = super::validation::validate_config_file_path
    )]
    pub config: Option<PathBuf>,

    /// Override environment detection
    ///
    /// Selects which `{environment}.toml` is layered over `default.toml`.
    ///
    /// Available values: development (dev), test, staging (stage), production (prod)
    #[arg(short, long, global = true, value_enum)]
    pub env: Option<Environment>,

    /// Enable verbose logging
    ///
    /// Increases log output to debug level. Cannot be used with --quiet.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    ///
    /// Reduces log output to error level only. Cannot be used with --verbose.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log level override
    ///
    /// Takes precedence over the configuration file and --verbose/--quiet.
    #[arg(long, global = true, value_enum)]
    pub log_level: Option<LogLevel>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Deliver one message to every configured channel
    ///
    /// Prints one line per channel. Exits non-zero in --strict mode when no
    /// channel delivered the message.
    ///
    /// Examples:
    ///   notify-hub send --title T --content C
    ///   notify-hub send --title T --content-file body.html --html
    Send(SendArgs),

    /// List every channel and whether it is configured
    ///
    /// Reads configuration only, no network access.
    Channels,

    /// Check the release feed for a newer version
    CheckUpdate,

    /// Push the scheduled message on a cron schedule until Ctrl-C
    ///
    /// The message comes from the `[schedule]` configuration section.
    ///
    /// Examples:
    ///   notify-hub schedule
    ///   notify-hub schedule --cron "0 30 8 * * Mon-Fri"
    Schedule {
        /// Cron expression overriding `schedule.cron` (seconds first)
        #[arg(long, value_name = "EXPR", value_parser = super::validation::validate_non_blank)]
        cron: Option<String>,
    },
}

/// Arguments of the `send` command
#[derive(Args, Debug, Clone)]
pub struct SendArgs {
    /// Message title (email subject, card header)
    #[arg(short, long, value_parser = super::validation::validate_non_blank)]
    pub title: String,

    /// Message body
    #[arg(
        short = 'm',
        long,
        conflicts_with = "content_file",
        required_unless_present = "content_file"
    )]
    pub content: Option<String>,

    /// Read the message body from a file
    #[arg(long, value_name = "FILE", value_parser = super::validation::validate_content_file_path)]
    pub content_file: Option<PathBuf>,

    /// Treat the body as HTML instead of plain text
    #[arg(long)]
    pub html: bool,

    /// Exit with an error when no channel delivered the message
    #[arg(long)]
    pub strict: bool,
}

/// Environment options
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum Environment {
    #[value(name = "development", alias = "dev")]
    Development,
    #[value(name = "test")]
    Test,
    #[value(name = "staging", alias = "stage")]
    Staging,
    #[value(name = "production", alias = "prod")]
    Production,
}

/// Log level options
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum LogLevel {
    #[value(name = "error")]
    Error,
    #[value(name = "warn", alias = "warning")]
    Warn,
    #[value(name = "info")]
    Info,
    #[value(name = "debug")]
    Debug,
    #[value(name = "trace")]
    Trace,
}

impl Cli {
    /// Log level implied by the global flags, if any
    pub fn log_level_override(&self) -> Option<String> {
        if let Some(level) = self.log_level {
            return Some(level.into());
        }
        if self.verbose {
            Some("debug".to_string())
        } else if self.quiet {
            Some("error".to_string())
        } else {
            None
        }
    }
}

impl From<LogLevel> for String {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => "error".to_string(),
            LogLevel::Warn => "warn".to_string(),
            LogLevel::Info => "info".to_string(),
            LogLevel::Debug => "debug".to_string(),
            LogLevel::Trace => "trace".to_string(),
        }
    }
}

impl From<Environment> for crate::config::Environment {
    fn from(env: Environment) -> Self {
        match env {
            Environment::Development => crate::config::Environment::Development,
            Environment::Test => crate::config::Environment::Test,
            Environment::Staging => crate::config::Environment::Staging,
            Environment::Production => crate::config::Environment::Production,
        }
    }
}
