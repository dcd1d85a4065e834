//! Configuration merger for CLI arguments and config files
//!
//! This module handles merging CLI argument overrides with file-based configuration,
//! implementing the configuration precedence logic.

use super::parser::{Cli, Commands};
use crate::config::error::ConfigError;
use crate::config::{ConfigLoader, settings::Settings};

/// Configuration merger that handles CLI argument integration with file-based configuration
///
/// CLI arguments override every configuration source.
pub struct ConfigurationMerger {
    base_config: Settings,
}

impl ConfigurationMerger {
    /// Create a new configuration merger with base configuration
    pub fn new(base_config: Settings) -> Self {
        Self { base_config }
    }

    /// Loads the base configuration selected by `--config` and `--env`
    ///
    /// # Errors
    /// Returns ConfigError if configuration loading or validation fails
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        let mut loader = ConfigLoader::new()?;
        if let Some(path) = &cli.config {
            loader = loader.with_config_file(path.clone());
        }
        if let Some(env) = cli.env {
            loader = loader.with_environment(env.into());
        }

        Ok(Self::new(loader.load()?))
    }

    /// Merge CLI arguments with the base configuration
    ///
    /// # Returns
    /// A new Settings instance with CLI overrides applied
    pub fn merge_cli_args(&self, cli: &Cli) -> Result<Settings, ConfigError> {
        let mut config = self.base_config.clone();

        // Apply global CLI overrides
        if let Some(level) = cli.log_level_override() {
            config.logger.level = level;
        }

        // Apply command-specific overrides
        if let Commands::Schedule { cron: Some(cron) } = &cli.command {
            config.schedule.cron = cron.clone();
        }

        // Validate the merged configuration
        config.validate()?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_verbose_overrides_log_level() {
        let cli = Cli::try_parse_from(["notify-hub", "--verbose", "channels"]).unwrap();
        let merged = ConfigurationMerger::new(Settings::default())
            .merge_cli_args(&cli)
            .unwrap();
        assert_eq!(merged.logger.level, "debug");
    }

    #[test]
    fn test_without_flags_keeps_file_level() {
        let mut base = Settings::default();
        base.logger.level = "warn".to_string();

        let cli = Cli::try_parse_from(["notify-hub", "channels"]).unwrap();
        let merged = ConfigurationMerger::new(base).merge_cli_args(&cli).unwrap();
        assert_eq!(merged.logger.level, "warn");
    }

    #[test]
    fn test_schedule_cron_override() {
        let mut base = Settings::default();
        base.schedule.cron = "0 0 9 * * *".to_string();

        let cli =
            Cli::try_parse_from(["notify-hub", "schedule", "--cron", "0 30 18 * * *"]).unwrap();
        let merged = ConfigurationMerger::new(base).merge_cli_args(&cli).unwrap();
        assert_eq!(merged.schedule.cron, "0 30 18 * * *");
    }
}
