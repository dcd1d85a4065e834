//! Channels command handler
//!
//! Prints every registered channel and whether its settings are complete.

use crate::config::settings::Settings;
use crate::error::AppResult;
use crate::services::notifications::{Dispatcher, Readiness};

/// Handler for the channels command
pub struct ChannelsCommandHandler {
    config: Settings,
}

impl ChannelsCommandHandler {
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    pub fn execute(&self) -> AppResult<()> {
        let dispatcher = Dispatcher::from_settings(&self.config)?;
        let lines = readiness_lines(&dispatcher.readiness());
        for line in &lines {
            println!("{line}");
        }
        Ok(())
    }
}

fn readiness_lines(readiness: &[(&'static str, Readiness)]) -> Vec<String> {
    readiness
        .iter()
        .map(|(name, state)| match state {
            Readiness::Ready => format!("✓ {name:<10} configured"),
            Readiness::NotConfigured { missing } => {
                format!("✗ {name:<10} not configured (missing {})", missing.join(", "))
            }
        })
        .collect()
}
