//! Command executor for dispatching CLI commands
//!
//! This module provides the main entry point for executing CLI commands
//! after parsing and configuration loading.

use super::handlers::{
    ChannelsCommandHandler, CheckUpdateCommandHandler, ScheduleCommandHandler, SendCommandHandler,
};
use super::parser::{Cli, Commands};
use crate::config::settings::Settings;
use crate::error::AppResult;

/// Execute a CLI command with the given settings
///
/// # Arguments
/// * `cli` - Parsed CLI arguments
/// * `settings` - Merged and validated settings
///
/// # Errors
/// Returns errors from command handlers
pub async fn execute_command(cli: &Cli, settings: Settings) -> AppResult<()> {
    match &cli.command {
        Commands::Send(args) => SendCommandHandler::new(settings).execute(args).await,
        Commands::Channels => ChannelsCommandHandler::new(settings).execute(),
        Commands::CheckUpdate => CheckUpdateCommandHandler::new(settings).execute().await,
        Commands::Schedule { .. } => ScheduleCommandHandler::new(settings).execute().await,
    }
}
