//! Command handlers for CLI operations
//!
//! This module contains handlers for different CLI commands,
//! separating command execution logic from parsing and validation.

pub mod channels;
pub mod check_update;
pub mod schedule;
pub mod send;

pub use channels::ChannelsCommandHandler;
pub use check_update::CheckUpdateCommandHandler;
pub use schedule::ScheduleCommandHandler;
pub use send::SendCommandHandler;
