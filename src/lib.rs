//! notify-hub Library
//!
//! Core library modules for the notify-hub dispatcher: configuration,
//! logging, channel senders and the dispatch orchestrator.

use shadow_rs::shadow;
shadow!(build);

pub mod cli;
pub mod config;
pub mod error;
pub mod external;
pub mod jobs;
pub mod logger;
pub mod models;
pub mod services;

pub use services::notifications::{
    ContentType, Dispatcher, Message, Outcome, OutcomeStatus, RunReport, VersionState,
};

pub fn pkg_version() -> &'static str {
    build::PKG_VERSION
}

pub fn clap_long_version() -> &'static str {
    build::CLAP_LONG_VERSION
}
