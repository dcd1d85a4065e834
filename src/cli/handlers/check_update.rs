//! Check-update command handler

use crate::config::settings::Settings;
use crate::error::AppResult;
use crate::external::build_http_client;
use crate::services::notifications::{VersionGate, VersionState};

/// Handler for the check-update command
pub struct CheckUpdateCommandHandler {
    config: Settings,
}

impl CheckUpdateCommandHandler {
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    pub async fn execute(&self) -> AppResult<()> {
        if !self.config.version_check.enabled {
            println!("Version check is disabled (version_check.enabled = false)");
            return Ok(());
        }

        let client = build_http_client(&self.config.http)?;
        let gate = VersionGate::new(client, &self.config.version_check, crate::pkg_version());
        println!("{}", describe(&gate.check().await));
        Ok(())
    }
}

fn describe(state: &VersionState) -> String {
    if state.has_update {
        format!(
            "Update available: {} -> {} ({})",
            state.current_version_label, state.latest_version_label, state.release_url
        )
    } else {
        format!("Up to date ({})", state.current_version_label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe() {
        assert_eq!(
            describe(&VersionState::current("0.1.0", "https://example.com")),
            "Up to date (0.1.0)"
        );

        let state = VersionState {
            has_update: true,
            current_version_label: "0.1.0".to_string(),
            latest_version_label: "0.2.0".to_string(),
            release_url: "https://example.com/v0.2.0".to_string(),
        };
        assert_eq!(
            describe(&state),
            "Update available: 0.1.0 -> 0.2.0 (https://example.com/v0.2.0)"
        );
    }

    #[tokio::test]
    async fn test_disabled_check_succeeds_offline() {
        let mut settings = Settings::default();
        settings.version_check.enabled = false;
        assert!(CheckUpdateCommandHandler::new(settings).execute().await.is_ok());
    }
}
