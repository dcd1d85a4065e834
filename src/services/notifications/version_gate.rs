//! Release feed check run before every dispatch.
//!
//! The gate is fail-open: whatever goes wrong while fetching or parsing
//! the feed, the run proceeds with "no update available".

use crate::config::VersionCheckConfig;
use serde::Deserialize;
use std::cmp::Ordering;
use std::time::Duration;

/// Version information threaded into every send of a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionState {
    pub has_update: bool,
    pub current_version_label: String,
    pub latest_version_label: String,
    pub release_url: String,
}

impl VersionState {
    /// State used when no newer release is known
    pub fn current(version: impl Into<String>, release_url: impl Into<String>) -> Self {
        let version = version.into();
        Self {
            has_update: false,
            latest_version_label: version.clone(),
            current_version_label: version,
            release_url: release_url.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct Release {
    tag_name: String,
    #[serde(default)]
    html_url: Option<String>,
}

pub struct VersionGate {
    client: reqwest::Client,
    config: VersionCheckConfig,
    current_version: String,
}

impl VersionGate {
    pub fn new(
        client: reqwest::Client,
        config: &VersionCheckConfig,
        current_version: impl Into<String>,
    ) -> Self {
        Self {
            client,
            config: config.clone(),
            current_version: current_version.into(),
        }
    }

    pub fn current_version(&self) -> &str {
        &self.current_version
    }

    fn fallback(&self) -> VersionState {
        VersionState::current(self.current_version.clone(), self.config.homepage.clone())
    }

    /// Fetches the release feed and compares its newest tag to the running version
    pub async fn check(&self) -> VersionState {
        if !self.config.enabled {
            return self.fallback();
        }

        match self.fetch_latest().await {
            Ok(release) => self.state_for(release),
            Err(e) => {
                tracing::debug!(
                    url = %self.config.releases_url,
                    error = %e,
                    "Version check failed, assuming current version"
                );
                self.fallback()
            }
        }
    }

    async fn fetch_latest(&self) -> Result<Release, String> {
        let response = self
            .client
            .get(&self.config.releases_url)
            .header(reqwest::header::ACCEPT, "application/vnd.github+json")
            .timeout(Duration::from_secs(self.config.timeout_secs))
            .send()
            .await
            .map_err(|e| e.to_string())?;

        let status = response.status();
        if !status.is_success() {
            return Err(format!("release feed returned HTTP {}", status.as_u16()));
        }

        let releases: Vec<Release> = response.json().await.map_err(|e| e.to_string())?;
        releases
            .into_iter()
            .next()
            .ok_or_else(|| "release feed is empty".to_string())
    }

    fn state_for(&self, release: Release) -> VersionState {
        let latest = strip_v(release.tag_name.trim());
        let has_update = !latest.is_empty()
            && compare_versions(latest, strip_v(&self.current_version)) == Ordering::Greater;

        let release_url = release
            .html_url
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| self.config.homepage.clone());

        VersionState {
            has_update,
            current_version_label: self.current_version.clone(),
            latest_version_label: latest.to_string(),
            release_url,
        }
    }
}

fn strip_v(tag: &str) -> &str {
    tag.strip_prefix(['v', 'V']).unwrap_or(tag)
}

/// Compares dotted versions component by component.
///
/// Numeric components compare as numbers, anything else as strings.
/// Missing components count as `0` and pre-release or build suffixes
/// (after `-` or `+`) are ignored.
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    let a: Vec<&str> = core_version(a).split('.').collect();
    let b: Vec<&str> = core_version(b).split('.').collect();

    for i in 0..a.len().max(b.len()) {
        let left = a.get(i).copied().unwrap_or("0");
        let right = b.get(i).copied().unwrap_or("0");
        let ordering = match (left.parse::<u64>(), right.parse::<u64>()) {
            (Ok(l), Ok(r)) => l.cmp(&r),
            _ => left.cmp(right),
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    Ordering::Equal
}

fn core_version(version: &str) -> &str {
    let version = version.trim();
    version
        .split_once(['-', '+'])
        .map_or(version, |(core, _)| core)
}
