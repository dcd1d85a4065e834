use std::time::Duration;

use crate::config::HttpConfig;
use crate::error::{AppError, AppResult};

/// User-Agent sent with every request (GitHub's API rejects requests without one)
pub fn user_agent() -> String {
    format!("notify-hub/{}", crate::pkg_version())
}

/// Builds the HTTP client shared by every channel and the version check
///
/// One client is built per process and cloned into each sender; clones
/// share the same connection pool.
///
/// # Features
/// - **Timeouts**: request and connect timeouts from `[http]`
/// - **Connection pooling**: idle connections are reused across a run
/// - **Compression**: gzip responses are decoded transparently
/// - **TLS**: Rustls, no OpenSSL dependency
///
/// # Example
/// ```ignore
/// let client = build_http_client(&settings.http)?;
/// let response = client.get("https://api.example.com/data").send().await?;
/// ```
pub fn build_http_client(config: &HttpConfig) -> AppResult<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .pool_max_idle_per_host(4)
        .pool_idle_timeout(Duration::from_secs(90))
        .gzip(true)
        .user_agent(user_agent())
        .build()
        .map_err(|e| AppError::Configuration {
            key: "http".to_string(),
            source: anyhow::Error::from(e),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_client_initialization() {
        assert!(build_http_client(&HttpConfig::default()).is_ok());
    }

    #[tokio::test]
    async fn test_client_sends_user_agent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(header("user-agent", user_agent().as_str()))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = build_http_client(&HttpConfig::default()).unwrap();
        let response = client.get(server.uri()).send().await.unwrap();
        assert!(response.status().is_success());
    }
}
