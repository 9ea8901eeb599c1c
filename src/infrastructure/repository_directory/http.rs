//! HTTP client for the repository directory service

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::domain::repository_directory::{RepositoryChange, RepositoryDirectory};
use crate::domain::DomainError;

const SERVICE: &str = "repository_directory";

/// Connection settings for [`HttpRepositoryDirectory`]
#[derive(Debug, Clone)]
pub struct HttpRepositoryDirectoryConfig {
    /// Base URL; notices are posted to `{base_url}/changes`
    pub base_url: String,
    pub timeout: Duration,
}

impl HttpRepositoryDirectoryConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(10),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Delivers change notices as JSON over HTTP
///
/// Each notice is one `POST {base_url}/changes` with a body such as
/// `{"kind":"add","group":"admin","project":"blog"}`. Any 2xx is success.
#[derive(Debug, Clone)]
pub struct HttpRepositoryDirectory {
    client: Client,
    changes_url: String,
}

impl HttpRepositoryDirectory {
    pub fn new(config: HttpRepositoryDirectoryConfig) -> Result<Self, DomainError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| DomainError::internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            changes_url: format!("{}/changes", config.base_url.trim_end_matches('/')),
        })
    }
}

#[async_trait]
impl RepositoryDirectory for HttpRepositoryDirectory {
    async fn notify(&self, change: &RepositoryChange) -> Result<(), DomainError> {
        debug!(
            kind = %change.kind,
            team = %change.team,
            app = %change.app,
            url = %self.changes_url,
            "Sending repository change"
        );

        let response = self
            .client
            .post(&self.changes_url)
            .json(change)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    DomainError::upstream_timeout(SERVICE, format!("Request timed out: {}", e))
                } else {
                    DomainError::upstream(SERVICE, format!("Request failed: {}", e))
                }
            })?;

        let status = response.status();

        if !status.is_success() {
            let body: String = response
                .text()
                .await
                .unwrap_or_default()
                .chars()
                .take(200)
                .collect();

            return Err(DomainError::upstream(
                SERVICE,
                format!("Unexpected status {}: {}", status.as_u16(), body),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::app::AppName;
    use crate::domain::team::TeamName;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn change() -> RepositoryChange {
        RepositoryChange::add(TeamName::new("admin").unwrap(), AppName::new("blog").unwrap())
    }

    fn directory(server: &MockServer) -> HttpRepositoryDirectory {
        HttpRepositoryDirectory::new(
            HttpRepositoryDirectoryConfig::new(format!("{}/", server.uri()))
                .with_timeout(Duration::from_millis(500)),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_notify_posts_change() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/changes"))
            .and(body_json(serde_json::json!({
                "kind": "add",
                "group": "admin",
                "project": "blog"
            })))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        directory(&server).notify(&change()).await.unwrap();
    }

    #[tokio::test]
    async fn test_notify_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/changes"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let result = directory(&server).notify(&change()).await;

        match result {
            Err(DomainError::Upstream {
                message, timed_out, ..
            }) => {
                assert!(message.contains("500"));
                assert!(message.contains("boom"));
                assert!(!timed_out);
            }
            other => panic!("Expected upstream error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_notify_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
            .mount(&server)
            .await;

        let result = directory(&server).notify(&change()).await;

        assert!(matches!(
            result,
            Err(DomainError::Upstream { timed_out: true, .. })
        ));
    }
}
