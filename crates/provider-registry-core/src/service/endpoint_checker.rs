//! Endpoint reachability checking
//!
//! Checks a provider's endpoint on the usual health paths before the
//! registration is trusted.

use anyhow::Result;
use async_trait::async_trait;
use reqwest::StatusCode;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::config::EndpointCheckConfig;

/// Verifies that a provider endpoint is reachable and healthy
#[async_trait]
pub trait EndpointChecker: Send + Sync {
    async fn check_endpoint(&self, endpoint: &str) -> Result<()>;
}

/// HTTP implementation of [`EndpointChecker`].
///
/// Candidate paths are tried in order. Each path gets one request plus
/// `retries` more when the request fails at the transport level or the
/// provider answers 5xx. Unlike a transport-only retry policy, 5xx answers
/// are retried too. The first 200 or 204 wins.
pub struct HttpEndpointChecker {
    http_client: reqwest::Client,
    paths: Vec<String>,
    retries: u32,
    retry_wait: Duration,
}

impl HttpEndpointChecker {
    /// Create a checker with its own HTTP client using the configured timeout
    pub fn new(config: &EndpointCheckConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self::with_client(http_client, config))
    }

    /// Create with a custom HTTP client (useful for testing)
    pub fn with_client(http_client: reqwest::Client, config: &EndpointCheckConfig) -> Self {
        Self {
            http_client,
            paths: config.paths.clone(),
            retries: config.retries,
            retry_wait: config.retry_wait,
        }
    }

    fn health_url(endpoint: &str, path: &str) -> String {
        format!("{}{}", endpoint.trim_end_matches('/'), path)
    }

    /// Request one URL, retrying transient failures
    async fn fetch_status(&self, url: &str) -> Option<StatusCode> {
        let mut attempt = 0;
        loop {
            let transient = match self.http_client.get(url).send().await {
                Ok(resp) => {
                    let status = resp.status();
                    if status == StatusCode::OK || status == StatusCode::NO_CONTENT {
                        return Some(status);
                    }
                    debug!(url = %url, status = %status, "[EndpointChecker] Unhealthy response");
                    status.is_server_error()
                }
                Err(e) => {
                    debug!(url = %url, error = %e, "[EndpointChecker] Request failed");
                    true
                }
            };

            if !transient || attempt >= self.retries {
                return None;
            }
            attempt += 1;
            tokio::time::sleep(self.retry_wait).await;
        }
    }
}

#[async_trait]
impl EndpointChecker for HttpEndpointChecker {
    async fn check_endpoint(&self, endpoint: &str) -> Result<()> {
        info!(endpoint = %endpoint, "[EndpointChecker] Checking endpoint reachability");

        for path in &self.paths {
            let url = Self::health_url(endpoint, path);
            if let Some(status) = self.fetch_status(&url).await {
                info!(
                    endpoint = %endpoint,
                    path = %path,
                    status = status.as_u16(),
                    "[EndpointChecker] Endpoint is reachable"
                );
                return Ok(());
            }
        }

        warn!(endpoint = %endpoint, "[EndpointChecker] Endpoint is not reachable");
        anyhow::bail!(
            "endpoint {} is not reachable on any standard health path",
            endpoint
        )
    }
}
