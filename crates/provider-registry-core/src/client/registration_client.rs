//! HTTP client a provider uses to register itself with the directory.
//!
//! Endpoints:
//! - `POST   {base}/resource/{kind}/provider`       register
//! - `GET    {base}/resource/{kind}/provider/{id}`  current registration
//! - `DELETE {base}/resource/{kind}/provider/{id}`  unregister

use anyhow::{Context as _, Result};
use reqwest::StatusCode;
use std::time::Duration;
use tracing::{debug, info};

use crate::registration::{RegistrationRequest, RegistrationResult};

/// Default request timeout
pub const DEFAULT_CLIENT_TIMEOUT: Duration = Duration::from_secs(30);

pub struct RegistrationClient {
    base_url: String,
    client: reqwest::Client,
}

impl RegistrationClient {
    /// Create a client with the default timeout
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::with_timeout(base_url, DEFAULT_CLIENT_TIMEOUT)
    }

    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self::with_client(base_url, client))
    }

    /// Create with a custom HTTP client (useful for testing)
    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn provider_url(&self, resource_kind: &str) -> String {
        format!("{}/resource/{}/provider", self.base_url, resource_kind)
    }

    /// Register (or re-register) for a resource kind
    pub async fn register(
        &self,
        resource_kind: &str,
        request: &RegistrationRequest,
    ) -> Result<RegistrationResult> {
        let url = self.provider_url(resource_kind);
        debug!(url = %url, service_id = %request.service_id, "[RegistrationClient] Registering");

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .context("registration request failed")?;

        let status = response.status();
        let body = response.text().await.context("failed to read response")?;

        if status != StatusCode::OK {
            anyhow::bail!("registration failed with status {}: {}", status.as_u16(), body);
        }

        let result: RegistrationResult =
            serde_json::from_str(&body).context("failed to parse response")?;

        info!(
            service_id = %result.service_id,
            resource_kind = %result.resource_kind,
            message = %result.message,
            "[RegistrationClient] Registered"
        );

        Ok(result)
    }

    /// Remove the registration for a resource kind
    pub async fn unregister(&self, resource_kind: &str, service_id: &str) -> Result<()> {
        let url = format!("{}/{}", self.provider_url(resource_kind), service_id);

        let response = self
            .client
            .delete(&url)
            .send()
            .await
            .context("unregister request failed")?;

        let status = response.status();
        if status != StatusCode::OK && status != StatusCode::NO_CONTENT {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("unregister failed with status {}: {}", status.as_u16(), body);
        }

        info!(
            service_id = %service_id,
            resource_kind = %resource_kind,
            "[RegistrationClient] Unregistered"
        );
        Ok(())
    }

    /// Fetch the current registration
    pub async fn get_registration(
        &self,
        resource_kind: &str,
        service_id: &str,
    ) -> Result<RegistrationResult> {
        let url = format!("{}/{}", self.provider_url(resource_kind), service_id);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .context("get request failed")?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("get failed with status {}: {}", status.as_u16(), body);
        }

        response
            .json::<RegistrationResult>()
            .await
            .context("failed to parse response")
    }
}
