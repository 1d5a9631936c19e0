//! Registration request/response types shared by the handler and the client

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{ProviderMetadata, ProviderStatus};

/// Outcome of a successful Register call.
///
/// Serialized field set matches the Register response body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistrationResult {
    pub service_id: String,
    pub resource_kind: String,
    pub status: ProviderStatus,

    /// Original registration time, preserved across updates
    pub registered_at: DateTime<Utc>,

    #[serde(default)]
    pub message: String,

    /// True when an existing registration was refreshed
    #[serde(skip)]
    pub updated: bool,
}

/// Body a provider sends to register for one resource kind.
///
/// The resource kind travels in the request path, not in the body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistrationRequest {
    pub service_id: String,
    pub endpoint: String,
    pub metadata: ProviderMetadata,
    pub operations: Vec<String>,
}

impl RegistrationRequest {
    pub fn new(
        service_id: impl Into<String>,
        endpoint: impl Into<String>,
        metadata: ProviderMetadata,
        operations: Vec<String>,
    ) -> Self {
        Self {
            service_id: service_id.into(),
            endpoint: endpoint.into(),
            metadata,
            operations,
        }
    }
}
