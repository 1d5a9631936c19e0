//! Registration error taxonomy
//!
//! Every failure of a handler operation is one of five kinds. Transport
//! layers map them to status codes with [`RegistrationError::code`] and
//! [`RegistrationError::is_client_error`].

use thiserror::Error;

pub const ERR_CODE_VALIDATION: &str = "VALIDATION_ERROR";
pub const ERR_CODE_NOT_FOUND: &str = "PROVIDER_NOT_FOUND";
pub const ERR_CODE_REGISTRY_UPDATE: &str = "REGISTRY_UPDATE_FAILED";
pub const ERR_CODE_CATALOG_UPDATE: &str = "CATALOG_UPDATE_FAILED";
pub const ERR_CODE_ENDPOINT_UNREACHABLE: &str = "ENDPOINT_UNREACHABLE";

#[derive(Debug, Error)]
pub enum RegistrationError {
    /// Bad input; nothing was read or written
    #[error("invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    /// Endpoint check failed before any store access
    #[error("Provider endpoint {endpoint} is unreachable")]
    EndpointUnreachable {
        endpoint: String,
        #[source]
        source: anyhow::Error,
    },

    /// Resource Registry read or write failed
    #[error("{message}")]
    RegistryUpdate {
        message: String,
        #[source]
        source: anyhow::Error,
    },

    /// Service Catalog write failed. During Register the registry has
    /// already been updated when this is returned.
    #[error("{message}")]
    CatalogUpdate {
        message: String,
        #[source]
        source: anyhow::Error,
    },

    /// No registration for the key
    #[error("Service {service_id} with resource kind {resource_kind} not found")]
    NotFound {
        service_id: String,
        resource_kind: String,
    },
}

impl RegistrationError {
    pub(crate) fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field,
            reason: reason.into(),
        }
    }

    pub(crate) fn registry_update(message: impl Into<String>, source: anyhow::Error) -> Self {
        Self::RegistryUpdate {
            message: message.into(),
            source,
        }
    }

    pub(crate) fn catalog_update(message: impl Into<String>, source: anyhow::Error) -> Self {
        Self::CatalogUpdate {
            message: message.into(),
            source,
        }
    }

    pub(crate) fn not_found(service_id: &str, resource_kind: &str) -> Self {
        Self::NotFound {
            service_id: service_id.to_string(),
            resource_kind: resource_kind.to_string(),
        }
    }

    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation { .. } => ERR_CODE_VALIDATION,
            Self::EndpointUnreachable { .. } => ERR_CODE_ENDPOINT_UNREACHABLE,
            Self::RegistryUpdate { .. } => ERR_CODE_REGISTRY_UPDATE,
            Self::CatalogUpdate { .. } => ERR_CODE_CATALOG_UPDATE,
            Self::NotFound { .. } => ERR_CODE_NOT_FOUND,
        }
    }

    /// True when the caller can fix the request; false when the server side
    /// failed and the call should be retried.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Validation { .. } | Self::NotFound { .. })
    }

    /// Field named by a validation failure
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::Validation { field, .. } => Some(*field),
            _ => None,
        }
    }
}
