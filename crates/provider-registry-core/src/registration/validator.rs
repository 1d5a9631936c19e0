//! Registration request validation
//!
//! Pure checks with no side effects. Fields are checked in a fixed order and
//! the first failure is the one reported.

use url::Url;
use uuid::Uuid;

use super::error::RegistrationError;
use crate::domain::ProviderMetadata;

/// Validates provider registration requests
#[derive(Debug, Clone, Copy, Default)]
pub struct Validator;

impl Validator {
    pub fn new() -> Self {
        Self
    }

    /// Validate a registration request.
    ///
    /// Order: service_id, resource_kind, endpoint, operations, metadata.
    pub fn validate_registration(
        &self,
        service_id: &str,
        resource_kind: &str,
        endpoint: &str,
        metadata: &ProviderMetadata,
        operations: &[String],
    ) -> Result<(), RegistrationError> {
        validate_service_id(service_id)
            .map_err(|reason| RegistrationError::validation("service_id", reason))?;
        validate_resource_kind(resource_kind)
            .map_err(|reason| RegistrationError::validation("resource_kind", reason))?;
        validate_endpoint(endpoint)
            .map_err(|reason| RegistrationError::validation("endpoint", reason))?;
        validate_operations(operations)
            .map_err(|reason| RegistrationError::validation("operations", reason))?;
        validate_metadata(metadata)
            .map_err(|reason| RegistrationError::validation("metadata", reason))?;
        Ok(())
    }

    /// Validate the key used by lookups and removal
    pub fn validate_key(
        &self,
        service_id: &str,
        resource_kind: &str,
    ) -> Result<(), RegistrationError> {
        if service_id.is_empty() {
            return Err(RegistrationError::validation(
                "service_id",
                "service_id is required",
            ));
        }
        self.validate_resource_kind(resource_kind)
    }

    /// Validate a resource kind on its own (list queries)
    pub fn validate_resource_kind(&self, resource_kind: &str) -> Result<(), RegistrationError> {
        validate_resource_kind(resource_kind)
            .map_err(|reason| RegistrationError::validation("resource_kind", reason))
    }
}

fn validate_service_id(service_id: &str) -> Result<(), String> {
    if service_id.is_empty() {
        return Err("service_id is required".to_string());
    }

    Uuid::parse_str(service_id)
        .map_err(|e| format!("service_id must be a valid UUID: {}", e))?;

    Ok(())
}

fn validate_resource_kind(resource_kind: &str) -> Result<(), String> {
    if resource_kind.is_empty() {
        return Err("resource_kind is required".to_string());
    }
    Ok(())
}

fn validate_endpoint(endpoint: &str) -> Result<(), String> {
    if endpoint.is_empty() {
        return Err("endpoint is required".to_string());
    }

    let url = Url::parse(endpoint).map_err(|e| format!("endpoint must be a valid URL: {}", e))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err("endpoint must use http or https scheme".to_string());
    }

    // The URL parser fills in a host for "http:///x" or "http:host"; require
    // an explicit, non-empty authority in the raw string.
    let has_authority = endpoint
        .split_once("://")
        .map(|(_, rest)| !rest.is_empty() && !rest.starts_with('/'))
        .unwrap_or(false);
    if !has_authority {
        return Err("endpoint must have a valid host".to_string());
    }

    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(()),
        _ => Err("endpoint must have a valid host".to_string()),
    }
}

fn validate_operations(operations: &[String]) -> Result<(), String> {
    if operations.is_empty() {
        return Err("at least one operation is required".to_string());
    }

    if operations.iter().any(|op| op.is_empty()) {
        return Err("operation cannot be empty".to_string());
    }

    Ok(())
}

fn validate_metadata(metadata: &ProviderMetadata) -> Result<(), String> {
    if metadata.zone.is_empty() {
        return Err("metadata.zone is required".to_string());
    }

    if metadata.region.is_empty() {
        return Err("metadata.region is required".to_string());
    }

    Ok(())
}
