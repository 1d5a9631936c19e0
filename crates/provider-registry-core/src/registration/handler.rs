//! Registration handler - orchestrates validation, reachability, registry and catalog
//!
//! # Consistency model
//!
//! ```text
//! Register:    validate ─► check endpoint ─► registry upsert ─► catalog update
//!                  │              │                 │                  │
//!              Validation   EndpointUnreachable  RegistryUpdate    CatalogUpdate
//!              (no writes)    (no writes)        (no writes)   (registry written)
//!
//! Unregister:  lookup ─► catalog deactivate ─► registry delete
//!                │              │                    │
//!             NotFound     CatalogUpdate        RegistryUpdate
//!                        (nothing changed)   (catalog already off)
//! ```
//!
//! The two stores never share a transaction. A failure in the second step
//! leaves the first step applied and is reported to the caller, who heals
//! the state by repeating the call. Register is idempotent for identical
//! arguments, so periodic re-registration converges the registry and the
//! catalog.

use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::error::RegistrationError;
use super::types::RegistrationResult;
use super::validator::Validator;
use crate::domain::{DomainEvent, ProviderMetadata, ProviderStatus, RegisteredProvider};
use crate::event_bus::EventSender;
use crate::repository::{CatalogStore, RegistryStore};
use crate::service::EndpointChecker;

/// Derive the catalog item a registration fulfills.
///
/// Fixed 1:1 policy: the catalog item name is the resource kind.
pub fn catalog_item_for(resource_kind: &str) -> String {
    resource_kind.to_string()
}

/// Handles provider registration requests.
///
/// Stateless: every piece of mutable state lives behind the injected stores,
/// so one handler can be shared across tasks behind an `Arc`.
pub struct RegistrationHandler {
    registry: Arc<dyn RegistryStore>,
    catalog: Arc<dyn CatalogStore>,
    validator: Validator,
    endpoint_checker: Option<Arc<dyn EndpointChecker>>,
    event_sender: Option<EventSender>,
}

impl RegistrationHandler {
    /// Create a handler without endpoint verification or event emission
    pub fn new(registry: Arc<dyn RegistryStore>, catalog: Arc<dyn CatalogStore>) -> Self {
        Self {
            registry,
            catalog,
            validator: Validator::new(),
            endpoint_checker: None,
            event_sender: None,
        }
    }

    pub fn builder() -> RegistrationHandlerBuilder {
        RegistrationHandlerBuilder::new()
    }

    /// Whether registrations are checked for reachability before being stored
    pub fn verifies_endpoints(&self) -> bool {
        self.endpoint_checker.is_some()
    }

    /// Register a provider, or refresh an existing registration for the same key.
    pub async fn register(
        &self,
        service_id: &str,
        resource_kind: &str,
        endpoint: &str,
        metadata: &ProviderMetadata,
        operations: &[String],
    ) -> Result<RegistrationResult, RegistrationError> {
        self.validator
            .validate_registration(service_id, resource_kind, endpoint, metadata, operations)?;

        if let Some(checker) = &self.endpoint_checker {
            checker.check_endpoint(endpoint).await.map_err(|source| {
                warn!(
                    service_id = %service_id,
                    resource_kind = %resource_kind,
                    endpoint = %endpoint,
                    error = %source,
                    "[RegistrationHandler] Endpoint unreachable, rejecting registration"
                );
                RegistrationError::EndpointUnreachable {
                    endpoint: endpoint.to_string(),
                    source,
                }
            })?;
        }

        // A failed lookup is treated like an absent record: the upsert below
        // is the same either way, only registered_at and the message differ.
        let existing = match self.registry.get_provider(service_id, resource_kind).await {
            Ok(existing) => existing,
            Err(e) => {
                warn!(
                    service_id = %service_id,
                    resource_kind = %resource_kind,
                    error = %e,
                    "[RegistrationHandler] Registry lookup failed, treating as new registration"
                );
                None
            }
        };
        let is_update = existing.is_some();

        let now = Utc::now();
        let catalog_item = catalog_item_for(resource_kind);

        let provider = RegisteredProvider {
            service_id: service_id.to_string(),
            resource_kind: resource_kind.to_string(),
            endpoint: endpoint.to_string(),
            metadata: metadata.clone(),
            operations: operations.to_vec(),
            catalog_item: catalog_item.clone(),
            status: ProviderStatus::Active,
            registered_at: existing.as_ref().map(|p| p.registered_at).unwrap_or(now),
            updated_at: now,
        };

        self.registry
            .upsert_provider(&provider)
            .await
            .map_err(|e| {
                RegistrationError::registry_update("failed to update Resource Registry", e)
            })?;

        debug!(
            service_id = %service_id,
            resource_kind = %resource_kind,
            "[RegistrationHandler] Registry updated"
        );

        if let Err(e) = self
            .catalog
            .update_catalog_mapping(service_id, resource_kind, &catalog_item, endpoint)
            .await
        {
            // Registry is already written; the caller's next Register converges it.
            warn!(
                service_id = %service_id,
                resource_kind = %resource_kind,
                catalog_item = %catalog_item,
                error = %e,
                "[RegistrationHandler] Catalog update failed after registry update"
            );
            return Err(RegistrationError::catalog_update(
                "failed to update Service Catalog",
                e,
            ));
        }

        let message = if is_update {
            "Service registration updated successfully"
        } else {
            "Service registered successfully"
        };

        info!(
            service_id = %service_id,
            resource_kind = %resource_kind,
            endpoint = %endpoint,
            update = is_update,
            "[RegistrationHandler] {}",
            message
        );

        self.emit(if is_update {
            DomainEvent::ProviderRegistrationUpdated {
                service_id: provider.service_id.clone(),
                resource_kind: provider.resource_kind.clone(),
                catalog_item,
                endpoint: provider.endpoint.clone(),
                updated_at: provider.updated_at,
            }
        } else {
            DomainEvent::ProviderRegistered {
                service_id: provider.service_id.clone(),
                resource_kind: provider.resource_kind.clone(),
                catalog_item,
                endpoint: provider.endpoint.clone(),
                registered_at: provider.registered_at,
            }
        });

        Ok(RegistrationResult {
            service_id: provider.service_id,
            resource_kind: provider.resource_kind,
            status: provider.status,
            registered_at: provider.registered_at,
            message: message.to_string(),
            updated: is_update,
        })
    }

    /// Remove a registration.
    ///
    /// The catalog mapping is deactivated before the registry record is
    /// deleted, so a failure never leaves the catalog routing to a provider
    /// the registry no longer knows.
    pub async fn unregister(
        &self,
        service_id: &str,
        resource_kind: &str,
    ) -> Result<(), RegistrationError> {
        self.validator.validate_key(service_id, resource_kind)?;

        let existing = self
            .registry
            .get_provider(service_id, resource_kind)
            .await
            .map_err(|e| RegistrationError::registry_update("failed to look up registration", e))?;

        if existing.is_none() {
            return Err(RegistrationError::not_found(service_id, resource_kind));
        }

        self.catalog
            .remove_catalog_mapping(service_id, resource_kind)
            .await
            .map_err(|e| RegistrationError::catalog_update("failed to remove catalog mappings", e))?;

        if let Err(e) = self.registry.delete_provider(service_id, resource_kind).await {
            // Catalog no longer routes here but the registry still has the
            // record; retrying Unregister completes the removal.
            warn!(
                service_id = %service_id,
                resource_kind = %resource_kind,
                error = %e,
                "[RegistrationHandler] Registry delete failed after catalog removal"
            );
            return Err(RegistrationError::registry_update(
                "failed to remove from registry",
                e,
            ));
        }

        info!(
            service_id = %service_id,
            resource_kind = %resource_kind,
            "[RegistrationHandler] Service unregistered"
        );

        self.emit(DomainEvent::ProviderUnregistered {
            service_id: service_id.to_string(),
            resource_kind: resource_kind.to_string(),
        });

        Ok(())
    }

    /// Get one registration
    pub async fn get_registration(
        &self,
        service_id: &str,
        resource_kind: &str,
    ) -> Result<RegisteredProvider, RegistrationError> {
        self.validator.validate_key(service_id, resource_kind)?;

        self.registry
            .get_provider(service_id, resource_kind)
            .await
            .map_err(|e| RegistrationError::registry_update("failed to look up registration", e))?
            .ok_or_else(|| RegistrationError::not_found(service_id, resource_kind))
    }

    /// List all registrations for a resource kind
    pub async fn list_registrations(
        &self,
        resource_kind: &str,
    ) -> Result<Vec<RegisteredProvider>, RegistrationError> {
        self.validator.validate_resource_kind(resource_kind)?;

        self.registry
            .list_providers(resource_kind)
            .await
            .map_err(|e| RegistrationError::registry_update("failed to list providers", e))
    }

    fn emit(&self, event: DomainEvent) {
        if let Some(sender) = &self.event_sender {
            sender.emit(event);
        }
    }
}

/// Builder for [`RegistrationHandler`]
#[derive(Default)]
pub struct RegistrationHandlerBuilder {
    registry: Option<Arc<dyn RegistryStore>>,
    catalog: Option<Arc<dyn CatalogStore>>,
    endpoint_checker: Option<Arc<dyn EndpointChecker>>,
    event_sender: Option<EventSender>,
}

impl RegistrationHandlerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_registry_store(mut self, store: Arc<dyn RegistryStore>) -> Self {
        self.registry = Some(store);
        self
    }

    pub fn with_catalog_store(mut self, store: Arc<dyn CatalogStore>) -> Self {
        self.catalog = Some(store);
        self
    }

    /// Verify endpoint reachability before registering
    pub fn with_endpoint_checker(mut self, checker: Arc<dyn EndpointChecker>) -> Self {
        self.endpoint_checker = Some(checker);
        self
    }

    pub fn with_event_sender(mut self, sender: EventSender) -> Self {
        self.event_sender = Some(sender);
        self
    }

    pub fn build(self) -> anyhow::Result<RegistrationHandler> {
        let registry = self
            .registry
            .ok_or_else(|| anyhow::anyhow!("RegistryStore is required"))?;
        let catalog = self
            .catalog
            .ok_or_else(|| anyhow::anyhow!("CatalogStore is required"))?;

        Ok(RegistrationHandler {
            registry,
            catalog,
            validator: Validator::new(),
            endpoint_checker: self.endpoint_checker,
            event_sender: self.event_sender,
        })
    }
}
