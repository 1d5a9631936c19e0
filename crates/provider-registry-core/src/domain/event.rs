//! Domain Events - facts emitted after registry and catalog mutations
//!
//! Events are emitted by the registration handler and catalog bootstrap
//! only after an operation fully succeeds. A reconciliation or audit
//! consumer can subscribe through the [`EventBus`](crate::event_bus::EventBus).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DomainEvent {
    /// First registration of a (service_id, resource_kind) key
    ProviderRegistered {
        service_id: String,
        resource_kind: String,
        catalog_item: String,
        endpoint: String,
        registered_at: DateTime<Utc>,
    },

    /// Re-registration of an existing key
    ProviderRegistrationUpdated {
        service_id: String,
        resource_kind: String,
        catalog_item: String,
        endpoint: String,
        updated_at: DateTime<Utc>,
    },

    /// Registration removed from registry and catalog
    ProviderUnregistered {
        service_id: String,
        resource_kind: String,
    },

    /// Canonical catalog item created by bootstrap
    CatalogItemSeeded { name: String, resource_kind: String },
}

impl DomainEvent {
    /// Stable snake_case name of the event type
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::ProviderRegistered { .. } => "provider_registered",
            Self::ProviderRegistrationUpdated { .. } => "provider_registration_updated",
            Self::ProviderUnregistered { .. } => "provider_unregistered",
            Self::CatalogItemSeeded { .. } => "catalog_item_seeded",
        }
    }

    /// Service identity the event concerns, if any
    pub fn service_id(&self) -> Option<&str> {
        match self {
            Self::ProviderRegistered { service_id, .. }
            | Self::ProviderRegistrationUpdated { service_id, .. }
            | Self::ProviderUnregistered { service_id, .. } => Some(service_id),
            Self::CatalogItemSeeded { .. } => None,
        }
    }

    /// Resource kind the event concerns
    pub fn resource_kind(&self) -> &str {
        match self {
            Self::ProviderRegistered { resource_kind, .. }
            | Self::ProviderRegistrationUpdated { resource_kind, .. }
            | Self::ProviderUnregistered { resource_kind, .. }
            | Self::CatalogItemSeeded { resource_kind, .. } => resource_kind,
        }
    }
}
