//! Service Catalog entities - admin-defined offerings and their provider mappings

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Static definition of a canonical catalog item, used by bootstrap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogDefinition {
    pub name: &'static str,
    pub display_name: &'static str,
    pub description: &'static str,
    pub resource_kind: &'static str,
}

/// A named offering exposed to consumers.
///
/// Catalog items are owned by administrators and exist whether or not any
/// provider currently fulfills them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: Uuid,

    /// Unique name (e.g. "file", "vm-large")
    pub name: String,

    pub display_name: String,

    pub description: String,

    /// Resource kind that can fulfill this offering
    pub resource_kind: String,

    pub active: bool,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl CatalogItem {
    /// Create a new active catalog item
    pub fn new(
        name: impl Into<String>,
        display_name: impl Into<String>,
        resource_kind: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            display_name: display_name.into(),
            description: String::new(),
            resource_kind: resource_kind.into(),
            active: true,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

impl From<&CatalogDefinition> for CatalogItem {
    fn from(def: &CatalogDefinition) -> Self {
        CatalogItem::new(def.name, def.display_name, def.resource_kind)
            .with_description(def.description)
    }
}

/// Links a catalog item to one provider registration.
///
/// Rows are never deleted. A row is identified by
/// (catalog_name, service_id, resource_kind); for a given
/// (service_id, resource_kind) at most one row is active.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogProviderMapping {
    pub id: Uuid,

    pub catalog_name: String,

    pub service_id: String,

    pub resource_kind: String,

    /// Endpoint consumers are routed to
    pub endpoint: String,

    pub active: bool,

    /// When this row was first created
    pub registered_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl CatalogProviderMapping {
    /// Create a new active mapping
    pub fn new(
        catalog_name: impl Into<String>,
        service_id: impl Into<String>,
        resource_kind: impl Into<String>,
        endpoint: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            catalog_name: catalog_name.into(),
            service_id: service_id.into(),
            resource_kind: resource_kind.into(),
            endpoint: endpoint.into(),
            active: true,
            registered_at: now,
            updated_at: now,
        }
    }

    /// True if this row belongs to the given registration key
    pub fn belongs_to(&self, service_id: &str, resource_kind: &str) -> bool {
        self.service_id == service_id && self.resource_kind == resource_kind
    }
}
