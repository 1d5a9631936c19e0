//! RegisteredProvider entity - one provider's fulfillment of one resource kind

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Placement and capacity hints a provider announces about itself
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderMetadata {
    /// Availability zone (e.g. "datacenter-east")
    pub zone: String,

    /// Region (e.g. "us-east")
    pub region: String,

    /// Optional free-form resource constraints (e.g. "max_cpu" -> "16")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_constraints: Option<HashMap<String, String>>,
}

impl ProviderMetadata {
    pub fn new(zone: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            zone: zone.into(),
            region: region.into(),
            resource_constraints: None,
        }
    }

    /// Add a single resource constraint
    pub fn with_constraint(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.resource_constraints
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }
}

/// Lifecycle status of a registration.
///
/// The engine only ever produces `Active`; removal deletes the record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderStatus {
    #[default]
    Active,
}

impl ProviderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderStatus::Active => "active",
        }
    }
}

impl fmt::Display for ProviderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(ProviderStatus::Active),
            other => Err(anyhow::anyhow!("Unknown provider status: {}", other)),
        }
    }
}

/// Composite identity of a registration: (service identity, resource kind)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProviderKey {
    pub service_id: String,
    pub resource_kind: String,
}

impl ProviderKey {
    pub fn new(service_id: impl Into<String>, resource_kind: impl Into<String>) -> Self {
        Self {
            service_id: service_id.into(),
            resource_kind: resource_kind.into(),
        }
    }
}

impl fmt::Display for ProviderKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.service_id, self.resource_kind)
    }
}

/// A provider registered in the Resource Registry.
///
/// One physical provider process may own several records, one per resource
/// kind it serves. `registered_at` is set on first registration of a key and
/// carried across every later update of the same key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisteredProvider {
    /// Provider identity (UUID text form)
    pub service_id: String,

    /// Resource kind served under this registration
    pub resource_kind: String,

    /// Base URL of the provider API for this resource kind
    pub endpoint: String,

    pub metadata: ProviderMetadata,

    /// Supported operation names; order is not significant
    pub operations: Vec<String>,

    /// Catalog item this registration fulfills (derived from the resource kind)
    pub catalog_item: String,

    pub status: ProviderStatus,

    /// First registration timestamp
    pub registered_at: DateTime<Utc>,

    /// Last mutation timestamp
    pub updated_at: DateTime<Utc>,
}

impl RegisteredProvider {
    /// Composite key of this registration
    pub fn key(&self) -> ProviderKey {
        ProviderKey::new(&self.service_id, &self.resource_kind)
    }

    pub fn is_active(&self) -> bool {
        self.status == ProviderStatus::Active
    }
}
