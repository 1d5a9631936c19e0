//! Repository traits for data access
//!
//! These traits define the interface for registry and catalog storage
//! without specifying the implementation (SQLite, in-memory, etc.).
//!
//! The Resource Registry and the Service Catalog are deliberately separate
//! traits: the handler writes to them one after the other and never assumes
//! a transaction spans both. Each individual method must be atomic.

use async_trait::async_trait;

use crate::domain::{CatalogItem, CatalogProviderMapping, RegisteredProvider};

/// Result type for repository operations
pub type RepoResult<T> = anyhow::Result<T>;

/// Resource Registry storage, keyed by (service_id, resource_kind)
#[async_trait]
pub trait RegistryStore: Send + Sync {
    /// Create or replace the registration for the provider's key
    async fn upsert_provider(&self, provider: &RegisteredProvider) -> RepoResult<()>;

    /// Get the registration for a key
    async fn get_provider(
        &self,
        service_id: &str,
        resource_kind: &str,
    ) -> RepoResult<Option<RegisteredProvider>>;

    /// Delete the registration for a key (no-op if absent)
    async fn delete_provider(&self, service_id: &str, resource_kind: &str) -> RepoResult<()>;

    /// List all registrations for a resource kind
    async fn list_providers(&self, resource_kind: &str) -> RepoResult<Vec<RegisteredProvider>>;
}

/// Service Catalog write-side used by the registration handler
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Point the catalog at a registration.
    ///
    /// Deactivates every mapping for (service_id, resource_kind), then
    /// creates or reactivates the mapping to `catalog_item` with `endpoint`.
    async fn update_catalog_mapping(
        &self,
        service_id: &str,
        resource_kind: &str,
        catalog_item: &str,
        endpoint: &str,
    ) -> RepoResult<()>;

    /// Soft-remove a registration from the catalog (deactivate all its mappings)
    async fn remove_catalog_mapping(&self, service_id: &str, resource_kind: &str)
        -> RepoResult<()>;
}

/// Service Catalog item administration and read-side queries
#[async_trait]
pub trait CatalogItemRepository: Send + Sync {
    /// Get a catalog item by its unique name
    async fn get_catalog_item(&self, name: &str) -> RepoResult<Option<CatalogItem>>;

    /// List catalog items with the given active flag, ordered by resource kind then name
    async fn list_catalog_items(&self, active: bool) -> RepoResult<Vec<CatalogItem>>;

    /// Create a catalog item (fails if the name is taken)
    async fn create_catalog_item(&self, item: &CatalogItem) -> RepoResult<()>;

    /// Mappings for one catalog item with the given active flag
    async fn list_mappings_for_item(
        &self,
        catalog_name: &str,
        active: bool,
    ) -> RepoResult<Vec<CatalogProviderMapping>>;

    /// Every mapping row (active and historical) for a registration key
    async fn list_mappings_for_provider(
        &self,
        service_id: &str,
        resource_kind: &str,
    ) -> RepoResult<Vec<CatalogProviderMapping>>;

    /// All mappings with the given active flag, ordered by catalog name then service id
    async fn list_all_mappings(&self, active: bool) -> RepoResult<Vec<CatalogProviderMapping>>;

    /// Distinct resource kinds that appear in any mapping
    async fn distinct_resource_kinds(&self) -> RepoResult<Vec<String>>;
}
