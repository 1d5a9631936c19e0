//! Catalog service - read-side queries over the Service Catalog

use anyhow::Result;
use std::sync::Arc;

use crate::domain::{CatalogItem, CatalogProviderMapping};
use crate::repository::CatalogItemRepository;

/// Answers "who can fulfill what" from the catalog
pub struct CatalogService {
    repository: Arc<dyn CatalogItemRepository>,
}

impl CatalogService {
    pub fn new(repository: Arc<dyn CatalogItemRepository>) -> Self {
        Self { repository }
    }

    /// Active providers that can fulfill a catalog item
    pub async fn providers_for_item(&self, catalog_name: &str) -> Result<Vec<CatalogProviderMapping>> {
        self.repository.list_mappings_for_item(catalog_name, true).await
    }

    /// All active mappings across the catalog
    pub async fn active_mappings(&self) -> Result<Vec<CatalogProviderMapping>> {
        self.repository.list_all_mappings(true).await
    }

    /// All active catalog items
    pub async fn catalog_items(&self) -> Result<Vec<CatalogItem>> {
        self.repository.list_catalog_items(true).await
    }

    /// Get one catalog item by name
    pub async fn catalog_item(&self, name: &str) -> Result<Option<CatalogItem>> {
        self.repository.get_catalog_item(name).await
    }

    /// Resource kinds that have ever been mapped into the catalog
    pub async fn resource_kinds(&self) -> Result<Vec<String>> {
        self.repository.distinct_resource_kinds().await
    }
}
