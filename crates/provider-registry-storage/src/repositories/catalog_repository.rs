//! SQLite implementation of the Service Catalog stores.
//!
//! Mapping rows are never deleted: deactivation flips `active` to 0 and
//! re-registration reactivates the existing row for the same
//! (catalog_name, service_id, resource_kind).

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use provider_registry_core::{
    CatalogItem, CatalogItemRepository, CatalogProviderMapping, CatalogStore,
};
use rusqlite::{params, OptionalExtension, Row};
use tokio::sync::Mutex;
use uuid::Uuid;

use super::parse_datetime;
use crate::Database;

const ITEM_COLUMNS: &str =
    "id, name, display_name, description, resource_kind, active, created_at, updated_at";

const MAPPING_COLUMNS: &str =
    "id, catalog_name, service_id, resource_kind, endpoint, active, registered_at, updated_at";

fn parse_uuid(value: &str) -> Uuid {
    value.parse().unwrap_or_else(|e| {
        tracing::warn!(value = %value, error = %e, "[CatalogRepository] Invalid row id");
        Uuid::nil()
    })
}

fn row_to_item(row: &Row<'_>) -> rusqlite::Result<CatalogItem> {
    Ok(CatalogItem {
        id: parse_uuid(&row.get::<_, String>(0)?),
        name: row.get(1)?,
        display_name: row.get(2)?,
        description: row.get(3)?,
        resource_kind: row.get(4)?,
        active: row.get::<_, i32>(5)? == 1,
        created_at: parse_datetime(&row.get::<_, String>(6)?),
        updated_at: parse_datetime(&row.get::<_, String>(7)?),
    })
}

fn row_to_mapping(row: &Row<'_>) -> rusqlite::Result<CatalogProviderMapping> {
    Ok(CatalogProviderMapping {
        id: parse_uuid(&row.get::<_, String>(0)?),
        catalog_name: row.get(1)?,
        service_id: row.get(2)?,
        resource_kind: row.get(3)?,
        endpoint: row.get(4)?,
        active: row.get::<_, i32>(5)? == 1,
        registered_at: parse_datetime(&row.get::<_, String>(6)?),
        updated_at: parse_datetime(&row.get::<_, String>(7)?),
    })
}

/// SQLite-backed Service Catalog.
pub struct SqliteCatalogRepository {
    db: Arc<Mutex<Database>>,
}

impl SqliteCatalogRepository {
    pub fn new(db: Arc<Mutex<Database>>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CatalogStore for SqliteCatalogRepository {
    async fn update_catalog_mapping(
        &self,
        service_id: &str,
        resource_kind: &str,
        catalog_item: &str,
        endpoint: &str,
    ) -> Result<()> {
        let now = Utc::now().to_rfc3339();
        let db = self.db.lock().await;

        db.transaction(|conn| {
            let deactivated = conn.execute(
                "UPDATE catalog_provider_mappings SET active = 0, updated_at = ?3
                 WHERE service_id = ?1 AND resource_kind = ?2 AND active = 1",
                params![service_id, resource_kind, now],
            )?;

            conn.execute(
                "INSERT INTO catalog_provider_mappings
                    (id, catalog_name, service_id, resource_kind, endpoint, active, registered_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, 1, ?6, ?6)
                 ON CONFLICT(catalog_name, service_id, resource_kind) DO UPDATE SET
                    endpoint = excluded.endpoint,
                    active = 1,
                    updated_at = excluded.updated_at",
                params![
                    Uuid::new_v4().to_string(),
                    catalog_item,
                    service_id,
                    resource_kind,
                    endpoint,
                    now,
                ],
            )?;

            tracing::debug!(
                service_id = %service_id,
                resource_kind = %resource_kind,
                catalog_item = %catalog_item,
                deactivated,
                "[CatalogRepository] Mapping activated"
            );
            Ok(())
        })
    }

    async fn remove_catalog_mapping(&self, service_id: &str, resource_kind: &str) -> Result<()> {
        let now = Utc::now().to_rfc3339();
        let db = self.db.lock().await;

        let deactivated = db.connection().execute(
            "UPDATE catalog_provider_mappings SET active = 0, updated_at = ?3
             WHERE service_id = ?1 AND resource_kind = ?2 AND active = 1",
            params![service_id, resource_kind, now],
        )?;

        tracing::debug!(
            service_id = %service_id,
            resource_kind = %resource_kind,
            deactivated,
            "[CatalogRepository] Mappings deactivated"
        );
        Ok(())
    }
}

#[async_trait]
impl CatalogItemRepository for SqliteCatalogRepository {
    async fn get_catalog_item(&self, name: &str) -> Result<Option<CatalogItem>> {
        let db = self.db.lock().await;
        let item = db
            .connection()
            .query_row(
                &format!("SELECT {} FROM catalog_items WHERE name = ?1", ITEM_COLUMNS),
                params![name],
                row_to_item,
            )
            .optional()?;
        Ok(item)
    }

    async fn list_catalog_items(&self, active: bool) -> Result<Vec<CatalogItem>> {
        let db = self.db.lock().await;
        let mut stmt = db.connection().prepare(&format!(
            "SELECT {} FROM catalog_items WHERE active = ?1 ORDER BY resource_kind ASC, name ASC",
            ITEM_COLUMNS
        ))?;
        let items = stmt
            .query_map(params![active as i32], row_to_item)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(items)
    }

    async fn create_catalog_item(&self, item: &CatalogItem) -> Result<()> {
        let db = self.db.lock().await;
        db.connection().execute(
            "INSERT INTO catalog_items (id, name, display_name, description, resource_kind, active, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                item.id.to_string(),
                item.name,
                item.display_name,
                item.description,
                item.resource_kind,
                item.active as i32,
                item.created_at.to_rfc3339(),
                item.updated_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    async fn list_mappings_for_item(
        &self,
        catalog_name: &str,
        active: bool,
    ) -> Result<Vec<CatalogProviderMapping>> {
        let db = self.db.lock().await;
        let mut stmt = db.connection().prepare(&format!(
            "SELECT {} FROM catalog_provider_mappings
             WHERE catalog_name = ?1 AND active = ?2
             ORDER BY service_id ASC",
            MAPPING_COLUMNS
        ))?;
        let mappings = stmt
            .query_map(params![catalog_name, active as i32], row_to_mapping)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(mappings)
    }

    async fn list_mappings_for_provider(
        &self,
        service_id: &str,
        resource_kind: &str,
    ) -> Result<Vec<CatalogProviderMapping>> {
        let db = self.db.lock().await;
        let mut stmt = db.connection().prepare(&format!(
            "SELECT {} FROM catalog_provider_mappings
             WHERE service_id = ?1 AND resource_kind = ?2
             ORDER BY registered_at ASC",
            MAPPING_COLUMNS
        ))?;
        let mappings = stmt
            .query_map(params![service_id, resource_kind], row_to_mapping)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(mappings)
    }

    async fn list_all_mappings(&self, active: bool) -> Result<Vec<CatalogProviderMapping>> {
        let db = self.db.lock().await;
        let mut stmt = db.connection().prepare(&format!(
            "SELECT {} FROM catalog_provider_mappings
             WHERE active = ?1
             ORDER BY catalog_name ASC, service_id ASC",
            MAPPING_COLUMNS
        ))?;
        let mappings = stmt
            .query_map(params![active as i32], row_to_mapping)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(mappings)
    }

    async fn distinct_resource_kinds(&self) -> Result<Vec<String>> {
        let db = self.db.lock().await;
        let mut stmt = db.connection().prepare(
            "SELECT DISTINCT resource_kind FROM catalog_provider_mappings ORDER BY resource_kind ASC",
        )?;
        let kinds = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;
        Ok(kinds)
    }
}
