//! SQLite implementation of RegistryStore.

use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use provider_registry_core::{ProviderMetadata, RegisteredProvider, RegistryStore};
use rusqlite::{params, OptionalExtension, Row};
use tokio::sync::Mutex;

use super::parse_datetime;
use crate::Database;

const PROVIDER_COLUMNS: &str = "service_id, resource_kind, endpoint, metadata, operations, \
     catalog_item, status, registered_at, updated_at";

/// Raw row before JSON columns are decoded
struct ProviderRow {
    service_id: String,
    resource_kind: String,
    endpoint: String,
    metadata: String,
    operations: String,
    catalog_item: String,
    status: String,
    registered_at: String,
    updated_at: String,
}

impl ProviderRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            service_id: row.get(0)?,
            resource_kind: row.get(1)?,
            endpoint: row.get(2)?,
            metadata: row.get(3)?,
            operations: row.get(4)?,
            catalog_item: row.get(5)?,
            status: row.get(6)?,
            registered_at: row.get(7)?,
            updated_at: row.get(8)?,
        })
    }

    fn into_provider(self) -> Result<RegisteredProvider> {
        let metadata: ProviderMetadata = serde_json::from_str(&self.metadata)
            .with_context(|| format!("Corrupt metadata for {}/{}", self.service_id, self.resource_kind))?;
        let operations: Vec<String> = serde_json::from_str(&self.operations)
            .with_context(|| format!("Corrupt operations for {}/{}", self.service_id, self.resource_kind))?;

        Ok(RegisteredProvider {
            status: self.status.parse()?,
            registered_at: parse_datetime(&self.registered_at),
            updated_at: parse_datetime(&self.updated_at),
            service_id: self.service_id,
            resource_kind: self.resource_kind,
            endpoint: self.endpoint,
            metadata,
            operations,
            catalog_item: self.catalog_item,
        })
    }
}

/// SQLite-backed Resource Registry.
pub struct SqliteRegistryRepository {
    db: Arc<Mutex<Database>>,
}

impl SqliteRegistryRepository {
    pub fn new(db: Arc<Mutex<Database>>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RegistryStore for SqliteRegistryRepository {
    async fn upsert_provider(&self, provider: &RegisteredProvider) -> Result<()> {
        let metadata = serde_json::to_string(&provider.metadata)?;
        let operations = serde_json::to_string(&provider.operations)?;

        let db = self.db.lock().await;
        db.connection().execute(
            "INSERT INTO registered_providers
                (service_id, resource_kind, endpoint, metadata, operations, catalog_item, status, registered_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
             ON CONFLICT(service_id, resource_kind) DO UPDATE SET
                endpoint = excluded.endpoint,
                metadata = excluded.metadata,
                operations = excluded.operations,
                catalog_item = excluded.catalog_item,
                status = excluded.status,
                registered_at = excluded.registered_at,
                updated_at = excluded.updated_at",
            params![
                provider.service_id,
                provider.resource_kind,
                provider.endpoint,
                metadata,
                operations,
                provider.catalog_item,
                provider.status.as_str(),
                provider.registered_at.to_rfc3339(),
                provider.updated_at.to_rfc3339(),
            ],
        )?;

        tracing::debug!(
            service_id = %provider.service_id,
            resource_kind = %provider.resource_kind,
            "[RegistryRepository] Upserted provider"
        );
        Ok(())
    }

    async fn get_provider(
        &self,
        service_id: &str,
        resource_kind: &str,
    ) -> Result<Option<RegisteredProvider>> {
        let db = self.db.lock().await;
        let row = db
            .connection()
            .query_row(
                &format!(
                    "SELECT {} FROM registered_providers WHERE service_id = ?1 AND resource_kind = ?2",
                    PROVIDER_COLUMNS
                ),
                params![service_id, resource_kind],
                ProviderRow::from_row,
            )
            .optional()?;

        row.map(ProviderRow::into_provider).transpose()
    }

    async fn delete_provider(&self, service_id: &str, resource_kind: &str) -> Result<()> {
        let db = self.db.lock().await;
        db.connection().execute(
            "DELETE FROM registered_providers WHERE service_id = ?1 AND resource_kind = ?2",
            params![service_id, resource_kind],
        )?;
        Ok(())
    }

    async fn list_providers(&self, resource_kind: &str) -> Result<Vec<RegisteredProvider>> {
        let db = self.db.lock().await;
        let mut stmt = db.connection().prepare(&format!(
            "SELECT {} FROM registered_providers WHERE resource_kind = ?1 ORDER BY registered_at ASC, service_id ASC",
            PROVIDER_COLUMNS
        ))?;

        let rows = stmt
            .query_map(params![resource_kind], ProviderRow::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter().map(ProviderRow::into_provider).collect()
    }
}
