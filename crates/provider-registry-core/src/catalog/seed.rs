//! Catalog bootstrap - ensure canonical catalog items exist

use anyhow::{Context, Result};
use tracing::{debug, info};

use super::defaults::DEFAULT_CATALOG_DEFINITIONS;
use crate::domain::{CatalogDefinition, CatalogItem, DomainEvent};
use crate::event_bus::EventSender;
use crate::repository::CatalogItemRepository;

/// What a seeding pass did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedReport {
    /// Names created by this pass
    pub created: Vec<String>,
    /// Names that were already present and left untouched
    pub existing: Vec<String>,
}

/// Ensure every definition exists by unique name.
///
/// Absent items are created; present items are never modified. Safe to run
/// on every startup.
pub async fn seed_catalog_items(
    repo: &dyn CatalogItemRepository,
    definitions: &[CatalogDefinition],
    events: Option<&EventSender>,
) -> Result<SeedReport> {
    let mut report = SeedReport::default();

    for def in definitions {
        let existing = repo
            .get_catalog_item(def.name)
            .await
            .with_context(|| format!("Failed to look up catalog item '{}'", def.name))?;

        if existing.is_some() {
            debug!(name = def.name, "[CatalogSeed] Catalog item already exists, skipping");
            report.existing.push(def.name.to_string());
            continue;
        }

        let item = CatalogItem::from(def);
        repo.create_catalog_item(&item)
            .await
            .with_context(|| format!("Failed to create catalog item '{}'", def.name))?;

        info!(
            name = %item.name,
            display_name = %item.display_name,
            "[CatalogSeed] Created catalog item"
        );

        if let Some(sender) = events {
            sender.emit(DomainEvent::CatalogItemSeeded {
                name: item.name.clone(),
                resource_kind: item.resource_kind.clone(),
            });
        }
        report.created.push(item.name);
    }

    info!(
        created = report.created.len(),
        existing = report.existing.len(),
        "[CatalogSeed] Catalog seeding completed"
    );

    Ok(report)
}

/// Seed [`DEFAULT_CATALOG_DEFINITIONS`]
pub async fn seed_default_catalog_items(
    repo: &dyn CatalogItemRepository,
    events: Option<&EventSender>,
) -> Result<SeedReport> {
    seed_catalog_items(repo, DEFAULT_CATALOG_DEFINITIONS, events).await
}
