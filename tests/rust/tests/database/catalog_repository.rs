//! SqliteCatalogRepository tests, including the handler running end to end
//! on SQLite.

use pretty_assertions::assert_eq;

use provider_registry_core::{
    seed_default_catalog_items, CatalogItemRepository, CatalogStore, RegistrationHandler,
    DEFAULT_CATALOG_DEFINITIONS,
};
use tests::db::TestDatabase;
use tests::fixtures::*;

#[tokio::test]
async fn test_seed_is_idempotent_on_sqlite() {
    let test_db = TestDatabase::new();
    let catalog = test_db.catalog();

    seed_default_catalog_items(catalog.as_ref(), None).await.unwrap();
    let report = seed_default_catalog_items(catalog.as_ref(), None).await.unwrap();

    assert!(report.created.is_empty());
    assert_eq!(
        catalog.list_catalog_items(true).await.unwrap().len(),
        DEFAULT_CATALOG_DEFINITIONS.len()
    );
}

#[tokio::test]
async fn test_mapping_history_is_soft() {
    let test_db = TestDatabase::in_memory();
    let catalog = test_db.catalog();

    catalog
        .update_catalog_mapping(SERVICE_ID, "file", "file", FILE_ENDPOINT)
        .await
        .unwrap();
    catalog.remove_catalog_mapping(SERVICE_ID, "file").await.unwrap();

    let history = catalog
        .list_mappings_for_provider(SERVICE_ID, "file")
        .await
        .unwrap();
    assert_eq!(history.len(), 1);
    assert!(!history[0].active);
    assert!(catalog.list_all_mappings(true).await.unwrap().is_empty());
    assert_eq!(catalog.list_all_mappings(false).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_remove_without_mapping_is_noop() {
    let test_db = TestDatabase::in_memory();
    let catalog = test_db.catalog();

    catalog.remove_catalog_mapping(SERVICE_ID, "vm").await.unwrap();
    assert!(catalog
        .list_mappings_for_provider(SERVICE_ID, "vm")
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_handler_on_sqlite_keeps_one_active_mapping_per_key() {
    let test_db = TestDatabase::new();
    let registry = test_db.registry();
    let catalog = test_db.catalog();
    seed_default_catalog_items(catalog.as_ref(), None).await.unwrap();

    let handler = RegistrationHandler::new(registry, catalog.clone());

    handler
        .register(SERVICE_ID, "file", FILE_ENDPOINT, &metadata(), &operations())
        .await
        .unwrap();
    handler
        .register(SERVICE_ID, "file", "http://localhost:9999/api/file", &metadata(), &operations())
        .await
        .unwrap();
    handler
        .register(SERVICE_ID, "container", CONTAINER_ENDPOINT, &metadata(), &operations())
        .await
        .unwrap();

    let file_active = catalog.list_mappings_for_item("file", true).await.unwrap();
    assert_eq!(file_active.len(), 1);
    assert_eq!(file_active[0].endpoint, "http://localhost:9999/api/file");

    let container_active = catalog.list_mappings_for_item("container", true).await.unwrap();
    assert_eq!(container_active.len(), 1);

    handler.unregister(SERVICE_ID, "file").await.unwrap();
    assert!(catalog.list_mappings_for_item("file", true).await.unwrap().is_empty());
    assert_eq!(catalog.list_mappings_for_item("container", true).await.unwrap().len(), 1);

    let result = handler.list_registrations("file").await.unwrap();
    assert!(result.is_empty());
}
