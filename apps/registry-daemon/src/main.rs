//! Provider registry daemon
//!
//! Startup order:
//! 1. `.env` and `RegistryConfig`
//! 2. tracing (console + daily rolling file)
//! 3. database and migrations
//! 4. catalog bootstrap
//! 5. registration handler

use std::sync::Arc;

use anyhow::{Context, Result};
use provider_registry_core::{
    seed_default_catalog_items, CatalogService, EventBus, EventReceiver, HttpEndpointChecker,
    RegistrationHandler, RegistryConfig,
};
use provider_registry_storage::{Database, SqliteCatalogRepository, SqliteRegistryRepository};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use tracing_appender::non_blocking::WorkerGuard;

const LOG_PREFIX: &str = "registry-daemon";

/// Console (compact, colored) plus file (daily rotation) logging.
///
/// `RUST_LOG` takes precedence; otherwise the configured level applies with
/// debug output for the workspace crates.
fn init_tracing(config: &RegistryConfig) -> Result<WorkerGuard> {
    use tracing_appender::rolling::{RollingFileAppender, Rotation};
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    std::fs::create_dir_all(&config.log_dir)
        .with_context(|| format!("Failed to create log directory {:?}", config.log_dir))?;

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_PREFIX)
        .filename_suffix("log")
        .build(&config.log_dir)
        .context("Failed to create log file appender")?;
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.log_level)
            .with_context(|| format!("Invalid log level {:?}", config.log_level))?
            .add_directive("provider_registry_core=debug".parse()?)
            .add_directive("provider_registry_storage=debug".parse()?)
            .add_directive("registry_daemon=debug".parse()?),
    };

    let console_layer = fmt::layer()
        .with_ansi(true)
        .compact()
        .with_line_number(false)
        .with_file(false)
        .with_target(true);

    let file_layer = fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false)
        .with_thread_ids(true)
        .with_line_number(true)
        .with_file(true)
        .with_target(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .init();

    Ok(guard)
}

/// Log every domain event until the bus closes
async fn log_events(mut receiver: EventReceiver) {
    while let Some(event) = receiver.recv().await {
        debug!(
            event = event.type_name(),
            resource_kind = %event.resource_kind(),
            service_id = ?event.service_id(),
            "[Daemon] Domain event"
        );
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = RegistryConfig::from_env().context("Invalid configuration")?;

    // Dropping the guard stops file logging
    let _log_guard = init_tracing(&config)?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        database = %config.database_path.display(),
        logs = %config.log_dir.display(),
        "[Daemon] Starting provider registry"
    );

    let db = Database::open(&config.database_path)?;
    let db = Arc::new(Mutex::new(db));

    let registry = Arc::new(SqliteRegistryRepository::new(db.clone()));
    let catalog = Arc::new(SqliteCatalogRepository::new(db));

    let event_bus = EventBus::new();
    tokio::spawn(log_events(event_bus.subscribe()));

    let report = seed_default_catalog_items(catalog.as_ref(), Some(&event_bus.sender()))
        .await
        .context("Catalog bootstrap failed")?;
    if !report.created.is_empty() {
        info!(created = ?report.created, "[Daemon] Seeded catalog items");
    }

    let mut builder = RegistrationHandler::builder()
        .with_registry_store(registry)
        .with_catalog_store(catalog.clone())
        .with_event_sender(event_bus.sender());

    if config.endpoint_check.enabled {
        let checker = HttpEndpointChecker::new(&config.endpoint_check)?;
        builder = builder.with_endpoint_checker(Arc::new(checker));
    } else {
        warn!("[Daemon] Endpoint verification disabled");
    }

    let handler = Arc::new(builder.build()?);

    let catalog_service = CatalogService::new(catalog);
    let items = catalog_service.catalog_items().await?;
    let active = catalog_service.active_mappings().await?;
    for item in &items {
        let providers = active.iter().filter(|m| m.catalog_name == item.name).count();
        info!(
            name = %item.name,
            resource_kind = %item.resource_kind,
            providers,
            "[Daemon] Catalog item"
        );
    }

    info!(
        catalog_items = items.len(),
        active_mappings = active.len(),
        verifies_endpoints = handler.verifies_endpoints(),
        "[Daemon] Ready"
    );

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for shutdown signal")?;

    info!("[Daemon] Shutting down");
    Ok(())
}
