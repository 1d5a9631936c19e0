//! Provider Registry Storage Layer
//!
//! SQLite implementations of the registry and catalog store traits.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                RegistrationHandler                   │
//! ├──────────────────────────────────────────────────────┤
//! │                 Store Traits                         │
//! │ (RegistryStore, CatalogStore, CatalogItemRepository) │
//! ├──────────────────────────────────────────────────────┤
//! │             SQLite Implementations                   │
//! │ (SqliteRegistryRepository, SqliteCatalogRepository)  │
//! ├──────────────────────────────────────────────────────┤
//! │                    Database                          │
//! │                    (SQLite)                          │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! The registry and catalog repositories may share one `Database` or use
//! separate ones; the handler never relies on a transaction spanning both.
//!
//! # Usage
//!
//! ```rust,ignore
//! use provider_registry_storage::{Database, SqliteCatalogRepository, SqliteRegistryRepository};
//! use std::sync::Arc;
//! use tokio::sync::Mutex;
//!
//! let db = Arc::new(Mutex::new(Database::open(&path)?));
//! let registry = Arc::new(SqliteRegistryRepository::new(db.clone()));
//! let catalog = Arc::new(SqliteCatalogRepository::new(db));
//! ```

mod database;
mod repositories;

pub use database::{Database, LATEST_SCHEMA_VERSION};
pub use repositories::*;

pub use provider_registry_core::config::DATABASE_FILE;
