//! Service Catalog: canonical definitions, bootstrap, and queries
//!
//! Catalog identity is admin-controlled: items are seeded at startup and
//! providers only ever attach mappings to them.

mod defaults;
mod seed;
mod service;

pub use defaults::DEFAULT_CATALOG_DEFINITIONS;
pub use seed::{seed_catalog_items, seed_default_catalog_items, SeedReport};
pub use service::CatalogService;
