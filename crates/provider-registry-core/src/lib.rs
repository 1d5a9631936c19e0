//! # Provider Registry Core
//!
//! Registration-and-catalog consistency engine.
//!
//! Providers announce themselves with a registration request. The
//! [`RegistrationHandler`] records the announcement in the Resource Registry
//! and projects it into the Service Catalog. The two aggregates live in
//! separate stores and are kept in agreement without a shared transaction:
//! callers heal partial failures by re-registering.
//!
//! ## Modules
//!
//! - `domain` - Entities (RegisteredProvider, CatalogItem, CatalogProviderMapping) and events
//! - `repository` - Store traits (RegistryStore, CatalogStore, CatalogItemRepository)
//! - `registration` - Validator, handler and error taxonomy
//! - `catalog` - Canonical catalog definitions, bootstrap and read-side queries
//! - `service` - Endpoint reachability checking
//! - `client` - Provider-side registration client and auto-registrar
//! - `config` - Explicit runtime configuration
//! - `event_bus` - Domain event distribution

pub mod catalog;
pub mod client;
pub mod config;
pub mod domain;
pub mod event_bus;
pub mod registration;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use catalog::{
    seed_catalog_items, seed_default_catalog_items, CatalogService, SeedReport,
    DEFAULT_CATALOG_DEFINITIONS,
};
pub use client::{AutoRegistrar, Registration, RegistrationClient};
pub use config::{EndpointCheckConfig, RegistryConfig};
pub use domain::*;
pub use event_bus::{EventBus, EventReceiver, EventSender};
pub use registration::{
    catalog_item_for, RegistrationError, RegistrationHandler, RegistrationHandlerBuilder,
    RegistrationRequest, RegistrationResult, Validator,
};
pub use repository::*;
pub use service::{EndpointChecker, HttpEndpointChecker};
