//! Domain entities, value objects, and events
//!
//! - Resource Registry: `RegisteredProvider` keyed by `ProviderKey`
//! - Service Catalog: `CatalogItem` and `CatalogProviderMapping`
//! - Domain events emitted after successful mutations

mod catalog;
mod event;
mod provider;

pub use catalog::*;
pub use event::DomainEvent;
pub use provider::*;
