//! Repository implementations using SQLite.

mod catalog_repository;
mod registry_repository;

pub use catalog_repository::SqliteCatalogRepository;
pub use registry_repository::SqliteRegistryRepository;

use chrono::{DateTime, Utc};

/// Parse a stored timestamp.
/// Handles both RFC3339 and SQLite's `datetime('now')` format.
pub(crate) fn parse_datetime(s: &str) -> DateTime<Utc> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return dt.with_timezone(&Utc);
    }
    if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return dt.and_utc();
    }
    tracing::warn!(value = %s, "[Storage] Unparseable timestamp, using now");
    Utc::now()
}
