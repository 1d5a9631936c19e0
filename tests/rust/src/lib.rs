//! Shared test utilities and fixtures for provider registry integration tests.

pub use provider_registry_core::{
    CatalogItem, CatalogProviderMapping, DomainEvent, ProviderMetadata, RegisteredProvider,
};

pub use mocks::MockStores;

/// Event testing utilities
pub mod events {
    use provider_registry_core::{DomainEvent, EventReceiver};
    use std::time::Duration;

    /// Collect events from a receiver until the timeout elapses
    pub async fn collect_events(mut rx: EventReceiver, timeout: Duration) -> Vec<DomainEvent> {
        let mut events = Vec::new();
        let deadline = tokio::time::Instant::now() + timeout;

        loop {
            let remaining = deadline.saturating_duration_since(tokio::time::Instant::now());
            if remaining.is_zero() {
                break;
            }

            match tokio::time::timeout(remaining, rx.recv()).await {
                Ok(Some(event)) => events.push(event),
                Ok(None) => break, // Bus closed
                Err(_) => break,   // Timeout
            }
        }

        events
    }

    /// Drain whatever is already buffered
    pub fn drain(rx: &mut EventReceiver) -> Vec<DomainEvent> {
        std::iter::from_fn(|| rx.try_recv()).collect()
    }
}

/// Test fixture utilities
pub mod fixtures {
    use provider_registry_core::{ProviderMetadata, RegistrationRequest};
    use uuid::Uuid;

    /// Provider identity used across the scenario tests
    pub const SERVICE_ID: &str = "11111111-1111-1111-1111-111111111111";

    /// A second, distinct provider identity
    pub const OTHER_SERVICE_ID: &str = "22222222-2222-2222-2222-222222222222";

    pub const FILE_ENDPOINT: &str = "http://localhost:8081/api/file";
    pub const CONTAINER_ENDPOINT: &str = "http://localhost:8081/api/container";

    /// Metadata with both required placement fields
    pub fn metadata() -> ProviderMetadata {
        ProviderMetadata::new("datacenter-east", "us-east")
    }

    /// The standard operation set
    pub fn operations() -> Vec<String> {
        vec!["CREATE".to_string(), "DELETE".to_string(), "READ".to_string()]
    }

    /// A complete registration request body
    pub fn request(service_id: &str, endpoint: &str) -> RegistrationRequest {
        RegistrationRequest::new(service_id, endpoint, metadata(), operations())
    }

    /// Generate a random UUID string
    pub fn random_id() -> String {
        Uuid::new_v4().to_string()
    }
}

/// Database test helpers
pub mod db {
    use provider_registry_storage::{Database, SqliteCatalogRepository, SqliteRegistryRepository};
    use std::path::{Path, PathBuf};
    use std::sync::Arc;
    use tempfile::TempDir;
    use tokio::sync::Mutex;

    /// Database file name
    const DB_FILE: &str = "registry.db";

    /// A database in a temporary directory, removed on drop
    pub struct TestDatabase {
        pub db: Arc<Mutex<Database>>,
        _temp_dir: TempDir,
        db_path: PathBuf,
    }

    impl TestDatabase {
        /// Create a new test database in a temporary directory
        pub fn new() -> Self {
            let temp_dir = TempDir::new().expect("Failed to create temp dir");
            let db_path = temp_dir.path().join(DB_FILE);
            let db = Database::open(&db_path).expect("Failed to open test database");
            Self {
                db: Arc::new(Mutex::new(db)),
                db_path,
                _temp_dir: temp_dir,
            }
        }

        /// Create an in-memory database for fast tests
        pub fn in_memory() -> Self {
            let temp_dir = TempDir::new().expect("Failed to create temp dir");
            let db = Database::open_in_memory().expect("Failed to open in-memory database");
            Self {
                db: Arc::new(Mutex::new(db)),
                db_path: PathBuf::new(),
                _temp_dir: temp_dir,
            }
        }

        pub fn registry(&self) -> Arc<SqliteRegistryRepository> {
            Arc::new(SqliteRegistryRepository::new(self.db.clone()))
        }

        pub fn catalog(&self) -> Arc<SqliteCatalogRepository> {
            Arc::new(SqliteCatalogRepository::new(self.db.clone()))
        }

        /// Get the full database file path
        pub fn db_path(&self) -> &Path {
            &self.db_path
        }
    }

    impl Default for TestDatabase {
        fn default() -> Self {
            Self::new()
        }
    }
}
