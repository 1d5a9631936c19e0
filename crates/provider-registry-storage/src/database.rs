//! SQLite database handle and schema migrations.
//!
//! Migrations are numbered (001, 002, ...) and live in `migrations/`.
//! Each one runs exactly once and is recorded in `schema_migrations`.

use anyhow::{Context, Result};
use rusqlite::Connection;
use std::path::Path;
use tracing::{debug, error, info};

struct Migration {
    version: i64,
    name: &'static str,
    sql: &'static str,
}

/// All migrations in order
const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    name: "initial",
    sql: include_str!("migrations/001_initial.sql"),
}];

/// Latest schema version known to this build
pub const LATEST_SCHEMA_VERSION: i64 = 1;

/// SQLite database wrapper shared by the registry and catalog repositories.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open (or create) a database file and apply pending migrations.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create database directory: {:?}", parent))?;
        }

        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database at {:?}", path))?;
        conn.pragma_update(None, "journal_mode", "WAL")?;

        debug!(path = ?path, "[Database] Opened");

        let db = Self { conn };
        db.run_migrations()?;
        Ok(db)
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        debug!("[Database] Opened in-memory database");

        let db = Self { conn };
        db.run_migrations()?;
        Ok(db)
    }

    fn run_migrations(&self) -> Result<()> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS schema_migrations (
                version INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                applied_at TEXT NOT NULL
            )",
            [],
        )?;

        let current = self.schema_version()?;
        debug!(
            current,
            latest = LATEST_SCHEMA_VERSION,
            "[Database] Checking migrations"
        );

        for migration in MIGRATIONS.iter().filter(|m| m.version > current) {
            info!(
                version = migration.version,
                name = migration.name,
                "[Database] Running migration"
            );

            let tx = self.conn.unchecked_transaction()?;
            if let Err(e) = tx.execute_batch(migration.sql) {
                error!(
                    version = migration.version,
                    name = migration.name,
                    error = %e,
                    "[Database] Migration failed"
                );
                return Err(anyhow::anyhow!(
                    "Failed to run migration {} ({}): {}",
                    migration.version,
                    migration.name,
                    e
                ));
            }
            tx.execute(
                "INSERT INTO schema_migrations (version, name, applied_at) VALUES (?1, ?2, datetime('now'))",
                rusqlite::params![migration.version, migration.name],
            )?;
            tx.commit()?;
        }

        Ok(())
    }

    /// Highest applied migration version (0 for a fresh database)
    pub fn schema_version(&self) -> Result<i64> {
        self.conn
            .query_row(
                "SELECT COALESCE(MAX(version), 0) FROM schema_migrations",
                [],
                |row| row.get(0),
            )
            .context("Failed to read schema version")
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Run a closure inside a transaction; rolled back if the closure fails.
    pub fn transaction<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let tx = self.conn.unchecked_transaction()?;
        let result = f(&tx)?;
        tx.commit()?;
        Ok(result)
    }
}
