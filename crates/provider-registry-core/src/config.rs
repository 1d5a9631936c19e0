//! Runtime configuration
//!
//! Built once at startup from environment variables and passed explicitly
//! to whatever needs it. Nothing reads the environment after that.

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::time::Duration;

pub const ENV_DB_PATH: &str = "PROVIDER_REGISTRY_DB_PATH";
pub const ENV_LOG_DIR: &str = "PROVIDER_REGISTRY_LOG_DIR";
pub const ENV_LOG_LEVEL: &str = "PROVIDER_REGISTRY_LOG_LEVEL";
pub const ENV_CHECK_ENDPOINTS: &str = "PROVIDER_REGISTRY_CHECK_ENDPOINTS";
pub const ENV_CHECK_TIMEOUT_SECS: &str = "PROVIDER_REGISTRY_CHECK_TIMEOUT_SECS";
pub const ENV_CHECK_RETRIES: &str = "PROVIDER_REGISTRY_CHECK_RETRIES";

/// Data directory name under the platform's local data dir
pub const APP_DIR_NAME: &str = "provider-registry";

/// Default database file name
pub const DATABASE_FILE: &str = "registry.db";

/// Health paths checked, in order
pub const DEFAULT_HEALTH_PATHS: &[&str] = &["/health", "/healthz", "/ready", "/"];

/// Endpoint reachability settings
#[derive(Debug, Clone, PartialEq)]
pub struct EndpointCheckConfig {
    /// Verify endpoints before registering
    pub enabled: bool,

    /// Per-request timeout
    pub timeout: Duration,

    /// Extra attempts per path after a transient failure
    pub retries: u32,

    /// Wait between attempts
    pub retry_wait: Duration,

    /// Candidate health paths
    pub paths: Vec<String>,
}

impl Default for EndpointCheckConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            timeout: Duration::from_secs(5),
            retries: 2,
            retry_wait: Duration::from_secs(1),
            paths: DEFAULT_HEALTH_PATHS.iter().map(|p| p.to_string()).collect(),
        }
    }
}

/// Top-level configuration for the registry process
#[derive(Debug, Clone, PartialEq)]
pub struct RegistryConfig {
    pub database_path: PathBuf,
    pub log_dir: PathBuf,
    pub log_level: String,
    pub endpoint_check: EndpointCheckConfig,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        let data_dir = default_data_dir();
        Self {
            database_path: data_dir.join(DATABASE_FILE),
            log_dir: data_dir.join("logs"),
            log_level: "info".to_string(),
            endpoint_check: EndpointCheckConfig::default(),
        }
    }
}

impl RegistryConfig {
    /// Build from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; unset keys keep their defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = lookup(ENV_DB_PATH) {
            config.database_path = PathBuf::from(path);
        }
        if let Some(dir) = lookup(ENV_LOG_DIR) {
            config.log_dir = PathBuf::from(dir);
        }
        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            config.log_level = level;
        }
        if let Some(value) = lookup(ENV_CHECK_ENDPOINTS) {
            config.endpoint_check.enabled = parse_bool(&value)
                .with_context(|| format!("Invalid value for {}", ENV_CHECK_ENDPOINTS))?;
        }
        if let Some(value) = lookup(ENV_CHECK_TIMEOUT_SECS) {
            let secs: u64 = value
                .trim()
                .parse()
                .with_context(|| format!("Invalid value for {}: {:?}", ENV_CHECK_TIMEOUT_SECS, value))?;
            if secs == 0 {
                anyhow::bail!("{} must be greater than zero", ENV_CHECK_TIMEOUT_SECS);
            }
            config.endpoint_check.timeout = Duration::from_secs(secs);
        }
        if let Some(value) = lookup(ENV_CHECK_RETRIES) {
            config.endpoint_check.retries = value
                .trim()
                .parse()
                .with_context(|| format!("Invalid value for {}: {:?}", ENV_CHECK_RETRIES, value))?;
        }

        Ok(config)
    }
}

/// Platform data directory for the registry (falls back to the working dir)
pub fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|p| p.join(APP_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from("."))
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => anyhow::bail!("expected a boolean, got {:?}", other),
    }
}
