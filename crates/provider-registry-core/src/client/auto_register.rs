//! Auto-registrar: register on startup and re-register periodically.
//!
//! Each tick repeats every registration; a registry/catalog disagreement
//! left by a partial failure converges on the next successful tick.

use anyhow::Result;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use super::registration_client::RegistrationClient;
use crate::registration::RegistrationRequest;

/// Default re-registration interval
pub const DEFAULT_REREGISTER_INTERVAL: Duration = Duration::from_secs(5 * 60);

/// One resource kind a provider registers for
#[derive(Debug, Clone)]
pub struct Registration {
    pub resource_kind: String,
    pub request: RegistrationRequest,
}

impl Registration {
    pub fn new(resource_kind: impl Into<String>, request: RegistrationRequest) -> Self {
        Self {
            resource_kind: resource_kind.into(),
            request,
        }
    }
}

pub struct AutoRegistrar {
    client: Arc<RegistrationClient>,
    registrations: Arc<Vec<Registration>>,
    interval: Duration,
    stop_tx: watch::Sender<bool>,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl AutoRegistrar {
    /// Create an auto-registrar. A zero interval selects the default.
    pub fn new(
        client: Arc<RegistrationClient>,
        registrations: Vec<Registration>,
        interval: Duration,
    ) -> Self {
        let interval = if interval.is_zero() {
            DEFAULT_REREGISTER_INTERVAL
        } else {
            interval
        };
        let (stop_tx, _) = watch::channel(false);

        Self {
            client,
            registrations: Arc::new(registrations),
            interval,
            stop_tx,
            task: Mutex::new(None),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Register everything once, then keep re-registering in the background.
    ///
    /// The first failed registration aborts start and no loop is spawned.
    pub async fn start(&self) -> Result<()> {
        register_all(&self.client, &self.registrations).await?;

        let client = self.client.clone();
        let registrations = self.registrations.clone();
        let interval = self.interval;
        let mut stop_rx = self.stop_tx.subscribe();

        let handle = tokio::spawn(async move {
            let mut ticker =
                tokio::time::interval_at(tokio::time::Instant::now() + interval, interval);
            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        if let Err(e) = register_all(&client, &registrations).await {
                            warn!(error = %e, "[AutoRegistrar] Re-registration failed");
                        }
                    }
                    changed = stop_rx.changed() => {
                        if changed.is_err() || *stop_rx.borrow() {
                            break;
                        }
                    }
                }
            }
            info!("[AutoRegistrar] Re-registration loop stopped");
        });

        if let Ok(mut task) = self.task.lock() {
            if let Some(previous) = task.replace(handle) {
                previous.abort();
            }
        }

        Ok(())
    }

    /// Stop the re-registration loop
    pub fn stop(&self) {
        let _ = self.stop_tx.send(true);
    }

    /// True while the background loop is alive
    pub fn is_running(&self) -> bool {
        self.task
            .lock()
            .map(|task| task.as_ref().is_some_and(|h| !h.is_finished()))
            .unwrap_or(false)
    }

    /// Unregister every resource kind; failures are logged and skipped
    pub async fn unregister_all(&self) {
        for reg in self.registrations.iter() {
            if let Err(e) = self
                .client
                .unregister(&reg.resource_kind, &reg.request.service_id)
                .await
            {
                warn!(
                    resource_kind = %reg.resource_kind,
                    service_id = %reg.request.service_id,
                    error = %e,
                    "[AutoRegistrar] Failed to unregister"
                );
            }
        }
    }
}

impl Drop for AutoRegistrar {
    fn drop(&mut self) {
        let _ = self.stop_tx.send(true);
    }
}

async fn register_all(client: &RegistrationClient, registrations: &[Registration]) -> Result<()> {
    for reg in registrations {
        let result = client.register(&reg.resource_kind, &reg.request).await?;
        info!(
            service_id = %reg.request.service_id,
            resource_kind = %reg.resource_kind,
            message = %result.message,
            "[AutoRegistrar] Registered"
        );
    }
    Ok(())
}
