// src/util/service/health.rs
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::util::io::backend::DocumentBackend;
use crate::util::io::event::{emit, AppEvent, AppEventSender};

/// Last known reachability of the backend, shown in the status bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackendStatus {
    #[default]
    Unknown,
    Online,
    Offline,
}

impl BackendStatus {
    pub fn label(&self) -> &'static str {
        match self {
            BackendStatus::Unknown => "checking...",
            BackendStatus::Online => "online",
            BackendStatus::Offline => "offline",
        }
    }
}

/// Polls `GET /health` on an interval. Purely informational: nothing is
/// blocked while the backend reports offline.
pub struct HealthMonitor {
    backend: Arc<dyn DocumentBackend>,
    interval: Duration,
}

impl HealthMonitor {
    pub fn new(backend: Arc<dyn DocumentBackend>, interval: Duration) -> Self {
        Self { backend, interval }
    }

    /// One health check. Anything but a `{"status": "ok"}` body counts as offline.
    pub async fn check(&self) -> BackendStatus {
        match self.backend.health().await {
            Ok(health) if health.is_ok() => BackendStatus::Online,
            Ok(health) => {
                tracing::debug!(status = %health.status, "backend reported unhealthy");
                BackendStatus::Offline
            }
            Err(err) => {
                tracing::debug!(error = %err, "health check failed");
                BackendStatus::Offline
            }
        }
    }

    /// Probe immediately, then every interval, until the event channel closes.
    pub fn spawn(self, sender: AppEventSender) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(self.interval);
            loop {
                ticker.tick().await;
                if sender.is_closed() {
                    break;
                }
                let status = self.check().await;
                emit(&sender, AppEvent::HealthChecked(status));
            }
        })
    }
}
