//! SessionSweeper processor.
//!
//! Periodically drops checkout sessions that have outlived the configured
//! TTL. Both the TTL and the sweep interval are re-read from the shared
//! config on every tick, so a config reload takes effect without a restart.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{RwLock, watch};
use tracing::{debug, info};

use crate::checkout::SessionStore;
use crate::config::CheckoutConfig;

pub struct SessionSweeper {
    store: SessionStore,
    config: Arc<RwLock<CheckoutConfig>>,
    shutdown_rx: watch::Receiver<bool>,
}

impl SessionSweeper {
    pub fn new(
        store: SessionStore,
        config: Arc<RwLock<CheckoutConfig>>,
        shutdown_rx: watch::Receiver<bool>,
    ) -> Self {
        Self {
            store,
            config,
            shutdown_rx,
        }
    }

    /// Run until shutdown is signalled.
    pub async fn run(mut self) {
        info!("SessionSweeper started");

        loop {
            let interval = self.config.read().await.sweep_interval;
            tokio::select! {
                biased;

                _ = self.shutdown_rx.changed() => {
                    if *self.shutdown_rx.borrow() {
                        info!("SessionSweeper received shutdown signal");
                        break;
                    }
                }

                _ = tokio::time::sleep(interval.max(Duration::from_secs(1))) => {
                    self.sweep_once().await;
                }
            }
        }

        info!("SessionSweeper stopped");
    }

    async fn sweep_once(&self) -> usize {
        let ttl = self.config.read().await.session_ttl;
        let removed = self.store.sweep(ttl).await;
        if removed > 0 {
            info!(removed, "Swept expired checkout sessions");
        } else {
            debug!("No expired checkout sessions");
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checkout::memory::{MemoryBackend, started};

    #[tokio::test]
    async fn test_sweep_once_uses_configured_ttl() {
        let backend = MemoryBackend::seeded();
        let store = SessionStore::default();
        store.insert(started(&backend).await).await;
        let config = Arc::new(RwLock::new(CheckoutConfig::default()));
        let (_tx, rx) = watch::channel(false);
        let sweeper = SessionSweeper::new(store.clone(), config.clone(), rx);

        assert_eq!(sweeper.sweep_once().await, 0);

        config.write().await.session_ttl = Duration::ZERO;
        assert_eq!(sweeper.sweep_once().await, 1);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_run_stops_on_shutdown() {
        let config = Arc::new(RwLock::new(CheckoutConfig::default()));
        let (tx, rx) = watch::channel(false);
        let sweeper = SessionSweeper::new(SessionStore::default(), config, rx);
        let handle = tokio::spawn(sweeper.run());
        tx.send(true).unwrap();
        handle.await.unwrap();
    }
}
