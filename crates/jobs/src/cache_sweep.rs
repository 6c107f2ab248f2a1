use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::info;
use veil_dns_application::ports::CacheMaintenancePort;

const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 60;

/// Periodically deletes expired cache entries. Each sweep holds the
/// cache's exclusive section for its whole pass.
pub struct CacheSweepJob {
    cache: Arc<dyn CacheMaintenancePort>,
    interval_secs: u64,
    shutdown: CancellationToken,
}

impl CacheSweepJob {
    pub fn new(cache: Arc<dyn CacheMaintenancePort>) -> Self {
        Self {
            cache,
            interval_secs: DEFAULT_SWEEP_INTERVAL_SECS,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_interval(mut self, interval_secs: u64) -> Self {
        self.interval_secs = interval_secs;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub async fn start(self: Arc<Self>) {
        info!(interval_secs = self.interval_secs, "Starting cache sweep job");

        let mut interval = tokio::time::interval(Duration::from_secs(self.interval_secs));
        loop {
            tokio::select! {
                _ = self.shutdown.cancelled() => {
                    info!("CacheSweepJob: shutting down");
                    break;
                }
                _ = interval.tick() => {
                    let removed = self.cache.sweep_expired();
                    if removed > 0 {
                        info!(
                            removed = removed,
                            cache_size = self.cache.len(),
                            "Cache sweep completed"
                        );
                    }
                }
            }
        }
    }
}
