use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::info;
use veil_dns_application::ports::EndpointProbePort;

const DEFAULT_CHECK_INTERVAL_SECS: u64 = 30;

/// Ticks the endpoint health prober. Health transitions are not serialized
/// against in-flight retries; between ticks the request path's pessimistic
/// mark-unhealthy-on-failure is authoritative.
pub struct EndpointHealthJob {
    prober: Arc<dyn EndpointProbePort>,
    interval_secs: u64,
    shutdown: CancellationToken,
}

impl EndpointHealthJob {
    pub fn new(prober: Arc<dyn EndpointProbePort>) -> Self {
        Self {
            prober,
            interval_secs: DEFAULT_CHECK_INTERVAL_SECS,
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
        info!(
            interval_secs = self.interval_secs,
            "Starting endpoint health job"
        );

        let mut interval = tokio::time::interval(Duration::from_secs(self.interval_secs));
        loop {
            tokio::select! {
                _ = self.shutdown.cancelled() => {
                    info!("EndpointHealthJob: shutting down");
                    break;
                }
                _ = interval.tick() => {
                    self.prober.probe_all().await;
                }
            }
        }
    }
}
