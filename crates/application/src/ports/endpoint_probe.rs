use async_trait::async_trait;

/// One health-check tick: probe every endpoint concurrently and update
/// its health flag.
#[async_trait]
pub trait EndpointProbePort: Send + Sync {
    async fn probe_all(&self);
}
