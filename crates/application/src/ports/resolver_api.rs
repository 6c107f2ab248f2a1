use async_trait::async_trait;
use veil_dns_domain::{DomainError, ResolutionResult};

/// Endpoint pool statistics exposed by the RPC client.
#[derive(Debug, Clone)]
pub struct ApiClientStats {
    pub endpoints_total: usize,
    pub endpoints_healthy: usize,
    pub load_balancing: String,
}

/// The local tier's view of the remote resolution service.
///
/// `record_type` is the mnemonic as taken from the inbound question; the
/// remote side decides whether it is supported.
#[async_trait]
pub trait ResolverApi: Send + Sync {
    async fn resolve(
        &self,
        domain: &str,
        record_type: &str,
    ) -> Result<ResolutionResult, DomainError>;

    fn stats(&self) -> ApiClientStats;
}
