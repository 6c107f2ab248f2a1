use async_trait::async_trait;
use serde::Serialize;
use veil_dns_domain::{DomainError, RecordType, ResolutionResult};

/// Statistics surfaced in the remote tier's health endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ResolverStats {
    pub upstreams: Vec<String>,
    pub cache_size: usize,
}

/// The remote tier's recursive resolver.
#[async_trait]
pub trait DnsResolver: Send + Sync {
    async fn resolve(
        &self,
        domain: &str,
        record_type: RecordType,
    ) -> Result<ResolutionResult, DomainError>;

    fn stats(&self) -> ResolverStats;
}
