use crate::ports::ResolverApi;
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;
use veil_dns_domain::{DomainError, ResolutionResult};

/// Resolves a question that missed the local cache through the remote
/// resolution service.
pub struct ResolveQueryUseCase {
    api: Arc<dyn ResolverApi>,
}

impl ResolveQueryUseCase {
    pub fn new(api: Arc<dyn ResolverApi>) -> Self {
        Self { api }
    }

    /// `name` is the owner name as it appeared in the question; the RPC
    /// carries it without the trailing dot.
    pub async fn execute(
        &self,
        name: &str,
        record_type: &str,
    ) -> Result<ResolutionResult, DomainError> {
        let domain = name.strip_suffix('.').unwrap_or(name);

        let started = Instant::now();
        let result = self.api.resolve(domain, record_type).await?;

        debug!(
            domain = %domain,
            record_type = %record_type,
            records = result.records.len(),
            cached = result.cached,
            negative = result.is_negative(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Remote resolution completed"
        );

        Ok(result)
    }
}
