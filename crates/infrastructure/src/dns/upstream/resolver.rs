//! Upstream fan-out for the remote tier.
//!
//! Each resolution walks the configured upstream list in order, retrying the
//! whole list up to `max_retries` times; the first upstream that answers
//! without error wins. Results are memoized in the result cache.

use crate::dns::cache::{CacheKey, ResultCache};
use crate::dns::forwarding::{MessageBuilder, ResponseParser};
use crate::dns::transport::{DnsTransport, UdpTransport};
use async_trait::async_trait;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};
use veil_dns_application::ports::{DnsResolver, ResolverStats};
use veil_dns_domain::{DnsRecord, DomainError, RecordType, ResolutionResult, ResolverConfig};

pub struct UpstreamResolver {
    upstreams: Vec<SocketAddr>,
    timeout: Duration,
    max_retries: u32,
    cache: Option<Arc<ResultCache>>,
}

impl UpstreamResolver {
    pub fn new(
        config: &ResolverConfig,
        cache: Option<Arc<ResultCache>>,
    ) -> Result<Self, DomainError> {
        let upstreams = config
            .upstreams
            .iter()
            .map(|addr| {
                addr.parse::<SocketAddr>().map_err(|e| {
                    DomainError::InvalidIpAddress(format!("invalid upstream '{}': {}", addr, e))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            upstreams,
            timeout: config.timeout(),
            max_retries: config.max_retries,
            cache,
        })
    }

    async fn query_upstream(
        &self,
        upstream: SocketAddr,
        domain: &str,
        record_type: RecordType,
    ) -> Result<Vec<DnsRecord>, DomainError> {
        let query = MessageBuilder::build_query(domain, record_type)?;
        let transport = UdpTransport::new(upstream);
        let response = transport.send(&query, self.timeout).await?;
        ResponseParser::parse(&response, domain, record_type)
    }
}

#[async_trait]
impl DnsResolver for UpstreamResolver {
    async fn resolve(
        &self,
        domain: &str,
        record_type: RecordType,
    ) -> Result<ResolutionResult, DomainError> {
        let domain = domain.trim_end_matches('.').to_ascii_lowercase();
        let key = CacheKey::new(&domain, record_type.as_str());

        if let Some(cache) = &self.cache {
            if let Some(mut result) = cache.get(&key) {
                debug!(domain = %domain, record_type = %record_type, "Result cache hit");
                result.cached = true;
                return Ok(result);
            }
        }

        let mut last_err: Option<DomainError> = None;
        for attempt in 0..self.max_retries {
            for upstream in &self.upstreams {
                match self.query_upstream(*upstream, &domain, record_type).await {
                    Ok(records) => {
                        debug!(
                            domain = %domain,
                            record_type = %record_type,
                            upstream = %upstream,
                            records = records.len(),
                            "Upstream resolution succeeded"
                        );
                        let result = ResolutionResult::new(domain.clone(), records);
                        if let Some(cache) = &self.cache {
                            cache.insert(key, result.clone());
                        }
                        return Ok(result);
                    }
                    Err(e) => {
                        warn!(
                            domain = %domain,
                            upstream = %upstream,
                            attempt = attempt,
                            error = %e,
                            "Upstream query failed"
                        );
                        last_err = Some(e);
                    }
                }
            }
        }

        Err(DomainError::AllUpstreamsFailed(
            last_err
                .map(|e| e.to_string())
                .unwrap_or_else(|| "no upstreams configured".to_string()),
        ))
    }

    fn stats(&self) -> ResolverStats {
        ResolverStats {
            upstreams: self.upstreams.iter().map(ToString::to_string).collect(),
            cache_size: self.cache.as_ref().map(|c| c.len()).unwrap_or(0),
        }
    }
}
