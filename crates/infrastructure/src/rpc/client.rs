//! Client side of the resolution RPC.
//!
//! Selects an endpoint per attempt, POSTs the (optionally enveloped) JSON
//! payload, and retries with linear back-off. A failed attempt marks its
//! endpoint unhealthy; resolution errors carried in-band at HTTP 200 are
//! authoritative and never retried.

use crate::crypto::EnvelopeCipher;
use crate::rpc::pool::EndpointPool;
use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, USER_AGENT};
use reqwest::StatusCode;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;
use veil_dns_application::ports::{ApiClientStats, ResolverApi};
use veil_dns_domain::{
    ApiConfig, DomainError, Endpoint, EncryptedPayload, LoadBalancing, ResolutionResult,
    ResolveRequest,
};

/// Fixed value; not OS-dependent.
const OBFUSCATED_USER_AGENT: &str = "Mozilla/5.0 (compatible; DNS-Client/1.0)";

const MAX_IDLE_PER_HOST: usize = 10;
const IDLE_TIMEOUT: Duration = Duration::from_secs(90);

pub struct ApiClient {
    pool: EndpointPool,
    http: reqwest::Client,
    cipher: Option<Arc<EnvelopeCipher>>,
    max_retries: u32,
    retry_delay: Duration,
}

impl ApiClient {
    pub fn new(config: &ApiConfig, cipher: Option<Arc<EnvelopeCipher>>) -> Result<Self, DomainError> {
        let http = reqwest::Client::builder()
            .use_rustls_tls()
            .min_tls_version(reqwest::tls::Version::TLS_1_2)
            .pool_max_idle_per_host(MAX_IDLE_PER_HOST)
            .pool_idle_timeout(IDLE_TIMEOUT)
            .timeout(config.timeout())
            .build()
            .map_err(|e| DomainError::IoError(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            pool: EndpointPool::new(&config.endpoints, config.load_balancing),
            http,
            cipher,
            max_retries: config.max_retries,
            retry_delay: config.retry_delay(),
        })
    }

    /// The probe loop shares this transport with the request path.
    pub fn http_client(&self) -> reqwest::Client {
        self.http.clone()
    }

    pub fn endpoints(&self) -> Vec<Arc<Endpoint>> {
        self.pool.endpoints().to_vec()
    }

    fn build_body(&self, domain: &str, record_type: &str) -> Result<Vec<u8>, DomainError> {
        let request = ResolveRequest::new(domain, record_type);
        let plain = serde_json::to_vec(&request)
            .map_err(|e| DomainError::InvalidRequest(e.to_string()))?;

        match &self.cipher {
            Some(cipher) => {
                let data = cipher.encrypt(&plain)?;
                serde_json::to_vec(&EncryptedPayload { data })
                    .map_err(|e| DomainError::InvalidRequest(e.to_string()))
            }
            None => Ok(plain),
        }
    }

    async fn do_request(
        &self,
        endpoint: &Endpoint,
        body: Vec<u8>,
    ) -> Result<ResolutionResult, DomainError> {
        let response = self
            .http
            .post(&endpoint.url)
            .header(CONTENT_TYPE, "application/json")
            .header("X-API-Key", &endpoint.api_key)
            .header(USER_AGENT, OBFUSCATED_USER_AGENT)
            .body(body)
            .send()
            .await
            .map_err(|e| DomainError::RpcTransport {
                endpoint: endpoint.url.clone(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(DomainError::RpcStatus {
                endpoint: endpoint.url.clone(),
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<ResolutionResult>()
            .await
            .map_err(|e| DomainError::RpcTransport {
                endpoint: endpoint.url.clone(),
                message: format!("failed to decode response: {}", e),
            })
    }
}

#[async_trait]
impl ResolverApi for ApiClient {
    async fn resolve(
        &self,
        domain: &str,
        record_type: &str,
    ) -> Result<ResolutionResult, DomainError> {
        let body = self.build_body(domain, record_type)?;

        let mut last_err = DomainError::NoEndpoints;
        for attempt in 0..self.max_retries {
            let Some(endpoint) = self.pool.select() else {
                return Err(DomainError::NoEndpoints);
            };

            match self.do_request(&endpoint, body.clone()).await {
                Ok(result) => return Ok(result),
                Err(e) => {
                    warn!(
                        endpoint = %endpoint.url,
                        attempt = attempt,
                        error = %e,
                        "Resolution attempt failed"
                    );
                    endpoint.set_healthy(false);
                    last_err = e;
                }
            }

            if attempt + 1 < self.max_retries {
                tokio::time::sleep(self.retry_delay * (attempt + 1)).await;
            }
        }

        Err(DomainError::AllAttemptsFailed(last_err.to_string()))
    }

    fn stats(&self) -> ApiClientStats {
        let load_balancing = match self.pool.policy() {
            LoadBalancing::RoundRobin => "round_robin",
            LoadBalancing::Failover => "failover",
        };
        ApiClientStats {
            endpoints_total: self.pool.len(),
            endpoints_healthy: self.pool.healthy_count(),
            load_balancing: load_balancing.to_string(),
        }
    }
}
