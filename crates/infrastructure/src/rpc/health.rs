//! Periodic endpoint health probing.
//!
//! Each tick fans out one probe task per endpoint: GET on the derived
//! health URL with a 5-second timeout; HTTP 200 marks the endpoint healthy,
//! anything else (including transport errors) marks it unhealthy. Probes
//! run on the same HTTP transport as real requests.

use async_trait::async_trait;
use reqwest::StatusCode;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};
use veil_dns_application::ports::EndpointProbePort;
use veil_dns_domain::Endpoint;

const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

pub struct HealthProber {
    endpoints: Vec<Arc<Endpoint>>,
    http: reqwest::Client,
}

impl HealthProber {
    pub fn new(endpoints: Vec<Arc<Endpoint>>, http: reqwest::Client) -> Self {
        Self { endpoints, http }
    }

    async fn probe_endpoint(http: reqwest::Client, endpoint: Arc<Endpoint>) {
        let healthy = match http
            .get(endpoint.health_url())
            .timeout(PROBE_TIMEOUT)
            .send()
            .await
        {
            Ok(response) => response.status() == StatusCode::OK,
            Err(e) => {
                debug!(endpoint = %endpoint.url, error = %e, "Health probe failed");
                false
            }
        };

        let was_healthy = endpoint.is_healthy();
        endpoint.set_healthy(healthy);

        if healthy && !was_healthy {
            info!(endpoint = %endpoint.url, "Endpoint marked HEALTHY");
        } else if !healthy && was_healthy {
            warn!(endpoint = %endpoint.url, "Endpoint marked UNHEALTHY");
        }
    }
}

#[async_trait]
impl EndpointProbePort for HealthProber {
    async fn probe_all(&self) {
        let mut probes = Vec::with_capacity(self.endpoints.len());
        for endpoint in &self.endpoints {
            let endpoint = Arc::clone(endpoint);
            let http = self.http.clone();
            probes.push(tokio::spawn(Self::probe_endpoint(http, endpoint)));
        }
        for probe in probes {
            let _ = probe.await;
        }
    }
}
