//! Endpoint pool with the two selection policies.
//!
//! Endpoint order is fixed at startup; only the per-endpoint health flag
//! changes. When every endpoint is unhealthy both policies fall back to the
//! first endpoint as a last-resort attempt.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use veil_dns_domain::{Endpoint, EndpointConfig, LoadBalancing};

pub struct EndpointPool {
    endpoints: Vec<Arc<Endpoint>>,
    policy: LoadBalancing,
    cursor: AtomicUsize,
}

impl EndpointPool {
    pub fn new(configs: &[EndpointConfig], policy: LoadBalancing) -> Self {
        let endpoints = configs
            .iter()
            .map(|c| Arc::new(Endpoint::new(c.url.clone(), c.api_key.clone(), c.weight)))
            .collect();

        Self {
            endpoints,
            policy,
            cursor: AtomicUsize::new(0),
        }
    }

    pub fn select(&self) -> Option<Arc<Endpoint>> {
        if self.endpoints.is_empty() {
            return None;
        }
        match self.policy {
            LoadBalancing::RoundRobin => self.select_round_robin(),
            LoadBalancing::Failover => self.select_failover(),
        }
    }

    /// One counter increment per call; scan up to `n` slots forward from
    /// `counter % n` for a healthy endpoint.
    fn select_round_robin(&self) -> Option<Arc<Endpoint>> {
        let n = self.endpoints.len();
        let start = self.cursor.fetch_add(1, Ordering::Relaxed);
        for offset in 0..n {
            let endpoint = &self.endpoints[(start + offset) % n];
            if endpoint.is_healthy() {
                return Some(Arc::clone(endpoint));
            }
        }
        self.endpoints.first().cloned()
    }

    fn select_failover(&self) -> Option<Arc<Endpoint>> {
        self.endpoints
            .iter()
            .find(|endpoint| endpoint.is_healthy())
            .or_else(|| self.endpoints.first())
            .cloned()
    }

    pub fn endpoints(&self) -> &[Arc<Endpoint>] {
        &self.endpoints
    }

    pub fn policy(&self) -> LoadBalancing {
        self.policy
    }

    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }

    pub fn healthy_count(&self) -> usize {
        self.endpoints.iter().filter(|e| e.is_healthy()).count()
    }
}
