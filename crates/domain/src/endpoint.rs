use std::sync::atomic::{AtomicBool, Ordering};

const RESOLVE_SUFFIX: &str = "/api/v1/resolve";

/// One remote RPC endpoint.
///
/// Everything but `healthy` is immutable after startup. The health flag is
/// toggled concurrently by the probe loop and by request failures; readers
/// may observe a stale value but never a torn one.
#[derive(Debug)]
pub struct Endpoint {
    pub url: String,
    pub api_key: String,
    pub weight: u32,
    healthy: AtomicBool,
}

impl Endpoint {
    /// Endpoints start healthy (optimistic) and are demoted on failure.
    pub fn new(url: impl Into<String>, api_key: impl Into<String>, weight: u32) -> Self {
        Self {
            url: url.into(),
            api_key: api_key.into(),
            weight,
            healthy: AtomicBool::new(true),
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.healthy.load(Ordering::Relaxed)
    }

    pub fn set_healthy(&self, healthy: bool) {
        self.healthy.store(healthy, Ordering::Relaxed);
    }

    /// Derive the probe URL: strip the resolve suffix and append `/health`.
    /// Without the suffix the endpoint URL is probed as given.
    pub fn health_url(&self) -> String {
        match self.url.strip_suffix(RESOLVE_SUFFIX) {
            Some(base) => format!("{}/health", base),
            None => self.url.clone(),
        }
    }
}
