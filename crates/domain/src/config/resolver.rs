use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Upstream resolution settings for the remote tier.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResolverConfig {
    #[serde(default = "default_upstreams")]
    pub upstreams: Vec<String>,

    /// Per-upstream attempt timeout.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    #[serde(default = "default_true")]
    pub cache_enabled: bool,

    /// Single TTL for the remote result cache; it does not derive
    /// from record TTLs.
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,

    #[serde(default = "default_cache_max_items")]
    pub cache_max_items: usize,
}

impl ResolverConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            upstreams: default_upstreams(),
            timeout_ms: default_timeout_ms(),
            max_retries: default_max_retries(),
            cache_enabled: true,
            cache_ttl_secs: default_cache_ttl_secs(),
            cache_max_items: default_cache_max_items(),
        }
    }
}

fn default_upstreams() -> Vec<String> {
    vec![
        "8.8.8.8:53".to_string(),
        "1.1.1.1:53".to_string(),
        "8.8.4.4:53".to_string(),
    ]
}

fn default_timeout_ms() -> u64 {
    5_000
}

fn default_max_retries() -> u32 {
    3
}

fn default_true() -> bool {
    true
}

fn default_cache_ttl_secs() -> u64 {
    300
}

fn default_cache_max_items() -> usize {
    10_000
}
