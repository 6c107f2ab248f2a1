use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Local response cache settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_max_items")]
    pub max_items: usize,

    /// TTL for answers whose records carry none.
    #[serde(default = "default_default_ttl_secs")]
    pub default_ttl_secs: u64,

    #[serde(default = "default_min_ttl_secs")]
    pub min_ttl_secs: u64,

    #[serde(default = "default_max_ttl_secs")]
    pub max_ttl_secs: u64,

    /// TTL for cached NXDOMAIN responses.
    #[serde(default = "default_negative_ttl_secs")]
    pub negative_ttl_secs: u64,
}

impl CacheConfig {
    pub fn default_ttl(&self) -> Duration {
        Duration::from_secs(self.default_ttl_secs)
    }

    pub fn min_ttl(&self) -> Duration {
        Duration::from_secs(self.min_ttl_secs)
    }

    pub fn max_ttl(&self) -> Duration {
        Duration::from_secs(self.max_ttl_secs)
    }

    pub fn negative_ttl(&self) -> Duration {
        Duration::from_secs(self.negative_ttl_secs)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_items: default_max_items(),
            default_ttl_secs: default_default_ttl_secs(),
            min_ttl_secs: default_min_ttl_secs(),
            max_ttl_secs: default_max_ttl_secs(),
            negative_ttl_secs: default_negative_ttl_secs(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_max_items() -> usize {
    10_000
}

fn default_default_ttl_secs() -> u64 {
    300
}

fn default_min_ttl_secs() -> u64 {
    60
}

fn default_max_ttl_secs() -> u64 {
    86_400
}

fn default_negative_ttl_secs() -> u64 {
    300
}
