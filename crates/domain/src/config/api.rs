use serde::{Deserialize, Serialize};
use std::time::Duration;

/// One remote RPC endpoint as configured.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EndpointConfig {
    pub url: String,
    pub api_key: String,

    /// Advisory; selection policies do not weight endpoints.
    #[serde(default = "default_weight")]
    pub weight: u32,
}

/// Endpoint selection policy for the RPC client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadBalancing {
    #[default]
    RoundRobin,
    Failover,
}

/// Settings for the outbound resolution RPC.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    #[serde(default)]
    pub endpoints: Vec<EndpointConfig>,

    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,

    #[serde(default = "default_health_check_freq_secs")]
    pub health_check_freq_secs: u64,

    #[serde(default)]
    pub load_balancing: LoadBalancing,
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }

    pub fn health_check_freq(&self) -> Duration {
        Duration::from_secs(self.health_check_freq_secs)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoints: Vec::new(),
            timeout_ms: default_timeout_ms(),
            max_retries: default_max_retries(),
            retry_delay_ms: default_retry_delay_ms(),
            health_check_freq_secs: default_health_check_freq_secs(),
            load_balancing: LoadBalancing::default(),
        }
    }
}

fn default_weight() -> u32 {
    1
}

fn default_timeout_ms() -> u64 {
    10_000
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_delay_ms() -> u64 {
    500
}

fn default_health_check_freq_secs() -> u64 {
    30
}
