//! Veil DNS Background Jobs
//!
//! Long-running auxiliary tasks: the per-tier cache sweeps and the endpoint
//! health ticker, spawned through a builder-style runner that threads a
//! shared cancellation token.
mod cache_sweep;
mod endpoint_health;
mod runner;

pub use cache_sweep::CacheSweepJob;
pub use endpoint_health::EndpointHealthJob;
pub use runner::{JobRunner, SpawnableJob};
