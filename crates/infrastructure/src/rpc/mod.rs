mod client;
mod health;
mod pool;

pub use client::ApiClient;
pub use health::HealthProber;
pub use pool::EndpointPool;
