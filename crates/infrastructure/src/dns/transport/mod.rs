use async_trait::async_trait;
use std::time::Duration;
use veil_dns_domain::DomainError;

mod udp;

pub use udp::UdpTransport;

/// One exchange with an upstream DNS server.
#[async_trait]
pub trait DnsTransport: Send + Sync {
    async fn send(&self, message_bytes: &[u8], timeout: Duration) -> Result<Vec<u8>, DomainError>;
}
