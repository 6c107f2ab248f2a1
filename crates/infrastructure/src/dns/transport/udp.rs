//! UDP transport for upstream DNS queries (RFC 1035 §4.2.1)
//!
//! Messages are sent as-is (no framing), up to 4096 bytes with EDNS(0).

use super::DnsTransport;
use async_trait::async_trait;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::UdpSocket;
use veil_dns_domain::DomainError;

/// Maximum UDP DNS response size with EDNS(0)
const MAX_UDP_RESPONSE_SIZE: usize = 4096;

pub struct UdpTransport {
    server_addr: SocketAddr,
}

impl UdpTransport {
    pub fn new(server_addr: SocketAddr) -> Self {
        Self { server_addr }
    }
}

#[async_trait]
impl DnsTransport for UdpTransport {
    async fn send(&self, message_bytes: &[u8], timeout: Duration) -> Result<Vec<u8>, DomainError> {
        let bind_addr: SocketAddr = if self.server_addr.is_ipv4() {
            "0.0.0.0:0".parse().unwrap()
        } else {
            "[::]:0".parse().unwrap()
        };

        let socket = UdpSocket::bind(bind_addr).await.map_err(|e| {
            DomainError::UpstreamFailed {
                upstream: self.server_addr.to_string(),
                message: format!("failed to bind UDP socket: {}", e),
            }
        })?;

        tokio::time::timeout(timeout, socket.send_to(message_bytes, self.server_addr))
            .await
            .map_err(|_| DomainError::UpstreamFailed {
                upstream: self.server_addr.to_string(),
                message: "timeout sending query".to_string(),
            })?
            .map_err(|e| DomainError::UpstreamFailed {
                upstream: self.server_addr.to_string(),
                message: format!("failed to send query: {}", e),
            })?;

        let mut recv_buf = vec![0u8; MAX_UDP_RESPONSE_SIZE];
        let (bytes_received, from_addr) =
            tokio::time::timeout(timeout, socket.recv_from(&mut recv_buf))
                .await
                .map_err(|_| DomainError::UpstreamFailed {
                    upstream: self.server_addr.to_string(),
                    message: "timeout waiting for response".to_string(),
                })?
                .map_err(|e| DomainError::UpstreamFailed {
                    upstream: self.server_addr.to_string(),
                    message: format!("failed to receive response: {}", e),
                })?;

        if from_addr.ip() != self.server_addr.ip() {
            tracing::warn!(
                expected = %self.server_addr,
                received_from = %from_addr,
                "UDP response from unexpected source"
            );
        }

        recv_buf.truncate(bytes_received);
        Ok(recv_buf)
    }
}
