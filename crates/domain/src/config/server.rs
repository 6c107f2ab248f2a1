use serde::{Deserialize, Serialize};

/// Transports the local DNS listener binds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ListenProtocol {
    #[default]
    Udp,
    Tcp,
    Both,
}

impl ListenProtocol {
    pub fn udp(&self) -> bool {
        matches!(self, ListenProtocol::Udp | ListenProtocol::Both)
    }

    pub fn tcp(&self) -> bool {
        matches!(self, ListenProtocol::Tcp | ListenProtocol::Both)
    }
}

/// Bind settings for the local DNS listener.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DnsListenConfig {
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    #[serde(default = "default_dns_port")]
    pub port: u16,

    #[serde(default)]
    pub protocol: ListenProtocol,
}

impl DnsListenConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.listen_addr, self.port)
    }
}

impl Default for DnsListenConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            port: default_dns_port(),
            protocol: ListenProtocol::default(),
        }
    }
}

/// Bind settings for the remote HTTP server.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HttpServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_http_port")]
    pub port: u16,
}

impl HttpServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_http_port(),
        }
    }
}

fn default_listen_addr() -> String {
    "127.0.0.1".to_string()
}

fn default_dns_port() -> u16 {
    53
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_http_port() -> u16 {
    8443
}
