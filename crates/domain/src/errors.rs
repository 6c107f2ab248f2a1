use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum DomainError {
    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("Invalid IP address: {0}")]
    InvalidIpAddress(String),

    #[error("Unsupported record type: {0}")]
    UnsupportedRecordType(String),

    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    #[error("Invalid DNS response: {0}")]
    InvalidDnsResponse(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Invalid envelope: {0}")]
    InvalidEnvelope(String),

    #[error("Invalid encryption key: {0}")]
    InvalidEncryptionKey(String),

    #[error("Request to {endpoint} failed: {message}")]
    RpcTransport { endpoint: String, message: String },

    #[error("Endpoint {endpoint} returned HTTP {status}: {body}")]
    RpcStatus {
        endpoint: String,
        status: u16,
        body: String,
    },

    #[error("No endpoints configured")]
    NoEndpoints,

    #[error("All attempts failed: {0}")]
    AllAttemptsFailed(String),

    #[error("Upstream {upstream} failed: {message}")]
    UpstreamFailed { upstream: String, message: String },

    #[error("All upstreams failed: {0}")]
    AllUpstreamsFailed(String),

    #[error("Query timeout")]
    QueryTimeout,

    #[error("I/O error: {0}")]
    IoError(String),
}
