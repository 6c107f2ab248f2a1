use crate::record_type::RecordType;
use serde::{Deserialize, Serialize};

/// A single resolved record in RPC form.
///
/// `value` encoding per type: dotted-quad IPv4 for A, RFC 5952 IPv6 for AAAA,
/// fully qualified target for CNAME/NS, raw text for TXT, and
/// `"<preference> <exchange>"` for MX.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsRecord {
    pub name: String,
    #[serde(rename = "type")]
    pub record_type: RecordType,
    pub value: String,
    pub ttl: u32,
}

impl DnsRecord {
    pub fn new(
        name: impl Into<String>,
        record_type: RecordType,
        value: impl Into<String>,
        ttl: u32,
    ) -> Self {
        Self {
            name: name.into(),
            record_type,
            value: value.into(),
            ttl,
        }
    }
}

/// The resolution RPC request body (plaintext form).
///
/// The type field carries the mnemonic verbatim; the server uppercases it and
/// defaults to `A` when empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolveRequest {
    #[serde(default)]
    pub domain: String,
    #[serde(rename = "type", default)]
    pub record_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encrypted: Option<String>,
}

impl ResolveRequest {
    pub fn new(domain: impl Into<String>, record_type: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            record_type: record_type.into(),
            encrypted: None,
        }
    }
}

/// The resolution RPC response body.
///
/// Empty `records` with an empty `error` is a valid "no data" answer.
/// A non-empty `error` is a negative answer; the local tier maps it to
/// NXDOMAIN.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResolutionResult {
    pub domain: String,
    #[serde(default)]
    pub records: Vec<DnsRecord>,
    #[serde(default)]
    pub cached: bool,
    #[serde(default)]
    pub error: String,
}

impl ResolutionResult {
    pub fn new(domain: impl Into<String>, records: Vec<DnsRecord>) -> Self {
        Self {
            domain: domain.into(),
            records,
            cached: false,
            error: String::new(),
        }
    }

    pub fn failure(domain: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            records: Vec::new(),
            cached: false,
            error: error.into(),
        }
    }

    /// True when this result is a negative answer rather than "no data".
    pub fn is_negative(&self) -> bool {
        !self.error.is_empty()
    }
}

/// Outer body when the envelope cipher is configured:
/// `data` is base64(nonce || ciphertext || tag) of the plaintext request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncryptedPayload {
    #[serde(default)]
    pub data: String,
}
