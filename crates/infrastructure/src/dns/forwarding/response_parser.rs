use hickory_proto::op::{Message, ResponseCode};
use hickory_proto::rr::RData;
use veil_dns_domain::{DnsRecord, DomainError, RecordType};

/// Fallback when an upstream answer reports TTL 0.
const FALLBACK_TTL: u32 = 300;

pub struct ResponseParser;

impl ResponseParser {
    /// Extract RPC records of the requested type from a raw upstream
    /// response.
    ///
    /// NXDOMAIN and server error rcodes become resolution errors; NOERROR
    /// with no matching answers is a valid "no data" result. Answer TTLs
    /// are preserved.
    pub fn parse(
        response_bytes: &[u8],
        domain: &str,
        record_type: RecordType,
    ) -> Result<Vec<DnsRecord>, DomainError> {
        let message = Message::from_vec(response_bytes).map_err(|e| {
            DomainError::InvalidDnsResponse(format!("failed to parse response: {}", e))
        })?;

        match message.response_code() {
            ResponseCode::NoError => {}
            ResponseCode::NXDomain => {
                return Err(DomainError::InvalidDnsResponse(format!(
                    "no such host: {}",
                    domain
                )))
            }
            code => {
                return Err(DomainError::InvalidDnsResponse(format!(
                    "upstream returned {}",
                    code
                )))
            }
        }

        let mut records = Vec::new();
        for answer in message.answers() {
            let value = match (record_type, answer.data()) {
                (RecordType::A, RData::A(a)) => a.0.to_string(),
                (RecordType::AAAA, RData::AAAA(aaaa)) => aaaa.0.to_string(),
                (RecordType::CNAME, RData::CNAME(cname)) => cname.0.to_utf8(),
                (RecordType::NS, RData::NS(ns)) => ns.0.to_utf8(),
                (RecordType::MX, RData::MX(mx)) => {
                    format!("{} {}", mx.preference(), mx.exchange())
                }
                (RecordType::TXT, RData::TXT(txt)) => txt
                    .txt_data()
                    .iter()
                    .map(|part| String::from_utf8_lossy(part))
                    .collect::<String>(),
                _ => continue,
            };

            let ttl = if answer.ttl() == 0 {
                FALLBACK_TTL
            } else {
                answer.ttl()
            };
            records.push(DnsRecord::new(domain, record_type, value, ttl));
        }

        Ok(records)
    }
}
