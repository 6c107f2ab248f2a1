//! Builds resource records from RPC records for the local response.
//!
//! Records that fail validation are skipped by the caller; one bad record
//! does not fail the whole query.

use hickory_proto::rr::rdata::{self, MX, TXT};
use hickory_proto::rr::{DNSClass, Name, RData, Record};
use std::borrow::Cow;
use std::net::{Ipv4Addr, Ipv6Addr};
use veil_dns_domain::{DnsRecord, DomainError, RecordType};

/// Applied when the RPC record carries TTL 0.
const DEFAULT_RECORD_TTL: u32 = 300;

/// Applied when an MX value is a bare exchange without a preference.
const DEFAULT_MX_PREFERENCE: u16 = 10;

pub struct RecordBuilder;

impl RecordBuilder {
    /// Construct the resource record for one RPC record, owned by the
    /// question name. All records are class IN.
    pub fn build(name: &Name, record: &DnsRecord) -> Result<Record, DomainError> {
        let ttl = if record.ttl == 0 {
            DEFAULT_RECORD_TTL
        } else {
            record.ttl
        };

        let rdata = match record.record_type {
            RecordType::A => {
                let ip: Ipv4Addr = record.value.parse().map_err(|_| {
                    DomainError::InvalidIpAddress(format!("invalid IPv4: {}", record.value))
                })?;
                RData::A(rdata::A(ip))
            }
            RecordType::AAAA => {
                let ip: Ipv6Addr = record.value.parse().map_err(|_| {
                    DomainError::InvalidIpAddress(format!("invalid IPv6: {}", record.value))
                })?;
                RData::AAAA(rdata::AAAA(ip))
            }
            RecordType::CNAME => RData::CNAME(rdata::CNAME(Self::fqdn(&record.value)?)),
            RecordType::NS => RData::NS(rdata::NS(Self::fqdn(&record.value)?)),
            RecordType::MX => {
                let (preference, exchange) = Self::split_mx(&record.value);
                RData::MX(MX::new(preference, Self::fqdn(exchange)?))
            }
            RecordType::TXT => RData::TXT(TXT::new(vec![record.value.clone()])),
        };

        let mut resource = Record::from_rdata(name.clone(), ttl, rdata);
        resource.set_dns_class(DNSClass::IN);
        Ok(resource)
    }

    /// The remote encodes MX values as `"<preference> <exchange>"`; a bare
    /// exchange gets the default preference.
    fn split_mx(value: &str) -> (u16, &str) {
        if let Some((preference, exchange)) = value.split_once(' ') {
            if let Ok(preference) = preference.parse::<u16>() {
                return (preference, exchange.trim_start());
            }
        }
        (DEFAULT_MX_PREFERENCE, value)
    }

    fn fqdn(target: &str) -> Result<Name, DomainError> {
        let fqdn: Cow<'_, str> = if target.ends_with('.') {
            Cow::Borrowed(target)
        } else {
            Cow::Owned(format!("{}.", target))
        };
        Name::from_utf8(fqdn.as_ref())
            .map_err(|e| DomainError::InvalidRecord(format!("invalid target '{}': {}", target, e)))
    }
}
