use crate::dns::record_type_map::RecordTypeMapper;
use hickory_proto::op::{Edns, Message, MessageType, OpCode, Query};
use hickory_proto::rr::{DNSClass, Name};
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};
use std::str::FromStr;
use veil_dns_domain::{DomainError, RecordType};

pub struct MessageBuilder;

impl MessageBuilder {
    /// Build a recursive query for `domain`/`record_type` with a random
    /// message ID.
    pub fn build_query(domain: &str, record_type: RecordType) -> Result<Vec<u8>, DomainError> {
        let name = Name::from_str(domain).map_err(|e| {
            DomainError::InvalidDomainName(format!("Invalid domain '{}': {}", domain, e))
        })?;

        let mut query = Query::new();
        query.set_name(name);
        query.set_query_type(RecordTypeMapper::to_hickory(record_type));
        query.set_query_class(DNSClass::IN);

        let mut message = Message::new();
        message.set_id(fastrand::u16(..));
        message.set_message_type(MessageType::Query);
        message.set_op_code(OpCode::Query);
        message.set_recursion_desired(true);
        message.add_query(query);
        message.set_edns(Self::default_edns());

        Self::serialize(&message)
    }

    fn default_edns() -> Edns {
        let mut edns = Edns::new();
        edns.set_max_payload(4096);
        edns.set_version(0);
        edns
    }

    pub fn serialize(message: &Message) -> Result<Vec<u8>, DomainError> {
        let mut buf = Vec::with_capacity(512);
        let mut encoder = BinEncoder::new(&mut buf);

        message.emit(&mut encoder).map_err(|e| {
            DomainError::IoError(format!("Failed to serialize DNS message: {}", e))
        })?;

        Ok(buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_parseable_query() {
        let bytes = MessageBuilder::build_query("example.com", RecordType::A).unwrap();
        let message = Message::from_vec(&bytes).unwrap();
        assert_eq!(message.queries().len(), 1);
        let query = &message.queries()[0];
        assert_eq!(query.name().to_utf8(), "example.com.");
        assert_eq!(
            query.query_type(),
            hickory_proto::rr::RecordType::A
        );
        assert!(message.recursion_desired());
    }

    #[test]
    fn rejects_invalid_domain() {
        assert!(MessageBuilder::build_query("exa mple..com..", RecordType::A).is_err());
    }
}
