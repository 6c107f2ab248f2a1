use hickory_proto::rr::RecordType as HickoryRecordType;
use veil_dns_domain::RecordType;

/// Bidirectional mapping between the RPC record types and hickory's.
pub struct RecordTypeMapper;

impl RecordTypeMapper {
    pub fn to_hickory(record_type: RecordType) -> HickoryRecordType {
        match record_type {
            RecordType::A => HickoryRecordType::A,
            RecordType::AAAA => HickoryRecordType::AAAA,
            RecordType::CNAME => HickoryRecordType::CNAME,
            RecordType::MX => HickoryRecordType::MX,
            RecordType::TXT => HickoryRecordType::TXT,
            RecordType::NS => HickoryRecordType::NS,
        }
    }

    /// Returns `None` for types the RPC does not carry.
    pub fn from_hickory(record_type: HickoryRecordType) -> Option<RecordType> {
        match record_type {
            HickoryRecordType::A => Some(RecordType::A),
            HickoryRecordType::AAAA => Some(RecordType::AAAA),
            HickoryRecordType::CNAME => Some(RecordType::CNAME),
            HickoryRecordType::MX => Some(RecordType::MX),
            HickoryRecordType::TXT => Some(RecordType::TXT),
            HickoryRecordType::NS => Some(RecordType::NS),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_supported_types() {
        for record_type in RecordType::all() {
            let hickory = RecordTypeMapper::to_hickory(record_type);
            assert_eq!(RecordTypeMapper::from_hickory(hickory), Some(record_type));
        }
    }

    #[test]
    fn unsupported_types_map_to_none() {
        assert_eq!(RecordTypeMapper::from_hickory(HickoryRecordType::PTR), None);
        assert_eq!(RecordTypeMapper::from_hickory(HickoryRecordType::SOA), None);
    }
}
