//! Mapping between `hearth_dns_domain::RecordType` and the wire-level
//! `hickory_proto` record type, kept in one place.

use hearth_dns_domain::RecordType;
use hickory_proto::rr::RecordType as WireRecordType;

pub fn from_wire(wire: WireRecordType) -> RecordType {
    match wire {
        WireRecordType::A => RecordType::A,
        WireRecordType::AAAA => RecordType::AAAA,
        WireRecordType::CNAME => RecordType::CNAME,
        WireRecordType::MX => RecordType::MX,
        WireRecordType::TXT => RecordType::TXT,
        WireRecordType::PTR => RecordType::PTR,
        WireRecordType::SRV => RecordType::SRV,
        WireRecordType::SOA => RecordType::SOA,
        WireRecordType::NS => RecordType::NS,
        WireRecordType::HTTPS => RecordType::HTTPS,
        _ => RecordType::Unknown,
    }
}

/// `None` for [`RecordType::Unknown`]: there is no wire type to query for.
pub fn to_wire(record_type: RecordType) -> Option<WireRecordType> {
    match record_type {
        RecordType::A => Some(WireRecordType::A),
        RecordType::AAAA => Some(WireRecordType::AAAA),
        RecordType::CNAME => Some(WireRecordType::CNAME),
        RecordType::MX => Some(WireRecordType::MX),
        RecordType::TXT => Some(WireRecordType::TXT),
        RecordType::PTR => Some(WireRecordType::PTR),
        RecordType::SRV => Some(WireRecordType::SRV),
        RecordType::SOA => Some(WireRecordType::SOA),
        RecordType::NS => Some(WireRecordType::NS),
        RecordType::HTTPS => Some(WireRecordType::HTTPS),
        RecordType::Unknown => None,
    }
}
