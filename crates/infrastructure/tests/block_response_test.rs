use hearth_dns_infrastructure::dns::block_response::{
    block_reply, error_reply, rcode_str, BLOCK_TTL,
};
use hickory_proto::op::{Message, MessageType, OpCode, Query, ResponseCode};
use hickory_proto::rr::{Name, RData, RecordType};

fn query(domain: &str, record_type: RecordType) -> Message {
    let mut message = Message::new();
    message.set_id(0x4242);
    message.set_message_type(MessageType::Query);
    message.set_op_code(OpCode::Query);
    message.set_recursion_desired(true);
    message.add_query(Query::query(
        Name::from_utf8(format!("{domain}.")).unwrap(),
        record_type,
    ));
    message
}

#[test]
fn test_a_block_answers_null_route() {
    let reply = block_reply(&query("ads.example", RecordType::A));

    assert_eq!(reply.id(), 0x4242);
    assert_eq!(reply.message_type(), MessageType::Response);
    assert_eq!(reply.response_code(), ResponseCode::NoError);
    assert!(reply.recursion_available());
    assert_eq!(reply.queries().len(), 1);

    let answer = &reply.answers()[0];
    assert_eq!(answer.ttl(), BLOCK_TTL);
    match answer.data() {
        Some(RData::A(a)) => assert!(a.0.is_unspecified()),
        other => panic!("expected A record, got {other:?}"),
    }
}

#[test]
fn test_aaaa_block_answers_null_route() {
    let reply = block_reply(&query("ads.example", RecordType::AAAA));

    assert_eq!(reply.response_code(), ResponseCode::NoError);
    let answer = &reply.answers()[0];
    assert_eq!(answer.ttl(), BLOCK_TTL);
    match answer.data() {
        Some(RData::AAAA(aaaa)) => assert!(aaaa.0.is_unspecified()),
        other => panic!("expected AAAA record, got {other:?}"),
    }
}

#[test]
fn test_other_qtypes_are_refused() {
    for record_type in [RecordType::TXT, RecordType::MX, RecordType::SRV] {
        let reply = block_reply(&query("ads.example", record_type));
        assert_eq!(reply.response_code(), ResponseCode::Refused);
        assert!(reply.answers().is_empty());
        assert!(reply.recursion_available());
    }
}

#[test]
fn test_error_reply_echoes_query() {
    let reply = error_reply(&query("example.com", RecordType::A), ResponseCode::NXDomain);

    assert_eq!(reply.id(), 0x4242);
    assert_eq!(reply.response_code(), ResponseCode::NXDomain);
    assert!(reply.answers().is_empty());
    assert!(reply.recursion_available());
    assert_eq!(reply.queries()[0].name().to_utf8(), "example.com.");
}

#[test]
fn test_rcode_strings() {
    assert_eq!(rcode_str(ResponseCode::NoError), "NOERROR");
    assert_eq!(rcode_str(ResponseCode::NXDomain), "NXDOMAIN");
    assert_eq!(rcode_str(ResponseCode::ServFail), "SERVFAIL");
    assert_eq!(rcode_str(ResponseCode::Refused), "REFUSED");
}
