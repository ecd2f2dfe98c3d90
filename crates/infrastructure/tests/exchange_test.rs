mod helpers;

use helpers::dns_server_mock::{MockDnsServer, MOCK_ANSWER_V4};

use hearth_dns_domain::DomainError;
use hearth_dns_infrastructure::dns::upstream::{exchange, Upstream, EXCHANGE_TIMEOUT};
use hickory_proto::op::{Message, MessageType, OpCode, Query, ResponseCode};
use hickory_proto::rr::{Name, RData, RecordType};
use std::time::Instant;
use tokio::net::UdpSocket;

fn a_query(domain: &str) -> Message {
    let mut message = Message::new();
    message.set_id(0x1337);
    message.set_message_type(MessageType::Query);
    message.set_op_code(OpCode::Query);
    message.set_recursion_desired(true);
    message.add_query(Query::query(
        Name::from_utf8(format!("{domain}.")).unwrap(),
        RecordType::A,
    ));
    message
}

#[tokio::test]
async fn test_exchange_round_trip() {
    let mock = MockDnsServer::start(60).await.unwrap();
    let upstream = Upstream::new(&mock.addr().to_string()).unwrap();

    let response = exchange(&upstream, &a_query("example.com")).await.unwrap();

    assert_eq!(response.id(), 0x1337);
    assert_eq!(response.response_code(), ResponseCode::NoError);
    match response.answers()[0].data() {
        Some(RData::A(a)) => assert_eq!(a.0, MOCK_ANSWER_V4),
        other => panic!("expected A answer, got {other:?}"),
    }
    assert_eq!(mock.hits(), 1);
}

#[tokio::test]
async fn test_exchange_times_out_against_silent_upstream() {
    // Bound but never reads: the exchange must give up after the read
    // timeout instead of hanging.
    let silent = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    let upstream = Upstream::new(&silent.local_addr().unwrap().to_string()).unwrap();

    let started = Instant::now();
    let result = exchange(&upstream, &a_query("example.com")).await;

    assert!(matches!(result, Err(DomainError::TransportTimeout { .. })));
    assert!(started.elapsed() >= EXCHANGE_TIMEOUT);
}
