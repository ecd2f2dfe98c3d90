//! Synthesized replies for blocked names and local error conditions.

use hickory_proto::op::{Message, MessageType, ResponseCode};
use hickory_proto::rr::rdata::{A, AAAA};
use hickory_proto::rr::{RData, Record, RecordType};
use std::net::{Ipv4Addr, Ipv6Addr};

/// TTL on synthesized block answers. Long enough that clients stop
/// hammering, short enough that policy changes take effect quickly.
pub const BLOCK_TTL: u32 = 300;

/// Response skeleton echoing the query: id, opcode, question section, and
/// the recursion bits. RecursionAvailable is always set.
fn reply_skeleton(query: &Message) -> Message {
    let mut message = Message::new();
    message.set_id(query.id());
    message.set_message_type(MessageType::Response);
    message.set_op_code(query.op_code());
    message.set_recursion_desired(query.recursion_desired());
    message.set_recursion_available(true);
    for question in query.queries() {
        message.add_query(question.clone());
    }
    message
}

/// The reply for a policy-blocked name: a null-routed answer for A/AAAA,
/// REFUSED for anything else.
pub fn block_reply(query: &Message) -> Message {
    let mut message = reply_skeleton(query);

    let question = match query.queries().first() {
        Some(q) => q,
        None => {
            message.set_response_code(ResponseCode::Refused);
            return message;
        }
    };

    match question.query_type() {
        RecordType::A => {
            let record = Record::from_rdata(
                question.name().clone(),
                BLOCK_TTL,
                RData::A(A(Ipv4Addr::UNSPECIFIED)),
            );
            message.add_answer(record);
            message.set_response_code(ResponseCode::NoError);
        }
        RecordType::AAAA => {
            let record = Record::from_rdata(
                question.name().clone(),
                BLOCK_TTL,
                RData::AAAA(AAAA(Ipv6Addr::UNSPECIFIED)),
            );
            message.add_answer(record);
            message.set_response_code(ResponseCode::NoError);
        }
        _ => {
            message.set_response_code(ResponseCode::Refused);
        }
    }

    message
}

/// An empty reply with the given response code.
pub fn error_reply(query: &Message, code: ResponseCode) -> Message {
    let mut message = reply_skeleton(query);
    message.set_response_code(code);
    message
}

pub fn rcode_str(code: ResponseCode) -> &'static str {
    match code {
        ResponseCode::NoError => "NOERROR",
        ResponseCode::FormErr => "FORMERR",
        ResponseCode::ServFail => "SERVFAIL",
        ResponseCode::NXDomain => "NXDOMAIN",
        ResponseCode::NotImp => "NOTIMP",
        ResponseCode::Refused => "REFUSED",
        _ => "UNKNOWN",
    }
}
