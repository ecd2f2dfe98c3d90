use super::server::Upstream;
use hearth_dns_domain::DomainError;
use hickory_proto::op::Message;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::UdpSocket;

/// Read timeout per upstream attempt.
pub const EXCHANGE_TIMEOUT: Duration = Duration::from_secs(3);

/// Maximum UDP DNS response size with EDNS(0).
const MAX_UDP_RESPONSE_SIZE: usize = 4096;

#[derive(Debug)]
pub struct ExchangeResult {
    pub message: Message,
    pub upstream: String,
}

/// One wire exchange with a single upstream: serialize, send, wait at most
/// [`EXCHANGE_TIMEOUT`] for a response carrying the query's id.
pub async fn exchange(upstream: &Upstream, query: &Message) -> Result<Message, DomainError> {
    let payload = query
        .to_vec()
        .map_err(|e| DomainError::InvalidDnsMessage(e.to_string()))?;

    let bind_addr: SocketAddr = if upstream.socket_addr().is_ipv4() {
        "0.0.0.0:0".parse().expect("valid bind address")
    } else {
        "[::]:0".parse().expect("valid bind address")
    };

    let socket = UdpSocket::bind(bind_addr)
        .await
        .map_err(|e| DomainError::IoError(e.to_string()))?;
    socket
        .connect(upstream.socket_addr())
        .await
        .map_err(|e| DomainError::IoError(e.to_string()))?;
    socket
        .send(&payload)
        .await
        .map_err(|e| DomainError::IoError(e.to_string()))?;

    let mut buf = vec![0u8; MAX_UDP_RESPONSE_SIZE];
    let len = tokio::time::timeout(EXCHANGE_TIMEOUT, socket.recv(&mut buf))
        .await
        .map_err(|_| DomainError::TransportTimeout {
            server: upstream.address().to_string(),
        })?
        .map_err(|e| DomainError::IoError(e.to_string()))?;

    let message = Message::from_vec(&buf[..len])
        .map_err(|e| DomainError::InvalidDnsMessage(e.to_string()))?;

    if message.id() != query.id() {
        return Err(DomainError::InvalidDnsMessage(
            "response id does not match query".to_string(),
        ));
    }

    Ok(message)
}
