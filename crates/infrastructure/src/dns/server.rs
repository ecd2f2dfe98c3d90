use crate::dns::block_response::rcode_str;
use crate::dns::pipeline::Resolver;
use crate::dns::record_type;
use crate::querylog::QueryLogSink;
use chrono::Utc;
use hearth_dns_application::ports::HostnameResolver;
use hearth_dns_domain::{Config, DomainError, QueryLog};
use hickory_proto::op::Message;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tokio::net::UdpSocket;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Maximum inbound UDP DNS message size.
const MAX_UDP_QUERY_SIZE: usize = 4096;

/// The UDP front door: receives wire messages, runs each through the
/// pipeline on its own task, writes the reply, and emits the log record.
pub struct UdpServer {
    config: Arc<Config>,
    resolver: Arc<Resolver>,
    sink: Arc<QueryLogSink>,
    hostnames: Arc<dyn HostnameResolver>,
}

impl UdpServer {
    pub fn new(
        config: Arc<Config>,
        resolver: Arc<Resolver>,
        sink: Arc<QueryLogSink>,
        hostnames: Arc<dyn HostnameResolver>,
    ) -> Self {
        Self {
            config,
            resolver,
            sink,
            hostnames,
        }
    }

    pub async fn run(self: Arc<Self>, shutdown: CancellationToken) -> Result<(), DomainError> {
        let addr = format!(
            "{}:{}",
            self.config.server.bind_address, self.config.server.dns_port
        );
        let socket = UdpSocket::bind(&addr)
            .await
            .map_err(|e| DomainError::IoError(format!("failed to bind {addr}: {e}")))?;
        let socket = Arc::new(socket);

        info!(addr = %addr, "DNS server listening");

        let mut buf = vec![0u8; MAX_UDP_QUERY_SIZE];
        loop {
            tokio::select! {
                _ = shutdown.cancelled() => {
                    info!("DNS server shutting down");
                    return Ok(());
                }
                result = socket.recv_from(&mut buf) => {
                    match result {
                        Ok((len, peer)) => {
                            let packet = buf[..len].to_vec();
                            let this = Arc::clone(&self);
                            let socket = Arc::clone(&socket);
                            tokio::spawn(async move {
                                this.handle_packet(packet, peer, socket).await;
                            });
                        }
                        Err(e) => warn!(error = %e, "UDP receive error"),
                    }
                }
            }
        }
    }

    async fn handle_packet(&self, packet: Vec<u8>, peer: SocketAddr, socket: Arc<UdpSocket>) {
        let started = Instant::now();
        let timestamp = Utc::now();

        let query = match Message::from_vec(&packet) {
            Ok(message) => message,
            Err(e) => {
                debug!(peer = %peer, error = %e, "Dropping unparseable packet");
                return;
            }
        };

        let question = match query.queries().first() {
            Some(question) => question.clone(),
            // No question asked; drop silently.
            None => return,
        };

        let (ip, hostname) = if self.config.querylog.log_clients {
            let ip = peer.ip();
            (ip.to_string(), self.hostnames.resolve(ip).await)
        } else {
            ("-".to_string(), "-".to_string())
        };

        let resolution = match self.resolver.process(query, &hostname, true).await {
            Some(resolution) => resolution,
            None => return,
        };

        match resolution.message.to_vec() {
            Ok(bytes) => {
                if let Err(e) = socket.send_to(&bytes, peer).await {
                    warn!(peer = %peer, error = %e, "Failed to send response");
                }
            }
            Err(e) => {
                error!(error = %e, "Failed to serialize response");
                return;
            }
        }

        if self.config.querylog.enabled {
            self.sink.submit(QueryLog {
                hostname,
                ip,
                domain: question
                    .name()
                    .to_utf8()
                    .trim_end_matches('.')
                    .to_ascii_lowercase(),
                query_type: record_type::from_wire(question.query_type()),
                cached: resolution.cached,
                blocked: resolution.blocked,
                block_reason: resolution.block_reason,
                upstream: resolution.upstream,
                response_code: rcode_str(resolution.message.response_code()).to_string(),
                response_time_ms: started.elapsed().as_millis() as u64,
                prefetched: resolution.prefetched,
                timestamp,
            });
        }
    }
}
