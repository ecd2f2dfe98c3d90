//! The end-to-end query pipeline: normalize, PTR short-circuit, policy,
//! cache, forward, insert, prefetch.

use crate::dns::block_response::{block_reply, error_reply};
use crate::dns::cache::{authoritative_ttl, CacheKey, DnsCache};
use crate::dns::filter::PolicyIndex;
use crate::dns::prefetch::PrefetchPlanner;
use crate::dns::record_type;
use crate::dns::upstream::UpstreamPool;
use futures::future::{BoxFuture, FutureExt};
use hearth_dns_domain::{Action, Config, PrivateIpFilter};
use hickory_proto::op::{Message, MessageType, OpCode, Query, ResponseCode};
use hickory_proto::rr::{Name, RecordType as WireRecordType};
use std::sync::Arc;
use tracing::{debug, error};

/// Block reason attached to refused reverse lookups for private space.
const RDNS_PRIVATE_IP: &str = "rdns-private-ip";

/// What the pipeline hands back for one query, alongside the wire message:
/// everything the caller needs to write the reply and emit the log record.
#[derive(Debug)]
pub struct Resolution {
    pub message: Message,
    pub cached: bool,
    pub blocked: bool,
    pub block_reason: Option<String>,
    pub upstream: Option<String>,
    pub prefetched: bool,
}

impl Resolution {
    fn blocked_with(message: Message, reason: &str) -> Self {
        Self {
            message,
            cached: false,
            blocked: true,
            block_reason: Some(reason.to_string()),
            upstream: None,
            prefetched: false,
        }
    }
}

/// The resolver context: every shared component of the pipeline, built once
/// at boot and threaded through the UDP handler.
pub struct Resolver {
    config: Arc<Config>,
    index: Arc<PolicyIndex>,
    cache: Arc<DnsCache>,
    upstreams: Arc<UpstreamPool>,
    prefetch: Arc<PrefetchPlanner>,
}

impl Resolver {
    pub fn new(
        config: Arc<Config>,
        index: Arc<PolicyIndex>,
        cache: Arc<DnsCache>,
        upstreams: Arc<UpstreamPool>,
        prefetch: Arc<PrefetchPlanner>,
    ) -> Self {
        Self {
            config,
            index,
            cache,
            upstreams,
            prefetch,
        }
    }

    pub fn cache(&self) -> &Arc<DnsCache> {
        &self.cache
    }

    /// Resolve one query. `is_root_request` distinguishes client-originated
    /// queries from internally scheduled refresh and prefetch work.
    ///
    /// Returns `None` for messages without a question, which are dropped
    /// silently. Boxed so refresh and prefetch tasks can re-enter the
    /// pipeline.
    pub fn process(
        self: &Arc<Self>,
        query: Message,
        client: &str,
        is_root_request: bool,
    ) -> BoxFuture<'static, Option<Resolution>> {
        let this = Arc::clone(self);
        let client = client.to_string();
        async move { this.process_inner(query, &client, is_root_request).await }.boxed()
    }

    async fn process_inner(
        self: Arc<Self>,
        query: Message,
        client: &str,
        is_root_request: bool,
    ) -> Option<Resolution> {
        let question = query.queries().first()?.clone();
        let fqdn = question
            .name()
            .to_utf8()
            .trim_end_matches('.')
            .to_ascii_lowercase();

        // Reverse lookups for private address space never leave the network.
        if question.query_type() == WireRecordType::PTR
            && PrivateIpFilter::is_private_ptr_query(&fqdn)
        {
            debug!(domain = %fqdn, "Refusing reverse lookup for private address");
            return Some(Resolution::blocked_with(
                error_reply(&query, ResponseCode::NXDomain),
                RDNS_PRIVATE_IP,
            ));
        }

        if let Some(category) = self.blocked_category(&fqdn, client) {
            debug!(domain = %fqdn, client = %client, category = %category, "Query blocked");
            return Some(Resolution::blocked_with(block_reply(&query), &category));
        }

        Some(self.resolve(query, &question, &fqdn, client, is_root_request).await)
    }

    /// The first category that blocks `fqdn` for `client` right now, or
    /// `None` when the name is unlisted or carries an allow rule.
    fn blocked_category(&self, fqdn: &str, client: &str) -> Option<String> {
        let matched = self.index.lookup(fqdn)?;
        if matched.is_allowed() {
            return None;
        }

        let now = self.config.local_now();
        matched
            .rules
            .iter()
            .filter(|rule| rule.action == Action::Block)
            .find(|rule| {
                self.config
                    .is_category_blocked(client, rule.category, now)
            })
            .map(|rule| rule.category.as_str().to_string())
    }

    async fn resolve(
        self: &Arc<Self>,
        query: Message,
        question: &Query,
        fqdn: &str,
        client: &str,
        is_root_request: bool,
    ) -> Resolution {
        let key = CacheKey::from_question(question);

        if let Some(hit) = self.cache.get(&key, query.id()) {
            // Root requests are served even stale; refresh and prefetch
            // lookups treat stale entries as misses so they refetch.
            if is_root_request || !hit.stale {
                if hit.refresh_due {
                    debug!(domain = %fqdn, "Cache entry went stale, scheduling refresh");
                    tokio::spawn(self.process(query.clone(), client, false));
                }
                if is_root_request {
                    self.schedule_prefetch(fqdn, client);
                }
                return Resolution {
                    message: hit.message,
                    cached: true,
                    blocked: false,
                    block_reason: None,
                    upstream: None,
                    prefetched: hit.prefetched,
                };
            }
        }

        let result = match self.upstreams.forward(&query).await {
            Ok(result) => result,
            Err(e) => {
                error!(domain = %fqdn, error = %e, "All upstream attempts failed");
                return Resolution {
                    message: error_reply(&query, ResponseCode::ServFail),
                    cached: false,
                    blocked: false,
                    block_reason: None,
                    upstream: None,
                    prefetched: false,
                };
            }
        };

        if let Some(ttl) = authoritative_ttl(&result.message) {
            // Entries created on behalf of a client are the baseline; ones
            // created by refresh/prefetch lookups are marked as prefetched.
            self.cache
                .insert(key, result.message.clone(), ttl, !is_root_request);
        }

        if is_root_request {
            self.schedule_prefetch(fqdn, client);
        }

        Resolution {
            message: result.message,
            cached: false,
            blocked: false,
            block_reason: None,
            upstream: Some(result.upstream),
            prefetched: false,
        }
    }

    /// Fire-and-forget resolution of the domains learned to follow `fqdn`.
    /// The sentinel guard caps concurrency at one per `(domain, qtype)`.
    fn schedule_prefetch(self: &Arc<Self>, fqdn: &str, client: &str) {
        for (domain, record_type) in self.prefetch.related(fqdn) {
            let Some(wire_type) = record_type::to_wire(record_type) else {
                continue;
            };
            let Some(guard) = self.prefetch.try_begin(&domain, record_type) else {
                continue;
            };
            let name = match Name::from_utf8(format!("{domain}.")) {
                Ok(name) => name,
                Err(_) => continue,
            };

            let mut prefetch_query = Message::new();
            prefetch_query.set_id(rand::random());
            prefetch_query.set_message_type(MessageType::Query);
            prefetch_query.set_op_code(OpCode::Query);
            prefetch_query.set_recursion_desired(true);
            prefetch_query.add_query(Query::query(name, wire_type));

            debug!(lead = %fqdn, domain = %domain, record_type = %record_type, "Scheduling prefetch");
            let resolve = self.process(prefetch_query, client, false);
            tokio::spawn(async move {
                let _guard = guard;
                let _ = resolve.await;
            });
        }
    }
}
