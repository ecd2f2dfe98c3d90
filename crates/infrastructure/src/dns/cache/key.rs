use compact_str::{format_compact, CompactString};
use hickory_proto::op::Query;

/// Cache key in `{qname}-{qtype}-{qclass}` form, with the qname lowercased
/// so differently-cased queries share an entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(CompactString);

impl CacheKey {
    pub fn from_question(question: &Query) -> Self {
        let name = question.name().to_utf8().to_ascii_lowercase();
        let qtype = u16::from(question.query_type());
        let qclass = u16::from(question.query_class());
        Self(format_compact!("{name}-{qtype}-{qclass}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
