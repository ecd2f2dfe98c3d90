use super::domain_trie::{DomainTrie, RuleMatch};
use arc_swap::ArcSwap;
use std::sync::Arc;
use tracing::info;

/// The published policy index. Lookups run against an immutable snapshot;
/// the sync job builds a fresh trie from all list sources and swaps it in,
/// so readers never contend with a rebuild.
pub struct PolicyIndex {
    tree: ArcSwap<DomainTrie>,
}

impl PolicyIndex {
    pub fn empty() -> Self {
        Self {
            tree: ArcSwap::from_pointee(DomainTrie::new()),
        }
    }

    pub fn publish(&self, tree: DomainTrie) {
        info!(
            domains = tree.domain_count(),
            rules = tree.rule_count(),
            "Publishing policy index"
        );
        self.tree.store(Arc::new(tree));
    }

    pub fn lookup(&self, domain: &str) -> Option<RuleMatch> {
        self.tree.load().lookup(domain)
    }

    pub fn domain_count(&self) -> usize {
        self.tree.load().domain_count()
    }
}

impl Default for PolicyIndex {
    fn default() -> Self {
        Self::empty()
    }
}
