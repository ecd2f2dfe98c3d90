mod domain_trie;
mod index;

pub use domain_trie::{DomainTrie, RuleMatch};
pub use index::PolicyIndex;
