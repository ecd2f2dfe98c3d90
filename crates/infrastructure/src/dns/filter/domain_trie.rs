use compact_str::CompactString;
use hearth_dns_domain::{Action, Category, Rule};
use rustc_hash::FxBuildHasher;
use smallvec::SmallVec;
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Default)]
struct TrieNode {
    children: HashMap<CompactString, TrieNode, FxBuildHasher>,
    rules: Vec<Rule>,
}

impl TrieNode {
    fn new() -> Self {
        Self {
            children: HashMap::with_hasher(FxBuildHasher),
            rules: Vec::new(),
        }
    }
}

/// The rules applicable to a queried name: the longest base domain in the
/// trie that the name equals or is a subdomain of, and everything the lists
/// registered at that base.
#[derive(Debug, Clone)]
pub struct RuleMatch {
    pub base: String,
    pub rules: Vec<Rule>,
}

impl RuleMatch {
    /// Allow beats block at the same base: one allow rule permits the
    /// domain regardless of what else is registered there.
    pub fn is_allowed(&self) -> bool {
        self.rules.iter().any(|r| r.action == Action::Allow)
    }
}

/// Radix tree over reversed domain labels. Walking `com → example → ads`
/// for a query `x.ads.example.com` finds the longest registered suffix;
/// because labels are matched whole, `server.com` can never swallow a query
/// for `serverfault.com`.
#[derive(Default)]
pub struct DomainTrie {
    root: TrieNode,
    rule_count: usize,
    domain_count: usize,
}

impl DomainTrie {
    pub fn new() -> Self {
        Self {
            root: TrieNode::new(),
            rule_count: 0,
            domain_count: 0,
        }
    }

    /// Register every domain of a list under its category tags. Existing
    /// rules at a node are preserved; lists stack.
    pub fn insert_list(
        &mut self,
        list: &str,
        action: Action,
        categories: &[Category],
        domains: &[String],
    ) {
        let list: Arc<str> = Arc::from(list);
        for domain in domains {
            for &category in categories {
                self.insert(domain, Rule {
                    list: Arc::clone(&list),
                    category,
                    action,
                });
            }
        }
    }

    pub fn insert(&mut self, domain: &str, rule: Rule) {
        let domain = domain.trim_end_matches('.').to_ascii_lowercase();
        if domain.is_empty() {
            return;
        }

        let mut node = &mut self.root;
        for label in domain.split('.').rev() {
            node = node
                .children
                .entry(CompactString::new(label))
                .or_insert_with(TrieNode::new);
        }
        if node.rules.is_empty() {
            self.domain_count += 1;
        }
        node.rules.push(rule);
        self.rule_count += 1;
    }

    /// Longest-suffix lookup. `domain` must already be normalized
    /// (lowercase, no trailing dot).
    pub fn lookup(&self, domain: &str) -> Option<RuleMatch> {
        let labels: SmallVec<[&str; 8]> = domain.split('.').rev().collect();

        let mut node = &self.root;
        let mut best: Option<(usize, &TrieNode)> = None;
        for (depth, label) in labels.iter().enumerate() {
            match node.children.get(*label) {
                Some(child) => {
                    if !child.rules.is_empty() {
                        best = Some((depth + 1, child));
                    }
                    node = child;
                }
                None => break,
            }
        }

        best.map(|(depth, node)| {
            let base_labels: SmallVec<[&str; 8]> = labels[..depth].iter().rev().copied().collect();
            RuleMatch {
                base: base_labels.join("."),
                rules: node.rules.clone(),
            }
        })
    }

    pub fn rule_count(&self) -> usize {
        self.rule_count
    }

    pub fn domain_count(&self) -> usize {
        self.domain_count
    }
}
