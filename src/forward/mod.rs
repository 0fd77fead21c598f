//! The forwarding trie.
//!
//! Forwarding rules live on a prefix tree keyed by number symbols. A rule
//! added for key `K` sits on the node reached by following `K` from the
//! root, which gives:
//!
//! - **Longest-prefix resolution**: [`ForwardTrie::get`] walks the query's
//!   path once and keeps the deepest rule it passes.
//! - **Subtree removal**: [`ForwardTrie::remove`] cuts the subtree below a
//!   prefix, which is exactly the set of rules whose keys extend it.
//! - **Whole-table scans**: [`ForwardTrie::reverse`] and
//!   [`ForwardTrie::non_trivial_count`] visit every rule via [`Rules`].
//!
//! # Example
//!
//! ```
//! use phone_forward::ForwardTrie;
//!
//! let mut trie = ForwardTrie::new();
//! trie.add("123", "456").unwrap();
//! trie.add("1", "22").unwrap();
//!
//! assert_eq!(trie.get("12345").as_slice(), ["45645"]);
//! assert_eq!(trie.get("19").as_slice(), ["229"]);
//! assert_eq!(trie.reverse("223").as_slice(), ["123", "223"]);
//! ```

mod count;
mod iterator;
mod node;
mod reverse;

pub use count::PrefixSet;
pub use iterator::Rules;
pub use node::Rule;

use crate::alphabet::{is_valid_number, symbol_path};
use crate::error::{ForwardError, Result};
use crate::numbers::PhoneNumbers;
use log::{debug, trace};
use node::TrieNode;

/// A table of forwarding rules.
///
/// # Ownership
///
/// The trie exclusively owns every node; results of [`get`](Self::get)
/// and [`reverse`](Self::reverse) hold copies of their numbers and are
/// unaffected by later changes to the trie.
///
/// # Thread Safety
///
/// Mutation takes `&mut self`. Sharing a trie between threads needs one
/// exclusive lock around the whole trie since rules are not independently
/// lockable.
///
/// # Performance
///
/// - `add`, `get`: O(m) where m is the number length
/// - `remove`: O(m) plus the size of the released subtree
/// - `reverse`, `non_trivial_count`: O(n) where n is the number of nodes
#[derive(Debug, Default)]
pub struct ForwardTrie {
    root: TrieNode,
    rule_count: usize,
}

impl ForwardTrie {
    /// Create an empty trie.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a trie from `(key, target)` pairs.
    ///
    /// Later pairs replace earlier ones with the same key. Stops at the
    /// first pair that [`add`](Self::add) rejects.
    pub fn from_rules<I, K, T>(rules: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, T)>,
        K: AsRef<str>,
        T: AsRef<str>,
    {
        let mut trie = Self::new();
        for (key, target) in rules {
            trie.add(key.as_ref(), target.as_ref())?;
        }
        Ok(trie)
    }

    /// Forward every number starting with `key` to the same number with
    /// that prefix replaced by `target`.
    ///
    /// A rule already stored for `key` is replaced. Rules for shorter or
    /// longer keys are left alone.
    ///
    /// # Errors
    ///
    /// - [`ForwardError::InvalidNumber`] if either argument is not a valid
    ///   number.
    /// - [`ForwardError::IdenticalPrefixes`] if `key == target`.
    ///
    /// The trie is unchanged when an error is returned.
    pub fn add(&mut self, key: &str, target: &str) -> Result<()> {
        if !is_valid_number(target) {
            return Err(ForwardError::InvalidNumber {
                number: target.to_owned(),
            });
        }
        let path = symbol_path(key).ok_or_else(|| ForwardError::InvalidNumber {
            number: key.to_owned(),
        })?;
        if key == target {
            return Err(ForwardError::IdenticalPrefixes {
                number: key.to_owned(),
            });
        }

        let node = path
            .iter()
            .fold(&mut self.root, |node, &index| node.child_or_insert(index));

        match node.rule.replace(Rule::new(key, target)) {
            Some(previous) => debug!(
                "replaced forwarding {} -> {} with {} -> {}",
                previous.key(),
                previous.target(),
                key,
                target
            ),
            None => {
                self.rule_count += 1;
                debug!("added forwarding {} -> {}", key, target);
            }
        }
        Ok(())
    }

    /// Remove every rule whose key starts with `prefix`.
    ///
    /// Only the subtree below `prefix` is released: the walk remembers the
    /// deepest ancestor that must stay (it carries a rule or has another
    /// child) and cuts the single branch hanging off it towards `prefix`.
    ///
    /// Invalid input and prefixes with nothing stored below them are
    /// silently ignored; callers cannot tell those cases apart from an
    /// actual removal other than through [`len`](Self::len).
    pub fn remove(&mut self, prefix: &str) {
        let Some(path) = symbol_path(prefix) else {
            return;
        };

        // Depth of the deepest node on the path that survives the removal.
        let mut keep_depth = 0;
        let mut node = &self.root;
        for (depth, &index) in path.iter().enumerate() {
            if node.rule.is_some() || node.has_other_child(index) {
                keep_depth = depth;
            }
            match node.child(index) {
                Some(child) => node = child,
                None => {
                    trace!("nothing stored under {}", prefix);
                    return;
                }
            }
        }

        let mut keep = &mut self.root;
        for &index in &path[..keep_depth] {
            match keep.child_mut(index) {
                Some(child) => keep = child,
                None => return,
            }
        }

        if let Some(subtree) = keep.children[path[keep_depth]].take() {
            let removed = subtree.subtree_rules();
            self.rule_count -= removed;
            debug!(
                "removed {} forwarding(s) under {} ({} node(s) released)",
                removed,
                prefix,
                subtree.subtree_size()
            );
        }
    }

    /// Resolve `number` through the longest matching key.
    ///
    /// Returns a single number: the forwarded one, or `number` itself when
    /// no key is a prefix of it. An invalid `number` gives an empty
    /// sequence.
    pub fn get(&self, number: &str) -> PhoneNumbers {
        let Some(path) = symbol_path(number) else {
            return PhoneNumbers::empty();
        };

        let mut longest: Option<&Rule> = None;
        let mut node = &self.root;
        for &index in &path {
            match node.child(index) {
                Some(child) => node = child,
                None => break,
            }
            if let Some(rule) = &node.rule {
                longest = Some(rule);
            }
        }

        let forwarded = match longest {
            Some(rule) => rule.forward(number),
            None => number.to_owned(),
        };
        trace!("get {} -> {}", number, forwarded);
        PhoneNumbers::single(forwarded)
    }

    /// Iterate over all rules, sorted by key.
    pub fn rules(&self) -> Rules<'_> {
        Rules::new(&self.root)
    }

    /// Look up the rule stored for exactly `key`.
    pub fn rule(&self, key: &str) -> Option<&Rule> {
        let path = symbol_path(key)?;
        let mut node = &self.root;
        for &index in &path {
            node = node.child(index)?;
        }
        node.rule.as_ref()
    }

    /// Number of stored rules.
    pub fn len(&self) -> usize {
        self.rule_count
    }

    /// Check if the trie holds no rules.
    pub fn is_empty(&self) -> bool {
        self.rule_count == 0
    }

    /// Number of allocated nodes, the root included.
    pub fn node_count(&self) -> usize {
        self.root.subtree_size()
    }

    /// Remove all rules.
    pub fn clear(&mut self) {
        self.root = TrieNode::default();
        self.rule_count = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_replaces_prefix() {
        let mut trie = ForwardTrie::new();
        trie.add("123", "456").unwrap();
        assert_eq!(trie.get("12345").as_slice(), ["45645"]);
        assert_eq!(trie.get("123").as_slice(), ["456"]);
        assert_eq!(trie.get("12").as_slice(), ["12"]);
    }

    #[test]
    fn test_add_replaces_rule_for_same_key() {
        let mut trie = ForwardTrie::new();
        trie.add("123", "456").unwrap();
        trie.add("123", "789").unwrap();
        assert_eq!(trie.get("123").as_slice(), ["789"]);
        assert_eq!(trie.len(), 1);
    }

    #[test]
    fn test_longest_prefix_wins() {
        let mut trie = ForwardTrie::from_rules([("1", "9"), ("123", "0"), ("12", "77")]).unwrap();
        assert_eq!(trie.get("1234").as_slice(), ["04"]);
        assert_eq!(trie.get("1299").as_slice(), ["7799"]);
        assert_eq!(trie.get("15").as_slice(), ["95"]);
        assert_eq!(trie.get("5").as_slice(), ["5"]);

        trie.remove("123");
        assert_eq!(trie.get("1234").as_slice(), ["7734"]);
    }

    #[test]
    fn test_add_rejects_identical_prefixes() {
        let mut trie = ForwardTrie::new();
        assert_eq!(
            trie.add("1", "1"),
            Err(ForwardError::IdenticalPrefixes {
                number: "1".to_string()
            })
        );
        assert!(trie.is_empty());
        assert_eq!(trie.node_count(), 1);
    }

    #[test]
    fn test_add_rejects_invalid_numbers() {
        let mut trie = ForwardTrie::new();
        assert!(matches!(
            trie.add("12a", "3"),
            Err(ForwardError::InvalidNumber { .. })
        ));
        assert!(matches!(
            trie.add("12", ""),
            Err(ForwardError::InvalidNumber { .. })
        ));
        assert!(matches!(
            trie.add("", "12"),
            Err(ForwardError::InvalidNumber { .. })
        ));
        assert!(trie.is_empty());
        assert_eq!(trie.node_count(), 1);
    }

    #[test]
    fn test_extended_symbols_are_numbers() {
        let mut trie = ForwardTrie::new();
        trie.add(":;", "0").unwrap();
        assert_eq!(trie.get(":;1").as_slice(), ["01"]);
        assert_eq!(trie.get("9:").as_slice(), ["9:"]);
    }

    #[test]
    fn test_get_invalid_number_is_empty() {
        let mut trie = ForwardTrie::new();
        trie.add("1", "2").unwrap();
        assert!(trie.get("").is_empty());
        assert!(trie.get("1<").is_empty());
        assert!(trie.get("abc").is_empty());
    }

    #[test]
    fn test_remove_cuts_subtree() {
        let mut trie = ForwardTrie::from_rules([("12", "34"), ("120", "999")]).unwrap();
        trie.remove("12");
        assert_eq!(trie.get("120").as_slice(), ["120"]);
        assert!(trie.is_empty());
        assert_eq!(trie.node_count(), 1);
    }

    #[test]
    fn test_remove_keeps_ancestor_with_rule() {
        let mut trie = ForwardTrie::from_rules([("1", "5"), ("1234", "6")]).unwrap();
        trie.remove("123");
        assert_eq!(trie.len(), 1);
        assert_eq!(trie.get("1234").as_slice(), ["5234"]);
        // root + "1"
        assert_eq!(trie.node_count(), 2);
    }

    #[test]
    fn test_remove_keeps_sibling_branch() {
        let mut trie = ForwardTrie::from_rules([("1234", "5"), ("1299", "6")]).unwrap();
        trie.remove("1234");
        assert_eq!(trie.len(), 1);
        assert_eq!(trie.get("1299").as_slice(), ["6"]);
        // root, 1, 12, 129, 1299
        assert_eq!(trie.node_count(), 5);
    }

    #[test]
    fn test_remove_prefix_of_routing_node() {
        let mut trie = ForwardTrie::from_rules([("555", "1"), ("556", "2")]).unwrap();
        trie.remove("5");
        assert!(trie.is_empty());
        assert_eq!(trie.node_count(), 1);
    }

    #[test]
    fn test_remove_missing_or_invalid_is_noop() {
        let mut trie = ForwardTrie::from_rules([("12", "3")]).unwrap();
        trie.remove("13");
        trie.remove("123");
        trie.remove("");
        trie.remove("1x");
        assert_eq!(trie.len(), 1);
        assert_eq!(trie.get("12").as_slice(), ["3"]);
    }

    #[test]
    fn test_results_outlive_mutation() {
        let mut trie = ForwardTrie::new();
        trie.add("1", "2").unwrap();
        let before = trie.get("11");
        trie.add("1", "3").unwrap();
        trie.remove("1");
        assert_eq!(before.as_slice(), ["21"]);
    }

    #[test]
    fn test_rule_lookup_and_clear() {
        let mut trie = ForwardTrie::from_rules([("12", "3"), ("1", "4")]).unwrap();
        assert_eq!(trie.rule("12").map(Rule::target), Some("3"));
        assert!(trie.rule("123").is_none());
        trie.clear();
        assert!(trie.is_empty());
        assert_eq!(trie.get("12").as_slice(), ["12"]);
    }
}
