//! Depth-first iteration over stored rules.

use super::node::{Rule, TrieNode};
use smallvec::SmallVec;

/// Iterator over every rule of a [`ForwardTrie`](super::ForwardTrie).
///
/// Nodes are visited in pre-order with children in alphabet order, so
/// rules come out sorted by key: a key precedes its own extensions, and
/// the alphabet order `0`-`9`, `:`, `;` is also byte order.
///
/// ```
/// use phone_forward::ForwardTrie;
///
/// let mut trie = ForwardTrie::new();
/// trie.add("2", "9").unwrap();
/// trie.add("12", "3").unwrap();
/// trie.add("1", "4").unwrap();
///
/// let keys: Vec<_> = trie.rules().map(|rule| rule.key()).collect();
/// assert_eq!(keys, ["1", "12", "2"]);
/// ```
pub struct Rules<'a> {
    stack: SmallVec<[&'a TrieNode; 32]>,
}

impl<'a> Rules<'a> {
    pub(crate) fn new(root: &'a TrieNode) -> Self {
        let mut stack = SmallVec::new();
        stack.push(root);
        Self { stack }
    }
}

impl<'a> Iterator for Rules<'a> {
    type Item = &'a Rule;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.stack.pop() {
            // Reversed so the smallest symbol is popped first
            self.stack.extend(node.edges().rev().map(|(_, child)| child));
            if let Some(rule) = &node.rule {
                return Some(rule);
            }
        }
        None
    }
}
