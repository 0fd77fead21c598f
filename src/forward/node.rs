//! Trie nodes and the rules they carry.

use crate::alphabet::ALPHABET_SIZE;

/// A forwarding rule: numbers starting with `key` have that prefix
/// replaced by `target`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Rule {
    key: String,
    target: String,
}

impl Rule {
    pub(crate) fn new(key: &str, target: &str) -> Self {
        Self {
            key: key.to_owned(),
            target: target.to_owned(),
        }
    }

    /// The prefix being forwarded, exactly as it was added.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The replacement prefix.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Apply the rule to `number`, which must start with the key.
    pub(crate) fn forward(&self, number: &str) -> String {
        let suffix = &number[self.key.len()..];
        let mut forwarded = String::with_capacity(self.target.len() + suffix.len());
        forwarded.push_str(&self.target);
        forwarded.push_str(suffix);
        forwarded
    }

    /// The number that this rule forwards onto `number`, if the target is
    /// a prefix of it.
    pub(crate) fn preimage(&self, number: &str) -> Option<String> {
        let suffix = number.strip_prefix(self.target.as_str())?;
        let mut preimage = String::with_capacity(self.key.len() + suffix.len());
        preimage.push_str(&self.key);
        preimage.push_str(suffix);
        Some(preimage)
    }
}

/// A node of the forwarding trie.
///
/// The node at depth `n` stands for one `n`-symbol prefix. It owns its
/// children exclusively and carries a rule only when that prefix was added
/// as a key; otherwise it is a pure routing node.
#[derive(Debug, Default)]
pub(crate) struct TrieNode {
    pub(crate) children: [Option<Box<TrieNode>>; ALPHABET_SIZE],
    pub(crate) rule: Option<Rule>,
}

impl TrieNode {
    #[inline]
    pub(crate) fn child(&self, index: usize) -> Option<&TrieNode> {
        self.children[index].as_deref()
    }

    #[inline]
    pub(crate) fn child_mut(&mut self, index: usize) -> Option<&mut TrieNode> {
        self.children[index].as_deref_mut()
    }

    /// Child at `index`, created as an empty routing node if missing.
    pub(crate) fn child_or_insert(&mut self, index: usize) -> &mut TrieNode {
        self.children[index].get_or_insert_with(Box::default)
    }

    /// Check for a child in any slot other than `index`.
    pub(crate) fn has_other_child(&self, index: usize) -> bool {
        self.children
            .iter()
            .enumerate()
            .any(|(i, child)| i != index && child.is_some())
    }

    /// Present children with their slot indices, in alphabet order.
    pub(crate) fn edges(&self) -> impl DoubleEndedIterator<Item = (usize, &TrieNode)> + '_ {
        self.children
            .iter()
            .enumerate()
            .filter_map(|(i, child)| child.as_deref().map(|node| (i, node)))
    }

    /// Count nodes in this subtree, this node included.
    pub(crate) fn subtree_size(&self) -> usize {
        let mut stack = vec![self];
        let mut size = 0;
        while let Some(node) = stack.pop() {
            size += 1;
            stack.extend(node.edges().map(|(_, child)| child));
        }
        size
    }

    /// Count rules in this subtree, this node included.
    pub(crate) fn subtree_rules(&self) -> usize {
        let mut stack = vec![self];
        let mut rules = 0;
        while let Some(node) = stack.pop() {
            rules += usize::from(node.rule.is_some());
            stack.extend(node.edges().map(|(_, child)| child));
        }
        rules
    }
}

// Release the subtree iteratively: a key can be arbitrarily long and
// recursive drop would follow its whole path on the call stack.
impl Drop for TrieNode {
    fn drop(&mut self) {
        let mut stack: Vec<Box<TrieNode>> =
            self.children.iter_mut().filter_map(Option::take).collect();
        while let Some(mut node) = stack.pop() {
            stack.extend(node.children.iter_mut().filter_map(Option::take));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_forward_and_preimage() {
        let rule = Rule::new("123", "45");
        assert_eq!(rule.forward("12399"), "4599");
        assert_eq!(rule.preimage("4599").as_deref(), Some("12399"));
        assert_eq!(rule.preimage("45").as_deref(), Some("123"));
        assert_eq!(rule.preimage("4"), None);
        assert_eq!(rule.preimage("5599"), None);
    }

    #[test]
    fn test_has_other_child() {
        let mut node = TrieNode::default();
        node.child_or_insert(3);
        assert!(!node.has_other_child(3));
        assert!(node.has_other_child(4));
        node.child_or_insert(7);
        assert!(node.has_other_child(3));
    }

    #[test]
    fn test_deep_chain_drops_without_recursion() {
        let mut root = TrieNode::default();
        let mut node = &mut root;
        for _ in 0..200_000 {
            node = node.child_or_insert(1);
        }
        node.rule = Some(Rule::new("1", "2"));
        assert_eq!(root.subtree_rules(), 1);
        drop(root);
    }
}
