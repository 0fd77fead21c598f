//! Counting numbers affected by forwarding.
//!
//! A number of length `len` over a digit set is *non-trivial* when some
//! rule's target is a prefix of it. Counting them naively per target would
//! count a number twice when two targets are prefixes of each other, so
//! the usable targets are first reduced to a set of pairwise
//! non-prefix-related strings ([`PrefixSet`]); each survivor of length `L`
//! then stands for exactly `d^(len - L)` numbers.

use super::ForwardTrie;
use crate::alphabet::{symbol_index, DigitSet, ALPHABET_SIZE};
use log::trace;

/// Arena index of the root node.
const ROOT: usize = 0;

#[derive(Debug, Clone, Default)]
struct PrefixNode {
    children: [Option<usize>; ALPHABET_SIZE],
    /// Length of the prefix ending here, if it is a member.
    terminal: Option<usize>,
}

/// A set of prefixes where no member is a prefix of another.
///
/// Inserting a string that already has a member as a prefix does nothing;
/// inserting a prefix of existing members shadows them. Nodes are kept in
/// an arena and the whole set is released at once.
///
/// ```
/// use phone_forward::forward::PrefixSet;
///
/// let mut set = PrefixSet::new();
/// set.insert("12");
/// set.insert("123");
/// set.insert("4");
///
/// assert_eq!(set.members(), ["12", "4"]);
/// ```
#[derive(Debug, Clone)]
pub struct PrefixSet {
    nodes: Vec<PrefixNode>,
}

impl PrefixSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self {
            nodes: vec![PrefixNode::default()],
        }
    }

    /// Add `prefix` unless one of its prefixes is already a member.
    ///
    /// Bytes outside the alphabet make the call a no-op; so does an
    /// empty `prefix`. Returns `true` if `prefix` became a member.
    pub fn insert(&mut self, prefix: &str) -> bool {
        if prefix.is_empty() || !prefix.bytes().all(|b| symbol_index(b).is_some()) {
            return false;
        }

        let mut node = ROOT;
        for byte in prefix.bytes() {
            let Some(index) = symbol_index(byte) else {
                return false;
            };
            node = match self.nodes[node].children[index] {
                Some(child) => child,
                None => {
                    let child = self.nodes.len();
                    self.nodes.push(PrefixNode::default());
                    self.nodes[node].children[index] = Some(child);
                    child
                }
            };
            if self.nodes[node].terminal.is_some() {
                return false;
            }
        }
        self.nodes[node].terminal = Some(prefix.len());
        true
    }

    /// Members in alphabet order, shadowed entries excluded.
    pub fn members(&self) -> Vec<String> {
        let mut members = Vec::new();
        let mut stack = vec![(ROOT, String::new())];
        while let Some((node, path)) = stack.pop() {
            if self.nodes[node].terminal.is_some() {
                members.push(path);
                continue;
            }
            for (index, child) in self.nodes[node].children.iter().enumerate().rev() {
                if let Some(child) = *child {
                    let mut child_path = path.clone();
                    child_path.push(char::from(b'0' + index as u8));
                    stack.push((child, child_path));
                }
            }
        }
        members
    }

    /// Count strings of exactly `len` symbols, drawn from an alphabet of
    /// `digits` symbols, that extend some member.
    ///
    /// Members longer than `len` contribute nothing. Arithmetic wraps
    /// modulo 2^64.
    pub fn count_extensions(&self, len: usize, digits: u64) -> u64 {
        let mut total = 0u64;
        let mut stack = vec![ROOT];
        while let Some(node) = stack.pop() {
            if let Some(depth) = self.nodes[node].terminal {
                if depth <= len {
                    total = total.wrapping_add(power(digits, len - depth));
                }
                continue;
            }
            stack.extend(self.nodes[node].children.iter().flatten());
        }
        total
    }

    /// Number of arena nodes, the root included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

impl Default for PrefixSet {
    fn default() -> Self {
        Self::new()
    }
}

/// `base^exp` by repeated squaring, wrapping modulo 2^64.
fn power(mut base: u64, mut exp: usize) -> u64 {
    let mut result = 1u64;
    while exp > 0 {
        if exp & 1 == 1 {
            result = result.wrapping_mul(base);
        }
        base = base.wrapping_mul(base);
        exp >>= 1;
    }
    result
}

impl ForwardTrie {
    /// Count numbers of exactly `len` symbols, using only symbols found in
    /// `digits`, that start with the target of some rule.
    ///
    /// Only targets made of those symbols and at most `len` long take
    /// part. Characters of `digits` outside the alphabet are ignored and
    /// repeats count once. The result is 0 when `len` is 0 or `digits`
    /// holds no alphabet symbol. Counts wrap modulo 2^64.
    ///
    /// ```
    /// use phone_forward::ForwardTrie;
    ///
    /// let mut trie = ForwardTrie::new();
    /// trie.add("9", "12").unwrap();
    /// trie.add("8", "1").unwrap();
    ///
    /// // Every 3-symbol number over {1, 2} that starts with "1"
    /// assert_eq!(trie.non_trivial_count("12", 3), 4);
    /// ```
    pub fn non_trivial_count(&self, digits: &str, len: usize) -> u64 {
        let allowed = DigitSet::from_symbols(digits);
        if len == 0 || allowed.is_empty() {
            return 0;
        }

        let mut prefixes = PrefixSet::new();
        for rule in self.rules() {
            let target = rule.target();
            if target.len() <= len && allowed.admits(target) {
                prefixes.insert(target);
            }
        }

        let count = prefixes.count_extensions(len, allowed.len() as u64);
        trace!(
            "non-trivial count over {{{}}} of length {}: {}",
            allowed.symbols().collect::<String>(),
            len,
            count
        );
        count
    }
}
