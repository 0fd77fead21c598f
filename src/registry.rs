//! Named, independent forwarding tries.

use crate::forward::ForwardTrie;
use log::debug;
use rustc_hash::FxHashMap;

/// A collection of [`ForwardTrie`]s addressed by identifier.
///
/// Tries never share rules. The registry has no notion of a "current"
/// trie; callers that need one keep the identifier themselves.
///
/// ```
/// use phone_forward::registry::TrieRegistry;
///
/// let mut registry = TrieRegistry::new();
/// registry.select_or_create("home").add("1", "2").unwrap();
/// registry.select_or_create("work");
///
/// assert_eq!(registry.ids(), ["home", "work"]);
/// assert_eq!(registry.get("home").map(|trie| trie.len()), Some(1));
/// assert!(registry.remove("work"));
/// assert!(!registry.remove("work"));
/// ```
#[derive(Debug, Default)]
pub struct TrieRegistry {
    tries: FxHashMap<String, ForwardTrie>,
}

impl TrieRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the trie named `id`, creating an empty one on first use.
    pub fn select_or_create(&mut self, id: &str) -> &mut ForwardTrie {
        self.tries.entry(id.to_owned()).or_insert_with(|| {
            debug!("created trie {}", id);
            ForwardTrie::new()
        })
    }

    /// Drop the trie named `id` with all its rules.
    ///
    /// Returns `false` if there was no such trie.
    pub fn remove(&mut self, id: &str) -> bool {
        match self.tries.remove(id) {
            Some(trie) => {
                debug!("dropped trie {} ({} rule(s))", id, trie.len());
                true
            }
            None => false,
        }
    }

    /// Look up a trie by identifier.
    pub fn get(&self, id: &str) -> Option<&ForwardTrie> {
        self.tries.get(id)
    }

    /// Look up a trie by identifier for modification.
    pub fn get_mut(&mut self, id: &str) -> Option<&mut ForwardTrie> {
        self.tries.get_mut(id)
    }

    /// Check if a trie named `id` exists.
    pub fn contains(&self, id: &str) -> bool {
        self.tries.contains_key(id)
    }

    /// Identifiers of all tries, sorted.
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.tries.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Number of tries.
    pub fn len(&self) -> usize {
        self.tries.len()
    }

    /// Check if the registry holds no tries.
    pub fn is_empty(&self) -> bool {
        self.tries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_keeps_existing_trie() {
        let mut registry = TrieRegistry::new();
        registry.select_or_create("a").add("12", "3").unwrap();
        assert_eq!(registry.select_or_create("a").len(), 1);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_tries_are_independent() {
        let mut registry = TrieRegistry::new();
        registry.select_or_create("a").add("1", "2").unwrap();
        registry.select_or_create("b").add("1", "3").unwrap();

        assert_eq!(
            registry.get("a").map(|t| t.get("10").into_vec()),
            Some(vec!["20".to_string()])
        );
        assert_eq!(
            registry.get("b").map(|t| t.get("10").into_vec()),
            Some(vec!["30".to_string()])
        );

        registry.remove("a");
        assert!(!registry.contains("a"));
        assert!(registry.get_mut("b").is_some());
    }

    #[test]
    fn test_recreated_trie_starts_empty() {
        let mut registry = TrieRegistry::new();
        registry.select_or_create("x").add("1", "2").unwrap();
        registry.remove("x");
        assert!(registry.select_or_create("x").is_empty());
    }

    #[test]
    fn test_empty_registry() {
        let registry = TrieRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.ids().is_empty());
        assert!(registry.get("a").is_none());
    }
}
