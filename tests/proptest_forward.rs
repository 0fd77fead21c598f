//! Property-based tests for forwarding, reverse lookup and counting
//!
//! Every property is checked against a trie built from random rules, with
//! brute-force references where the operation is cheap to enumerate.

use phone_forward::prelude::*;
use proptest::prelude::*;

// ============================================================================
// Test Data Strategies
// ============================================================================

/// Numbers over the full alphabet
const NUMBER: &str = "[0-9:;]{1,6}";

/// Numbers over a small alphabet, so rules overlap often
const DENSE_NUMBER: &str = "[0-3]{1,3}";

fn number_strategy() -> impl Strategy<Value = String> {
    NUMBER
}

fn dense_number_strategy() -> impl Strategy<Value = String> {
    DENSE_NUMBER
}

/// Up to a dozen `(key, target)` pairs drawn from `pattern`
fn rules_strategy(pattern: &'static str) -> impl Strategy<Value = Vec<(String, String)>> {
    prop::collection::vec((pattern, pattern), 0..=12)
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Build a trie, skipping rules that forward a number to itself
fn build(rules: &[(String, String)]) -> ForwardTrie {
    let mut trie = ForwardTrie::new();
    for (key, target) in rules {
        let _ = trie.add(key, target);
    }
    trie
}

/// Count by enumerating every number of length `len` over `digits`
fn brute_force_count(trie: &ForwardTrie, digits: &str, len: usize) -> u64 {
    let mut symbols: Vec<char> = digits
        .chars()
        .filter(|c| is_valid_number(&c.to_string()))
        .collect();
    symbols.sort_unstable();
    symbols.dedup();
    if symbols.is_empty() || len == 0 {
        return 0;
    }

    let targets: Vec<&str> = trie.rules().map(|rule| rule.target()).collect();
    let mut count = 0;
    let mut indices = vec![0usize; len];
    loop {
        let number: String = indices.iter().map(|&i| symbols[i]).collect();
        if targets.iter().any(|target| number.starts_with(target)) {
            count += 1;
        }

        // Advance the odometer
        let mut pos = len;
        loop {
            if pos == 0 {
                return count;
            }
            pos -= 1;
            indices[pos] += 1;
            if indices[pos] < symbols.len() {
                break;
            }
            indices[pos] = 0;
        }
    }
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_unaffected_number_forwards_to_itself(
        rules in rules_strategy(NUMBER),
        number in number_strategy(),
    ) {
        // Keys start with '1', the number does not
        let rules: Vec<_> = rules.into_iter().map(|(k, t)| (format!("1{}", k), t)).collect();
        let trie = build(&rules);
        let number = format!("2{}", number);
        let got = trie.get(&number);
        prop_assert_eq!(got.as_slice(), [number.clone()]);
    }

    #[test]
    fn prop_number_is_its_own_preimage(
        rules in rules_strategy(DENSE_NUMBER),
        number in dense_number_strategy(),
    ) {
        let trie = build(&rules);
        let preimages = trie.reverse(&number);
        prop_assert!(preimages.iter().any(|n| n == number));
    }

    #[test]
    fn prop_reverse_is_sorted_and_unique(
        rules in rules_strategy(DENSE_NUMBER),
        number in dense_number_strategy(),
    ) {
        let trie = build(&rules);
        let preimages = trie.reverse(&number).into_vec();
        prop_assert!(preimages.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn prop_reverse_undoes_get(
        rules in rules_strategy(DENSE_NUMBER),
        number in dense_number_strategy(),
    ) {
        let trie = build(&rules);
        let forwarded = trie.get(&number);
        prop_assert_eq!(forwarded.len(), 1);
        let preimages = trie.reverse(forwarded.get(0).unwrap_or_default());
        prop_assert!(preimages.iter().any(|n| n == number));
    }

    #[test]
    fn prop_adding_twice_is_idempotent(
        rules in rules_strategy(NUMBER),
        key in number_strategy(),
        target in number_strategy(),
        probe in number_strategy(),
    ) {
        prop_assume!(key != target);
        let mut trie = build(&rules);
        trie.add(&key, &target).unwrap();
        let once = (trie.get(&probe), trie.len(), trie.node_count());
        trie.add(&key, &target).unwrap();
        let twice = (trie.get(&probe), trie.len(), trie.node_count());
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn prop_remove_leaves_other_branches(
        rules in rules_strategy(NUMBER),
        prefix in number_strategy(),
        number in number_strategy(),
    ) {
        prop_assume!(prefix.as_bytes()[0] != number.as_bytes()[0]);
        let mut trie = build(&rules);
        let before = trie.get(&number);
        trie.remove(&prefix);
        prop_assert_eq!(trie.get(&number), before);
    }

    #[test]
    fn prop_remove_clears_subtree(
        rules in rules_strategy(DENSE_NUMBER),
        prefix in dense_number_strategy(),
    ) {
        let mut trie = build(&rules);
        trie.remove(&prefix);
        prop_assert!(trie.rules().all(|rule| !rule.key().starts_with(prefix.as_str())));
        prop_assert_eq!(trie.rules().count(), trie.len());
    }

    #[test]
    fn prop_rules_are_sorted_by_key(rules in rules_strategy(NUMBER)) {
        let trie = build(&rules);
        let keys: Vec<&str> = trie.rules().map(|rule| rule.key()).collect();
        prop_assert!(keys.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn prop_count_matches_enumeration(
        rules in rules_strategy(DENSE_NUMBER),
        digits in "[0-3a]{0,5}",
        len in 0usize..=3,
    ) {
        let trie = build(&rules);
        prop_assert_eq!(
            trie.non_trivial_count(&digits, len),
            brute_force_count(&trie, &digits, len)
        );
    }

    #[test]
    fn prop_count_is_zero_without_symbols(
        rules in rules_strategy(NUMBER),
        digits in "[a-z]{0,5}",
        len in 0usize..=20,
    ) {
        let trie = build(&rules);
        prop_assert_eq!(trie.non_trivial_count(&digits, len), 0);
        prop_assert_eq!(trie.non_trivial_count("0123456789:;", 0), 0);
    }
}
