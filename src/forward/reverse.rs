//! Reverse lookup: which numbers forward onto a given one.

use super::ForwardTrie;
use crate::alphabet::is_valid_number;
use crate::numbers::PhoneNumbers;
use log::trace;

impl ForwardTrie {
    /// Find every number that a single forwarding step turns into `number`.
    ///
    /// For each rule whose target is a prefix of `number`, the target is
    /// swapped back for the key. `number` itself is always part of the
    /// result. The result is sorted byte-wise with duplicates removed; an
    /// invalid `number` gives an empty sequence.
    ///
    /// There is no reverse index, so every query scans the whole trie.
    ///
    /// ```
    /// use phone_forward::ForwardTrie;
    ///
    /// let mut trie = ForwardTrie::new();
    /// trie.add("1", "22").unwrap();
    /// trie.add("3", "2").unwrap();
    ///
    /// assert_eq!(trie.reverse("223").as_slice(), ["123", "223", "323"]);
    /// ```
    pub fn reverse(&self, number: &str) -> PhoneNumbers {
        if !is_valid_number(number) {
            return PhoneNumbers::empty();
        }

        let mut preimages = vec![number.to_owned()];
        preimages.extend(self.rules().filter_map(|rule| rule.preimage(number)));
        preimages.sort_unstable();
        preimages.dedup();

        trace!("reverse {} -> {} number(s)", number, preimages.len());
        PhoneNumbers::from(preimages)
    }
}
