//! Result sequences returned by trie lookups.

use std::fmt;
use std::ops::Index;

/// An ordered, immutable sequence of numbers produced by a lookup.
///
/// The sequence owns its strings: it stays valid and unchanged no matter
/// how the trie that produced it is modified afterwards.
///
/// # Examples
///
/// ```
/// use phone_forward::ForwardTrie;
///
/// let mut trie = ForwardTrie::new();
/// trie.add("123", "456").unwrap();
///
/// let numbers = trie.get("12345");
/// assert_eq!(numbers.len(), 1);
/// assert_eq!(numbers.get(0), Some("45645"));
/// assert_eq!(numbers.get(1), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct PhoneNumbers {
    numbers: Box<[String]>,
}

impl PhoneNumbers {
    /// An empty sequence, the answer to a query with an invalid number.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A sequence holding exactly one number.
    pub fn single(number: String) -> Self {
        Self {
            numbers: vec![number].into_boxed_slice(),
        }
    }

    /// Number at position `idx`, or `None` past the end.
    pub fn get(&self, idx: usize) -> Option<&str> {
        self.numbers.get(idx).map(String::as_str)
    }

    /// Length of the sequence.
    pub fn len(&self) -> usize {
        self.numbers.len()
    }

    /// Check if the sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.numbers.is_empty()
    }

    /// Iterate over the numbers in order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.numbers.iter().map(String::as_str)
    }

    /// View the numbers as a slice.
    pub fn as_slice(&self) -> &[String] {
        &self.numbers
    }

    /// Consume the sequence, returning its numbers.
    pub fn into_vec(self) -> Vec<String> {
        self.numbers.into_vec()
    }
}

impl From<Vec<String>> for PhoneNumbers {
    fn from(numbers: Vec<String>) -> Self {
        Self {
            numbers: numbers.into_boxed_slice(),
        }
    }
}

impl From<PhoneNumbers> for Vec<String> {
    fn from(numbers: PhoneNumbers) -> Self {
        numbers.into_vec()
    }
}

impl Index<usize> for PhoneNumbers {
    type Output = str;

    fn index(&self, idx: usize) -> &str {
        &self.numbers[idx]
    }
}

impl IntoIterator for PhoneNumbers {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.numbers.into_vec().into_iter()
    }
}

impl<'a> IntoIterator for &'a PhoneNumbers {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.numbers.iter()
    }
}

/// One number per line, without a trailing newline.
impl fmt::Display for PhoneNumbers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, number) in self.numbers.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            f.write_str(number)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_sequence() {
        let numbers = PhoneNumbers::empty();
        assert!(numbers.is_empty());
        assert_eq!(numbers.get(0), None);
        assert_eq!(numbers.to_string(), "");
    }

    #[test]
    fn test_indexing_and_display() {
        let numbers = PhoneNumbers::from(vec!["123".to_string(), "223".to_string()]);
        assert_eq!(&numbers[1], "223");
        assert_eq!(numbers.iter().collect::<Vec<_>>(), ["123", "223"]);
        assert_eq!(numbers.to_string(), "123\n223");
        assert_eq!(numbers.into_vec(), ["123", "223"]);
    }
}
