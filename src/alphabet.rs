//! The digit alphabet numbers are written in.
//!
//! Numbers use twelve symbols: the decimal digits `0`-`9` followed by the
//! two characters that come right after `9` in ASCII, `:` and `;`. Each
//! symbol maps to a child slot `0..12` of a trie node.

use smallvec::SmallVec;

/// Number of symbols in the alphabet (and child slots per trie node).
pub const ALPHABET_SIZE: usize = 12;

/// First symbol of the alphabet.
const FIRST_SYMBOL: u8 = b'0';

/// Index path of a number through a trie. Phone numbers rarely exceed
/// 24 symbols, so the common case stays on the stack.
pub type SymbolPath = SmallVec<[usize; 24]>;

/// Map a symbol to its slot index.
///
/// Returns `None` for anything outside `0`-`9`, `:` and `;`.
///
/// ```
/// use phone_forward::alphabet::symbol_index;
///
/// assert_eq!(symbol_index(b'0'), Some(0));
/// assert_eq!(symbol_index(b';'), Some(11));
/// assert_eq!(symbol_index(b'<'), None);
/// ```
#[inline]
pub fn symbol_index(symbol: u8) -> Option<usize> {
    let index = symbol.checked_sub(FIRST_SYMBOL)? as usize;
    (index < ALPHABET_SIZE).then_some(index)
}

/// Inverse of [`symbol_index`].
#[inline]
pub fn symbol_at(index: usize) -> Option<u8> {
    (index < ALPHABET_SIZE).then(|| FIRST_SYMBOL + index as u8)
}

/// Check if a byte is an alphabet symbol.
#[inline]
pub fn is_symbol(byte: u8) -> bool {
    symbol_index(byte).is_some()
}

/// A valid number is non-empty and made only of alphabet symbols.
pub fn is_valid_number(number: &str) -> bool {
    !number.is_empty() && number.bytes().all(is_symbol)
}

/// Slot indices for every symbol of `number`, or `None` if the number is
/// not valid.
pub fn symbol_path(number: &str) -> Option<SymbolPath> {
    if number.is_empty() {
        return None;
    }
    number.bytes().map(symbol_index).collect()
}

/// A subset of the alphabet.
///
/// Built from an arbitrary string: alphabet symbols are collected, repeats
/// are ignored, and everything else is skipped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct DigitSet {
    mask: u16,
}

impl DigitSet {
    /// The empty set.
    pub const fn empty() -> Self {
        Self { mask: 0 }
    }

    /// Collect the distinct alphabet symbols found in `symbols`.
    pub fn from_symbols(symbols: &str) -> Self {
        let mask = symbols
            .bytes()
            .filter_map(symbol_index)
            .fold(0u16, |mask, index| mask | (1 << index));
        Self { mask }
    }

    /// Add the symbol at `index`.
    pub fn insert(&mut self, index: usize) {
        if index < ALPHABET_SIZE {
            self.mask |= 1 << index;
        }
    }

    /// Check membership of the symbol at `index`.
    #[inline]
    pub fn contains(&self, index: usize) -> bool {
        index < ALPHABET_SIZE && self.mask & (1 << index) != 0
    }

    /// Check that every byte of `number` is a member of the set.
    pub fn admits(&self, number: &str) -> bool {
        number
            .bytes()
            .all(|byte| symbol_index(byte).is_some_and(|index| self.contains(index)))
    }

    /// Number of distinct symbols in the set.
    pub fn len(&self) -> usize {
        self.mask.count_ones() as usize
    }

    /// Check if the set has no symbols.
    pub fn is_empty(&self) -> bool {
        self.mask == 0
    }

    /// Iterate over member symbols in alphabet order.
    pub fn symbols(&self) -> impl Iterator<Item = char> + '_ {
        (0..ALPHABET_SIZE)
            .filter(|&index| self.contains(index))
            .filter_map(symbol_at)
            .map(char::from)
    }
}
