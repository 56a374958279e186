use std::fmt;

/// Number of letters in the board alphabet, and so the number of edge slots per trie node.
pub const ALPHABET_SIZE: usize = 26;

/// A lowercase Latin letter, `a..=z`, stored as its edge slot index.
///
/// Both trie edges and board cells are labelled with `Letter`, so any text that
/// reaches the search has already been checked against the alphabet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Letter(u8);

impl Letter {
    /// Returns the letter for `ch`, or `None` if `ch` is not in `a..=z`.
    #[inline]
    pub fn new(ch: char) -> Option<Letter> {
        ch.is_ascii_lowercase().then(|| Letter(ch as u8 - b'a'))
    }

    /// Returns the letter stored in edge slot `index`, or `None` if `index >= 26`.
    #[inline]
    pub fn from_index(index: usize) -> Option<Letter> {
        (index < ALPHABET_SIZE).then_some(Letter(index as u8))
    }

    /// The edge slot of this letter, `0` for `a` through `25` for `z`.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// The letter as a `char`.
    #[inline]
    pub fn to_char(self) -> char {
        (b'a' + self.0) as char
    }

    /// All 26 letters in alphabetical order.
    pub fn all() -> impl DoubleEndedIterator<Item = Letter> + ExactSizeIterator + Clone {
        (0..ALPHABET_SIZE as u8).map(Letter)
    }

    #[inline]
    pub(crate) fn bit(self) -> u32 {
        1 << self.0
    }
}

impl TryFrom<char> for Letter {
    type Error = char;

    fn try_from(ch: char) -> Result<Self, Self::Error> {
        Letter::new(ch).ok_or(ch)
    }
}

impl From<Letter> for char {
    fn from(letter: Letter) -> char {
        letter.to_char()
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}
