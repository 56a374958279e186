//! The dictionary policy: which candidate words become legal Boggle words.
//!
//! A candidate is rejected if it
//!
//! 1. consists entirely of uppercase ASCII letters (acronyms and the like),
//! 2. contains a hyphen or an underscore,
//! 3. uses any letter twice, or
//! 4. is shorter than [`MIN_WORD_LEN`] characters.
//!
//! Accepted words are inserted exactly as given. A word that passes the policy
//! but still has characters outside `a..=z` (for example `"Paris"`) cannot be
//! placed on a board, so the builder refuses it and it is skipped as well.
//! Skipping is never an error: it is logged and counted in a [`LoadSummary`].

use hashbrown::HashSet;
use log::{debug, info};

use std::error::Error;
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use typed_arena::Arena;

use super::builder::{Trie, TrieBuilder};
use super::node::TrieNode;

/// Shortest word the policy accepts.
pub const MIN_WORD_LEN: usize = 3;

/// Why a candidate word was not accepted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rejection {
    /// Every character is an uppercase ASCII letter.
    AllUppercase,
    /// The word contains `-` or `_`.
    Separator(char),
    /// The letter occurs more than once.
    RepeatedLetter(char),
    /// The word has this many characters, fewer than [`MIN_WORD_LEN`].
    TooShort(usize),
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::AllUppercase => write!(f, "all uppercase"),
            Rejection::Separator(ch) => write!(f, "contains separator {ch:?}"),
            Rejection::RepeatedLetter(ch) => write!(f, "repeats {ch:?}"),
            Rejection::TooShort(len) => {
                write!(f, "{len} letters, fewer than {MIN_WORD_LEN}")
            }
        }
    }
}

/// Checks `word` against the dictionary policy.
///
/// # Examples
///
/// ```
/// use libboggle::boggle::dictionary::{check_word, Rejection};
///
/// assert_eq!(check_word("bread"), Ok(()));
/// assert_eq!(check_word("NASA"), Err(Rejection::AllUppercase));
/// assert_eq!(check_word("balloon"), Err(Rejection::RepeatedLetter('l')));
/// assert_eq!(check_word("at"), Err(Rejection::TooShort(2)));
/// ```
pub fn check_word(word: &str) -> Result<(), Rejection> {
    if !word.is_empty() && word.bytes().all(|b| b.is_ascii_uppercase()) {
        return Err(Rejection::AllUppercase);
    }
    let mut seen = HashSet::with_capacity(word.len());
    let mut len = 0;
    for ch in word.chars() {
        if ch == '-' || ch == '_' {
            return Err(Rejection::Separator(ch));
        }
        if !seen.insert(ch) {
            return Err(Rejection::RepeatedLetter(ch));
        }
        len += 1;
    }
    if len < MIN_WORD_LEN {
        return Err(Rejection::TooShort(len));
    }
    Ok(())
}

/// Returns true if `word` passes the dictionary policy.
#[inline]
pub fn is_legal_word(word: &str) -> bool {
    check_word(word).is_ok()
}

/// Counts from one dictionary load.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoadSummary {
    /// Words inserted into the trie, duplicates included.
    pub accepted: usize,
    /// Words refused by the policy.
    pub rejected: usize,
    /// Words that passed the policy but have characters outside `a..=z`.
    pub unsupported: usize,
}

impl LoadSummary {
    /// Total candidates seen.
    pub fn total(&self) -> usize {
        self.accepted + self.rejected + self.unsupported
    }

    fn record(&mut self, builder: &mut TrieBuilder, word: &str) {
        if let Err(reason) = check_word(word) {
            debug!("skipping {word:?}: {reason}");
            self.rejected += 1;
            return;
        }
        match builder.insert(word) {
            Ok(_) => self.accepted += 1,
            Err(e) => {
                debug!("skipping {word:?}: {e}");
                self.unsupported += 1;
            }
        }
    }

    fn log(&self) {
        info!(
            "dictionary loaded: {} accepted, {} rejected, {} unsupported",
            self.accepted, self.rejected, self.unsupported
        );
    }
}

/// Validates each candidate and inserts the legal ones into `builder`.
pub fn load_legal_words<S: AsRef<str>>(
    builder: &mut TrieBuilder,
    words: impl IntoIterator<Item = S>,
) -> LoadSummary {
    let mut summary = LoadSummary::default();
    for word in words {
        summary.record(builder, word.as_ref());
    }
    summary.log();
    summary
}

/// Builds a trie holding only the words that pass the dictionary policy.
///
/// # Examples
///
/// ```
/// use libboggle::boggle::dictionary::build_legal_trie;
/// use libboggle::boggle::Arena;
///
/// let arena = Arena::new();
/// let (trie, summary) = build_legal_trie(&arena, ["bread", "BBC", "at", "co-op", "bead"]);
///
/// assert!(trie.contains("bread"));
/// assert!(trie.contains("bead"));
/// assert!(!trie.contains("at"));
/// assert_eq!(summary.accepted, 2);
/// assert_eq!(summary.rejected, 3);
/// ```
pub fn build_legal_trie<'w, S: AsRef<str>>(
    arena: &'w Arena<TrieNode<'w>>,
    words: impl IntoIterator<Item = S>,
) -> (Trie<'w>, LoadSummary) {
    let mut builder = TrieBuilder::new();
    let summary = load_legal_words(&mut builder, words);
    (builder.build(arena), summary)
}

/// Builds a trie of legal words from a dictionary file.
///
/// Reads one word per line. Trailing whitespace (including `\r`) is trimmed,
/// empty lines are skipped and lines starting with '#' are treated as comments.
/// The file does not need to be sorted.
///
/// # Examples
///
/// ```no_run
/// use libboggle::boggle::dictionary::build_legal_trie_from_file;
/// use libboggle::boggle::Arena;
///
/// let arena = Arena::new();
/// let (trie, summary) = build_legal_trie_from_file(&arena, "dictionary.txt").unwrap();
/// ```
pub fn build_legal_trie_from_file<'w>(
    arena: &'w Arena<TrieNode<'w>>,
    filename: impl AsRef<Path>,
) -> Result<(Trie<'w>, LoadSummary), Box<dyn Error>> {
    let file = File::open(filename)?;
    let mut reader = BufReader::new(file);
    let mut builder = TrieBuilder::new();
    let mut summary = LoadSummary::default();

    // Reuse one line buffer instead of allocating a String per line.
    let mut buf = String::with_capacity(80);
    loop {
        match reader.read_line(&mut buf) {
            Ok(0) => break,
            Err(e) => return Err(e.into()),
            _ => {}
        }
        let word = buf.trim_end();
        if !word.is_empty() && !is_comment(word) {
            summary.record(&mut builder, word);
        }
        buf.clear();
    }
    summary.log();
    Ok((builder.build(arena), summary))
}

/// Returns true if this line is a comment.
pub(crate) fn is_comment(line: &str) -> bool {
    line.trim_start().starts_with('#')
}
