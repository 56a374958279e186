use smallvec::SmallVec;

use std::error::Error;
use std::fmt;

use typed_arena::Arena;

use super::letter::Letter;
use super::node::TrieNode;

/// Letters of one word, collected before anything is inserted.
pub type WordBuf = SmallVec<[Letter; 32]>;

/// Trait for types that can be inserted as a word into a [`TrieBuilder`].
///
/// Implemented for the common string types, which are checked against the
/// alphabet, and for letter sequences, which are already valid.
pub trait IntoWord {
    /// Collects this word into a letter buffer.
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::InvalidLetter` if a character is outside `a..=z`.
    fn collect_word(self) -> Result<WordBuf, BuilderError>;
}

fn letters_of(word: &str) -> Result<WordBuf, BuilderError> {
    word.chars()
        .map(|ch| {
            Letter::new(ch).ok_or_else(|| BuilderError::InvalidLetter {
                word: word.to_owned(),
                letter: ch,
            })
        })
        .collect()
}

impl IntoWord for &str {
    fn collect_word(self) -> Result<WordBuf, BuilderError> {
        letters_of(self)
    }
}

impl IntoWord for &&str {
    fn collect_word(self) -> Result<WordBuf, BuilderError> {
        letters_of(self)
    }
}

impl IntoWord for String {
    fn collect_word(self) -> Result<WordBuf, BuilderError> {
        letters_of(&self)
    }
}

impl IntoWord for &String {
    fn collect_word(self) -> Result<WordBuf, BuilderError> {
        letters_of(self)
    }
}

impl IntoWord for &[Letter] {
    fn collect_word(self) -> Result<WordBuf, BuilderError> {
        Ok(self.iter().copied().collect())
    }
}

impl<const N: usize> IntoWord for [Letter; N] {
    fn collect_word(self) -> Result<WordBuf, BuilderError> {
        Ok(self.into_iter().collect())
    }
}

/// Errors that can occur when inserting words into a trie.
#[derive(Debug, PartialEq)]
pub enum BuilderError {
    /// The word contains a character outside the `a..=z` alphabet.
    InvalidLetter {
        /// The rejected word.
        word: String,
        /// The first offending character.
        letter: char,
    },
}

impl fmt::Display for BuilderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuilderError::InvalidLetter { word, letter } => {
                write!(f, "InvalidLetter - {letter:?} in {word:?} is not in a..=z")
            }
        }
    }
}

impl Error for BuilderError {}

struct BuildNode {
    terminal: bool,
    // Sorted by letter.
    children: SmallVec<[(Letter, usize); 4]>,
}

impl BuildNode {
    fn new() -> Self {
        BuildNode {
            terminal: false,
            children: SmallVec::new(),
        }
    }

    fn child(&self, letter: Letter) -> Option<usize> {
        self.children
            .iter()
            .find_map(|&(c, index)| (c == letter).then_some(index))
    }
}

/// A builder for the prefix tree.
///
/// Words can be inserted in any order. While building, nodes live in a growable
/// table owned by the builder; [`build`](TrieBuilder::build) freezes them into an
/// arena, after which the tree is read-only.
pub struct TrieBuilder {
    nodes: Vec<BuildNode>,
    words: usize,
}

impl Default for TrieBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TrieBuilder {
    /// Creates a builder holding only the root (the empty prefix).
    pub fn new() -> Self {
        TrieBuilder {
            nodes: vec![BuildNode::new()],
            words: 0,
        }
    }

    /// Inserts a word, creating a node for each letter on first use at that depth
    /// and marking the node of the last letter as terminal.
    ///
    /// Returns `Ok(true)` if the word was not present before. Inserting an empty
    /// word does nothing and returns `Ok(false)`.
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::InvalidLetter` if the word has a character outside
    /// `a..=z`. The tree is left unchanged in that case.
    pub fn insert(&mut self, word: impl IntoWord) -> Result<bool, BuilderError> {
        let word = word.collect_word()?;
        if word.is_empty() {
            return Ok(false);
        }
        let mut current = 0;
        for &letter in &word {
            current = match self.nodes[current].child(letter) {
                Some(next) => next,
                None => self.add_child(current, letter),
            };
        }
        let node = &mut self.nodes[current];
        let added = !node.terminal;
        node.terminal = true;
        self.words += added as usize;
        Ok(added)
    }

    fn add_child(&mut self, parent: usize, letter: Letter) -> usize {
        let index = self.nodes.len();
        self.nodes.push(BuildNode::new());
        let children = &mut self.nodes[parent].children;
        let pos = children.partition_point(|&(c, _)| c < letter);
        children.insert(pos, (letter, index));
        index
    }

    /// Number of distinct words inserted so far.
    pub fn word_count(&self) -> usize {
        self.words
    }

    /// Number of nodes, including the root.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Freezes the tree into `arena` and returns the read-only trie.
    pub fn build<'w>(self, arena: &'w Arena<TrieNode<'w>>) -> Trie<'w> {
        arena.reserve_extend(self.nodes.len());
        Trie {
            root: self.freeze(0, arena),
        }
    }

    // Children are frozen before their parent so the parent can point at them.
    fn freeze<'w>(&self, index: usize, arena: &'w Arena<TrieNode<'w>>) -> &'w TrieNode<'w> {
        let build = &self.nodes[index];
        let mut node = TrieNode::new(build.terminal);
        for &(letter, child) in &build.children {
            node.insert(letter, self.freeze(child, arena));
        }
        arena.alloc(node)
    }
}

/// A frozen prefix tree.
///
/// This is a cheap copyable handle to the root node; the nodes themselves are
/// owned by the arena the trie was built into.
#[derive(Clone, Copy, Debug)]
pub struct Trie<'w> {
    root: &'w TrieNode<'w>,
}

impl<'w> Trie<'w> {
    /// Wraps an existing root node, for example one assembled by hand.
    pub fn from_root(root: &'w TrieNode<'w>) -> Self {
        Trie { root }
    }

    /// The node for the empty prefix.
    #[inline]
    pub fn root(&self) -> &'w TrieNode<'w> {
        self.root
    }

    /// True if the trie holds no words.
    pub fn is_empty(&self) -> bool {
        self.root.is_leaf() && !self.root.is_terminal()
    }

    /// Follows `prefix` from the root and returns the node it ends on.
    ///
    /// Returns `None` if the prefix has a character outside `a..=z` or is not a
    /// prefix of any word.
    pub fn node(&self, prefix: &str) -> Option<&'w TrieNode<'w>> {
        prefix
            .chars()
            .try_fold(self.root, |node, ch| node.get(Letter::new(ch)?))
    }

    /// Returns true if `word` was inserted.
    pub fn contains(&self, word: &str) -> bool {
        self.node(word).is_some_and(|n| n.is_terminal())
    }

    /// Returns true if any inserted word starts with `prefix`.
    pub fn has_prefix(&self, prefix: &str) -> bool {
        self.node(prefix).is_some()
    }

    /// Returns all inserted words in alphabetical order.
    pub fn words(&self) -> Vec<String> {
        let mut words = Vec::new();
        let mut prefix = String::new();
        Self::collect_words(self.root, &mut prefix, &mut words);
        words
    }

    fn collect_words(node: &'w TrieNode<'w>, prefix: &mut String, words: &mut Vec<String>) {
        if node.is_terminal() {
            words.push(prefix.clone());
        }
        for (letter, child) in node.children() {
            prefix.push(letter.to_char());
            Self::collect_words(child, prefix, words);
            prefix.pop();
        }
    }
}

/// Builds a trie from an iterator of words and returns it.
///
/// Words may come in any order and duplicates are harmless. No dictionary policy
/// is applied here; see [`build_legal_trie`](super::dictionary::build_legal_trie)
/// for that.
///
/// # Examples
///
/// ```
/// use libboggle::boggle::builder::build_trie;
/// use libboggle::boggle::Arena;
///
/// let arena = Arena::new();
/// let trie = build_trie(&arena, ["cherry", "apple", "banana"]).unwrap();
///
/// assert!(trie.contains("banana"));
/// assert!(trie.has_prefix("ban"));
/// assert!(!trie.contains("ban"));
/// ```
///
/// # Errors
///
/// Returns the error of the first word with a character outside `a..=z`.
pub fn build_trie<'w, W>(
    arena: &'w Arena<TrieNode<'w>>,
    words: impl IntoIterator<Item = W>,
) -> Result<Trie<'w>, BuilderError>
where
    W: IntoWord,
{
    let mut builder = TrieBuilder::new();
    for word in words {
        builder.insert(word)?;
    }
    Ok(builder.build(arena))
}
