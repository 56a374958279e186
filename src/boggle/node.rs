use super::edges::{ChildIter, Edges};
use super::letter::Letter;

/// A node in the prefix tree.
///
/// Each node stands for one prefix of the dictionary: the letters on the edges
/// from the root down to it. Frozen nodes live in an arena and are only ever
/// handed out as shared `&'w TrieNode<'w>` references.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrieNode<'w> {
    edges: Edges<'w>,
    terminal: bool,
}

impl<'w> TrieNode<'w> {
    /// Creates a new node without children.
    ///
    /// # Arguments
    ///
    /// * `terminal` - Whether a dictionary word ends exactly at this node
    pub fn new(terminal: bool) -> Self {
        TrieNode {
            edges: Edges::None,
            terminal,
        }
    }

    /// Returns the node that letter's edge leads to, or None if no such edge exists.
    #[inline]
    pub fn get(&self, letter: Letter) -> Option<&'w TrieNode<'w>> {
        self.edges.get(letter)
    }

    /// True if a dictionary word was explicitly inserted ending at this node.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.terminal
    }

    /// True if this node has no children.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.edges.is_empty()
    }

    /// True if the path to this node spells a complete word.
    ///
    /// A node counts as complete when it is terminal *or* has no children. A
    /// dead end is reported complete even if it was never marked terminal.
    #[inline]
    pub fn is_word_complete(&self) -> bool {
        self.terminal || self.is_leaf()
    }

    /// Returns true if following `suffix` from this node ends on a terminal node.
    #[inline]
    pub fn has_suffix<I: Iterator<Item = Letter>>(&self, suffix: &mut I) -> bool {
        let mut node = self;
        for letter in suffix {
            match node.get(letter) {
                Some(next) => node = next,
                None => return false,
            }
        }
        node.is_terminal()
    }

    /// Sets the terminal flag.
    pub fn set_terminal(&mut self, terminal: bool) {
        self.terminal = terminal;
    }

    /// Inserts a child node.
    ///
    /// Panics if this node already has an edge for `letter`.
    pub fn insert(&mut self, letter: Letter, child: &'w TrieNode<'w>) {
        self.edges = self.edges.with_added_child(letter, child);
    }

    /// Returns an iterator over all children of this node, in alphabetical order.
    #[inline]
    pub fn children(&'w self) -> ChildIter<'w> {
        ChildIter::new(&self.edges)
    }

    /// Returns the number of children.
    #[inline]
    pub fn child_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns a reference to the edges of this node.
    pub fn edges(&self) -> &Edges<'w> {
        &self.edges
    }
}
