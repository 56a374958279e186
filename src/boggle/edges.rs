use super::letter::{Letter, ALPHABET_SIZE};
use super::node::TrieNode;

/// Full edge table for nodes with three or more children.
///
/// `mask` has bit `i` set exactly when `slots[i]` is occupied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Slots<'w> {
    mask: u32,
    slots: [Option<&'w TrieNode<'w>>; ALPHABET_SIZE],
}

/// A compact representation of the edges of a TrieNode that doesn't allocate until
/// there are at least three children.
///
/// Most trie nodes below the first few levels have one or two children, so those
/// are stored inline. Every variant answers a lookup in constant time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Edges<'w> {
    /// No children.
    None,
    /// Exactly one child (letter, node).
    One((Letter, &'w TrieNode<'w>)),
    /// Exactly two children, lower letter first.
    Two((Letter, &'w TrieNode<'w>, Letter, &'w TrieNode<'w>)),
    /// Three or more children in a table indexed by letter.
    Many(Box<Slots<'w>>),
}

impl<'w> Edges<'w> {
    /// Returns the child reached through `letter`, if that edge exists.
    #[inline]
    pub fn get(&self, letter: Letter) -> Option<&'w TrieNode<'w>> {
        match self {
            Edges::None => None,
            Edges::One((ch, node)) => (*ch == letter).then_some(*node),
            Edges::Two((c1, n1, c2, n2)) => {
                if letter == *c1 {
                    Some(*n1)
                } else if letter == *c2 {
                    Some(*n2)
                } else {
                    None
                }
            }
            Edges::Many(table) => table.slots[letter.index()],
        }
    }

    /// Bit set of the populated letters, bit `i` for slot `i`.
    #[inline]
    pub fn letters(&self) -> u32 {
        match self {
            Edges::None => 0,
            Edges::One((c, _)) => c.bit(),
            Edges::Two((c1, _, c2, _)) => c1.bit() | c2.bit(),
            Edges::Many(table) => table.mask,
        }
    }

    /// Returns the number of edges.
    #[inline]
    pub fn len(&self) -> usize {
        match self {
            Edges::None => 0,
            Edges::One(_) => 1,
            Edges::Two(_) => 2,
            Edges::Many(table) => table.mask.count_ones() as usize,
        }
    }

    /// True if there are no edges.
    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self, Edges::None)
    }

    /// Returns new `Edges` with an additional edge.
    ///
    /// Panics if `letter` already exists.
    pub(crate) fn with_added_child(&self, letter: Letter, child: &'w TrieNode<'w>) -> Edges<'w> {
        assert!(
            self.letters() & letter.bit() == 0,
            "with_added_child: letter already exists"
        );
        match self {
            Edges::None => Edges::One((letter, child)),
            Edges::One((c1, n1)) => {
                if letter < *c1 {
                    Edges::Two((letter, child, *c1, *n1))
                } else {
                    Edges::Two((*c1, *n1, letter, child))
                }
            }
            Edges::Two((c1, n1, c2, n2)) => {
                let mut table = Slots {
                    mask: 0,
                    slots: [None; ALPHABET_SIZE],
                };
                for (c, n) in [(*c1, *n1), (*c2, *n2), (letter, child)] {
                    table.mask |= c.bit();
                    table.slots[c.index()] = Some(n);
                }
                Edges::Many(Box::new(table))
            }
            Edges::Many(table) => {
                let mut table = table.clone();
                table.mask |= letter.bit();
                table.slots[letter.index()] = Some(child);
                Edges::Many(table)
            }
        }
    }
}

/// An iterator over the children of a TrieNode, in alphabetical order.
#[derive(Clone)]
pub struct ChildIter<'w> {
    edges: &'w Edges<'w>,
    remaining: u32,
}

impl<'w> ChildIter<'w> {
    pub(crate) fn new(edges: &'w Edges<'w>) -> Self {
        ChildIter {
            edges,
            remaining: edges.letters(),
        }
    }
}

impl<'w> Iterator for ChildIter<'w> {
    type Item = (Letter, &'w TrieNode<'w>);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let index = self.remaining.trailing_zeros() as usize;
        self.remaining &= self.remaining - 1;
        let letter = Letter::from_index(index)?;
        self.edges.get(letter).map(|node| (letter, node))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining.count_ones() as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for ChildIter<'_> {}
