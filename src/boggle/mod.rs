/// Trie builder, frozen trie handle and builder errors.
pub mod builder;
/// Dictionary validation policy and legal-word loading.
pub mod dictionary;
/// Compact per-node edge tables.
pub mod edges;
/// The board: cells, positions, visited marks and letter padding.
pub mod grid;
/// The 26-letter alphabet used for trie edges and board cells.
pub mod letter;
/// Trie nodes.
pub mod node;
/// Depth-first word search over the board.
pub mod solver;

pub use builder::{IntoWord, Trie, TrieBuilder};
pub use grid::{Grid, Position};
pub use letter::Letter;
pub use node::TrieNode;
pub use solver::{Completion, ResultSet, Solver};

/// Re-export `typed_arena::Arena`, which owns the nodes of every frozen trie.
pub use typed_arena::Arena;
