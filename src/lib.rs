//! # libboggle
//!
//! Finds every dictionary word on a [Boggle](https://en.wikipedia.org/wiki/Boggle) board.
//!
//! A word is read by starting on any cell and moving to one of the 8 surrounding cells
//! for each following letter, never using a cell twice in the same word. The dictionary
//! is stored in a prefix tree (trie), which the search walks in lock-step with the board,
//! so a path is abandoned as soon as its letters stop being a prefix of some word.
//!
//! ## Features
//!
//! - **Pruned search**: the branching factor is bounded by the dictionary, not by 8^depth
//! - **Build once, share everywhere**: the frozen trie is arena-allocated, immutable and
//!   `Send + Sync`; every solve owns its own board and result set
//! - **Boggle dictionary policy**: acronyms, hyphenated words, words with repeated
//!   letters and words shorter than three letters are filtered out on load
//! - **Parallel solving** with the `parallel` feature (rayon)
//!
//! ## Quick Start
//!
//! ```
//! use libboggle::boggle::dictionary::build_legal_trie;
//! use libboggle::boggle::{Arena, Solver};
//!
//! let arena = Arena::new();
//! let (trie, _summary) = build_legal_trie(&arena, ["bad", "bead", "bread", "verb", "NASA", "at"]);
//!
//! // y o x
//! // r b a
//! // v e d
//! let found = Solver::new(trie).solve(3, 3, "yoxrbaved").unwrap();
//!
//! let mut words: Vec<_> = found.into_iter().collect();
//! words.sort();
//! assert_eq!(words, ["bad", "bead", "bread", "verb"]);
//! ```
//!
//! Boards given fewer letters than cells are padded with random letters. Pass your own
//! generator to make that reproducible:
//!
//! ```
//! use libboggle::boggle::dictionary::build_legal_trie;
//! use libboggle::boggle::{Arena, Solver};
//!
//! let arena = Arena::new();
//! let (trie, _) = build_legal_trie(&arena, ["bad", "bead"]);
//! let solver = Solver::new(trie);
//!
//! let mut rng = rand::thread_rng();
//! let found = solver.solve_with_rng(4, 4, "bead", &mut rng).unwrap();
//! assert!(found.contains("bead"));
//! ```
//!
//! ## Lower-level access
//!
//! The trie can be walked directly, one [`Letter`](boggle::Letter) at a time:
//!
//! ```
//! use libboggle::boggle::builder::build_trie;
//! use libboggle::boggle::{Arena, Letter};
//!
//! let arena = Arena::new();
//! let trie = build_trie(&arena, ["bake", "cake", "fake"]).unwrap();
//!
//! let c = trie.root().get(Letter::new('c').unwrap()).unwrap();
//! assert!(!c.is_word_complete());
//! assert!(trie.contains("cake"));
//! assert!(!trie.contains("ake"));
//! ```

#![warn(missing_docs)]

/// Core Boggle types: trie, dictionary policy, board and solver.
pub mod boggle;

pub use boggle::{Completion, Grid, ResultSet, Solver};

#[cfg(test)]
mod test {
    use super::boggle::dictionary::build_legal_trie;
    use super::boggle::{Arena, Grid, Solver};
    use itertools::Itertools;

    const SAMPLE_WORDS: [&str; 14] = [
        "bad", "bed", "bead", "bread", "orb", "ox", "box", "dove", "verb", "brave", "yob",
        "BOX", "bade", "ebb",
    ];

    fn sorted_solve(words: &[&str], letters: &str) -> Vec<String> {
        let arena = Arena::new();
        let (trie, _) = build_legal_trie(&arena, words);
        let mut grid = Grid::from_letters(3, 3, letters).unwrap();
        Solver::new(trie)
            .solve_grid(&mut grid)
            .into_iter()
            .sorted()
            .collect()
    }

    #[test]
    fn sample_board() {
        // y o x
        // r b a
        // v e d
        assert_eq!(
            sorted_solve(&SAMPLE_WORDS, "yoxrbaved"),
            ["bad", "bade", "bead", "bed", "box", "bread", "orb", "verb", "yob"]
        );
    }

    #[test]
    fn dictionary_order_does_not_matter() {
        let words = ["bad", "bead", "bread", "verb", "yob"];
        let expected = sorted_solve(&words, "yoxrbaved");
        for order in words.iter().copied().permutations(words.len()) {
            assert_eq!(sorted_solve(&order, "yoxrbaved"), expected);
        }
    }

    #[test]
    fn one_trie_serves_many_boards() {
        let arena = Arena::new();
        let (trie, _) = build_legal_trie(&arena, SAMPLE_WORDS);
        let solver = Solver::new(trie);
        let first = solver.solve(3, 3, "yoxrbaved").unwrap();
        assert!(solver.solve(3, 3, "zzzzzzzzz").unwrap().is_empty());
        assert_eq!(solver.solve(3, 3, "yoxrbaved").unwrap(), first);
    }

    #[test]
    fn solver_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Solver<'static>>();

        let arena = Arena::new();
        let (trie, _) = build_legal_trie(&arena, SAMPLE_WORDS);
        let solver = Solver::new(trie);
        let results: Vec<_> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..4)
                .map(|_| s.spawn(|| solver.solve(3, 3, "yoxrbaved").unwrap()))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });
        assert!(results.iter().all_equal());
    }
}
