use hashbrown::{HashMap, HashSet};
use log::debug;
use rand::Rng;
use smallvec::SmallVec;

use super::builder::Trie;
use super::grid::{BoardError, Grid, Position};
use super::node::TrieNode;

/// The distinct words found on one board, in no particular order.
pub type ResultSet = HashSet<String>;

/// The cells a word was read from, first letter first.
pub type Path = Vec<Position>;

// Row-major around the current cell, including the cell itself. The (0, 0)
// probe never recurses since the current cell is already visited.
const OFFSETS: [(isize, isize); 9] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 0),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Which trie nodes count as the end of a word during the search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Completion {
    /// A node is complete if it is terminal or has no children
    /// ([`TrieNode::is_word_complete`]).
    #[default]
    TerminalOrLeaf,
    /// Only nodes explicitly marked terminal are complete.
    TerminalOnly,
}

impl Completion {
    /// True if reaching `node` completes a word under this policy.
    #[inline]
    pub fn accepts(self, node: &TrieNode<'_>) -> bool {
        match self {
            Completion::TerminalOrLeaf => node.is_word_complete(),
            Completion::TerminalOnly => node.is_terminal(),
        }
    }
}

/// Receives every word completion the search reaches.
trait Collector {
    fn found(&mut self, word: &str, path: &[Position]);
}

impl Collector for ResultSet {
    fn found(&mut self, word: &str, _path: &[Position]) {
        if !self.contains(word) {
            self.insert(word.to_owned());
        }
    }
}

impl Collector for HashMap<String, Path> {
    fn found(&mut self, word: &str, path: &[Position]) {
        if !self.contains_key(word) {
            self.insert(word.to_owned(), path.to_vec());
        }
    }
}

/// State of one depth-first descent: the word and the cells along the current path.
struct Search<'s, C> {
    completion: Completion,
    word: String,
    path: SmallVec<[Position; 16]>,
    sink: &'s mut C,
}

impl<'s, C: Collector> Search<'s, C> {
    fn new(completion: Completion, sink: &'s mut C) -> Self {
        Search {
            completion,
            word: String::new(),
            path: SmallVec::new(),
            sink,
        }
    }

    /// Searches every word starting at `pos`. Cells whose letter has no edge
    /// from the root are skipped.
    fn start(&mut self, grid: &mut Grid, root: &TrieNode<'_>, pos: Position) {
        let Some(letter) = grid.letter_at(pos) else {
            return;
        };
        let Some(node) = root.get(letter) else {
            return;
        };
        self.word.push(letter.to_char());
        self.path.push(pos);
        self.visit(grid, node, pos);
        self.path.pop();
        self.word.pop();
    }

    fn visit<'w>(&mut self, grid: &mut Grid, node: &'w TrieNode<'w>, pos: Position) {
        if self.completion.accepts(node) {
            self.sink.found(&self.word, &self.path);
        }
        if !grid.contains(pos) || grid.is_visited(pos) {
            return;
        }

        let mut grid = grid.visit(pos);
        for (letter, child) in node.children() {
            for offset in OFFSETS {
                let Some(next) = grid.neighbor(pos, offset) else {
                    continue;
                };
                if grid.is_visited(next) || grid.letter_at(next) != Some(letter) {
                    continue;
                }
                self.word.push(letter.to_char());
                self.path.push(next);
                self.visit(&mut grid, child, next);
                self.path.pop();
                self.word.pop();
            }
        }
    }
}

/// Finds dictionary words on Boggle boards.
///
/// The solver only borrows the trie, so one solver (or many) can serve any
/// number of solves, from any number of threads. Every solve works on its own
/// board and result set.
///
/// # Examples
///
/// ```
/// use libboggle::boggle::dictionary::build_legal_trie;
/// use libboggle::boggle::{Arena, Solver};
///
/// let arena = Arena::new();
/// let (trie, _) = build_legal_trie(&arena, ["cat", "cats", "dog", "act"]);
/// let solver = Solver::new(trie);
///
/// // c a t
/// // d o s
/// // g x y
/// let mut words: Vec<_> = solver.solve(3, 3, "catdosgxy").unwrap().into_iter().collect();
/// words.sort();
/// assert_eq!(words, ["cat", "cats", "dog"]);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Solver<'w> {
    trie: Trie<'w>,
    completion: Completion,
}

impl<'w> Solver<'w> {
    /// Creates a solver with the default [`Completion`] policy.
    pub fn new(trie: Trie<'w>) -> Self {
        Solver {
            trie,
            completion: Completion::default(),
        }
    }

    /// Replaces the completion policy.
    pub fn with_completion(mut self, completion: Completion) -> Self {
        self.completion = completion;
        self
    }

    /// The completion policy in use.
    pub fn completion(&self) -> Completion {
        self.completion
    }

    /// The dictionary being searched.
    pub fn trie(&self) -> Trie<'w> {
        self.trie
    }

    /// Finds all words on a `width x height` board given as row-major letters.
    ///
    /// Missing letters are filled in at random; see [`solve_with_rng`](Solver::solve_with_rng).
    ///
    /// # Errors
    ///
    /// Returns a [`BoardError`] if the board is too large or a letter is outside `a..=z`.
    pub fn solve(&self, width: usize, height: usize, letters: &str) -> Result<ResultSet, BoardError> {
        self.solve_with_rng(width, height, letters, &mut rand::thread_rng())
    }

    /// Like [`solve`](Solver::solve), drawing padding letters from `rng`.
    ///
    /// # Errors
    ///
    /// Returns a [`BoardError`] if the board is too large or a letter is outside `a..=z`.
    pub fn solve_with_rng<R: Rng + ?Sized>(
        &self,
        width: usize,
        height: usize,
        letters: &str,
        rng: &mut R,
    ) -> Result<ResultSet, BoardError> {
        let mut grid = Grid::from_board_letters(width, height, letters, rng)?;
        Ok(self.solve_grid(&mut grid))
    }

    /// Finds all words on an already populated board.
    ///
    /// Every visited flag is cleared again when this returns.
    pub fn solve_grid(&self, grid: &mut Grid) -> ResultSet {
        let mut found = ResultSet::new();
        self.scan(grid, &mut found);
        debug!(
            "solved {}x{} board: {} words",
            grid.width(),
            grid.height(),
            found.len()
        );
        found
    }

    /// Finds all words on the board together with the first path found for each.
    ///
    /// The keys are exactly the words [`solve_grid`](Solver::solve_grid) returns.
    pub fn solve_traced(&self, grid: &mut Grid) -> HashMap<String, Path> {
        let mut found = HashMap::new();
        self.scan(grid, &mut found);
        found
    }

    fn scan<C: Collector>(&self, grid: &mut Grid, sink: &mut C) {
        let root = self.trie.root();
        let mut search = Search::new(self.completion, sink);
        for row in 0..grid.height() {
            for col in 0..grid.width() {
                search.start(grid, root, Position::new(row, col));
            }
        }
    }

    /// Finds all words on the board, searching from different start cells in parallel.
    ///
    /// Each worker searches a private copy of the board, so `grid` is only read.
    /// Returns the same set as [`solve_grid`](Solver::solve_grid).
    #[cfg(feature = "parallel")]
    pub fn solve_grid_parallel(&self, grid: &Grid) -> ResultSet {
        use rayon::prelude::*;

        let root = self.trie.root();
        let starts: Vec<Position> = grid.positions().collect();
        let found = starts
            .into_par_iter()
            .map_init(
                || grid.clone(),
                |local, pos| {
                    let mut found = ResultSet::new();
                    Search::new(self.completion, &mut found).start(local, root, pos);
                    found
                },
            )
            .reduce(ResultSet::new, |mut a, mut b| {
                if a.len() < b.len() {
                    std::mem::swap(&mut a, &mut b);
                }
                a.extend(b);
                a
            });
        debug!(
            "solved {}x{} board in parallel: {} words",
            grid.width(),
            grid.height(),
            found.len()
        );
        found
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::boggle::builder::build_trie;
    use crate::boggle::dictionary::build_legal_trie;
    use crate::boggle::letter::Letter;
    use itertools::Itertools;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;
    use typed_arena::Arena;

    fn l(ch: char) -> Letter {
        Letter::new(ch).unwrap()
    }

    fn sorted(words: ResultSet) -> Vec<String> {
        words.into_iter().sorted().collect()
    }

    fn solve(trie: Trie<'_>, width: usize, height: usize, letters: &str) -> Vec<String> {
        let mut grid = Grid::from_letters(width, height, letters).unwrap();
        sorted(Solver::new(trie).solve_grid(&mut grid))
    }

    #[test]
    fn finds_connected_words() {
        let arena = Arena::new();
        let (trie, _) = build_legal_trie(&arena, ["cat", "cats", "dog"]);
        // c a t
        // d o s
        // g x y
        assert_eq!(solve(trie, 3, 3, "catdosgxy"), ["cat", "cats", "dog"]);
    }

    #[test]
    fn padded_scenario_depends_only_on_the_padding() {
        let arena = Arena::new();
        let (trie, _) = build_legal_trie(&arena, ["cat", "cats", "dog"]);
        let solver = Solver::new(trie);
        for seed in 0..8 {
            // c a t
            // s d o
            // g e ?
            let found = solver
                .solve_with_rng(3, 3, "catsdoge", &mut ChaCha20Rng::seed_from_u64(seed))
                .unwrap();
            let grid =
                Grid::from_board_letters(3, 3, "catsdoge", &mut ChaCha20Rng::seed_from_u64(seed))
                    .unwrap();
            let pad = grid.letter_at(Position::new(2, 2)).unwrap();

            assert!(found.contains("cat"));
            // t and s are two columns apart, and no other s can follow t.
            assert!(!found.contains("cats"));
            // The only g next to the o would be the padded cell.
            assert_eq!(found.contains("dog"), pad == l('g'), "seed {seed}");
        }
    }

    #[test]
    fn words_need_adjacent_cells() {
        let arena = Arena::new();
        let (trie, _) = build_legal_trie(&arena, ["cat"]);
        assert_eq!(solve(trie, 3, 1, "cat"), ["cat"]);
        assert!(solve(trie, 4, 1, "caxt").is_empty());
        // c x
        // x a
        // t x
        assert_eq!(solve(trie, 2, 3, "cxxatx"), ["cat"]);
    }

    #[test]
    fn cells_are_not_reused() {
        let arena = Arena::new();
        let trie = build_trie(&arena, ["aba", "ab"]).unwrap();
        assert_eq!(solve(trie, 2, 1, "ab"), ["ab"]);
        assert_eq!(solve(trie, 3, 1, "aba"), ["ab", "aba"]);
    }

    #[test]
    fn self_offset_never_extends_a_word() {
        let arena = Arena::new();
        let trie = build_trie(&arena, ["aa"]).unwrap();
        assert!(solve(trie, 1, 1, "a").is_empty());
        assert_eq!(solve(trie, 2, 1, "aa"), ["aa"]);
    }

    #[test]
    fn rejected_words_are_not_found_even_when_present() {
        let dictionary = ["BALLOON", "balloon", "AT", "at", "ban"];
        // b a l
        // n o l
        // a t o
        let board = "balnolato";

        let arena = Arena::new();
        let (legal, _) = build_legal_trie(&arena, dictionary);
        assert_eq!(solve(legal, 3, 3, board), ["ban"]);

        let raw = build_trie(&arena, ["balloon", "at", "ban"]).unwrap();
        assert_eq!(solve(raw, 3, 3, board), ["at", "balloon", "ban"]);
    }

    #[test]
    fn dead_end_counts_as_a_word_by_default() {
        // c -> a -> t, where t was never marked terminal.
        let t = TrieNode::new(false);
        let mut a = TrieNode::new(false);
        a.insert(l('t'), &t);
        let mut c = TrieNode::new(false);
        c.insert(l('a'), &a);
        let mut root = TrieNode::new(false);
        root.insert(l('c'), &c);
        let trie = Trie::from_root(&root);
        assert!(!trie.contains("cat"));

        let mut grid = Grid::from_letters(3, 1, "cat").unwrap();
        let found = Solver::new(trie).solve_grid(&mut grid);
        assert_eq!(sorted(found), ["cat"]);

        let strict = Solver::new(trie).with_completion(Completion::TerminalOnly);
        assert!(strict.solve_grid(&mut grid).is_empty());
    }

    #[test]
    fn built_tries_have_no_dead_end_artifacts() {
        let arena = Arena::new();
        let (trie, _) = build_legal_trie(&arena, ["bad", "bead", "bread", "orb", "yob"]);
        let mut grid = Grid::from_letters(3, 3, "yoxrbaved").unwrap();
        let loose = Solver::new(trie).solve_grid(&mut grid);
        let strict = Solver::new(trie)
            .with_completion(Completion::TerminalOnly)
            .solve_grid(&mut grid);
        assert_eq!(loose, strict);
    }

    #[test]
    fn traced_paths_are_adjacent_and_unique() {
        let arena = Arena::new();
        let (trie, _) = build_legal_trie(
            &arena,
            [
                "serpent", "spin", "pins", "lines", "tangle", "gnat", "saline", "rise", "sire",
                "pest", "step", "tens", "nest", "lens", "sling", "glint", "resign", "singe",
            ],
        );
        // s e r s
        // p a t g
        // l i n e
        // s e r s
        let mut grid = Grid::from_letters(4, 4, "serspatglinesers").unwrap();
        let solver = Solver::new(trie);
        let traced = solver.solve_traced(&mut grid);
        assert!(!traced.is_empty());
        for (word, path) in &traced {
            assert_eq!(path.len(), word.chars().count(), "{word}");
            assert!(path.iter().all_unique(), "{word} reuses a cell: {path:?}");
            assert!(
                path.iter().tuple_windows().all(|(a, b)| a.is_adjacent(b)),
                "{word} jumps: {path:?}"
            );
            let spelled: String = path
                .iter()
                .filter_map(|&p| grid.letter_at(p))
                .map(char::from)
                .collect();
            assert_eq!(&spelled, word);
            assert!(trie.contains(word));
        }
        let words = solver.solve_grid(&mut grid);
        assert_eq!(traced.keys().cloned().collect::<ResultSet>(), words);
    }

    #[test]
    fn repeated_solves_agree() {
        let arena = Arena::new();
        let (trie, _) = build_legal_trie(&arena, ["bad", "bed", "bead", "bread", "verb", "box"]);
        let solver = Solver::new(trie);
        let first = solver.solve(3, 3, "yoxrbaved").unwrap();
        let second = solver.solve(3, 3, "yoxrbaved").unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 6);
    }

    #[test]
    fn visited_flags_are_cleared_after_solving() {
        let arena = Arena::new();
        let (trie, _) = build_legal_trie(&arena, ["bad", "bead", "bread"]);
        let mut grid = Grid::from_letters(3, 3, "yoxrbaved").unwrap();
        Solver::new(trie).solve_traced(&mut grid);
        assert!(grid.is_clear());
        Solver::new(trie).solve_grid(&mut grid);
        assert!(grid.is_clear());
    }

    #[test]
    fn degenerate_inputs_give_no_words() {
        let arena = Arena::new();
        let (empty, _) = build_legal_trie(&arena, Vec::<&str>::new());
        assert!(solve(empty, 3, 3, "yoxrbaved").is_empty());

        let (trie, _) = build_legal_trie(&arena, ["bad"]);
        let solver = Solver::new(trie);
        assert!(solver.solve(0, 0, "").unwrap().is_empty());
        assert!(solver.solve(0, 5, "bad").unwrap().is_empty());
    }

    #[test]
    fn bad_board_letters_are_reported() {
        let arena = Arena::new();
        let (trie, _) = build_legal_trie(&arena, ["bad"]);
        let err = Solver::new(trie).solve(2, 2, "bAd").unwrap_err();
        assert_eq!(err, BoardError::InvalidLetter { index: 1, found: 'A' });
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn parallel_solve_matches_sequential() {
        let arena = Arena::new();
        let (trie, _) = build_legal_trie(
            &arena,
            ["serpent", "spin", "pins", "lines", "tangle", "gnat", "rise", "step", "nest"],
        );
        let mut grid = Grid::from_letters(4, 4, "serspatglinesers").unwrap();
        let solver = Solver::new(trie);
        assert_eq!(solver.solve_grid_parallel(&grid), solver.solve_grid(&mut grid));
        assert!(grid.is_clear());
    }
}
