use log::debug;
use rand::Rng;

use std::error::Error;
use std::fmt;
use std::ops::{Deref, DerefMut};

use super::letter::{Letter, ALPHABET_SIZE};

/// A cell coordinate on the board, zero-based from the top-left corner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    /// Row, counted from the top.
    pub row: usize,
    /// Column, counted from the left.
    pub col: usize,
}

impl Position {
    /// Creates a position.
    pub const fn new(row: usize, col: usize) -> Self {
        Position { row, col }
    }

    /// True if `other` is one of the 8 cells surrounding this one.
    pub fn is_adjacent(&self, other: &Position) -> bool {
        let dr = self.row.abs_diff(other.row);
        let dc = self.col.abs_diff(other.col);
        dr.max(dc) == 1
    }
}

/// One board position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Cell {
    letter: Option<Letter>,
    visited: bool,
}

impl Cell {
    /// The letter on this cell, `None` until the board is populated.
    #[inline]
    pub fn letter(&self) -> Option<Letter> {
        self.letter
    }

    /// True while this cell is on the path being searched.
    #[inline]
    pub fn is_visited(&self) -> bool {
        self.visited
    }
}

/// Errors for board input the grid cannot represent.
#[derive(Debug, PartialEq, Eq)]
pub enum BoardError {
    /// `width * height` does not fit in `usize`.
    Dimensions {
        /// Requested width.
        width: usize,
        /// Requested height.
        height: usize,
    },
    /// The letters do not fill the board exactly.
    LengthMismatch {
        /// `width * height`.
        expected: usize,
        /// Number of letters given.
        found: usize,
    },
    /// A character outside `a..=z`.
    InvalidLetter {
        /// Row-major index of the cell.
        index: usize,
        /// The offending character.
        found: char,
    },
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::Dimensions { width, height } => {
                write!(f, "DimensionsError - {width}x{height} board is too large")
            }
            BoardError::LengthMismatch { expected, found } => {
                write!(f, "LengthMismatch - board needs {expected} letters, got {found}")
            }
            BoardError::InvalidLetter { index, found } => {
                write!(f, "InvalidLetter - {found:?} at cell {index} is not in a..=z")
            }
        }
    }
}

impl Error for BoardError {}

/// Returns `width * height`, the number of cells on the board.
///
/// # Errors
///
/// Returns `BoardError::Dimensions` on overflow.
pub fn board_len(width: usize, height: usize) -> Result<usize, BoardError> {
    width
        .checked_mul(height)
        .ok_or(BoardError::Dimensions { width, height })
}

/// A `height x width` board of cells stored in row-major order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Creates an empty 0x0 board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a board and fills it with `letters` in row-major order.
    ///
    /// # Examples
    ///
    /// ```
    /// use libboggle::boggle::grid::{Grid, Position};
    ///
    /// let grid = Grid::from_letters(3, 2, "catdog").unwrap();
    /// assert_eq!(grid.letter_at(Position::new(1, 0)).map(char::from), Some('d'));
    /// ```
    ///
    /// # Errors
    ///
    /// See [`populate`](Grid::populate).
    pub fn from_letters(width: usize, height: usize, letters: &str) -> Result<Self, BoardError> {
        let mut grid = Grid::new();
        grid.reset(width, height)?;
        grid.populate(letters)?;
        Ok(grid)
    }

    /// Creates a board from raw board input.
    ///
    /// Short input is padded with random letters from `rng` (see
    /// [`normalize_board_letters`]); when there are more letters than cells,
    /// only the first `width * height` are placed.
    ///
    /// # Errors
    ///
    /// Returns `BoardError::Dimensions` on overflow, or `BoardError::InvalidLetter`
    /// if a placed character is outside `a..=z`.
    pub fn from_board_letters<R: Rng + ?Sized>(
        width: usize,
        height: usize,
        letters: &str,
        rng: &mut R,
    ) -> Result<Self, BoardError> {
        let len = board_len(width, height)?;
        let letters = normalize_board_letters(width, height, letters, rng)?;
        let end = letters
            .char_indices()
            .nth(len)
            .map_or(letters.len(), |(i, _)| i);
        Grid::from_letters(width, height, &letters[..end])
    }

    /// Replaces the board with a fresh `height x width` array of empty cells.
    ///
    /// # Errors
    ///
    /// Returns `BoardError::Dimensions` if the cell count overflows.
    pub fn reset(&mut self, width: usize, height: usize) -> Result<(), BoardError> {
        let len = board_len(width, height)?;
        self.width = width;
        self.height = height;
        self.cells.clear();
        self.cells.resize(len, Cell::default());
        Ok(())
    }

    /// Assigns one letter per cell in row-major order.
    ///
    /// # Errors
    ///
    /// `letters` must hold exactly `width * height` characters, all in `a..=z`.
    /// On error the board is left unchanged.
    pub fn populate(&mut self, letters: &str) -> Result<(), BoardError> {
        let found = letters.chars().count();
        if found != self.cells.len() {
            return Err(BoardError::LengthMismatch {
                expected: self.cells.len(),
                found,
            });
        }
        let parsed = letters
            .chars()
            .enumerate()
            .map(|(index, found)| {
                Letter::new(found).ok_or(BoardError::InvalidLetter { index, found })
            })
            .collect::<Result<Vec<_>, _>>()?;
        for (cell, letter) in self.cells.iter_mut().zip(parsed) {
            *cell = Cell {
                letter: Some(letter),
                visited: false,
            };
        }
        Ok(())
    }

    /// Board width in cells.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Board height in cells.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// True if the board has no cells.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// True if `(row, col)` lies on the board.
    #[inline]
    pub fn in_bounds(&self, row: isize, col: isize) -> bool {
        row >= 0 && (row as usize) < self.height && col >= 0 && (col as usize) < self.width
    }

    /// True if `pos` lies on the board.
    #[inline]
    pub fn contains(&self, pos: Position) -> bool {
        pos.row < self.height && pos.col < self.width
    }

    /// Returns the position `offset` away from `pos`, if it is on the board.
    #[inline]
    pub fn neighbor(&self, pos: Position, (dr, dc): (isize, isize)) -> Option<Position> {
        let row = pos.row.checked_add_signed(dr)?;
        let col = pos.col.checked_add_signed(dc)?;
        let next = Position { row, col };
        self.contains(next).then_some(next)
    }

    /// The cell at `pos`.
    ///
    /// Panics if `pos` is out of bounds; check with [`contains`](Grid::contains) first.
    #[inline]
    pub fn cell(&self, pos: Position) -> &Cell {
        &self.cells[self.index(pos)]
    }

    /// The letter at `pos`, `None` if the cell is empty.
    ///
    /// Panics if `pos` is out of bounds.
    #[inline]
    pub fn letter_at(&self, pos: Position) -> Option<Letter> {
        self.cell(pos).letter
    }

    /// Reads the visited flag at `pos`.
    ///
    /// Panics if `pos` is out of bounds.
    #[inline]
    pub fn is_visited(&self, pos: Position) -> bool {
        self.cell(pos).visited
    }

    /// Marks `pos` visited until the returned guard is dropped.
    ///
    /// The guard derefs to the grid, so the search can keep descending through it
    /// while the cell stays marked.
    ///
    /// Panics if `pos` is out of bounds.
    pub fn visit(&mut self, pos: Position) -> Visit<'_> {
        let index = self.index(pos);
        debug_assert!(!self.cells[index].visited, "cell {pos:?} visited twice");
        self.cells[index].visited = true;
        Visit { grid: self, index }
    }

    /// All positions in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.height).flat_map(move |row| (0..self.width).map(move |col| Position { row, col }))
    }

    /// True if no cell is marked visited.
    pub fn is_clear(&self) -> bool {
        self.cells.iter().all(|cell| !cell.visited)
    }

    #[inline]
    fn index(&self, pos: Position) -> usize {
        assert!(self.contains(pos), "position {pos:?} is off the board");
        pos.row * self.width + pos.col
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.width.max(1)) {
            for cell in row {
                let ch = cell.letter.map_or('.', Letter::to_char);
                write!(f, "{ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// A visited mark on one cell, released when dropped.
pub struct Visit<'g> {
    grid: &'g mut Grid,
    index: usize,
}

impl Deref for Visit<'_> {
    type Target = Grid;

    fn deref(&self) -> &Grid {
        &*self.grid
    }
}

impl DerefMut for Visit<'_> {
    fn deref_mut(&mut self) -> &mut Grid {
        &mut *self.grid
    }
}

impl Drop for Visit<'_> {
    fn drop(&mut self) {
        self.grid.cells[self.index].visited = false;
    }
}

/// Makes `letters` long enough to fill a `width x height` board.
///
/// Missing cells are filled with letters drawn uniformly from `a..=z` using
/// `rng`. Input that is already long enough is returned unchanged, surplus
/// included.
///
/// # Examples
///
/// ```
/// use libboggle::boggle::grid::normalize_board_letters;
///
/// let letters = normalize_board_letters(3, 3, "catdo", &mut rand::thread_rng()).unwrap();
/// assert_eq!(letters.len(), 9);
/// assert!(letters.starts_with("catdo"));
/// ```
///
/// # Errors
///
/// Returns `BoardError::Dimensions` if `width * height` overflows.
pub fn normalize_board_letters<R: Rng + ?Sized>(
    width: usize,
    height: usize,
    letters: &str,
    rng: &mut R,
) -> Result<String, BoardError> {
    let len = board_len(width, height)?;
    let have = letters.chars().count();
    if have >= len {
        if have > len {
            debug!("board {width}x{height}: ignoring {} surplus letters", have - len);
        }
        return Ok(letters.to_owned());
    }
    let missing = len - have;
    debug!("board {width}x{height}: padding {missing} random letters");
    let mut padded = String::with_capacity(letters.len() + missing);
    padded.push_str(letters);
    padded.extend(
        (0..missing)
            .filter_map(|_| Letter::from_index(rng.gen_range(0..ALPHABET_SIZE)))
            .map(char::from),
    );
    Ok(padded)
}
