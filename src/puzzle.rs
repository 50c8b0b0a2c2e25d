use rand::{seq::SliceRandom, Rng};
use std::fmt;
use std::str::FromStr;

use crate::error::PuzzleError;

pub const SIZE: usize = 4;
pub const CELLS: usize = SIZE * SIZE;

/// The empty space is represented by 0.
pub const EMPTY: u8 = 0;

/// Row-major layout that counts as solved. Note the empty cell sits in the
/// top-right corner and rows run from 13 down to 1.
pub const TARGET: Grid = [13, 14, 15, EMPTY, 9, 10, 11, 12, 5, 6, 7, 8, 1, 2, 3, 4];

pub type Grid = [u8; CELLS];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub col: usize,
    pub row: usize,
}

impl Position {
    pub const fn new(col: usize, row: usize) -> Self {
        Self { col, row }
    }

    pub const fn from_index(index: usize) -> Self {
        Self {
            col: index % SIZE,
            row: index / SIZE,
        }
    }

    pub const fn index(&self) -> usize {
        self.row * SIZE + self.col
    }

    pub const fn in_bounds(&self) -> bool {
        self.col < SIZE && self.row < SIZE
    }

    /// Manhattan distance.
    pub fn distance(&self, other: Position) -> usize {
        self.col.abs_diff(other.col) + self.row.abs_diff(other.row)
    }

    fn offset(&self, dcol: isize, drow: isize) -> Option<Position> {
        let col = self.col.checked_add_signed(dcol)?;
        let row = self.row.checked_add_signed(drow)?;
        let pos = Position::new(col, row);
        pos.in_bounds().then_some(pos)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.col, self.row)
    }
}

/// Keyboard direction. Names the way a tile travels into the empty cell, so
/// `Up` slides the tile below the gap upwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    Up,
    Left,
    Down,
    Right,
}

impl Move {
    /// Offset of the moving tile relative to the empty cell, as (col, row).
    pub fn as_offset(&self) -> (isize, isize) {
        match self {
            Move::Up => (0, 1),
            Move::Left => (1, 0),
            Move::Down => (0, -1),
            Move::Right => (-1, 0),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Move::Up => "up",
            Move::Left => "left",
            Move::Down => "down",
            Move::Right => "right",
        })
    }
}

/// Shuffles the 16 cells until the permutation can reach [`TARGET`].
///
/// Exactly half of all permutations are solvable, so the expected number of
/// attempts is two.
pub fn generate_solvable_grid<R: Rng + ?Sized>(rng: &mut R) -> Grid {
    let mut cells = TARGET;
    let mut attempts = 0u32;

    loop {
        attempts += 1;
        cells.shuffle(rng);

        if is_solvable(&cells) {
            tracing::debug!(attempts, "generated solvable grid");
            return cells;
        }
    }
}

/// Parity check against [`TARGET`]: inversions counted in target order plus
/// the number of rows between the empty cell and its target row must be even.
///
/// `cells` must hold exactly one [`EMPTY`].
pub fn is_solvable(cells: &Grid) -> bool {
    let Some(empty) = cells.iter().position(|&c| c == EMPTY) else {
        return false;
    };
    let row_shift = Position::from_index(empty).row.abs_diff(target_empty().row);

    (count_inversions(cells) + row_shift) % 2 == 0
}

fn count_inversions(cells: &Grid) -> usize {
    let ranks: Vec<usize> = cells
        .iter()
        .filter(|&&val| val != EMPTY)
        .map(|&val| target_index(val))
        .collect();

    ranks
        .iter()
        .enumerate()
        .map(|(i, &rank)| ranks[i + 1..].iter().filter(|&&next| next < rank).count())
        .sum()
}

fn target_index(tile: u8) -> usize {
    TARGET
        .iter()
        .position(|&t| t == tile)
        .unwrap_or(CELLS)
}

fn target_empty() -> Position {
    Position::from_index(target_index(EMPTY))
}

/// Logical state of one 15-puzzle session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PuzzleState {
    cells: Grid,
    empty: Position,
    moves: u32,
}

impl PuzzleState {
    pub fn solved() -> Self {
        Self {
            cells: TARGET,
            empty: target_empty(),
            moves: 0,
        }
    }

    pub fn shuffled<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let cells = generate_solvable_grid(rng);
        // A generated grid is a permutation of TARGET, so it always has a gap.
        let empty = cells.iter().position(|&c| c == EMPTY).unwrap_or(0);

        Self {
            cells,
            empty: Position::from_index(empty),
            moves: 0,
        }
    }

    /// Builds a state from a row-major list, checking the permutation invariant.
    pub fn from_cells(values: &[u8]) -> Result<Self, PuzzleError> {
        if values.len() != CELLS {
            return Err(PuzzleError::CellCount {
                expected: CELLS,
                actual: values.len(),
            });
        }

        let mut seen = [false; CELLS];
        let mut empties = 0;
        let mut cells = [EMPTY; CELLS];
        let mut empty = 0;

        for (i, &val) in values.iter().enumerate() {
            if val == EMPTY {
                empties += 1;
                empty = i;
            } else if val as usize >= CELLS {
                return Err(PuzzleError::TileOutOfRange(val));
            } else if seen[val as usize] {
                return Err(PuzzleError::DuplicateTile(val));
            } else {
                seen[val as usize] = true;
            }
            cells[i] = val;
        }

        if empties != 1 {
            return Err(PuzzleError::EmptyCount(empties));
        }

        Ok(Self {
            cells,
            empty: Position::from_index(empty),
            moves: 0,
        })
    }

    /// Passes the state through only if it can still be solved.
    pub fn require_solvable(self) -> Result<Self, PuzzleError> {
        if self.is_solvable() {
            Ok(self)
        } else {
            Err(PuzzleError::Unsolvable)
        }
    }

    pub fn cells(&self) -> &Grid {
        &self.cells
    }

    pub fn empty(&self) -> Position {
        self.empty
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn tile_at(&self, pos: Position) -> Option<u8> {
        pos.in_bounds().then(|| self.cells[pos.index()])
    }

    pub fn is_adjacent(&self, target: Position) -> bool {
        target.in_bounds() && target.distance(self.empty) == 1
    }

    /// Slides the tile at `target` into the gap. Returns false, leaving the
    /// state untouched, when `target` is not next to the empty cell.
    pub fn apply_move(&mut self, target: Position) -> bool {
        if !self.is_adjacent(target) {
            return false;
        }

        self.cells.swap(self.empty.index(), target.index());
        self.empty = target;
        self.moves += 1;
        true
    }

    /// Position of the tile a keyboard direction would move, if any.
    pub fn target_of(&self, movement: Move) -> Option<Position> {
        let (dcol, drow) = movement.as_offset();
        self.empty.offset(dcol, drow)
    }

    pub fn is_solved(&self) -> bool {
        self.cells == TARGET
    }

    pub fn is_solvable(&self) -> bool {
        is_solvable(&self.cells)
    }

    /// Sum of each tile's Manhattan distance from its target cell.
    pub fn misplaced_distance(&self) -> usize {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &val)| val != EMPTY)
            .map(|(i, &val)| {
                Position::from_index(i).distance(Position::from_index(target_index(val)))
            })
            .sum()
    }
}

impl FromStr for PuzzleState {
    type Err = PuzzleError;

    /// Accepts comma and/or whitespace separated cells; `_` or `0` is the gap.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let values = s
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|tok| !tok.is_empty())
            .map(|tok| match tok {
                "_" => Ok(EMPTY),
                _ => tok
                    .parse::<u8>()
                    .map_err(|_| PuzzleError::BadCell(tok.to_string())),
            })
            .collect::<Result<Vec<u8>, _>>()?;

        Self::from_cells(&values)
    }
}

impl fmt::Display for PuzzleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(SIZE) {
            for &val in row {
                if val == EMPTY {
                    write!(f, " _ ")?;
                } else {
                    write!(f, "{:2} ", val)?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
