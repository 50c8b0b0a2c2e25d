use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PuzzleError {
    #[error("grid must have {expected} cells, got {actual}")]
    CellCount { expected: usize, actual: usize },
    #[error("tile {0} is outside 1..=15")]
    TileOutOfRange(u8),
    #[error("tile {0} appears more than once")]
    DuplicateTile(u8),
    #[error("grid has {0} empty cells, expected exactly one")]
    EmptyCount(usize),
    #[error("layout cannot reach the solved grid")]
    Unsolvable,
    #[error("cannot parse cell {0:?}")]
    BadCell(String),
    #[error("disk count {count} is outside {min}..={max}")]
    DiskCount { count: usize, min: usize, max: usize },
}
