//! Puzzle logic for the fifteen and Tower of Hanoi games, plus a terminal
//! front end that drives them.

pub mod app;
pub mod error;
pub mod hanoi;
pub mod input;
pub mod puzzle;
pub mod term;

pub use error::PuzzleError;
pub use hanoi::{HanoiState, Selection, Tower};
pub use puzzle::{generate_solvable_grid, is_solvable, Move, Position, PuzzleState};
