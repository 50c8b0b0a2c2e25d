//! Tower of Hanoi rules.
//!
//! Disks are numbered by size, `1` being the smallest. Each tower is a stack
//! stored bottom first. The game is finished once every disk sits on
//! [`Tower::Right`].

use std::fmt;

use crate::error::PuzzleError;

pub const MIN_DISKS: usize = 3;
pub const MAX_DISKS: usize = 10;
pub const DEFAULT_DISKS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tower {
    Left,
    Middle,
    Right,
}

impl Tower {
    pub const ALL: [Tower; 3] = [Tower::Left, Tower::Middle, Tower::Right];

    pub fn index(self) -> usize {
        match self {
            Tower::Left => 0,
            Tower::Middle => 1,
            Tower::Right => 2,
        }
    }

    pub fn from_index(index: usize) -> Option<Tower> {
        Self::ALL.get(index).copied()
    }
}

impl fmt::Display for Tower {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Tower::Left => "left",
            Tower::Middle => "middle",
            Tower::Right => "right",
        };
        write!(f, "{}", s)
    }
}

/// Result of picking a tower.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// First pick; the tower is now held.
    Selected(Tower),
    /// Second pick moved the top disk.
    Moved { from: Tower, to: Tower },
    /// Second pick was not a legal move. The selection is cleared anyway.
    Rejected { from: Tower, to: Tower },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HanoiState {
    disks: usize,
    towers: [Vec<u8>; 3],
    selected: Option<Tower>,
    moves: u32,
}

impl HanoiState {
    pub fn new(disks: usize) -> Result<Self, PuzzleError> {
        if !(MIN_DISKS..=MAX_DISKS).contains(&disks) {
            return Err(PuzzleError::DiskCount {
                count: disks,
                min: MIN_DISKS,
                max: MAX_DISKS,
            });
        }

        let mut state = Self {
            disks,
            towers: [Vec::new(), Vec::new(), Vec::new()],
            selected: None,
            moves: 0,
        };
        state.reset();
        Ok(state)
    }

    /// Puts every disk back on the left tower, largest at the bottom.
    pub fn reset(&mut self) {
        for tower in &mut self.towers {
            tower.clear();
        }
        self.towers[Tower::Left.index()] = (1..=self.disks as u8).rev().collect();
        self.selected = None;
        self.moves = 0;
    }

    /// Adds a disk and restarts. No-op at [`MAX_DISKS`].
    pub fn grow(&mut self) -> bool {
        if self.disks >= MAX_DISKS {
            return false;
        }
        self.disks += 1;
        self.reset();
        true
    }

    /// Removes a disk and restarts. No-op at [`MIN_DISKS`].
    pub fn shrink(&mut self) -> bool {
        if self.disks <= MIN_DISKS {
            return false;
        }
        self.disks -= 1;
        self.reset();
        true
    }

    pub fn disks(&self) -> usize {
        self.disks
    }

    pub fn tower(&self, tower: Tower) -> &[u8] {
        &self.towers[tower.index()]
    }

    pub fn top(&self, tower: Tower) -> Option<u8> {
        self.tower(tower).last().copied()
    }

    pub fn selected(&self) -> Option<Tower> {
        self.selected
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn minimum_moves(&self) -> u32 {
        (1u32 << self.disks) - 1
    }

    pub fn can_move(&self, from: Tower, to: Tower) -> bool {
        if from == to {
            return false;
        }
        match (self.top(from), self.top(to)) {
            (None, _) => false,
            (Some(_), None) => true,
            (Some(disk), Some(below)) => disk < below,
        }
    }

    /// Moves the top disk of `from` onto `to`. Illegal moves leave the state
    /// untouched and return false.
    pub fn apply_move(&mut self, from: Tower, to: Tower) -> bool {
        if !self.can_move(from, to) {
            return false;
        }

        if let Some(disk) = self.towers[from.index()].pop() {
            self.towers[to.index()].push(disk);
            self.moves += 1;
        }
        true
    }

    /// Click-style interaction: first pick holds a tower, second pick moves
    /// from the held tower to the picked one.
    pub fn select(&mut self, tower: Tower) -> Selection {
        match self.selected.take() {
            None => {
                self.selected = Some(tower);
                Selection::Selected(tower)
            }
            Some(from) => {
                if self.apply_move(from, tower) {
                    Selection::Moved { from, to: tower }
                } else {
                    Selection::Rejected { from, to: tower }
                }
            }
        }
    }

    pub fn is_finished(&self) -> bool {
        self.tower(Tower::Right).len() == self.disks
    }
}

impl Default for HanoiState {
    fn default() -> Self {
        let mut state = Self {
            disks: DEFAULT_DISKS,
            towers: [Vec::new(), Vec::new(), Vec::new()],
            selected: None,
            moves: 0,
        };
        state.reset();
        state
    }
}
