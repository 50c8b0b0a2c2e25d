//! Game sessions: each turns commands into state changes and decides what the
//! front end should show. Terminal loops live at the bottom.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event};
use rand::rngs::StdRng;
use tracing::{debug, info};

use crate::hanoi::{HanoiState, Selection, Tower};
use crate::input::{fifteen_command, hanoi_command, Command};
use crate::puzzle::{Position, PuzzleState};
use crate::term::{fifteen_hit, hanoi_hit, Overlay, TerminalRenderer};

pub const FRAME: Duration = Duration::from_millis(50);

/// How long the last moved tile stays highlighted. Cosmetic only.
pub const HIGHLIGHT: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct FifteenSession {
    state: PuzzleState,
    rng: StdRng,
    finished: bool,
    last_move: Option<(Position, Instant)>,
    notice: Option<String>,
}

impl FifteenSession {
    pub fn new(state: PuzzleState, rng: StdRng) -> Self {
        info!(solvable = state.is_solvable(), "fifteen session started");
        Self {
            state,
            rng,
            finished: false,
            last_move: None,
            notice: None,
        }
    }

    pub fn state(&self) -> &PuzzleState {
        &self.state
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn handle(&mut self, command: Command, now: Instant) -> Flow {
        match command {
            Command::Quit => return Flow::Quit,
            Command::Restart => {
                self.state = PuzzleState::shuffled(&mut self.rng);
                self.finished = false;
                self.last_move = None;
                self.notice = None;
                info!("reshuffled");
            }
            Command::Slide(movement) => match self.state.target_of(movement) {
                Some(target) => {
                    debug!(%movement, %target, "slide");
                    self.submit(target, now);
                }
                None => {
                    debug!(%movement, empty = %self.state.empty(), "nothing to slide");
                    if !self.finished {
                        self.notice = Some(format!("No tile can slide {}", movement));
                    }
                }
            },
            Command::Click { column, row } => {
                if let Some(target) = fifteen_hit(column, row) {
                    self.submit(target, now);
                }
            }
            Command::Pick(_) | Command::Grow | Command::Shrink => {}
        }
        Flow::Continue
    }

    fn submit(&mut self, target: Position, now: Instant) {
        if self.finished {
            debug!(%target, "move ignored, puzzle already solved");
            return;
        }

        self.notice = None;
        let landing = self.state.empty();
        if !self.state.apply_move(target) {
            debug!(%target, empty = %landing, "rejected move");
            return;
        }

        debug!(from = %target, to = %landing, "tile moved");
        self.last_move = Some((landing, now));

        if self.state.is_solved() {
            self.finished = true;
            info!(moves = self.state.moves(), "puzzle solved");
        }
    }

    pub fn overlay(&self, now: Instant) -> Overlay {
        let highlight = self
            .last_move
            .filter(|&(_, at)| now.saturating_duration_since(at) < HIGHLIGHT)
            .map(|(pos, _)| pos);

        Overlay {
            highlight,
            finished: self.finished,
            message: if self.finished {
                Some(format!(
                    "Solved in {} moves! r: play again   q: quit",
                    self.state.moves()
                ))
            } else {
                self.notice.clone()
            },
        }
    }
}

pub struct HanoiSession {
    state: HanoiState,
    finished: bool,
    notice: Option<String>,
}

impl HanoiSession {
    pub fn new(state: HanoiState) -> Self {
        info!(disks = state.disks(), "hanoi session started");
        Self {
            state,
            finished: false,
            notice: None,
        }
    }

    pub fn state(&self) -> &HanoiState {
        &self.state
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn handle(&mut self, command: Command) -> Flow {
        match command {
            Command::Quit => return Flow::Quit,
            Command::Restart => {
                self.state.reset();
                self.restarted();
            }
            Command::Grow => {
                if self.state.grow() {
                    self.restarted();
                }
            }
            Command::Shrink => {
                if self.state.shrink() {
                    self.restarted();
                }
            }
            Command::Pick(tower) => self.pick(tower),
            Command::Click { column, row } => {
                if let Some(tower) = hanoi_hit(column, row) {
                    self.pick(tower);
                }
            }
            Command::Slide(_) => {}
        }
        Flow::Continue
    }

    fn restarted(&mut self) {
        self.finished = false;
        self.notice = None;
        info!(disks = self.state.disks(), "hanoi restarted");
    }

    fn pick(&mut self, tower: Tower) {
        if self.finished {
            debug!(%tower, "pick ignored, game finished");
            return;
        }

        match self.state.select(tower) {
            Selection::Selected(tower) => {
                debug!(%tower, "tower selected");
                self.notice = None;
            }
            Selection::Moved { from, to } => {
                debug!(%from, %to, "disk moved");
                self.notice = None;
            }
            Selection::Rejected { from, to } => {
                debug!(%from, %to, "rejected move");
                self.notice = Some(format!("Cannot move from {} to {}", from, to));
            }
        }

        if self.state.is_finished() {
            self.finished = true;
            info!(moves = self.state.moves(), "hanoi finished");
        }
    }

    pub fn overlay(&self) -> Overlay {
        let message = if self.finished {
            Some(format!(
                "Game finished in {} moves! r: restart   q: quit",
                self.state.moves()
            ))
        } else {
            self.notice.clone()
        };

        Overlay {
            highlight: None,
            finished: self.finished,
            message,
        }
    }
}

pub fn run_fifteen(term: &mut TerminalRenderer, session: &mut FifteenSession) -> Result<()> {
    let mut drawn: Option<Overlay> = None;

    loop {
        let overlay = session.overlay(Instant::now());
        if drawn.as_ref() != Some(&overlay) {
            term.draw_fifteen(session.state(), &overlay)?;
            drawn = Some(overlay);
        }

        if !event::poll(FRAME)? {
            continue;
        }
        let ev = event::read()?;
        if matches!(ev, Event::Resize(..)) {
            drawn = None;
            continue;
        }

        if let Some(command) = fifteen_command(&ev) {
            if session.handle(command, Instant::now()) == Flow::Quit {
                return Ok(());
            }
            drawn = None;
        }
    }
}

pub fn run_hanoi(term: &mut TerminalRenderer, session: &mut HanoiSession) -> Result<()> {
    let mut dirty = true;

    loop {
        if dirty {
            term.draw_hanoi(session.state(), &session.overlay())?;
            dirty = false;
        }

        if !event::poll(FRAME)? {
            continue;
        }
        let ev = event::read()?;
        if matches!(ev, Event::Resize(..)) {
            dirty = true;
            continue;
        }

        if let Some(command) = hanoi_command(&ev) {
            if session.handle(command) == Flow::Quit {
                return Ok(());
            }
            dirty = true;
        }
    }
}
