//! Terminal events to game commands.
//!
//! Mouse clicks are passed through as screen coordinates; resolving them to
//! a tile or tower needs the current layout, which lives in `term`.

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::hanoi::Tower;
use crate::puzzle::Move;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Slide(Move),
    Click { column: u16, row: u16 },
    Pick(Tower),
    Grow,
    Shrink,
    Restart,
    Quit,
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

fn common_key(key: KeyEvent) -> Option<Command> {
    if should_quit(key) {
        return Some(Command::Quit);
    }
    match key.code {
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Command::Restart),
        _ => None,
    }
}

fn left_click(mouse: MouseEvent) -> Option<Command> {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => Some(Command::Click {
            column: mouse.column,
            row: mouse.row,
        }),
        _ => None,
    }
}

fn pressed(key: &KeyEvent) -> bool {
    key.kind != KeyEventKind::Release
}

/// Map an event for the 15-puzzle.
pub fn fifteen_command(event: &Event) -> Option<Command> {
    match event {
        Event::Key(key) if pressed(key) => {
            let slide = match key.code {
                KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('k') => Some(Move::Up),
                KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('j') => Some(Move::Down),
                KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('h') => Some(Move::Left),
                KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('l') => Some(Move::Right),
                _ => None,
            };
            slide.map(Command::Slide).or_else(|| common_key(*key))
        }
        Event::Mouse(mouse) => left_click(*mouse),
        _ => None,
    }
}

/// Map an event for Tower of Hanoi.
pub fn hanoi_command(event: &Event) -> Option<Command> {
    match event {
        Event::Key(key) if pressed(key) => match key.code {
            KeyCode::Char('1') => Some(Command::Pick(Tower::Left)),
            KeyCode::Char('2') => Some(Command::Pick(Tower::Middle)),
            KeyCode::Char('3') => Some(Command::Pick(Tower::Right)),
            KeyCode::Char('+') | KeyCode::Char('=') => Some(Command::Grow),
            KeyCode::Char('-') => Some(Command::Shrink),
            _ => common_key(*key),
        },
        Event::Mouse(mouse) => left_click(*mouse),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::from(code))
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn test_arrows_and_letters_slide() {
        assert_eq!(fifteen_command(&key(KeyCode::Up)), Some(Command::Slide(Move::Up)));
        assert_eq!(
            fifteen_command(&key(KeyCode::Char('a'))),
            Some(Command::Slide(Move::Left))
        );
        assert_eq!(
            fifteen_command(&key(KeyCode::Char('j'))),
            Some(Command::Slide(Move::Down))
        );
    }

    #[test]
    fn test_quit_and_restart_keys() {
        assert_eq!(fifteen_command(&key(KeyCode::Esc)), Some(Command::Quit));
        assert_eq!(hanoi_command(&key(KeyCode::Char('q'))), Some(Command::Quit));
        assert_eq!(hanoi_command(&key(KeyCode::Char('r'))), Some(Command::Restart));

        let ctrl_c = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(fifteen_command(&ctrl_c), Some(Command::Quit));
    }

    #[test]
    fn test_release_events_are_ignored() {
        let mut release = KeyEvent::from(KeyCode::Up);
        release.kind = KeyEventKind::Release;
        assert_eq!(fifteen_command(&Event::Key(release)), None);
    }

    #[test]
    fn test_hanoi_number_keys_pick_towers() {
        assert_eq!(
            hanoi_command(&key(KeyCode::Char('3'))),
            Some(Command::Pick(Tower::Right))
        );
        assert_eq!(hanoi_command(&key(KeyCode::Char('+'))), Some(Command::Grow));
        assert_eq!(hanoi_command(&key(KeyCode::Char('-'))), Some(Command::Shrink));
        assert_eq!(hanoi_command(&key(KeyCode::Up)), None);
    }

    #[test]
    fn test_only_left_press_is_a_click() {
        assert_eq!(
            fifteen_command(&mouse(MouseEventKind::Down(MouseButton::Left), 4, 2)),
            Some(Command::Click { column: 4, row: 2 })
        );
        assert_eq!(
            fifteen_command(&mouse(MouseEventKind::Down(MouseButton::Right), 4, 2)),
            None
        );
        assert_eq!(hanoi_command(&mouse(MouseEventKind::Moved, 4, 2)), None);
    }

    #[test]
    fn test_unrelated_events_map_to_nothing() {
        assert_eq!(fifteen_command(&Event::Resize(80, 24)), None);
        assert_eq!(fifteen_command(&key(KeyCode::Char('x'))), None);
    }
}
