//! Key mapping from terminal events to paddle directions.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::types::{Direction, Side, AXIS_RAW_CENTER, AXIS_RAW_MAX, AXIS_RAW_MIN};

/// Map keyboard input to a paddle and direction.
///
/// Left paddle: `w`/`s`. Right paddle: arrow keys or `k`/`j`.
pub fn map_key(key: KeyEvent) -> Option<(Side, Direction)> {
    match key.code {
        KeyCode::Char('w') | KeyCode::Char('W') => Some((Side::Left, Direction::Up)),
        KeyCode::Char('s') | KeyCode::Char('S') => Some((Side::Left, Direction::Down)),

        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('K') => Some((Side::Right, Direction::Up)),
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') => {
            Some((Side::Right, Direction::Down))
        }

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// Raw axis value a held key stands for.
pub fn raw_sample(direction: Direction) -> i32 {
    match direction {
        Direction::Up => AXIS_RAW_MIN,
        Direction::Neutral => AXIS_RAW_CENTER,
        Direction::Down => AXIS_RAW_MAX,
    }
}
