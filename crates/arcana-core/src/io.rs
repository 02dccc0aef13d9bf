//! Terminal seams
//!
//! The engine never touches a real terminal. It reads keys through
//! [`InputProvider`] and draws through [`Renderer`]; the TUI crate and the
//! test double in [`crate::testing`] implement both.

use serde::{Deserialize, Serialize};

/// A key press as seen by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Char(char),
    Enter,
    /// Reserved: always cancels
    Escape,
    Up,
    Down,
    Left,
    Right,
}

impl From<char> for Key {
    fn from(c: char) -> Self {
        match c {
            '\r' | '\n' => Key::Enter,
            '\x1b' => Key::Escape,
            c => Key::Char(c),
        }
    }
}

/// Source of key presses
pub trait InputProvider {
    /// Block until the next key press
    fn next_key(&mut self) -> Key;

    /// Discard pending typeahead
    fn flush_input(&mut self) {}
}

/// Line-oriented screen
pub trait Renderer {
    /// Write `text` at (row, col), clearing the rest of the line
    fn put_line(&mut self, row: u16, col: u16, text: &str);

    /// Push a copy of the screen
    fn save_screen(&mut self);

    /// Pop the last saved screen
    fn restore_screen(&mut self);

    fn bell(&mut self);

    /// Show a game message
    fn message(&mut self, text: &str);
}

/// Both halves of a terminal
pub trait Terminal: InputProvider + Renderer {}

impl<T: InputProvider + Renderer + ?Sized> Terminal for T {}

/// Ask a yes/no question. Only `y` or `Y` answers yes.
pub fn get_check(term: &mut dyn Terminal, prompt: &str) -> bool {
    term.put_line(0, 0, &format!("{}[y/n] ", prompt));
    let key = term.next_key();
    term.put_line(0, 0, "");
    matches!(key, Key::Char('y') | Key::Char('Y'))
}

/// Wait for any key
pub fn wait_key(term: &mut dyn Terminal) -> Key {
    term.next_key()
}

/// Aiming direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
    /// At the current target
    Target,
}

impl Direction {
    /// Direction for a keypad digit
    pub const fn from_keypad(c: char) -> Option<Self> {
        match c {
            '8' | 'k' => Some(Direction::North),
            '2' | 'j' => Some(Direction::South),
            '6' | 'l' => Some(Direction::East),
            '4' | 'h' => Some(Direction::West),
            '9' | 'u' => Some(Direction::NorthEast),
            '7' | 'y' => Some(Direction::NorthWest),
            '3' | 'n' => Some(Direction::SouthEast),
            '1' | 'b' => Some(Direction::SouthWest),
            '*' | '\'' | 't' | '5' => Some(Direction::Target),
            _ => None,
        }
    }

    pub const fn name(&self) -> &'static str {
        match self {
            Direction::North => "north",
            Direction::South => "south",
            Direction::East => "east",
            Direction::West => "west",
            Direction::NorthEast => "northeast",
            Direction::NorthWest => "northwest",
            Direction::SouthEast => "southeast",
            Direction::SouthWest => "southwest",
            Direction::Target => "the target",
        }
    }
}

/// Ask for an aiming direction. Escape cancels.
pub fn get_aim_dir(term: &mut dyn Terminal) -> Option<Direction> {
    loop {
        term.put_line(0, 0, "Direction ('*' to target, Escape to cancel)? ");
        let dir = match term.next_key() {
            Key::Escape => None,
            Key::Up => Some(Direction::North),
            Key::Down => Some(Direction::South),
            Key::Left => Some(Direction::West),
            Key::Right => Some(Direction::East),
            Key::Char(c) => match Direction::from_keypad(c) {
                Some(dir) => Some(dir),
                None => {
                    term.bell();
                    continue;
                }
            },
            Key::Enter => {
                term.bell();
                continue;
            }
        };
        term.put_line(0, 0, "");
        return dir;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedTerminal;

    #[test]
    fn test_key_from_char() {
        assert_eq!(Key::from('\r'), Key::Enter);
        assert_eq!(Key::from('\x1b'), Key::Escape);
        assert_eq!(Key::from('a'), Key::Char('a'));
    }

    #[test]
    fn test_get_check() {
        let mut term = ScriptedTerminal::new("yn");
        assert!(get_check(&mut term, "Really? "));
        assert!(!get_check(&mut term, "Really? "));
        // Escape when the script runs out
        assert!(!get_check(&mut term, "Really? "));
        assert_eq!(term.prompts_containing("Really?"), 3);
    }

    #[test]
    fn test_get_aim_dir() {
        let mut term = ScriptedTerminal::new("x6");
        assert_eq!(get_aim_dir(&mut term), Some(Direction::East));
        assert_eq!(term.bells(), 1);

        let mut term = ScriptedTerminal::new("");
        assert_eq!(get_aim_dir(&mut term), None);
    }
}
