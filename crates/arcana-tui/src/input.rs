//! Input handling - convert key events to engine keys and commands

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use arcana_core::io::Key;

/// Top-level commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Cast a spell from a book
    Cast,
    /// Use a racial or mutation power
    RacialPower,
    /// Learn a spell from a book
    Study,
    /// Read spell descriptions
    Browse,
    /// Repeat the last cast, study or power
    Repeat,
    /// Rest until recovered
    Rest,
    /// Show the message history
    History,
    Save,
    Quit,
}

/// Convert a crossterm key event to an engine key
pub fn key_from_event(key: KeyEvent) -> Option<Key> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            // Ctrl+[ is Escape on most terminals
            KeyCode::Char('[') => Some(Key::Escape),
            KeyCode::Char('p') => Some(Key::Char('\u{10}')),
            _ => None,
        };
    }
    match key.code {
        KeyCode::Char(c) => Some(Key::Char(c)),
        KeyCode::Enter => Some(Key::Enter),
        KeyCode::Esc => Some(Key::Escape),
        KeyCode::Up => Some(Key::Up),
        KeyCode::Down => Some(Key::Down),
        KeyCode::Left => Some(Key::Left),
        KeyCode::Right => Some(Key::Right),
        _ => None,
    }
}

/// Map a key to a command.
///
/// Bindings follow the roguelike keyset: `m` cast, `U` use a power,
/// `G` gain a spell, `b` browse, `n` repeat.
pub fn command_for(key: Key) -> Option<Command> {
    match key {
        Key::Char('m') => Some(Command::Cast),
        Key::Char('U') => Some(Command::RacialPower),
        Key::Char('G') => Some(Command::Study),
        Key::Char('b') | Key::Char('P') => Some(Command::Browse),
        Key::Char('n') => Some(Command::Repeat),
        Key::Char('R') => Some(Command::Rest),
        Key::Char('\u{10}') => Some(Command::History), // Ctrl+P
        Key::Char('S') => Some(Command::Save),
        Key::Char('Q') | Key::Char('q') => Some(Command::Quit),
        _ => None,
    }
}
