//! arcana-tui: Terminal front end using ratatui
//!
//! Wraps a ratatui terminal in the engine's input and renderer traits and
//! maps keys to the cast, study, browse and power commands.

pub mod app;
pub mod error;
pub mod guard;
pub mod input;
pub mod screen;
pub mod term;

pub use app::App;
pub use error::CliError;
pub use guard::TerminalGuard;
pub use input::{Command, command_for};
pub use term::TuiTerminal;
