//! Puts the terminal back on every exit path

use std::io;

use crossterm::cursor::Show;
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};

type Restore = Box<dyn FnOnce() -> io::Result<()>>;

/// Runs its restore action once, when dropped
pub struct TerminalGuard {
    restore: Option<Restore>,
}

impl TerminalGuard {
    /// Switch stdout to raw mode and the alternate screen. Raw mode is
    /// undone even if entering the alternate screen fails.
    pub fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        let guard = Self::on_drop(restore_stdout);
        execute!(io::stdout(), EnterAlternateScreen)?;
        Ok(guard)
    }

    pub fn on_drop(restore: impl FnOnce() -> io::Result<()> + 'static) -> Self {
        Self {
            restore: Some(Box::new(restore)),
        }
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Some(restore) = self.restore.take()
            && let Err(err) = restore()
        {
            tracing::warn!(%err, "terminal restore failed");
        }
    }
}

fn restore_stdout() -> io::Result<()> {
    let raw = disable_raw_mode();
    let screen = execute!(io::stdout(), LeaveAlternateScreen, Show);
    raw.and(screen)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn counting_guard(count: &Rc<Cell<u32>>) -> TerminalGuard {
        let count = Rc::clone(count);
        TerminalGuard::on_drop(move || {
            count.set(count.get() + 1);
            Ok(())
        })
    }

    #[test]
    fn test_restores_once_on_drop() {
        let count = Rc::new(Cell::new(0));
        let guard = counting_guard(&count);
        assert_eq!(count.get(), 0);
        drop(guard);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_restores_when_later_setup_fails() {
        fn setup(count: &Rc<Cell<u32>>) -> io::Result<()> {
            let _guard = counting_guard(count);
            Err(io::Error::other("no terminal"))
        }
        let count = Rc::new(Cell::new(0));
        assert!(setup(&count).is_err());
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_failed_restore_does_not_panic() {
        let guard = TerminalGuard::on_drop(|| Err(io::Error::other("gone")));
        drop(guard);
    }
}
