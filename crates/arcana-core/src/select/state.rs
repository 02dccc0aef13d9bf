//! Selection state machine
//!
//! Transitions are pure: [`Selection::on_key`] looks at a key and the list
//! and says what the caller should do next. All drawing and prompting is
//! left to the driver.

use crate::consts::MENU_COLUMN_ROWS;
use crate::io::Key;

use super::candidate::{CandidateList, index_for_letter};

/// How the player picks an entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Type the entry's letter
    Letter,
    /// Move a cursor and press select
    Menu,
}

/// Where the selection stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Prompting with the list hidden
    Idle,
    /// Prompting with the list on screen
    Listing,
    /// Waiting for a yes/no on `index`
    AwaitingConfirm { index: usize },
    Finalized { index: usize },
    Cancelled,
}

impl Phase {
    pub const fn is_done(self) -> bool {
        matches!(self, Phase::Finalized { .. } | Phase::Cancelled)
    }
}

/// What the driver has to do after a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reaction {
    None,
    Bell,
    ShowList,
    HideList,
    /// Redraw the list, usually because the cursor moved
    RedrawList,
    /// Ask the player to confirm `index`
    Confirm(usize),
    /// `index` exists but may not be chosen
    Refuse(usize),
    Finalize(usize),
    Cancel,
}

/// Ephemeral state of one selector invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    mode: InputMode,
    count: usize,
    cursor: usize,
    list_shown: bool,
    phase: Phase,
}

impl Selection {
    /// Enter the selector for a list of `count` entries.
    ///
    /// Menu mode always shows the list; letter mode shows it only when
    /// asked to.
    pub fn start(mode: InputMode, count: usize, show_list: bool) -> (Self, Reaction) {
        assert!(count > 0, "selector entered with an empty list");
        let mut sel = Self {
            mode,
            count,
            cursor: 0,
            list_shown: false,
            phase: Phase::Idle,
        };
        let reaction = if mode == InputMode::Menu || show_list {
            sel.list_shown = true;
            sel.phase = Phase::Listing;
            Reaction::ShowList
        } else {
            Reaction::None
        };
        (sel, reaction)
    }

    pub fn mode(&self) -> InputMode {
        self.mode
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Cursor position, always within `0..count`
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn list_shown(&self) -> bool {
        self.list_shown
    }

    /// Chosen index once finalized
    pub fn chosen(&self) -> Option<usize> {
        match self.phase {
            Phase::Finalized { index } => Some(index),
            _ => None,
        }
    }

    /// Feed one key press
    pub fn on_key(&mut self, key: Key, list: &CandidateList) -> Reaction {
        debug_assert_eq!(list.len(), self.count);
        if self.phase.is_done() || matches!(self.phase, Phase::AwaitingConfirm { .. }) {
            return Reaction::None;
        }
        match self.mode {
            InputMode::Letter => self.on_letter_key(key, list),
            InputMode::Menu => self.on_menu_key(key, list),
        }
    }

    /// Answer a pending confirmation
    pub fn on_confirm(&mut self, yes: bool) -> Reaction {
        let Phase::AwaitingConfirm { index } = self.phase else {
            return Reaction::None;
        };
        if yes {
            self.phase = Phase::Finalized { index };
            Reaction::Finalize(index)
        } else {
            self.phase = self.prompting_phase();
            Reaction::None
        }
    }

    fn prompting_phase(&self) -> Phase {
        if self.list_shown {
            Phase::Listing
        } else {
            Phase::Idle
        }
    }

    fn cancel(&mut self) -> Reaction {
        self.phase = Phase::Cancelled;
        Reaction::Cancel
    }

    fn toggle_list(&mut self) -> Reaction {
        self.list_shown = !self.list_shown;
        self.phase = self.prompting_phase();
        if self.list_shown {
            Reaction::ShowList
        } else {
            Reaction::HideList
        }
    }

    fn choose(&mut self, index: usize, ask: bool, list: &CandidateList) -> Reaction {
        if index >= self.count {
            return Reaction::Bell;
        }
        if !list[index].eligible {
            return Reaction::Refuse(index);
        }
        if ask {
            self.phase = Phase::AwaitingConfirm { index };
            Reaction::Confirm(index)
        } else {
            self.phase = Phase::Finalized { index };
            Reaction::Finalize(index)
        }
    }

    fn on_letter_key(&mut self, key: Key, list: &CandidateList) -> Reaction {
        match key {
            Key::Escape => self.cancel(),
            Key::Char(' ' | '*' | '?') => self.toggle_list(),
            Key::Enter if self.count == 1 => self.choose(0, false, list),
            Key::Char(c) if c.is_ascii_uppercase() => {
                match index_for_letter(c.to_ascii_lowercase()) {
                    Some(index) => self.choose(index, true, list),
                    None => Reaction::Bell,
                }
            }
            Key::Char(c) => match index_for_letter(c) {
                Some(index) => self.choose(index, false, list),
                None => Reaction::Bell,
            },
            _ => Reaction::Bell,
        }
    }

    fn on_menu_key(&mut self, key: Key, list: &CandidateList) -> Reaction {
        match key {
            Key::Escape | Key::Char('0') => self.cancel(),
            Key::Up | Key::Char('8' | 'k' | 'K') => {
                self.cursor = (self.cursor + self.count - 1) % self.count;
                Reaction::RedrawList
            }
            Key::Down | Key::Char('2' | 'j' | 'J') => {
                self.cursor = (self.cursor + 1) % self.count;
                Reaction::RedrawList
            }
            Key::Left | Key::Right | Key::Char('4' | '6' | 'h' | 'l' | 'H' | 'L') => {
                if self.cursor >= MENU_COLUMN_ROWS {
                    self.cursor -= MENU_COLUMN_ROWS;
                } else if self.cursor + MENU_COLUMN_ROWS < self.count {
                    self.cursor += MENU_COLUMN_ROWS;
                }
                Reaction::RedrawList
            }
            Key::Enter | Key::Char('x' | 'X') => self.choose(self.cursor, false, list),
            Key::Char(' ' | '*' | '?') => Reaction::RedrawList,
            _ => Reaction::Bell,
        }
    }
}
