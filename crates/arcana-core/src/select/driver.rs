//! Selector input loop
//!
//! Runs a [`Selection`] against a terminal: draws the prompt and the list,
//! feeds keys, asks confirmations, and pushes the result to the repeat
//! buffer. Every exit path leaves the screen as it found it.

use crate::io::{Terminal, get_check};
use crate::world::{Options, RepeatBuffer};

use super::candidate::CandidateList;
use super::layout::ListStyle;
use super::state::{InputMode, Reaction, Selection};

/// Outcome of a selector invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selected {
    /// Index into the candidate list
    Chosen(usize),
    Cancelled,
    /// Nothing in the list may be chosen
    NoEligible,
}

/// Resolve a candidate list to one entry
pub fn select_candidate(
    term: &mut dyn Terminal,
    list: &CandidateList,
    style: &ListStyle,
    options: &Options,
    repeat: &mut RepeatBuffer,
) -> Selected {
    if !list.has_eligible() {
        return Selected::NoEligible;
    }

    if let Some(code) = repeat.pull() {
        if list.is_selectable(code) {
            tracing::debug!(index = code, "repeating last choice");
            repeat.push(code);
            return Selected::Chosen(code);
        }
        tracing::debug!(index = code, "remembered choice no longer valid");
    }

    let mode = if options.use_menu {
        InputMode::Menu
    } else {
        InputMode::Letter
    };
    let (mut sel, first) = Selection::start(mode, list.len(), options.always_show_list);

    let mut screen = ListScreen::default();
    screen.apply(term, first, &sel, list, style);

    let prompt = style.prompt(list);
    while !sel.phase().is_done() {
        term.put_line(0, 0, &prompt);
        let key = term.next_key();
        let mut reaction = sel.on_key(key, list);

        if let Reaction::Confirm(index) = reaction {
            let yes = get_check(term, &style.confirm(&list[index]));
            reaction = sel.on_confirm(yes);
        }
        screen.apply(term, reaction, &sel, list, style);
    }

    term.put_line(0, 0, "");
    screen.close(term);

    match sel.chosen() {
        Some(index) => {
            repeat.push(index);
            Selected::Chosen(index)
        }
        None => Selected::Cancelled,
    }
}

/// Tracks whether the screen under the list has been saved
#[derive(Debug, Default)]
struct ListScreen {
    saved: bool,
}

impl ListScreen {
    fn apply(
        &mut self,
        term: &mut dyn Terminal,
        reaction: Reaction,
        sel: &Selection,
        list: &CandidateList,
        style: &ListStyle,
    ) {
        let cursor = (sel.mode() == InputMode::Menu).then(|| sel.cursor());
        match reaction {
            Reaction::ShowList => {
                if !self.saved {
                    term.save_screen();
                    self.saved = true;
                }
                style.draw(term, list, cursor);
            }
            Reaction::RedrawList => style.draw(term, list, cursor),
            Reaction::HideList => self.close(term),
            Reaction::Bell => term.bell(),
            Reaction::Refuse(index) => {
                term.bell();
                term.message(&style.refusal(&list[index]));
            }
            Reaction::None | Reaction::Confirm(_) | Reaction::Finalize(_) | Reaction::Cancel => {}
        }
    }

    fn close(&mut self, term: &mut dyn Terminal) {
        if self.saved {
            term.restore_screen();
            self.saved = false;
        }
    }
}
