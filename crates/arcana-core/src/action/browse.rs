//! Browsing a book

use arcana_rng::RandomSource;

use super::{ActionResult, refuse};
use crate::io::{Terminal, wait_key};
use crate::magic::{SpellMode, Spellbook, book_candidates};
use crate::select::{CandidateSource, ListStyle, Selected, select_candidate};
use crate::state::GameState;
use crate::world::{Options, RepeatBuffer};

/// Rows holding the description of the browsed spell
const DESC_FIRST_ROW: u16 = 11;
const DESC_LAST_ROW: u16 = 14;
const DESC_COL: u16 = 15;
const DESC_WIDTH: usize = 60;

/// Break `text` into lines of at most `width` characters
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        if !line.is_empty() && line.len() + 1 + word.len() > width {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

/// Look through the spells of a book without using a turn
pub fn do_cmd_browse<R: RandomSource>(
    state: &mut GameState<R>,
    term: &mut dyn Terminal,
    book: Spellbook,
) -> ActionResult {
    let Some(magic) = state.actor.class.magic() else {
        return refuse(state, term, "You cannot read books!");
    };
    if !state.actor.can_see() {
        return refuse(state, term, "You cannot see!");
    }
    let (verb, noun) = ("browse", magic.kind.noun());
    let style = ListStyle::Spells { verb, noun };
    let list = book_candidates(&state.actor, state.catalog.as_ref(), book, SpellMode::Browse);

    term.save_screen();
    if !list.has_eligible() {
        style.draw(term, &list, None);
        state.say(term, format!("No {}s to browse.", noun));
        wait_key(term);
        term.restore_screen();
        return ActionResult::NoTime;
    }

    let options = Options {
        always_show_list: true,
        ..state.options.clone()
    };
    // Browsing is not repeatable
    let mut scratch = RepeatBuffer::new();
    while let Selected::Chosen(index) =
        select_candidate(term, &list, &style, &options, &mut scratch)
    {
        let CandidateSource::Spell { realm, spell } = list[index].source else {
            unreachable!("book lists only hold spells");
        };
        let text = state.catalog.description(&state.actor, realm, spell);
        let mut lines = wrap(&text, DESC_WIDTH).into_iter();
        term.put_line(DESC_FIRST_ROW, DESC_COL, &list[index].name);
        for row in DESC_FIRST_ROW + 1..=DESC_LAST_ROW {
            term.put_line(row, DESC_COL, &lines.next().unwrap_or_default());
        }
    }
    term.restore_screen();
    ActionResult::NoTime
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::magic::{Realm, RealmSlot};
    use crate::player::{Actor, Class, Race};
    use crate::testing::ScriptedTerminal;
    use arcana_rng::ScriptedRng;

    fn browser() -> GameState<ScriptedRng> {
        let mut actor = Actor::new("Reader", Class::Mage, Race::Human);
        actor.realm1 = Some(Realm::Sorcery);
        actor.set_level(5);
        actor.spells.learn(RealmSlot::Primary, 0);
        GameState::new(actor, ScriptedRng::default())
    }

    #[test]
    fn test_wrap() {
        assert_eq!(wrap("a bb ccc", 4), vec!["a bb", "ccc"]);
        assert!(wrap("", 10).is_empty());
    }

    #[test]
    fn test_browse_shows_description() {
        let mut state = browser();
        let mut term = ScriptedTerminal::new("a\x1b");
        let result = do_cmd_browse(&mut state, &mut term, Spellbook::new(Realm::Sorcery, 0));
        assert_eq!(result, ActionResult::NoTime);
        assert_eq!(term.lines_at(DESC_FIRST_ROW).first(), Some(&"Detect Monsters"));
        assert!(!term.lines_at(12).is_empty());
        assert_eq!(term.screen_depth(), 0);
        assert_eq!(state.energy_use, 0);
        // Browsing leaves the repeat buffer alone
        assert_eq!(state.repeat.last_command(), None);
    }

    #[test]
    fn test_nothing_to_browse() {
        let mut state = browser();
        let mut term = ScriptedTerminal::new("x");
        let result = do_cmd_browse(&mut state, &mut term, Spellbook::new(Realm::Sorcery, 2));
        assert_eq!(result, ActionResult::NoTime);
        assert_eq!(state.messages, vec!["No spells to browse."]);
        assert_eq!(term.keys_read(), 1);
        assert_eq!(term.screen_depth(), 0);
    }

    #[test]
    fn test_blind_cannot_browse() {
        let mut state = browser();
        state.actor.has_light = false;
        let mut term = ScriptedTerminal::new("a");
        assert!(matches!(
            do_cmd_browse(&mut state, &mut term, Spellbook::new(Realm::Sorcery, 0)),
            ActionResult::Refused(_)
        ));
    }
}
