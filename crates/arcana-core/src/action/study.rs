//! Studying spells from a book

use arcana_rng::RandomSource;

use super::{ActionResult, finish, refuse};
use crate::io::{Terminal, get_check};
use crate::magic::study::{
    change_secondary_realm, fully_studied, learn_spell, random_prayer, restudy_spell,
    reward_study, update_spell_memory,
};
use crate::magic::{RealmSlot, SpellMode, Spellbook, book_candidates};
use crate::player::SpellKind;
use crate::select::{CandidateSource, ListStyle, Selected, select_candidate};
use crate::state::GameState;
use crate::world::RepeatedCommand;

/// Learn a new spell from `book`, or deepen one already known
pub fn do_cmd_study<R: RandomSource>(
    state: &mut GameState<R>,
    term: &mut dyn Terminal,
    book: Spellbook,
) -> ActionResult {
    state.repeat.begin(RepeatedCommand::Study { book });
    state.energy_use = 0;

    let (Some(magic), Some(realm1)) = (state.actor.class.magic(), state.actor.realm1) else {
        return refuse(state, term, "You cannot read books!");
    };
    if !state.actor.can_see() {
        return refuse(state, term, "You cannot see!");
    }
    if state.actor.is_confused() {
        return refuse(state, term, "You are too confused!");
    }
    let noun = magic.kind.noun();
    if state.actor.new_spells <= 0 {
        return refuse(state, term, format!("You cannot learn any new {}s!", noun));
    }

    let slot = match state.actor.slot_of(book.realm) {
        Some(slot) => slot,
        None if state.actor.class.allows_realm2(realm1, book.realm) => {
            if !get_check(term, "Really, change magic realm? ") {
                return ActionResult::Cancelled;
            }
            change_secondary_realm(&mut state.actor, book.realm);
            state.say(term, format!("You begin to study the {} realm.", book.realm));
            RealmSlot::Secondary
        }
        None => return refuse(state, term, "You cannot learn from that book."),
    };

    let spell = if magic.kind == SpellKind::Prayer {
        random_prayer(
            &state.actor,
            state.catalog.as_ref(),
            book,
            &mut state.rng,
        )
    } else {
        let list = book_candidates(&state.actor, state.catalog.as_ref(), book, SpellMode::Study);
        let style = ListStyle::Spells {
            verb: "study",
            noun,
        };
        match select_candidate(term, &list, &style, &state.options, &mut state.repeat) {
            Selected::Chosen(index) => match list[index].source {
                CandidateSource::Spell { spell, .. } => Some(spell),
                _ => unreachable!("book lists only hold spells"),
            },
            Selected::Cancelled => return ActionResult::Cancelled,
            Selected::NoEligible => None,
        }
    };
    let Some(spell) = spell else {
        state.say(term, format!("You cannot learn any {}s in that book.", noun));
        return ActionResult::NoCandidates;
    };

    let name = state.catalog.name(book.realm, spell);
    if state.actor.spells.slot(slot).learned.contains(spell) {
        if fully_studied(&state.actor, slot, spell) {
            state.say(
                term,
                format!("You don't need to study this {} anymore.", noun),
            );
            return ActionResult::NoTime;
        }
        let prompt = format!(
            "You will study a {} of {} again. Are you sure? ",
            noun, name
        );
        if !get_check(term, &prompt) {
            return ActionResult::Cancelled;
        }
        let rank = restudy_spell(&mut state.actor, slot, spell);
        state.say(
            term,
            format!("Your proficiency of {} is now {} rank.", name, rank.label()),
        );
    } else {
        learn_spell(&mut state.actor, slot, spell);
        state.say(term, format!("You have learned the {} of {}.", noun, name));
    }

    reward_study(&mut state.actor);
    for msg in update_spell_memory(&mut state.actor, state.catalog.as_ref()) {
        state.say(term, msg);
    }
    finish(state, ActionResult::Success)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::magic::Realm;
    use crate::player::{Actor, Class, Race, Stat, Virtue};
    use crate::testing::ScriptedTerminal;
    use arcana_rng::ScriptedRng;

    fn student(class: Class, realm1: Realm) -> GameState<ScriptedRng> {
        let mut actor = Actor::new("Student", class, Race::Human);
        actor.stats.set(Stat::Intelligence, 18);
        actor.stats.set(Stat::Wisdom, 18);
        actor.realm1 = Some(realm1);
        actor.set_level(5);
        let mut state = GameState::new(actor, ScriptedRng::default());
        update_spell_memory(&mut state.actor, state.catalog.as_ref());
        state
    }

    #[test]
    fn test_learn_picked_spell() {
        let mut state = student(Class::Mage, Realm::Sorcery);
        assert!(state.actor.new_spells > 0);
        let before = state.actor.new_spells;
        let mut term = ScriptedTerminal::new("b");
        let result = do_cmd_study(&mut state, &mut term, Spellbook::new(Realm::Sorcery, 0));
        assert_eq!(result, ActionResult::Success);
        assert!(state.actor.spells.primary.learned.contains(1));
        assert!(
            state
                .messages
                .contains(&"You have learned the spell of Phase Door.".to_string())
        );
        assert_eq!(state.actor.new_spells, before - 1);
        assert_eq!(state.actor.virtues.get(Virtue::Knowledge), 1);
        assert_eq!(state.energy_use, 100);
    }

    #[test]
    fn test_no_new_spells() {
        let mut state = student(Class::Mage, Realm::Sorcery);
        state.actor.new_spells = 0;
        let mut term = ScriptedTerminal::new("a");
        let result = do_cmd_study(&mut state, &mut term, Spellbook::new(Realm::Sorcery, 0));
        assert_eq!(
            result,
            ActionResult::Refused("You cannot learn any new spells!".into())
        );
    }

    #[test]
    fn test_warrior_cannot_read() {
        let mut state = GameState::new(
            Actor::new("Conan", Class::Warrior, Race::Human),
            ScriptedRng::default(),
        );
        let mut term = ScriptedTerminal::new("a");
        let result = do_cmd_study(&mut state, &mut term, Spellbook::new(Realm::Sorcery, 0));
        assert_eq!(result, ActionResult::Refused("You cannot read books!".into()));
    }

    #[test]
    fn test_priest_learns_at_random() {
        let mut state = student(Class::Priest, Realm::Life);
        // Three prayers in reach at level 5: keep the first, pass on the rest
        for draw in [0, 1, 1] {
            state.rng.push(draw);
        }
        let mut term = ScriptedTerminal::new("");
        let result = do_cmd_study(&mut state, &mut term, Spellbook::new(Realm::Life, 0));
        assert_eq!(result, ActionResult::Success);
        assert!(state.actor.spells.primary.learned.contains(0));
        assert_eq!(term.keys_read(), 0);
        assert_eq!(state.actor.virtues.get(Virtue::Faith), 1);
    }

    #[test]
    fn test_mage_studying_nature_book_gains_knowledge() {
        let mut state = student(Class::Mage, Realm::Sorcery);
        state.actor.realm2 = Some(Realm::Nature);
        update_spell_memory(&mut state.actor, state.catalog.as_ref());
        let mut term = ScriptedTerminal::new("a");
        let result = do_cmd_study(&mut state, &mut term, Spellbook::new(Realm::Nature, 0));
        assert_eq!(result, ActionResult::Success);
        assert!(state.actor.spells.secondary.learned.contains(0));
        assert_eq!(state.actor.virtues.get(Virtue::Knowledge), 1);
        assert_eq!(state.actor.virtues.get(Virtue::Nature), 0);
    }

    #[test]
    fn test_restudy_asks_first() {
        let mut state = student(Class::Mage, Realm::Sorcery);
        state.actor.spells.learn(RealmSlot::Primary, 0);
        update_spell_memory(&mut state.actor, state.catalog.as_ref());
        let mut term = ScriptedTerminal::new("ay");
        let result = do_cmd_study(&mut state, &mut term, Spellbook::new(Realm::Sorcery, 0));
        assert_eq!(result, ActionResult::Success);
        assert_eq!(term.prompts_containing("again. Are you sure?"), 1);
        assert_eq!(state.actor.spells.restudied, 1);
        assert!(
            state
                .messages
                .contains(&"Your proficiency of Detect Monsters is now beginner rank.".to_string())
        );
    }

    #[test]
    fn test_realm_change_needs_confirmation() {
        let mut state = student(Class::Mage, Realm::Sorcery);
        state.actor.realm2 = Some(Realm::Chaos);
        update_spell_memory(&mut state.actor, state.catalog.as_ref());
        let book = Spellbook::new(Realm::Death, 0);

        let mut term = ScriptedTerminal::new("n");
        assert_eq!(do_cmd_study(&mut state, &mut term, book), ActionResult::Cancelled);
        assert_eq!(state.actor.realm2, Some(Realm::Chaos));

        let mut term = ScriptedTerminal::new("ya");
        assert_eq!(do_cmd_study(&mut state, &mut term, book), ActionResult::Success);
        assert_eq!(state.actor.realm2, Some(Realm::Death));
        assert_eq!(state.actor.old_realms, vec![Realm::Chaos]);
        assert!(state.actor.spells.secondary.learned.contains(0));
    }

    #[test]
    fn test_disallowed_realm_refused() {
        let mut state = student(Class::Mage, Realm::Sorcery);
        let mut term = ScriptedTerminal::new("y");
        let result = do_cmd_study(&mut state, &mut term, Spellbook::new(Realm::Music, 0));
        assert!(matches!(result, ActionResult::Refused(_)));
        assert_eq!(term.keys_read(), 0);
    }
}
