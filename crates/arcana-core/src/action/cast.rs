//! Casting spells from a book

use arcana_rng::RandomSource;

use super::{ActionResult, finish, refuse};
use crate::io::Terminal;
use crate::magic::eligibility::book_usable;
use crate::magic::study::update_spell_memory;
use crate::magic::{
    EffectContext, Resolution, SpellCast, SpellMode, Spellbook, book_candidates, resolve_spell,
};
use crate::select::{CandidateSource, ListStyle, Selected, select_candidate};
use crate::state::GameState;
use crate::world::RepeatedCommand;

/// Cast a spell (or recite a prayer, or sing a song) from `book`
pub fn do_cmd_cast<R: RandomSource>(
    state: &mut GameState<R>,
    term: &mut dyn Terminal,
    book: Spellbook,
) -> ActionResult {
    state.repeat.begin(RepeatedCommand::Cast { book });
    state.energy_use = 0;

    let Some(magic) = state.actor.class.magic() else {
        return refuse(state, term, "You cannot cast spells!");
    };
    if state.actor.realm1.is_none() && !state.actor.class.is_hybrid() {
        return refuse(state, term, "You cannot cast spells!");
    }
    if !state.actor.can_see() {
        return refuse(state, term, "You cannot see!");
    }
    if state.actor.is_confused() {
        return refuse(state, term, "You are too confused!");
    }
    let (verb, noun) = (magic.kind.verb(), magic.kind.noun());
    if !book_usable(&state.actor, book) {
        return refuse(
            state,
            term,
            format!("You cannot {} from {}.", verb, book.title()),
        );
    }

    let list = book_candidates(&state.actor, state.catalog.as_ref(), book, SpellMode::Cast);
    let style = ListStyle::Spells { verb, noun };
    let index = match select_candidate(term, &list, &style, &state.options, &mut state.repeat) {
        Selected::Chosen(index) => index,
        Selected::Cancelled => return ActionResult::Cancelled,
        Selected::NoEligible => {
            state.say(term, format!("You don't know any {}s in that book.", noun));
            return ActionResult::NoCandidates;
        }
    };
    let CandidateSource::Spell { spell, .. } = list[index].source else {
        unreachable!("book lists only hold spells");
    };

    let mut shown = Vec::new();
    let resolution = {
        let GameState {
            actor,
            rng,
            options,
            catalog,
            ..
        } = &mut *state;
        let mut ctx = EffectContext {
            actor,
            rng,
            term: &mut *term,
            messages: &mut shown,
        };
        resolve_spell(&mut ctx, catalog.as_ref(), options, SpellCast { book, spell })
    };
    state.absorb(shown);

    let result = match resolution {
        Resolution::Aborted if !state.actor.is_dead => return ActionResult::NoTime,
        Resolution::Succeeded => ActionResult::Success,
        Resolution::Failed | Resolution::Aborted => ActionResult::Failed,
    };

    // Level changes from casting may open or close spell slots
    for msg in update_spell_memory(&mut state.actor, state.catalog.as_ref()) {
        state.say(term, msg);
    }
    finish(state, result)
}
