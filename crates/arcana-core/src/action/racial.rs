//! Using class, race and mutation powers

use arcana_rng::RandomSource;

use super::{ActionResult, finish, refuse};
use crate::io::{Terminal, get_check};
use crate::magic::formula::{racial_cost, roll_succeeds};
use crate::magic::{EffectContext, EffectStatus, commit_cost};
use crate::racial::{power_candidates, power_success, source_desc};
use crate::select::{ListStyle, Selected, select_candidate};
use crate::state::GameState;
use crate::world::RepeatedCommand;

/// Use an innate power.
///
/// The cost is paid after the attempt, whether it worked or not; what the
/// mana pool cannot cover comes out of hit points.
pub fn do_cmd_racial_power<R: RandomSource>(
    state: &mut GameState<R>,
    term: &mut dyn Terminal,
) -> ActionResult {
    state.repeat.begin(RepeatedCommand::RacialPower);
    state.energy_use = 0;

    if state.actor.is_confused() {
        return refuse(state, term, "You are too confused to use any powers!");
    }

    let list = power_candidates(&state.actor);
    if list.is_empty() {
        state.say(term, "You have no powers to activate.");
        return ActionResult::NoCandidates;
    }
    let style = ListStyle::Powers;
    let index = match select_candidate(term, &list, &style, &state.options, &mut state.repeat) {
        Selected::Chosen(index) => index,
        Selected::Cancelled => return ActionResult::Cancelled,
        Selected::NoEligible => {
            if let Some(lowest) = list.iter().min_by_key(|c| c.min_level) {
                state.say(term, style.refusal(lowest));
            }
            return ActionResult::NoCandidates;
        }
    };

    let source = list[index].source;
    let Some(desc) = source_desc(source, state.actor.level) else {
        unreachable!("power lists only hold powers");
    };

    let actor = &state.actor;
    if actor.mana < desc.cost
        && actor.hp < desc.cost - actor.mana
        && !get_check(term, "Really use the power in your weakened state? ")
    {
        return ActionResult::Cancelled;
    }

    let success = power_success(&state.actor, &desc);
    let draw = state.rng.randint0(100) as i32;
    tracing::debug!(power = desc.name, draw, success, "power roll");

    let result = if !roll_succeeds(draw, 100 - success) {
        state.say(term, "You've failed to concentrate hard enough.");
        ActionResult::Failed
    } else {
        let mut shown = Vec::new();
        let status = {
            let GameState {
                actor, rng, powers, ..
            } = &mut *state;
            let mut ctx = EffectContext {
                actor,
                rng,
                term: &mut *term,
                messages: &mut shown,
            };
            powers.activate(&mut ctx, source)
        };
        state.absorb(shown);
        if status == EffectStatus::Cancelled {
            return ActionResult::NoTime;
        }
        ActionResult::Success
    };

    if desc.cost > 0 {
        let cost = racial_cost(desc.cost, &mut state.rng);
        tracing::debug!(power = desc.name, cost, "power cost");
        commit_cost(&mut state.actor, cost, "concentrating too hard");
    }
    finish(state, result)
}
