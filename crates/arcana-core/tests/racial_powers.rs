//! Racial and mutation powers through the command API

use arcana_core::ActionResult;
use arcana_core::GameState;
use arcana_core::action::do_cmd_racial_power;
use arcana_core::player::{Actor, Class, Mutations, Race, Stat};
use arcana_core::racial::{power_candidates, power_success, source_desc};
use arcana_core::testing::ScriptedTerminal;
use arcana_rng::ScriptedRng;

fn ranger() -> Actor {
    let mut actor = Actor::new("Strider", Class::Ranger, Race::Human);
    actor.stats.set(Stat::Intelligence, 18 + 100);
    actor.set_level(15);
    actor.hp = 50;
    actor.hp_max = 50;
    actor
}

#[test]
fn drawn_cost_over_pool_comes_from_health() {
    // Probe Monster: base cost 20, drawn 10 + 5 = 15 against a pool of 10
    let mut actor = ranger();
    actor.mana = 10;
    let mut state = GameState::new(actor, ScriptedRng::new([99, 4]));
    let mut term = ScriptedTerminal::new("a");

    assert_eq!(do_cmd_racial_power(&mut state, &mut term), ActionResult::Success);
    assert_eq!(state.actor.mana, 0);
    assert_eq!(state.actor.hp, 45);
    assert_eq!(state.actor.died_from, None);
}

#[test]
fn roll_is_against_the_failure_percentage() {
    let actor = ranger();
    let list = power_candidates(&actor);
    let desc = source_desc(list[0].source, actor.level).unwrap();
    let fail = 100 - power_success(&actor, &desc);
    assert_eq!(list[0].fail, fail);
    assert!(fail > 0);

    let mut state = GameState::new(actor.clone(), ScriptedRng::new([fail as u32 - 1]));
    let mut term = ScriptedTerminal::new("a");
    assert_eq!(do_cmd_racial_power(&mut state, &mut term), ActionResult::Failed);

    let mut state = GameState::new(actor, ScriptedRng::new([fail as u32]));
    let mut term = ScriptedTerminal::new("a");
    assert_eq!(do_cmd_racial_power(&mut state, &mut term), ActionResult::Success);
}

#[test]
fn mutation_powers_follow_innate_ones() {
    let mut actor = Actor::new("Grom", Class::Berserker, Race::HalfTroll);
    actor.set_level(9);
    actor.mutations = Mutations::BLINK | Mutations::SPIT_ACID;
    let names: Vec<_> = power_candidates(&actor)
        .iter()
        .map(|c| c.name.clone())
        .collect();
    assert_eq!(names, ["Recall", "Berserk", "Spit Acid", "Blink"]);
}

#[test]
fn deadly_concentration() {
    let mut actor = ranger();
    actor.mana = 0;
    actor.hp = 5;
    let mut state = GameState::new(actor, ScriptedRng::new([99, 9]));
    let mut term = ScriptedTerminal::new("ay");
    let result = do_cmd_racial_power(&mut state, &mut term);
    assert_eq!(
        result,
        ActionResult::Died("concentrating too hard".into())
    );
}
