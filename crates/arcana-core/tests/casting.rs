//! Casting through the public command API: costs, rolls and overexertion

use arcana_core::ActionResult;
use arcana_core::GameState;
use arcana_core::magic::eligibility::{spell_chance, spell_need_mana};
use arcana_core::magic::{Realm, RealmSlot, Spellbook, StandardCatalog};
use arcana_core::action::do_cmd_cast;
use arcana_core::player::{Actor, Class, Race, Stat, Timed};
use arcana_core::testing::ScriptedTerminal;
use arcana_rng::ScriptedRng;

// ============================================================================
// Helpers
// ============================================================================

const BOOK: Spellbook = Spellbook::new(Realm::Sorcery, 0);

fn test_mage() -> Actor {
    let mut actor = Actor::new("Ged", Class::Mage, Race::Human);
    actor.stats.set(Stat::Intelligence, 18);
    actor.realm1 = Some(Realm::Sorcery);
    actor.set_level(10);
    actor.hp = 40;
    actor.hp_max = 40;
    actor.mana = 20;
    actor.spells.learn(RealmSlot::Primary, 0);
    actor
}

fn need_and_chance(actor: &Actor) -> (i32, i32) {
    let catalog = StandardCatalog::new();
    (
        spell_need_mana(actor, &catalog, Realm::Sorcery, 0),
        spell_chance(actor, &catalog, Realm::Sorcery, 0),
    )
}

fn state_with(actor: Actor, draws: &[u32]) -> GameState<ScriptedRng> {
    GameState::new(actor, ScriptedRng::new(draws.iter().copied()).with_fallback(99))
}

// ============================================================================
// Rolls
// ============================================================================

#[test]
fn draw_below_chance_fails() {
    let actor = test_mage();
    let (_, chance) = need_and_chance(&actor);
    assert!(chance > 0);
    let mut state = state_with(actor, &[chance as u32 - 1]);
    let mut term = ScriptedTerminal::new("a");
    assert_eq!(do_cmd_cast(&mut state, &mut term, BOOK), ActionResult::Failed);
}

#[test]
fn draw_at_chance_succeeds() {
    let actor = test_mage();
    let (_, chance) = need_and_chance(&actor);
    let mut state = state_with(actor, &[chance as u32]);
    let mut term = ScriptedTerminal::new("a");
    assert_eq!(do_cmd_cast(&mut state, &mut term, BOOK), ActionResult::Success);
    assert!(state.actor.spells.primary.worked.contains(0));
}

// ============================================================================
// Costs
// ============================================================================

#[test]
fn enough_mana_never_overexerts() {
    let actor = test_mage();
    let (need, _) = need_and_chance(&actor);
    let mut state = state_with(actor, &[]);
    let mut term = ScriptedTerminal::new("a");
    do_cmd_cast(&mut state, &mut term, BOOK);
    assert_eq!(state.actor.mana, 20 - need);
    assert_eq!(state.actor.hp, 40);
    assert!(!state.actor.timed.is_active(Timed::Paralyzed));
}

#[test]
fn short_mana_without_option_is_blocked() {
    let mut actor = test_mage();
    actor.mana = 0;
    let mut state = state_with(actor, &[]);
    let mut term = ScriptedTerminal::new("a");
    assert_eq!(do_cmd_cast(&mut state, &mut term, BOOK), ActionResult::NoTime);
    assert_eq!(state.actor.hp, 40);
    assert_eq!(state.turns, 0);
    assert_eq!(term.prompts_containing("Attempt it anyway?"), 0);
}

#[test]
fn overexertion_pays_the_deficit_in_health() {
    let mut actor = test_mage();
    actor.mana = 1;
    let (need, _) = need_and_chance(&actor);
    assert!(need > 1);
    let mut state = state_with(actor, &[]);
    state.options.over_exert = true;
    let mut term = ScriptedTerminal::new("ay");

    let result = do_cmd_cast(&mut state, &mut term, BOOK);
    assert!(result.takes_turn());
    assert_eq!(state.actor.mana, 0);
    assert_eq!(state.actor.hp, 40 - (need - 1));
    assert!(state.actor.timed.is_active(Timed::Paralyzed));
    assert!(
        state
            .messages
            .contains(&"You faint from the effort!".to_string())
    );
}

#[test]
fn declining_overexertion_costs_nothing() {
    let mut actor = test_mage();
    actor.mana = 1;
    let mut state = state_with(actor, &[]);
    state.options.over_exert = true;
    let mut term = ScriptedTerminal::new("an");
    assert_eq!(do_cmd_cast(&mut state, &mut term, BOOK), ActionResult::NoTime);
    assert_eq!(state.actor.mana, 1);
    assert_eq!(state.actor.hp, 40);
}

// ============================================================================
// Death
// ============================================================================

#[test]
fn fatal_overexertion_reports_death() {
    let mut actor = test_mage();
    actor.mana = 0;
    actor.hp = 0;
    let mut state = state_with(actor, &[]);
    state.options.over_exert = true;
    let mut term = ScriptedTerminal::new("ay");
    let result = do_cmd_cast(&mut state, &mut term, BOOK);
    assert_eq!(result, ActionResult::Died("overexertion".into()));
    assert!(state.actor.is_dead);
}

#[test]
fn fatal_overexertion_before_an_aimed_spell() {
    let mut actor = test_mage();
    actor.realm1 = Some(Realm::Chaos);
    actor.spells = Default::default();
    actor.spells.learn(RealmSlot::Primary, 0);
    actor.mana = 0;
    actor.hp = 0;
    let mut state = state_with(actor, &[99]);
    state.options.over_exert = true;
    // Escape would cancel the aim prompt if it ever came up
    let mut term = ScriptedTerminal::new("ay\x1b");
    let result = do_cmd_cast(&mut state, &mut term, Spellbook::new(Realm::Chaos, 0));
    assert_eq!(result, ActionResult::Died("overexertion".into()));
    assert!(state.actor.is_dead);
    assert_eq!(state.turns, 1);
    assert_eq!(term.pending_keys(), 1);
}
