//! Spell resolution
//!
//! Once a spell has been chosen: check and commit its cost, roll for
//! success, run the effect or the failure side effects, and settle
//! experience, virtues and proficiency.

use arcana_rng::RandomSource;

use super::catalog::{EffectContext, EffectStatus, SpellCatalog};
use super::eligibility::{spell_chance, spell_need_mana};
use super::formula::roll_succeeds;
use super::{Realm, RealmSlot, Spellbook};
use crate::consts::{
    SPELL_EXP_BEGINNER, SPELL_EXP_EXPERT, SPELL_EXP_MASTER, SPELL_EXP_SKILLED, SPELLS_PER_REALM,
};
use crate::io::get_check;
use crate::player::{Actor, MagicFlags, SpellKind, Stat, Timed, Virtue};
use crate::world::Options;

/// How a resolved invocation ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The effect ran
    Succeeded,
    /// The roll failed; cost and turn are spent
    Failed,
    /// Nothing was spent
    Aborted,
}

/// Resources taken for an invocation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Commitment {
    /// Mana actually removed from the pool
    pub paid: i32,
    /// Shortfall taken from health instead
    pub deficit: i32,
}

impl Commitment {
    pub const fn overexerted(&self) -> bool {
        self.deficit > 0
    }
}

/// Take `cost` from the mana pool. Whatever the pool cannot cover is taken
/// from health.
pub fn commit_cost(actor: &mut Actor, cost: i32, cause: &str) -> Commitment {
    let cost = cost.max(0);
    if actor.mana >= cost {
        actor.mana -= cost;
        return Commitment {
            paid: cost,
            deficit: 0,
        };
    }
    let commitment = Commitment {
        paid: actor.mana,
        deficit: cost - actor.mana,
    };
    actor.mana = 0;
    tracing::info!(cost, deficit = commitment.deficit, "overexertion");
    actor.take_hit(commitment.deficit, cause);
    commitment
}

/// Give back a commitment after the effect was cancelled
pub fn refund(actor: &mut Actor, commitment: Commitment) {
    actor.mana = (actor.mana + commitment.paid).min(actor.mana_max.max(commitment.paid));
    if !actor.is_dead {
        actor.hp += commitment.deficit;
    }
}

/// A chosen spell and the book it was read from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpellCast {
    pub book: Spellbook,
    /// Spell number within the realm
    pub spell: usize,
}

impl SpellCast {
    pub fn realm(&self) -> Realm {
        self.book.realm
    }
}

/// Resolve a chosen spell.
///
/// # Panics
///
/// If the spell index is outside the realm; the selector never hands out
/// such an index.
pub fn resolve_spell(
    ctx: &mut EffectContext<'_>,
    catalog: &dyn SpellCatalog,
    options: &Options,
    cast: SpellCast,
) -> Resolution {
    assert!(
        cast.spell < SPELLS_PER_REALM,
        "spell index {} out of range",
        cast.spell
    );
    let Some(magic) = ctx.actor.class.magic() else {
        return Resolution::Aborted;
    };
    let kind = magic.kind;
    let realm = cast.realm();
    let need = spell_need_mana(ctx.actor, catalog, realm, cast.spell);
    let chance = spell_chance(ctx.actor, catalog, realm, cast.spell);

    if need > ctx.actor.mana {
        if options.flush_failure {
            ctx.term.flush_input();
        }
        ctx.msg(format!(
            "You do not have enough mana to {} this {}.",
            kind.verb(),
            kind.noun()
        ));
        if !options.over_exert || !get_check(ctx.term, "Attempt it anyway? ") {
            return Resolution::Aborted;
        }
    }

    let commitment = commit_cost(ctx.actor, need, "overexertion");
    if ctx.actor.is_dead {
        // The turn is spent; nothing gets cast
        tracing::debug!(%realm, spell = cast.spell, "caster died paying for the spell");
        return Resolution::Failed;
    }

    let draw = ctx.rng.randint0(100) as i32;
    tracing::debug!(%realm, spell = cast.spell, need, chance, draw, "spell roll");

    let resolution = if !roll_succeeds(draw, chance) {
        spell_failed(ctx, catalog, options, cast, kind, chance);
        Resolution::Failed
    } else {
        if catalog.cast(ctx, realm, cast.spell) == EffectStatus::Cancelled {
            refund(ctx.actor, commitment);
            tracing::debug!(%realm, spell = cast.spell, "spell cancelled");
            return Resolution::Aborted;
        }
        spell_worked(ctx, catalog, cast, need, chance, magic.flags);
        Resolution::Succeeded
    };

    if commitment.overexerted() {
        overexert_epilogue(ctx, realm, commitment.deficit);
    }
    resolution
}

fn spell_failed(
    ctx: &mut EffectContext<'_>,
    catalog: &dyn SpellCatalog,
    options: &Options,
    cast: SpellCast,
    kind: SpellKind,
    chance: i32,
) {
    let realm = cast.realm();
    let spell = cast.spell as u32;

    if options.flush_failure {
        ctx.term.flush_input();
    }
    ctx.msg(format!("You failed to get the {} off!", kind.noun()));

    if (ctx.rng.randint1(100) as i32) < chance {
        let (virtue, amount) = realm.fail_virtue();
        ctx.actor.chg_virtue(virtue, amount);
    }

    catalog.miscast(ctx, realm, cast.spell);

    match realm {
        Realm::Chaos if ctx.rng.randint1(100) < spell => {
            ctx.msg("You produce a chaotic effect!");
            wild_magic(ctx, spell);
        }
        Realm::Death if ctx.rng.randint1(100) < spell => {
            if cast.book.sval == 3 && ctx.rng.one_in(2) {
                sanity_blast(ctx);
            } else {
                ctx.msg("It hurts!");
                let dam = ctx.rng.damroll(u32::from(cast.book.sval) + 1, 6) as i32;
                ctx.actor.take_hit(dam, "a miscast Death spell");
                if spell > 15 && ctx.rng.one_in(6) && !ctx.actor.hold_exp {
                    ctx.actor.lose_exp(spell as i32 * 250);
                }
            }
        }
        Realm::Music if ctx.rng.randint1(200) < spell => {
            ctx.msg("An infernal sound echoed.");
        }
        _ => {}
    }

    if (ctx.rng.randint1(100) as i32) >= chance {
        ctx.actor.chg_virtue(Virtue::Chance, -1);
    }
}

fn spell_worked(
    ctx: &mut EffectContext<'_>,
    catalog: &dyn SpellCatalog,
    cast: SpellCast,
    need: i32,
    chance: i32,
    flags: MagicFlags,
) {
    let realm = cast.realm();
    let spell = cast.spell;
    let info = catalog.info(ctx.actor.class, realm, spell);

    if (ctx.rng.randint1(100) as i32) < chance {
        ctx.actor.chg_virtue(Virtue::Chance, 1);
    }

    let slot = ctx.actor.slot_of(realm).filter(|_| !ctx.actor.class.is_hybrid());

    if let Some(slot) = slot {
        let known = ctx.actor.spells.slot_mut(slot);
        if known.worked.insert(spell) {
            let exp = info.sexp * info.slevel;
            tracing::info!(%realm, spell, exp, "first successful cast");
            ctx.actor.gain_exp(exp);
            for &(virtue, amount) in realm.first_cast_virtues() {
                ctx.actor.chg_virtue(virtue, amount);
            }
        }
    }

    let lev = ctx.actor.level.max(0) as u32;
    for &(virtue, amount) in realm.mana_virtues() {
        if (ctx.rng.randint1(100 + lev) as i32) < need {
            ctx.actor.chg_virtue(virtue, amount);
        }
    }

    if let Some(slot) = slot
        && flags.contains(MagicFlags::GAIN_EXP)
    {
        let depth = ctx.actor.dungeon_depth;
        let level = ctx.actor.level;
        let exp = &mut ctx.actor.spells.slot_mut(slot).exp[spell];
        let gain = proficiency_gain(exp.value(), depth, level, info.slevel, slot);
        if gain > 0 {
            exp.gain(gain);
        }
    }
}

/// Proficiency earned by one successful cast
///
/// Past Beginner, practice only counts deep enough in the dungeon relative
/// to the caster and the spell. Second-realm spells stop at Expert.
pub fn proficiency_gain(cur: i16, depth: i32, level: i32, slevel: i32, slot: RealmSlot) -> i16 {
    if cur < SPELL_EXP_BEGINNER {
        60
    } else if cur < SPELL_EXP_SKILLED {
        if depth > 4 && depth + 10 > level { 8 } else { 0 }
    } else if cur < SPELL_EXP_EXPERT {
        if depth + 5 > level && depth + 5 > slevel { 2 } else { 0 }
    } else if cur < SPELL_EXP_MASTER && slot == RealmSlot::Primary {
        if depth + 5 > level && depth > slevel { 1 } else { 0 }
    } else {
        0
    }
}

/// Fainting after casting beyond the mana pool
fn overexert_epilogue(ctx: &mut EffectContext<'_>, realm: Realm, deficit: i32) {
    ctx.actor.mana = 0;
    ctx.msg("You faint from the effort!");

    let turns = ctx.rng.randint1((5 * deficit + 1).max(1) as u32);
    ctx.actor
        .timed
        .add(Timed::Paralyzed, i16::try_from(turns).unwrap_or(i16::MAX));

    let (virtue, amount) = realm.overexert_virtue();
    ctx.actor.chg_virtue(virtue, amount);

    if ctx.rng.randint0(100) < 50 {
        let permanent = ctx.rng.randint0(100) < 25;
        ctx.msg("You have damaged your health!");
        let amount = 15 + ctx.rng.randint1(10) as i32;
        ctx.actor
            .dec_stat(Stat::Constitution, amount, permanent, &mut *ctx.rng);
    }
}

/// Random side effect of a failed Chaos spell
fn wild_magic(ctx: &mut EffectContext<'_>, spell: u32) {
    let roll = ctx.rng.randint1(spell) + ctx.rng.randint1(8) + 1;
    tracing::debug!(roll, "wild magic");
    match roll {
        0..=3 => ctx.msg("You are teleported a short distance."),
        4..=5 => ctx.msg("You are teleported away!"),
        6..=7 => ctx.msg("You are surrounded by a white light."),
        8..=10 => ctx.msg("You feel a sudden stirring nearby!"),
        11..=13 => {
            let turns = 4 + ctx.rng.randint0(4) as i16;
            ctx.actor.timed.add(Timed::Confused, turns);
            ctx.msg("You are confused!");
        }
        14..=18 => ctx.msg("Creatures appear out of nowhere!"),
        19..=24 => ctx.msg("The walls shimmer and twist."),
        25..=30 => {
            let turns = 2 + ctx.rng.randint1(4) as i16;
            ctx.actor.timed.add(Timed::Stun, turns);
            ctx.msg("You are hit by a blast of raw chaos!");
        }
        _ => ctx.msg("The ground shakes violently!"),
    }
}

/// Reading the deepest Death book went badly
fn sanity_blast(ctx: &mut EffectContext<'_>) {
    ctx.msg("Your sanity is shaken by reading the Necronomicon!");
    let turns = 4 + ctx.rng.randint0(4) as i16;
    ctx.actor.timed.add(Timed::Confused, turns);
    if ctx.rng.one_in(3) {
        let stat = if ctx.rng.one_in(2) {
            Stat::Intelligence
        } else {
            Stat::Wisdom
        };
        ctx.actor.dec_stat(stat, 10, false, &mut *ctx.rng);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::magic::catalog::StandardCatalog;
    use crate::player::{Class, Race};
    use crate::testing::ScriptedTerminal;
    use arcana_rng::ScriptedRng;

    fn mage() -> Actor {
        let mut actor = Actor::new("Test", Class::Mage, Race::Human);
        actor.realm1 = Some(Realm::Sorcery);
        actor.realm2 = Some(Realm::Chaos);
        actor.level = 10;
        actor.hp = 50;
        actor.hp_max = 50;
        actor.mana_max = 30;
        actor.mana = 30;
        actor.spells.learn(RealmSlot::Primary, 0);
        actor
    }

    fn book() -> Spellbook {
        Spellbook::new(Realm::Sorcery, 0)
    }

    struct Harness {
        actor: Actor,
        rng: ScriptedRng,
        term: ScriptedTerminal,
        messages: Vec<String>,
    }

    impl Harness {
        fn new(actor: Actor, draws: impl IntoIterator<Item = u32>, keys: &str) -> Self {
            Self {
                actor,
                rng: ScriptedRng::new(draws),
                term: ScriptedTerminal::new(keys),
                messages: Vec::new(),
            }
        }

        fn resolve(&mut self, options: &Options, cast: SpellCast) -> Resolution {
            let mut ctx = EffectContext {
                actor: &mut self.actor,
                rng: &mut self.rng,
                term: &mut self.term,
                messages: &mut self.messages,
            };
            resolve_spell(&mut ctx, &StandardCatalog, options, cast)
        }
    }

    #[test]
    fn test_commit_within_pool() {
        let mut actor = mage();
        let c = commit_cost(&mut actor, 10, "test");
        assert_eq!(c, Commitment { paid: 10, deficit: 0 });
        assert_eq!(actor.mana, 20);
        assert_eq!(actor.hp, 50);
    }

    #[test]
    fn test_commit_with_deficit() {
        let mut actor = mage();
        actor.mana = 10;
        let c = commit_cost(&mut actor, 15, "test");
        assert!(c.overexerted());
        assert_eq!(actor.mana, 0);
        assert_eq!(actor.hp, 45);

        refund(&mut actor, c);
        assert_eq!(actor.mana, 10);
        assert_eq!(actor.hp, 50);
    }

    #[test]
    fn test_success_marks_worked_and_gains_exp() {
        // Detect Monsters takes no aim. Draws: roll 99, chance virtue 100.
        let mut h = Harness::new(mage(), [99, 99], "");
        let before = h.actor.exp;
        let r = h.resolve(&Options::default(), SpellCast { book: book(), spell: 0 });
        assert_eq!(r, Resolution::Succeeded);
        assert!(h.actor.spells.primary.worked.contains(0));
        assert_eq!(h.actor.exp, before + 4);
        assert_eq!(h.actor.spells.primary.exp[0].value(), 60);
        assert!(h.actor.mana < 30);
        assert!(h.messages.iter().any(|m| m.contains("monsters")));
    }

    #[test]
    fn test_failure_keeps_cost() {
        let mut h = Harness::new(mage(), [0], "");
        let r = h.resolve(&Options::default(), SpellCast { book: book(), spell: 0 });
        assert_eq!(r, Resolution::Failed);
        assert!(h.actor.mana < 30);
        assert!(!h.actor.spells.primary.worked.contains(0));
        assert_eq!(h.messages[0], "You failed to get the spell off!");
        assert_eq!(h.term.flushes(), 1);
    }

    #[test]
    fn test_short_mana_blocked_without_over_exert() {
        let mut actor = mage();
        actor.mana = 0;
        let mut h = Harness::new(actor, [], "");
        let r = h.resolve(&Options::default(), SpellCast { book: book(), spell: 0 });
        assert_eq!(r, Resolution::Aborted);
        assert_eq!(h.messages, ["You do not have enough mana to cast this spell."]);
        assert_eq!(h.actor.hp, 50);
    }

    #[test]
    fn test_over_exert_confirmed() {
        let mut actor = mage();
        actor.mana = 0;
        // roll 99, chance virtue, then paralysis 1, no con damage
        let mut h = Harness::new(actor, [99, 99, 0, 99], "y");
        let options = Options {
            over_exert: true,
            ..Options::default()
        };
        let r = h.resolve(&options, SpellCast { book: book(), spell: 0 });
        assert_eq!(r, Resolution::Succeeded);
        assert_eq!(h.actor.mana, 0);
        assert!(h.actor.hp < 50);
        assert!(h.actor.timed.is_active(Timed::Paralyzed));
        assert!(h.messages.contains(&"You faint from the effort!".to_string()));
        assert!(h.actor.virtues.get(Virtue::Knowledge) < 0);
    }

    #[test]
    fn test_cancelled_effect_refunds() {
        let mut actor = mage();
        actor.realm1 = Some(Realm::Chaos);
        actor.realm2 = None;
        actor.spells.learn(RealmSlot::Primary, 0);
        let mut h = Harness::new(actor, [99], "\x1b");
        let cast = SpellCast {
            book: Spellbook::new(Realm::Chaos, 0),
            spell: 0,
        };
        let r = h.resolve(&Options::default(), cast);
        assert_eq!(r, Resolution::Aborted);
        assert_eq!(h.actor.mana, 30);
        assert!(!h.actor.spells.primary.worked.contains(0));
    }

    #[test]
    fn test_fatal_deficit_skips_roll_and_effect() {
        let mut actor = mage();
        actor.realm1 = Some(Realm::Chaos);
        actor.realm2 = None;
        actor.spells.learn(RealmSlot::Primary, 0);
        actor.mana = 0;
        actor.hp = 0;
        let mut h = Harness::new(actor, [99], "y\x1b");
        let options = Options {
            over_exert: true,
            ..Options::default()
        };
        let cast = SpellCast {
            book: Spellbook::new(Realm::Chaos, 0),
            spell: 0,
        };
        assert_eq!(h.resolve(&options, cast), Resolution::Failed);
        assert!(h.actor.is_dead);
        assert_eq!(h.actor.died_from.as_deref(), Some("overexertion"));
        assert_eq!(h.rng.call_count(), 0);
        // The aim prompt never came up
        assert_eq!(h.term.pending_keys(), 1);
        assert_eq!(h.term.prompts_containing("Direction"), 0);
    }

    #[test]
    fn test_death_miscast_hurts() {
        let mut actor = mage();
        actor.realm1 = Some(Realm::Death);
        actor.realm2 = None;
        actor.level = 30;
        actor.spells.learn(RealmSlot::Primary, 8);
        // roll 0 fails; no virtue; mishap 1 < 8; 2d6 = 3 + 1
        let mut h = Harness::new(actor, [0, 99, 0, 2, 0], "");
        let cast = SpellCast {
            book: Spellbook::new(Realm::Death, 1),
            spell: 8,
        };
        assert_eq!(h.resolve(&Options::default(), cast), Resolution::Failed);
        assert!(h.messages.contains(&"It hurts!".to_string()));
        assert_eq!(h.actor.hp, 46);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_bad_index_panics() {
        let mut h = Harness::new(mage(), [], "");
        h.resolve(&Options::default(), SpellCast { book: book(), spell: 40 });
    }

    #[test]
    fn test_proficiency_gating() {
        use RealmSlot::*;
        assert_eq!(proficiency_gain(0, 0, 1, 1, Primary), 60);
        assert_eq!(proficiency_gain(SPELL_EXP_BEGINNER, 2, 1, 1, Primary), 0);
        assert_eq!(proficiency_gain(SPELL_EXP_BEGINNER, 10, 5, 1, Primary), 8);
        assert_eq!(proficiency_gain(SPELL_EXP_SKILLED, 10, 5, 1, Primary), 2);
        assert_eq!(proficiency_gain(SPELL_EXP_EXPERT, 10, 5, 1, Primary), 1);
        assert_eq!(proficiency_gain(SPELL_EXP_EXPERT, 10, 5, 1, Secondary), 0);
        assert_eq!(proficiency_gain(SPELL_EXP_MASTER, 50, 5, 1, Primary), 0);
    }
}
