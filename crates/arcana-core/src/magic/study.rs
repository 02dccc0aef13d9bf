//! Learning spells
//!
//! How many spells a character may know, which ones slip from memory when
//! levels are lost, and what studying a spell does to the record.

use arcana_rng::RandomSource;

use super::catalog::SpellCatalog;
use super::eligibility::spell_okay;
use super::{LearnedSpell, ProficiencyRank, Realm, RealmSlot, Spellbook};
use crate::consts::{
    SPELL_EXP_BEGINNER, SPELL_EXP_EXPERT, SPELL_EXP_MASTER, SPELL_EXP_SKILLED, SPELLS_PER_REALM,
};
use crate::player::stats::ADJ_MAG_STUDY;
use crate::player::Actor;

/// Realm held in a slot
pub fn realm_in(actor: &Actor, slot: RealmSlot) -> Option<Realm> {
    match slot {
        RealmSlot::Primary => actor.realm1,
        RealmSlot::Secondary => actor.realm2,
    }
}

fn slots(actor: &Actor) -> impl Iterator<Item = (RealmSlot, Realm)> + '_ {
    [RealmSlot::Primary, RealmSlot::Secondary]
        .into_iter()
        .filter_map(|slot| realm_in(actor, slot).map(|realm| (slot, realm)))
}

/// Number of spells the character may know at their current level
pub fn spells_allowed(actor: &Actor) -> usize {
    let Some(magic) = actor.class.magic() else {
        return 0;
    };
    if actor.class.is_hybrid() || actor.realm1.is_none() {
        return 0;
    }
    let levels = (actor.level - magic.first_level + 1).max(0);
    let allowed = (ADJ_MAG_STUDY[actor.stats.index(magic.stat)] * levels / 2).max(0) as usize;
    let realms = if actor.realm2.is_some() { 2 } else { 1 };
    allowed.min(SPELLS_PER_REALM * realms)
}

/// Spells of the character's realms they are high enough to learn but
/// have not yet learned or forgotten
fn spells_within_reach(actor: &Actor, catalog: &dyn SpellCatalog) -> usize {
    slots(actor)
        .map(|(slot, realm)| {
            let known = actor.spells.slot(slot);
            (0..SPELLS_PER_REALM)
                .filter(|&spell| {
                    !known.learned.contains(spell)
                        && !known.forgotten.contains(spell)
                        && catalog.info(actor.class, realm, spell).slevel <= actor.level
                })
                .count()
        })
        .sum()
}

fn spell_level(actor: &Actor, catalog: &dyn SpellCatalog, learned: LearnedSpell) -> i32 {
    realm_in(actor, learned.slot).map_or(i32::MAX, |realm| {
        catalog.info(actor.class, realm, learned.spell).slevel
    })
}

fn noun(actor: &Actor) -> &'static str {
    actor.class.magic().map_or("spell", |m| m.kind.noun())
}

fn spell_name(actor: &Actor, catalog: &dyn SpellCatalog, learned: LearnedSpell) -> String {
    realm_in(actor, learned.slot)
        .map(|realm| catalog.name(realm, learned.spell))
        .unwrap_or_default()
}

/// Bring the learned and forgotten sets in line with the character's level
/// and recompute how many new spells may be studied. Returns the messages
/// to show.
pub fn update_spell_memory(actor: &mut Actor, catalog: &dyn SpellCatalog) -> Vec<String> {
    let mut messages = Vec::new();
    let allowed = spells_allowed(actor);
    let noun = noun(actor);
    let order = actor.spells.order.clone();

    // Spells now above the character's level
    for &entry in order.iter().rev() {
        if spell_level(actor, catalog, entry) > actor.level
            && actor.spells.forget(entry.slot, entry.spell)
        {
            let name = spell_name(actor, catalog, entry);
            tracing::info!(spell = %name, "spell forgotten by level");
            messages.push(format!("You have forgotten the {} of {}.", noun, name));
        }
    }

    // Spells beyond what the character can hold, newest first
    for &entry in order.iter().rev() {
        if actor.spells.studies_used() <= allowed {
            break;
        }
        if actor.spells.forget(entry.slot, entry.spell) {
            let name = spell_name(actor, catalog, entry);
            tracing::info!(spell = %name, "spell forgotten by capacity");
            messages.push(format!("You have forgotten the {} of {}.", noun, name));
        }
    }

    // Forgotten spells come back, oldest first
    for &entry in &order {
        if actor.spells.studies_used() >= allowed {
            break;
        }
        if spell_level(actor, catalog, entry) <= actor.level
            && actor.spells.remember(entry.slot, entry.spell)
        {
            let name = spell_name(actor, catalog, entry);
            tracing::info!(spell = %name, "spell remembered");
            messages.push(format!("You have remembered the {} of {}.", noun, name));
        }
    }

    let open = allowed.saturating_sub(actor.spells.studies_used());
    let new_spells = open.min(spells_within_reach(actor, catalog)) as i32;
    if new_spells != actor.new_spells && new_spells > 0 {
        messages.push(format!(
            "You can learn {} more {}{}.",
            new_spells,
            noun,
            if new_spells == 1 { "" } else { "s" }
        ));
    }
    actor.new_spells = new_spells;
    messages
}

/// Highest proficiency study can reach in a slot
pub const fn study_cap(slot: RealmSlot) -> i16 {
    match slot {
        RealmSlot::Primary => SPELL_EXP_MASTER,
        RealmSlot::Secondary => SPELL_EXP_EXPERT,
    }
}

/// Proficiency after re-studying a spell: roughly one rank up, keeping
/// part of the progress already made in the current rank
pub const fn restudy_exp(old: i16, slot: RealmSlot) -> i16 {
    if old >= SPELL_EXP_EXPERT {
        SPELL_EXP_MASTER
    } else if old >= SPELL_EXP_SKILLED {
        match slot {
            RealmSlot::Secondary => SPELL_EXP_EXPERT,
            RealmSlot::Primary => old + (SPELL_EXP_EXPERT - SPELL_EXP_SKILLED),
        }
    } else if old >= SPELL_EXP_BEGINNER {
        SPELL_EXP_SKILLED + (old - SPELL_EXP_BEGINNER) * 2 / 3
    } else {
        SPELL_EXP_BEGINNER + old / 3
    }
}

/// Whether a learned spell has nothing more to gain from study
pub fn fully_studied(actor: &Actor, slot: RealmSlot, spell: usize) -> bool {
    actor.spells.slot(slot).exp[spell].value() >= study_cap(slot)
}

/// Re-study a learned spell. Returns the new rank.
pub fn restudy_spell(actor: &mut Actor, slot: RealmSlot, spell: usize) -> ProficiencyRank {
    let exp = &mut actor.spells.slot_mut(slot).exp[spell];
    let new = restudy_exp(exp.value(), slot).min(study_cap(slot));
    exp.raise_to(new);
    let rank = exp.rank();
    actor.spells.restudied += 1;
    tracing::info!(spell, %rank, "spell re-studied");
    rank
}

/// Record a newly learned spell
pub fn learn_spell(actor: &mut Actor, slot: RealmSlot, spell: usize) -> bool {
    let learned = actor.spells.learn(slot, spell);
    if learned {
        tracing::info!(?slot, spell, "spell learned");
    }
    learned
}

/// Virtue nudged by studying; follows the kind of book the class reads,
/// whichever realm the book belongs to
pub fn reward_study(actor: &mut Actor) {
    if let Some(magic) = actor.class.magic() {
        actor.chg_virtue(magic.kind.study_virtue(), 1);
    }
}

/// Replace the second realm, forgetting everything learned in it
pub fn change_secondary_realm(actor: &mut Actor, realm: Realm) {
    if let Some(old) = actor.realm2.replace(realm) {
        actor.old_realms.push(old);
    }
    actor.spells.reset_secondary();
    tracing::info!(%realm, "second realm changed");
}

/// Pick a prayer to learn at random among those eligible in a book
pub fn random_prayer<R: RandomSource + ?Sized>(
    actor: &Actor,
    catalog: &dyn SpellCatalog,
    book: Spellbook,
    rng: &mut R,
) -> Option<usize> {
    actor.slot_of(book.realm)?;
    let mut chosen = None;
    let mut seen = 0;
    for spell in book.spells().iter() {
        if !spell_okay(actor, catalog, book.realm, spell, false, true) {
            continue;
        }
        seen += 1;
        if rng.one_in(seen) {
            chosen = Some(spell);
        }
    }
    chosen
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::magic::StandardCatalog;
    use crate::player::{Class, Race, Stat};
    use arcana_rng::ScriptedRng;

    fn mage(level: i32) -> Actor {
        let mut actor = Actor::new("Student", Class::Mage, Race::Human);
        actor.stats.set(Stat::Intelligence, 18);
        actor.realm1 = Some(Realm::Sorcery);
        actor.level = level;
        actor
    }

    #[test]
    fn test_spells_allowed() {
        // Int 18: two half-spells per level
        assert_eq!(spells_allowed(&mage(1)), 1);
        assert_eq!(spells_allowed(&mage(10)), 10);
        assert_eq!(spells_allowed(&mage(50)), SPELLS_PER_REALM);
        let warrior = Actor::new("W", Class::Warrior, Race::Human);
        assert_eq!(spells_allowed(&warrior), 0);
    }

    #[test]
    fn test_new_spells_limited_by_reach() {
        let mut actor = mage(1);
        let msgs = update_spell_memory(&mut actor, &StandardCatalog);
        // Only spell 0 is level 1
        assert_eq!(actor.new_spells, 1);
        assert_eq!(msgs, ["You can learn 1 more spell."]);
        learn_spell(&mut actor, RealmSlot::Primary, 0);
        update_spell_memory(&mut actor, &StandardCatalog);
        assert_eq!(actor.new_spells, 0);
    }

    #[test]
    fn test_forget_and_remember_with_level() {
        let mut actor = mage(5);
        for spell in [0, 1, 2] {
            learn_spell(&mut actor, RealmSlot::Primary, spell);
        }
        actor.level = 2;
        let msgs = update_spell_memory(&mut actor, &StandardCatalog);
        assert!(actor.spells.primary.forgotten.contains(2));
        assert!(actor.spells.primary.forgotten.contains(1));
        assert!(msgs.contains(&"You have forgotten the spell of Detect Doors and Traps.".to_string()));

        actor.level = 5;
        let msgs = update_spell_memory(&mut actor, &StandardCatalog);
        assert_eq!(actor.spells.forgotten_count(), 0);
        assert!(msgs.contains(&"You have remembered the spell of Phase Door.".to_string()));
    }

    #[test]
    fn test_restudy_table() {
        use RealmSlot::*;
        assert_eq!(restudy_exp(0, Primary), SPELL_EXP_BEGINNER);
        assert_eq!(restudy_exp(300, Primary), SPELL_EXP_BEGINNER + 100);
        assert_eq!(restudy_exp(SPELL_EXP_BEGINNER + 150, Primary), SPELL_EXP_SKILLED + 100);
        assert_eq!(restudy_exp(SPELL_EXP_SKILLED + 10, Primary), SPELL_EXP_EXPERT + 10);
        assert_eq!(restudy_exp(SPELL_EXP_SKILLED + 10, Secondary), SPELL_EXP_EXPERT);
        assert_eq!(restudy_exp(SPELL_EXP_EXPERT, Primary), SPELL_EXP_MASTER);
    }

    #[test]
    fn test_restudy_respects_cap() {
        let mut actor = mage(10);
        actor.realm2 = Some(Realm::Chaos);
        learn_spell(&mut actor, RealmSlot::Secondary, 0);
        actor.spells.secondary.exp[0].raise_to(SPELL_EXP_EXPERT);
        assert!(fully_studied(&actor, RealmSlot::Secondary, 0));

        learn_spell(&mut actor, RealmSlot::Primary, 0);
        let rank = restudy_spell(&mut actor, RealmSlot::Primary, 0);
        assert_eq!(rank, ProficiencyRank::Beginner);
        assert_eq!(actor.spells.restudied, 1);
        assert_eq!(actor.spells.studies_used(), 3);
    }

    #[test]
    fn test_change_secondary_realm() {
        let mut actor = mage(10);
        actor.realm2 = Some(Realm::Chaos);
        learn_spell(&mut actor, RealmSlot::Secondary, 0);
        change_secondary_realm(&mut actor, Realm::Death);
        assert_eq!(actor.realm2, Some(Realm::Death));
        assert_eq!(actor.old_realms, vec![Realm::Chaos]);
        assert_eq!(actor.spells.learned_count(), 0);
    }

    #[test]
    fn test_random_prayer_samples_eligible() {
        let mut actor = Actor::new("Cleric", Class::Priest, Race::Human);
        actor.realm1 = Some(Realm::Life);
        actor.level = 5;
        // spells 0, 1 and 2 are within reach; take the last one offered
        let mut rng = ScriptedRng::new([0, 0, 0]);
        let book = Spellbook::new(Realm::Life, 0);
        assert_eq!(random_prayer(&actor, &StandardCatalog, book, &mut rng), Some(2));

        let mut rng = ScriptedRng::new([0, 1, 1]);
        assert_eq!(random_prayer(&actor, &StandardCatalog, book, &mut rng), Some(0));
    }

    #[test]
    fn test_reward_study() {
        let mut actor = mage(1);
        reward_study(&mut actor);
        assert_eq!(actor.virtues.get(crate::player::Virtue::Knowledge), 1);
        assert_eq!(actor.virtues.get(crate::player::Virtue::Faith), 0);

        let mut cleric = Actor::new("Cleric", Class::Priest, Race::Human);
        cleric.realm1 = Some(Realm::Life);
        reward_study(&mut cleric);
        assert_eq!(cleric.virtues.get(crate::player::Virtue::Faith), 1);
    }

    #[test]
    fn test_reward_study_ignores_book_realm() {
        let mut actor = mage(10);
        actor.realm2 = Some(Realm::Nature);
        reward_study(&mut actor);
        assert_eq!(actor.virtues.get(crate::player::Virtue::Knowledge), 1);
        assert_eq!(actor.virtues.get(crate::player::Virtue::Nature), 0);
    }
}
