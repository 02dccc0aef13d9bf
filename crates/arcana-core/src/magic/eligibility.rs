//! Eligibility and cost of spells
//!
//! Which spells of a book a character may cast or study right now, and what
//! they cost. Nothing here is cached: every call looks at the current
//! character.

use super::catalog::SpellCatalog;
use super::formula::{FailInputs, mod_need_mana, spell_fail_chance};
use super::{ProficiencyRank, Realm, Spellbook};
use crate::consts::{SPELL_EXP_MASTER, SPELL_EXP_SKILLED, SPELL_LEVEL_NEVER};
use crate::player::stats::{ADJ_MAG_FAIL, ADJ_MAG_STAT};
use crate::player::{Actor, CastingTraits, Class, MagicFlags, Stat};
use crate::select::{Candidate, CandidateList, CandidateSource};

/// What the spell list is being built for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpellMode {
    Cast,
    Study,
    Browse,
}

impl SpellMode {
    /// Whether the mode lists spells the character already knows
    pub const fn wants_learned(self) -> bool {
        !matches!(self, SpellMode::Study)
    }
}

/// Whether the character's class may read this book at all
pub fn book_usable(actor: &Actor, book: Spellbook) -> bool {
    if actor.class.magic().is_none() {
        return false;
    }
    let realm = book.realm;
    match actor.class {
        Class::Sorcerer => realm.is_magic(),
        Class::RedMage => realm.is_magic() && (realm == Realm::Arcane || book.is_town_book()),
        _ => actor.slot_of(realm).is_some(),
    }
}

/// Proficiency experience of a spell
///
/// Sorcerers cast everything as masters and Red-Mages as skilled casters;
/// spells outside the character's realms count as unskilled.
pub fn experience_of_spell(actor: &Actor, realm: Realm, spell: usize) -> i16 {
    match actor.class {
        Class::Sorcerer => SPELL_EXP_MASTER,
        Class::RedMage => SPELL_EXP_SKILLED,
        _ => match actor.slot_of(realm) {
            Some(slot) => actor.spells.slot(slot).exp[spell].value(),
            None => 0,
        },
    }
}

/// Whether a spell may be chosen.
///
/// `learned` asks for spells already known (casting, browsing); otherwise
/// the spell must be learnable. `study_pray` is set when a priest learns a
/// prayer at random, which skips spells already known.
pub fn spell_okay(
    actor: &Actor,
    catalog: &dyn SpellCatalog,
    realm: Realm,
    spell: usize,
    learned: bool,
    study_pray: bool,
) -> bool {
    let info = catalog.info(actor.class, realm, spell);
    if info.slevel >= SPELL_LEVEL_NEVER {
        return false;
    }
    if actor.class.is_hybrid() {
        return info.slevel <= actor.level;
    }
    if info.slevel > actor.level {
        return false;
    }
    let Some(slot) = actor.slot_of(realm) else {
        return false;
    };
    let known = actor.spells.slot(slot);
    if known.forgotten.contains(spell) {
        return false;
    }
    if known.learned.contains(spell) {
        return !study_pray;
    }
    !learned
}

/// Mana needed for a spell right now
pub fn spell_need_mana(actor: &Actor, catalog: &dyn SpellCatalog, realm: Realm, spell: usize) -> i32 {
    let info = catalog.info(actor.class, realm, spell);
    mod_need_mana(
        info.smana,
        experience_of_spell(actor, realm, spell),
        actor.casting.contains(CastingTraits::DEC_MANA),
    )
}

/// Failure chance of a spell right now, in percent
pub fn spell_chance(actor: &Actor, catalog: &dyn SpellCatalog, realm: Realm, spell: usize) -> i32 {
    let Some(magic) = actor.class.magic() else {
        return 100;
    };
    let info = catalog.info(actor.class, realm, spell);
    let stat_index = actor.stats.index(magic.stat);

    let off_realm_penalty = matches!(actor.class, Class::Mage | Class::Priest)
        && actor.realm1 != Some(realm);
    let icky_wield = matches!(actor.class, Class::Priest | Class::Sorcerer)
        && actor.casting.contains(CastingTraits::ICKY_WIELD);
    let rank = (actor.slot_of(realm).is_some() || actor.class.is_hybrid())
        .then(|| ProficiencyRank::from_exp(experience_of_spell(actor, realm, spell)));

    spell_fail_chance(&FailInputs {
        sfail: info.sfail,
        slevel: info.slevel,
        caster_level: actor.level,
        stat_bonus: ADJ_MAG_STAT[stat_index],
        min_fail: ADJ_MAG_FAIL[stat_index],
        need_mana: spell_need_mana(actor, catalog, realm, spell),
        current_mana: actor.mana,
        off_realm_penalty,
        fail_5percent: magic.flags.contains(MagicFlags::FAIL_5PERCENT),
        icky_wield,
        easy_spell: actor.casting.contains(CastingTraits::EASY_SPELL),
        dec_mana: actor.casting.contains(CastingTraits::DEC_MANA),
        heavy_spell: actor.casting.contains(CastingTraits::HEAVY_SPELL),
        realm,
        alignment: actor.alignment,
        wisdom_caster: magic.stat == Stat::Wisdom,
        stun: actor.stun(),
        rank,
    })
}

/// Remark shown next to a spell in the list
fn spell_note(actor: &Actor, catalog: &dyn SpellCatalog, realm: Realm, spell: usize) -> String {
    let info = catalog.info(actor.class, realm, spell);
    if info.slevel >= SPELL_LEVEL_NEVER {
        return "illegible".to_string();
    }
    if actor.class.is_hybrid() {
        let rank = ProficiencyRank::from_exp(experience_of_spell(actor, realm, spell));
        return rank.label().to_string();
    }
    let Some(slot) = actor.slot_of(realm) else {
        return "unknown".to_string();
    };
    let known = actor.spells.slot(slot);
    if known.forgotten.contains(spell) {
        "forgotten".to_string()
    } else if !known.learned.contains(spell) {
        "unknown".to_string()
    } else if !known.worked.contains(spell) {
        "untried".to_string()
    } else {
        known.exp[spell].rank().label().to_string()
    }
}

/// Candidate for one spell of a book
pub fn spell_candidate(
    actor: &Actor,
    catalog: &dyn SpellCatalog,
    realm: Realm,
    spell: usize,
    mode: SpellMode,
    study_pray: bool,
) -> Candidate {
    let info = catalog.info(actor.class, realm, spell);
    let illegible = info.slevel >= SPELL_LEVEL_NEVER;
    Candidate {
        id: spell,
        name: if illegible {
            "(illegible)".to_string()
        } else {
            catalog.name(realm, spell)
        },
        min_level: info.slevel,
        cost: spell_need_mana(actor, catalog, realm, spell),
        fail: spell_chance(actor, catalog, realm, spell),
        eligible: spell_okay(actor, catalog, realm, spell, mode.wants_learned(), study_pray),
        note: Some(spell_note(actor, catalog, realm, spell)),
        source: CandidateSource::Spell { realm, spell },
    }
}

/// Every spell of a book, in book order.
///
/// A book the class may not read yields an empty list.
pub fn book_candidates(
    actor: &Actor,
    catalog: &dyn SpellCatalog,
    book: Spellbook,
    mode: SpellMode,
) -> CandidateList {
    if !book_usable(actor, book) {
        return CandidateList::default();
    }
    book.spells()
        .iter()
        .map(|spell| spell_candidate(actor, catalog, book.realm, spell, mode, false))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::magic::{RealmSlot, StandardCatalog};
    use crate::player::Race;

    fn mage() -> Actor {
        let mut actor = Actor::new("Test", Class::Mage, Race::Human);
        actor.realm1 = Some(Realm::Sorcery);
        actor.realm2 = Some(Realm::Chaos);
        actor.level = 5;
        actor.mana = 20;
        actor
    }

    #[test]
    fn test_book_usable() {
        let actor = mage();
        assert!(book_usable(&actor, Spellbook::new(Realm::Sorcery, 3)));
        assert!(book_usable(&actor, Spellbook::new(Realm::Chaos, 0)));
        assert!(!book_usable(&actor, Spellbook::new(Realm::Life, 0)));

        let mut red = Actor::new("Red", Class::RedMage, Race::Human);
        red.level = 10;
        assert!(book_usable(&red, Spellbook::new(Realm::Life, 1)));
        assert!(!book_usable(&red, Spellbook::new(Realm::Life, 2)));
        assert!(book_usable(&red, Spellbook::new(Realm::Arcane, 3)));
        assert!(!book_usable(&red, Spellbook::new(Realm::Music, 0)));

        let warrior = Actor::new("W", Class::Warrior, Race::Human);
        assert!(!book_usable(&warrior, Spellbook::new(Realm::Life, 0)));
    }

    #[test]
    fn test_spell_okay_learned_and_study() {
        let mut actor = mage();
        let cat = StandardCatalog;
        // Not learned: only studyable
        assert!(!spell_okay(&actor, &cat, Realm::Sorcery, 0, true, false));
        assert!(spell_okay(&actor, &cat, Realm::Sorcery, 0, false, false));

        actor.spells.learn(RealmSlot::Primary, 0);
        assert!(spell_okay(&actor, &cat, Realm::Sorcery, 0, true, false));
        assert!(!spell_okay(&actor, &cat, Realm::Sorcery, 0, true, true));

        // Too high
        assert!(!spell_okay(&actor, &cat, Realm::Sorcery, 10, false, false));
        // Foreign realm
        assert!(!spell_okay(&actor, &cat, Realm::Life, 0, false, false));
    }

    #[test]
    fn test_forgotten_never_okay() {
        let mut actor = mage();
        actor.spells.learn(RealmSlot::Primary, 1);
        actor.spells.primary.learned.remove(1);
        actor.spells.primary.forgotten.insert(1);
        let cat = StandardCatalog;
        assert!(!spell_okay(&actor, &cat, Realm::Sorcery, 1, true, false));
        assert!(!spell_okay(&actor, &cat, Realm::Sorcery, 1, false, false));
    }

    #[test]
    fn test_hybrid_uses_level_only() {
        let mut actor = Actor::new("S", Class::Sorcerer, Race::Human);
        actor.level = 3;
        let cat = StandardCatalog;
        assert!(spell_okay(&actor, &cat, Realm::Death, 1, true, false));
        assert!(!spell_okay(&actor, &cat, Realm::Death, 2, true, false));
        assert_eq!(experience_of_spell(&actor, Realm::Death, 1), SPELL_EXP_MASTER);
    }

    #[test]
    fn test_candidates_from_book() {
        let mut actor = mage();
        actor.spells.learn(RealmSlot::Primary, 0);
        let cat = StandardCatalog;
        let list = book_candidates(&actor, &cat, Spellbook::new(Realm::Sorcery, 0), SpellMode::Cast);
        assert_eq!(list.len(), 8);
        assert_eq!(list.eligible_count(), 1);
        assert_eq!(list[0].name, "Detect Monsters");
        assert_eq!(list[0].note.as_deref(), Some("untried"));
        assert_eq!(list[1].note.as_deref(), Some("unknown"));

        let list = book_candidates(&actor, &cat, Spellbook::new(Realm::Life, 0), SpellMode::Cast);
        assert!(list.is_empty());
    }

    #[test]
    fn test_need_mana_tracks_proficiency() {
        let mut actor = mage();
        let cat = StandardCatalog;
        let novice = spell_need_mana(&actor, &cat, Realm::Sorcery, 15);
        actor.spells.primary.exp[15].raise_to(SPELL_EXP_MASTER);
        let master = spell_need_mana(&actor, &cat, Realm::Sorcery, 15);
        assert!(master < novice);
    }

    #[test]
    fn test_second_realm_penalty() {
        let mut actor = mage();
        actor.level = 9;
        let cat = StandardCatalog;
        let first = spell_chance(&actor, &cat, Realm::Sorcery, 4);
        let second = spell_chance(&actor, &cat, Realm::Chaos, 4);
        assert_eq!(first, 26);
        // Same curve, +5 for the second realm
        assert_eq!(second, first + 5);
    }
}
