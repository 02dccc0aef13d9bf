//! Known spells and proficiency
//!
//! Learned/worked/forgotten flags live in [`AbilitySet`]s, one per realm
//! slot, and every spell carries a proficiency experience counter.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::consts::{
    SPELL_EXP_BEGINNER, SPELL_EXP_EXPERT, SPELL_EXP_MASTER, SPELL_EXP_SKILLED,
    SPELL_EXP_UNSKILLED, SPELLS_PER_REALM,
};

/// Fixed-size set of ability indices (0..32)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AbilitySet(u32);

impl AbilitySet {
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Set holding every index in `start..end`
    pub fn range(start: usize, end: usize) -> Self {
        (start..end.min(SPELLS_PER_REALM)).collect()
    }

    pub const fn contains(&self, index: usize) -> bool {
        index < SPELLS_PER_REALM && self.0 & (1 << index) != 0
    }

    /// Add an index. Returns true if it was not already present.
    pub fn insert(&mut self, index: usize) -> bool {
        assert!(index < SPELLS_PER_REALM, "ability index {index} out of range");
        let was = self.contains(index);
        self.0 |= 1 << index;
        !was
    }

    /// Remove an index. Returns true if it was present.
    pub fn remove(&mut self, index: usize) -> bool {
        let was = self.contains(index);
        if was {
            self.0 &= !(1 << index);
        }
        was
    }

    pub const fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn clear(&mut self) {
        self.0 = 0;
    }

    /// Indices in ascending order
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        (0..SPELLS_PER_REALM).filter(move |&i| self.contains(i))
    }
}

impl FromIterator<usize> for AbilitySet {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        let mut set = Self::empty();
        for i in iter {
            set.insert(i);
        }
        set
    }
}

/// Proficiency rank of a spell
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display, EnumIter,
)]
pub enum ProficiencyRank {
    Unskilled,
    Beginner,
    Skilled,
    Expert,
    Master,
}

impl ProficiencyRank {
    pub const fn from_exp(exp: i16) -> Self {
        if exp >= SPELL_EXP_MASTER {
            ProficiencyRank::Master
        } else if exp >= SPELL_EXP_EXPERT {
            ProficiencyRank::Expert
        } else if exp >= SPELL_EXP_SKILLED {
            ProficiencyRank::Skilled
        } else if exp >= SPELL_EXP_BEGINNER {
            ProficiencyRank::Beginner
        } else {
            ProficiencyRank::Unskilled
        }
    }

    /// Minimum experience of the rank
    pub const fn threshold(self) -> i16 {
        match self {
            ProficiencyRank::Unskilled => SPELL_EXP_UNSKILLED,
            ProficiencyRank::Beginner => SPELL_EXP_BEGINNER,
            ProficiencyRank::Skilled => SPELL_EXP_SKILLED,
            ProficiencyRank::Expert => SPELL_EXP_EXPERT,
            ProficiencyRank::Master => SPELL_EXP_MASTER,
        }
    }

    /// Lowercase label used in lists ("skilled")
    pub const fn label(self) -> &'static str {
        match self {
            ProficiencyRank::Unskilled => "unskilled",
            ProficiencyRank::Beginner => "beginner",
            ProficiencyRank::Skilled => "skilled",
            ProficiencyRank::Expert => "expert",
            ProficiencyRank::Master => "master",
        }
    }
}

/// Proficiency experience of one spell
///
/// Only ever moves forward; the counter saturates at Master.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpellExp(i16);

impl SpellExp {
    pub const fn new(exp: i16) -> Self {
        Self(if exp > SPELL_EXP_MASTER {
            SPELL_EXP_MASTER
        } else if exp < 0 {
            0
        } else {
            exp
        })
    }

    pub const fn value(self) -> i16 {
        self.0
    }

    pub const fn rank(self) -> ProficiencyRank {
        ProficiencyRank::from_exp(self.0)
    }

    /// Add experience, never past Master
    pub fn gain(&mut self, amount: i16) {
        if amount > 0 {
            self.0 = self.0.saturating_add(amount).min(SPELL_EXP_MASTER);
        }
    }

    /// Raise to at least `exp`; lower values are ignored
    pub fn raise_to(&mut self, exp: i16) {
        let exp = Self::new(exp).0;
        if exp > self.0 {
            self.0 = exp;
        }
    }
}

/// Which of the two realm slots a spell belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RealmSlot {
    Primary,
    Secondary,
}

/// Per-realm learning state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RealmKnowledge {
    pub learned: AbilitySet,
    pub worked: AbilitySet,
    pub forgotten: AbilitySet,
    pub exp: [SpellExp; SPELLS_PER_REALM],
}

impl RealmKnowledge {
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// A spell remembered in learning order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearnedSpell {
    pub slot: RealmSlot,
    pub spell: usize,
}

/// Everything a character knows about their realms
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpellKnowledge {
    pub primary: RealmKnowledge,
    pub secondary: RealmKnowledge,
    /// Spells in the order they were learned
    pub order: Vec<LearnedSpell>,
    /// Study sessions spent improving an already learned spell
    #[serde(default)]
    pub restudied: usize,
}

impl SpellKnowledge {
    pub fn slot(&self, slot: RealmSlot) -> &RealmKnowledge {
        match slot {
            RealmSlot::Primary => &self.primary,
            RealmSlot::Secondary => &self.secondary,
        }
    }

    pub fn slot_mut(&mut self, slot: RealmSlot) -> &mut RealmKnowledge {
        match slot {
            RealmSlot::Primary => &mut self.primary,
            RealmSlot::Secondary => &mut self.secondary,
        }
    }

    /// Record a newly learned spell. Returns false if it was already known.
    pub fn learn(&mut self, slot: RealmSlot, spell: usize) -> bool {
        let realm = self.slot_mut(slot);
        realm.forgotten.remove(spell);
        if !realm.learned.insert(spell) {
            return false;
        }
        if !self.order.contains(&LearnedSpell { slot, spell }) {
            self.order.push(LearnedSpell { slot, spell });
        }
        true
    }

    /// Spells currently learned across both slots
    pub fn learned_count(&self) -> usize {
        self.primary.learned.len() + self.secondary.learned.len()
    }

    /// Study slots used so far: learned spells plus re-studies
    pub fn studies_used(&self) -> usize {
        self.learned_count() + self.restudied
    }

    /// Move a learned spell to the forgotten set. Returns false if it was
    /// not learned.
    pub fn forget(&mut self, slot: RealmSlot, spell: usize) -> bool {
        let realm = self.slot_mut(slot);
        if !realm.learned.remove(spell) {
            return false;
        }
        realm.forgotten.insert(spell);
        true
    }

    /// Bring a forgotten spell back. Returns false if it was not forgotten.
    pub fn remember(&mut self, slot: RealmSlot, spell: usize) -> bool {
        let realm = self.slot_mut(slot);
        if !realm.forgotten.remove(spell) {
            return false;
        }
        realm.learned.insert(spell);
        true
    }

    /// Forgotten spells across both slots
    pub fn forgotten_count(&self) -> usize {
        self.primary.forgotten.len() + self.secondary.forgotten.len()
    }

    /// Drop everything about the secondary realm
    pub fn reset_secondary(&mut self) {
        self.secondary.reset();
        self.order.retain(|s| s.slot == RealmSlot::Primary);
    }
}
