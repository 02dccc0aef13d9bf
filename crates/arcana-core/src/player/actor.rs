//! The Actor aggregate
//!
//! One character record holding identity, resource pools, stats, realm
//! knowledge and status. Every command receives it by reference.

use arcana_rng::RandomSource;
use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use super::experience::{PY_MAX_EXP, exp_to_advance, level_for_exp};
use super::stats::{ADJ_MAG_MANA, Stat, Stats};
use super::{Class, Mutations, Race, Timed, TimedEffects, Virtue, Virtues};
use crate::consts::PY_MAX_LEVEL;
use crate::magic::{Realm, RealmSlot, SpellKnowledge};

bitflags! {
    /// Equipment and intrinsic modifiers that touch spellcasting
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct CastingTraits: u8 {
        /// Easier spells (-4% fail)
        const EASY_SPELL = 0x01;
        /// Cheaper spells (3/4 mana, -1% fail)
        const DEC_MANA = 0x02;
        /// Harder spells (+5% fail)
        const HEAVY_SPELL = 0x04;
        /// Wielding a weapon the class finds distasteful
        const ICKY_WIELD = 0x08;
    }
}

/// Result of recomputing the level from experience
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelChange {
    pub from: i32,
    pub to: i32,
}

impl LevelChange {
    pub const fn gained(&self) -> bool {
        self.to > self.from
    }

    pub const fn lost(&self) -> bool {
        self.to < self.from
    }
}

/// The acting character
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub name: String,
    pub class: Class,
    pub race: Race,

    pub level: i32,
    pub max_level: i32,
    pub exp: i32,
    pub max_exp: i32,

    pub hp: i32,
    pub hp_max: i32,
    pub mana: i32,
    pub mana_max: i32,

    pub stats: Stats,

    pub realm1: Option<Realm>,
    pub realm2: Option<Realm>,
    /// Realms abandoned through a realm change
    pub old_realms: Vec<Realm>,
    pub spells: SpellKnowledge,
    /// Spells that may still be learned
    pub new_spells: i32,

    pub virtues: Virtues,
    pub timed: TimedEffects,
    pub mutations: Mutations,
    pub casting: CastingTraits,

    /// Alignment: positive is good, negative is evil
    pub alignment: i32,
    pub dungeon_depth: i32,
    pub hold_exp: bool,
    pub has_light: bool,

    pub is_dead: bool,
    pub died_from: Option<String>,
}

impl Default for Actor {
    fn default() -> Self {
        Self::new("Adventurer", Class::default(), Race::default())
    }
}

impl Actor {
    pub fn new(name: impl Into<String>, class: Class, race: Race) -> Self {
        Self {
            name: name.into(),
            class,
            race,
            level: 1,
            max_level: 1,
            exp: 0,
            max_exp: 0,
            hp: 20,
            hp_max: 20,
            mana: 0,
            mana_max: 0,
            stats: Stats::default(),
            realm1: None,
            realm2: None,
            old_realms: Vec::new(),
            spells: SpellKnowledge::default(),
            new_spells: 0,
            virtues: Virtues::default(),
            timed: TimedEffects::default(),
            mutations: Mutations::empty(),
            casting: CastingTraits::empty(),
            alignment: 0,
            dungeon_depth: 0,
            hold_exp: false,
            has_light: true,
            is_dead: false,
            died_from: None,
        }
    }

    /// Combined race and class experience factor
    pub fn exp_factor(&self) -> i32 {
        self.race.exp_factor() + self.class.exp_penalty()
    }

    /// Stat used for spellcasting, if the class casts at all
    pub fn spell_stat(&self) -> Option<Stat> {
        self.class.magic().map(|m| m.stat)
    }

    pub fn is_blind(&self) -> bool {
        self.timed.is_active(Timed::Blind)
    }

    pub fn is_confused(&self) -> bool {
        self.timed.is_active(Timed::Confused)
    }

    pub fn stun(&self) -> i32 {
        i32::from(self.timed.get(Timed::Stun))
    }

    /// Reading needs both sight and light
    pub fn can_see(&self) -> bool {
        !self.is_blind() && self.has_light
    }

    /// Slot holding a realm's knowledge for this character
    pub fn slot_of(&self, realm: Realm) -> Option<RealmSlot> {
        if self.realm1 == Some(realm) {
            Some(RealmSlot::Primary)
        } else if self.realm2 == Some(realm) {
            Some(RealmSlot::Secondary)
        } else {
            None
        }
    }

    pub fn chg_virtue(&mut self, virtue: Virtue, amount: i16) {
        self.virtues.adjust(virtue, amount);
    }

    /// Lose hit points. Returns true if the blow was fatal.
    pub fn take_hit(&mut self, damage: i32, cause: &str) -> bool {
        if self.is_dead || damage <= 0 {
            return self.is_dead;
        }
        self.hp -= damage;
        if self.hp < 0 {
            self.is_dead = true;
            self.died_from = Some(cause.to_string());
            tracing::info!(name = %self.name, cause, "character died");
        }
        self.is_dead
    }

    /// Add experience and recompute the level
    pub fn gain_exp(&mut self, amount: i32) -> LevelChange {
        if amount > 0 {
            self.exp = self.exp.saturating_add(amount);
            if self.exp < self.max_exp {
                self.max_exp += amount / 10;
            }
        }
        self.check_experience()
    }

    /// Remove experience and recompute the level
    pub fn lose_exp(&mut self, amount: i32) -> LevelChange {
        let amount = amount.clamp(0, self.exp);
        self.exp -= amount;
        self.check_experience()
    }

    /// Clamp experience and bring the level in line with it
    pub fn check_experience(&mut self) -> LevelChange {
        self.exp = self.exp.clamp(0, PY_MAX_EXP);
        self.max_exp = self.max_exp.clamp(self.exp, PY_MAX_EXP);

        let from = self.level;
        let to = level_for_exp(self.exp, self.exp_factor()).min(PY_MAX_LEVEL);
        self.level = to;
        if to > self.max_level {
            self.max_level = to;
        }
        if to != from {
            self.recalc_mana_max();
            tracing::info!(name = %self.name, from, to, "level changed");
        }
        LevelChange { from, to }
    }

    /// Jump to the start of `level`, refilling mana
    pub fn set_level(&mut self, level: i32) {
        let level = level.clamp(1, PY_MAX_LEVEL);
        self.exp = exp_to_advance(level - 1, self.exp_factor()).unwrap_or(0);
        self.max_exp = self.exp;
        self.level = level;
        self.max_level = self.max_level.max(level);
        self.recalc_mana_max();
        self.mana = self.mana_max;
    }

    /// Recompute maximum mana from level and casting stat
    pub fn recalc_mana_max(&mut self) {
        let Some(magic) = self.class.magic() else {
            self.mana_max = 0;
            self.mana = 0;
            return;
        };
        let levels = (self.level - magic.first_level + 1).max(0);
        let mut msp = ADJ_MAG_MANA[self.stats.index(magic.stat)] * (levels + 3) / 4;
        if msp > 0 {
            msp += 1;
        }
        if self.casting.contains(CastingTraits::DEC_MANA) {
            msp += msp / 4;
        }
        self.mana_max = msp;
        self.mana = self.mana.min(self.mana_max);
    }

    /// Damage a stat; a permanent loss costs Sacrifice and touches wisdom
    pub fn dec_stat<R: RandomSource + ?Sized>(
        &mut self,
        stat: Stat,
        amount: i32,
        permanent: bool,
        rng: &mut R,
    ) -> bool {
        if permanent && self.stats.maximum(stat) > crate::consts::STAT_MIN {
            self.chg_virtue(Virtue::Sacrifice, 1);
            if matches!(stat, Stat::Wisdom | Stat::Intelligence) {
                self.chg_virtue(Virtue::Enlighten, -2);
            }
        }
        self.stats.decrease(stat, amount, permanent, rng)
    }
}
