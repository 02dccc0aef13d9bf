//! Ability math
//!
//! Mana cost, spell failure chance and racial success chance as pure
//! functions. Randomness only enters through an explicit [`RandomSource`].

use arcana_rng::RandomSource;

use crate::consts::{DEC_MANA_DIV, MANA_CONST, MANA_DIV, MAX_FAIL_CHANCE, SPELL_EXP_EXPERT};
use crate::magic::{ProficiencyRank, Realm};
use crate::player::Stat;

/// Mana actually needed for a spell of base cost `need` at proficiency `exp`
///
/// An unskilled caster pays about 1.6 times the base cost, a master a
/// little under the base cost.
pub fn mod_need_mana(need: i32, exp: i16, dec_mana: bool) -> i32 {
    let div = if dec_mana { DEC_MANA_DIV } else { MANA_DIV };
    let need = need * (MANA_CONST + i32::from(SPELL_EXP_EXPERT) - i32::from(exp));
    let need = (need + MANA_CONST - 1) * div / (MANA_CONST * MANA_DIV);
    need.max(1)
}

/// Everything the spell failure formula looks at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FailInputs {
    /// Base failure chance of the spell
    pub sfail: i32,
    /// Level of the spell
    pub slevel: i32,
    pub caster_level: i32,
    /// ADJ_MAG_STAT of the casting stat
    pub stat_bonus: i32,
    /// ADJ_MAG_FAIL of the casting stat
    pub min_fail: i32,
    /// Mana needed, after proficiency
    pub need_mana: i32,
    pub current_mana: i32,
    /// Mage or Priest casting from their second realm
    pub off_realm_penalty: bool,
    pub fail_5percent: bool,
    pub icky_wield: bool,
    pub easy_spell: bool,
    pub dec_mana: bool,
    pub heavy_spell: bool,
    /// Realm of the spell and the caster's alignment
    pub realm: Realm,
    pub alignment: i32,
    pub wisdom_caster: bool,
    pub stun: i32,
    /// Proficiency, when the spell belongs to one of the caster's realms
    pub rank: Option<ProficiencyRank>,
}

/// Failure chance of a spell, in percent
pub fn spell_fail_chance(input: &FailInputs) -> i32 {
    let mut chance = input.sfail;
    chance -= 3 * (input.caster_level - input.slevel);
    chance -= 3 * (input.stat_bonus - 1);

    if input.need_mana > input.current_mana {
        chance += 5 * (input.need_mana - input.current_mana);
    }
    if input.off_realm_penalty {
        chance += 5;
    }

    let mut min_fail = input.min_fail;
    if input.fail_5percent && min_fail < 5 {
        min_fail = 5;
    }
    if input.icky_wield {
        chance += 25;
    }
    if input.easy_spell {
        chance -= 4;
    }

    let penalty = if input.wisdom_caster { 10 } else { 4 };
    let misaligned = match input.realm {
        Realm::Nature => input.alignment.abs() > 50,
        Realm::Life | Realm::Crusade => input.alignment < -20,
        Realm::Death | Realm::Daemon => input.alignment > 20,
        _ => false,
    };
    if misaligned {
        chance += penalty;
    }

    chance = chance.max(min_fail);

    if input.stun > 50 {
        chance += 20;
    } else if input.stun > 0 {
        chance += 10;
    }

    chance = chance.min(MAX_FAIL_CHANCE);

    if let Some(rank) = input.rank {
        if rank >= ProficiencyRank::Expert {
            chance -= 1;
        }
        if rank >= ProficiencyRank::Master {
            chance -= 1;
        }
    }
    if input.dec_mana {
        chance -= 1;
    }
    if input.heavy_spell {
        chance += 5;
    }

    chance.max(0)
}

/// Inputs of the racial power success formula
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RacialInputs {
    pub min_level: i32,
    /// Difficulty of the power; zero means it cannot fail
    pub fail: i32,
    pub stat: Stat,
    /// Current value of `stat`
    pub stat_value: i16,
    pub caster_level: i32,
    pub stun: i32,
    pub confused: bool,
}

/// Chance in percent that a racial power works
pub fn racial_success_percent(input: &RacialInputs) -> i32 {
    if input.caster_level < input.min_level || input.confused {
        return 0;
    }
    if input.fail == 0 {
        return 100;
    }

    let mut difficulty = input.fail;
    if input.stun > 0 {
        difficulty += input.stun;
    } else if input.caster_level > input.min_level {
        let lev_adj = ((input.caster_level - input.min_level) / 3).min(10);
        difficulty -= lev_adj;
    }
    if difficulty < 5 {
        difficulty = 5;
    }
    difficulty /= 2;

    let stat = i32::from(input.stat_value).max(1);
    let sum: i32 = (1..=stat)
        .map(|i| (i - difficulty).clamp(0, difficulty))
        .sum();

    (sum * 100 / difficulty) / stat
}

/// Randomized racial cost: half the base, plus up to half again
pub fn racial_cost<R: RandomSource + ?Sized>(base: i32, rng: &mut R) -> i32 {
    if base <= 0 {
        return 0;
    }
    // A base of 1 still costs 1
    let half = (base / 2) as u32;
    base / 2 + (rng.randint1(half) as i32).max(1)
}

/// A percentile draw succeeds when it is not below the failure chance
pub const fn roll_succeeds(draw: i32, chance: i32) -> bool {
    draw >= chance
}
