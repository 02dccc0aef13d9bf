//! Player stats (STR, INT, WIS, DEX, CON, CHR)
//!
//! Values use the classic encoding: 3..=18 as-is, then 18/xx stored as
//! `18 + xx` (so 18/50 is 68 and 18/100 is 118).

use arcana_rng::RandomSource;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumCount, EnumIter, EnumString};

use crate::consts::{STAT_MAX, STAT_MIN};

/// Stat type
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumCount,
    EnumString,
)]
#[strum(ascii_case_insensitive)]
#[repr(u8)]
pub enum Stat {
    #[strum(to_string = "Str", serialize = "strength")]
    Strength = 0,
    #[strum(to_string = "Int", serialize = "intelligence")]
    Intelligence = 1,
    #[strum(to_string = "Wis", serialize = "wisdom")]
    Wisdom = 2,
    #[strum(to_string = "Dex", serialize = "dexterity")]
    Dexterity = 3,
    #[strum(to_string = "Con", serialize = "constitution")]
    Constitution = 4,
    #[strum(to_string = "Chr", serialize = "charisma")]
    Charisma = 5,
}

impl Stat {
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn short_name(self) -> &'static str {
        match self {
            Stat::Strength => "Str",
            Stat::Intelligence => "Int",
            Stat::Wisdom => "Wis",
            Stat::Dexterity => "Dex",
            Stat::Constitution => "Con",
            Stat::Charisma => "Chr",
        }
    }
}

/// Number of rows in the stat adjustment tables
pub const STAT_TABLE_SIZE: usize = 38;

/// Spell level bonus granted by the casting stat
pub const ADJ_MAG_STAT: [i32; STAT_TABLE_SIZE] = [
    0, 0, 0, 0, 0, 1, 1, 1, 1, 1, 1, 1, 2, 2, 2, // 3..=17
    3, // 18/00-18/09
    3, 3, 3, 3, 4, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20,
];

/// Minimum failure rate granted by the casting stat
pub const ADJ_MAG_FAIL: [i32; STAT_TABLE_SIZE] = [
    99, 99, 99, 99, 99, 50, 30, 20, 15, 12, 11, 10, 9, 8, 7, // 3..=17
    6, // 18/00-18/09
    6, 5, 5, 5, 4, 4, 4, 4, 3, 3, 2, 2, 2, 2, 1, 1, 1, 1, 1, 0, 0, 0,
];

/// Half-spells learned per level from the casting stat
pub const ADJ_MAG_STUDY: [i32; STAT_TABLE_SIZE] = [
    0, 0, 0, 0, 0, 1, 1, 1, 1, 1, 1, 1, 2, 2, 2, // 3..=17
    2, // 18/00-18/09
    2, 2, 2, 2, 3, 3, 3, 3, 3, 4, 4, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5,
];

/// Mana per level (in half points) from the casting stat
pub const ADJ_MAG_MANA: [i32; STAT_TABLE_SIZE] = [
    0, 0, 0, 0, 0, 1, 2, 2, 2, 2, 2, 2, 2, 2, 2, // 3..=17
    3, // 18/00-18/09
    3, 3, 3, 3, 4, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20,
];

/// Row of the adjustment tables for a stat value
pub const fn stat_index(value: i16) -> usize {
    if value <= STAT_MIN {
        0
    } else if value <= 18 {
        (value - STAT_MIN) as usize
    } else {
        let idx = 15 + ((value - 18) / 10) as usize;
        if idx >= STAT_TABLE_SIZE {
            STAT_TABLE_SIZE - 1
        } else {
            idx
        }
    }
}

/// Format a stat value for display (`18/50`, `18/100`)
pub fn format_stat(value: i16) -> String {
    if value <= 18 {
        format!("{}", value)
    } else {
        format!("18/{:02}", value - 18)
    }
}

/// Current and maximum values of the six stats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    cur: [i16; Stat::COUNT],
    max: [i16; Stat::COUNT],
}

impl Default for Stats {
    fn default() -> Self {
        Self::new([10; Stat::COUNT])
    }
}

impl Stats {
    /// Stats with current equal to maximum
    pub const fn new(values: [i16; Stat::COUNT]) -> Self {
        Self {
            cur: values,
            max: values,
        }
    }

    pub const fn current(&self, stat: Stat) -> i16 {
        self.cur[stat as usize]
    }

    pub const fn maximum(&self, stat: Stat) -> i16 {
        self.max[stat as usize]
    }

    /// Set both current and maximum
    pub fn set(&mut self, stat: Stat, value: i16) {
        let value = value.clamp(STAT_MIN, STAT_MAX);
        self.cur[stat.index()] = value;
        self.max[stat.index()] = value;
    }

    /// Table row for the current value
    pub const fn index(&self, stat: Stat) -> usize {
        stat_index(self.current(stat))
    }

    /// Reduce a stat. A permanent loss also lowers the maximum.
    ///
    /// Returns true if either value changed.
    pub fn decrease<R: RandomSource + ?Sized>(
        &mut self,
        stat: Stat,
        amount: i32,
        permanent: bool,
        rng: &mut R,
    ) -> bool {
        let i = stat.index();
        let mut changed = false;

        let cur = self.cur[i];
        if cur > STAT_MIN {
            let lowered = drain_value(cur, amount, rng);
            if lowered != cur {
                self.cur[i] = lowered;
                changed = true;
            }
        }

        let max = self.max[i];
        if permanent && max > STAT_MIN {
            let lowered = drain_value(max, amount, rng);
            if lowered != max {
                self.max[i] = lowered;
                changed = true;
            }
        }

        changed
    }

    /// Bring the current value back up to the maximum
    pub fn restore(&mut self, stat: Stat) -> bool {
        let i = stat.index();
        if self.cur[i] < self.max[i] {
            self.cur[i] = self.max[i];
            true
        } else {
            false
        }
    }
}

fn drain_value<R: RandomSource + ?Sized>(value: i16, amount: i32, rng: &mut R) -> i16 {
    let mut v = i32::from(value);
    if v <= 18 {
        if amount > 90 {
            v -= 1;
        }
        if amount > 50 {
            v -= 1;
        }
        if amount > 20 {
            v -= 1;
        }
        v -= 1;
    } else {
        let base = (((v - 18) / 2 + 1) / 2 + 1).max(1);
        let mut loss = ((rng.randint1(base as u32) as i32 + base) * amount) / 100;
        if loss < amount / 2 {
            loss = amount / 2;
        }
        v -= loss;
        if v < 18 {
            v = if amount <= 20 { 18 } else { 17 };
        }
    }
    v.max(i32::from(STAT_MIN)) as i16
}

#[cfg(test)]
mod tests {
    use super::*;
    use arcana_rng::ScriptedRng;

    #[test]
    fn test_stat_index() {
        assert_eq!(stat_index(3), 0);
        assert_eq!(stat_index(10), 7);
        assert_eq!(stat_index(18), 15);
        assert_eq!(stat_index(18 + 9), 15);
        assert_eq!(stat_index(18 + 10), 16);
        assert_eq!(stat_index(18 + 100), 25);
        assert_eq!(stat_index(STAT_MAX), STAT_TABLE_SIZE - 1);
    }

    #[test]
    fn test_format_stat() {
        assert_eq!(format_stat(16), "16");
        assert_eq!(format_stat(18 + 5), "18/05");
        assert_eq!(format_stat(18 + 100), "18/100");
    }

    #[test]
    fn test_parse_stat_names() {
        assert_eq!("con".parse::<Stat>().unwrap(), Stat::Constitution);
        assert_eq!("Int".parse::<Stat>().unwrap(), Stat::Intelligence);
        assert!("luck".parse::<Stat>().is_err());
    }

    #[test]
    fn test_decrease_low_stat() {
        let mut stats = Stats::new([16; Stat::COUNT]);
        let mut rng = ScriptedRng::default();
        assert!(stats.decrease(Stat::Constitution, 25, false, &mut rng));
        // amount > 20 costs two points
        assert_eq!(stats.current(Stat::Constitution), 14);
        assert_eq!(stats.maximum(Stat::Constitution), 16);
        assert_eq!(rng.call_count(), 0);
    }

    #[test]
    fn test_decrease_permanent_lowers_max() {
        let mut stats = Stats::new([12; Stat::COUNT]);
        let mut rng = ScriptedRng::default();
        stats.decrease(Stat::Constitution, 15, true, &mut rng);
        assert_eq!(stats.current(Stat::Constitution), 11);
        assert_eq!(stats.maximum(Stat::Constitution), 11);
    }

    #[test]
    fn test_decrease_high_stat_uses_roll() {
        // 18/50: base loss = ((50/2+1)/2+1) = 14
        let mut stats = Stats::new([68; Stat::COUNT]);
        let mut rng = ScriptedRng::new([0]);
        stats.decrease(Stat::Constitution, 20, false, &mut rng);
        // (1 + 14) * 20 / 100 = 3, below amount/2 so 10
        assert_eq!(stats.current(Stat::Constitution), 58);
        assert_eq!(rng.call_count(), 1);
    }

    #[test]
    fn test_decrease_floor() {
        let mut stats = Stats::new([3; Stat::COUNT]);
        let mut rng = ScriptedRng::default();
        assert!(!stats.decrease(Stat::Constitution, 25, true, &mut rng));
        assert_eq!(stats.current(Stat::Constitution), 3);
    }

    #[test]
    fn test_restore() {
        let mut stats = Stats::new([15; Stat::COUNT]);
        let mut rng = ScriptedRng::default();
        stats.decrease(Stat::Strength, 10, false, &mut rng);
        assert!(stats.restore(Stat::Strength));
        assert_eq!(stats.current(Stat::Strength), 15);
        assert!(!stats.restore(Stat::Strength));
    }
}
