//! Virtue counters

use serde::{Deserialize, Serialize};
use strum::{Display, EnumCount, EnumIter};

use crate::consts::VIRTUE_MAX;

/// Narrative virtue nudged by the player's deeds
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, EnumCount,
)]
pub enum Virtue {
    Compassion,
    Honour,
    Justice,
    Sacrifice,
    Knowledge,
    Faith,
    Enlighten,
    Enchant,
    Chance,
    Nature,
    Harmony,
    Vitality,
    Unlife,
    Patience,
    Temperance,
    Diligence,
    Valour,
    Individualism,
}

/// All virtue counters of one character
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Virtues {
    values: [i16; Virtue::COUNT],
}

impl Virtues {
    pub fn get(&self, virtue: Virtue) -> i16 {
        self.values[virtue as usize]
    }

    /// Adjust a virtue, clamped to +/- 1000
    pub fn adjust(&mut self, virtue: Virtue, amount: i16) {
        let slot = &mut self.values[virtue as usize];
        *slot = slot.saturating_add(amount).clamp(-VIRTUE_MAX, VIRTUE_MAX);
    }
}
