//! Timed status effects

use serde::{Deserialize, Serialize};
use strum::{Display, EnumCount, EnumIter};

/// A status effect that counts down each game turn
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, EnumCount,
)]
pub enum Timed {
    Paralyzed,
    Confused,
    Blind,
    Stun,
    Afraid,
    Poisoned,
    Cut,
    Hero,
    Shero,
    Fast,
    StoneSkin,
    Blessed,
    ResistFire,
    ResistCold,
    ResistAcid,
    ResistElec,
    ResistPoison,
}

/// Remaining durations of every timed effect
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimedEffects {
    turns: [i16; Timed::COUNT],
}

impl TimedEffects {
    pub fn get(&self, effect: Timed) -> i16 {
        self.turns[effect as usize]
    }

    pub fn is_active(&self, effect: Timed) -> bool {
        self.get(effect) > 0
    }

    /// Set a duration. Returns true if the effect switched on or off.
    pub fn set(&mut self, effect: Timed, turns: i16) -> bool {
        let turns = turns.max(0);
        let was = self.is_active(effect);
        self.turns[effect as usize] = turns;
        was != (turns > 0)
    }

    /// Extend a duration
    pub fn add(&mut self, effect: Timed, turns: i16) -> bool {
        self.set(effect, self.get(effect).saturating_add(turns))
    }

    /// Count every effect down by one turn
    pub fn tick(&mut self) {
        for t in self.turns.iter_mut() {
            if *t > 0 {
                *t -= 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_reports_transitions() {
        let mut t = TimedEffects::default();
        assert!(t.set(Timed::Confused, 5));
        assert!(!t.set(Timed::Confused, 3));
        assert!(t.set(Timed::Confused, 0));
        assert!(!t.is_active(Timed::Confused));
    }

    #[test]
    fn test_add_and_tick() {
        let mut t = TimedEffects::default();
        t.add(Timed::Paralyzed, 2);
        t.add(Timed::Paralyzed, 3);
        assert_eq!(t.get(Timed::Paralyzed), 5);
        t.tick();
        assert_eq!(t.get(Timed::Paralyzed), 4);
    }

    #[test]
    fn test_negative_clamped() {
        let mut t = TimedEffects::default();
        t.set(Timed::Stun, -4);
        assert_eq!(t.get(Timed::Stun), 0);
    }
}
