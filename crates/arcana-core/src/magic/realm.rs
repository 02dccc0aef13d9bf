//! Magic realms and their virtue leanings

use serde::{Deserialize, Serialize};
use strum::{Display, EnumCount, EnumIter, EnumString};

use crate::player::Virtue;

/// Realm of magic
///
/// Discriminants follow the classic realm numbering so save files and
/// book identifiers stay stable.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumCount,
    EnumString,
)]
#[strum(ascii_case_insensitive)]
#[repr(u8)]
pub enum Realm {
    Life = 1,
    Sorcery = 2,
    Nature = 3,
    Chaos = 4,
    Death = 5,
    Arcane = 7,
    Daemon = 9,
    Crusade = 10,
    Music = 16,
}

impl Realm {
    pub const fn id(self) -> u8 {
        self as u8
    }

    /// Spell realms, as opposed to technique realms
    pub const fn is_magic(self) -> bool {
        !matches!(self, Realm::Music)
    }

    /// Realms of the light gods
    pub const fn is_good(self) -> bool {
        matches!(self, Realm::Life | Realm::Crusade)
    }

    /// Realms of the dark gods
    pub const fn is_evil(self) -> bool {
        matches!(self, Realm::Death | Realm::Daemon)
    }

    /// Virtue nudged when a spell of this realm fails
    pub const fn fail_virtue(self) -> (Virtue, i16) {
        match self {
            Realm::Life => (Virtue::Vitality, -1),
            Realm::Death => (Virtue::Unlife, -1),
            Realm::Nature => (Virtue::Nature, -1),
            Realm::Daemon => (Virtue::Justice, 1),
            Realm::Crusade => (Virtue::Justice, -1),
            _ => (Virtue::Knowledge, -1),
        }
    }

    /// Virtue hit taken when fainting from an overexerted cast
    pub const fn overexert_virtue(self) -> (Virtue, i16) {
        let (virtue, amount) = self.fail_virtue();
        (virtue, amount * 10)
    }

    /// Virtues adjusted the first time a spell of this realm works
    pub const fn first_cast_virtues(self) -> &'static [(Virtue, i16)] {
        match self {
            Realm::Life => &[
                (Virtue::Temperance, 1),
                (Virtue::Compassion, 1),
                (Virtue::Vitality, 1),
                (Virtue::Diligence, 1),
            ],
            Realm::Death => &[
                (Virtue::Unlife, 1),
                (Virtue::Justice, -1),
                (Virtue::Faith, -1),
                (Virtue::Vitality, -1),
            ],
            Realm::Daemon => &[
                (Virtue::Justice, -1),
                (Virtue::Faith, -1),
                (Virtue::Honour, -1),
                (Virtue::Temperance, -1),
            ],
            Realm::Crusade => &[
                (Virtue::Faith, 1),
                (Virtue::Justice, 1),
                (Virtue::Sacrifice, 1),
                (Virtue::Honour, 1),
            ],
            Realm::Nature => &[(Virtue::Nature, 1), (Virtue::Harmony, 1)],
            _ => &[(Virtue::Knowledge, 1)],
        }
    }

    /// Virtues rolled on every successful cast, weighted by mana spent
    pub const fn mana_virtues(self) -> &'static [(Virtue, i16)] {
        match self {
            Realm::Life | Realm::Death | Realm::Daemon | Realm::Crusade | Realm::Nature => {
                self.first_cast_virtues()
            }
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_only_music_is_technique() {
        let techniques: Vec<_> = Realm::iter().filter(|r| !r.is_magic()).collect();
        assert_eq!(techniques, vec![Realm::Music]);
    }

    #[test]
    fn test_parse_realm() {
        assert_eq!("chaos".parse::<Realm>().unwrap(), Realm::Chaos);
        assert_eq!("Crusade".parse::<Realm>().unwrap(), Realm::Crusade);
        assert!("trump".parse::<Realm>().is_err());
    }

    #[test]
    fn test_overexert_virtue_scales_fail_virtue() {
        assert_eq!(Realm::Daemon.overexert_virtue(), (Virtue::Justice, 10));
        assert_eq!(Realm::Arcane.overexert_virtue(), (Virtue::Knowledge, -10));
        assert_eq!(Realm::Life.overexert_virtue(), (Virtue::Vitality, -10));
    }

    #[test]
    fn test_mana_virtues() {
        assert_eq!(Realm::Nature.mana_virtues().len(), 2);
        assert!(Realm::Sorcery.mana_virtues().is_empty());
        assert_eq!(Realm::Sorcery.first_cast_virtues(), &[(Virtue::Knowledge, 1)]);
    }
}
