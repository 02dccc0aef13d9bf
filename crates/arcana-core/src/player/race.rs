//! Player races

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Player race
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum Race {
    #[default]
    Human,
    #[strum(to_string = "Half-Elf", serialize = "HalfElf")]
    HalfElf,
    Elf,
    Hobbit,
    Gnome,
    Dwarf,
    #[strum(to_string = "Half-Orc", serialize = "HalfOrc")]
    HalfOrc,
    #[strum(to_string = "Half-Troll", serialize = "HalfTroll")]
    HalfTroll,
    Amberite,
    #[strum(to_string = "High-Elf", serialize = "HighElf")]
    HighElf,
    Barbarian,
    #[strum(to_string = "Half-Ogre", serialize = "HalfOgre")]
    HalfOgre,
    #[strum(to_string = "Half-Giant", serialize = "HalfGiant")]
    HalfGiant,
    #[strum(to_string = "Half-Titan", serialize = "HalfTitan")]
    HalfTitan,
    Cyclops,
    Yeek,
    Klackon,
    Kobold,
    Nibelung,
    #[strum(to_string = "Dark-Elf", serialize = "DarkElf")]
    DarkElf,
    Draconian,
    #[strum(to_string = "Mind-Flayer", serialize = "MindFlayer")]
    MindFlayer,
    Imp,
    Golem,
    Skeleton,
    Zombie,
    Vampire,
    Spectre,
    Sprite,
}

impl Race {
    /// Experience factor in percent
    pub const fn exp_factor(self) -> i32 {
        match self {
            Race::Human => 100,
            Race::HalfElf => 110,
            Race::Elf => 120,
            Race::Hobbit => 110,
            Race::Gnome => 125,
            Race::Dwarf => 120,
            Race::HalfOrc => 110,
            Race::HalfTroll => 125,
            Race::Amberite => 225,
            Race::HighElf => 200,
            Race::Barbarian => 120,
            Race::HalfOgre => 130,
            Race::HalfGiant => 150,
            Race::HalfTitan => 255,
            Race::Cyclops => 155,
            Race::Yeek => 50,
            Race::Klackon => 135,
            Race::Kobold => 125,
            Race::Nibelung => 120,
            Race::DarkElf => 150,
            Race::Draconian => 220,
            Race::MindFlayer => 140,
            Race::Imp => 110,
            Race::Golem => 200,
            Race::Skeleton => 145,
            Race::Zombie => 150,
            Race::Vampire => 200,
            Race::Spectre => 180,
            Race::Sprite => 175,
        }
    }

    /// Undead races keep their memories against draining
    pub const fn is_undead(self) -> bool {
        matches!(
            self,
            Race::Skeleton | Race::Zombie | Race::Vampire | Race::Spectre
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_exp_factors_positive() {
        assert!(Race::iter().all(|r| r.exp_factor() >= 50));
    }

    #[test]
    fn test_parse_race() {
        assert_eq!("half-troll".parse::<Race>().unwrap(), Race::HalfTroll);
        assert_eq!("Yeek".parse::<Race>().unwrap(), Race::Yeek);
        assert_eq!(Race::MindFlayer.to_string(), "Mind-Flayer");
    }
}
