//! Character classes and their spellcasting rules

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use super::{Stat, Virtue};
use crate::magic::Realm;

/// What a class calls its spells, and how it reads them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum SpellKind {
    #[strum(serialize = "spell")]
    Spell,
    #[strum(serialize = "prayer")]
    Prayer,
    #[strum(serialize = "song")]
    Song,
}

impl SpellKind {
    /// Noun used in prompts ("spell", "prayer", "song")
    pub const fn noun(self) -> &'static str {
        match self {
            SpellKind::Spell => "spell",
            SpellKind::Prayer => "prayer",
            SpellKind::Song => "song",
        }
    }

    /// Verb used in prompts and refusals
    pub const fn verb(self) -> &'static str {
        match self {
            SpellKind::Prayer => "recite",
            _ => "cast",
        }
    }

    /// Virtue raised by studying: prayer casters gain Faith, the rest Knowledge
    pub const fn study_virtue(self) -> Virtue {
        match self {
            SpellKind::Prayer => Virtue::Faith,
            _ => Virtue::Knowledge,
        }
    }
}

bitflags! {
    /// Extra casting properties of a class
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct MagicFlags: u8 {
        /// Gloves hamper casting
        const GLOVE_REDUCE_MANA = 0x01;
        /// Fail chance never drops below 5%
        const FAIL_5PERCENT = 0x02;
        /// Spells gain proficiency through use
        const GAIN_EXP = 0x04;
    }
}

/// How far into the spell lists a class reaches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum CasterTier {
    Full,
    Half,
    Minor,
}

/// Static spellcasting description of a class
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassMagic {
    pub kind: SpellKind,
    /// Stat driving fail rates, mana and spells learned
    pub stat: Stat,
    pub flags: MagicFlags,
    pub tier: CasterTier,
    /// Level at which the first spell becomes available
    pub first_level: i32,
    pub realm1_choices: &'static [Realm],
    pub realm2_choices: &'static [Realm],
}

const MAGE_REALMS: &[Realm] = &[
    Realm::Sorcery,
    Realm::Nature,
    Realm::Chaos,
    Realm::Death,
    Realm::Arcane,
    Realm::Daemon,
];

const DIVINE_REALMS: &[Realm] = &[Realm::Life, Realm::Death, Realm::Daemon, Realm::Crusade];

const ALL_MAGIC_REALMS: &[Realm] = &[
    Realm::Life,
    Realm::Sorcery,
    Realm::Nature,
    Realm::Chaos,
    Realm::Death,
    Realm::Arcane,
    Realm::Daemon,
    Realm::Crusade,
];

/// Character class
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
pub enum Class {
    #[default]
    Warrior,
    Mage,
    Priest,
    Rogue,
    Ranger,
    Paladin,
    #[strum(to_string = "Warrior-Mage", serialize = "WarriorMage")]
    WarriorMage,
    #[strum(to_string = "Chaos-Warrior", serialize = "ChaosWarrior")]
    ChaosWarrior,
    #[strum(to_string = "High-Mage", serialize = "HighMage")]
    HighMage,
    Berserker,
    Bard,
    Sorcerer,
    #[strum(to_string = "Red-Mage", serialize = "RedMage")]
    RedMage,
}

impl Class {
    /// Spellcasting rules, or None for classes that cannot read books
    pub const fn magic(self) -> Option<ClassMagic> {
        use CasterTier::*;
        let gain = MagicFlags::GAIN_EXP;
        let magic = match self {
            Class::Warrior | Class::Berserker => return None,
            Class::Mage => ClassMagic {
                kind: SpellKind::Spell,
                stat: Stat::Intelligence,
                flags: MagicFlags::GLOVE_REDUCE_MANA
                    .union(MagicFlags::FAIL_5PERCENT)
                    .union(gain),
                tier: Full,
                first_level: 1,
                realm1_choices: MAGE_REALMS,
                realm2_choices: MAGE_REALMS,
            },
            Class::Priest => ClassMagic {
                kind: SpellKind::Prayer,
                stat: Stat::Wisdom,
                flags: gain,
                tier: Full,
                first_level: 1,
                realm1_choices: DIVINE_REALMS,
                realm2_choices: ALL_MAGIC_REALMS,
            },
            Class::Rogue => ClassMagic {
                kind: SpellKind::Spell,
                stat: Stat::Intelligence,
                flags: gain,
                tier: Minor,
                first_level: 5,
                realm1_choices: &[Realm::Sorcery, Realm::Death, Realm::Arcane],
                realm2_choices: &[],
            },
            Class::Ranger => ClassMagic {
                kind: SpellKind::Spell,
                stat: Stat::Intelligence,
                flags: gain,
                tier: Half,
                first_level: 3,
                realm1_choices: &[Realm::Nature],
                realm2_choices: &[
                    Realm::Sorcery,
                    Realm::Chaos,
                    Realm::Death,
                    Realm::Arcane,
                    Realm::Daemon,
                ],
            },
            Class::Paladin => ClassMagic {
                kind: SpellKind::Prayer,
                stat: Stat::Wisdom,
                flags: gain,
                tier: Half,
                first_level: 1,
                realm1_choices: DIVINE_REALMS,
                realm2_choices: &[],
            },
            Class::WarriorMage => ClassMagic {
                kind: SpellKind::Spell,
                stat: Stat::Intelligence,
                flags: gain,
                tier: Half,
                first_level: 1,
                realm1_choices: &[Realm::Arcane],
                realm2_choices: &[
                    Realm::Life,
                    Realm::Sorcery,
                    Realm::Nature,
                    Realm::Chaos,
                    Realm::Death,
                    Realm::Daemon,
                    Realm::Crusade,
                ],
            },
            Class::ChaosWarrior => ClassMagic {
                kind: SpellKind::Spell,
                stat: Stat::Intelligence,
                flags: gain,
                tier: Half,
                first_level: 2,
                realm1_choices: &[Realm::Chaos, Realm::Daemon],
                realm2_choices: &[],
            },
            Class::HighMage => ClassMagic {
                kind: SpellKind::Spell,
                stat: Stat::Intelligence,
                flags: MagicFlags::GLOVE_REDUCE_MANA
                    .union(MagicFlags::FAIL_5PERCENT)
                    .union(gain),
                tier: Full,
                first_level: 1,
                realm1_choices: ALL_MAGIC_REALMS,
                realm2_choices: &[],
            },
            Class::Bard => ClassMagic {
                kind: SpellKind::Song,
                stat: Stat::Charisma,
                flags: gain,
                tier: Full,
                first_level: 1,
                realm1_choices: &[Realm::Music],
                realm2_choices: &[],
            },
            Class::Sorcerer => ClassMagic {
                kind: SpellKind::Spell,
                stat: Stat::Intelligence,
                flags: MagicFlags::GLOVE_REDUCE_MANA.union(MagicFlags::FAIL_5PERCENT),
                tier: Full,
                first_level: 1,
                realm1_choices: &[],
                realm2_choices: &[],
            },
            Class::RedMage => ClassMagic {
                kind: SpellKind::Spell,
                stat: Stat::Intelligence,
                flags: MagicFlags::empty(),
                tier: Half,
                first_level: 1,
                realm1_choices: &[],
                realm2_choices: &[],
            },
        };
        Some(magic)
    }

    /// Casters who use every magic realm without studying
    pub const fn is_hybrid(self) -> bool {
        matches!(self, Class::Sorcerer | Class::RedMage)
    }

    /// Experience penalty percentage added to the race factor
    pub const fn exp_penalty(self) -> i32 {
        match self {
            Class::Warrior => 0,
            Class::Mage => 30,
            Class::Priest => 20,
            Class::Rogue => 25,
            Class::Ranger => 30,
            Class::Paladin => 35,
            Class::WarriorMage => 50,
            Class::ChaosWarrior => 40,
            Class::HighMage => 30,
            Class::Berserker => 10,
            Class::Bard => 40,
            Class::Sorcerer => 65,
            Class::RedMage => 40,
        }
    }

    /// Whether `realm` may be chosen as the first realm
    pub fn allows_realm1(self, realm: Realm) -> bool {
        self.magic()
            .is_some_and(|m| m.realm1_choices.contains(&realm))
    }

    /// Whether `realm` may be paired with `realm1` as the second realm
    pub fn allows_realm2(self, realm1: Realm, realm: Realm) -> bool {
        if realm == realm1 {
            return false;
        }
        let Some(magic) = self.magic() else {
            return false;
        };
        if !magic.realm2_choices.contains(&realm) {
            return false;
        }
        if self == Class::Priest {
            // A priest may not serve gods of both light and darkness
            if realm1.is_good() && realm.is_evil() || realm1.is_evil() && realm.is_good() {
                return false;
            }
        }
        true
    }
}
