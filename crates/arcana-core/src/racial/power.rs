//! Racial, class and mutation powers
//!
//! Every activatable power has a minimum level, a base cost, the stat that
//! drives its success and a difficulty. Some costs grow with the
//! character's level.

use serde::{Deserialize, Serialize};
use strum::EnumIter;

use crate::magic::formula::{RacialInputs, racial_success_percent};
use crate::player::Stat::{Charisma, Constitution, Dexterity, Intelligence, Strength, Wisdom};
use crate::player::{Actor, Class, Mutations, Race, Stat};
use crate::select::{Candidate, CandidateList, CandidateSource};

/// Static description of one power
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PowerDesc {
    pub name: &'static str,
    pub min_level: i32,
    /// Base cost; the paid amount is drawn from `cost/2 + 1..=cost`
    pub cost: i32,
    pub stat: Stat,
    /// Difficulty; zero never fails
    pub fail: i32,
}

const fn desc(name: &'static str, min_level: i32, cost: i32, stat: Stat, fail: i32) -> PowerDesc {
    PowerDesc {
        name,
        min_level,
        cost,
        stat,
        fail,
    }
}

/// Class and race powers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter)]
pub enum Power {
    // Class
    SwordDancing,
    EatMagic,
    BlessWeapon,
    HitAndAway,
    ProbeMonster,
    HolyLance,
    ConvertHpToSp,
    ConvertSpToHp,
    ConfusingLight,
    BerserkerRecall,
    StopSinging,
    DoubleMagic,
    // Race
    DetectDoorsTraps,
    CreateFood,
    Blink,
    RemoveFear,
    Berserk,
    ShadowShifting,
    PatternMindwalking,
    ExplosiveRune,
    StoneToMud,
    Probing,
    ThrowBoulder,
    ScareMonster,
    SpitAcid,
    PoisonDart,
    MagicMissile,
    BreathWeapon,
    MindBlast,
    FireBolt,
    StoneSkin,
    RestoreLife,
    DrainLife,
    SleepingDust,
}

impl Power {
    /// Description at a given character level
    pub const fn desc(self, level: i32) -> PowerDesc {
        let scaled = if level > 1 { level } else { 1 };
        match self {
            Power::SwordDancing => desc("Sword Dancing", 40, 75, Dexterity, 35),
            Power::EatMagic => desc("Eat Magic", 25, 1, Intelligence, 25),
            Power::BlessWeapon => desc("Bless Weapon", 35, 70, Wisdom, 50),
            Power::HitAndAway => desc("Hit and Away", 8, 12, Dexterity, 14),
            Power::ProbeMonster => desc("Probe Monster", 15, 20, Intelligence, 12),
            Power::HolyLance => desc("Holy Lance", 30, 30, Wisdom, 30),
            Power::ConvertHpToSp => desc("Convert HP to SP", 25, 0, Intelligence, 10),
            Power::ConvertSpToHp => desc("Convert SP to HP", 25, 0, Intelligence, 10),
            Power::ConfusingLight => desc("Confusing Light", 40, 50, Intelligence, 25),
            Power::BerserkerRecall => desc("Recall", 10, 10, Strength, 20),
            Power::StopSinging => desc("Stop Singing", 1, 0, Charisma, 0),
            Power::DoubleMagic => desc("Double Magic", 48, 20, Intelligence, 0),
            Power::DetectDoorsTraps => desc("Detect Doors+Traps", 5, 5, Wisdom, 12),
            Power::CreateFood => desc("Create Food", 15, 10, Intelligence, 10),
            Power::Blink => desc("Blink", 5, 5, Intelligence, 12),
            Power::RemoveFear => desc("Remove Fear", 3, 5, Wisdom, 8),
            Power::Berserk => desc("Berserk", 10, 12, Strength, 12),
            Power::ShadowShifting => desc("Shadow Shifting", 30, 50, Intelligence, 50),
            Power::PatternMindwalking => desc("Pattern Mindwalking", 40, 75, Wisdom, 50),
            Power::ExplosiveRune => desc("Explosive Rune", 25, 35, Intelligence, 15),
            Power::StoneToMud => desc("Stone to Mud", 20, 10, Strength, 12),
            Power::Probing => desc("Probing", 15, 10, Intelligence, 12),
            Power::ThrowBoulder => desc("Throw Boulder", 20, 15, Strength, 12),
            Power::ScareMonster => desc("Scare Monster", 15, 15, Wisdom, 10),
            Power::SpitAcid => desc("Spit Acid", 9, 9, Dexterity, 14),
            Power::PoisonDart => desc("Poison Dart", 12, 8, Dexterity, 14),
            Power::MagicMissile => desc("Magic Missile", 2, 2, Intelligence, 9),
            Power::BreathWeapon => desc("Breath Weapon", 1, scaled, Constitution, 12),
            Power::MindBlast => desc("Mind Blast", 15, 12, Intelligence, 14),
            Power::FireBolt => desc("Fire Bolt", 9, 15, Wisdom, 15),
            Power::StoneSkin => desc("Stone Skin", 20, 15, Constitution, 8),
            Power::RestoreLife => desc("Restore Life", 30, 30, Wisdom, 18),
            Power::DrainLife => desc("Drain Life", 2, 1 + level / 3, Constitution, 9),
            Power::SleepingDust => desc("Sleeping Dust", 12, 12, Intelligence, 15),
        }
    }
}

/// Powers a class grants
pub const fn class_powers(class: Class) -> &'static [Power] {
    match class {
        Class::Warrior => &[Power::SwordDancing],
        Class::Mage | Class::HighMage => &[Power::EatMagic],
        Class::Priest => &[Power::BlessWeapon],
        Class::Rogue => &[Power::HitAndAway],
        Class::Ranger => &[Power::ProbeMonster],
        Class::Paladin => &[Power::HolyLance],
        Class::WarriorMage => &[Power::ConvertHpToSp, Power::ConvertSpToHp],
        Class::ChaosWarrior => &[Power::ConfusingLight],
        Class::Berserker => &[Power::BerserkerRecall],
        Class::Bard => &[Power::StopSinging],
        Class::Sorcerer => &[],
        Class::RedMage => &[Power::DoubleMagic],
    }
}

/// Powers a race grants
pub const fn race_powers(race: Race) -> &'static [Power] {
    match race {
        Race::Human | Race::HalfElf | Race::Elf | Race::HighElf => &[],
        Race::Dwarf | Race::Nibelung => &[Power::DetectDoorsTraps],
        Race::Hobbit => &[Power::CreateFood],
        Race::Gnome => &[Power::Blink],
        Race::HalfOrc => &[Power::RemoveFear],
        Race::HalfTroll | Race::Barbarian => &[Power::Berserk],
        Race::Amberite => &[Power::ShadowShifting, Power::PatternMindwalking],
        Race::HalfOgre => &[Power::ExplosiveRune],
        Race::HalfGiant => &[Power::StoneToMud],
        Race::HalfTitan => &[Power::Probing],
        Race::Cyclops => &[Power::ThrowBoulder],
        Race::Yeek | Race::Spectre => &[Power::ScareMonster],
        Race::Klackon => &[Power::SpitAcid],
        Race::Kobold => &[Power::PoisonDart],
        Race::DarkElf => &[Power::MagicMissile],
        Race::Draconian => &[Power::BreathWeapon],
        Race::MindFlayer => &[Power::MindBlast],
        Race::Imp => &[Power::FireBolt],
        Race::Golem => &[Power::StoneSkin],
        Race::Skeleton | Race::Zombie => &[Power::RestoreLife],
        Race::Vampire => &[Power::DrainLife],
        Race::Sprite => &[Power::SleepingDust],
    }
}

/// Powers granted by mutations. Costs of zero are set from the level.
const MUTATION_POWERS: [(Mutations, PowerDesc); 32] = [
    (Mutations::SPIT_ACID, desc("Spit Acid", 9, 9, Dexterity, 15)),
    (Mutations::BR_FIRE, desc("Fire Breath", 20, 0, Constitution, 18)),
    (Mutations::HYPN_GAZE, desc("Hypnotic Gaze", 12, 12, Charisma, 18)),
    (Mutations::TELEKINES, desc("Telekinesis", 9, 9, Wisdom, 14)),
    (Mutations::VTELEPORT, desc("Teleport", 7, 7, Wisdom, 15)),
    (Mutations::MIND_BLST, desc("Mind Blast", 5, 3, Wisdom, 15)),
    (Mutations::RADIATION, desc("Emit Radiation", 15, 15, Constitution, 14)),
    (Mutations::VAMPIRISM, desc("Vampiric Drain", 2, 0, Constitution, 9)),
    (Mutations::SMELL_MET, desc("Smell Metal", 3, 2, Intelligence, 12)),
    (Mutations::SMELL_MON, desc("Smell Monsters", 5, 4, Intelligence, 15)),
    (Mutations::BLINK, desc("Blink", 3, 3, Wisdom, 12)),
    (Mutations::EAT_ROCK, desc("Eat Rock", 8, 12, Constitution, 18)),
    (Mutations::SWAP_POS, desc("Swap Position", 15, 12, Dexterity, 16)),
    (Mutations::SHRIEK, desc("Shriek", 20, 14, Constitution, 16)),
    (Mutations::ILLUMINE, desc("Illuminate", 3, 2, Intelligence, 10)),
    (Mutations::DET_CURSE, desc("Detect Curses", 7, 14, Wisdom, 14)),
    (Mutations::BERSERK, desc("Berserk", 8, 8, Strength, 14)),
    (Mutations::POLYMORPH, desc("Polymorph", 18, 20, Constitution, 18)),
    (Mutations::MIDAS_TCH, desc("Midas Touch", 10, 5, Intelligence, 12)),
    (Mutations::GROW_MOLD, desc("Grow Mold", 1, 6, Constitution, 14)),
    (Mutations::RESIST, desc("Resist Elements", 10, 12, Constitution, 12)),
    (Mutations::EARTHQUAKE, desc("Earthquake", 12, 12, Strength, 16)),
    (Mutations::EAT_MAGIC, desc("Eat Magic", 17, 1, Wisdom, 15)),
    (Mutations::WEIGH_MAG, desc("Weigh Magic", 6, 6, Intelligence, 10)),
    (Mutations::STERILITY, desc("Sterilize", 12, 23, Charisma, 15)),
    (Mutations::PANIC_HIT, desc("Panic Hit", 10, 12, Dexterity, 14)),
    (Mutations::DAZZLE, desc("Dazzle", 7, 15, Charisma, 8)),
    (Mutations::LASER_EYE, desc("Laser Eye", 7, 10, Wisdom, 9)),
    (Mutations::RECALL, desc("Recall", 17, 50, Intelligence, 16)),
    (Mutations::BANISH, desc("Banish Evil", 25, 25, Wisdom, 18)),
    (Mutations::COLD_TOUCH, desc("Cold Touch", 2, 2, Constitution, 11)),
    (Mutations::LAUNCHER, desc("Throw Object", 1, 0, Strength, 6)),
];

/// Description of the power granted by a single mutation flag
pub fn mutation_desc(mutation: Mutations, level: i32) -> Option<PowerDesc> {
    let mut d = MUTATION_POWERS
        .iter()
        .find(|(m, _)| *m == mutation)
        .map(|&(_, d)| d)?;
    if mutation == Mutations::BR_FIRE || mutation == Mutations::LAUNCHER {
        d.cost = level.max(1);
    } else if mutation == Mutations::VAMPIRISM {
        d.cost = 1 + level / 3;
    }
    Some(d)
}

/// Description of whatever a candidate activates
pub fn source_desc(source: CandidateSource, level: i32) -> Option<PowerDesc> {
    match source {
        CandidateSource::Racial { power } => Some(power.desc(level)),
        CandidateSource::Mutation { mutation } => mutation_desc(mutation, level),
        CandidateSource::Spell { .. } => None,
    }
}

/// Success chance of a power for this character, in percent
pub fn power_success(actor: &Actor, desc: &PowerDesc) -> i32 {
    racial_success_percent(&RacialInputs {
        min_level: desc.min_level,
        fail: desc.fail,
        stat: desc.stat,
        stat_value: actor.stats.current(desc.stat),
        caster_level: actor.level,
        stun: actor.stun(),
        confused: actor.is_confused(),
    })
}

fn power_candidate(actor: &Actor, id: usize, d: PowerDesc, source: CandidateSource) -> Candidate {
    Candidate {
        id,
        name: d.name.to_string(),
        min_level: d.min_level,
        cost: d.cost,
        fail: 100 - power_success(actor, &d),
        eligible: actor.level >= d.min_level,
        note: None,
        source,
    }
}

/// Class powers, then race powers, then active mutations
pub fn power_candidates(actor: &Actor) -> CandidateList {
    let innate = class_powers(actor.class)
        .iter()
        .chain(race_powers(actor.race))
        .map(|&power| {
            (
                power.desc(actor.level),
                CandidateSource::Racial { power },
            )
        });
    let mutations = actor.mutations.iter().filter_map(|mutation| {
        mutation_desc(mutation, actor.level).map(|d| (d, CandidateSource::Mutation { mutation }))
    });
    innate
        .chain(mutations)
        .enumerate()
        .map(|(id, (d, source))| power_candidate(actor, id, d, source))
        .collect()
}
