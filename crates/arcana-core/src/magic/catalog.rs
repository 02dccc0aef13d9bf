//! Spell catalog
//!
//! The catalog answers "what is spell N of realm R" for the engine: name,
//! level/mana/fail/exp numbers for a class, a description, and the effect
//! itself. [`StandardCatalog`] carries the built-in tables; tests and front
//! ends may supply their own [`SpellCatalog`].

use arcana_rng::RandomSource;
use strum::Display;

use super::Realm;
use crate::consts::{MAX_FAIL_CHANCE, PY_MAX_LEVEL, SPELL_LEVEL_NEVER, SPELLS_PER_REALM};
use crate::io::{Terminal, get_aim_dir};
use crate::player::{Actor, CasterTier, Class, Stat, Timed};

/// Casting numbers of one spell for one class
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpellInfo {
    /// Level needed to learn and cast
    pub slevel: i32,
    /// Base mana cost
    pub smana: i32,
    /// Base failure chance
    pub sfail: i32,
    /// Experience factor for the first successful cast
    pub sexp: i32,
}

impl SpellInfo {
    /// Placeholder for spells a class can never use
    pub const NEVER: SpellInfo = SpellInfo {
        slevel: SPELL_LEVEL_NEVER,
        smana: 0,
        sfail: 0,
        sexp: 0,
    };
}

/// Whether an effect ran or the player backed out of it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectStatus {
    Done,
    Cancelled,
}

/// Everything an effect may touch
pub struct EffectContext<'a> {
    pub actor: &'a mut Actor,
    pub rng: &'a mut dyn RandomSource,
    pub term: &'a mut dyn Terminal,
    pub messages: &'a mut Vec<String>,
}

impl EffectContext<'_> {
    /// Show a message and keep it for the command report
    pub fn msg(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.term.message(&text);
        self.messages.push(text);
    }
}

/// Source of spell data and effects
pub trait SpellCatalog {
    /// Casting numbers of a spell for a class
    fn info(&self, class: Class, realm: Realm, spell: usize) -> SpellInfo;

    fn name(&self, realm: Realm, spell: usize) -> String;

    /// Free text shown when browsing
    fn description(&self, actor: &Actor, realm: Realm, spell: usize) -> String;

    /// Run the spell
    fn cast(&self, ctx: &mut EffectContext<'_>, realm: Realm, spell: usize) -> EffectStatus;

    /// Side effect of a failed cast
    fn miscast(&self, _ctx: &mut EffectContext<'_>, _realm: Realm, _spell: usize) {}
}

/// Damage type of attack spells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Element {
    Missile,
    Acid,
    Lightning,
    Fire,
    Frost,
    Poison,
    Light,
    Darkness,
    Nether,
    Chaos,
    Plasma,
    Mana,
    Holy,
    Sound,
    Force,
    Gravity,
    Disintegration,
    Meteor,
    Water,
    Hellfire,
}

/// What a built-in spell does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Aimed bolt of `dice + level / 5` d `sides`
    Bolt { element: Element, dice: u32, sides: u32 },
    /// Aimed ball of `base + level * per_level`
    Ball {
        element: Element,
        base: u32,
        per_level: u32,
        radius: u32,
    },
    Heal(i32),
    Cure,
    Buff { effect: Timed, base: u32, dice: u32 },
    Detect(&'static str),
    Teleport(u32),
    Nourish,
    RestoreLife,
    RestoreStats,
    /// Aimed effect that only reports what happened
    Aimed(&'static str),
    /// Untargeted effect that only reports what happened
    Utility(&'static str),
}

impl Effect {
    /// One-line summary of the effect at a given level
    pub fn describe(&self, level: i32) -> String {
        let level = level.max(1) as u32;
        match *self {
            Effect::Bolt {
                element,
                dice,
                sides,
            } => format!(
                "Fires a bolt of {} at a chosen direction. dam {}d{}",
                element,
                dice + level / 5,
                sides
            ),
            Effect::Ball {
                element,
                base,
                per_level,
                radius,
            } => format!(
                "Fires a ball of {} that bursts on impact. dam {} rad {}",
                element,
                base + level * per_level,
                radius
            ),
            Effect::Heal(hp) => format!("Heals cuts and {} hit points.", hp),
            Effect::Cure => "Cures blindness, confusion, stunning, poison and cuts.".to_string(),
            Effect::Buff { effect, base, dice } => {
                format!("Grants {} for {}+d{} turns.", buff_name(effect), base, dice)
            }
            Effect::Detect(what) => format!("Detects {} in the local area.", what),
            Effect::Teleport(range) => format!("Teleports the caster up to {} squares.", range),
            Effect::Nourish => "Satisfies hunger.".to_string(),
            Effect::RestoreLife => "Restores drained experience.".to_string(),
            Effect::RestoreStats => "Restores all drained stats.".to_string(),
            Effect::Aimed(text) | Effect::Utility(text) => text.to_string(),
        }
    }
}

fn buff_name(effect: Timed) -> &'static str {
    match effect {
        Timed::Hero => "heroism",
        Timed::Shero => "berserk rage",
        Timed::Fast => "haste",
        Timed::StoneSkin => "stone skin",
        Timed::Blessed => "blessing",
        Timed::ResistFire => "resistance to fire",
        Timed::ResistCold => "resistance to cold",
        Timed::ResistAcid => "resistance to acid",
        Timed::ResistElec => "resistance to lightning",
        Timed::ResistPoison => "resistance to poison",
        _ => "protection",
    }
}

fn buff_message(effect: Timed) -> &'static str {
    match effect {
        Timed::Hero => "You feel like a hero!",
        Timed::Shero => "You feel like a killing machine!",
        Timed::Fast => "You feel yourself moving faster!",
        Timed::StoneSkin => "Your skin turns to stone.",
        Timed::Blessed => "You feel righteous!",
        Timed::ResistFire => "You feel resistant to fire!",
        Timed::ResistCold => "You feel resistant to cold!",
        Timed::ResistAcid => "You feel resistant to acid!",
        Timed::ResistElec => "You feel resistant to electricity!",
        Timed::ResistPoison => "You feel resistant to poison!",
        _ => "You feel protected.",
    }
}

/// A named spell and its effect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpellDef {
    pub name: &'static str,
    pub effect: Effect,
}

const fn s(name: &'static str, effect: Effect) -> SpellDef {
    SpellDef { name, effect }
}

const fn bolt(element: Element, dice: u32, sides: u32) -> Effect {
    Effect::Bolt {
        element,
        dice,
        sides,
    }
}

const fn ball(element: Element, base: u32, per_level: u32, radius: u32) -> Effect {
    Effect::Ball {
        element,
        base,
        per_level,
        radius,
    }
}

const fn buff(effect: Timed, base: u32, dice: u32) -> Effect {
    Effect::Buff { effect, base, dice }
}

use Effect::{Aimed, Cure, Detect, Heal, Nourish, RestoreLife, RestoreStats, Teleport, Utility};
use Element as El;

const LIFE: [SpellDef; SPELLS_PER_REALM] = [
    s("Cure Light Wounds", Heal(15)),
    s("Bless", buff(Timed::Blessed, 12, 12)),
    s("Cause Light Wounds", bolt(El::Missile, 3, 8)),
    s("Call Light", Utility("You are surrounded by a white light.")),
    s("Detect Doors & Traps", Detect("doors and traps")),
    s("Cure Medium Wounds", Heal(30)),
    s("Cure", Cure),
    s("Satisfy Hunger", Nourish),
    s("Remove Curse", Utility("You feel as if someone is watching over you.")),
    s("Cause Medium Wounds", bolt(El::Missile, 8, 8)),
    s("Cure Critical Wounds", Heal(60)),
    s("Resist Heat and Cold", buff(Timed::ResistFire, 20, 20)),
    s("Sense Surroundings", Detect("the local layout")),
    s("Turn Undead", Utility("The undead around you waver.")),
    s("Healing", Heal(300)),
    s("Glyph of Warding", Utility("You inscribe a glyph of warding.")),
    s("Dispel Curse", Utility("A warm glow surrounds your belongings.")),
    s("Perception", Utility("You understand your belongings better.")),
    s("Dispel Undead", ball(El::Holy, 20, 3, 0)),
    s("Day of the Dove", Utility("A sense of peace settles over the area.")),
    s("Cause Critical Wounds", bolt(El::Missile, 5, 15)),
    s("Word of Recall", Utility("The air about you becomes charged...")),
    s("Alter Reality", Utility("The world changes!")),
    s("Warding True", Utility("Glyphs of warding surround you.")),
    s("Sterilization", Utility("You feel the life around you grow still.")),
    s("Detection", Detect("everything")),
    s("Annihilate Undead", ball(El::Holy, 50, 5, 0)),
    s("Clairvoyance", Detect("the entire level")),
    s("Restoration", RestoreStats),
    s("Healing True", Heal(2000)),
    s("Holy Vision", Utility("You know yourself a little better.")),
    s("Ultimate Resistance", buff(Timed::ResistPoison, 40, 40)),
];

const SORCERY: [SpellDef; SPELLS_PER_REALM] = [
    s("Detect Monsters", Detect("monsters")),
    s("Phase Door", Teleport(10)),
    s("Detect Doors and Traps", Detect("doors and traps")),
    s("Light Area", Utility("You are surrounded by a white light.")),
    s("Confuse Monster", Aimed("Your hands begin to glow purple.")),
    s("Teleport", Teleport(100)),
    s("Sleep Monster", Aimed("A wave of drowsiness rolls forth.")),
    s("Recharging", Utility("You channel mana into your devices.")),
    s("Magic Mapping", Detect("the local layout")),
    s("Identify", Utility("You learn more about one of your items.")),
    s("Slow Monster", Aimed("The air thickens around your target.")),
    s("Mass Sleep", Utility("A wave of drowsiness spreads from you.")),
    s("Teleport Away", Aimed("A beam of warping force streaks away.")),
    s("Haste Self", buff(Timed::Fast, 20, 20)),
    s("Detection True", Detect("everything")),
    s("Identify True", Utility("You know everything about one of your items.")),
    s("Detect Items and Treasure", Detect("objects and treasure")),
    s("Charm Monster", Aimed("You weave a charm.")),
    s("Sense Minds", Detect("nearby minds")),
    s("Teleport to Town", Utility("You are pulled toward the town.")),
    s("Self Knowledge", Utility("You know yourself a little better.")),
    s("Teleport Level", Utility("You rise up through the ceiling.")),
    s("Word of Recall", Utility("The air about you becomes charged...")),
    s("Dimension Door", Teleport(30)),
    s("Probing", Detect("the powers of nearby monsters")),
    s("Explosive Rune", Utility("You inscribe an explosive rune.")),
    s("Telekinesis", Aimed("You reach out with your mind.")),
    s("Clairvoyance", Detect("the entire level")),
    s("Charm Monsters", Utility("Your charm spreads around you.")),
    s("Alchemy", Utility("You turn an item into gold.")),
    s("Banishment", Utility("Nearby monsters are swept away.")),
    s("Globe of Invulnerability", buff(Timed::StoneSkin, 8, 8)),
];

const NATURE: [SpellDef; SPELLS_PER_REALM] = [
    s("Detect Creatures", Detect("monsters")),
    s("Lightning", bolt(El::Lightning, 3, 4)),
    s("Detect Doors and Traps", Detect("doors and traps")),
    s("Produce Food", Nourish),
    s("Daylight", Utility("You are surrounded by daylight.")),
    s("Animal Taming", Aimed("You reach out to the beast.")),
    s("Resist Environment", buff(Timed::ResistCold, 20, 20)),
    s("Cure Wounds & Poison", Heal(20)),
    s("Stone to Mud", Aimed("The wall turns into mud!")),
    s("Frost Bolt", bolt(El::Frost, 3, 8)),
    s("Nature Awareness", Detect("the local area")),
    s("Fire Bolt", bolt(El::Fire, 5, 8)),
    s("Ray of Sunlight", Aimed("A line of sunlight appears.")),
    s("Entangle", Utility("Vines rise from the ground.")),
    s("Summon Animal", Utility("An animal answers your call.")),
    s("Herbal Healing", Heal(500)),
    s("Stair Building", Utility("A staircase forms under your feet.")),
    s("Stone Skin", buff(Timed::StoneSkin, 20, 20)),
    s("Resistance True", buff(Timed::ResistAcid, 20, 20)),
    s("Forest Creation", Utility("Trees grow around you.")),
    s("Animal Friendship", Utility("The animals around you calm down.")),
    s("Stone Tell", Utility("The stones tell you their secrets.")),
    s("Wall of Stone", Utility("Stone walls rise around you.")),
    s("Protect from Corrosion", Utility("Your armour is protected from acid.")),
    s("Earthquake", Utility("The ground shakes!")),
    s("Cyclone", ball(El::Water, 25, 2, 3)),
    s("Blizzard", ball(El::Frost, 70, 1, 3)),
    s("Lightning Storm", ball(El::Lightning, 90, 1, 3)),
    s("Whirlpool", ball(El::Water, 100, 1, 3)),
    s("Call Sunlight", Utility("The sun blazes through the dungeon.")),
    s("Elemental Branding", Utility("Your weapon glows with elemental force.")),
    s("Nature's Wrath", ball(El::Force, 100, 4, 4)),
];

const CHAOS: [SpellDef; SPELLS_PER_REALM] = [
    s("Magic Missile", bolt(El::Missile, 3, 4)),
    s("Trap / Door Destruction", Utility("There is a bright flash of light!")),
    s("Flash of Light", Utility("You are surrounded by a white light.")),
    s("Touch of Confusion", Utility("Your hands start glowing.")),
    s("Mana Burst", ball(El::Missile, 3, 1, 2)),
    s("Fire Bolt", bolt(El::Fire, 8, 8)),
    s("Fist of Force", ball(El::Disintegration, 8, 1, 0)),
    s("Teleport Self", Teleport(40)),
    s("Wonder", Aimed("You invoke a random effect.")),
    s("Chaos Bolt", bolt(El::Chaos, 10, 8)),
    s("Sonic Boom", ball(El::Sound, 60, 1, 2)),
    s("Doom Bolt", bolt(El::Mana, 11, 8)),
    s("Fire Ball", ball(El::Fire, 55, 1, 2)),
    s("Teleport Other", Aimed("A beam of warping force streaks away.")),
    s("Word of Destruction", Utility("There is a searing blast of light!")),
    s("Invoke Logrus", ball(El::Chaos, 100, 2, 6)),
    s("Polymorph Other", Aimed("You twist the shape of your foe.")),
    s("Chain Lightning", Utility("Lightning arcs in every direction.")),
    s("Arcane Binding", Utility("You channel chaos into your devices.")),
    s("Disintegrate", ball(El::Disintegration, 150, 1, 3)),
    s("Alter Reality", Utility("The world changes!")),
    s("Magic Rocket", ball(El::Force, 120, 1, 2)),
    s("Chaos Branding", Utility("Your weapon is surrounded by chaos.")),
    s("Summon Demon", Utility("The area fills with a stench of sulphur.")),
    s("Beam of Gravity", bolt(El::Gravity, 9, 8)),
    s("Meteor Swarm", ball(El::Meteor, 100, 2, 2)),
    s("Flame Strike", ball(El::Fire, 300, 4, 8)),
    s("Call Chaos", ball(El::Chaos, 200, 2, 4)),
    s("Polymorph Self", Utility("Your body starts to scramble...")),
    s("Mana Storm", ball(El::Mana, 300, 4, 4)),
    s("Breathe Logrus", ball(El::Chaos, 250, 2, 2)),
    s("Call the Void", Utility("You call the void into being.")),
];

const DEATH: [SpellDef; SPELLS_PER_REALM] = [
    s("Detect Unlife", Detect("unliving creatures")),
    s("Malediction", ball(El::Darkness, 3, 1, 0)),
    s("Detect Evil", Detect("evil monsters")),
    s("Stinking Cloud", ball(El::Poison, 10, 1, 2)),
    s("Black Sleep", Aimed("A black mist envelopes your target.")),
    s("Resist Poison", buff(Timed::ResistPoison, 20, 20)),
    s("Horrify", Aimed("You emanate an aura of dread.")),
    s("Enslave Undead", Aimed("You command the undead.")),
    s("Orb of Entropy", ball(El::Hellfire, 3, 1, 2)),
    s("Nether Bolt", bolt(El::Nether, 8, 8)),
    s("Cloud Kill", ball(El::Poison, 20, 1, 3)),
    s("Genocide One", Aimed("Your target vanishes from existence.")),
    s("Poison Branding", Utility("Your weapon drips with poison.")),
    s("Vampiric Drain", ball(El::Nether, 40, 2, 0)),
    s("Animate Dead", Utility("The dead stir around you.")),
    s("Genocide", Utility("Nearby monsters of one kind vanish.")),
    s("Berserk", buff(Timed::Shero, 25, 25)),
    s("Invoke Spirits", Aimed("You call on the power of the dead...")),
    s("Dark Bolt", bolt(El::Darkness, 4, 8)),
    s("Battle Frenzy", buff(Timed::Shero, 25, 25)),
    s("Vampiric Branding", Utility("Your weapon thirsts for blood.")),
    s("Vampirism True", ball(El::Nether, 100, 0, 0)),
    s("Nether Wave", Utility("A wave of nether sweeps the area.")),
    s("Darkness Storm", ball(El::Darkness, 100, 2, 4)),
    s("Death Ray", Aimed("A ray of death leaves your hands.")),
    s("Raise the Dead", Utility("The dead answer your call.")),
    s("Esoteria", Utility("You understand your belongings fully.")),
    s("Polymorph Vampire", Utility("You take the form of a vampire.")),
    s("Restore Life", RestoreLife),
    s("Mass Genocide", Utility("Nearby monsters vanish from existence.")),
    s("Hellfire", ball(El::Hellfire, 666, 0, 3)),
    s("Wraithform", Utility("You leave the physical world.")),
];

const ARCANE: [SpellDef; SPELLS_PER_REALM] = [
    s("Zap", bolt(El::Lightning, 3, 3)),
    s("Wizard Lock", Aimed("The door locks with a click.")),
    s("Detect Invisibility", Detect("invisible monsters")),
    s("Detect Monsters", Detect("monsters")),
    s("Blink", Teleport(10)),
    s("Light Area", Utility("You are surrounded by a white light.")),
    s("Trap & Door Destruction", Aimed("There is a bright flash of light!")),
    s("Cure Light Wounds", Heal(15)),
    s("Detect Doors & Traps", Detect("doors and traps")),
    s("Phlogiston", Utility("You fill your light source.")),
    s("Detect Treasure", Detect("treasure")),
    s("Detect Enchantment", Detect("magic objects")),
    s("Detect Objects", Detect("objects")),
    s("Cure Poison", Cure),
    s("Resist Cold", buff(Timed::ResistCold, 20, 20)),
    s("Resist Fire", buff(Timed::ResistFire, 20, 20)),
    s("Resist Lightning", buff(Timed::ResistElec, 20, 20)),
    s("Resist Acid", buff(Timed::ResistAcid, 20, 20)),
    s("Cure Medium Wounds", Heal(30)),
    s("Teleport", Teleport(100)),
    s("Identify", Utility("You learn more about one of your items.")),
    s("Stone to Mud", Aimed("The wall turns into mud!")),
    s("Ray of Light", Aimed("A line of light appears.")),
    s("Satisfy Hunger", Nourish),
    s("See Invisible", Utility("Your eyes feel very sensitive!")),
    s("Conjure Elemental", Utility("An elemental answers your call.")),
    s("Teleport Level", Utility("You sink through the floor.")),
    s("Teleport Away", Aimed("A beam of warping force streaks away.")),
    s("Resist Elements", buff(Timed::ResistElec, 20, 20)),
    s("Detection", Detect("everything")),
    s("Word of Recall", Utility("The air about you becomes charged...")),
    s("Clairvoyance", Detect("the entire level")),
];

const DAEMON: [SpellDef; SPELLS_PER_REALM] = [
    s("Magic Missile", bolt(El::Missile, 3, 4)),
    s("Detect Unlife", Detect("unliving creatures")),
    s("Evil Bless", buff(Timed::Blessed, 12, 12)),
    s("Resist Fire", buff(Timed::ResistFire, 20, 20)),
    s("Horrify", Aimed("You emanate an aura of dread.")),
    s("Nether Bolt", bolt(El::Nether, 6, 8)),
    s("Summon Manes", Utility("Manes crawl up from the pit.")),
    s("Hellish Flame", ball(El::Hellfire, 15, 1, 2)),
    s("Dominate Demon", Aimed("You command the demon.")),
    s("Vision", Detect("the local area")),
    s("Resist Nether", Utility("You feel resistant to nether!")),
    s("Plasma Bolt", bolt(El::Plasma, 11, 8)),
    s("Fire Ball", ball(El::Fire, 80, 1, 2)),
    s("Fire Branding", Utility("Your weapon burns with hellfire.")),
    s("Nether Ball", ball(El::Nether, 100, 2, 2)),
    s("Summon Demon", Utility("The area fills with a stench of sulphur.")),
    s("Devilish Eye", Detect("the minds of monsters")),
    s("Devil Cloak", buff(Timed::ResistFire, 20, 20)),
    s("The Flow of Lava", ball(El::Fire, 55, 1, 3)),
    s("Plasma Ball", ball(El::Plasma, 100, 2, 2)),
    s("Polymorph Demon", Utility("You take the form of a demon.")),
    s("Nether Wave", Utility("A wave of nether sweeps the area.")),
    s("Kiss of Succubus", ball(El::Nether, 100, 2, 4)),
    s("Doom Hand", Aimed("You invoke the Hand of Doom!")),
    s("Raise the Morale", buff(Timed::Hero, 25, 25)),
    s("Immortal Body", Utility("You feel time pass you by.")),
    s("Insanity Circle", ball(El::Chaos, 50, 2, 3)),
    s("Explode Pets", Utility("Your pets explode!")),
    s("Summon Greater Demon", Utility("A greater demon answers your call.")),
    s("Nether Storm", ball(El::Nether, 300, 6, 4)),
    s("Bloody Curse", ball(El::Hellfire, 600, 0, 0)),
    s("Polymorph Demonlord", Utility("You take the form of a demon lord.")),
];

const CRUSADE: [SpellDef; SPELLS_PER_REALM] = [
    s("Punishment", bolt(El::Lightning, 3, 4)),
    s("Detect Evil", Detect("evil monsters")),
    s("Remove Fear", Utility("You feel bold.")),
    s("Scare Monster", Aimed("Your target cowers.")),
    s("Sanctuary", Utility("Nearby monsters fall asleep.")),
    s("Portal", Teleport(25)),
    s("Star Dust", ball(El::Light, 3, 1, 0)),
    s("Purify", Cure),
    s("Scatter Evil", Aimed("A beam of warping force streaks away.")),
    s("Holy Orb", ball(El::Holy, 30, 1, 2)),
    s("Exorcism", Utility("The power of good cleanses the area.")),
    s("Remove Curse", Utility("You feel as if someone is watching over you.")),
    s("Sense Unseen", Detect("invisible monsters")),
    s("Protection from Evil", Utility("You feel safe from evil!")),
    s("Judgment Thunder", bolt(El::Lightning, 10, 8)),
    s("Holy Word", Heal(100)),
    s("Unbarring Ways", Aimed("The way ahead opens.")),
    s("Arrest", Aimed("Your target is held fast.")),
    s("Holy Aura", Utility("You are surrounded by a holy aura.")),
    s("Dispel Undead and Demons", ball(El::Holy, 60, 2, 0)),
    s("Dispel Evil", ball(El::Holy, 80, 2, 0)),
    s("Holy Blade", Utility("Your weapon glows with holy light.")),
    s("Star Burst", ball(El::Light, 100, 2, 4)),
    s("Summon Angel", Utility("An angel descends from above.")),
    s("Heroism", buff(Timed::Hero, 25, 25)),
    s("Dispel Curse", Utility("A warm glow surrounds your belongings.")),
    s("Banish Evil", Utility("Evil is swept away.")),
    s("Armageddon", Utility("There is a searing blast of light!")),
    s("An Eye for an Eye", Utility("You are ready to repay every wound.")),
    s("Wrath of the God", ball(El::Holy, 300, 4, 2)),
    s("Divine Intervention", Heal(500)),
    s("Crusade", buff(Timed::Hero, 50, 50)),
];

const MUSIC: [SpellDef; SPELLS_PER_REALM] = [
    s("Song of Holding", Utility("You start humming a slow, steady melody...")),
    s("Song of Blessing", buff(Timed::Blessed, 12, 12)),
    s("Wrecking Note", bolt(El::Sound, 4, 6)),
    s("Stun Pattern", Utility("You weave a pattern of sounds to bewilder.")),
    s("Flow of Life", Heal(20)),
    s("Song of the Sun", Utility("Your uplifting song brings brightness.")),
    s("Song of Fear", Utility("You start weaving a fearful pattern...")),
    s("Heroic Ballad", buff(Timed::Hero, 25, 25)),
    s("Clairaudience", Detect("the local layout")),
    s("Soul Shriek", ball(El::Sound, 30, 1, 0)),
    s("Song of Lore", Utility("You recall the rich lore of the world...")),
    s("Hiding Tune", Utility("Your song carries you beyond the sight of mortal eyes...")),
    s("Illusion Pattern", Utility("You weave a pattern of sounds to beguile.")),
    s("Doomcall", ball(El::Sound, 50, 2, 0)),
    s("Firiel's Song", Utility("The themes of life and revival are woven into your song...")),
    s("Fellowship Chant", Utility("You weave a slow, soothing melody of imploration...")),
    s("Sound of Disintegration", ball(El::Disintegration, 40, 2, 0)),
    s("Finrod's Resistance", buff(Timed::ResistPoison, 25, 25)),
    s("Hobbit Melodies", buff(Timed::Fast, 20, 20)),
    s("World Contortion", Utility("Reality whirls wildly as you sing a dizzying melody...")),
    s("Dispelling Chant", ball(El::Sound, 80, 2, 0)),
    s("The Voice of Saruman", Utility("You start humming a gentle and attractive song...")),
    s("Song of the Tempest", bolt(El::Sound, 10, 6)),
    s("Ambarkanta", Utility("You sing of the primeval shaping of Middle-earth...")),
    s("Wrecking Pattern", Utility("Weaving a pattern of sounds, you contort the ground.")),
    s("Stationary Shriek", Utility("You sing an ancient song of staying.")),
    s("Endurance", Utility("You chant a powerful, heroic call to arms...")),
    s("The Hero's Poem", buff(Timed::Hero, 50, 25)),
    s("Relief of Yavanna", Heal(300)),
    s("Goddess' Rebirth", RestoreStats),
    s("Wizardry of Sauron", ball(El::Mana, 300, 4, 0)),
    s("Fingolfin's Challenge", buff(Timed::StoneSkin, 20, 20)),
];

/// Built-in spell table of a realm
pub fn realm_spells(realm: Realm) -> &'static [SpellDef; SPELLS_PER_REALM] {
    match realm {
        Realm::Life => &LIFE,
        Realm::Sorcery => &SORCERY,
        Realm::Nature => &NATURE,
        Realm::Chaos => &CHAOS,
        Realm::Death => &DEATH,
        Realm::Arcane => &ARCANE,
        Realm::Daemon => &DAEMON,
        Realm::Crusade => &CRUSADE,
        Realm::Music => &MUSIC,
    }
}

// Full-caster curve shared by every realm
const BASE_LEVEL: [i32; SPELLS_PER_REALM] = [
    1, 3, 5, 7, 9, 11, 13, 15, 17, 19, 21, 23, 25, 27, 29, 31, 20, 23, 26, 29, 32, 35, 38, 41, 30,
    33, 36, 39, 42, 45, 47, 49,
];
const BASE_MANA: [i32; SPELLS_PER_REALM] = [
    1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 14, 16, 18, 20, 18, 20, 22, 25, 28, 32, 36, 40, 30, 35,
    40, 45, 50, 60, 75, 100,
];
const BASE_FAIL: [i32; SPELLS_PER_REALM] = [
    20, 22, 24, 25, 26, 27, 28, 30, 30, 32, 33, 35, 36, 38, 40, 42, 40, 42, 45, 48, 50, 52, 55, 58,
    50, 55, 60, 65, 70, 75, 80, 85,
];
const BASE_EXP: [i32; SPELLS_PER_REALM] = [
    4, 4, 4, 5, 5, 6, 6, 8, 10, 12, 15, 18, 20, 25, 30, 40, 40, 50, 60, 70, 80, 90, 100, 120, 120,
    140, 160, 180, 200, 220, 250, 300,
];

/// Built-in spell data and effects
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardCatalog;

impl StandardCatalog {
    pub fn new() -> Self {
        Self
    }

    fn def(realm: Realm, spell: usize) -> &'static SpellDef {
        &realm_spells(realm)[spell]
    }
}

impl SpellCatalog for StandardCatalog {
    fn info(&self, class: Class, _realm: Realm, spell: usize) -> SpellInfo {
        let Some(magic) = class.magic() else {
            return SpellInfo::NEVER;
        };
        let (mut slevel, mut smana, mut sfail) =
            (BASE_LEVEL[spell], BASE_MANA[spell], BASE_FAIL[spell]);
        match magic.tier {
            CasterTier::Full => {
                if class == Class::HighMage {
                    slevel = (slevel - slevel / 10).max(1);
                }
            }
            CasterTier::Half => {
                slevel += slevel / 2 + 2;
                smana += smana / 4;
                sfail += 5;
            }
            CasterTier::Minor => {
                slevel = slevel * 2 + 3;
                smana += smana / 2;
                sfail += 10;
            }
        }
        if slevel > PY_MAX_LEVEL {
            return SpellInfo::NEVER;
        }
        SpellInfo {
            slevel,
            smana,
            sfail: sfail.min(MAX_FAIL_CHANCE),
            sexp: BASE_EXP[spell],
        }
    }

    fn name(&self, realm: Realm, spell: usize) -> String {
        Self::def(realm, spell).name.to_string()
    }

    fn description(&self, actor: &Actor, realm: Realm, spell: usize) -> String {
        Self::def(realm, spell).effect.describe(actor.level)
    }

    fn cast(&self, ctx: &mut EffectContext<'_>, realm: Realm, spell: usize) -> EffectStatus {
        let def = Self::def(realm, spell);
        tracing::debug!(%realm, spell, name = def.name, "spell effect");
        apply_effect(ctx, def.effect)
    }
}

/// Run a built-in effect
pub fn apply_effect(ctx: &mut EffectContext<'_>, effect: Effect) -> EffectStatus {
    let level = ctx.actor.level.max(1) as u32;
    match effect {
        Effect::Bolt {
            element,
            dice,
            sides,
        } => {
            let Some(dir) = get_aim_dir(ctx.term) else {
                return EffectStatus::Cancelled;
            };
            let dam = ctx.rng.damroll(dice + level / 5, sides);
            tracing::debug!(%element, dam, "bolt");
            ctx.msg(format!("A bolt of {} flies {}.", element, dir.name()));
        }
        Effect::Ball {
            element,
            base,
            per_level,
            ..
        } => {
            let Some(dir) = get_aim_dir(ctx.term) else {
                return EffectStatus::Cancelled;
            };
            let dam = base + level * per_level;
            tracing::debug!(%element, dam, "ball");
            ctx.msg(format!("A ball of {} bursts toward {}.", element, dir.name()));
        }
        Effect::Heal(hp) => {
            let actor = &mut *ctx.actor;
            actor.hp = (actor.hp + hp).min(actor.hp_max);
            actor.timed.set(Timed::Cut, 0);
            ctx.msg(if hp >= 100 {
                "You feel very good."
            } else {
                "You feel better."
            });
        }
        Effect::Cure => {
            for t in [
                Timed::Blind,
                Timed::Confused,
                Timed::Stun,
                Timed::Poisoned,
                Timed::Cut,
            ] {
                ctx.actor.timed.set(t, 0);
            }
            ctx.msg("You feel cured.");
        }
        Effect::Buff { effect, base, dice } => {
            let turns = base + ctx.rng.randint1(dice);
            ctx.actor
                .timed
                .add(effect, i16::try_from(turns).unwrap_or(i16::MAX));
            if effect == Timed::Shero {
                ctx.actor.timed.set(Timed::Afraid, 0);
            }
            ctx.msg(buff_message(effect));
        }
        Effect::Detect(what) => ctx.msg(format!("You sense the presence of {}.", what)),
        Effect::Teleport(range) => {
            ctx.msg(if range <= 10 {
                "You blink."
            } else {
                "You teleport away."
            });
        }
        Effect::Nourish => ctx.msg("You feel less hungry."),
        Effect::RestoreLife => {
            if ctx.actor.exp < ctx.actor.max_exp {
                ctx.actor.exp = ctx.actor.max_exp;
                ctx.actor.check_experience();
                ctx.msg("You feel your life energies returning.");
            } else {
                ctx.msg("You feel your life energies are already full.");
            }
        }
        Effect::RestoreStats => {
            let mut any = false;
            for stat in [
                Stat::Strength,
                Stat::Intelligence,
                Stat::Wisdom,
                Stat::Dexterity,
                Stat::Constitution,
                Stat::Charisma,
            ] {
                any |= ctx.actor.stats.restore(stat);
            }
            ctx.msg(if any {
                "You feel your strength returning."
            } else {
                "You feel whole."
            });
        }
        Effect::Aimed(text) => {
            if get_aim_dir(ctx.term).is_none() {
                return EffectStatus::Cancelled;
            }
            ctx.msg(text);
        }
        Effect::Utility(text) => ctx.msg(text),
    }
    EffectStatus::Done
}
