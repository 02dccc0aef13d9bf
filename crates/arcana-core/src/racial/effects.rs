//! What powers do when they work

use crate::magic::catalog::{Effect, Element, apply_effect};
use crate::magic::{EffectContext, EffectStatus};
use crate::player::{Mutations, Timed};
use crate::select::CandidateSource;

use super::Power;

/// Activates a racial or mutation power
pub trait PowerEffects {
    fn activate(&self, ctx: &mut EffectContext<'_>, source: CandidateSource) -> EffectStatus;
}

/// Built-in power effects
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardPowers;

impl PowerEffects for StandardPowers {
    fn activate(&self, ctx: &mut EffectContext<'_>, source: CandidateSource) -> EffectStatus {
        match source {
            CandidateSource::Racial { power } => activate_power(ctx, power),
            CandidateSource::Mutation { mutation } => match mutation_effect(mutation) {
                Some(effect) => apply_effect(ctx, effect),
                None => EffectStatus::Cancelled,
            },
            CandidateSource::Spell { .. } => EffectStatus::Cancelled,
        }
    }
}

fn activate_power(ctx: &mut EffectContext<'_>, power: Power) -> EffectStatus {
    tracing::debug!(?power, "power effect");
    match power {
        Power::ConvertHpToSp => {
            let level = ctx.actor.level.max(1);
            ctx.actor.take_hit(level, "thoughtless conversion from HP to SP");
            let actor = &mut *ctx.actor;
            actor.mana = (actor.mana + level / 5).min(actor.mana_max);
            ctx.msg("You feel your mind grow clearer.");
            EffectStatus::Done
        }
        Power::ConvertSpToHp => {
            let level = ctx.actor.level.max(1);
            let spent = (level / 5).min(ctx.actor.mana);
            let actor = &mut *ctx.actor;
            actor.mana -= spent;
            actor.hp = (actor.hp + level).min(actor.hp_max);
            ctx.msg("You feel better.");
            EffectStatus::Done
        }
        Power::StopSinging => {
            ctx.msg("You stop singing.");
            EffectStatus::Done
        }
        power => match power_effect(power) {
            Some(effect) => apply_effect(ctx, effect),
            None => EffectStatus::Cancelled,
        },
    }
}

/// Effect of a class or race power that maps onto a plain effect
pub fn power_effect(power: Power) -> Option<Effect> {
    use Effect::{Aimed, Ball, Bolt, Buff, Detect, Nourish, RestoreLife, Teleport, Utility};
    let effect = match power {
        Power::SwordDancing => Aimed("You dance through the enemy ranks."),
        Power::EatMagic => Utility("You drain the magic from one of your devices."),
        Power::BlessWeapon => Utility("Your weapon glows with holy light."),
        Power::HitAndAway => Aimed("You strike and leap away."),
        Power::ProbeMonster => Detect("the powers of nearby monsters"),
        Power::HolyLance => Bolt {
            element: Element::Holy,
            dice: 3,
            sides: 12,
        },
        Power::ConfusingLight => Utility("You emit a dazzling light."),
        Power::BerserkerRecall => Utility("The air about you becomes charged..."),
        Power::DoubleMagic => Utility("You prepare to cast twice."),
        Power::DetectDoorsTraps => Detect("doors and traps"),
        Power::CreateFood => Nourish,
        Power::Blink => Teleport(10),
        Power::RemoveFear => Utility("You feel brave."),
        Power::Berserk => Buff {
            effect: Timed::Shero,
            base: 10,
            dice: 10,
        },
        Power::ShadowShifting => Utility("You start walking around."),
        Power::PatternMindwalking => Utility("You pick a pattern and walk it."),
        Power::ExplosiveRune => Utility("You carefully set an explosive rune."),
        Power::StoneToMud => Aimed("The wall turns into mud."),
        Power::Probing => Detect("the powers of nearby monsters"),
        Power::ThrowBoulder => Bolt {
            element: Element::Missile,
            dice: 3,
            sides: 12,
        },
        Power::ScareMonster => Aimed("You make a horrible scream!"),
        Power::SpitAcid => Bolt {
            element: Element::Acid,
            dice: 2,
            sides: 8,
        },
        Power::PoisonDart => Bolt {
            element: Element::Poison,
            dice: 2,
            sides: 6,
        },
        Power::MagicMissile => Bolt {
            element: Element::Missile,
            dice: 3,
            sides: 4,
        },
        Power::BreathWeapon => Ball {
            element: Element::Fire,
            base: 0,
            per_level: 2,
            radius: 2,
        },
        Power::MindBlast => Bolt {
            element: Element::Force,
            dice: 3,
            sides: 8,
        },
        Power::FireBolt => Bolt {
            element: Element::Fire,
            dice: 4,
            sides: 8,
        },
        Power::StoneSkin => Buff {
            effect: Timed::StoneSkin,
            base: 30,
            dice: 20,
        },
        Power::RestoreLife => RestoreLife,
        Power::DrainLife => Aimed("You grin and bare your fangs..."),
        Power::SleepingDust => Utility("You throw some magic dust..."),
        Power::ConvertHpToSp | Power::ConvertSpToHp | Power::StopSinging => return None,
    };
    Some(effect)
}

/// Effect of a mutation power
pub fn mutation_effect(mutation: Mutations) -> Option<Effect> {
    use Effect::{Aimed, Ball, Bolt, Buff, Detect, Nourish, Teleport, Utility};
    if mutation.bits().count_ones() != 1 {
        return None;
    }
    let effect = if mutation == Mutations::SPIT_ACID {
        Ball {
            element: Element::Acid,
            base: 0,
            per_level: 1,
            radius: 1,
        }
    } else if mutation == Mutations::BR_FIRE {
        Ball {
            element: Element::Fire,
            base: 0,
            per_level: 2,
            radius: 2,
        }
    } else if mutation == Mutations::MIND_BLST {
        Bolt {
            element: Element::Force,
            dice: 3,
            sides: 8,
        }
    } else if mutation == Mutations::RADIATION {
        Utility("Radiation flows from your body!")
    } else if mutation == Mutations::VAMPIRISM {
        Aimed("You grin and bare your fangs...")
    } else if mutation == Mutations::SMELL_MET {
        Detect("treasure")
    } else if mutation == Mutations::SMELL_MON {
        Detect("monsters")
    } else if mutation == Mutations::BLINK || mutation == Mutations::VTELEPORT {
        Teleport(if mutation == Mutations::BLINK { 10 } else { 100 })
    } else if mutation == Mutations::EAT_ROCK {
        Nourish
    } else if mutation == Mutations::BERSERK {
        Buff {
            effect: Timed::Shero,
            base: 25,
            dice: 25,
        }
    } else if mutation == Mutations::RESIST {
        Buff {
            effect: Timed::ResistFire,
            base: 20,
            dice: 20,
        }
    } else if mutation == Mutations::LASER_EYE {
        Bolt {
            element: Element::Light,
            dice: 2,
            sides: 6,
        }
    } else if mutation == Mutations::COLD_TOUCH {
        Aimed("Your hand becomes freezing cold.")
    } else if mutation == Mutations::ILLUMINE {
        Utility("You are surrounded by a white light.")
    } else if mutation == Mutations::DET_CURSE {
        Detect("cursed items")
    } else if mutation == Mutations::RECALL {
        Utility("The air about you becomes charged...")
    } else if mutations_aimed().contains(mutation) {
        Aimed("You focus on your target.")
    } else {
        Utility("You feel the mutation stir.")
    };
    Some(effect)
}

fn mutations_aimed() -> Mutations {
    Mutations::HYPN_GAZE
        | Mutations::TELEKINES
        | Mutations::SWAP_POS
        | Mutations::PANIC_HIT
        | Mutations::LAUNCHER
        | Mutations::BANISH
}
