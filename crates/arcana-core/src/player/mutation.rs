//! Activatable mutations

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Mutations that grant an activatable power
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct Mutations: u32 {
        const SPIT_ACID = 1 << 0;
        const BR_FIRE = 1 << 1;
        const HYPN_GAZE = 1 << 2;
        const TELEKINES = 1 << 3;
        const VTELEPORT = 1 << 4;
        const MIND_BLST = 1 << 5;
        const RADIATION = 1 << 6;
        const VAMPIRISM = 1 << 7;
        const SMELL_MET = 1 << 8;
        const SMELL_MON = 1 << 9;
        const BLINK = 1 << 10;
        const EAT_ROCK = 1 << 11;
        const SWAP_POS = 1 << 12;
        const SHRIEK = 1 << 13;
        const ILLUMINE = 1 << 14;
        const DET_CURSE = 1 << 15;
        const BERSERK = 1 << 16;
        const POLYMORPH = 1 << 17;
        const MIDAS_TCH = 1 << 18;
        const GROW_MOLD = 1 << 19;
        const RESIST = 1 << 20;
        const EARTHQUAKE = 1 << 21;
        const EAT_MAGIC = 1 << 22;
        const WEIGH_MAG = 1 << 23;
        const STERILITY = 1 << 24;
        const PANIC_HIT = 1 << 25;
        const DAZZLE = 1 << 26;
        const LASER_EYE = 1 << 27;
        const RECALL = 1 << 28;
        const BANISH = 1 << 29;
        const COLD_TOUCH = 1 << 30;
        const LAUNCHER = 1 << 31;
    }
}

impl Mutations {
    /// Parse a flag name as written in config files (`SPIT_ACID`)
    pub fn from_flag_name(name: &str) -> Option<Self> {
        Self::from_name(&name.trim().to_ascii_uppercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_bits_used() {
        assert_eq!(Mutations::all().bits(), u32::MAX);
        assert_eq!(Mutations::all().iter().count(), 32);
    }

    #[test]
    fn test_from_flag_name() {
        assert_eq!(Mutations::from_flag_name("blink"), Some(Mutations::BLINK));
        assert_eq!(Mutations::from_flag_name("no_such"), None);
    }
}
