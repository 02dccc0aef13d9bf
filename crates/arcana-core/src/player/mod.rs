//! Player system
//!
//! Contains the Actor aggregate and the tables it draws on.

mod actor;
pub mod birth;
mod class;
pub mod experience;
mod mutation;
mod race;
pub mod stats;
mod timed;
mod virtue;

pub use actor::{Actor, CastingTraits, LevelChange};
pub use birth::{CharacterSpec, create_character};
pub use class::{CasterTier, Class, ClassMagic, MagicFlags, SpellKind};
pub use mutation::Mutations;
pub use race::Race;
pub use stats::{Stat, Stats, format_stat};
pub use timed::{Timed, TimedEffects};
pub use virtue::{Virtue, Virtues};
