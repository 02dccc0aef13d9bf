//! Magic system
//!
//! Realms, books and what a character knows of them, the spell catalog,
//! the eligibility and cost rules, and spell resolution.

mod book;
pub mod cast;
pub mod catalog;
pub mod eligibility;
pub mod formula;
mod knowledge;
mod realm;
pub mod study;

pub use book::Spellbook;
pub use cast::{Commitment, Resolution, SpellCast, commit_cost, refund, resolve_spell};
pub use catalog::{EffectContext, EffectStatus, SpellCatalog, SpellInfo, StandardCatalog};
pub use eligibility::{SpellMode, book_candidates, spell_okay};
pub use knowledge::{
    AbilitySet, LearnedSpell, ProficiencyRank, RealmKnowledge, RealmSlot, SpellExp, SpellKnowledge,
};
pub use realm::Realm;
