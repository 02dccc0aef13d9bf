//! Innate powers
//!
//! Class and race powers plus the powers granted by mutations, listed
//! together for the racial power command.

mod effects;
mod power;

pub use effects::{PowerEffects, StandardPowers, mutation_effect, power_effect};
pub use power::{
    Power, PowerDesc, class_powers, mutation_desc, power_candidates, power_success, race_powers,
    source_desc,
};
