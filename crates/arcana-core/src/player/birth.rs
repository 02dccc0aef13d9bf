//! Character creation
//!
//! Builds a ready-to-play [`Actor`] from names given on the command line or
//! in the options file, checking the realm choices against the class.

use super::{Actor, Class, Race};
use crate::error::ParseError;
use crate::magic::{Realm, SpellCatalog};
use crate::magic::study::update_spell_memory;

pub fn parse_class(name: &str) -> Result<Class, ParseError> {
    name.parse()
        .map_err(|_| ParseError::UnknownClass(name.to_string()))
}

pub fn parse_race(name: &str) -> Result<Race, ParseError> {
    name.parse()
        .map_err(|_| ParseError::UnknownRace(name.to_string()))
}

pub fn parse_realm(name: &str) -> Result<Realm, ParseError> {
    name.parse()
        .map_err(|_| ParseError::UnknownRealm(name.to_string()))
}

/// What a new character should look like
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterSpec {
    pub name: String,
    pub class: Class,
    pub race: Race,
    /// First realm; the class's first choice when left out
    pub realm1: Option<Realm>,
    pub realm2: Option<Realm>,
    pub level: i32,
}

impl Default for CharacterSpec {
    fn default() -> Self {
        Self {
            name: "Adventurer".to_string(),
            class: Class::Mage,
            race: Race::Human,
            realm1: None,
            realm2: None,
            level: 1,
        }
    }
}

fn not_allowed(class: Class, realm: Realm) -> ParseError {
    ParseError::RealmNotAllowed {
        class: class.to_string(),
        realm: realm.to_string(),
    }
}

/// Create a character, with the casting stat at 18 and spell slots counted
pub fn create_character(
    spec: &CharacterSpec,
    catalog: &dyn SpellCatalog,
) -> Result<Actor, ParseError> {
    let class = spec.class;
    let mut actor = Actor::new(spec.name.clone(), class, spec.race);

    if let Some(magic) = class.magic() {
        actor.stats.set(magic.stat, 18);
        if !class.is_hybrid() {
            let realm1 = match spec.realm1 {
                Some(realm) if class.allows_realm1(realm) => Some(realm),
                Some(realm) => return Err(not_allowed(class, realm)),
                None => magic.realm1_choices.first().copied(),
            };
            actor.realm1 = realm1;
            if let (Some(realm1), Some(realm2)) = (realm1, spec.realm2) {
                if !class.allows_realm2(realm1, realm2) {
                    return Err(not_allowed(class, realm2));
                }
                actor.realm2 = Some(realm2);
            }
        }
    } else if let Some(realm) = spec.realm1.or(spec.realm2) {
        return Err(not_allowed(class, realm));
    }

    actor.set_level(spec.level);
    update_spell_memory(&mut actor, catalog);
    tracing::info!(
        name = %actor.name,
        %class,
        race = %actor.race,
        level = actor.level,
        "character created"
    );
    Ok(actor)
}
