//! Error types for fallible parsing

use thiserror::Error;

/// A name that does not map to any built-in class, race or realm.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("unknown class: {0}")]
    UnknownClass(String),
    #[error("unknown race: {0}")]
    UnknownRace(String),
    #[error("unknown realm: {0}")]
    UnknownRealm(String),
    #[error("{class} cannot use the {realm} realm")]
    RealmNotAllowed { class: String, realm: String },
}
