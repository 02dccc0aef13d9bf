//! arcana-core: spell and power invocation engine
//!
//! This crate holds the rules for choosing, paying for and resolving spells
//! and innate powers, with no terminal or file I/O of its own. Keys come in
//! and lines go out through the traits in [`io`]; randomness comes from
//! [`arcana_rng::RandomSource`], so every roll can be scripted in tests.

pub mod action;
pub mod consts;
pub mod error;
pub mod io;
pub mod magic;
pub mod player;
pub mod racial;
pub mod select;
pub mod state;
pub mod testing;
pub mod world;

pub use action::ActionResult;
pub use error::ParseError;
pub use state::GameState;
