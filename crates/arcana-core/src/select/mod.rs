//! The selector
//!
//! Turns a [`CandidateList`] into one chosen index. The state machine in
//! [`state`] is pure; [`select_candidate`] drives it against a terminal.

mod candidate;
mod driver;
mod layout;
pub mod state;

pub use candidate::{Candidate, CandidateList, CandidateSource, index_for_letter, letter_for};
pub use driver::{Selected, select_candidate};
pub use layout::ListStyle;
pub use state::{InputMode, Phase, Reaction, Selection};

#[cfg(test)]
pub(crate) use candidate::sample_list;
