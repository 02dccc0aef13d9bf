//! Game world state outside the character: options and the repeat buffer

mod options;
mod repeat;

pub use options::{Options, OptionsError};
pub use repeat::{RepeatBuffer, RepeatedCommand};
