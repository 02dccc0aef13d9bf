//! Player commands
//!
//! Each command takes the game state and a terminal, runs to completion and
//! reports what happened. Refusals, cancellations and empty lists are
//! outcomes, not errors.

use arcana_rng::RandomSource;

use crate::consts::ENERGY_FULL_TURN;
use crate::io::Terminal;
use crate::state::GameState;

pub mod browse;
pub mod cast;
pub mod racial;
pub mod study;

pub use browse::do_cmd_browse;
pub use cast::do_cmd_cast;
pub use racial::do_cmd_racial_power;
pub use study::do_cmd_study;

/// Result of executing a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionResult {
    /// Action completed successfully, time passes
    Success,
    /// Action was attempted and failed, time passes
    Failed,
    /// Action completed but no time passes
    NoTime,
    /// Action was cancelled
    Cancelled,
    /// Nothing in the list could be chosen
    NoCandidates,
    /// A precondition refused the command
    Refused(String),
    /// Player died
    Died(String),
}

impl ActionResult {
    /// Whether the command used the character's turn
    pub fn takes_turn(&self) -> bool {
        matches!(
            self,
            ActionResult::Success | ActionResult::Failed | ActionResult::Died(_)
        )
    }
}

/// Show why a command cannot run
fn refuse<R: RandomSource>(
    state: &mut GameState<R>,
    term: &mut dyn Terminal,
    msg: impl Into<String>,
) -> ActionResult {
    let msg = msg.into();
    state.say(term, msg.clone());
    ActionResult::Refused(msg)
}

/// Spend a full turn on a command that went ahead
fn finish<R: RandomSource>(state: &mut GameState<R>, result: ActionResult) -> ActionResult {
    state.spend_energy(ENERGY_FULL_TURN);
    if state.actor.is_dead {
        return ActionResult::Died(state.actor.died_from.clone().unwrap_or_default());
    }
    result
}
