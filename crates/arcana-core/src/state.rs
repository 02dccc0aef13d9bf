//! Game state
//!
//! Everything a command needs besides the terminal: the character, options,
//! the repeat buffer, randomness, and the spell and power collaborators.

use arcana_rng::{GameRng, RandomSource};

use crate::action::{ActionResult, do_cmd_cast, do_cmd_racial_power, do_cmd_study};
use crate::io::Terminal;
use crate::magic::{SpellCatalog, StandardCatalog};
use crate::player::Actor;
use crate::racial::{PowerEffects, StandardPowers};
use crate::world::{Options, RepeatBuffer, RepeatedCommand};

pub struct GameState<R: RandomSource = GameRng> {
    pub actor: Actor,
    pub options: Options,
    pub repeat: RepeatBuffer,
    pub rng: R,

    /// Turn counter
    pub turns: u64,

    /// Energy spent by the last command
    pub energy_use: i32,

    /// Messages for the current turn
    pub messages: Vec<String>,

    /// Permanent message history
    pub message_history: Vec<String>,

    pub catalog: Box<dyn SpellCatalog>,
    pub powers: Box<dyn PowerEffects>,
}

impl<R: RandomSource> GameState<R> {
    /// State with the built-in catalog and powers
    pub fn new(actor: Actor, rng: R) -> Self {
        Self::with_collaborators(
            actor,
            rng,
            Box::new(StandardCatalog::new()),
            Box::new(StandardPowers),
        )
    }

    pub fn with_collaborators(
        actor: Actor,
        rng: R,
        catalog: Box<dyn SpellCatalog>,
        powers: Box<dyn PowerEffects>,
    ) -> Self {
        Self {
            actor,
            options: Options::default(),
            repeat: RepeatBuffer::new(),
            rng,
            turns: 0,
            energy_use: 0,
            messages: Vec::new(),
            message_history: Vec::new(),
            catalog,
            powers,
        }
    }

    /// Add a message to the current turn
    pub fn message(&mut self, msg: impl Into<String>) {
        let msg_str = msg.into();
        self.messages.push(msg_str.clone());
        self.message_history.push(msg_str);
    }

    /// Show a message and keep it
    pub(crate) fn say(&mut self, term: &mut dyn Terminal, msg: impl Into<String>) {
        let msg = msg.into();
        term.message(&msg);
        self.message(msg);
    }

    /// Keep messages an effect already showed
    pub(crate) fn absorb(&mut self, shown: Vec<String>) {
        self.message_history.extend(shown.iter().cloned());
        self.messages.extend(shown);
    }

    /// Clear messages
    pub fn clear_messages(&mut self) {
        self.messages.clear();
    }

    /// Record the energy a command spent and advance the turn counter
    pub(crate) fn spend_energy(&mut self, energy: i32) {
        self.energy_use = energy;
        if energy > 0 {
            self.turns += 1;
        }
    }

    /// Run the last cast, study or racial power command again.
    ///
    /// The selector reuses the remembered choice when it is still valid for
    /// the rebuilt list and prompts as usual otherwise.
    pub fn repeat_last(&mut self, term: &mut dyn Terminal) -> ActionResult {
        let Some(command) = self.repeat.start_replay() else {
            return ActionResult::NoTime;
        };
        tracing::debug!(?command, "repeating command");
        let result = match command {
            RepeatedCommand::Cast { book } => do_cmd_cast(self, term, book),
            RepeatedCommand::Study { book } => do_cmd_study(self, term, book),
            RepeatedCommand::RacialPower => do_cmd_racial_power(self, term),
        };
        self.repeat.finish_replay();
        result
    }
}

impl<R: RandomSource> std::fmt::Debug for GameState<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameState")
            .field("actor", &self.actor.name)
            .field("turns", &self.turns)
            .field("energy_use", &self.energy_use)
            .finish_non_exhaustive()
    }
}
