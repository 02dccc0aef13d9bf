//! Repeat-last-command buffer
//!
//! A single slot remembering the last repeatable command and the candidate
//! index its selector finalized. While a command is being replayed the
//! selector may pull the remembered index instead of prompting.

use serde::{Deserialize, Serialize};

use crate::magic::Spellbook;

/// Commands that can be repeated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RepeatedCommand {
    Cast { book: Spellbook },
    Study { book: Spellbook },
    RacialPower,
}

/// Single-slot repeat buffer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepeatBuffer {
    command: Option<RepeatedCommand>,
    code: Option<usize>,
    #[serde(skip)]
    replaying: bool,
}

impl RepeatBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Note the start of a repeatable command.
    ///
    /// A fresh command forgets the previous code; a replay keeps it for the
    /// selector to pull.
    pub fn begin(&mut self, command: RepeatedCommand) {
        if !self.replaying || self.command != Some(command) {
            self.replaying = false;
            self.code = None;
        }
        self.command = Some(command);
    }

    /// Remember the finalized candidate index
    pub fn push(&mut self, code: usize) {
        self.code = Some(code);
    }

    /// Take the remembered index while replaying
    pub fn pull(&mut self) -> Option<usize> {
        if !self.replaying {
            return None;
        }
        self.replaying = false;
        self.code
    }

    pub fn last_command(&self) -> Option<RepeatedCommand> {
        self.command
    }

    pub fn last_code(&self) -> Option<usize> {
        self.code
    }

    pub fn is_replaying(&self) -> bool {
        self.replaying
    }

    /// Arm the buffer for replaying the last command
    pub fn start_replay(&mut self) -> Option<RepeatedCommand> {
        let command = self.command?;
        self.replaying = true;
        Some(command)
    }

    /// Leave replay mode once the command is over
    pub fn finish_replay(&mut self) {
        self.replaying = false;
    }
}
