//! Test double for the terminal seams
//!
//! [`ScriptedTerminal`] replays a queue of keys and records everything the
//! engine draws, so selector and command tests can assert on prompts, bells
//! and screen save/restore balance. Once the script runs out it answers
//! Escape, which every prompt treats as cancel.

use std::collections::VecDeque;

use crate::io::{InputProvider, Key, Renderer};

/// One `put_line` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawnLine {
    pub row: u16,
    pub col: u16,
    pub text: String,
}

#[derive(Debug, Clone, Default)]
pub struct ScriptedTerminal {
    keys: VecDeque<Key>,
    keys_read: usize,
    drawn: Vec<DrawnLine>,
    messages: Vec<String>,
    bells: usize,
    saves: usize,
    restores: usize,
    max_depth: usize,
    flushes: usize,
}

impl ScriptedTerminal {
    /// Script from a string, one key per character (`\r` is Enter, `\x1b` Escape)
    pub fn new(script: &str) -> Self {
        Self::with_keys(script.chars().map(Key::from))
    }

    pub fn with_keys(keys: impl IntoIterator<Item = Key>) -> Self {
        Self {
            keys: keys.into_iter().collect(),
            ..Self::default()
        }
    }

    pub fn push_key(&mut self, key: Key) {
        self.keys.push_back(key);
    }

    pub fn push_str(&mut self, script: &str) {
        self.keys.extend(script.chars().map(Key::from));
    }

    /// Keys still queued
    pub fn pending_keys(&self) -> usize {
        self.keys.len()
    }

    /// Keys consumed so far
    pub fn keys_read(&self) -> usize {
        self.keys_read
    }

    pub fn drawn(&self) -> &[DrawnLine] {
        &self.drawn
    }

    /// Text drawn at a row, most recent first
    pub fn lines_at(&self, row: u16) -> Vec<&str> {
        self.drawn
            .iter()
            .rev()
            .filter(|l| l.row == row)
            .map(|l| l.text.as_str())
            .collect()
    }

    /// Whether any drawn line contains `needle`
    pub fn drew(&self, needle: &str) -> bool {
        self.drawn.iter().any(|l| l.text.contains(needle))
    }

    /// Number of prompt-line draws containing `needle`
    pub fn prompts_containing(&self, needle: &str) -> usize {
        self.drawn
            .iter()
            .filter(|l| l.row == 0 && l.text.contains(needle))
            .count()
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn bells(&self) -> usize {
        self.bells
    }

    pub fn saves(&self) -> usize {
        self.saves
    }

    pub fn restores(&self) -> usize {
        self.restores
    }

    /// Saved screens not yet restored
    pub fn screen_depth(&self) -> usize {
        self.saves.saturating_sub(self.restores)
    }

    /// Deepest save nesting seen
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn flushes(&self) -> usize {
        self.flushes
    }
}

impl InputProvider for ScriptedTerminal {
    fn next_key(&mut self) -> Key {
        self.keys_read += 1;
        self.keys.pop_front().unwrap_or(Key::Escape)
    }

    fn flush_input(&mut self) {
        self.flushes += 1;
    }
}

impl Renderer for ScriptedTerminal {
    fn put_line(&mut self, row: u16, col: u16, text: &str) {
        self.drawn.push(DrawnLine {
            row,
            col,
            text: text.to_string(),
        });
    }

    fn save_screen(&mut self) {
        self.saves += 1;
        self.max_depth = self.max_depth.max(self.screen_depth());
    }

    fn restore_screen(&mut self) {
        assert!(
            self.restores < self.saves,
            "restore_screen without a matching save_screen"
        );
        self.restores += 1;
    }

    fn bell(&mut self) {
        self.bells += 1;
    }

    fn message(&mut self, text: &str) {
        self.messages.push(text.to_string());
    }
}
