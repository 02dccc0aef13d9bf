//! Ratatui terminal behind the engine's input and renderer traits

use std::io::{self, Write};
use std::time::Duration;

use crossterm::event::{self, Event};
use ratatui::Terminal;
use ratatui::backend::Backend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph};

use arcana_core::io::{InputProvider, Key, Renderer};

use crate::input::key_from_event;
use crate::screen::LineScreen;

/// Messages kept for the message pane
const MESSAGE_PANE: usize = 3;

/// The engine's view of a ratatui terminal
pub struct TuiTerminal<B: Backend> {
    terminal: Terminal<B>,
    screen: LineScreen,
    messages: Vec<String>,
    status: [String; 2],
}

impl<B: Backend> TuiTerminal<B> {
    pub fn new(terminal: Terminal<B>) -> Self {
        Self {
            terminal,
            screen: LineScreen::new(),
            messages: Vec::new(),
            status: [String::new(), String::new()],
        }
    }

    pub fn set_status(&mut self, status: [String; 2]) {
        self.status = status;
    }

    pub fn screen(&self) -> &LineScreen {
        &self.screen
    }

    /// Recent messages, oldest first
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn backend(&self) -> &B {
        self.terminal.backend()
    }

    /// Draw the current screen, messages and status
    pub fn draw(&mut self) -> io::Result<()> {
        let screen = &self.screen;
        let messages = &self.messages;
        let status = &self.status;
        self.terminal.draw(|frame| {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Min(1),
                    Constraint::Length(MESSAGE_PANE as u16 + 1),
                    Constraint::Length(2),
                ])
                .split(frame.area());

            let body: Vec<Line> = screen.rows().iter().map(|r| Line::raw(r.as_str())).collect();
            frame.render_widget(Paragraph::new(body), chunks[0]);

            let start = messages.len().saturating_sub(MESSAGE_PANE);
            let recent: Vec<Line> = messages[start..]
                .iter()
                .map(|m| Line::raw(m.as_str()))
                .collect();
            frame.render_widget(
                Paragraph::new(recent).block(Block::default().borders(Borders::TOP)),
                chunks[1],
            );

            let status_lines: Vec<Line> = status
                .iter()
                .map(|s| Line::styled(s.as_str(), Style::default().add_modifier(Modifier::BOLD)))
                .collect();
            frame.render_widget(Paragraph::new(status_lines), chunks[2]);
        })?;
        Ok(())
    }

    fn read_key(&mut self) -> io::Result<Key> {
        self.draw()?;
        loop {
            match event::read()? {
                Event::Key(ev) => {
                    if let Some(key) = key_from_event(ev) {
                        return Ok(key);
                    }
                }
                Event::Resize(..) => self.draw()?,
                _ => {}
            }
        }
    }
}

impl<B: Backend> InputProvider for TuiTerminal<B> {
    fn next_key(&mut self) -> Key {
        self.read_key().unwrap_or_else(|err| {
            tracing::warn!(%err, "terminal read failed");
            Key::Escape
        })
    }

    fn flush_input(&mut self) {
        while matches!(event::poll(Duration::ZERO), Ok(true)) {
            if event::read().is_err() {
                break;
            }
        }
    }
}

impl<B: Backend> Renderer for TuiTerminal<B> {
    fn put_line(&mut self, row: u16, col: u16, text: &str) {
        self.screen.put_line(row, col, text);
    }

    fn save_screen(&mut self) {
        self.screen.save();
    }

    fn restore_screen(&mut self) {
        if !self.screen.restore() {
            tracing::warn!("restore_screen without a saved screen");
        }
    }

    fn bell(&mut self) {
        if let Err(err) = io::stdout().write_all(b"\x07").and_then(|_| io::stdout().flush()) {
            tracing::debug!(%err, "bell failed");
        }
    }

    fn message(&mut self, text: &str) {
        self.messages.push(text.to_string());
    }
}
