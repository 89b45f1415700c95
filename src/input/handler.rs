use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;

use crate::driver::IntentSource;
use crate::game::Intent;

pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> Option<Intent> {
        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(Intent::Quit);
        }

        match key.code {
            // Movement - Arrow keys
            KeyCode::Up => Some(Intent::MoveUp),
            KeyCode::Down => Some(Intent::MoveDown),
            KeyCode::Left => Some(Intent::MoveLeft),
            KeyCode::Right => Some(Intent::MoveRight),

            // Movement - WASD
            KeyCode::Char('w') | KeyCode::Char('W') => Some(Intent::MoveUp),
            KeyCode::Char('s') | KeyCode::Char('S') => Some(Intent::MoveDown),
            KeyCode::Char('a') | KeyCode::Char('A') => Some(Intent::MoveLeft),
            KeyCode::Char('d') | KeyCode::Char('D') => Some(Intent::MoveRight),

            // Controls
            KeyCode::Enter | KeyCode::Char(' ') => Some(Intent::Confirm),
            KeyCode::Char('p') | KeyCode::Char('P') => Some(Intent::PauseToggle),
            KeyCode::Esc => Some(Intent::BackToMenu),
            KeyCode::Char('q') | KeyCode::Char('Q') => Some(Intent::Quit),

            _ => None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Reads crossterm key events from the terminal without blocking
pub struct TerminalInput {
    handler: InputHandler,
}

impl TerminalInput {
    pub fn new() -> Self {
        Self {
            handler: InputHandler::new(),
        }
    }
}

impl Default for TerminalInput {
    fn default() -> Self {
        Self::new()
    }
}

impl IntentSource for TerminalInput {
    fn poll_intents(&mut self) -> Result<Vec<Intent>> {
        let mut intents = Vec::new();

        while event::poll(Duration::ZERO).context("Failed to poll terminal events")? {
            let event = event::read().context("Failed to read terminal event")?;

            if let Event::Key(key) = event {
                // Only process key press events, not release
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if let Some(intent) = self.handler.handle_key_event(key) {
                    intents.push(intent);
                }
            }
        }

        Ok(intents)
    }
}
