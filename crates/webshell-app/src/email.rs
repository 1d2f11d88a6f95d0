//! The email sub-application.
//!
//! A thin text application used to exercise launching and focus handover:
//! it streams a banner one character per tick, collects printable input,
//! and closes itself once the input contains an `x`.

use std::collections::VecDeque;
use std::time::Duration;

use webshell_terminal::Environment;
use webshell_types::key::Key;

use crate::shell::Application;

const EMAIL_STARTUP_TEXT: &str = "Starting email...\n(press x to close)\n";

/// Per-character delay ceiling for the banner, in milliseconds.
const BANNER_DELAY_MS: f64 = 30.0;

pub struct EmailApplication {
    pending: VecDeque<char>,
    input: String,
    running: bool,
}

impl EmailApplication {
    pub fn new() -> Self {
        Self {
            pending: EMAIL_STARTUP_TEXT.chars().collect(),
            input: String::new(),
            running: true,
        }
    }
}

impl Default for EmailApplication {
    fn default() -> Self {
        Self::new()
    }
}

impl Application for EmailApplication {
    fn name(&self) -> &str {
        "email"
    }

    fn running(&self) -> bool {
        self.running
    }

    fn close(&mut self) {
        self.running = false;
    }

    fn tick(&mut self, env: &mut Environment<'_>) {
        if let Some(ch) = self.pending.pop_front() {
            let delay_ms = env.scheduler.sample_unit() * BANNER_DELAY_MS;
            env.scheduler.suspend(Duration::from_secs_f64(delay_ms / 1000.0));
            env.surface.append(ch.encode_utf8(&mut [0u8; 4]));
        }
        if self.input.contains('x') {
            log::info!("email application closing");
            self.close();
        }
    }

    fn handle_key(&mut self, key: &Key, env: &mut Environment<'_>) {
        match key {
            Key::Backspace => {
                self.input.pop();
            },
            Key::Char(ch) => {
                self.input.push(*ch);
                env.surface.append(ch.encode_utf8(&mut [0u8; 4]));
            },
            // Enter, arrows, and modifier keys mean nothing here.
            _ => {},
        }
    }

    fn ready_for_input(&self) -> bool {
        self.pending.is_empty()
    }
}
