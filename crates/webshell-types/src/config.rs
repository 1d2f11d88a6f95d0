//! Session configuration.
//!
//! Loaded from a TOML file when one is provided; every field has a default
//! so a missing or partial file still yields a usable session.

use std::path::Path;

use serde::Deserialize;

use crate::error::Result;

/// Default per-character emission delay ceiling in milliseconds.
pub const DEFAULT_CHAR_DELAY_MS: u64 = 30;

/// Configuration for a terminal session.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    /// Visual insertion-point marker shown while input is enabled.
    pub cursor_glyph: String,
    /// Initial text speed multiplier. Must be positive; non-positive values
    /// fall back to `1.0` at session construction.
    pub text_speed: f64,
    /// Disable keyboard input while a submitted command executes and until
    /// its output has finished streaming.
    pub disable_input_during_command: bool,
    /// Upper bound of the random per-character delay, in milliseconds.
    pub char_delay_ms: u64,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            cursor_glyph: "_".to_string(),
            text_speed: 1.0,
            disable_input_during_command: true,
            char_delay_ms: DEFAULT_CHAR_DELAY_MS,
        }
    }
}

impl ShellConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Load a configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }
}
