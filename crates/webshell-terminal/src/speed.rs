//! Text-speed controller.
//!
//! Holds the multiplier dividing the per-character emission delay: a higher
//! multiplier means faster "typing".

use webshell_types::error::{Result, ShellError};

/// The factory-default text speed multiplier.
pub const DEFAULT_TEXT_SPEED: f64 = 1.0;

/// Current and previous text speed multipliers.
#[derive(Debug, Clone, Copy)]
pub struct TextSpeed {
    current: f64,
    previous: f64,
}

impl TextSpeed {
    /// Create a controller at the given multiplier. Non-positive or
    /// non-finite values fall back to the default.
    pub fn new(initial: f64) -> Self {
        let initial = if initial.is_finite() && initial > 0.0 {
            initial
        } else {
            DEFAULT_TEXT_SPEED
        };
        Self {
            current: initial,
            previous: initial,
        }
    }

    /// Current multiplier.
    pub fn get(&self) -> f64 {
        self.current
    }

    /// Multiplier in effect before the last `set` or `reset`.
    pub fn previous(&self) -> f64 {
        self.previous
    }

    /// Set the multiplier, remembering the outgoing value.
    ///
    /// A non-positive or non-finite value is never persisted.
    pub fn set(&mut self, value: f64) -> Result<()> {
        if !value.is_finite() || value <= 0.0 {
            return Err(ShellError::Command(format!(
                "text speed must be a positive number, got {value}"
            )));
        }
        self.previous = self.current;
        self.current = value;
        Ok(())
    }

    /// Restore the fixed default multiplier (not the previous value).
    pub fn reset(&mut self) {
        self.previous = self.current;
        self.current = DEFAULT_TEXT_SPEED;
    }
}

impl Default for TextSpeed {
    fn default() -> Self {
        Self::new(DEFAULT_TEXT_SPEED)
    }
}
