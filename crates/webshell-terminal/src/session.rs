//! Mutable terminal session state.
//!
//! One `Session` exists per terminal for the lifetime of the application.
//! It owns the pending-output queue, the input history, the text-speed
//! controller, and the input-enablement state; command handlers and the key
//! handler mutate it. Nothing here touches a concrete display: all drawing
//! goes through the injected `Surface`.

use webshell_surface::Surface;
use webshell_types::config::ShellConfig;

use crate::history::History;
use crate::speed::TextSpeed;
use crate::stream::OutputStream;

/// Per-session terminal state.
#[derive(Debug)]
pub struct Session {
    pub(crate) stream: OutputStream,
    pub(crate) history: History,
    pub(crate) speed: TextSpeed,
    pub(crate) input_enabled: bool,
    pub(crate) input_buffer: String,
    pub(crate) cursor_glyph: String,
    pub(crate) disable_input_during_command: bool,
    pub(crate) char_delay_ms: u64,
}

impl Session {
    /// Create a session from configuration. Input starts disabled; it is
    /// normally switched on by an `|enableinput|` directive at the end of
    /// the startup stream.
    pub fn new(config: &ShellConfig) -> Self {
        Self {
            stream: OutputStream::new(),
            history: History::new(),
            speed: TextSpeed::new(config.text_speed),
            input_enabled: false,
            input_buffer: String::new(),
            cursor_glyph: config.cursor_glyph.clone(),
            disable_input_during_command: config.disable_input_during_command,
            char_delay_ms: config.char_delay_ms,
        }
    }

    /// Append raw text (possibly containing inline directives) to the
    /// pending-output queue.
    pub fn enqueue(&mut self, text: &str) {
        self.stream.enqueue(text);
    }

    /// Whether the queue still holds output to stream.
    pub fn output_pending(&self) -> bool {
        !self.stream.is_empty()
    }

    /// Whether a malformed directive has shut the output stream down.
    pub fn stream_halted(&self) -> bool {
        self.stream.is_halted()
    }

    /// Whether keyboard input is currently processed.
    pub fn input_enabled(&self) -> bool {
        self.input_enabled
    }

    /// Keys typed since the last Enter or Ctrl+C.
    pub fn input_buffer(&self) -> &str {
        &self.input_buffer
    }

    /// The input history log.
    pub fn history(&self) -> &History {
        &self.history
    }

    /// The text-speed controller.
    pub fn speed(&self) -> &TextSpeed {
        &self.speed
    }

    /// Mutable access to the text-speed controller.
    pub fn speed_mut(&mut self) -> &mut TextSpeed {
        &mut self.speed
    }

    /// Enable input, drawing the cursor glyph. No-op when already enabled,
    /// so the glyph is never drawn twice.
    pub fn enable_input(&mut self, surface: &mut dyn Surface) {
        if self.input_enabled {
            return;
        }
        self.input_enabled = true;
        surface.append(&self.cursor_glyph);
    }

    /// Disable input, erasing the cursor glyph. No-op when already disabled.
    pub fn disable_input(&mut self, surface: &mut dyn Surface) {
        if !self.input_enabled {
            return;
        }
        self.input_enabled = false;
        surface.erase_last(self.glyph_len());
    }

    pub(crate) fn glyph_len(&self) -> usize {
        self.cursor_glyph.chars().count()
    }
}
