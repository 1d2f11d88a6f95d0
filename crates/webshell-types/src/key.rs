//! Platform-agnostic key events.
//!
//! Every host maps its native keyboard input to this enum. The engine never
//! sees raw platform key codes.

use serde::{Deserialize, Serialize};

/// A single key event delivered to the terminal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    /// Submit the current input line.
    Enter,
    /// Delete one character left of the insertion point.
    Backspace,
    /// Navigate backwards through input history.
    ArrowUp,
    /// Navigate forwards through input history.
    ArrowDown,
    /// Interrupt: discard the current input line.
    CtrlC,
    /// A single printable character.
    Char(char),
    /// Any other named key ("Shift", "Control", "F1", ...). Ignored by the
    /// terminal, carried so hosts can forward everything they receive.
    Named(String),
}

impl Key {
    /// Map a host key name (DOM `KeyboardEvent.key` style) to a `Key`.
    ///
    /// Single-character names become `Char`; `ctrl` turns a lone `c` into
    /// `CtrlC`. Everything else is passed through as `Named`.
    pub fn from_name(name: &str, ctrl: bool) -> Self {
        match name {
            "Enter" => Key::Enter,
            "Backspace" => Key::Backspace,
            "ArrowUp" => Key::ArrowUp,
            "ArrowDown" => Key::ArrowDown,
            _ => {
                let mut chars = name.chars();
                match (chars.next(), chars.next()) {
                    (Some('c'), None) if ctrl => Key::CtrlC,
                    (Some(ch), None) => Key::Char(ch),
                    _ => Key::Named(name.to_string()),
                }
            },
        }
    }
}
