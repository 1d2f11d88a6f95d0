//! Keyboard handling: the input-enablement state machine.
//!
//! Keys are only processed while input is enabled; everything is ignored
//! while disabled. The cursor glyph is erased before and redrawn after any
//! edit so it always trails the typed text.

use webshell_types::key::Key;

use crate::registry::{CommandRegistry, Environment};
use crate::session::Session;

/// Process one key event against the session.
pub(crate) fn handle_key(
    registry: &CommandRegistry,
    session: &mut Session,
    env: &mut Environment<'_>,
    key: &Key,
) {
    if !session.input_enabled {
        return;
    }

    match key {
        Key::Enter => {
            // With disable-during-execution on, input stays off until the
            // queued output (including this command's) finishes streaming;
            // the trailing directive turns it back on.
            let reenable = session.disable_input_during_command;
            if reenable {
                session.disable_input(env.surface);
            }

            env.surface.append("\n");

            let line = session.input_buffer.trim().to_string();
            session.input_buffer.clear();
            if !line.is_empty() {
                let output = registry.dispatch(session, env, &line);
                session.enqueue(&output);
                session.enqueue("\n");
            }

            if reenable {
                session.enqueue("|enableinput|");
            }
        },
        Key::Backspace => {
            // Remove the glyph, drop at most one buffered character from
            // the display, and redraw the glyph in place.
            env.surface.erase_last(session.glyph_len());
            if session.input_buffer.pop().is_some() {
                env.surface.erase_last(1);
            }
            env.surface.append(&session.cursor_glyph);
        },
        Key::ArrowUp => {
            let current = session.input_buffer.clone();
            if let Some(entry) = session.history.navigate_up(&current) {
                redraw_line(session, env, entry);
            }
        },
        Key::ArrowDown => {
            if let Some(entry) = session.history.navigate_down() {
                redraw_line(session, env, entry);
            }
        },
        Key::CtrlC => {
            session.input_buffer.clear();
            env.surface.erase_last(session.glyph_len());
            env.surface.append("^c\n");
            env.surface.append(&session.cursor_glyph);
        },
        Key::Char(ch) => {
            env.surface.erase_last(session.glyph_len());
            session.input_buffer.push(*ch);
            env.surface.append(ch.encode_utf8(&mut [0u8; 4]));
            env.surface.append(&session.cursor_glyph);
        },
        // Modifier and other named keys ("Shift", "Control", ...) display
        // nothing and change nothing.
        Key::Named(_) => {},
    }
}

/// Replace the displayed input line with a history entry.
fn redraw_line(session: &mut Session, env: &mut Environment<'_>, entry: String) {
    session.input_buffer = entry;
    env.surface.clear_to_last_newline();
    env.surface.append(&session.input_buffer);
    env.surface.append(&session.cursor_glyph);
}
