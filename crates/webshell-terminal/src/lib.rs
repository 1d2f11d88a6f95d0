//! Terminal text-streaming and command engine.
//!
//! The terminal is a registry-based dispatch system glued to a buffered
//! output stream. Commands implement the `Command` trait and are registered
//! by name; the same namespace serves typed command lines and the inline
//! `|name,arg1,...|` directives embedded in streamed text. The host drives
//! everything through two serialized entry points: `Terminal::tick` (drain
//! one output token per frame) and `Terminal::handle_key`.

mod commands;
mod history;
mod input;
mod registry;
mod session;
mod speed;
mod stream;
mod terminal;

/// Register all built-in commands into a registry.
pub use commands::register_builtins;
/// Ordered log of submitted lines with a navigation cursor.
pub use history::History;
/// A single executable command trait.
pub use registry::Command;
/// Registry of available commands with dispatch.
pub use registry::CommandRegistry;
/// Capability bundle (surface, scheduler, clock) for one driver call.
pub use registry::Environment;
/// A closure-backed command for runtime registration.
pub use registry::FnCommand;
/// Per-session terminal state.
pub use session::Session;
/// Text speed multiplier with previous-value tracking.
pub use speed::{DEFAULT_TEXT_SPEED, TextSpeed};
/// Pending-output queue and its token type.
pub use stream::{DIRECTIVE_DELIMITER, OutputStream, StreamToken};
/// An interactive terminal session with its command table.
pub use terminal::Terminal;
