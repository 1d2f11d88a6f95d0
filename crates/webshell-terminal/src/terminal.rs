//! The terminal: command registry composed with session state.

use std::time::Duration;

use webshell_types::config::ShellConfig;
use webshell_types::error::Result;
use webshell_types::key::Key;

use crate::commands;
use crate::input;
use crate::registry::{Command, CommandRegistry, Environment};
use crate::session::Session;
use crate::stream::StreamToken;

/// An interactive terminal session with its command table.
///
/// The host drives it with two serialized calls: `tick` once per frame to
/// drain one unit of pending output, and `handle_key` for each key event.
pub struct Terminal {
    registry: CommandRegistry,
    session: Session,
}

impl Terminal {
    /// Create a terminal with all built-in commands registered.
    pub fn new(config: &ShellConfig) -> Self {
        let mut registry = CommandRegistry::new();
        commands::register_builtins(&mut registry);
        Self {
            registry,
            session: Session::new(config),
        }
    }

    /// Register a command, replacing any existing one with the same name.
    /// Collaborators use this to extend the namespace at runtime.
    pub fn register_command(&mut self, cmd: Box<dyn Command>) {
        self.registry.register(cmd);
    }

    /// Register a closure-backed command; `help` defaults to `brief`.
    pub fn register_fn(
        &mut self,
        name: &str,
        brief: &str,
        help: Option<&str>,
        handler: impl Fn(&mut Session, &mut Environment<'_>, &[&str]) -> Result<String> + 'static,
    ) {
        self.registry.register_fn(name, brief, help, handler);
    }

    /// The command registry.
    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    /// The session state.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Append raw text (possibly containing inline directives) to the
    /// pending-output queue.
    pub fn enqueue(&mut self, text: &str) {
        self.session.enqueue(text);
    }

    /// Whether queued output remains to be streamed.
    pub fn output_pending(&self) -> bool {
        self.session.output_pending()
    }

    /// Whether keyboard input is currently processed.
    pub fn input_enabled(&self) -> bool {
        self.session.input_enabled()
    }

    /// Drain exactly one token from the pending-output queue.
    ///
    /// A literal character waits a uniform random span below the configured
    /// delay ceiling, divided by the text speed, then lands on the surface.
    /// A directive runs synchronously for its side effects. An empty (or
    /// halted) queue makes this a no-op.
    pub fn tick(&mut self, env: &mut Environment<'_>) {
        let Self { registry, session } = self;
        let Some(token) = session.stream.next_token() else {
            return;
        };
        match token {
            StreamToken::Literal(ch) => {
                let ceiling_ms = session.char_delay_ms as f64;
                let delay_ms = env.scheduler.sample_unit() * ceiling_ms / session.speed.get();
                // An extreme multiplier can push the division outside what a
                // Duration can hold; fall back to the undivided ceiling.
                let delay = Duration::try_from_secs_f64(delay_ms / 1000.0)
                    .unwrap_or(Duration::from_millis(session.char_delay_ms));
                env.scheduler.suspend(delay);
                env.surface.append(ch.encode_utf8(&mut [0u8; 4]));
                env.surface.scroll_to_end();
            },
            StreamToken::Directive(tokens) => {
                registry.run_directive(session, env, &tokens);
            },
        }
    }

    /// Process one key event (ignored while input is disabled).
    pub fn handle_key(&mut self, key: &Key, env: &mut Environment<'_>) {
        let Self { registry, session } = self;
        input::handle_key(registry, session, env, key);
    }

    /// Execute a line as if it had been typed and submitted, returning the
    /// text to display.
    pub fn dispatch(&mut self, line: &str, env: &mut Environment<'_>) -> String {
        let Self { registry, session } = self;
        registry.dispatch(session, env, line)
    }
}
