//! Command trait, registry, and dispatch logic.
//!
//! Dispatched commands and inline directives share one namespace: a single
//! ordered table mapping names to handlers plus listing metadata. Handlers
//! return plain text; the dispatcher turns every failure mode (unknown name,
//! handler error) into ordinary output so a bad command can never take the
//! session down.

use indexmap::IndexMap;

use webshell_platform::{Clock, Scheduler};
use webshell_surface::Surface;
use webshell_types::error::Result;

use crate::session::Session;

/// Capabilities handed to the engine for one driver call.
///
/// The host constructs this around its rendering surface, scheduler, and
/// clock; the engine never owns a concrete implementation of any of them.
pub struct Environment<'a> {
    /// The rendering surface.
    pub surface: &'a mut dyn Surface,
    /// Cooperative suspension and delay jitter.
    pub scheduler: &'a mut dyn Scheduler,
    /// Wall-clock time.
    pub clock: &'a dyn Clock,
}

/// A single executable command.
pub trait Command {
    /// The command name (what the user types, and what directives refer to).
    fn name(&self) -> &str;

    /// One-line description for the `help` listing.
    fn brief(&self) -> &str;

    /// Detailed help text. Defaults to the brief description.
    fn help(&self) -> &str {
        self.brief()
    }

    /// Execute the command. `args` is the full token list, name included,
    /// so `args[0]` is the command name as invoked.
    fn execute(
        &self,
        session: &mut Session,
        env: &mut Environment<'_>,
        args: &[&str],
    ) -> Result<String>;
}

type HandlerFn = dyn Fn(&mut Session, &mut Environment<'_>, &[&str]) -> Result<String>;

/// A command built from a closure plus metadata, for runtime registration
/// by outer collaborators (e.g. a coordinator adding an app-launching
/// command).
pub struct FnCommand {
    name: String,
    brief: String,
    help: Option<String>,
    handler: Box<HandlerFn>,
}

impl FnCommand {
    /// Wrap a closure as a command. `help` falls back to `brief` when
    /// omitted.
    pub fn new(
        name: &str,
        brief: &str,
        help: Option<&str>,
        handler: impl Fn(&mut Session, &mut Environment<'_>, &[&str]) -> Result<String> + 'static,
    ) -> Self {
        Self {
            name: name.to_string(),
            brief: brief.to_string(),
            help: help.map(str::to_string),
            handler: Box::new(handler),
        }
    }
}

impl Command for FnCommand {
    fn name(&self) -> &str {
        &self.name
    }

    fn brief(&self) -> &str {
        &self.brief
    }

    fn help(&self) -> &str {
        self.help.as_deref().unwrap_or(&self.brief)
    }

    fn execute(
        &self,
        session: &mut Session,
        env: &mut Environment<'_>,
        args: &[&str],
    ) -> Result<String> {
        (self.handler)(session, env, args)
    }
}

/// Registry of available commands with dispatch.
///
/// Registration order is preserved for listing; registering an existing
/// name replaces the handler without moving the entry.
#[derive(Default)]
pub struct CommandRegistry {
    commands: IndexMap<String, Box<dyn Command>>,
}

impl CommandRegistry {
    /// Create an empty command registry.
    pub fn new() -> Self {
        Self {
            commands: IndexMap::new(),
        }
    }

    /// Register a command. Replaces any existing command with the same name.
    pub fn register(&mut self, cmd: Box<dyn Command>) {
        self.commands.insert(cmd.name().to_string(), cmd);
    }

    /// Register a closure-backed command (see `FnCommand`).
    pub fn register_fn(
        &mut self,
        name: &str,
        brief: &str,
        help: Option<&str>,
        handler: impl Fn(&mut Session, &mut Environment<'_>, &[&str]) -> Result<String> + 'static,
    ) {
        self.register(Box::new(FnCommand::new(name, brief, help, handler)));
    }

    /// Whether a command is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    /// `(name, brief)` pairs in registration order. The iterator is cheap
    /// to restart; `help` with no argument walks it.
    pub fn list_all(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.commands.values().map(|c| (c.name(), c.brief()))
    }

    /// Help text for `name`, or an unknown-command message.
    pub fn lookup_help(&self, name: &str) -> String {
        match self.commands.get(name) {
            Some(cmd) => cmd.help().to_string(),
            None => format!("Unknown command '{name}'"),
        }
    }

    /// Execute a submitted line and return the text to display.
    ///
    /// The raw line is recorded into history before anything else, even if
    /// it names no known command. Empty (after trimming) lines are a no-op
    /// producing empty output. Unknown names and handler failures come back
    /// as ordinary text, never as errors.
    pub fn dispatch(
        &self,
        session: &mut Session,
        env: &mut Environment<'_>,
        raw_line: &str,
    ) -> String {
        session.history.submit(raw_line);

        let trimmed = raw_line.trim();
        if trimmed.is_empty() {
            return String::new();
        }
        let tokens: Vec<&str> = trimmed.split_whitespace().collect();
        let name = tokens[0];

        // `help` renders from the registry itself, which handlers cannot
        // borrow, so the dispatcher intercepts it.
        if name == "help" {
            return self.render_help(&tokens);
        }

        match self.commands.get(name) {
            Some(cmd) => match cmd.execute(session, env, &tokens) {
                Ok(output) => output,
                Err(e) => {
                    log::debug!("command '{name}' failed: {e}");
                    format!("command '{name}' failed: {e}")
                },
            },
            None => format!("Unknown command '{name}'"),
        }
    }

    /// Execute an inline directive for its side effects.
    ///
    /// Directives are a best-effort side channel: an unknown name is
    /// silently skipped, a handler failure is logged and swallowed, and the
    /// return value is discarded.
    pub fn run_directive(
        &self,
        session: &mut Session,
        env: &mut Environment<'_>,
        tokens: &[String],
    ) {
        let name = tokens.first().map(String::as_str).unwrap_or("");
        let Some(cmd) = self.commands.get(name) else {
            log::trace!("skipping unknown inline directive '{name}'");
            return;
        };
        let args: Vec<&str> = tokens.iter().map(String::as_str).collect();
        if let Err(e) = cmd.execute(session, env, &args) {
            log::debug!("inline directive '{name}' failed: {e}");
        }
    }

    fn render_help(&self, tokens: &[&str]) -> String {
        if let Some(&name) = tokens.get(1) {
            return self.lookup_help(name);
        }
        let mut out = String::new();
        for (name, brief) in self.list_all() {
            out.push_str(&format!("{name:<14}{brief}\n"));
        }
        out.push_str("\nType 'help <command>' for details.");
        out
    }
}

#[cfg(test)]
mod tests {
    use webshell_platform::{FixedClock, FixedScheduler};
    use webshell_surface::MemorySurface;
    use webshell_types::config::ShellConfig;
    use webshell_types::error::ShellError;

    use super::*;

    struct EchoBack;
    impl Command for EchoBack {
        fn name(&self) -> &str {
            "echoback"
        }
        fn brief(&self) -> &str {
            "Echo the tokens back"
        }
        fn execute(
            &self,
            _session: &mut Session,
            _env: &mut Environment<'_>,
            args: &[&str],
        ) -> Result<String> {
            Ok(args.join("/"))
        }
    }

    struct Failing;
    impl Command for Failing {
        fn name(&self) -> &str {
            "explode"
        }
        fn brief(&self) -> &str {
            "Always fails"
        }
        fn execute(
            &self,
            _session: &mut Session,
            _env: &mut Environment<'_>,
            _args: &[&str],
        ) -> Result<String> {
            Err(ShellError::Command("boom".to_string()))
        }
    }

    fn dispatch_one(reg: &CommandRegistry, session: &mut Session, line: &str) -> String {
        let mut surface = MemorySurface::new();
        let mut scheduler = FixedScheduler::new(0.0);
        let clock = FixedClock::new(0);
        let mut env = Environment {
            surface: &mut surface,
            scheduler: &mut scheduler,
            clock: &clock,
        };
        reg.dispatch(session, &mut env, line)
    }

    fn session() -> Session {
        Session::new(&ShellConfig::default())
    }

    #[test]
    fn dispatch_passes_full_token_list() {
        let mut reg = CommandRegistry::new();
        reg.register(Box::new(EchoBack));
        let mut s = session();
        assert_eq!(dispatch_one(&reg, &mut s, "echoback a b"), "echoback/a/b");
    }

    #[test]
    fn dispatch_records_history_even_for_unknown_names() {
        let reg = CommandRegistry::new();
        let mut s = session();
        let out = dispatch_one(&reg, &mut s, "nonsense");
        assert_eq!(out, "Unknown command 'nonsense'");
        assert_eq!(s.history().entries(), &["nonsense".to_string()]);
    }

    #[test]
    fn dispatch_collapses_whitespace_between_tokens() {
        let mut reg = CommandRegistry::new();
        reg.register(Box::new(EchoBack));
        let mut s = session();
        assert_eq!(
            dispatch_one(&reg, &mut s, "  echoback   x  "),
            "echoback/x"
        );
    }

    #[test]
    fn empty_line_is_a_noop_but_recorded() {
        let reg = CommandRegistry::new();
        let mut s = session();
        assert_eq!(dispatch_one(&reg, &mut s, "   "), "");
        assert_eq!(s.history().len(), 1);
    }

    #[test]
    fn handler_failure_becomes_output_text() {
        let mut reg = CommandRegistry::new();
        reg.register(Box::new(Failing));
        let mut s = session();
        let out = dispatch_one(&reg, &mut s, "explode now");
        assert!(out.starts_with("command 'explode' failed:"));
        assert!(out.contains("boom"));
    }

    #[test]
    fn register_overwrites_in_place() {
        let mut reg = CommandRegistry::new();
        reg.register(Box::new(EchoBack));
        reg.register(Box::new(Failing));
        reg.register_fn("echoback", "Replacement", None, |_, _, _| {
            Ok("replaced".to_string())
        });
        let listed: Vec<(&str, &str)> = reg.list_all().collect();
        // Overwriting keeps the original position and updates metadata.
        assert_eq!(
            listed,
            vec![("echoback", "Replacement"), ("explode", "Always fails")]
        );
        let mut s = session();
        assert_eq!(dispatch_one(&reg, &mut s, "echoback"), "replaced");
    }

    #[test]
    fn list_all_preserves_registration_order() {
        let mut reg = CommandRegistry::new();
        reg.register_fn("zeta", "z", None, |_, _, _| Ok(String::new()));
        reg.register_fn("alpha", "a", None, |_, _, _| Ok(String::new()));
        reg.register_fn("mid", "m", None, |_, _, _| Ok(String::new()));
        let names: Vec<&str> = reg.list_all().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn list_all_is_restartable() {
        let mut reg = CommandRegistry::new();
        reg.register(Box::new(EchoBack));
        assert_eq!(reg.list_all().count(), 1);
        assert_eq!(reg.list_all().count(), 1);
    }

    #[test]
    fn lookup_help_defaults_to_brief() {
        let mut reg = CommandRegistry::new();
        reg.register_fn("x", "brief", None, |_, _, _| Ok(String::new()));
        assert_eq!(reg.lookup_help("x"), "brief");
    }

    #[test]
    fn lookup_help_prefers_explicit_help() {
        let mut reg = CommandRegistry::new();
        reg.register_fn("x", "brief", Some("x <arg> -- detailed"), |_, _, _| {
            Ok(String::new())
        });
        assert_eq!(reg.lookup_help("x"), "x <arg> -- detailed");
    }

    #[test]
    fn lookup_help_unknown_name() {
        let reg = CommandRegistry::new();
        assert_eq!(reg.lookup_help("ghost"), "Unknown command 'ghost'");
    }

    #[test]
    fn help_listing_walks_registration_order() {
        let mut reg = CommandRegistry::new();
        reg.register_fn("b", "second", None, |_, _, _| Ok(String::new()));
        reg.register_fn("a", "first", None, |_, _, _| Ok(String::new()));
        let mut s = session();
        let out = dispatch_one(&reg, &mut s, "help");
        let b_pos = out.find("b ").unwrap();
        let a_pos = out.find("a ").unwrap();
        assert!(b_pos < a_pos);
        assert!(out.contains("Type 'help <command>' for details."));
    }

    #[test]
    fn help_with_argument_shows_help_text() {
        let mut reg = CommandRegistry::new();
        reg.register_fn("x", "brief", Some("long form"), |_, _, _| {
            Ok(String::new())
        });
        let mut s = session();
        assert_eq!(dispatch_one(&reg, &mut s, "help x"), "long form");
        assert_eq!(
            dispatch_one(&reg, &mut s, "help ghost"),
            "Unknown command 'ghost'"
        );
    }

    #[test]
    fn run_directive_unknown_name_is_silent() {
        let reg = CommandRegistry::new();
        let mut s = session();
        let mut surface = MemorySurface::new();
        let mut scheduler = FixedScheduler::new(0.0);
        let clock = FixedClock::new(0);
        let mut env = Environment {
            surface: &mut surface,
            scheduler: &mut scheduler,
            clock: &clock,
        };
        reg.run_directive(&mut s, &mut env, &["bogus".to_string()]);
        assert_eq!(surface.contents(), "");
        assert!(s.history().is_empty());
    }

    #[test]
    fn run_directive_swallows_handler_errors() {
        let mut reg = CommandRegistry::new();
        reg.register(Box::new(Failing));
        let mut s = session();
        let mut surface = MemorySurface::new();
        let mut scheduler = FixedScheduler::new(0.0);
        let clock = FixedClock::new(0);
        let mut env = Environment {
            surface: &mut surface,
            scheduler: &mut scheduler,
            clock: &clock,
        };
        reg.run_directive(&mut s, &mut env, &["explode".to_string()]);
    }

    #[test]
    fn run_directive_passes_all_tokens() {
        let mut reg = CommandRegistry::new();
        reg.register_fn("probe", "p", None, |session, _, args| {
            session.enqueue(&args.join("/"));
            Ok(String::new())
        });
        let mut s = session();
        let mut surface = MemorySurface::new();
        let mut scheduler = FixedScheduler::new(0.0);
        let clock = FixedClock::new(0);
        let mut env = Environment {
            surface: &mut surface,
            scheduler: &mut scheduler,
            clock: &clock,
        };
        reg.run_directive(
            &mut s,
            &mut env,
            &["probe".to_string(), "1".to_string(), "2".to_string()],
        );
        assert!(s.output_pending());
    }
}
