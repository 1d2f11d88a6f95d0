//! Built-in commands for the webshell terminal.
//!
//! Every builtin is usable both as a typed command and as an inline
//! `|name,args|` directive; the directive form discards the return text.

use std::time::Duration;

use webshell_types::error::Result;

use crate::registry::{Command, CommandRegistry, Environment};
use crate::session::Session;

/// Register all built-in commands into a registry.
pub fn register_builtins(reg: &mut CommandRegistry) {
    reg.register(Box::new(HelpCmd));
    reg.register(Box::new(TimeCmd));
    reg.register(Box::new(EchoCmd));
    reg.register(Box::new(ClearCmd));
    reg.register(Box::new(ClearLineCmd));
    reg.register(Box::new(EnableInputCmd));
    reg.register(Box::new(DisableInputCmd));
    reg.register(Box::new(SleepCmd));
    reg.register(Box::new(TextSpeedCmd));
}

// ---------------------------------------------------------------------------
// help
// ---------------------------------------------------------------------------

struct HelpCmd;
impl Command for HelpCmd {
    fn name(&self) -> &str {
        "help"
    }
    fn brief(&self) -> &str {
        "List available commands"
    }
    fn help(&self) -> &str {
        "help [command] -- list all commands, or show details for one"
    }
    fn execute(
        &self,
        _session: &mut Session,
        _env: &mut Environment<'_>,
        _args: &[&str],
    ) -> Result<String> {
        // The dispatcher intercepts `help` and renders the listing from the
        // registry; this entry exists for its metadata and so the name is
        // reserved in the shared namespace.
        Ok("Type 'help' at the prompt for a list of commands.".to_string())
    }
}

// ---------------------------------------------------------------------------
// time
// ---------------------------------------------------------------------------

struct TimeCmd;
impl Command for TimeCmd {
    fn name(&self) -> &str {
        "time"
    }
    fn brief(&self) -> &str {
        "Print the current Unix timestamp in milliseconds"
    }
    fn execute(
        &self,
        _session: &mut Session,
        env: &mut Environment<'_>,
        _args: &[&str],
    ) -> Result<String> {
        Ok(env.clock.now_millis()?.to_string())
    }
}

// ---------------------------------------------------------------------------
// echo
// ---------------------------------------------------------------------------

struct EchoCmd;
impl Command for EchoCmd {
    fn name(&self) -> &str {
        "echo"
    }
    fn brief(&self) -> &str {
        "Print text"
    }
    fn help(&self) -> &str {
        "echo [text...] -- print the arguments joined by single spaces"
    }
    fn execute(
        &self,
        _session: &mut Session,
        _env: &mut Environment<'_>,
        args: &[&str],
    ) -> Result<String> {
        Ok(args.get(1..).unwrap_or_default().join(" "))
    }
}

// ---------------------------------------------------------------------------
// clear
// ---------------------------------------------------------------------------

struct ClearCmd;
impl Command for ClearCmd {
    fn name(&self) -> &str {
        "clear"
    }
    fn brief(&self) -> &str {
        "Erase all rendered text"
    }
    fn execute(
        &self,
        _session: &mut Session,
        env: &mut Environment<'_>,
        _args: &[&str],
    ) -> Result<String> {
        env.surface.clear_all();
        Ok(String::new())
    }
}

// ---------------------------------------------------------------------------
// clearline
// ---------------------------------------------------------------------------

struct ClearLineCmd;
impl Command for ClearLineCmd {
    fn name(&self) -> &str {
        "clearline"
    }
    fn brief(&self) -> &str {
        "Erase back to the last newline"
    }
    fn execute(
        &self,
        _session: &mut Session,
        env: &mut Environment<'_>,
        _args: &[&str],
    ) -> Result<String> {
        env.surface.clear_to_last_newline();
        Ok(String::new())
    }
}

// ---------------------------------------------------------------------------
// enableinput / disableinput
// ---------------------------------------------------------------------------

struct EnableInputCmd;
impl Command for EnableInputCmd {
    fn name(&self) -> &str {
        "enableinput"
    }
    fn brief(&self) -> &str {
        "Enable keyboard input"
    }
    fn execute(
        &self,
        session: &mut Session,
        env: &mut Environment<'_>,
        _args: &[&str],
    ) -> Result<String> {
        session.enable_input(env.surface);
        Ok(String::new())
    }
}

struct DisableInputCmd;
impl Command for DisableInputCmd {
    fn name(&self) -> &str {
        "disableinput"
    }
    fn brief(&self) -> &str {
        "Disable keyboard input"
    }
    fn execute(
        &self,
        session: &mut Session,
        env: &mut Environment<'_>,
        _args: &[&str],
    ) -> Result<String> {
        session.disable_input(env.surface);
        Ok(String::new())
    }
}

// ---------------------------------------------------------------------------
// sleep
// ---------------------------------------------------------------------------

struct SleepCmd;
impl Command for SleepCmd {
    fn name(&self) -> &str {
        "sleep"
    }
    fn brief(&self) -> &str {
        "Pause for a number of seconds"
    }
    fn help(&self) -> &str {
        "sleep <seconds> -- suspend this command for the given duration"
    }
    fn execute(
        &self,
        _session: &mut Session,
        env: &mut Environment<'_>,
        args: &[&str],
    ) -> Result<String> {
        // Malformed or unrepresentable input falls back to 1 second;
        // negatives clamp to zero.
        let raw = args
            .get(1)
            .and_then(|s| s.parse::<f64>().ok())
            .unwrap_or(1.0);
        let duration =
            Duration::try_from_secs_f64(raw.max(0.0)).unwrap_or(Duration::from_secs(1));
        env.scheduler.suspend(duration);
        Ok(String::new())
    }
}

// ---------------------------------------------------------------------------
// textspeed
// ---------------------------------------------------------------------------

struct TextSpeedCmd;
impl Command for TextSpeedCmd {
    fn name(&self) -> &str {
        "textspeed"
    }
    fn brief(&self) -> &str {
        "Get or set the text speed multiplier"
    }
    fn help(&self) -> &str {
        "textspeed [multiplier] -- show the current multiplier, or set it \
         (higher is faster; must be positive)"
    }
    fn execute(
        &self,
        session: &mut Session,
        _env: &mut Environment<'_>,
        args: &[&str],
    ) -> Result<String> {
        let Some(arg) = args.get(1) else {
            return Ok(format!("text speed: {}", session.speed().get()));
        };
        // Unparsable input silently becomes 1; a parsed non-positive value
        // is rejected by the controller and never persisted.
        let value = arg.parse::<f64>().unwrap_or(1.0);
        session.speed_mut().set(value)?;
        Ok(format!("text speed set to {value}"))
    }
}
