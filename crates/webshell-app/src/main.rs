//! webshell host entry point.
//!
//! Drives the terminal engine over stdin/stdout: the boot banner streams in,
//! then each line read from stdin is replayed into the engine as key events.
//! `tick()` calls and key events are issued from this single loop, so all
//! engine access is serialized. Type 'help' for commands, 'exit' to quit.

mod email;
mod shell;
mod stdout_surface;

use std::io::{self, BufRead};
use std::path::Path;

use anyhow::Result;

use shell::Webshell;
use stdout_surface::StdoutSurface;
use webshell_platform::{SystemClock, ThreadScheduler};
use webshell_terminal::Environment;
use webshell_types::config::ShellConfig;
use webshell_types::key::Key;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Resolve config from the CLI arg, WEBSHELL_CONFIG env var, or defaults.
    let config = match std::env::args()
        .nth(1)
        .or_else(|| std::env::var("WEBSHELL_CONFIG").ok())
    {
        Some(path) => ShellConfig::load(Path::new(&path))?,
        None => ShellConfig::default(),
    };
    log::info!(
        "Starting webshell (text speed {}, glyph {:?})",
        config.text_speed,
        config.cursor_glyph,
    );

    let mut surface = StdoutSurface::new();
    let mut scheduler = ThreadScheduler::new();
    let clock = SystemClock::new();
    let mut shell = Webshell::new(&config);

    let stdin = io::stdin();
    while shell.any_running() {
        let mut env = Environment {
            surface: &mut surface,
            scheduler: &mut scheduler,
            clock: &clock,
        };
        shell.tick(&mut env);

        if shell.ready_for_input() {
            let mut line = String::new();
            if stdin.lock().read_line(&mut line)? == 0 {
                // EOF: the host is going away; let apps finish this frame.
                break;
            }
            let line = line.trim_end_matches(['\r', '\n']);
            for ch in line.chars() {
                shell.handle_key(&Key::Char(ch), &mut env);
            }
            shell.handle_key(&Key::Enter, &mut env);
        }
    }

    log::info!("webshell shut down cleanly");
    Ok(())
}
