//! Outer application coordinator.
//!
//! `Webshell` owns the running applications and tracks which one has focus.
//! The focused application receives every tick and key event; when it stops
//! running it is removed and focus falls back to the first application still
//! alive. The terminal is started first and stays resident; other
//! applications (email) are launched from it through runtime-registered
//! commands.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use webshell_terminal::{Environment, Terminal};
use webshell_types::config::ShellConfig;
use webshell_types::key::Key;

use crate::email::EmailApplication;

/// Boot sequence streamed when the terminal starts. Ends by enabling input.
const STARTUP_TEXT: &str = "INITIALIZING|sleep,0.4|.|sleep,0.4|.|sleep,0.4|.|sleep,0.3||clearline|\
Welcome to webshell!\nType 'help' for commands\n|enableinput|";

/// Application lifecycle capability.
///
/// Everything an application does happens inside `tick` and `handle_key`,
/// against the capabilities the host passes in; the coordinator only reads
/// lifecycle state.
pub trait Application {
    /// Display name, used for logging.
    fn name(&self) -> &str;

    /// Whether the application is still alive.
    fn running(&self) -> bool;

    /// Ask the application to shut down.
    fn close(&mut self);

    /// Advance one frame.
    fn tick(&mut self, env: &mut Environment<'_>);

    /// Deliver one key event.
    fn handle_key(&mut self, key: &Key, env: &mut Environment<'_>);

    /// Whether the application has drained its output and can usefully
    /// receive input now. Line-oriented hosts use this to decide when to
    /// block on the keyboard.
    fn ready_for_input(&self) -> bool;
}

/// Requests raised by command handlers for the coordinator to act on.
///
/// Handlers return plain text, so launching an application travels through
/// this shared queue instead of the return value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppRequest {
    OpenEmail,
}

type RequestQueue = Rc<RefCell<Vec<AppRequest>>>;

// ---------------------------------------------------------------------------
// Terminal application wrapper
// ---------------------------------------------------------------------------

/// The resident terminal, adapted to the application lifecycle.
pub struct TerminalApp {
    terminal: Terminal,
    running: Rc<Cell<bool>>,
}

impl TerminalApp {
    /// Build the terminal, seed the boot stream, and register the commands
    /// that reach outside the engine (`email`, `exit`).
    pub fn new(config: &ShellConfig, requests: RequestQueue) -> Self {
        let mut terminal = Terminal::new(config);
        terminal.enqueue(STARTUP_TEXT);

        let running = Rc::new(Cell::new(true));
        let quit = Rc::clone(&running);
        terminal.register_fn(
            "exit",
            "Close the session",
            Some("exit -- close the webshell session"),
            move |_, _, _| {
                quit.set(false);
                Ok("Goodbye.".to_string())
            },
        );

        terminal.register_fn(
            "email",
            "Open the email client",
            None,
            move |_, _, _| {
                requests.borrow_mut().push(AppRequest::OpenEmail);
                Ok(String::new())
            },
        );

        Self { terminal, running }
    }
}

impl Application for TerminalApp {
    fn name(&self) -> &str {
        "terminal"
    }

    fn running(&self) -> bool {
        // A closed terminal finishes streaming what it already queued (the
        // goodbye text) before it reports itself done.
        self.running.get() || self.terminal.output_pending()
    }

    fn close(&mut self) {
        self.running.set(false);
    }

    fn tick(&mut self, env: &mut Environment<'_>) {
        self.terminal.tick(env);
    }

    fn handle_key(&mut self, key: &Key, env: &mut Environment<'_>) {
        self.terminal.handle_key(key, env);
    }

    fn ready_for_input(&self) -> bool {
        // Keys typed while input is disabled are dropped by the engine, so
        // a line host may read as soon as the stream has drained.
        !self.terminal.output_pending()
    }
}

// ---------------------------------------------------------------------------
// Coordinator
// ---------------------------------------------------------------------------

struct Slot {
    id: u64,
    app: Box<dyn Application>,
}

/// The application coordinator.
pub struct Webshell {
    slots: Vec<Slot>,
    focused: Option<u64>,
    next_id: u64,
    requests: RequestQueue,
}

impl Webshell {
    /// Create the coordinator with the terminal started and focused.
    pub fn new(config: &ShellConfig) -> Self {
        let requests: RequestQueue = Rc::new(RefCell::new(Vec::new()));
        let mut shell = Self {
            slots: Vec::new(),
            focused: None,
            next_id: 0,
            requests: Rc::clone(&requests),
        };
        shell.start(Box::new(TerminalApp::new(config, requests)));
        shell
    }

    /// Start an application and give it focus.
    pub fn start(&mut self, app: Box<dyn Application>) {
        log::info!("starting application '{}'", app.name());
        let id = self.next_id;
        self.next_id += 1;
        self.slots.push(Slot { id, app });
        self.focused = Some(id);
    }

    /// Whether any application is still running.
    pub fn any_running(&self) -> bool {
        !self.slots.is_empty()
    }

    /// Whether the focused application is ready for keyboard input.
    pub fn ready_for_input(&self) -> bool {
        self.focused_slot()
            .map(|slot| slot.app.ready_for_input())
            .unwrap_or(false)
    }

    /// Advance every running application one frame, then react to anything
    /// they requested. Only key routing is focus-dependent.
    pub fn tick(&mut self, env: &mut Environment<'_>) {
        for slot in &mut self.slots {
            slot.app.tick(env);
        }
        self.service_requests();
        self.reap();
    }

    /// Route one key event to the focused application.
    pub fn handle_key(&mut self, key: &Key, env: &mut Environment<'_>) {
        if let Some(slot) = self.focused_slot_mut() {
            slot.app.handle_key(key, env);
        }
        self.service_requests();
        self.reap();
    }

    fn focused_slot(&self) -> Option<&Slot> {
        let id = self.focused?;
        self.slots.iter().find(|slot| slot.id == id)
    }

    fn focused_slot_mut(&mut self) -> Option<&mut Slot> {
        let id = self.focused?;
        self.slots.iter_mut().find(|slot| slot.id == id)
    }

    fn service_requests(&mut self) {
        let pending: Vec<AppRequest> = self.requests.borrow_mut().drain(..).collect();
        for request in pending {
            match request {
                AppRequest::OpenEmail => self.start(Box::new(EmailApplication::new())),
            }
        }
    }

    /// Drop applications that stopped running; if the focused one is among
    /// them, focus falls back to the first survivor.
    fn reap(&mut self) {
        if self.slots.iter().all(|slot| slot.app.running()) {
            return;
        }
        for slot in self.slots.iter().filter(|slot| !slot.app.running()) {
            log::info!("application '{}' finished", slot.app.name());
        }
        self.slots.retain(|slot| slot.app.running());
        let focus_still_alive = self
            .focused
            .is_some_and(|id| self.slots.iter().any(|slot| slot.id == id));
        if !focus_still_alive {
            self.focused = self.slots.first().map(|slot| slot.id);
        }
    }
}
