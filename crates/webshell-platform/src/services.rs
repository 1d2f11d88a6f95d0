//! Clock and scheduler capabilities with desktop implementations.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use rand::Rng;

use webshell_types::error::{Result, ShellError};

// ---------------------------------------------------------------------------
// Clock
// ---------------------------------------------------------------------------

/// Abstraction over wall-clock time.
pub trait Clock {
    /// Milliseconds since the Unix epoch.
    fn now_millis(&self) -> Result<u64>;
}

/// Wall clock backed by the system time.
#[derive(Debug, Default)]
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        Self
    }
}

impl Clock for SystemClock {
    fn now_millis(&self) -> Result<u64> {
        let elapsed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| ShellError::Platform(format!("system clock before epoch: {e}")))?;
        Ok(elapsed.as_millis() as u64)
    }
}

/// A clock frozen at a fixed instant. Useful for unit tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    millis: u64,
}

impl FixedClock {
    pub fn new(millis: u64) -> Self {
        Self { millis }
    }
}

impl Clock for FixedClock {
    fn now_millis(&self) -> Result<u64> {
        Ok(self.millis)
    }
}

// ---------------------------------------------------------------------------
// Scheduler
// ---------------------------------------------------------------------------

/// Cooperative suspension and delay jitter.
///
/// The engine has exactly two suspension points (the per-character streaming
/// delay and the `sleep` command); both go through `suspend`. `sample_unit`
/// feeds the randomized portion of the streaming delay.
pub trait Scheduler {
    /// Suspend the caller for the given duration.
    fn suspend(&mut self, duration: Duration);

    /// A uniform sample from `[0, 1)`.
    fn sample_unit(&mut self) -> f64;
}

/// Scheduler for hosts that drive the engine from a plain thread: suspension
/// blocks the thread, jitter comes from the thread-local RNG.
#[derive(Debug, Default)]
pub struct ThreadScheduler;

impl ThreadScheduler {
    pub fn new() -> Self {
        Self
    }
}

impl Scheduler for ThreadScheduler {
    fn suspend(&mut self, duration: Duration) {
        if !duration.is_zero() {
            std::thread::sleep(duration);
        }
    }

    fn sample_unit(&mut self) -> f64 {
        rand::rng().random::<f64>()
    }
}

/// Deterministic scheduler. Returns a fixed sample, never sleeps, and
/// records every requested suspension. Useful for unit tests.
#[derive(Debug)]
pub struct FixedScheduler {
    unit: f64,
    suspensions: Vec<Duration>,
}

impl FixedScheduler {
    /// Create a scheduler whose `sample_unit` always returns `unit`.
    pub fn new(unit: f64) -> Self {
        Self {
            unit,
            suspensions: Vec::new(),
        }
    }

    /// Every duration passed to `suspend`, in call order.
    pub fn suspensions(&self) -> &[Duration] {
        &self.suspensions
    }

    /// Total suspended time.
    pub fn total_suspended(&self) -> Duration {
        self.suspensions.iter().sum()
    }
}

impl Default for FixedScheduler {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl Scheduler for FixedScheduler {
    fn suspend(&mut self, duration: Duration) {
        self.suspensions.push(duration);
    }

    fn sample_unit(&mut self) -> f64 {
        self.unit
    }
}
