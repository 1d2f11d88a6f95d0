//! Platform service traits and host implementations.
//!
//! The engine suspends and reads the clock only through these capabilities,
//! so tests can run with zero delay and a frozen timestamp.

pub mod services;

pub use services::{Clock, FixedClock, FixedScheduler, Scheduler, SystemClock, ThreadScheduler};
