//! Foundation types for webshell.
//!
//! This crate contains the types shared by all webshell crates: the error
//! enum, platform-agnostic key events, and the session configuration.

pub mod config;
pub mod error;
pub mod key;
