//! Error types for webshell.

use std::io;

/// Errors produced by the webshell framework.
#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    #[error("command error: {0}")]
    Command(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("stream error: {0}")]
    Stream(String),

    #[error("platform error: {0}")]
    Platform(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, ShellError>;
