//! Unified error types for the shell.

use std::fmt;

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Errors when loading or parsing configuration.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Toml(toml::de::Error),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "io: {e}"),
            Self::Toml(e) => write!(f, "toml: {e}"),
            Self::Invalid(msg) => write!(f, "invalid config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        Self::Toml(e)
    }
}

// ---------------------------------------------------------------------------
// RemoteError
// ---------------------------------------------------------------------------

/// Errors from invoking the platform CLI as a child process.
#[derive(Debug)]
pub enum RemoteError {
    /// The platform CLI binary could not be started at all.
    Spawn { binary: String, source: std::io::Error },
    /// A remote command ran and exited with a non-zero status.
    ///
    /// The whole shell terminates with this status; there is no retry.
    Exit(i32),
    /// The startup working-directory probe produced unusable output.
    Probe(String),
}

impl RemoteError {
    /// Process exit status the shell should terminate with for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Exit(code) => *code,
            Self::Spawn { .. } | Self::Probe(_) => 1,
        }
    }
}

impl fmt::Display for RemoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Spawn { binary, source } => write!(f, "failed to run {binary}: {source}"),
            Self::Exit(code) => write!(f, "remote command exited with status {code}"),
            Self::Probe(msg) => write!(f, "could not determine remote working directory: {msg}"),
        }
    }
}

impl std::error::Error for RemoteError {}
