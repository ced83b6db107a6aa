//! Per-process session state for one target application.
//!
//! A [`Session`] owns everything the prompt and the remote dispatch need:
//! the application name, the virtual working directory, the execution mode,
//! and the command counter. Only built-in commands mutate it.

use crate::vpath;

/// Execution mode for remote commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Run each command on a single unit of the application.
    Once,
    /// Run each command on every unit of the application.
    All,
}

impl Mode {
    /// Short label shown in the prompt.
    pub fn label(self) -> &'static str {
        match self {
            Self::Once => "once",
            Self::All => "all",
        }
    }
}

/// Mutable state for one interactive session.
///
/// Created once at startup after the remote side reports its working
/// directory; lives until exit or end-of-input.
#[derive(Debug, Clone)]
pub struct Session {
    app: String,
    virtual_path: String,
    mode: Mode,
    counter: u64,
}

impl Session {
    /// Create a session rooted at the remote side's reported directory.
    pub fn new(app: impl Into<String>, initial_path: &str) -> Self {
        Self {
            app: app.into(),
            virtual_path: vpath::normalize(initial_path),
            mode: Mode::Once,
            counter: 1,
        }
    }

    pub fn app(&self) -> &str {
        &self.app
    }

    pub fn virtual_path(&self) -> &str {
        &self.virtual_path
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn counter(&self) -> u64 {
        self.counter
    }

    /// Change the virtual working directory.
    ///
    /// No argument resets to `/`. The resolution is lexical only; the remote
    /// filesystem is never consulted.
    pub fn change_directory(&mut self, arg: Option<&str>) {
        self.virtual_path = match arg.map(str::trim).filter(|s| !s.is_empty()) {
            None => "/".to_string(),
            Some(path) => vpath::resolve(&self.virtual_path, path),
        };
    }

    /// Switch execution mode, returning the confirmation line to display.
    pub fn set_mode(&mut self, mode: Mode) -> String {
        self.mode = mode;
        match mode {
            Mode::Once => format!("commands now run on a single unit of {}", self.app),
            Mode::All => format!("commands now run on every unit of {}", self.app),
        }
    }

    /// Advance the command counter.
    ///
    /// Called exactly once per fully processed input line, after all side
    /// effects of that line, including failures.
    pub fn advance(&mut self) {
        self.counter += 1;
    }
}
