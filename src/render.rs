//! Terminal rendering: the session prompt and diagnostic lines.
//!
//! Colors are a static convention, one hue per prompt field, so the fields
//! stay visually distinguishable at a glance. All styling funnels through
//! [`Renderer`] and is disabled wholesale by `--no-color`/config.

use crossterm::style::{Color, Stylize};

use crate::session::Session;

// ---------------------------------------------------------------------------
// Colors
// ---------------------------------------------------------------------------

pub const COLOR_PROMPT_APP: Color = Color::Blue;
pub const COLOR_PROMPT_MODE: Color = Color::Red;
pub const COLOR_PROMPT_PATH: Color = Color::Green;
pub const COLOR_PROMPT_COUNTER: Color = Color::Blue;
pub const COLOR_WARNING: Color = Color::Yellow;
pub const COLOR_ERROR: Color = Color::Red;

pub const LABEL_WARNING: &str = "warning:";
pub const LABEL_ERROR: &str = "error:";

/// Writes prompt and diagnostic lines, with or without color.
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    color: bool,
}

impl Renderer {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    /// Compose the prompt string for the current session state:
    /// `{app}:{mode}:{path} ({counter})$ `.
    pub fn prompt(&self, session: &Session) -> String {
        if self.color {
            format!(
                "{}:{}:{} {}$ ",
                session.app().with(COLOR_PROMPT_APP),
                session.mode().label().with(COLOR_PROMPT_MODE),
                session.virtual_path().with(COLOR_PROMPT_PATH),
                format!("({})", session.counter()).with(COLOR_PROMPT_COUNTER),
            )
        } else {
            plain_prompt(session)
        }
    }

    /// Render a warning line to stderr.
    pub fn warn(&self, msg: &str) {
        if self.color {
            eprintln!("{} {msg}", LABEL_WARNING.with(COLOR_WARNING));
        } else {
            eprintln!("{LABEL_WARNING} {msg}");
        }
    }

    /// Render an error line to stderr.
    pub fn error(&self, msg: &str) {
        if self.color {
            eprintln!("{} {msg}", LABEL_ERROR.with(COLOR_ERROR));
        } else {
            eprintln!("{LABEL_ERROR} {msg}");
        }
    }
}

/// Uncolored prompt text; also the shape tests assert against.
pub fn plain_prompt(session: &Session) -> String {
    format!(
        "{}:{}:{} ({})$ ",
        session.app(),
        session.mode().label(),
        session.virtual_path(),
        session.counter()
    )
}
