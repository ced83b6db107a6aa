//! Help-output sanitization.
//!
//! The platform CLI's help text is written for one-shot invocation from a
//! login shell, so parts of it are noise inside an interactive session: the
//! version banner, the full `Usage: <tool> ...` header, the `--app` flag (the
//! session is already bound to one application), and the app-name guessing
//! note. This module rewrites captured help text into the local form, mapping
//! the canonical subcommand name to the local keyword when one exists.
//!
//! Every rewrite is idempotent: applying [`sanitize`] to its own output
//! changes nothing.

/// Rewrite captured help text for display inside the shell.
pub fn sanitize(text: &str, tool: &str, canonical: &str, alias: Option<&str>) -> String {
    let mut out = String::with_capacity(text.len());
    let mut previous_blank = false;
    for line in text.lines() {
        if is_version_banner(line, tool) || is_app_guess_note(line) {
            continue;
        }
        let line = rewrite_usage_header(line, tool);
        let line = strip_app_flag(&line);

        // Collapse runs of blank lines down to a single separator.
        let blank = line.trim().is_empty();
        if blank && previous_blank {
            continue;
        }
        previous_blank = blank;
        out.push_str(line.trim_end());
        out.push('\n');
    }

    let mut out = out.trim().to_string();
    if let Some(alias) = alias {
        out = out.replace(canonical, alias);
    }
    out
}

/// True for lines like `tsuru version 1.2.3.`.
fn is_version_banner(line: &str, tool: &str) -> bool {
    let trimmed = line.trim();
    trimmed
        .strip_prefix(tool)
        .and_then(|rest| rest.trim_start().strip_prefix("version"))
        .map(str::trim_start)
        .is_some_and(|rest| rest.starts_with(|ch: char| ch.is_ascii_digit()))
}

/// True for the app-name auto-detection note, which does not apply when the
/// session is already bound to one application.
fn is_app_guess_note(line: &str) -> bool {
    let lowered = line.to_ascii_lowercase();
    lowered.contains("app") && lowered.contains("try to guess")
}

/// Shorten `Usage: <tool> <rest>` to `usage: <rest>`.
fn rewrite_usage_header(line: &str, tool: &str) -> String {
    let trimmed = line.trim_start();
    let lowered = trimmed.to_ascii_lowercase();
    let Some(rest) = lowered
        .strip_prefix("usage:")
        .map(|_| trimmed["usage:".len()..].trim_start())
    else {
        return line.to_string();
    };
    match rest.strip_prefix(tool) {
        Some(after_tool) => format!("usage: {}", after_tool.trim_start()),
        None => line.to_string(),
    }
}

/// Remove the `--app` placeholder in either of its documented spellings.
fn strip_app_flag(line: &str) -> String {
    line.replace(" [-a/--app appname]", "")
        .replace(" [--app appname]", "")
}
