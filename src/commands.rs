//! Command registry and input routing.
//!
//! The registry is a static table built into the binary: built-in session
//! commands plus local keywords for the platform CLI's own subcommands. A
//! pass-through entry keeps the platform's *canonical* subcommand name next
//! to the (possibly different) local keyword the user types, so dispatch and
//! help rewriting both consult the same mapping.

/// Built-in session commands handled without the platform CLI
/// (except `run`, which is the explicit spelling of the default path).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    Cd,
    Pwd,
    Run,
    OnceMode,
    MultiUnitMode,
    Exit,
    Help,
}

/// How a registered command is dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Builtin(Builtin),
    Passthrough,
}

/// One registry entry. For pass-throughs, `canonical` is the platform CLI's
/// subcommand name and `alias` (when present) is the local keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandEntry {
    pub canonical: &'static str,
    pub alias: Option<&'static str>,
    pub kind: CommandKind,
    pub description: &'static str,
}

impl CommandEntry {
    /// The keyword the user types for this command.
    pub fn keyword(&self) -> &'static str {
        self.alias.unwrap_or(self.canonical)
    }
}

/// Static command table, immutable for the process lifetime.
pub const COMMANDS: [CommandEntry; 15] = [
    CommandEntry {
        canonical: "cd",
        alias: None,
        kind: CommandKind::Builtin(Builtin::Cd),
        description: "Change the virtual working directory: cd [path].",
    },
    CommandEntry {
        canonical: "pwd",
        alias: None,
        kind: CommandKind::Builtin(Builtin::Pwd),
        description: "Print the virtual working directory.",
    },
    CommandEntry {
        canonical: "run",
        alias: None,
        kind: CommandKind::Builtin(Builtin::Run),
        description: "Run a shell command remotely in the current directory.",
    },
    CommandEntry {
        canonical: "once_mode",
        alias: None,
        kind: CommandKind::Builtin(Builtin::OnceMode),
        description: "Run subsequent commands on a single unit.",
    },
    CommandEntry {
        canonical: "multi_unit_mode",
        alias: None,
        kind: CommandKind::Builtin(Builtin::MultiUnitMode),
        description: "Run subsequent commands on every unit.",
    },
    CommandEntry {
        canonical: "exit",
        alias: None,
        kind: CommandKind::Builtin(Builtin::Exit),
        description: "Leave the shell.",
    },
    CommandEntry {
        canonical: "help",
        alias: None,
        kind: CommandKind::Builtin(Builtin::Help),
        description: "Show help for a command: help [name].",
    },
    CommandEntry {
        canonical: "start",
        alias: None,
        kind: CommandKind::Passthrough,
        description: "Start the application.",
    },
    CommandEntry {
        canonical: "stop",
        alias: None,
        kind: CommandKind::Passthrough,
        description: "Stop the application.",
    },
    CommandEntry {
        canonical: "restart",
        alias: None,
        kind: CommandKind::Passthrough,
        description: "Restart the application.",
    },
    CommandEntry {
        canonical: "env-set",
        alias: Some("env_set"),
        kind: CommandKind::Passthrough,
        description: "Set environment variables: env_set NAME=value [...].",
    },
    CommandEntry {
        canonical: "env-unset",
        alias: Some("env_unset"),
        kind: CommandKind::Passthrough,
        description: "Unset environment variables: env_unset NAME [...].",
    },
    CommandEntry {
        canonical: "env-get",
        alias: Some("env"),
        kind: CommandKind::Passthrough,
        description: "Show the application's environment variables.",
    },
    CommandEntry {
        canonical: "version",
        alias: None,
        kind: CommandKind::Passthrough,
        description: "Show the platform CLI version.",
    },
    CommandEntry {
        canonical: "app-info",
        alias: Some("info"),
        kind: CommandKind::Passthrough,
        description: "Show details about the application.",
    },
];

/// Dispatch target for one raw input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch<'a> {
    /// A built-in session command with its argument tail.
    Builtin { builtin: Builtin, arg: &'a str },
    /// A pass-through forwarded under the platform CLI's canonical name.
    Passthrough {
        canonical: &'static str,
        tail: &'a str,
    },
    /// No keyword matched; the whole line goes to the default remote path.
    Default { line: &'a str },
}

/// Map a raw input line to its dispatch target.
///
/// The leading whitespace-delimited token is the command keyword; the rest of
/// the line (leading whitespace stripped) is the argument tail, forwarded
/// verbatim. Keywords are case-sensitive.
pub fn route(line: &str) -> Dispatch<'_> {
    let trimmed = line.trim();
    let Some(token) = trimmed.split_whitespace().next() else {
        return Dispatch::Default { line: trimmed };
    };
    let tail = trimmed[token.len()..].trim_start();

    match lookup(token) {
        Some(entry) => match entry.kind {
            CommandKind::Builtin(builtin) => Dispatch::Builtin { builtin, arg: tail },
            CommandKind::Passthrough => Dispatch::Passthrough {
                canonical: entry.canonical,
                tail,
            },
        },
        None => Dispatch::Default { line: trimmed },
    }
}

/// Find a registry entry by keyword, alias, or canonical name.
pub fn lookup(name: &str) -> Option<&'static CommandEntry> {
    COMMANDS
        .iter()
        .find(|entry| entry.canonical == name || entry.alias == Some(name))
}

/// Resolve a `help <name>` target to (canonical, alias).
///
/// Unknown names pass through unchanged so the platform CLI can still be
/// asked about subcommands this shell has no local keyword for.
pub fn resolve_help_target(name: &str) -> (&str, Option<&'static str>) {
    match lookup(name) {
        Some(entry) => (entry.canonical, entry.alias),
        None => (name, None),
    }
}
