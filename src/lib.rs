//! Appsh is an interactive shell for driving one remote application.
//!
//! This crate wraps a platform CLI (`tsuru` by default) in a persistent
//! session: a virtual working directory, a single-unit/all-units execution
//! mode, bounded per-application command history, and local aliases for the
//! platform's subcommands. Anything that is not a built-in session command is
//! forwarded to the platform CLI, wrapped in a `cd <dir> && ...` invocation.
//!
//! # Quick start
//!
//! ```no_run
//! use appsh::config::load_config;
//! use appsh::remote::RemoteCli;
//! use appsh::shell::Shell;
//!
//! # async fn example() {
//! let config = load_config(None).unwrap();
//! let remote = RemoteCli::new(&config.tool.binary, "myapp");
//! let initial_path = remote.current_path().await.unwrap();
//! let mut shell = Shell::new("myapp", initial_path, remote, &config);
//! shell.handle_line("cd /var/log").await.unwrap();
//! # }
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod helptext;
pub mod history;
pub mod remote;
pub mod render;
pub mod session;
pub mod shell;
pub mod vpath;
