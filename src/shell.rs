//! The session controller: routing, built-ins, and the post-command hook.
//!
//! `Shell` owns the session state, the history log, and the remote handle.
//! The binary's read loop feeds it one line at a time; dispatch, state
//! mutation, history bookkeeping, and fail-fast propagation all happen here,
//! so the whole state machine is exercisable in tests without a terminal. Errors bubble up as [`RemoteError`]; only `main` turns them
//! into a process exit.

use std::io::Write;

use crate::commands::{self, Builtin, CommandKind, Dispatch};
use crate::config::Config;
use crate::error::RemoteError;
use crate::helptext;
use crate::history::HistoryLog;
use crate::remote::RemoteCli;
use crate::render::Renderer;
use crate::session::{Mode, Session};

/// What the read loop should do after a line is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// One interactive session bound to a single application.
pub struct Shell {
    session: Session,
    history: HistoryLog,
    remote: RemoteCli,
    renderer: Renderer,
}

impl Shell {
    /// Build a shell from startup state, opening the per-application history.
    ///
    /// A history location that cannot be created downgrades to a detached
    /// in-memory log with a warning; history is never worth losing a session
    /// over.
    pub fn new(app: &str, initial_path: String, remote: RemoteCli, config: &Config) -> Self {
        let renderer = Renderer::new(config.display.color);
        let history = match HistoryLog::open_default(app, config.history.limit) {
            Ok(history) => history,
            Err(e) => {
                tracing::warn!("history persistence unavailable: {e}");
                renderer.warn(&format!("history will not be saved: {e}"));
                HistoryLog::detached(app, config.history.limit)
            }
        };
        Self {
            session: Session::new(app, &initial_path),
            history,
            remote,
            renderer,
        }
    }

    /// Build a shell with an explicit history log. Test seam.
    pub fn with_history(
        app: &str,
        initial_path: String,
        remote: RemoteCli,
        config: &Config,
        history: HistoryLog,
    ) -> Self {
        Self {
            session: Session::new(app, &initial_path),
            history,
            remote,
            renderer: Renderer::new(config.display.color),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    /// Render the prompt for the current state.
    pub fn prompt(&self) -> String {
        self.renderer.prompt(&self.session)
    }

    /// Process one input line end to end.
    ///
    /// Blank lines are ignored. Every other line runs the universal
    /// post-command hook (history append + flush, counter increment), even
    /// when the dispatched command failed, so a fatal remote status never
    /// loses the line that caused it.
    pub async fn handle_line(&mut self, line: &str) -> Result<Flow, RemoteError> {
        if line.trim().is_empty() {
            return Ok(Flow::Continue);
        }
        let result = self.dispatch(line).await;
        self.post_command(line);
        result
    }

    async fn dispatch(&mut self, line: &str) -> Result<Flow, RemoteError> {
        match commands::route(line) {
            Dispatch::Builtin { builtin, arg } => self.run_builtin(builtin, arg).await,
            Dispatch::Passthrough { canonical, tail } => {
                self.remote.passthrough(canonical, tail).await?;
                Ok(Flow::Continue)
            }
            Dispatch::Default { line } => self.run_remote(line).await,
        }
    }

    async fn run_builtin(&mut self, builtin: Builtin, arg: &str) -> Result<Flow, RemoteError> {
        match builtin {
            Builtin::Cd => {
                self.session
                    .change_directory((!arg.is_empty()).then_some(arg));
                Ok(Flow::Continue)
            }
            Builtin::Pwd => {
                println!("{}", self.session.virtual_path());
                Ok(Flow::Continue)
            }
            Builtin::Run => self.run_remote(arg).await,
            Builtin::OnceMode => {
                let msg = self.session.set_mode(Mode::Once);
                println!("{msg}");
                Ok(Flow::Continue)
            }
            Builtin::MultiUnitMode => {
                let msg = self.session.set_mode(Mode::All);
                println!("{msg}");
                Ok(Flow::Continue)
            }
            Builtin::Exit => Ok(Flow::Quit),
            Builtin::Help => {
                self.show_help(arg).await?;
                Ok(Flow::Continue)
            }
        }
    }

    /// Default path: wrap the line in a directory-aware remote invocation.
    async fn run_remote(&mut self, command: &str) -> Result<Flow, RemoteError> {
        self.remote
            .run_remote(
                self.session.mode(),
                self.session.virtual_path(),
                command,
            )
            .await?;
        Ok(Flow::Continue)
    }

    /// `help` with no argument lists local commands; with an argument it
    /// shows the platform CLI's own help, sanitized for interactive use.
    async fn show_help(&self, arg: &str) -> Result<(), RemoteError> {
        let target = arg.split_whitespace().next().unwrap_or("");
        if target.is_empty() {
            self.print_local_help();
            return Ok(());
        }
        let (canonical, alias) = commands::resolve_help_target(target);
        let raw = self.remote.help_output(canonical).await?;
        let text = helptext::sanitize(&raw, self.remote.binary(), canonical, alias);
        // Help must be visible before the next prompt is drawn.
        let mut stdout = std::io::stdout();
        let _ = writeln!(stdout, "{text}");
        let _ = stdout.flush();
        Ok(())
    }

    fn print_local_help(&self) {
        println!("session commands:");
        for entry in commands::COMMANDS
            .iter()
            .filter(|s| matches!(s.kind, CommandKind::Builtin(_)))
        {
            println!("  {:<16} {}", entry.keyword(), entry.description);
        }
        println!("application commands:");
        for entry in commands::COMMANDS
            .iter()
            .filter(|s| s.kind == CommandKind::Passthrough)
        {
            println!("  {:<16} {}", entry.keyword(), entry.description);
        }
    }

    /// Universal post-command hook: record the line, flush, count it.
    fn post_command(&mut self, line: &str) {
        self.history.append(line);
        if let Err(e) = self.history.flush() {
            tracing::warn!("failed to persist history: {e}");
            self.renderer.warn(&format!("failed to persist history: {e}"));
        }
        self.session.advance();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn test_shell(binary: &str) -> Shell {
        let config = Config::default();
        Shell::with_history(
            "myapp",
            "/".to_string(),
            RemoteCli::new(binary, "myapp"),
            &config,
            HistoryLog::detached("myapp", 5),
        )
    }

    #[tokio::test]
    async fn cd_then_state_reflects_new_directory() {
        let mut shell = test_shell("true");
        shell.handle_line("cd /var/log").await.expect("cd");
        assert_eq!(shell.session().virtual_path(), "/var/log");
        shell.handle_line("cd").await.expect("bare cd");
        assert_eq!(shell.session().virtual_path(), "/");
    }

    #[tokio::test]
    async fn mode_commands_flip_the_prompt_field() {
        let mut shell = test_shell("true");
        assert!(shell.prompt().contains(":once:"), "got: {}", shell.prompt());
        shell.handle_line("multi_unit_mode").await.expect("switch");
        assert!(shell.prompt().contains(":all:"), "got: {}", shell.prompt());
        shell.handle_line("once_mode").await.expect("switch back");
        assert!(shell.prompt().contains(":once:"), "got: {}", shell.prompt());
    }

    #[tokio::test]
    async fn counter_increments_once_per_processed_line() {
        let mut shell = test_shell("true");
        shell.handle_line("cd /tmp").await.expect("cd");
        shell.handle_line("pwd").await.expect("pwd");
        shell.handle_line("start").await.expect("start");
        assert_eq!(shell.session().counter(), 4);
    }

    #[tokio::test]
    async fn blank_lines_are_ignored_entirely() {
        let mut shell = test_shell("true");
        let flow = shell.handle_line("   ").await.expect("blank");
        assert_eq!(flow, Flow::Continue);
        assert_eq!(shell.session().counter(), 1);
        assert!(shell.history().is_empty());
    }

    #[tokio::test]
    async fn exit_requests_quit_after_recording_the_line() {
        let mut shell = test_shell("true");
        let flow = shell.handle_line("exit").await.expect("exit");
        assert_eq!(flow, Flow::Quit);
        assert_eq!(shell.history().entries(), ["exit"]);
        assert_eq!(shell.session().counter(), 2);
    }

    #[tokio::test]
    async fn every_processed_line_lands_in_history_in_order() {
        let mut shell = test_shell("true");
        shell.handle_line("cd /srv").await.expect("cd");
        shell.handle_line("ls -la").await.expect("default path");
        shell.handle_line("start").await.expect("passthrough");
        assert_eq!(shell.history().entries(), ["cd /srv", "ls -la", "start"]);
    }

    #[tokio::test]
    async fn failing_remote_command_still_runs_the_post_command_hook() {
        let mut shell = test_shell("false");
        let err = shell.handle_line("start").await.expect_err("child exits 1");
        assert!(matches!(err, RemoteError::Exit(1)), "got: {err}");
        // Flush-before-exit: the failing line is recorded and counted.
        assert_eq!(shell.history().entries(), ["start"]);
        assert_eq!(shell.session().counter(), 2);
    }

    #[tokio::test]
    async fn unknown_input_goes_to_the_default_remote_path() {
        // `false` fails for any invocation, proving the line reached the
        // remote executor rather than being rejected locally.
        let mut shell = test_shell("false");
        let err = shell
            .handle_line("definitely-not-a-keyword")
            .await
            .expect_err("routed remotely");
        assert!(matches!(err, RemoteError::Exit(1)), "got: {err}");
    }

    #[tokio::test]
    async fn builtins_do_not_touch_the_remote_executor() {
        // With a guaranteed-failing binary, any remote dispatch would error:
        // cd/pwd/mode/help must all succeed anyway.
        let mut shell = test_shell("false");
        shell.handle_line("cd /x").await.expect("cd is local");
        shell.handle_line("pwd").await.expect("pwd is local");
        shell.handle_line("once_mode").await.expect("mode is local");
        shell.handle_line("help").await.expect("bare help is local");
    }
}
