//! Platform CLI invocation.
//!
//! All remote work goes through one child process per command. Interactive
//! commands (run/pass-through) inherit the session's stdin/stdout/stderr so
//! the platform CLI talks to the user directly; the shell blocks until the
//! child exits and treats any non-zero status as fatal to the whole session.
//! Capture-mode invocations (startup path probe, help text) pipe stdout
//! instead.

use std::process::Stdio;
use tokio::process::Command;

use crate::error::RemoteError;
use crate::session::Mode;

/// Handle for invoking the platform CLI on behalf of one application.
#[derive(Debug, Clone)]
pub struct RemoteCli {
    binary: String,
    app: String,
}

impl RemoteCli {
    pub fn new(binary: impl Into<String>, app: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
            app: app.into(),
        }
    }

    /// Executable name or path of the platform CLI.
    pub fn binary(&self) -> &str {
        &self.binary
    }

    /// Argument vector for the directory-aware remote execution path.
    ///
    /// Single-unit mode adds `-o`; the shell snippet is passed as one
    /// argument so the remote side sees `cd <dir> && <command>` verbatim.
    pub fn run_args(&self, mode: Mode, working_dir: &str, command: &str) -> Vec<String> {
        let mut args = vec!["run".to_string(), "-a".to_string(), self.app.clone()];
        if mode == Mode::Once {
            args.push("-o".to_string());
        }
        let snippet = if command.trim().is_empty() {
            format!("cd {working_dir}")
        } else {
            format!("cd {working_dir} && {command}")
        };
        args.push(snippet);
        args
    }

    /// Argument vector for a pass-through subcommand.
    pub fn passthrough_args(&self, canonical: &str, tail: &str) -> Vec<String> {
        let mut args = vec![canonical.to_string(), "-a".to_string(), self.app.clone()];
        args.extend(tail.split_whitespace().map(str::to_string));
        args
    }

    /// Run a shell command remotely in `working_dir`, streams inherited.
    pub async fn run_remote(
        &self,
        mode: Mode,
        working_dir: &str,
        command: &str,
    ) -> Result<(), RemoteError> {
        self.wait_inherited(&self.run_args(mode, working_dir, command))
            .await
    }

    /// Forward a pass-through subcommand, streams inherited.
    pub async fn passthrough(&self, canonical: &str, tail: &str) -> Result<(), RemoteError> {
        self.wait_inherited(&self.passthrough_args(canonical, tail))
            .await
    }

    /// Query the remote side for its working directory at startup.
    ///
    /// The first line of captured stdout, trailing whitespace stripped, is
    /// the initial virtual path. Anything else is a fatal startup error.
    pub async fn current_path(&self) -> Result<String, RemoteError> {
        let args = self.run_args(Mode::Once, "/", "pwd");
        let output = Command::new(&self.binary)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .output()
            .await
            .map_err(|e| self.spawn_error(e))?;
        if !output.status.success() {
            return Err(RemoteError::Exit(output.status.code().unwrap_or(-1)));
        }
        parse_probe_output(&String::from_utf8_lossy(&output.stdout))
    }

    /// Capture the platform CLI's help text for one subcommand.
    ///
    /// Help lookups are display-only, so a non-zero exit here is not fatal:
    /// whatever the tool printed (stdout, or stderr as a fallback) is
    /// returned for sanitization.
    pub async fn help_output(&self, canonical: &str) -> Result<String, RemoteError> {
        let output = Command::new(&self.binary)
            .arg("help")
            .arg(canonical)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| self.spawn_error(e))?;
        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        if stdout.trim().is_empty() {
            Ok(String::from_utf8_lossy(&output.stderr).to_string())
        } else {
            Ok(stdout)
        }
    }

    /// Spawn with inherited streams and block until exit.
    async fn wait_inherited(&self, args: &[String]) -> Result<(), RemoteError> {
        let status = Command::new(&self.binary)
            .args(args)
            .status()
            .await
            .map_err(|e| self.spawn_error(e))?;
        if status.success() {
            Ok(())
        } else {
            Err(RemoteError::Exit(status.code().unwrap_or(-1)))
        }
    }

    fn spawn_error(&self, source: std::io::Error) -> RemoteError {
        RemoteError::Spawn {
            binary: self.binary.clone(),
            source,
        }
    }
}

/// Extract the initial virtual path from probe output.
fn parse_probe_output(stdout: &str) -> Result<String, RemoteError> {
    let first_line = stdout.lines().next().unwrap_or("").trim();
    if first_line.is_empty() {
        return Err(RemoteError::Probe(
            "the remote side reported no working directory".to_string(),
        ));
    }
    Ok(first_line.to_string())
}
