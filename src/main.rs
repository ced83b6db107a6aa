//! CLI entry point for appsh.
//!
//! The loop is deliberately flat: read a line, hand it to the shell, react
//! to the returned flow/status. Fatal statuses terminate the process here,
//! nowhere else.

use appsh::cli::Args;
use appsh::config::load_config;
use appsh::error::RemoteError;
use appsh::remote::RemoteCli;
use appsh::render::Renderer;
use appsh::shell::{Flow, Shell};
use clap::Parser;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let Some(app) = args.app.as_deref().map(str::trim).filter(|s| !s.is_empty()) else {
        // Usage errors go to stdout, matching the launcher contract.
        println!("Please specify the application name");
        std::process::exit(1);
    };

    let mut config = match load_config(args.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };
    if args.no_color {
        config.display.color = false;
    }
    let renderer = Renderer::new(config.display.color);

    let remote = RemoteCli::new(&config.tool.binary, app);
    let initial_path = match remote.current_path().await {
        Ok(path) => path,
        Err(e) => {
            renderer.error(&e.to_string());
            std::process::exit(e.exit_code());
        }
    };

    let mut shell = Shell::new(app, initial_path, remote, &config);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("{}", shell.prompt());
        if std::io::stdout().flush().is_err() {
            break;
        }

        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => {
                // End-of-input behaves like `exit`.
                println!();
                break;
            }
            Err(e) => {
                renderer.error(&format!("failed to read input: {e}"));
                std::process::exit(1);
            }
        };

        match shell.handle_line(&line).await {
            Ok(Flow::Continue) => {}
            Ok(Flow::Quit) => break,
            Err(e) => {
                // Fail-fast: the post-command hook has already flushed
                // history; the child's own stderr explains exit statuses.
                if !matches!(e, RemoteError::Exit(_)) {
                    renderer.error(&e.to_string());
                }
                std::process::exit(e.exit_code());
            }
        }
    }
}
