//! CLI argument parsing via clap.

use clap::Parser;

/// An interactive shell for one remote application.
#[derive(Debug, Parser)]
#[command(name = "appsh", version)]
pub struct Args {
    /// Name of the application this session targets.
    ///
    /// Kept optional at the parser level so the missing-argument case can be
    /// reported as the shell's own usage error (exit code 1).
    #[arg(short = 'a', long = "app", value_name = "APP")]
    pub app: Option<String>,

    /// Path to config file (default: ./appsh.toml or ~/.config/appsh/appsh.toml).
    #[arg(short = 'c', long = "config")]
    pub config: Option<String>,

    /// Disable color output.
    #[arg(long = "no-color")]
    pub no_color: bool,
}

#[cfg(test)]
mod tests {
    use super::Args;
    use clap::Parser;

    #[test]
    fn app_parses_with_short_and_long_flag() {
        let args = Args::parse_from(["appsh", "-a", "myapp"]);
        assert_eq!(args.app.as_deref(), Some("myapp"));
        let args = Args::parse_from(["appsh", "--app", "myapp"]);
        assert_eq!(args.app.as_deref(), Some("myapp"));
    }

    #[test]
    fn app_is_optional_at_the_parser_level() {
        let args = Args::parse_from(["appsh"]);
        assert!(args.app.is_none());
        assert!(!args.no_color);
    }

    #[test]
    fn config_and_color_flags_parse() {
        let args = Args::parse_from(["appsh", "-a", "myapp", "-c", "custom.toml", "--no-color"]);
        assert_eq!(args.config.as_deref(), Some("custom.toml"));
        assert!(args.no_color);
    }
}
