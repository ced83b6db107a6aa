//! Configuration loading.
//!
//! Configuration is optional: with no file anywhere, built-in defaults apply.
//! Search order is an explicit `--config` path, then `./appsh.toml`, then
//! `~/.config/appsh/appsh.toml`. The `APPSH_TOOL` environment variable
//! overrides the configured platform CLI binary.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::history;

/// Name of the config file in both the working and the user config directory.
const CONFIG_FILE_NAME: &str = "appsh.toml";
/// Environment override for the platform CLI binary.
const TOOL_ENV_VAR: &str = "APPSH_TOOL";

/// Resolved runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub tool: ToolConfig,
    pub history: HistoryConfig,
    pub display: DisplayConfig,
}

/// Platform CLI settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolConfig {
    /// Executable name or path of the platform CLI.
    pub binary: String,
}

/// History persistence settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryConfig {
    /// Most recent entries retained per application.
    pub limit: usize,
}

/// Terminal display settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayConfig {
    /// Whether prompt and diagnostics use color escapes.
    pub color: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tool: ToolConfig {
                binary: "tsuru".to_string(),
            },
            history: HistoryConfig {
                limit: history::DEFAULT_CAPACITY,
            },
            display: DisplayConfig { color: true },
        }
    }
}

/// Raw on-disk shape; every key is optional.
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    tool: Option<FileToolConfig>,
    history: Option<FileHistoryConfig>,
    display: Option<FileDisplayConfig>,
}

#[derive(Debug, Default, Deserialize)]
struct FileToolConfig {
    binary: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct FileHistoryConfig {
    limit: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
struct FileDisplayConfig {
    color: Option<bool>,
}

/// Load configuration from disk and environment.
///
/// `path_override` is an explicit config file path (from the --config flag).
pub fn load_config(path_override: Option<&str>) -> Result<Config, ConfigError> {
    load_config_from_sources(
        path_override,
        |path| std::fs::read_to_string(path),
        |name| std::env::var(name).ok(),
        || dirs::config_dir().map(|dir| dir.join("appsh")),
    )
}

fn load_config_from_sources<FRead, FEnv, FRoot>(
    path_override: Option<&str>,
    read_file: FRead,
    env_lookup: FEnv,
    config_root: FRoot,
) -> Result<Config, ConfigError>
where
    FRead: Fn(&Path) -> Result<String, std::io::Error>,
    FEnv: Fn(&str) -> Option<String>,
    FRoot: Fn() -> Option<PathBuf>,
{
    let text = read_config_text(path_override, &read_file, &config_root)?;
    let parsed: FileConfig = match text {
        Some(text) => toml::from_str(&text)?,
        None => FileConfig::default(),
    };
    let mut config = resolve(parsed)?;
    if let Some(binary) = env_lookup(TOOL_ENV_VAR) {
        let binary = binary.trim().to_string();
        if !binary.is_empty() {
            config.tool.binary = binary;
        }
    }
    Ok(config)
}

/// Read the first config file found, if any.
///
/// An explicit --config path must be readable; the default locations are
/// optional.
fn read_config_text<FRead, FRoot>(
    path_override: Option<&str>,
    read_file: &FRead,
    config_root: &FRoot,
) -> Result<Option<String>, ConfigError>
where
    FRead: Fn(&Path) -> Result<String, std::io::Error>,
    FRoot: Fn() -> Option<PathBuf>,
{
    if let Some(path) = path_override {
        return read_file(Path::new(path)).map(Some).map_err(ConfigError::Io);
    }
    if let Ok(text) = read_file(Path::new(CONFIG_FILE_NAME)) {
        return Ok(Some(text));
    }
    if let Some(root) = config_root() {
        if let Ok(text) = read_file(&root.join(CONFIG_FILE_NAME)) {
            return Ok(Some(text));
        }
    }
    Ok(None)
}

/// Apply defaults and validate the parsed file shape.
fn resolve(file: FileConfig) -> Result<Config, ConfigError> {
    let defaults = Config::default();
    let binary = file
        .tool
        .and_then(|t| t.binary)
        .map(|b| b.trim().to_string())
        .unwrap_or(defaults.tool.binary);
    if binary.is_empty() {
        return Err(ConfigError::Invalid(
            "tool.binary cannot be empty".to_string(),
        ));
    }

    let limit = file
        .history
        .and_then(|h| h.limit)
        .unwrap_or(defaults.history.limit);
    if limit == 0 {
        return Err(ConfigError::Invalid(
            "history.limit must be at least 1".to_string(),
        ));
    }

    let color = file
        .display
        .and_then(|d| d.color)
        .unwrap_or(defaults.display.color);

    Ok(Config {
        tool: ToolConfig { binary },
        history: HistoryConfig { limit },
        display: DisplayConfig { color },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_file(_: &Path) -> Result<String, std::io::Error> {
        Err(std::io::Error::new(std::io::ErrorKind::NotFound, "missing"))
    }

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn defaults_apply_without_any_file() {
        let config =
            load_config_from_sources(None, no_file, no_env, || None).expect("defaults load");
        assert_eq!(config, Config::default());
        assert_eq!(config.tool.binary, "tsuru");
        assert_eq!(config.history.limit, history::DEFAULT_CAPACITY);
        assert!(config.display.color);
    }

    #[test]
    fn file_keys_override_defaults() {
        let text = "[tool]\nbinary = \"mytool\"\n[history]\nlimit = 25\n[display]\ncolor = false\n";
        let config = load_config_from_sources(
            Some("appsh.toml"),
            |_| Ok(text.to_string()),
            no_env,
            || None,
        )
        .expect("load");
        assert_eq!(config.tool.binary, "mytool");
        assert_eq!(config.history.limit, 25);
        assert!(!config.display.color);
    }

    #[test]
    fn partial_file_keeps_remaining_defaults() {
        let config = load_config_from_sources(
            Some("appsh.toml"),
            |_| Ok("[history]\nlimit = 9\n".to_string()),
            no_env,
            || None,
        )
        .expect("load");
        assert_eq!(config.tool.binary, "tsuru");
        assert_eq!(config.history.limit, 9);
    }

    #[test]
    fn explicit_config_path_must_be_readable() {
        let err = load_config_from_sources(Some("/nope/appsh.toml"), no_file, no_env, || None)
            .expect_err("must fail");
        assert!(err.to_string().starts_with("io:"), "got: {err}");
    }

    #[test]
    fn env_var_overrides_tool_binary() {
        let config = load_config_from_sources(
            None,
            no_file,
            |name| (name == TOOL_ENV_VAR).then(|| "other-cli".to_string()),
            || None,
        )
        .expect("load");
        assert_eq!(config.tool.binary, "other-cli");
    }

    #[test]
    fn empty_tool_binary_is_invalid() {
        let err = load_config_from_sources(
            Some("appsh.toml"),
            |_| Ok("[tool]\nbinary = \"  \"\n".to_string()),
            no_env,
            || None,
        )
        .expect_err("must fail");
        assert!(err.to_string().contains("tool.binary"), "got: {err}");
    }

    #[test]
    fn zero_history_limit_is_invalid() {
        let err = load_config_from_sources(
            Some("appsh.toml"),
            |_| Ok("[history]\nlimit = 0\n".to_string()),
            no_env,
            || None,
        )
        .expect_err("must fail");
        assert!(err.to_string().contains("history.limit"), "got: {err}");
    }

    #[test]
    fn user_config_dir_is_consulted_last() {
        let config = load_config_from_sources(
            None,
            |path| {
                if path.ends_with("home/appsh.toml") {
                    Ok("[tool]\nbinary = \"from-home\"\n".to_string())
                } else {
                    Err(std::io::Error::new(std::io::ErrorKind::NotFound, "missing"))
                }
            },
            no_env,
            || Some(PathBuf::from("home")),
        )
        .expect("load");
        assert_eq!(config.tool.binary, "from-home");
    }
}
