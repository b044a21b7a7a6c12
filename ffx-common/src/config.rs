//! Configuration loading
//!
//! Settings are resolved per field in priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)
//!
//! A missing TOML file is skipped silently. A malformed one never aborts a
//! run: its problem is recorded in [`ReconcileConfig::warnings`] and the
//! remaining layers apply. Resolution happens before logging is set up, so
//! the caller logs those warnings once its subscriber is installed.

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default grouping window in seconds
pub const DEFAULT_GROUP_WINDOW_SECS: u64 = 30;

/// Default tracing filter directive
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable overriding the grouping window
pub const GROUP_WINDOW_ENV: &str = "FILTERFLIX_GROUP_WINDOW";

/// Environment variable overriding the log level
pub const LOG_LEVEL_ENV: &str = "FILTERFLIX_LOG_LEVEL";

/// Resolved reconciliation settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcileConfig {
    /// Maximum distance in seconds between a cluster's first event and a
    /// later event joining it
    pub group_window_secs: u64,

    /// Tracing filter directive used when `RUST_LOG` is unset
    pub log_level: String,

    /// Non-fatal problems met while resolving (e.g. a malformed TOML file)
    pub warnings: Vec<String>,
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        Self {
            group_window_secs: DEFAULT_GROUP_WINDOW_SECS,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            warnings: Vec::new(),
        }
    }
}

/// On-disk TOML shape; every key is optional
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    pub group_window_secs: Option<u64>,
    pub log_level: Option<String>,
}

/// Values supplied on the command line
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub group_window_secs: Option<u64>,
    pub log_level: Option<String>,
    /// Explicit config file; replaces the platform default location
    pub config_file: Option<PathBuf>,
}

/// Resolve configuration from CLI overrides, the process environment,
/// the TOML file and compiled defaults.
pub fn resolve_config(overrides: &ConfigOverrides) -> Result<ReconcileConfig> {
    resolve_config_with_env(overrides, |name| std::env::var(name).ok())
}

/// Same as [`resolve_config`] with an injectable environment lookup.
pub fn resolve_config_with_env<F>(overrides: &ConfigOverrides, env: F) -> Result<ReconcileConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let mut warnings = Vec::new();
    let file_config = match overrides.config_file.clone().or_else(default_config_path) {
        Some(path) => load_toml_config(&path).unwrap_or_else(|e| {
            warnings.push(format!(
                "Ignoring malformed config file {}: {} (using defaults)",
                path.display(),
                e
            ));
            TomlConfig::default()
        }),
        None => TomlConfig::default(),
    };

    let env_window = match env(GROUP_WINDOW_ENV) {
        Some(raw) => Some(raw.trim().parse::<u64>().map_err(|e| {
            Error::Config(format!("{}='{}' is not a whole number: {}", GROUP_WINDOW_ENV, raw, e))
        })?),
        None => None,
    };

    let group_window_secs = overrides
        .group_window_secs
        .or(env_window)
        .or(file_config.group_window_secs)
        .unwrap_or(DEFAULT_GROUP_WINDOW_SECS);

    if group_window_secs == 0 {
        return Err(Error::Config(
            "group window must be at least 1 second".to_string(),
        ));
    }

    let log_level = overrides
        .log_level
        .clone()
        .or_else(|| env(LOG_LEVEL_ENV))
        .or(file_config.log_level)
        .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());

    Ok(ReconcileConfig {
        group_window_secs,
        log_level,
        warnings,
    })
}

/// Load a TOML config file
///
/// An unreadable or absent file yields an empty config. Content that does
/// not parse is returned as [`Error::Config`].
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            debug!("Config file {} not loaded: {}", path.display(), e);
            return Ok(TomlConfig::default());
        }
    };

    let config = toml::from_str::<TomlConfig>(&content).map_err(|e| Error::Config(e.to_string()))?;
    debug!("Loaded config file {}", path.display());
    Ok(config)
}

/// Platform config location: `<config_dir>/filterflix/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("filterflix").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn overrides_with_file(path: &Path) -> ConfigOverrides {
        ConfigOverrides {
            config_file: Some(path.to_path_buf()),
            ..Default::default()
        }
    }

    #[test]
    fn test_defaults_when_nothing_configured() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.toml");
        let config = resolve_config_with_env(&overrides_with_file(&missing), no_env).unwrap();
        assert_eq!(config, ReconcileConfig::default());
    }

    #[test]
    fn test_toml_values_apply() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "group_window_secs = 45\nlog_level = \"debug\"").unwrap();

        let config = resolve_config_with_env(&overrides_with_file(file.path()), no_env).unwrap();
        assert_eq!(config.group_window_secs, 45);
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_env_beats_toml_and_cli_beats_env() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "group_window_secs = 45").unwrap();

        let env = |name: &str| (name == GROUP_WINDOW_ENV).then(|| "20".to_string());
        let mut overrides = overrides_with_file(file.path());
        let config = resolve_config_with_env(&overrides, env).unwrap();
        assert_eq!(config.group_window_secs, 20);

        overrides.group_window_secs = Some(10);
        let config = resolve_config_with_env(&overrides, env).unwrap();
        assert_eq!(config.group_window_secs, 10);
    }

    #[test]
    fn test_malformed_toml_falls_back() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "group_window_secs = \"soon\"").unwrap();

        let config = resolve_config_with_env(&overrides_with_file(file.path()), no_env).unwrap();
        assert_eq!(config.group_window_secs, DEFAULT_GROUP_WINDOW_SECS);
        assert_eq!(config.warnings.len(), 1);
        assert!(config.warnings[0].starts_with("Ignoring malformed config file"));
        assert!(config.warnings[0].contains(&file.path().display().to_string()));
    }

    #[test]
    fn test_load_toml_config_reports_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "log_level = [").unwrap();
        assert!(matches!(load_toml_config(file.path()), Err(Error::Config(_))));

        let dir = tempfile::tempdir().unwrap();
        let absent = load_toml_config(&dir.path().join("absent.toml")).unwrap();
        assert!(absent.group_window_secs.is_none());
        assert!(absent.log_level.is_none());
    }

    #[test]
    fn test_well_formed_toml_has_no_warnings() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "group_window_secs = 12").unwrap();
        let config = resolve_config_with_env(&overrides_with_file(file.path()), no_env).unwrap();
        assert!(config.warnings.is_empty());
    }

    #[test]
    fn test_bad_env_window_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let env = |name: &str| (name == GROUP_WINDOW_ENV).then(|| "thirty".to_string());
        let result = resolve_config_with_env(&overrides_with_file(&dir.path().join("x.toml")), env);
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_zero_window_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let overrides = ConfigOverrides {
            group_window_secs: Some(0),
            config_file: Some(dir.path().join("x.toml")),
            ..Default::default()
        };
        assert!(matches!(
            resolve_config_with_env(&overrides, no_env),
            Err(Error::Config(_))
        ));
    }
}
