//! Configuration resolution against the real process environment
//!
//! Uses serial_test to prevent ENV variable races: every test touching
//! FILTERFLIX_* variables is marked #[serial].

use ffx_common::config::{
    resolve_config, ConfigOverrides, DEFAULT_GROUP_WINDOW_SECS, GROUP_WINDOW_ENV, LOG_LEVEL_ENV,
};
use serial_test::serial;
use std::env;
use std::io::Write;

fn clear_env() {
    env::remove_var(GROUP_WINDOW_ENV);
    env::remove_var(LOG_LEVEL_ENV);
}

fn isolated_overrides() -> (tempfile::TempDir, ConfigOverrides) {
    let dir = tempfile::tempdir().unwrap();
    let overrides = ConfigOverrides {
        config_file: Some(dir.path().join("config.toml")),
        ..Default::default()
    };
    (dir, overrides)
}

#[test]
#[serial]
fn test_resolver_with_no_overrides_uses_default() {
    clear_env();
    let (_dir, overrides) = isolated_overrides();

    let config = resolve_config(&overrides).unwrap();
    assert_eq!(config.group_window_secs, DEFAULT_GROUP_WINDOW_SECS);
    assert_eq!(config.log_level, "info");
}

#[test]
#[serial]
fn test_env_variable_overrides_file() {
    clear_env();
    let (dir, overrides) = isolated_overrides();
    let mut file = std::fs::File::create(dir.path().join("config.toml")).unwrap();
    writeln!(file, "group_window_secs = 90\nlog_level = \"warn\"").unwrap();

    env::set_var(GROUP_WINDOW_ENV, "15");
    env::set_var(LOG_LEVEL_ENV, "trace");
    let config = resolve_config(&overrides).unwrap();
    clear_env();

    assert_eq!(config.group_window_secs, 15);
    assert_eq!(config.log_level, "trace");
}

#[test]
#[serial]
fn test_cli_override_has_highest_priority() {
    clear_env();
    let (_dir, mut overrides) = isolated_overrides();
    overrides.group_window_secs = Some(5);
    overrides.log_level = Some("debug".to_string());

    env::set_var(GROUP_WINDOW_ENV, "15");
    let config = resolve_config(&overrides).unwrap();
    clear_env();

    assert_eq!(config.group_window_secs, 5);
    assert_eq!(config.log_level, "debug");
}

#[test]
#[serial]
fn test_invalid_env_window_reports_config_error() {
    clear_env();
    let (_dir, overrides) = isolated_overrides();

    env::set_var(GROUP_WINDOW_ENV, "-3");
    let result = resolve_config(&overrides);
    clear_env();

    let err = result.unwrap_err();
    assert!(err.to_string().contains(GROUP_WINDOW_ENV));
}
