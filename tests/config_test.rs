//! Integration tests for Settings config loading with layered merge semantics.
//!
//! Precedence: defaults < global < local (next to the manifest) < env vars.
//! These tests pass explicit file locations and never touch the real
//! global config.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use deptree::application::ApplicationError;
use deptree::config::{local_config_path, Settings, Style};

fn write_config(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).expect("write config");
    path
}

#[test]
fn given_no_config_files_when_load_then_returns_defaults() {
    let settings = Settings::load_from(None, None).expect("load settings");

    assert_eq!(settings, Settings::default());
    assert_eq!(settings.max_depth, None);
    assert!(!settings.detect_cycles);
    assert_eq!(settings.style, Style::Ascii);
    assert!(settings.show_root);
}

#[test]
fn given_global_config_when_load_then_overrides_defaults() {
    let dir = TempDir::new().unwrap();
    let global = write_config(&dir, "deptree.toml", "max_depth = 10\nstyle = \"unicode\"\n");

    let settings = Settings::load_from(Some(&global), None).expect("load settings");

    assert_eq!(settings.max_depth, Some(10));
    assert_eq!(settings.style, Style::Unicode);
    assert!(settings.show_root, "unspecified fields keep defaults");
}

#[test]
fn given_local_config_when_load_then_overrides_global() {
    let dir = TempDir::new().unwrap();
    let global = write_config(&dir, "deptree.toml", "max_depth = 10\ndetect_cycles = true\n");
    let local = write_config(&dir, ".deptree.toml", "max_depth = 3\n");

    let settings = Settings::load_from(Some(&global), Some(&local)).expect("load settings");

    assert_eq!(settings.max_depth, Some(3));
    assert!(settings.detect_cycles, "global value survives when local is silent");
}

#[test]
fn given_manifest_dir_with_local_config_when_load_then_picks_it_up() {
    let dir = TempDir::new().unwrap();
    let written = write_config(&dir, ".deptree.toml", "show_root = false\n");

    let local = local_config_path(dir.path());
    let settings = Settings::load_from(None, Some(&local)).expect("load settings");

    assert_eq!(local, written);
    assert!(!settings.show_root);
}

#[test]
fn given_invalid_config_when_load_then_returns_config_error() {
    let dir = TempDir::new().unwrap();
    let local = write_config(&dir, ".deptree.toml", "style = \"fancy\"\n");

    let err = Settings::load_from(None, Some(&local)).unwrap_err();

    assert!(matches!(err, ApplicationError::Config { .. }), "{:?}", err);
}

#[test]
fn given_settings_when_converting_to_build_options_then_carries_guards() {
    let settings = Settings {
        max_depth: Some(5),
        detect_cycles: true,
        ..Settings::default()
    };

    let options = settings.build_options();

    assert_eq!(options.max_depth, Some(5));
    assert!(options.detect_cycles);
}

#[test]
fn given_settings_when_serializing_then_round_trips_through_toml() {
    let settings = Settings {
        max_depth: Some(7),
        style: Style::Unicode,
        ..Settings::default()
    };

    let text = settings.to_toml().unwrap();

    assert!(text.contains("max_depth = 7"));
    assert!(text.contains("style = \"unicode\""));
    let parsed: Settings = toml::from_str(&text).unwrap();
    assert_eq!(parsed, settings);
}
