//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/deptree/deptree.toml`
//! 3. Local config: `<manifest_dir>/.deptree.toml`
//! 4. Environment variables: `DEPTREE_*` prefix
//!
//! CLI flags are applied on top by the command layer.

use std::fmt;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::domain::BuildOptions;

/// Output style of a rendered tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    /// `+-`, `\-` and `|` glyphs
    #[default]
    Ascii,
    /// Box-drawing glyphs
    Unicode,
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Style::Ascii => write!(f, "ascii"),
            Style::Unicode => write!(f, "unicode"),
        }
    }
}

/// Raw settings for intermediate parsing (all fields optional to detect "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub max_depth: Option<usize>,
    pub detect_cycles: Option<bool>,
    pub style: Option<Style>,
    pub show_root: Option<bool>,
}

/// Unified configuration for deptree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Deepest dependency level to expand (default: unlimited)
    pub max_depth: Option<usize>,
    /// Fail on an entity that depends on one of its ancestors (default: false)
    pub detect_cycles: bool,
    /// Listing style (default: ascii)
    pub style: Style,
    /// Print the root entity above the listing (default: true)
    pub show_root: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_depth: None,
            detect_cycles: false,
            style: Style::Ascii,
            show_root: true,
        }
    }
}

/// Get the XDG config directory for deptree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "deptree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("deptree.toml"))
}

/// Get the path to the local config file next to a manifest.
pub fn local_config_path(manifest_dir: &Path) -> PathBuf {
    manifest_dir.join(".deptree.toml")
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

impl Settings {
    /// Build options handed to the tree builder.
    pub fn build_options(&self) -> BuildOptions {
        BuildOptions {
            max_depth: self.max_depth,
            detect_cycles: self.detect_cycles,
        }
    }

    /// Merge overlay config onto self (base): overlay wins where specified.
    pub fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            max_depth: overlay.max_depth.or(self.max_depth),
            detect_cycles: overlay.detect_cycles.unwrap_or(self.detect_cycles),
            style: overlay.style.unwrap_or(self.style),
            show_root: overlay.show_root.unwrap_or(self.show_root),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `manifest_dir` - Optional manifest directory for local config
    pub fn load(manifest_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        let global = global_config_path().filter(|p| p.exists());
        let local = manifest_dir
            .map(local_config_path)
            .filter(|p| p.exists());
        Self::load_from(global.as_deref(), local.as_deref())
    }

    /// Layered loading with explicit config file locations.
    pub fn load_from(global: Option<&Path>, local: Option<&Path>) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config
        if let Some(path) = global {
            current = current.merge_with(&load_raw_settings(path)?);
        }

        // 3. Local config next to the manifest
        if let Some(path) = local {
            current = current.merge_with(&load_raw_settings(path)?);
        }

        // 4. Environment variables (explicit override)
        Self::apply_env_overrides(current)
    }

    /// Apply DEPTREE_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("DEPTREE")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_int("max_depth") {
            settings.max_depth = Some(usize::try_from(val).map_err(|_| ApplicationError::Config {
                message: format!("DEPTREE_MAX_DEPTH must not be negative: {}", val),
            })?);
        }
        if let Ok(val) = config.get_bool("detect_cycles") {
            settings.detect_cycles = val;
        }
        if let Ok(val) = config.get_string("style") {
            settings.style =
                Style::from_str(&val, true).map_err(|e| ApplicationError::Config {
                    message: format!("DEPTREE_STYLE: {}", e),
                })?;
        }
        if let Ok(val) = config.get_bool("show_root") {
            settings.show_root = val;
        }

        Ok(settings)
    }

    /// Render the effective settings as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: e.to_string(),
        })
    }
}
