//! Manifest-backed dependency lookups.
//!
//! A manifest is a TOML file listing each entity's direct dependencies:
//!
//! ```toml
//! root = "app"
//!
//! [dependencies]
//! app = ["http", "log"]
//! http = ["log"]
//! ```
//!
//! Entities without an entry are leaves.

use std::collections::HashMap;
use std::hash::Hash;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::domain::{DependencyLookup, LookupError};

/// In-memory lookup over a fixed dependency map.
#[derive(Debug, Clone, Default)]
pub struct MapLookup<T> {
    dependencies: HashMap<T, Vec<T>>,
}

impl<T: Eq + Hash> MapLookup<T> {
    pub fn new(dependencies: HashMap<T, Vec<T>>) -> Self {
        Self { dependencies }
    }

    pub fn len(&self) -> usize {
        self.dependencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dependencies.is_empty()
    }
}

impl<T: Eq + Hash> FromIterator<(T, Vec<T>)> for MapLookup<T> {
    fn from_iter<I: IntoIterator<Item = (T, Vec<T>)>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[async_trait]
impl<T> DependencyLookup<T> for MapLookup<T>
where
    T: Eq + Hash + Clone + Send + Sync,
{
    async fn dependencies(&self, entity: &T) -> Result<Vec<T>, LookupError> {
        Ok(self.dependencies.get(entity).cloned().unwrap_or_default())
    }
}

/// Parsed dependency manifest.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct Manifest {
    /// Entity to expand when none is given explicitly
    #[serde(default)]
    pub root: Option<String>,
    #[serde(default)]
    pub dependencies: HashMap<String, Vec<String>>,
    #[serde(skip)]
    path: PathBuf,
}

impl Manifest {
    #[instrument(level = "debug")]
    pub fn load(path: &Path) -> ApplicationResult<Self> {
        let content = std::fs::read_to_string(path).with_path_context("read manifest", path)?;
        let mut manifest = Self::parse(&content).map_err(|message| ApplicationError::Manifest {
            path: path.to_path_buf(),
            message,
        })?;
        manifest.path = path.to_path_buf();
        debug!(entries = manifest.dependencies.len(), "manifest loaded");
        Ok(manifest)
    }

    pub fn parse(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }

    /// File the manifest was loaded from, empty when parsed from a string.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory holding the manifest, used to find a local `.deptree.toml`.
    pub fn dir(&self) -> Option<&Path> {
        self.path.parent().filter(|dir| !dir.as_os_str().is_empty())
    }

    pub fn into_lookup(self) -> MapLookup<String> {
        MapLookup::new(self.dependencies)
    }
}
