//! Configuration type definitions

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::BuildResult;

use super::loader::{self, ConfigWarning};

/// Path overrides
///
/// CLI flags take precedence over these, and these over the built-in defaults.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct PathsConfig {
    #[serde(default)]
    pub source: Option<PathBuf>,

    #[serde(default)]
    pub output: Option<PathBuf>,
}

/// One `[[plugins]]` entry
///
/// Plugin-specific keys live alongside `name`; the pipeline validates which
/// ones a given plugin needs.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct PluginConfig {
    pub name: String,

    /// Only run when the build mode is production
    #[serde(default)]
    pub production_only: bool,

    /// Browser targets for `autoprefix` (`chrome = "80"`, `safari = "13.1"`)
    #[serde(default)]
    pub targets: BTreeMap<String, String>,

    /// Executable for the `command` plugin
    #[serde(default)]
    pub program: Option<String>,

    #[serde(default)]
    pub args: Vec<String>,
}

impl PluginConfig {
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct BuildConfig {
    #[serde(default)]
    pub paths: PathsConfig,

    /// Ordered plugin list; empty means the source is copied verbatim
    #[serde(default)]
    pub plugins: Vec<PluginConfig>,

    /// Free-form theme data handed to plugins untouched
    #[serde(default)]
    pub theme: toml::Table,
}

impl BuildConfig {
    /// Load configuration from a TOML file (defaults if the file is missing)
    pub fn load(path: &Path) -> BuildResult<Self> {
        let (config, _warnings) = loader::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> BuildResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Plugins that run in the given mode, in declaration order
    pub fn active_plugins(&self, mode: BuildMode) -> impl Iterator<Item = &PluginConfig> {
        self.plugins
            .iter()
            .filter(move |p| !p.production_only || mode == BuildMode::Production)
    }
}

/// Build mode selected through the environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BuildMode {
    Production,
    #[default]
    Development,
}

impl BuildMode {
    pub const VALID_VALUES: &'static [&'static str] = &["production", "development"];

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "production" | "prod" => Some(BuildMode::Production),
            "development" | "dev" => Some(BuildMode::Development),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BuildMode::Production => "production",
            BuildMode::Development => "development",
        }
    }
}

impl fmt::Display for BuildMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
