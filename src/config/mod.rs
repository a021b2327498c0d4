//! Configuration module for cssbuild
//!
//! Resolution order for paths:
//! 1. CLI flags (highest priority)
//! 2. `[paths]` in the config file
//! 3. Built-in defaults (lowest priority)
//!
//! The build mode comes from `CSSBUILD_ENV` (falling back to `NODE_ENV`).

mod env;
pub mod env_validator;
mod loader;
mod types;

pub use env::{resolve_build_mode, BUILD_MODE_VAR, FALLBACK_MODE_VAR};
pub use loader::{load_with_warnings, parse_with_warnings, ConfigWarning};
pub use types::{BuildConfig, BuildMode, PathsConfig, PluginConfig};

/// Default source stylesheet
pub const DEFAULT_SOURCE: &str = "css/style.css";
/// Default built artifact
pub const DEFAULT_OUTPUT: &str = "css/built.css";
/// Default configuration file
pub const DEFAULT_CONFIG: &str = "css/config.toml";
