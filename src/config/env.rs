//! Build mode resolution from the environment

use std::io::Write;

use super::env_validator::EnvVarValidator;
use super::types::BuildMode;

/// Primary variable selecting the build mode
pub const BUILD_MODE_VAR: &str = "CSSBUILD_ENV";

/// Consulted when `CSSBUILD_ENV` is unset, so existing `NODE_ENV=production`
/// build scripts keep working
pub const FALLBACK_MODE_VAR: &str = "NODE_ENV";

impl BuildMode {
    /// Read the build mode from the process environment
    pub fn from_env() -> Self {
        resolve_build_mode(|key| std::env::var(key).ok(), &mut std::io::stderr())
    }
}

/// Resolve the build mode from an environment lookup, warning on bad values
pub fn resolve_build_mode<W: Write>(
    get_env: impl Fn(&str) -> Option<String>,
    writer: &mut W,
) -> BuildMode {
    let (var, value) = match get_env(BUILD_MODE_VAR) {
        Some(value) => (BUILD_MODE_VAR, value),
        None => match get_env(FALLBACK_MODE_VAR) {
            Some(value) => (FALLBACK_MODE_VAR, value),
            None => return BuildMode::default(),
        },
    };

    EnvVarValidator::new(var, BuildMode::VALID_VALUES).parse_with_writer(
        &value,
        BuildMode::parse,
        BuildMode::default(),
        writer,
    )
}
