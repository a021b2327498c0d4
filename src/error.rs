//! Error types for cssbuild
//!
//! Uses `thiserror` for library errors; the binary wraps them in `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for cssbuild operations
pub type BuildResult<T> = Result<T, BuildError>;

/// Main error type for build and watch operations
#[derive(Error, Debug)]
pub enum BuildError {
    /// Source stylesheet could not be read
    #[error("failed to read source {path}: {source}")]
    ReadSource {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Source stylesheet is not valid UTF-8
    #[error("source {path} is not valid UTF-8")]
    InvalidUtf8 { path: PathBuf },

    /// Built artifact could not be written
    #[error("failed to write {path}: {source}")]
    WriteOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file exists but could not be read
    #[error("failed to read config {path}: {source}")]
    ReadConfig {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file is not valid TOML or has the wrong shape
    #[error("invalid config in {file}: {message}")]
    InvalidConfig { file: PathBuf, message: String },

    /// Plugin name not known to the pipeline
    #[error("unknown plugin '{name}'{}", did_you_mean(.suggestion))]
    UnknownPlugin {
        name: String,
        suggestion: Option<String>,
    },

    /// Plugin rejected the stylesheet
    #[error("plugin '{plugin}' failed: {message}")]
    Plugin { plugin: String, message: String },

    /// File watcher could not be set up
    #[error("watcher error: {0}")]
    Watch(#[from] notify::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

fn did_you_mean(suggestion: &Option<String>) -> String {
    match suggestion {
        Some(s) => format!(" (did you mean '{}'?)", s),
        None => String::new(),
    }
}

impl BuildError {
    pub(crate) fn plugin(plugin: &str, message: impl Into<String>) -> Self {
        BuildError::Plugin {
            plugin: plugin.to_string(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_unknown_plugin_with_suggestion() {
        let err = BuildError::UnknownPlugin {
            name: "minfy".to_string(),
            suggestion: Some("minify".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "unknown plugin 'minfy' (did you mean 'minify'?)"
        );
    }

    #[test]
    fn test_error_display_unknown_plugin_without_suggestion() {
        let err = BuildError::UnknownPlugin {
            name: "tailwind".to_string(),
            suggestion: None,
        };
        assert_eq!(err.to_string(), "unknown plugin 'tailwind'");
    }

    #[test]
    fn test_error_display_read_source() {
        let err = BuildError::ReadSource {
            path: PathBuf::from("css/style.css"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert_eq!(
            err.to_string(),
            "failed to read source css/style.css: not found"
        );
    }

    #[test]
    fn test_error_display_plugin() {
        let err = BuildError::plugin("theme", "unknown theme path 'colors.nope'");
        assert_eq!(
            err.to_string(),
            "plugin 'theme' failed: unknown theme path 'colors.nope'"
        );
    }
}
