//! cssbuild - stylesheet build orchestrator
//!
//! Compiles one stylesheet through an ordered plugin pipeline and writes the
//! result to one destination, optionally rebuilding whenever the stylesheet
//! or its config file changes.

pub mod builder;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod watcher;

// Re-exports for convenience
pub use builder::{write_atomic, BuildPaths, BuildReport, Builder};
pub use config::{BuildConfig, BuildMode, ConfigWarning, PluginConfig};
pub use error::{BuildError, BuildResult};
pub use pipeline::{Pipeline, Plugin, ProcessOptions};
pub use watcher::{watch, BuildState, WatchEvent, WatchLoop};
