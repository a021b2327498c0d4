//! Build orchestrator
//!
//! One build = reload config, read source, run pipeline, write output.
//! Nothing is cached between builds; the output is a pure function of the
//! source text, the configuration and the build mode.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::config::{
    BuildConfig, BuildMode, ConfigWarning, DEFAULT_CONFIG, DEFAULT_OUTPUT, DEFAULT_SOURCE,
};
use crate::error::{BuildError, BuildResult};
use crate::pipeline::{Pipeline, ProcessOptions};

/// Where the builder reads and writes
///
/// `source` and `output` left as `None` fall back to `[paths]` in the config
/// file, then to the built-in defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildPaths {
    pub source: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub config: PathBuf,
}

impl Default for BuildPaths {
    fn default() -> Self {
        Self {
            source: None,
            output: None,
            config: PathBuf::from(DEFAULT_CONFIG),
        }
    }
}

impl BuildPaths {
    /// Fixed paths, ignoring any `[paths]` section
    pub fn fixed(
        source: impl Into<PathBuf>,
        output: impl Into<PathBuf>,
        config: impl Into<PathBuf>,
    ) -> Self {
        Self {
            source: Some(source.into()),
            output: Some(output.into()),
            config: config.into(),
        }
    }

    pub fn resolve_source(&self, config: &BuildConfig) -> PathBuf {
        self.source
            .clone()
            .or_else(|| config.paths.source.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SOURCE))
    }

    pub fn resolve_output(&self, config: &BuildConfig) -> PathBuf {
        self.output
            .clone()
            .or_else(|| config.paths.output.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT))
    }
}

/// Summary of one successful build
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReport {
    pub source: PathBuf,
    pub output: PathBuf,
    pub plugins: Vec<String>,
    pub bytes_written: usize,
    pub warnings: Vec<ConfigWarning>,
}

/// Runs builds for one source/output pair
#[derive(Debug, Clone)]
pub struct Builder {
    paths: BuildPaths,
    mode: BuildMode,
}

impl Builder {
    pub fn new(paths: BuildPaths, mode: BuildMode) -> Self {
        Self { paths, mode }
    }

    pub fn paths(&self) -> &BuildPaths {
        &self.paths
    }

    pub fn mode(&self) -> BuildMode {
        self.mode
    }

    /// Source path as currently configured (re-reads the config file)
    pub fn current_source(&self) -> PathBuf {
        match BuildConfig::load(&self.paths.config) {
            Ok(config) => self.paths.resolve_source(&config),
            Err(_) => self.paths.resolve_source(&BuildConfig::default()),
        }
    }

    /// Perform one full build
    ///
    /// Errors leave the previous output untouched.
    pub fn build(&self) -> BuildResult<BuildReport> {
        let (config, warnings) = BuildConfig::load_with_warnings(&self.paths.config)?;
        let source = self.paths.resolve_source(&config);
        let output = self.paths.resolve_output(&config);

        let pipeline = Pipeline::from_config(&config, self.mode)?;

        let bytes = fs::read(&source).map_err(|e| BuildError::ReadSource {
            path: source.clone(),
            source: e,
        })?;
        let css = String::from_utf8(bytes).map_err(|_| BuildError::InvalidUtf8 {
            path: source.clone(),
        })?;

        let options = ProcessOptions {
            from: source.clone(),
            to: output.clone(),
            mode: self.mode,
        };
        let built = if pipeline.is_empty() {
            css
        } else {
            pipeline.process(&css, &options)?
        };

        write_atomic(&output, built.as_bytes()).map_err(|e| BuildError::WriteOutput {
            path: output.clone(),
            source: e,
        })?;

        Ok(BuildReport {
            source,
            output,
            plugins: pipeline.plugin_names(),
            bytes_written: built.len(),
            warnings,
        })
    }
}

/// Write content to a file atomically
///
/// Uses tempfile + rename in the destination directory, so the file is either
/// the old content or the new content, never a partial write.
pub fn write_atomic(path: &Path, content: &[u8]) -> std::io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    let mut temp = tempfile::NamedTempFile::new_in(dir)?;
    temp.write_all(content)?;
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
