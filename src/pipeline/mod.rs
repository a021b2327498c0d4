//! Stylesheet transformation pipeline
//!
//! A [`Pipeline`] applies an ordered list of [`Plugin`]s to the source text.
//! The orchestrator treats it as a black box: plugin list, source text and
//! `{from, to}` in, stylesheet text out. An empty pipeline is the identity.

mod command;
mod lightning;
mod theme;

use std::path::PathBuf;

use crate::config::env_validator::suggest;
use crate::config::{BuildConfig, BuildMode, PluginConfig};
use crate::error::{BuildError, BuildResult};

pub use command::CommandPlugin;
pub use lightning::{Autoprefix, Minify};
pub use theme::ThemePlugin;

/// Names accepted in `[[plugins]] name = ...`
pub const PLUGIN_NAMES: &[&str] = &["theme", "autoprefix", "minify", "command"];

/// Metadata handed to every plugin alongside the stylesheet text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOptions {
    /// Originating stylesheet path
    pub from: PathBuf,
    /// Destination path of the built artifact
    pub to: PathBuf,
    pub mode: BuildMode,
}

/// One unit of transformation logic
pub trait Plugin: Send {
    fn name(&self) -> &str;

    fn transform(&self, css: String, options: &ProcessOptions) -> BuildResult<String>;
}

/// Ordered plugin chain
#[derive(Default)]
pub struct Pipeline {
    plugins: Vec<Box<dyn Plugin>>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_plugin(mut self, plugin: Box<dyn Plugin>) -> Self {
        self.plugins.push(plugin);
        self
    }

    /// Build the plugin chain active for `mode`
    ///
    /// Plugins marked `production_only` are left out of development builds.
    pub fn from_config(config: &BuildConfig, mode: BuildMode) -> BuildResult<Self> {
        config
            .active_plugins(mode)
            .try_fold(Self::new(), |pipeline, plugin| {
                Ok(pipeline.with_plugin(create_plugin(plugin, &config.theme)?))
            })
    }

    pub fn plugin_names(&self) -> Vec<String> {
        self.plugins.iter().map(|p| p.name().to_string()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    /// Run every plugin in order; the first failure aborts the run
    pub fn process(&self, css: &str, options: &ProcessOptions) -> BuildResult<String> {
        self.plugins
            .iter()
            .try_fold(css.to_string(), |css, plugin| plugin.transform(css, options))
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("plugins", &self.plugin_names())
            .finish()
    }
}

fn create_plugin(config: &PluginConfig, theme: &toml::Table) -> BuildResult<Box<dyn Plugin>> {
    match config.name.as_str() {
        "theme" => Ok(Box::new(ThemePlugin::new(theme.clone()))),
        "autoprefix" => Ok(Box::new(Autoprefix::from_config(config)?)),
        "minify" => Ok(Box::new(Minify)),
        "command" => Ok(Box::new(CommandPlugin::from_config(config)?)),
        other => Err(BuildError::UnknownPlugin {
            name: other.to_string(),
            suggestion: suggest(other, PLUGIN_NAMES),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> ProcessOptions {
        ProcessOptions {
            from: PathBuf::from("css/style.css"),
            to: PathBuf::from("css/built.css"),
            mode: BuildMode::Development,
        }
    }

    struct Suffix(&'static str);

    impl Plugin for Suffix {
        fn name(&self) -> &str {
            "suffix"
        }

        fn transform(&self, css: String, _options: &ProcessOptions) -> BuildResult<String> {
            Ok(css + self.0)
        }
    }

    struct Fails;

    impl Plugin for Fails {
        fn name(&self) -> &str {
            "fails"
        }

        fn transform(&self, _css: String, _options: &ProcessOptions) -> BuildResult<String> {
            Err(BuildError::plugin("fails", "malformed input"))
        }
    }

    #[test]
    fn empty_pipeline_is_identity() {
        let pipeline = Pipeline::new();
        assert!(pipeline.is_empty());
        let css = ".a { color: red; }";
        assert_eq!(pipeline.process(css, &options()).unwrap(), css);
    }

    #[test]
    fn plugins_run_in_declaration_order() {
        let pipeline = Pipeline::new()
            .with_plugin(Box::new(Suffix("/1")))
            .with_plugin(Box::new(Suffix("/2")));
        assert_eq!(pipeline.process("x", &options()).unwrap(), "x/1/2");
    }

    #[test]
    fn first_failure_aborts() {
        let pipeline = Pipeline::new()
            .with_plugin(Box::new(Fails))
            .with_plugin(Box::new(Suffix("/never")));
        let err = pipeline.process("x", &options()).unwrap_err();
        assert!(matches!(err, BuildError::Plugin { ref plugin, .. } if plugin == "fails"));
    }

    #[test]
    fn from_config_drops_production_only_in_development() {
        let mut prefix = PluginConfig::named("autoprefix");
        prefix.production_only = true;
        let config = BuildConfig {
            plugins: vec![PluginConfig::named("theme"), prefix],
            ..BuildConfig::default()
        };

        let dev = Pipeline::from_config(&config, BuildMode::Development).unwrap();
        assert_eq!(dev.plugin_names(), vec!["theme"]);
        assert!(!dev.is_empty());

        let prod = Pipeline::from_config(&config, BuildMode::Production).unwrap();
        assert_eq!(prod.plugin_names(), vec!["theme", "autoprefix"]);
    }

    #[test]
    fn unknown_plugin_is_rejected_with_suggestion() {
        let config = BuildConfig {
            plugins: vec![PluginConfig::named("minfy")],
            ..BuildConfig::default()
        };
        let err = Pipeline::from_config(&config, BuildMode::Development).unwrap_err();
        match err {
            BuildError::UnknownPlugin { name, suggestion } => {
                assert_eq!(name, "minfy");
                assert_eq!(suggestion.as_deref(), Some("minify"));
            }
            other => panic!("expected UnknownPlugin, got {:?}", other),
        }
    }

    #[test]
    fn same_input_same_output() {
        let config = BuildConfig {
            plugins: vec![PluginConfig::named("minify")],
            ..BuildConfig::default()
        };
        let pipeline = Pipeline::from_config(&config, BuildMode::Development).unwrap();
        let css = ".a { color: red; }\n.b { margin: 0 auto; }";
        let first = pipeline.process(css, &options()).unwrap();
        let second = pipeline.process(css, &options()).unwrap();
        assert_eq!(first, second);
    }
}
