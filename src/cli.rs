//! CLI Argument Parsing
//!
//! There are no subcommands: without `--watch` the binary builds once and
//! exits, with it the binary stays resident and rebuilds on changes.

use std::path::PathBuf;

use clap::Parser;

use cssbuild::config::DEFAULT_CONFIG;
use cssbuild::{BuildMode, BuildPaths};

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorWhen {
    Auto,
    Always,
    Never,
}

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeArg {
    Production,
    Development,
}

impl From<ModeArg> for BuildMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Production => BuildMode::Production,
            ModeArg::Development => BuildMode::Development,
        }
    }
}

/// cssbuild - compile a stylesheet through a plugin pipeline
#[derive(Parser, Debug)]
#[command(name = "cssbuild")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Keep running and rebuild when the stylesheet or config changes
    #[arg(long)]
    pub watch: bool,

    /// Source stylesheet [default: css/style.css]
    #[arg(short, long)]
    pub source: Option<PathBuf>,

    /// Built stylesheet [default: css/built.css]
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Config file (missing file means no plugins)
    #[arg(short, long, default_value = DEFAULT_CONFIG)]
    pub config: PathBuf,

    /// Build mode, overrides CSSBUILD_ENV
    #[arg(long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Output NDJSON events
    #[arg(long)]
    pub json: bool,

    /// Color output mode
    #[arg(long, value_enum)]
    pub color: Option<ColorWhen>,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn build_paths(&self) -> BuildPaths {
        BuildPaths {
            source: self.source.clone(),
            output: self.out.clone(),
            config: self.config.clone(),
        }
    }

    pub fn build_mode(&self) -> BuildMode {
        self.mode.map(BuildMode::from).unwrap_or_else(BuildMode::from_env)
    }
}
