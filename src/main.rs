//! cssbuild CLI - compile a stylesheet through a plugin pipeline
//!
//! Usage: cssbuild [--watch] [--source PATH] [--out PATH] [--config PATH]
//!
//! Without `--watch`, builds once and exits non-zero on failure.
//! With `--watch`, builds, then rebuilds whenever the stylesheet or the
//! config file changes, until interrupted.

use anyhow::Result;
use clap::Parser;

use cssbuild::Builder;

mod cli;
mod commands;
mod ui;

use cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let builder = Builder::new(cli.build_paths(), cli.build_mode());
    let ui = ui::context::UiContext::new(cli.json, cli.verbose, cli.color);

    if cli.watch {
        commands::watch::cmd_watch(&builder, &ui)
    } else {
        commands::build::cmd_build(&builder, &ui)
    }
}
