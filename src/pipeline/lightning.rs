//! `autoprefix` and `minify` plugins backed by lightningcss

use lightningcss::stylesheet::{MinifyOptions, ParserOptions, PrinterOptions, StyleSheet};
use lightningcss::targets::{Browsers, Targets};

use crate::config::PluginConfig;
use crate::error::{BuildError, BuildResult};

use super::{Plugin, ProcessOptions};

/// Adds vendor prefixes for the configured browser targets
#[derive(Debug, Clone)]
pub struct Autoprefix {
    browsers: Browsers,
}

impl Autoprefix {
    pub fn new(browsers: Browsers) -> Self {
        Self { browsers }
    }

    pub fn from_config(config: &PluginConfig) -> BuildResult<Self> {
        if config.targets.is_empty() {
            return Ok(Self::new(default_browsers()));
        }

        let mut browsers = Browsers::default();
        for (browser, version) in &config.targets {
            let parsed = parse_version(version).ok_or_else(|| {
                BuildError::plugin(
                    "autoprefix",
                    format!("invalid version '{}' for browser '{}'", version, browser),
                )
            })?;
            let slot = match browser.as_str() {
                "android" => &mut browsers.android,
                "chrome" => &mut browsers.chrome,
                "edge" => &mut browsers.edge,
                "firefox" => &mut browsers.firefox,
                "ie" => &mut browsers.ie,
                "ios" | "ios_saf" => &mut browsers.ios_saf,
                "opera" => &mut browsers.opera,
                "safari" => &mut browsers.safari,
                "samsung" => &mut browsers.samsung,
                other => {
                    return Err(BuildError::plugin(
                        "autoprefix",
                        format!("unknown browser '{}'", other),
                    ))
                }
            };
            *slot = Some(parsed);
        }
        Ok(Self::new(browsers))
    }
}

impl Plugin for Autoprefix {
    fn name(&self) -> &str {
        "autoprefix"
    }

    fn transform(&self, css: String, options: &ProcessOptions) -> BuildResult<String> {
        let targets = Targets::from(self.browsers);
        print(self.name(), &css, options, targets, false)
    }
}

/// Minifies the stylesheet without changing browser targets
#[derive(Debug, Clone, Copy, Default)]
pub struct Minify;

impl Plugin for Minify {
    fn name(&self) -> &str {
        "minify"
    }

    fn transform(&self, css: String, options: &ProcessOptions) -> BuildResult<String> {
        print(self.name(), &css, options, Targets::default(), true)
    }
}

fn print(
    plugin: &str,
    css: &str,
    options: &ProcessOptions,
    targets: Targets,
    minify: bool,
) -> BuildResult<String> {
    let parser_options = ParserOptions {
        filename: options.from.display().to_string(),
        ..ParserOptions::default()
    };
    let mut sheet = StyleSheet::parse(css, parser_options)
        .map_err(|e| BuildError::plugin(plugin, e.to_string()))?;

    sheet
        .minify(MinifyOptions {
            targets,
            ..MinifyOptions::default()
        })
        .map_err(|e| BuildError::plugin(plugin, e.to_string()))?;

    let result = sheet
        .to_css(PrinterOptions {
            minify,
            targets,
            ..PrinterOptions::default()
        })
        .map_err(|e| BuildError::plugin(plugin, e.to_string()))?;

    Ok(result.code)
}

/// Browsers old enough that common prefixes still matter
fn default_browsers() -> Browsers {
    Browsers {
        chrome: Some(70 << 16),
        edge: Some(79 << 16),
        firefox: Some(68 << 16),
        ios_saf: Some(11 << 16),
        safari: Some(11 << 16),
        samsung: Some(10 << 16),
        ..Browsers::default()
    }
}

/// `"13.1"` -> lightningcss version encoding (`major << 16 | minor << 8 | patch`)
fn parse_version(version: &str) -> Option<u32> {
    let mut parts = version.trim().split('.');
    let major: u32 = parts.next()?.parse().ok()?;
    let minor: u32 = parts.next().map(str::parse::<u32>).transpose().ok()?.unwrap_or(0);
    let patch: u32 = parts.next().map(str::parse::<u32>).transpose().ok()?.unwrap_or(0);
    if parts.next().is_some() || major > 0xffff || minor > 0xff || patch > 0xff {
        return None;
    }
    Some((major << 16) | (minor << 8) | patch)
}
