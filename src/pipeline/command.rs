//! `command` plugin: pipes the stylesheet through an external program
//!
//! The program receives the CSS on stdin and must print the result on
//! stdout. `{from}` and `{to}` in arguments are replaced with the build paths.

use std::io::Write;
use std::process::{Command, Stdio};

use crate::config::PluginConfig;
use crate::error::{BuildError, BuildResult};

use super::{Plugin, ProcessOptions};

const NAME: &str = "command";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandPlugin {
    program: String,
    args: Vec<String>,
}

impl CommandPlugin {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    pub fn from_config(config: &PluginConfig) -> BuildResult<Self> {
        let program = config
            .program
            .as_deref()
            .filter(|p| !p.trim().is_empty())
            .ok_or_else(|| BuildError::plugin(NAME, "missing 'program'"))?;
        Ok(Self::new(program, config.args.clone()))
    }

    fn expand_args(&self, options: &ProcessOptions) -> Vec<String> {
        let from = options.from.display().to_string();
        let to = options.to.display().to_string();
        self.args
            .iter()
            .map(|arg| arg.replace("{from}", &from).replace("{to}", &to))
            .collect()
    }
}

impl Plugin for CommandPlugin {
    fn name(&self) -> &str {
        NAME
    }

    fn transform(&self, css: String, options: &ProcessOptions) -> BuildResult<String> {
        let mut child = Command::new(&self.program)
            .args(self.expand_args(options))
            .env("CSSBUILD_ENV", options.mode.as_str())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                BuildError::plugin(NAME, format!("failed to start '{}': {}", self.program, e))
            })?;

        // stdin is written concurrently with draining stdout
        let stdin = child.stdin.take();
        let writer = std::thread::spawn(move || -> std::io::Result<()> {
            if let Some(mut stdin) = stdin {
                stdin.write_all(css.as_bytes())?;
            }
            Ok(())
        });

        let output = child.wait_with_output().map_err(|e| {
            BuildError::plugin(NAME, format!("failed to wait for '{}': {}", self.program, e))
        })?;
        // Broken pipe here just means the child ignored stdin; exit status decides
        let _ = writer.join();

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(BuildError::plugin(
                NAME,
                format!(
                    "'{}' exited with {}: {}",
                    self.program,
                    output.status,
                    stderr.trim()
                ),
            ));
        }

        String::from_utf8(output.stdout).map_err(|_| {
            BuildError::plugin(NAME, format!("'{}' produced non-UTF-8 output", self.program))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BuildMode;
    use std::path::PathBuf;

    fn options() -> ProcessOptions {
        ProcessOptions {
            from: PathBuf::from("css/style.css"),
            to: PathBuf::from("css/built.css"),
            mode: BuildMode::Development,
        }
    }

    #[test]
    fn from_config_requires_program() {
        let err = CommandPlugin::from_config(&PluginConfig::named("command")).unwrap_err();
        assert!(err.to_string().contains("missing 'program'"));
    }

    #[test]
    fn expands_path_placeholders() {
        let plugin = CommandPlugin::new(
            "tool",
            vec!["--input={from}".into(), "-o".into(), "{to}".into()],
        );
        assert_eq!(
            plugin.expand_args(&options()),
            vec!["--input=css/style.css", "-o", "css/built.css"]
        );
    }

    #[test]
    fn missing_program_is_a_plugin_error() {
        let plugin = CommandPlugin::new("cssbuild-definitely-not-installed", vec![]);
        let err = plugin.transform(".a{}".into(), &options()).unwrap_err();
        assert!(err.to_string().contains("failed to start"), "got: {}", err);
    }

    #[cfg(unix)]
    #[test]
    fn pipes_css_through_program() {
        let plugin = CommandPlugin::new("cat", vec![]);
        let out = plugin
            .transform(".a { color: red; }".into(), &options())
            .unwrap();
        assert_eq!(out, ".a { color: red; }");
    }

    #[cfg(unix)]
    #[test]
    fn non_zero_exit_reports_stderr() {
        let plugin = CommandPlugin::new(
            "sh",
            vec!["-c".into(), "echo 'bad input' >&2; exit 3".into()],
        );
        let err = plugin.transform(".a{}".into(), &options()).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("bad input"), "got: {}", msg);
        assert!(msg.contains("'sh' exited"), "got: {}", msg);
    }
}
