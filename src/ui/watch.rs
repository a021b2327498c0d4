use cssbuild::WatchEvent;

use crate::ui::context::UiContext;
use crate::ui::icon::Icon;

pub fn render_watch_header(source: &str, config: &str, ui: &UiContext) -> String {
    format!(
        "{} cssbuild watch\n  Source: {}\n  Config: {}\n  Press Ctrl+C to stop\n\n",
        Icon::Watch.colored(ui.color, ui.unicode),
        source,
        config
    )
}

/// Render one event as a human-readable line
///
/// `timestamp` prefixes the line in watch mode. Returns `None` for events
/// hidden at the current verbosity.
pub fn render_event(timestamp: Option<&str>, event: &WatchEvent, ui: &UiContext) -> Option<String> {
    let prefix = timestamp.map(|t| format!("[{}] ", t)).unwrap_or_default();
    let icon = |icon: Icon| icon.colored(ui.color, ui.unicode);

    let line = match event {
        WatchEvent::WatchStarted { source, config } => format!(
            "{}{} Watching: {} and {}",
            prefix,
            icon(Icon::Watch),
            source,
            config
        ),
        WatchEvent::FileChanged { path } => {
            format!("{}{} Changed: {}", prefix, icon(Icon::Arrow), path)
        }
        WatchEvent::BuildStarted => {
            if ui.verbose == 0 {
                return None;
            }
            format!("{}{} Building...", prefix, icon(Icon::Progress))
        }
        WatchEvent::BuildComplete {
            output,
            bytes,
            plugins,
        } => {
            let mut line = format!(
                "{}{} Built {} ({} bytes)",
                prefix,
                icon(Icon::Success),
                output,
                bytes
            );
            if ui.verbose > 0 {
                if plugins.is_empty() {
                    line.push_str(" [no plugins]");
                } else {
                    line.push_str(&format!(" [{}]", plugins.join(" > ")));
                }
            }
            line
        }
        WatchEvent::BuildFailed { message } => {
            format!("{}{} Build failed: {}", prefix, icon(Icon::Error), message)
        }
        WatchEvent::ConfigWarning { message } => {
            format!("{}{} {}", prefix, icon(Icon::Warning), message)
        }
        WatchEvent::Shutdown => format!("\n{}{} Watch stopped.", prefix, icon(Icon::Watch)),
    };

    Some(format!("{}\n", line))
}

/// Events that belong on stderr
pub fn is_diagnostic(event: &WatchEvent) -> bool {
    matches!(
        event,
        WatchEvent::BuildFailed { .. } | WatchEvent::ConfigWarning { .. }
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(verbose: u8) -> UiContext {
        UiContext {
            json: false,
            verbose,
            color: false,
            unicode: false,
        }
    }

    #[test]
    fn renders_started_event_with_watch_icon() {
        let event = WatchEvent::WatchStarted {
            source: "css/style.css".to_string(),
            config: "css/config.toml".to_string(),
        };
        let rendered = render_event(Some("00:00:00"), &event, &plain(0)).unwrap();
        assert_eq!(
            rendered,
            "[00:00:00] [~] Watching: css/style.css and css/config.toml\n"
        );
    }

    #[test]
    fn build_started_hidden_unless_verbose() {
        assert!(render_event(None, &WatchEvent::BuildStarted, &plain(0)).is_none());
        assert!(render_event(None, &WatchEvent::BuildStarted, &plain(1)).is_some());
    }

    #[test]
    fn build_complete_lists_plugins_when_verbose() {
        let event = WatchEvent::BuildComplete {
            output: "css/built.css".to_string(),
            bytes: 18,
            plugins: vec!["theme".to_string(), "minify".to_string()],
        };
        let quiet = render_event(None, &event, &plain(0)).unwrap();
        assert_eq!(quiet, "[OK] Built css/built.css (18 bytes)\n");

        let verbose = render_event(None, &event, &plain(1)).unwrap();
        assert!(verbose.contains("[theme > minify]"));
    }

    #[test]
    fn failures_and_warnings_go_to_stderr() {
        assert!(is_diagnostic(&WatchEvent::BuildFailed {
            message: "x".to_string()
        }));
        assert!(is_diagnostic(&WatchEvent::ConfigWarning {
            message: "x".to_string()
        }));
        assert!(!is_diagnostic(&WatchEvent::Shutdown));
    }
}
