use anyhow::{Context, Result};

use cssbuild::{Builder, WatchEvent};

use crate::ui::context::UiContext;
use crate::ui::watch::{is_diagnostic, render_event};

/// Build once and exit
pub fn cmd_build(builder: &Builder, ui: &UiContext) -> Result<()> {
    let report = match builder.build() {
        Ok(report) => report,
        Err(e) => {
            if ui.json {
                emit(
                    &WatchEvent::BuildFailed {
                        message: e.to_string(),
                    },
                    ui,
                );
            }
            return Err(e).with_context(|| {
                format!("failed to build {}", builder.current_source().display())
            });
        }
    };

    for warning in &report.warnings {
        emit(
            &WatchEvent::ConfigWarning {
                message: warning.to_string(),
            },
            ui,
        );
    }

    emit(
        &WatchEvent::BuildComplete {
            output: report.output.display().to_string(),
            bytes: report.bytes_written,
            plugins: report.plugins,
        },
        ui,
    );
    Ok(())
}

fn emit(event: &WatchEvent, ui: &UiContext) {
    if ui.json {
        println!("{}", event.to_json());
        return;
    }
    if let Some(rendered) = render_event(None, event, ui) {
        if is_diagnostic(event) {
            eprint!("{rendered}");
        } else {
            print!("{rendered}");
        }
    }
}
