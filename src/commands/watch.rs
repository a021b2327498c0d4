use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};

use cssbuild::{watch, Builder, WatchEvent};

use crate::ui::context::UiContext;
use crate::ui::watch::{is_diagnostic, render_event, render_watch_header};

/// Build, then rebuild on every change until Ctrl+C
pub fn cmd_watch(builder: &Builder, ui: &UiContext) -> Result<()> {
    let running = Arc::new(AtomicBool::new(true));
    let running_clone = running.clone();

    ctrlc::set_handler(move || {
        running_clone.store(false, Ordering::SeqCst);
    })
    .context("failed to set Ctrl+C handler")?;

    if !ui.json {
        print!(
            "{}",
            render_watch_header(
                &builder.current_source().display().to_string(),
                &builder.paths().config.display().to_string(),
                ui
            )
        );
    }

    watch(builder, running, |event| {
        if ui.json {
            println!("{}", event.to_json());
            return;
        }

        // The header already names both files
        if matches!(event, WatchEvent::WatchStarted { .. }) && ui.verbose == 0 {
            return;
        }

        let timestamp = chrono::Local::now().format("%H:%M:%S").to_string();
        if let Some(rendered) = render_event(Some(&timestamp), &event, ui) {
            if is_diagnostic(&event) {
                eprint!("{rendered}");
            } else {
                print!("{rendered}");
            }
        }
    })
    .context("failed to watch for changes")?;

    Ok(())
}
