//! Watch loop: rebuild on changes to the source or the config file

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{channel, Receiver};
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use sha2::{Digest, Sha256};

use crate::builder::{BuildReport, Builder};
use crate::error::BuildResult;

use super::event::{BuildState, WatchEvent, WatcherState};

/// Start watching for file changes
///
/// Runs an initial build, then rebuilds whenever the source stylesheet or the
/// config file changes, until `running` is cleared. Build failures are
/// reported through `event_callback` and never end the loop; only a failure
/// to register the file watcher is returned as an error.
///
/// The watched source path is resolved once, at startup. Editing
/// `[paths].source` mid-watch changes what later builds read, but
/// notifications still come from the original path; restart to follow it.
pub fn watch(
    builder: &Builder,
    running: Arc<AtomicBool>,
    event_callback: impl Fn(WatchEvent),
) -> BuildResult<()> {
    let mut watch_loop = WatchLoop::new(builder);

    event_callback(WatchEvent::WatchStarted {
        source: watch_loop.source().display().to_string(),
        config: watch_loop.config().display().to_string(),
    });

    // Set up file watcher before the initial build so no edit slips through
    let (tx, rx) = channel();

    let mut watcher = RecommendedWatcher::new(
        move |res: Result<Event, notify::Error>| {
            if let Ok(event) = res {
                if matches!(event.kind, EventKind::Access(_)) {
                    return;
                }
                for path in event.paths {
                    let _ = tx.send(path);
                }
            }
        },
        Config::default(),
    )?;

    for dir in watch_loop.watched_dirs() {
        watcher.watch(&dir, RecursiveMode::NonRecursive)?;
    }

    watch_loop.rebuild(Some(&rx), &event_callback);

    while running.load(Ordering::SeqCst) {
        watch_loop.poll(&rx, Duration::from_millis(50), &event_callback);
    }

    event_callback(WatchEvent::Shutdown);
    Ok(())
}

/// Rebuild bookkeeping for one builder
///
/// Owns the `Idle`/`Building` state and the pending flag; builds run on the
/// caller's thread, so two builds can never overlap.
pub struct WatchLoop<'a> {
    builder: &'a Builder,
    source: PathBuf,
    config: PathBuf,
    state: BuildState,
    pending: bool,
    debounce: WatcherState,
    fingerprints: HashMap<PathBuf, Option<Fingerprint>>,
    builds: usize,
}

impl<'a> WatchLoop<'a> {
    pub fn new(builder: &'a Builder) -> Self {
        let source = normalize(&builder.current_source());
        let config = normalize(&builder.paths().config);

        // Baseline, so the watcher's startup noise is not a change
        let fingerprints = [&source, &config]
            .into_iter()
            .map(|p| (p.clone(), fingerprint(p)))
            .collect();

        Self {
            builder,
            source,
            config,
            state: BuildState::Idle,
            pending: false,
            debounce: WatcherState::new(),
            fingerprints,
            builds: 0,
        }
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn config(&self) -> &Path {
        &self.config
    }

    pub fn state(&self) -> BuildState {
        self.state
    }

    /// Number of builds run so far (initial build included)
    pub fn builds(&self) -> usize {
        self.builds
    }

    /// Existing parent directories of the watched files, deduplicated
    pub fn watched_dirs(&self) -> Vec<PathBuf> {
        let mut dirs: Vec<PathBuf> = [&self.source, &self.config]
            .into_iter()
            .filter_map(|p| p.parent())
            .filter(|d| d.is_dir())
            .map(Path::to_path_buf)
            .collect();
        dirs.sort();
        dirs.dedup();
        dirs
    }

    /// Record a change notification
    ///
    /// Returns `true` if the path is watched and its modification time or
    /// content differs from what was last observed. Repeated events for one
    /// save are dropped; a re-save with identical content still counts, as
    /// does deleting the file.
    pub fn notify(&mut self, path: PathBuf) -> bool {
        let path = normalize(&path);
        if path != self.source && path != self.config {
            return false;
        }

        let current = fingerprint(&path);
        if self.fingerprints.get(&path) == Some(&current) {
            return false;
        }
        self.fingerprints.insert(path.clone(), current);

        if self.state == BuildState::Building {
            self.pending = true;
        }
        self.debounce.add_change(path);
        true
    }

    /// Wait up to `timeout` for one notification, then rebuild if the
    /// debounce window has elapsed
    pub fn poll(
        &mut self,
        rx: &Receiver<PathBuf>,
        timeout: Duration,
        callback: &impl Fn(WatchEvent),
    ) {
        if let Ok(path) = rx.recv_timeout(timeout) {
            self.notify(path);
        }

        if self.debounce.should_build() {
            self.report_changes(callback);
            self.rebuild(Some(rx), callback);
        }
    }

    /// Run one build, plus one follow-up if changes arrived meanwhile
    ///
    /// Notifications queued in `rx` while building are drained before going
    /// back to `Idle`; any real change among them sets `pending`, which is
    /// served by exactly one more build.
    pub fn rebuild(
        &mut self,
        rx: Option<&Receiver<PathBuf>>,
        callback: &impl Fn(WatchEvent),
    ) -> Option<BuildReport> {
        loop {
            self.state = BuildState::Building;
            self.pending = false;

            let report = self.build_once(callback);

            if let Some(rx) = rx {
                while let Ok(path) = rx.try_recv() {
                    self.notify(path);
                }
            }
            self.state = BuildState::Idle;

            if !self.pending {
                return report;
            }
            self.report_changes(callback);
        }
    }

    fn build_once(&mut self, callback: &impl Fn(WatchEvent)) -> Option<BuildReport> {
        callback(WatchEvent::BuildStarted);
        self.builds += 1;

        match self.builder.build() {
            Ok(report) => {
                for warning in &report.warnings {
                    callback(WatchEvent::ConfigWarning {
                        message: warning.to_string(),
                    });
                }
                callback(WatchEvent::BuildComplete {
                    output: report.output.display().to_string(),
                    bytes: report.bytes_written,
                    plugins: report.plugins.clone(),
                });
                Some(report)
            }
            Err(e) => {
                callback(WatchEvent::BuildFailed {
                    message: e.to_string(),
                });
                None
            }
        }
    }

    fn report_changes(&mut self, callback: &impl Fn(WatchEvent)) {
        for path in self.debounce.take_changes() {
            callback(WatchEvent::FileChanged {
                path: path.display().to_string(),
            });
        }
    }
}

/// Absolute path with a canonical parent, comparable to notify's paths
///
/// Only the parent is canonicalized; the file itself may not exist.
pub(crate) fn normalize(path: &Path) -> PathBuf {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    };

    if let (Some(parent), Some(name)) = (absolute.parent(), absolute.file_name()) {
        if let Ok(canonical) = parent.canonicalize() {
            return canonical.join(name);
        }
    }
    absolute
}

/// What a notification is compared against: one save yields one fingerprint
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Fingerprint {
    modified: Option<SystemTime>,
    hash: String,
}

/// `None` if the file cannot be read
pub(crate) fn fingerprint(path: &Path) -> Option<Fingerprint> {
    let hash = hash_file(path)?;
    let modified = std::fs::metadata(path).and_then(|m| m.modified()).ok();
    Some(Fingerprint { modified, hash })
}

/// SHA-256 of the file content, `None` if it cannot be read
pub(crate) fn hash_file(path: &Path) -> Option<String> {
    let content = std::fs::read(path).ok()?;
    let mut hasher = Sha256::new();
    hasher.update(&content);
    Some(format!("sha256:{:x}", hasher.finalize()))
}
