//! File watcher for continuous builds
//!
//! Implements `--watch` with:
//! - Debouncing (100ms)
//! - Change fingerprints (mtime + content hash), so one save rebuilds once
//! - Serialized rebuilds (`Idle`/`Building` plus a pending flag)
//! - Graceful Ctrl+C shutdown
//! - NDJSON output for CI

mod event;
mod run;

pub use event::{BuildState, WatchEvent, DEBOUNCE_MS};
pub use run::{watch, WatchLoop};
