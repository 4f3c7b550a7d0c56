//! Re-indexing the package folder when it changes.

use crate::config::Config;
use crate::error::Result;
use crate::indexer::run_cycle;
use apt_repository::is_index_output;
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver};
use tokio::task::JoinHandle;
use tracing::{debug, error};

type EventResult = notify::Result<Event>;

/// A registered watch on the package folder.
///
/// Events start queueing as soon as the watcher is created, but nothing is
/// re-indexed until [`PackageWatcher::run`] is called.
pub struct PackageWatcher {
    // Dropping the watcher unregisters it.
    _watcher: RecommendedWatcher,
    events: Receiver<EventResult>,
    folder: PathBuf,
    max_depth: usize,
}

impl PackageWatcher {
    /// Register a watch on the configured folder.
    pub fn new(config: &Config) -> Result<Self> {
        let (tx, events) = mpsc::channel();
        let mut watcher = notify::recommended_watcher(tx)?;
        let mode = if config.is_recursive() {
            RecursiveMode::Recursive
        } else {
            RecursiveMode::NonRecursive
        };
        watcher.watch(&config.folder, mode)?;
        debug!(folder = %config.folder.display(), ?mode, "Watching for changes");

        Ok(Self {
            _watcher: watcher,
            events,
            folder: config.folder.clone(),
            max_depth: config.max_depth,
        })
    }

    /// Re-index on every relevant change, one cycle at a time.
    ///
    /// A failed cycle is logged and the watch continues. Returns when the
    /// watcher reports an error or its channel closes.
    pub fn run(self) -> Result<()> {
        while wait_for_change(&self.events)? {
            if let Err(e) = run_cycle(&self.folder, self.max_depth) {
                error!("Failed to index {}: {}", self.folder.display(), e);
            }
        }
        Ok(())
    }
}

/// Run `watcher` on a blocking task.
pub fn spawn_watcher(watcher: PackageWatcher) -> JoinHandle<Result<()>> {
    tokio::task::spawn_blocking(move || watcher.run())
}

/// Whether `event` should trigger a new index.
///
/// Reads and events that only touch the index files themselves are ignored.
/// Events without paths, such as a backend rescan request, always count.
pub fn should_reindex(event: &Event) -> bool {
    if matches!(event.kind, EventKind::Access(_)) {
        return false;
    }
    event.paths.is_empty() || !event.paths.iter().all(|p| is_index_output(p))
}

/// Block until a relevant event arrives, then drain whatever else is queued.
///
/// Returns `Ok(false)` once the channel is closed.
fn wait_for_change(events: &Receiver<EventResult>) -> Result<bool> {
    for event in events.iter() {
        let event = event?;
        if !should_reindex(&event) {
            continue;
        }
        debug!(kind = ?event.kind, paths = ?event.paths, "Change detected");
        while let Ok(queued) = events.try_recv() {
            queued?;
        }
        return Ok(true);
    }
    Ok(false)
}
