//! File watcher for detecting notebook changes.

use std::path::{Path, PathBuf};
use std::time::Duration;

use notify_debouncer_mini::{DebounceEventResult, new_debouncer, notify::RecursiveMode};
use tokio::sync::mpsc;

/// File change event.
#[derive(Debug, Clone)]
pub enum FileEvent {
    /// File was modified or recreated.
    Modified(PathBuf),
    /// File was removed.
    Removed(PathBuf),
}

/// Watches a single notebook file.
pub struct FileWatcher {
    /// Debouncer handle (kept alive to maintain watcher).
    _debouncer: notify_debouncer_mini::Debouncer<notify::RecommendedWatcher>,
    /// Receiver for file events.
    rx: mpsc::UnboundedReceiver<FileEvent>,
}

impl FileWatcher {
    /// Watch `path`, which must be an existing file.
    pub fn new(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let target = path.as_ref().canonicalize()?;
        let watch_dir = target.parent().unwrap_or(Path::new(".")).to_path_buf();

        let (tx, rx) = mpsc::unbounded_channel();

        let mut debouncer = new_debouncer(
            Duration::from_millis(200),
            move |result: DebounceEventResult| {
                let events = match result {
                    Ok(events) => events,
                    Err(e) => {
                        tracing::warn!("Watch error: {}", e);
                        return;
                    }
                };

                for event in events {
                    // Editors often save via a temp file in the same directory
                    if event.path != target {
                        continue;
                    }

                    let file_event = if event.path.exists() {
                        FileEvent::Modified(event.path.clone())
                    } else {
                        FileEvent::Removed(event.path.clone())
                    };

                    let _ = tx.send(file_event);
                }
            },
        )?;

        debouncer
            .watcher()
            .watch(&watch_dir, RecursiveMode::NonRecursive)?;

        Ok(Self {
            _debouncer: debouncer,
            rx,
        })
    }

    /// Receive the next file event.
    pub async fn recv(&mut self) -> Option<FileEvent> {
        self.rx.recv().await
    }
}
