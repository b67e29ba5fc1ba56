//! Route document watcher for lint-on-save.

use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::config::loader::load_document;
use crate::lint::{LintReport, LintSession, Linter};

/// A watcher that re-lints a route document whenever it changes.
pub struct DocumentWatcher {
    path: PathBuf,
    linter: Linter,
    report_tx: mpsc::UnboundedSender<LintReport>,
}

impl DocumentWatcher {
    /// Create a new DocumentWatcher.
    ///
    /// Returns the watcher and a receiver for lint reports.
    pub fn new(path: &Path, linter: Linter) -> (Self, mpsc::UnboundedReceiver<LintReport>) {
        let (report_tx, report_rx) = mpsc::unbounded_channel();

        (
            Self {
                path: path.to_path_buf(),
                linter,
                report_tx,
            },
            report_rx,
        )
    }

    /// Start watching the file on notify's background thread.
    ///
    /// Dropping the returned watcher stops it.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let Self {
            path,
            linter,
            report_tx,
        } = self;
        let watched = path.clone();
        let mut session = LintSession::new();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    if event.kind.is_modify() || event.kind.is_create() {
                        tracing::info!(path = %path.display(), "Route document changed, re-linting");
                        match load_document(&path) {
                            Ok(document) => {
                                session.reset();
                                let report =
                                    linter.lint_document(&mut session, &document).with_source(&path);
                                let _ = report_tx.send(report);
                            }
                            Err(e) => {
                                tracing::error!("Failed to reload route document: {}", e);
                            }
                        }
                    }
                }
                Err(e) => tracing::error!("Watch error: {:?}", e),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        watcher.watch(&watched, RecursiveMode::NonRecursive)?;

        tracing::info!(path = ?watched, "Document watcher started");
        Ok(watcher)
    }
}
