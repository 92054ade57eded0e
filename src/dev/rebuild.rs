//! Serialized rebuilds driven by watcher events.
//!
//! One thread owns the queue. Events that arrive while a rebuild runs pile
//! up in the channel and are folded into the next rebuild, so at most one
//! build is ever in flight.

use std::path::PathBuf;
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::time::Duration;

use indexmap::IndexMap;

use crate::bundler::Bundler;
use crate::error::{ElementError, Result};
use crate::fsutil::copy_file;
use crate::output::{display_path, Printer};
use crate::pipeline::{copy_rule_target, BuildOutcome, Pipeline};
use crate::playground::Mode;
use crate::publish::mirror_file;

use super::watcher::FileChange;

/// Quiet period that ends a burst of events.
pub const SETTLE: Duration = Duration::from_millis(50);

/// Gather `first` and every event that follows within [`SETTLE`] of the
/// previous one. Later events for a path replace earlier ones.
pub fn coalesce(first: FileChange, rx: &Receiver<FileChange>, settle: Duration) -> Vec<FileChange> {
    let mut pending: IndexMap<PathBuf, FileChange> = IndexMap::new();
    pending.insert(first.path().to_path_buf(), first);

    loop {
        match rx.recv_timeout(settle) {
            Ok(change) => {
                pending.insert(change.path().to_path_buf(), change);
            }
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => break,
        }
    }

    pending.into_values().collect()
}

/// Rebuild loop for `element start`.
pub struct RebuildQueue<'a, B: Bundler + ?Sized> {
    pipeline: Pipeline<'a, B>,
    mode: Mode,
    printer: Printer,
}

impl<'a, B: Bundler + ?Sized> RebuildQueue<'a, B> {
    pub fn new(pipeline: Pipeline<'a, B>, mode: Mode, printer: Printer) -> Self {
        Self {
            pipeline,
            mode,
            printer,
        }
    }

    /// Block on `rx` until every sender is gone.
    pub fn run(&self, rx: Receiver<FileChange>) {
        while let Ok(first) = rx.recv() {
            let changes = coalesce(first, &rx, SETTLE);
            self.handle(&changes);
        }
        tracing::debug!("watch channel closed; rebuild queue stopped");
    }

    /// Sync side effects for `changes`, then rebuild once.
    ///
    /// Nothing here is fatal: a failed copy or rebuild is reported and the
    /// dev loop keeps going.
    pub fn handle(&self, changes: &[FileChange]) -> Option<BuildOutcome> {
        for change in changes {
            if let Err(e) = self.sync(change) {
                self.printer
                    .warning("Skipped", &format!("{}: {}", display_path(change.path()), e));
            }
        }

        match self.pipeline.rebuild(self.mode) {
            Ok(outcome) => Some(outcome),
            Err(e) => {
                let (verb, message) = failure_notice(&e);
                self.printer.error(verb, &message);
                tracing::debug!("rebuild error: {:?}", e);
                None
            }
        }
    }

    fn sync(&self, change: &FileChange) -> Result<()> {
        let project = self.pipeline.project();
        let layout = &project.layout;
        let path = change.path();

        if project.config.is_playground() {
            if let Some(target) = mirror_file(layout, path)? {
                let verb = if change.is_upsert() { "Published" } else { "Unpublished" };
                self.printer.info(verb, &display_path(&target));
            }
        }

        if !change.is_upsert() || !path.is_file() {
            return Ok(());
        }
        let src = layout.src_dir();
        let Ok(relative) = path.strip_prefix(&src) else {
            return Ok(());
        };
        let out_dir = self.pipeline.out_dir(self.mode);
        for rule in &project.config.copy {
            if let Some(target) = copy_rule_target(rule, relative, &out_dir) {
                copy_file(path, &target)?;
                tracing::debug!("copied {} to {}", relative.display(), target.display());
            }
        }
        Ok(())
    }
}

/// Verb and message for a failed rebuild. Fatal errors need a source edit.
fn failure_notice(error: &ElementError) -> (&'static str, String) {
    if error.is_fatal() {
        ("Blocked", format!("{} Save a fix to rebuild.", error))
    } else {
        ("Rebuild", format!("failed: {}", error))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundler::{BundlePlan, BundleReport, LoadHook};
    use crate::config::ProjectConfig;
    use crate::project::{Layout, Project};
    use std::cell::Cell;
    use std::fs;
    use std::sync::mpsc;
    use tempfile::tempdir;

    struct CountingBundler {
        calls: Cell<usize>,
        fail: bool,
    }

    impl CountingBundler {
        fn new(fail: bool) -> Self {
            Self {
                calls: Cell::new(0),
                fail,
            }
        }
    }

    impl Bundler for CountingBundler {
        fn bundle(&self, plan: &BundlePlan, _hooks: &[&dyn LoadHook]) -> Result<BundleReport> {
            self.calls.set(self.calls.get() + 1);
            if self.fail {
                return Err(ElementError::Bundler {
                    message: "exit status 1".to_string(),
                    help: None,
                });
            }
            Ok(BundleReport {
                outfile: plan.outfile.clone(),
                ..BundleReport::default()
            })
        }
    }

    fn fixture(config: &str) -> (tempfile::TempDir, Project) {
        let dir = tempdir().unwrap();
        let button = dir.path().join("src/components/demo/button");
        fs::create_dir_all(&button).unwrap();
        fs::write(button.join("button.ts"), "class DemoButton extends HTMLElement {}").unwrap();
        let project = Project::new(
            Layout::new(dir.path()),
            ProjectConfig::parse(config).unwrap(),
        );
        (dir, project)
    }

    #[test]
    fn test_coalesce_folds_burst() {
        let (tx, rx) = mpsc::channel();
        let a = PathBuf::from("/p/src/a.ts");
        let b = PathBuf::from("/p/src/b.ts");
        tx.send(FileChange::Modified(b.clone())).unwrap();
        tx.send(FileChange::Removed(a.clone())).unwrap();
        drop(tx);

        let changes = coalesce(FileChange::Created(a.clone()), &rx, SETTLE);

        assert_eq!(
            changes,
            vec![FileChange::Removed(a), FileChange::Modified(b)]
        );
    }

    #[test]
    fn test_handle_mirrors_and_rebuilds_once() {
        let (dir, project) = fixture("{}\n");
        let bundler = CountingBundler::new(false);
        let printer = Printer::with_color(false);
        let queue = RebuildQueue::new(
            Pipeline::new(&project, &bundler, printer),
            Mode::Development,
            printer,
        );
        let source = dir.path().join("src/components/demo/button/button.ts");

        let outcome = queue.handle(&[
            FileChange::Modified(source.clone()),
            FileChange::Created(dir.path().join("src/notes.md")),
        ]);

        assert!(outcome.is_some());
        assert_eq!(bundler.calls.get(), 1);
        assert!(dir.path().join("publish/demo/button/button.ts").is_file());
    }

    #[test]
    fn test_handle_survives_failed_rebuild() {
        let (dir, project) = fixture("{}\n");
        let bundler = CountingBundler::new(true);
        let printer = Printer::with_color(false);
        let queue = RebuildQueue::new(
            Pipeline::new(&project, &bundler, printer),
            Mode::Development,
            printer,
        );
        let source = dir.path().join("src/components/demo/button/button.ts");

        assert!(queue.handle(&[FileChange::Modified(source.clone())]).is_none());
        assert!(queue.handle(&[FileChange::Modified(source)]).is_none());
        assert_eq!(bundler.calls.get(), 2);
    }

    #[test]
    fn test_handle_survives_fatal_scan_error() {
        let (dir, project) = fixture("{}\n");
        let broken = dir.path().join("src/components/demo/card");
        fs::create_dir_all(&broken).unwrap();
        fs::write(broken.join("card.ts"), "export const nothing = 1;").unwrap();

        let bundler = CountingBundler::new(false);
        let printer = Printer::with_color(false);
        let queue = RebuildQueue::new(
            Pipeline::new(&project, &bundler, printer),
            Mode::Development,
            printer,
        );

        assert!(queue.handle(&[FileChange::Created(broken.join("card.ts"))]).is_none());
        assert_eq!(bundler.calls.get(), 0);
    }

    #[test]
    fn test_failure_notice_separates_source_errors() {
        let (verb, message) = failure_notice(&ElementError::UnresolvedNamespace {
            namespace: "acme".to_string(),
        });
        assert_eq!(verb, "Blocked");
        assert_eq!(
            message,
            "Unable to find namespace folder \"acme\". Save a fix to rebuild."
        );

        let (verb, message) = failure_notice(&ElementError::Bundler {
            message: "exit status 1".to_string(),
            help: None,
        });
        assert_eq!(verb, "Rebuild");
        assert_eq!(message, "failed: Bundler error: exit status 1");
    }

    #[test]
    fn test_handle_reapplies_copy_rules() {
        let (dir, project) = fixture("copy:\n  - from: assets\n    to: static\n");
        let asset = dir.path().join("src/assets/logo.svg");
        fs::create_dir_all(asset.parent().unwrap()).unwrap();
        fs::write(&asset, "<svg/>").unwrap();

        let bundler = CountingBundler::new(false);
        let printer = Printer::with_color(false);
        let queue = RebuildQueue::new(
            Pipeline::new(&project, &bundler, printer),
            Mode::Development,
            printer,
        );
        queue.handle(&[FileChange::Created(asset)]);

        assert!(dir.path().join("dist/static/logo.svg").is_file());
    }

    #[test]
    fn test_app_mode_does_not_publish() {
        let (dir, project) = fixture("namespace: demo\n");
        let bundler = CountingBundler::new(false);
        let printer = Printer::with_color(false);
        let queue = RebuildQueue::new(
            Pipeline::new(&project, &bundler, printer),
            Mode::Development,
            printer,
        );
        let source = dir.path().join("src/components/demo/button/button.ts");

        queue.handle(&[FileChange::Modified(source)]);

        assert!(!dir.path().join("publish").exists());
    }
}
