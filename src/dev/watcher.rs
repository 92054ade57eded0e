//! Filesystem watcher for `src/`.

use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};

use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};

use crate::error::{ElementError, Result};

/// One filesystem change under the watched root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileChange {
    Created(PathBuf),
    Modified(PathBuf),
    Removed(PathBuf),
}

impl FileChange {
    pub fn path(&self) -> &Path {
        match self {
            FileChange::Created(p) | FileChange::Modified(p) | FileChange::Removed(p) => p,
        }
    }

    /// Created or modified, i.e. the path still has content to copy.
    pub fn is_upsert(&self) -> bool {
        !matches!(self, FileChange::Removed(_))
    }

    fn from_event(kind: &EventKind, path: PathBuf) -> Option<Self> {
        match kind {
            EventKind::Create(_) => Some(FileChange::Created(path)),
            EventKind::Modify(_) => Some(FileChange::Modified(path)),
            EventKind::Remove(_) => Some(FileChange::Removed(path)),
            _ => None,
        }
    }
}

/// Recursive watcher; changes arrive on the receiver returned by [`new`].
///
/// Dropping the watcher closes the channel.
///
/// [`new`]: SourceWatcher::new
pub struct SourceWatcher {
    _watcher: RecommendedWatcher,
    root: PathBuf,
}

impl SourceWatcher {
    pub fn new(root: PathBuf) -> Result<(Self, Receiver<FileChange>)> {
        if !root.is_dir() {
            return Err(ElementError::Io {
                path: root,
                message: "Cannot watch a missing directory".to_string(),
            });
        }

        let (tx, rx) = mpsc::channel();
        let watched = root.clone();

        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
            let event = match res {
                Ok(event) => event,
                Err(e) => {
                    tracing::warn!("watch error: {}", e);
                    return;
                }
            };
            for path in event.paths {
                if is_ignored(&path, &watched) {
                    continue;
                }
                if let Some(change) = FileChange::from_event(&event.kind, path) {
                    // Receiver gone means the dev loop is shutting down.
                    let _ = tx.send(change);
                }
            }
        })?;

        watcher.watch(&root, RecursiveMode::Recursive)?;
        tracing::debug!("watching {}", root.display());

        Ok((
            Self {
                _watcher: watcher,
                root,
            },
            rx,
        ))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// Editor swap files and other dotfiles never trigger a rebuild.
fn is_ignored(path: &Path, root: &Path) -> bool {
    let Ok(relative) = path.strip_prefix(root) else {
        return true;
    };
    relative.components().any(|c| {
        c.as_os_str()
            .to_str()
            .is_some_and(|name| name.starts_with('.') || name.ends_with('~'))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{CreateKind, ModifyKind, RemoveKind};

    #[test]
    fn test_from_event() {
        let path = PathBuf::from("/p/src/a.ts");

        assert_eq!(
            FileChange::from_event(&EventKind::Create(CreateKind::File), path.clone()),
            Some(FileChange::Created(path.clone()))
        );
        assert_eq!(
            FileChange::from_event(&EventKind::Modify(ModifyKind::Any), path.clone()),
            Some(FileChange::Modified(path.clone()))
        );
        assert_eq!(
            FileChange::from_event(&EventKind::Remove(RemoveKind::File), path.clone()),
            Some(FileChange::Removed(path.clone()))
        );
        assert_eq!(FileChange::from_event(&EventKind::Any, path), None);
    }

    #[test]
    fn test_is_ignored() {
        let root = Path::new("/p/src");

        assert!(!is_ignored(Path::new("/p/src/components/demo/a.ts"), root));
        assert!(is_ignored(Path::new("/p/src/components/.a.ts.swp"), root));
        assert!(is_ignored(Path::new("/p/src/a.ts~"), root));
        assert!(is_ignored(Path::new("/p/dist/main.js"), root));
    }

    #[test]
    fn test_missing_root() {
        assert!(SourceWatcher::new(PathBuf::from("/nonexistent/src")).is_err());
    }
}
