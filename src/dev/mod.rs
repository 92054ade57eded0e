//! Development mode: watch `src/`, rebuild on change, serve `dist/`.

pub mod rebuild;
pub mod server;
pub mod watcher;

pub use rebuild::{coalesce, RebuildQueue};
pub use watcher::{FileChange, SourceWatcher};
