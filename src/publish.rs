//! Mirror component sources into `publish/`.
//!
//! `publish/` holds `src/components/**` with the `src/components` prefix
//! stripped, ready to ship as an npm package of namespaces.

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::fsutil::{copy_file, copy_tree, folder_exists, remove_file_if_exists};
use crate::project::Layout;

/// Copy every file under `src/components` into `publish/`.
pub fn mirror_components(layout: &Layout) -> Result<usize> {
    let components = layout.components_dir();
    if !folder_exists(&components) {
        return Ok(0);
    }
    copy_tree(&components, &layout.publish_dir())
}

/// Where a file under `src/components` is mirrored, or `None` for paths that
/// are not inside a component folder (`<ns>/<component>/...`).
pub fn mirror_target(layout: &Layout, path: &Path) -> Option<PathBuf> {
    let relative = path.strip_prefix(layout.components_dir()).ok()?;
    if relative.components().count() < 3 {
        return None;
    }
    Some(layout.publish_dir().join(relative))
}

/// Mirror one changed file. A removed source removes its mirror.
///
/// Returns the mirror path when something was copied or deleted.
pub fn mirror_file(layout: &Layout, path: &Path) -> Result<Option<PathBuf>> {
    let Some(target) = mirror_target(layout, path) else {
        return Ok(None);
    };

    if path.is_file() {
        copy_file(path, &target)?;
        Ok(Some(target))
    } else if path.exists() {
        Ok(None)
    } else if remove_file_if_exists(&target)? {
        Ok(Some(target))
    } else {
        Ok(None)
    }
}
