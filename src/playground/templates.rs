//! Template selection: a project override under `src/`, else the bundled
//! defaults embedded in the binary.

use std::fs;

use rust_embed::RustEmbed;

use crate::error::{ElementError, Result};
use crate::fsutil::file_exists;
use crate::project::{Layout, FAVICON_FILE, INDEX_FILE};

/// Bundled playground page.
pub const PLAYGROUND_TEMPLATE: &str = "playground.html";

#[derive(RustEmbed)]
#[folder = "default/"]
struct DefaultAssets;

/// A bundled default asset by file name.
pub fn default_asset(name: &str) -> Result<Vec<u8>> {
    DefaultAssets::get(name)
        .map(|file| file.data.into_owned())
        .ok_or_else(|| ElementError::Build {
            message: format!("Missing bundled default {}", name),
            help: None,
        })
}

fn default_text(name: &str) -> Result<String> {
    String::from_utf8(default_asset(name)?).map_err(|e| ElementError::Build {
        message: format!("Bundled default {} is not UTF-8: {}", name, e),
        help: None,
    })
}

fn read_override(layout: &Layout, name: &str) -> Result<Option<String>> {
    let path = layout.src_dir().join(name);
    if !file_exists(&path) {
        return Ok(None);
    }
    fs::read_to_string(&path)
        .map(Some)
        .map_err(|e| ElementError::Io {
            path,
            message: format!("Failed to read template: {}", e),
        })
}

/// `src/index.html` if present, else the bundled playground page.
pub fn playground_template(layout: &Layout) -> Result<String> {
    match read_override(layout, INDEX_FILE)? {
        Some(html) => Ok(html),
        None => default_text(PLAYGROUND_TEMPLATE),
    }
}

/// Bundled single-app page (`<namespace-app>` host).
pub fn app_template() -> Result<String> {
    default_text(INDEX_FILE)
}

/// `src/favicon.svg` if present, else the bundled icon.
pub fn favicon(layout: &Layout) -> Result<Vec<u8>> {
    let path = layout.src_dir().join(FAVICON_FILE);
    if file_exists(&path) {
        return fs::read(&path).map_err(|e| ElementError::Io {
            path,
            message: format!("Failed to read favicon: {}", e),
        });
    }
    default_asset(FAVICON_FILE)
}
