//! Seam to the external JavaScript bundler.
//!
//! The bundler is a black box: it is handed one entry point and a set of
//! load hooks, and emits a single ESM bundle. [`EsbuildBundler`] drives the
//! `esbuild` executable; tests substitute their own [`Bundler`].

mod esbuild;

pub use esbuild::{loaded_failure, DeferredFailure, EsbuildBundler, Staged};

use std::path::{Path, PathBuf};

use crate::error::Result;

/// How the bundler should treat a module's contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Loader {
    Js,
    Text,
}

impl Loader {
    pub fn as_str(self) -> &'static str {
        match self {
            Loader::Js => "js",
            Loader::Text => "text",
        }
    }
}

/// Output of a load hook for one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedModule {
    pub contents: String,
    pub loader: Loader,
}

/// Replaces the contents of matching files before the bundler parses them.
pub trait LoadHook: Send + Sync {
    fn name(&self) -> &str;

    fn matches(&self, path: &Path) -> bool;

    /// `path` is the file's location in the project's `src/` tree.
    fn load(&self, path: &Path, text: &str) -> Result<LoadedModule>;
}

/// Root of the module graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryPoint {
    /// A source file under `src/`.
    File(PathBuf),
    /// Generated module resolved as if it were `src/<name>.js`.
    Virtual { name: String, contents: String },
}

/// One bundling request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundlePlan {
    pub entry: EntryPoint,
    pub outfile: PathBuf,
    pub minify: bool,
    pub sourcemap: bool,
    /// Loader per extension (without dot), e.g. stylesheets as text.
    pub loaders: Vec<(String, Loader)>,
}

impl BundlePlan {
    /// Dev bundle: readable output with a source map.
    pub fn development(entry: EntryPoint, outfile: PathBuf) -> Self {
        Self {
            entry,
            outfile,
            minify: false,
            sourcemap: true,
            loaders: vec![("css".to_string(), Loader::Text)],
        }
    }

    /// Production bundle: minified, no source map.
    pub fn production(entry: EntryPoint, outfile: PathBuf) -> Self {
        Self {
            minify: true,
            sourcemap: false,
            ..Self::development(entry, outfile)
        }
    }
}

/// What a bundle run produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BundleReport {
    pub outfile: PathBuf,
    /// Files whose contents came from a load hook.
    pub hooked_files: usize,
    /// Bundler diagnostics that did not fail the build.
    pub warnings: Vec<String>,
}

/// An external bundler.
pub trait Bundler {
    fn bundle(&self, plan: &BundlePlan, hooks: &[&dyn LoadHook]) -> Result<BundleReport>;
}
