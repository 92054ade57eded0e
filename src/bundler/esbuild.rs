//! `esbuild` backend.
//!
//! esbuild's CLI cannot run in-process plugins, so load hooks are applied
//! ahead of time: `src/` is mirrored into a staging directory with every
//! hooked file replaced by its hook output, the virtual entry is written as
//! a real file, and esbuild bundles the staged tree. The staging directory
//! sits inside the project so bare imports still reach `node_modules`.
//!
//! Staging sees every file, not only the ones the bundle imports. A hook
//! failure therefore stages a module that throws, and the failure is raised
//! only when esbuild's metafile shows the bundle read that file.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::Command;

use walkdir::WalkDir;

use crate::error::{ElementError, Result};
use crate::project::{Project, FAVICON_FILE, INDEX_FILE, SRC_DIR};

use super::{BundlePlan, BundleReport, Bundler, EntryPoint, LoadHook, Loader};

/// Target passed to esbuild.
pub const TARGET: &str = "es2024";

/// esbuild metafile, written inside the staging directory.
pub const METAFILE: &str = "meta.json";

/// Bundles by staging sources and invoking the esbuild executable.
#[derive(Debug, Clone)]
pub struct EsbuildBundler {
    src_dir: PathBuf,
    stage_dir: PathBuf,
    executable: PathBuf,
}

/// A staged source tree ready for esbuild.
#[derive(Debug)]
pub struct Staged {
    pub entry: PathBuf,
    pub hooked_files: usize,
    /// Loader per hooked extension, e.g. `html` → `js`.
    pub loaders: BTreeMap<String, Loader>,
    pub deferred: Vec<DeferredFailure>,
}

/// A hook error held back until the bundle is known to load the file.
#[derive(Debug)]
pub struct DeferredFailure {
    /// Path relative to `src/`.
    pub path: PathBuf,
    pub error: ElementError,
}

impl EsbuildBundler {
    pub fn new(src_dir: PathBuf, stage_dir: PathBuf, executable: PathBuf) -> Self {
        Self {
            src_dir,
            stage_dir,
            executable,
        }
    }

    /// Use the configured binary, else `node_modules/.bin/esbuild`, else PATH.
    pub fn for_project(project: &Project) -> Self {
        let local = project.layout.node_modules_dir().join(".bin").join("esbuild");
        let executable = match &project.config.esbuild {
            Some(path) => project.layout.root().join(path),
            None if local.is_file() => local,
            None => PathBuf::from("esbuild"),
        };
        Self::new(
            project.layout.src_dir(),
            project.layout.stage_dir(),
            executable,
        )
    }

    fn staged_src(&self) -> PathBuf {
        self.stage_dir.join(SRC_DIR)
    }

    fn metafile(&self) -> PathBuf {
        self.stage_dir.join(METAFILE)
    }

    /// Mirror `src/` into the staging directory, applying `hooks`.
    pub fn stage(&self, plan: &BundlePlan, hooks: &[&dyn LoadHook]) -> Result<Staged> {
        let staged_src = self.staged_src();
        if staged_src.exists() {
            fs::remove_dir_all(&staged_src).map_err(|e| io_error(&staged_src, "clear staging dir", e))?;
        }
        fs::create_dir_all(&staged_src).map_err(|e| io_error(&staged_src, "create staging dir", e))?;

        let mut hooked_files = 0;
        let mut loaders = BTreeMap::new();
        let mut deferred = Vec::new();

        for entry in WalkDir::new(&self.src_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            let Ok(relative) = path.strip_prefix(&self.src_dir) else {
                continue;
            };
            let target = staged_src.join(relative);

            if entry.file_type().is_dir() {
                fs::create_dir_all(&target).map_err(|e| io_error(&target, "create dir", e))?;
                continue;
            }

            // Page assets are copied to the output by the pipeline, never imported.
            let page_asset = relative == Path::new(INDEX_FILE) || relative == Path::new(FAVICON_FILE);
            let hook = hooks.iter().find(|h| !page_asset && h.matches(path));

            match hook {
                Some(hook) => {
                    let text = fs::read_to_string(path).map_err(|e| io_error(path, "read", e))?;
                    let (contents, loader) = match hook.load(path, &text) {
                        Ok(module) => {
                            tracing::debug!("{} hook rewrote {}", hook.name(), relative.display());
                            (module.contents, module.loader)
                        }
                        Err(error) => {
                            tracing::debug!("{} hook failed on {}: {}", hook.name(), relative.display(), error);
                            let contents = throwing_module(&error)?;
                            deferred.push(DeferredFailure {
                                path: relative.to_path_buf(),
                                error,
                            });
                            (contents, Loader::Js)
                        }
                    };
                    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
                        loaders.insert(ext.to_string(), loader);
                    }
                    fs::write(&target, contents).map_err(|e| io_error(&target, "write", e))?;
                    hooked_files += 1;
                }
                None => {
                    fs::copy(path, &target).map_err(|e| io_error(&target, "copy", e))?;
                }
            }
        }

        let entry = match &plan.entry {
            EntryPoint::File(path) => match path.strip_prefix(&self.src_dir) {
                Ok(relative) => staged_src.join(relative),
                Err(_) => path.clone(),
            },
            EntryPoint::Virtual { name, contents } => {
                let path = staged_src.join(format!("{}.js", name));
                fs::write(&path, contents).map_err(|e| io_error(&path, "write", e))?;
                path
            }
        };

        Ok(Staged {
            entry,
            hooked_files,
            loaders,
            deferred,
        })
    }

    /// esbuild arguments for a staged tree.
    pub fn args(&self, plan: &BundlePlan, staged: &Staged) -> Vec<String> {
        let mut args = vec![
            staged.entry.display().to_string(),
            "--bundle".to_string(),
            "--format=esm".to_string(),
            format!("--target={}", TARGET),
            format!("--outfile={}", plan.outfile.display()),
            "--log-level=warning".to_string(),
            format!("--metafile={}", self.metafile().display()),
        ];
        for (ext, loader) in &plan.loaders {
            args.push(format!("--loader:.{}={}", ext, loader.as_str()));
        }
        for (ext, loader) in &staged.loaders {
            args.push(format!("--loader:.{}={}", ext, loader.as_str()));
        }
        if plan.minify {
            args.push("--minify".to_string());
        }
        if plan.sourcemap {
            args.push("--sourcemap".to_string());
        }
        args
    }
}

impl Bundler for EsbuildBundler {
    fn bundle(&self, plan: &BundlePlan, hooks: &[&dyn LoadHook]) -> Result<BundleReport> {
        let staged = self.stage(plan, hooks)?;

        if let Some(parent) = plan.outfile.parent() {
            fs::create_dir_all(parent).map_err(|e| io_error(parent, "create output dir", e))?;
        }

        let args = self.args(plan, &staged);
        tracing::debug!("{} {}", self.executable.display(), args.join(" "));

        let output = Command::new(&self.executable)
            .args(&args)
            .output()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => ElementError::Bundler {
                    message: format!("{} not found", self.executable.display()),
                    help: Some(
                        "Install it with `npm install --save-dev esbuild`, or set `esbuild` in element.config.yaml"
                            .to_string(),
                    ),
                },
                _ => ElementError::Bundler {
                    message: format!("Failed to run {}: {}", self.executable.display(), e),
                    help: None,
                },
            })?;

        let stderr = String::from_utf8_lossy(&output.stderr);
        if !output.status.success() {
            return Err(ElementError::Bundler {
                message: format!("esbuild exited with {}", output.status),
                help: Some(stderr.trim().to_string()),
            });
        }

        if !staged.deferred.is_empty() {
            let metafile = self.metafile();
            let meta = fs::read_to_string(&metafile).map_err(|e| io_error(&metafile, "read", e))?;
            if let Some(error) = loaded_failure(&meta, staged.deferred)? {
                return Err(error);
            }
        }

        Ok(BundleReport {
            outfile: plan.outfile.clone(),
            hooked_files: staged.hooked_files,
            warnings: stderr
                .lines()
                .filter(|l| !l.trim().is_empty())
                .map(str::to_string)
                .collect(),
        })
    }
}

/// The first deferred failure whose file appears among the metafile inputs.
pub fn loaded_failure(metafile: &str, deferred: Vec<DeferredFailure>) -> Result<Option<ElementError>> {
    let meta: serde_json::Value = serde_json::from_str(metafile).map_err(|e| ElementError::Bundler {
        message: format!("Unreadable esbuild metafile: {}", e),
        help: None,
    })?;
    let inputs: Vec<&str> = meta
        .get("inputs")
        .and_then(|inputs| inputs.as_object())
        .map(|inputs| inputs.keys().map(String::as_str).collect())
        .unwrap_or_default();

    Ok(deferred
        .into_iter()
        .find(|failure| {
            let staged = Path::new(SRC_DIR).join(&failure.path);
            inputs.iter().any(|input| Path::new(input).ends_with(&staged))
        })
        .map(|failure| failure.error))
}

fn throwing_module(error: &ElementError) -> Result<String> {
    let message = serde_json::to_string(&error.to_string()).map_err(|e| ElementError::Bundler {
        message: format!("Failed to encode hook error: {}", e),
        help: None,
    })?;
    Ok(format!("throw new Error({});\n", message))
}

fn io_error(path: &Path, action: &str, e: std::io::Error) -> ElementError {
    ElementError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to {}: {}", action, e),
    }
}
