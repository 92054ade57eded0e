//! Project layout and the per-invocation project context.
//!
//! [`Project`] is built once at startup from the working directory and the
//! loaded config, then passed by reference to the scanner, synthesizer,
//! rewriter and bundler.

use std::path::{Path, PathBuf};

use crate::config::ProjectConfig;
use crate::error::Result;

pub const SRC_DIR: &str = "src";
pub const COMPONENTS_DIR: &str = "components";
pub const EXAMPLES_DIR: &str = "__examples__";
pub const README_FILE: &str = "README.md";
pub const DIST_DIR: &str = "dist";
pub const BUILD_DIR: &str = "build";
pub const PUBLISH_DIR: &str = "publish";
pub const NODE_MODULES_DIR: &str = "node_modules";
pub const STAGE_DIR: &str = ".element";
pub const INDEX_FILE: &str = "index.html";
pub const FAVICON_FILE: &str = "favicon.svg";

/// Directory layout of an element project, rooted at `root`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    root: PathBuf,
}

impl Layout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn src_dir(&self) -> PathBuf {
        self.root.join(SRC_DIR)
    }

    /// `<root>/src/components`
    pub fn components_dir(&self) -> PathBuf {
        self.src_dir().join(COMPONENTS_DIR)
    }

    pub fn dist_dir(&self) -> PathBuf {
        self.root.join(DIST_DIR)
    }

    pub fn build_dir(&self) -> PathBuf {
        self.root.join(BUILD_DIR)
    }

    pub fn publish_dir(&self) -> PathBuf {
        self.root.join(PUBLISH_DIR)
    }

    pub fn node_modules_dir(&self) -> PathBuf {
        self.root.join(NODE_MODULES_DIR)
    }

    /// Scratch directory the bundler stages rewritten sources into.
    pub fn stage_dir(&self) -> PathBuf {
        self.root.join(STAGE_DIR)
    }

    /// Folder of one installed npm package; scoped names (`@acme/ui`) nest.
    pub fn package_dir(&self, package: &str) -> PathBuf {
        package
            .split('/')
            .fold(self.node_modules_dir(), |dir, part| dir.join(part))
    }
}

/// Everything one CLI invocation knows about the project.
#[derive(Debug, Clone)]
pub struct Project {
    pub layout: Layout,
    pub config: ProjectConfig,
}

impl Project {
    pub fn new(layout: Layout, config: ProjectConfig) -> Self {
        Self { layout, config }
    }

    /// Load the config from `root`; fails if element.config.yaml is missing.
    pub fn load(root: impl Into<PathBuf>) -> Result<Self> {
        let layout = Layout::new(root);
        let config = ProjectConfig::find(layout.root())?;
        Ok(Self::new(layout, config))
    }

    /// Component source file name for a folder name, e.g. `button.ts`.
    pub fn source_file(&self, name: &str) -> String {
        format!("{}.{}", name, self.config.extension)
    }
}
