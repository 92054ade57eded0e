//! Project config (`element.config.yaml`) parsing.
//!
//! The config selects the build mode (single app vs. playground), carries the
//! playground's title, repository link and navigation groups, and lists the
//! external packages and copy rules.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ElementError, Result};
use crate::navigation::NavigationGroup;

/// Name of the config file expected in the project root.
pub const CONFIG_FILENAME: &str = "element.config.yaml";

/// Project config loaded from element.config.yaml.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ProjectConfig {
    /// Fixed app namespace. When set, only `<namespace>/app/app.<ext>` is
    /// built; when unset the playground is built from every component.
    pub namespace: Option<String>,

    /// Page title and heading.
    pub title: Option<String>,

    /// Repository URL shown in the playground header.
    pub repo: Option<String>,

    /// Per-component source link template; `$repo` is replaced with `repo`.
    pub repo_component: Option<String>,

    /// Side navigation groups, in display order.
    pub navigation: Vec<NavigationGroup>,

    /// npm packages providing namespaces outside `src/components`.
    pub external: Vec<String>,

    /// Extra folders or files mirrored from `src/` into the output dir.
    pub copy: Vec<CopyRule>,

    /// Source file extension of components and examples.
    pub extension: String,

    /// Dev server port.
    pub port: u16,

    /// Path to the esbuild executable, if not in node_modules or PATH.
    pub esbuild: Option<PathBuf>,
}

/// One `{from, to}` copy rule, both relative to `src/` and the output dir.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CopyRule {
    pub from: String,
    pub to: String,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            namespace: None,
            title: None,
            repo: None,
            repo_component: None,
            navigation: vec![],
            external: vec![],
            copy: vec![],
            extension: "ts".to_string(),
            port: 8000,
            esbuild: None,
        }
    }
}

impl ProjectConfig {
    /// Load the config from `root/element.config.yaml`.
    ///
    /// A missing file is fatal and reports a starter config.
    pub fn find(root: &Path) -> Result<Self> {
        let path = root.join(CONFIG_FILENAME);
        if !path.is_file() {
            return Err(ElementError::missing_config(CONFIG_FILENAME));
        }
        Self::load(&path)
    }

    /// Load and validate a config file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ElementError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read config: {}", e),
        })?;

        Self::parse(&content)
    }

    /// Parse and validate config YAML.
    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(content).map_err(|e| ElementError::Config {
            message: format!("Invalid config: {}", e),
            help: Some(format!("Check {} syntax", CONFIG_FILENAME)),
        })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        for rule in &self.copy {
            if rule.from.ends_with('/') {
                return Err(ElementError::Config {
                    message: format!("\"copy\" \"from\" should not end with a \"/\": {}", rule.from),
                    help: Some("Ex: \"assets\" not \"assets/\".".to_string()),
                });
            }
            if rule.to.ends_with('/') {
                return Err(ElementError::Config {
                    message: format!("\"copy\" \"to\" should not end with a \"/\": {}", rule.to),
                    help: Some("Ex: \"assets\" not \"assets/\".".to_string()),
                });
            }
        }
        Ok(())
    }

    /// Title with the template's own default.
    pub fn effective_title(&self) -> &str {
        self.title.as_deref().unwrap_or("Default")
    }

    /// True when building the multi-component playground.
    pub fn is_playground(&self) -> bool {
        self.namespace.is_none()
    }
}
