//! element - Web component library build tool
//!
//! Discovers components laid out as
//! `src/components/<namespace>/<component>/__examples__/<example>`, writes the
//! playground page that lists them, rewrites HTML templates into modules that
//! import the custom elements they use, and drives esbuild to bundle either
//! the playground or a single app.

pub mod bundler;
pub mod cli;
pub mod config;
pub mod dev;
pub mod discovery;
pub mod error;
pub mod fsutil;
pub mod logger;
pub mod names;
pub mod navigation;
pub mod output;
pub mod pipeline;
pub mod playground;
pub mod project;
pub mod publish;
pub mod rewrite;

pub use bundler::{BundlePlan, BundleReport, Bundler, EntryPoint, EsbuildBundler, LoadHook, LoadedModule, Loader};
pub use config::{CopyRule, ProjectConfig, CONFIG_FILENAME};
pub use discovery::{scan, ComponentExample, ComponentMeta, NamespaceMeta, ScanResult};
pub use error::{ElementError, Result};
pub use navigation::{bucket, NavItem, Navigation, NavigationGroup, PopulatedGroup};
pub use pipeline::{BuildOutcome, Pipeline};
pub use playground::{synthesize, ComponentMap, Mode, PlaygroundOptions};
pub use project::{Layout, Project};
pub use rewrite::{HtmlDependencyRewriter, NamespaceResolver};
