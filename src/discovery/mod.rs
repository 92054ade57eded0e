//! Component discovery for element projects.
//!
//! Scans `src/components` into a tree of namespaces, components and
//! examples, and records the bundler entry points for the playground.
//!
//! # Example
//!
//! ```ignore
//! use element::discovery::scan;
//!
//! let project = element::Project::load(".")?;
//! let result = scan(&project)?;
//! println!("Found {} components", result.component_count());
//! ```

mod extractor;
mod meta;
mod scanner;

pub use extractor::{ClassDeclaration, ClassDeclarationExtractor, PatternExtractor};
pub use meta::{ComponentExample, ComponentMeta, EntryImport, NamespaceMeta};
pub use scanner::{scan_components, ScanResult};

use crate::error::Result;
use crate::project::Project;

/// Scan a project with the default class pattern extractor.
pub fn scan(project: &Project) -> Result<ScanResult> {
    scan_components(project, &PatternExtractor)
}
