//! Component tree scanner.
//!
//! Walks `src/components/<namespace>/<component>[/__examples__/<example>]`
//! one level at a time. A folder only counts as a component or example when
//! it holds a source file named after itself.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ElementError, Result};
use crate::fsutil::{child_directories, file_exists, folder_exists};
use crate::project::{Project, EXAMPLES_DIR, README_FILE};

use super::extractor::ClassDeclarationExtractor;
use super::meta::{ComponentExample, ComponentMeta, EntryImport, NamespaceMeta};

/// Result of scanning the components tree.
#[derive(Debug, Clone, Default)]
pub struct ScanResult {
    /// Namespaces in directory order.
    pub namespaces: Vec<NamespaceMeta>,
    /// Bundler entry points: each component followed by its examples.
    pub entries: Vec<EntryImport>,
    /// Example source files that were expected but missing.
    pub missing_examples: Vec<PathBuf>,
}

impl ScanResult {
    pub fn component_count(&self) -> usize {
        self.namespaces.iter().map(|ns| ns.components.len()).sum()
    }

    pub fn example_count(&self) -> usize {
        self.components().map(|c| c.examples.len()).sum()
    }

    /// All components, namespaces in order.
    pub fn components(&self) -> impl Iterator<Item = &ComponentMeta> {
        self.namespaces.iter().flat_map(|ns| ns.components.iter())
    }

    /// Source of the virtual playground entry module.
    pub fn entry_module(&self) -> String {
        let mut module = String::new();
        for entry in &self.entries {
            module.push_str(&entry.statement());
            module.push('\n');
        }
        module
    }
}

/// Scan `src/components` of a project.
///
/// Fails if the components folder is missing, holds no namespace folders,
/// or a component's source has no detectable class declaration. Examples
/// without a source file are recorded in `missing_examples` and skipped.
pub fn scan_components<E>(project: &Project, extractor: &E) -> Result<ScanResult>
where
    E: ClassDeclarationExtractor + ?Sized,
{
    let root = project.layout.components_dir();
    if !folder_exists(&root) {
        return Err(ElementError::MissingComponentsDir);
    }

    let namespace_names = child_directories(&root);
    if namespace_names.is_empty() {
        return Err(ElementError::NoNamespaces);
    }

    let mut result = ScanResult::default();

    for namespace in &namespace_names {
        let namespace_dir = root.join(namespace);
        let mut meta = NamespaceMeta::new(namespace.as_str());

        for component in child_directories(&namespace_dir) {
            let component_dir = namespace_dir.join(&component);
            let source_path = component_dir.join(project.source_file(&component));
            if !file_exists(&source_path) {
                tracing::debug!("skipping {}: no {}", component_dir.display(), source_path.display());
                continue;
            }

            result.entries.push(EntryImport {
                namespace: namespace.clone(),
                component: component.clone(),
                example: None,
            });

            let examples = scan_examples(project, namespace, &component, &component_dir, &mut result);
            let source = read_text(&source_path)?;
            let decl = extractor.extract(&source).ok_or_else(|| {
                ElementError::MissingClassDeclaration {
                    component: format!("{}-{}", namespace, component),
                }
            })?;

            meta.components.push(ComponentMeta {
                namespace: namespace.clone(),
                tag: ComponentMeta::tag_for(namespace, &component),
                component,
                examples,
                class_name: decl.name,
                class_extends: decl.extends,
                readme: read_readme(&component_dir)?,
            });
        }

        result.namespaces.push(meta);
    }

    tracing::debug!(
        "scanned {} namespace(s), {} component(s)",
        result.namespaces.len(),
        result.component_count()
    );

    Ok(result)
}

fn scan_examples(
    project: &Project,
    namespace: &str,
    component: &str,
    component_dir: &Path,
    result: &mut ScanResult,
) -> Vec<ComponentExample> {
    let examples_dir = component_dir.join(EXAMPLES_DIR);
    if !folder_exists(&examples_dir) {
        return Vec::new();
    }

    let mut examples = Vec::new();
    for example in child_directories(&examples_dir) {
        let source_path = examples_dir.join(&example).join(project.source_file(&example));
        if !file_exists(&source_path) {
            tracing::debug!("example source missing: {}", source_path.display());
            result.missing_examples.push(source_path);
            continue;
        }

        result.entries.push(EntryImport {
            namespace: namespace.to_string(),
            component: component.to_string(),
            example: Some(example.clone()),
        });
        examples.push(ComponentExample::new(namespace, component, &example));
    }
    examples
}

fn read_readme(component_dir: &Path) -> Result<String> {
    let path = component_dir.join(README_FILE);
    if file_exists(&path) {
        read_text(&path)
    } else {
        Ok(String::new())
    }
}

fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| ElementError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to read file: {}", e),
    })
}
