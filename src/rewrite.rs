//! HTML dependency rewriting.
//!
//! Component templates are plain `.html` files imported as strings. Before
//! the bundler sees one, every custom element it closes (`</ns-my-widget>`)
//! is turned into a side-effect import of that element's module, and the
//! original text becomes the module's default export.

use std::path::{Component, Path, PathBuf};
use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;

use crate::bundler::{LoadHook, LoadedModule, Loader};
use crate::error::{ElementError, Result};
use crate::fsutil::child_directories;
use crate::names::camel_case;
use crate::project::{Project, NODE_MODULES_DIR};

static CLOSING_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"</(\w+)-([^>]+)").expect("valid closing tag pattern"));

/// Where a namespace referenced from a template lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamespaceOrigin<'a> {
    Local,
    /// Published in the named npm package.
    External(&'a str),
}

/// Known namespaces: local folders plus those shipped by external packages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamespaceResolver {
    local: Vec<String>,
    external: IndexMap<String, String>,
}

impl NamespaceResolver {
    pub fn new(local: Vec<String>, external: IndexMap<String, String>) -> Self {
        Self { local, external }
    }

    /// Read local namespaces from `src/components` and external ones from
    /// each configured package folder under `node_modules`.
    pub fn discover(project: &Project) -> Self {
        let local = child_directories(&project.layout.components_dir());
        let mut external = IndexMap::new();
        for package in &project.config.external {
            for namespace in child_directories(&project.layout.package_dir(package)) {
                if namespace == NODE_MODULES_DIR {
                    continue;
                }
                external.insert(namespace, package.clone());
            }
        }
        tracing::debug!(
            "namespaces: local {:?}, external {:?}",
            local,
            external.keys().collect::<Vec<_>>()
        );
        Self { local, external }
    }

    pub fn resolve(&self, namespace: &str) -> Option<NamespaceOrigin<'_>> {
        if self.local.iter().any(|n| n == namespace) {
            Some(NamespaceOrigin::Local)
        } else {
            self.external
                .get(namespace)
                .map(|package| NamespaceOrigin::External(package))
        }
    }

    pub fn local(&self) -> &[String] {
        &self.local
    }
}

/// A component element referenced by a template.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ElementRef {
    pub namespace: String,
    pub component: String,
}

/// Unique `(namespace, component)` pairs closed in `html`, first use first.
pub fn referenced_elements(html: &str) -> Vec<ElementRef> {
    let mut found: IndexMap<String, ElementRef> = IndexMap::new();
    for caps in CLOSING_TAG.captures_iter(html) {
        let namespace = caps[1].to_string();
        let component = camel_case(caps[2].trim());
        found
            .entry(format!("{}-{}", namespace, component))
            .or_insert(ElementRef {
                namespace,
                component,
            });
    }
    found.into_values().collect()
}

/// The `.html` load hook.
#[derive(Debug, Clone)]
pub struct HtmlDependencyRewriter {
    components_dir: PathBuf,
    resolver: NamespaceResolver,
}

impl HtmlDependencyRewriter {
    pub fn new(components_dir: impl Into<PathBuf>, resolver: NamespaceResolver) -> Self {
        Self {
            components_dir: components_dir.into(),
            resolver,
        }
    }

    pub fn for_project(project: &Project) -> Self {
        Self::new(
            project.layout.components_dir(),
            NamespaceResolver::discover(project),
        )
    }

    /// Module source for the template at `path` with contents `html`.
    ///
    /// A namespace that is neither local nor external is fatal.
    pub fn rewrite(&self, path: &Path, html: &str) -> Result<String> {
        let mut lines = Vec::new();

        match self.position(path) {
            Some(position) => {
                for element in referenced_elements(html) {
                    if let Some(line) = self.import_for(&position, &element)? {
                        lines.push(line);
                    }
                }
            }
            None => {
                tracing::warn!(
                    "{} is outside {}; element imports not generated",
                    path.display(),
                    self.components_dir.display()
                );
            }
        }

        lines.push(format!("export default `{}`;", escape_template_literal(html)));
        Ok(lines.join("\n"))
    }

    fn position(&self, path: &Path) -> Option<FilePosition> {
        let relative = path.strip_prefix(&self.components_dir).ok()?;
        let parts: Vec<String> = relative
            .components()
            .filter_map(|c| match c {
                Component::Normal(part) => part.to_str().map(str::to_string),
                _ => None,
            })
            .collect();
        if parts.len() < 3 {
            return None;
        }
        Some(FilePosition {
            namespace: parts[0].clone(),
            component: parts[1].clone(),
            depth: parts.len() - 2,
        })
    }

    fn import_for(&self, position: &FilePosition, element: &ElementRef) -> Result<Option<String>> {
        let ElementRef {
            namespace,
            component,
        } = element;

        if *namespace == position.namespace {
            if *component == position.component {
                return Ok(None);
            }
            return Ok(Some(format!(
                "import './{}/{c}/{c}';",
                up(position.depth),
                c = component
            )));
        }

        match self.resolver.resolve(namespace) {
            Some(NamespaceOrigin::Local) => Ok(Some(format!(
                "import './{}/{ns}/{c}/{c}';",
                up(position.depth + 1),
                ns = namespace,
                c = component
            ))),
            Some(NamespaceOrigin::External(package)) => Ok(Some(format!(
                "import '{}/{}/{}';",
                package, namespace, component
            ))),
            None => Err(ElementError::UnresolvedNamespace {
                namespace: namespace.clone(),
            }),
        }
    }
}

impl LoadHook for HtmlDependencyRewriter {
    fn name(&self) -> &str {
        "html-dependents"
    }

    fn matches(&self, path: &Path) -> bool {
        path.extension().is_some_and(|ext| ext == "html")
    }

    fn load(&self, path: &Path, text: &str) -> Result<LoadedModule> {
        Ok(LoadedModule {
            contents: self.rewrite(path, text)?,
            loader: Loader::Js,
        })
    }
}

/// Where a template sits relative to the components root.
struct FilePosition {
    namespace: String,
    component: String,
    /// Directories between the namespace folder and the file.
    depth: usize,
}

fn up(depth: usize) -> String {
    vec![".."; depth].join("/")
}

/// Escape text so that a backtick literal evaluates to exactly `text`.
pub fn escape_template_literal(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('`', "\\`")
        .replace("${", "\\${")
}
