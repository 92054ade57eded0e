//! Client-side lookup table of every discovered class.

use indexmap::map::Entry;
use indexmap::IndexMap;
use serde::Serialize;

use crate::discovery::NamespaceMeta;
use crate::error::{ElementError, Result};

/// One record of the page's `componentMap`, keyed by class name.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ComponentMapEntry {
    pub class_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_extends: Option<String>,
    pub component: String,
    pub namespace: String,
    pub tag: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub readme: Option<String>,
    /// Class names of the component's examples.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub examples: Option<Vec<String>>,
    /// Example folder name, for example entries.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
}

/// Insertion-ordered class name → entry map.
#[derive(Debug, Clone, Default)]
pub struct ComponentMap {
    entries: IndexMap<String, ComponentMapEntry>,
}

impl ComponentMap {
    /// Flatten the tree: each component followed by its examples.
    ///
    /// Two units deriving the same class name is an error.
    pub fn build(namespaces: &[NamespaceMeta]) -> Result<Self> {
        let mut map = Self::default();

        for component in namespaces.iter().flat_map(|ns| ns.components.iter()) {
            map.insert(ComponentMapEntry {
                class_name: component.class_name.clone(),
                class_extends: Some(component.class_extends.clone()),
                component: component.component.clone(),
                namespace: component.namespace.clone(),
                tag: component.tag.clone(),
                readme: Some(component.readme.clone()),
                examples: Some(
                    component
                        .examples
                        .iter()
                        .map(|e| e.class_name.clone())
                        .collect(),
                ),
                example: None,
            })?;

            for example in &component.examples {
                map.insert(ComponentMapEntry {
                    class_name: example.class_name.clone(),
                    class_extends: None,
                    component: example.component.clone(),
                    namespace: example.namespace.clone(),
                    tag: example.tag.clone(),
                    readme: None,
                    examples: None,
                    example: Some(example.example.clone()),
                })?;
            }
        }

        Ok(map)
    }

    fn insert(&mut self, entry: ComponentMapEntry) -> Result<()> {
        match self.entries.entry(entry.class_name.clone()) {
            Entry::Occupied(existing) => Err(ElementError::DuplicateClassName {
                class_name: entry.class_name,
                first: existing.get().tag.clone(),
                second: entry.tag,
            }),
            Entry::Vacant(slot) => {
                slot.insert(entry);
                Ok(())
            }
        }
    }

    pub fn get(&self, class_name: &str) -> Option<&ComponentMapEntry> {
        self.entries.get(class_name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ComponentMapEntry)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// `componentMap.set('<class>', <json>);` statements, in insertion order.
    pub fn set_statements(&self) -> Result<Vec<String>> {
        self.iter()
            .map(|(class_name, entry)| {
                Ok(format!(
                    "componentMap.set('{}', {});",
                    class_name,
                    script_json(entry, false)?
                ))
            })
            .collect()
    }
}

/// Serialize for embedding inside a `<script>` element.
///
/// `</` is escaped so README text can never close the script early.
pub(crate) fn script_json<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
    .map_err(|e| ElementError::Build {
        message: format!("Failed to serialize playground data: {}", e),
        help: None,
    })?;
    Ok(json.replace("</", "<\\/"))
}
