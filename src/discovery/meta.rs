//! Metadata tree produced by a component scan.

use serde::Serialize;

use crate::names::{capitalize_first, dash_case};

/// A runnable usage demo under `<component>/__examples__/<example>/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentExample {
    pub namespace: String,
    pub component: String,
    pub example: String,
    /// `x-<namespace>-<component>-<example>`, dash-cased.
    pub tag: String,
    /// `X<Namespace><Component><Example>`.
    pub class_name: String,
}

impl ComponentExample {
    pub fn new(namespace: &str, component: &str, example: &str) -> Self {
        Self {
            namespace: namespace.to_string(),
            component: component.to_string(),
            example: example.to_string(),
            tag: format!(
                "x-{}-{}-{}",
                namespace,
                dash_case(component),
                dash_case(example)
            ),
            class_name: format!(
                "X{}{}{}",
                capitalize_first(namespace),
                capitalize_first(component),
                capitalize_first(example)
            ),
        }
    }
}

/// One discovered component folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentMeta {
    pub namespace: String,
    pub component: String,
    /// `<namespace>-<component>`, dash-cased.
    pub tag: String,
    pub examples: Vec<ComponentExample>,
    pub class_name: String,
    pub class_extends: String,
    /// Raw README.md text, empty when the component has none.
    pub readme: String,
}

impl ComponentMeta {
    /// Custom element tag for a component folder.
    pub fn tag_for(namespace: &str, component: &str) -> String {
        format!("{}-{}", namespace, dash_case(component))
    }
}

/// One top-level folder under `src/components`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NamespaceMeta {
    pub namespace: String,
    pub components: Vec<ComponentMeta>,
}

impl NamespaceMeta {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            components: Vec::new(),
        }
    }
}

/// A bundler entry point recorded during the scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryImport {
    pub namespace: String,
    pub component: String,
    pub example: Option<String>,
}

impl EntryImport {
    /// Module specifier relative to `src/`, without extension.
    pub fn specifier(&self) -> String {
        match &self.example {
            None => format!(
                "./components/{ns}/{c}/{c}",
                ns = self.namespace,
                c = self.component
            ),
            Some(example) => format!(
                "./components/{ns}/{c}/__examples__/{e}/{e}",
                ns = self.namespace,
                c = self.component,
                e = example
            ),
        }
    }

    pub fn statement(&self) -> String {
        format!("import '{}';", self.specifier())
    }
}
