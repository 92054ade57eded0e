//! Navigation bucketing for the playground side bar.
//!
//! Every discovered component, and each of its examples, is placed in exactly
//! one navigation group:
//!
//! 1. a group whose `include` names the class wins outright, whatever its
//!    other filters say;
//! 2. otherwise the first declared non-default group whose `exclude`,
//!    `namespaces` and `extends` filters all admit it;
//! 3. otherwise the default group.
//!
//! The declared groups are never modified; [`bucket`] returns new groups.

use serde::{Deserialize, Serialize};

use crate::discovery::NamespaceMeta;

/// Label of the group synthesized when no groups are declared.
pub const DEFAULT_LABEL: &str = "Components";
/// Label of the catch-all appended when no declared group is a default.
pub const FALLBACK_LABEL: &str = "Other";

/// A declared navigation group, as written in the config.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NavigationGroup {
    pub label: String,
    /// Class names forced into this group.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include: Option<Vec<String>>,
    /// Class names this group refuses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude: Option<Vec<String>>,
    /// Only components from these namespaces.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespaces: Option<Vec<String>>,
    /// Only components extending one of these base classes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extends: Option<Vec<String>>,
    /// Marks the group as filtered; it can then never be the default group.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub components: Option<Vec<String>>,
}

impl NavigationGroup {
    pub fn labelled(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Default::default()
        }
    }

    /// A default group has none of `extends`, `components`, `namespaces`.
    pub fn is_default_candidate(&self) -> bool {
        self.extends.is_none() && self.components.is_none() && self.namespaces.is_none()
    }

    fn includes(&self, class_name: &str) -> bool {
        contains(&self.include, class_name)
    }

    fn admits(&self, unit: &NavUnit<'_>) -> bool {
        if contains(&self.exclude, unit.class_name) {
            return false;
        }
        if let Some(namespaces) = &self.namespaces {
            if !namespaces.iter().any(|n| n == unit.namespace) {
                return false;
            }
        }
        if let Some(extends) = &self.extends {
            match unit.class_extends {
                Some(base) if extends.iter().any(|e| e == base) => {}
                _ => return false,
            }
        }
        true
    }
}

fn contains(list: &Option<Vec<String>>, value: &str) -> bool {
    list.as_ref().is_some_and(|l| l.iter().any(|v| v == value))
}

/// Navigation entry pointing back at a component or example.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NavItem {
    pub namespace: String,
    pub component: String,
    pub class_name: String,
    pub tag: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
}

impl NavItem {
    /// Link text: the example name for examples, the component otherwise.
    pub fn label(&self) -> &str {
        self.example.as_deref().unwrap_or(&self.component)
    }
}

/// A navigation group with its bucketed items.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PopulatedGroup {
    #[serde(flatten)]
    pub group: NavigationGroup,
    pub items: Vec<NavItem>,
}

impl PopulatedGroup {
    fn new(group: NavigationGroup) -> Self {
        Self {
            group,
            items: Vec::new(),
        }
    }

    pub fn label(&self) -> &str {
        &self.group.label
    }
}

/// Result of bucketing: groups in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub groups: Vec<PopulatedGroup>,
    default_index: usize,
}

impl Navigation {
    /// The group that catches everything no other group claims.
    pub fn default_group(&self) -> &PopulatedGroup {
        &self.groups[self.default_index]
    }

    /// Total number of placed items across all groups.
    pub fn item_count(&self) -> usize {
        self.groups.iter().map(|g| g.items.len()).sum()
    }

    /// Label of the group holding `class_name`, if any.
    pub fn group_of(&self, class_name: &str) -> Option<&str> {
        self.groups
            .iter()
            .find(|g| g.items.iter().any(|i| i.class_name == class_name))
            .map(PopulatedGroup::label)
    }
}

struct NavUnit<'a> {
    namespace: &'a str,
    class_name: &'a str,
    class_extends: Option<&'a str>,
}

/// Assign every component and example of `namespaces` to one group.
pub fn bucket(namespaces: &[NamespaceMeta], declared: &[NavigationGroup]) -> Navigation {
    let mut groups: Vec<PopulatedGroup> = declared.iter().cloned().map(PopulatedGroup::new).collect();

    let default_index = if groups.is_empty() {
        groups.push(PopulatedGroup::new(NavigationGroup::labelled(DEFAULT_LABEL)));
        0
    } else if let Some(index) = groups.iter().position(|g| g.group.is_default_candidate()) {
        index
    } else {
        groups.push(PopulatedGroup::new(NavigationGroup::labelled(FALLBACK_LABEL)));
        groups.len() - 1
    };

    for component in namespaces.iter().flat_map(|ns| ns.components.iter()) {
        let unit = NavUnit {
            namespace: &component.namespace,
            class_name: &component.class_name,
            class_extends: Some(&component.class_extends),
        };
        let item = NavItem {
            namespace: component.namespace.clone(),
            component: component.component.clone(),
            class_name: component.class_name.clone(),
            tag: component.tag.clone(),
            example: None,
        };
        place(&mut groups, default_index, &unit, item);

        for example in &component.examples {
            let unit = NavUnit {
                namespace: &example.namespace,
                class_name: &example.class_name,
                class_extends: None,
            };
            let item = NavItem {
                namespace: example.namespace.clone(),
                component: example.component.clone(),
                class_name: example.class_name.clone(),
                tag: example.tag.clone(),
                example: Some(example.example.clone()),
            };
            place(&mut groups, default_index, &unit, item);
        }
    }

    Navigation {
        groups,
        default_index,
    }
}

fn place(groups: &mut [PopulatedGroup], default_index: usize, unit: &NavUnit<'_>, item: NavItem) {
    let target = groups
        .iter()
        .position(|g| g.group.includes(unit.class_name))
        .or_else(|| {
            groups
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != default_index)
                .find(|(_, g)| g.group.admits(unit))
                .map(|(i, _)| i)
        })
        .unwrap_or(default_index);

    groups[target].items.push(item);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discovery::{ComponentExample, ComponentMeta};
    use pretty_assertions::assert_eq;

    fn component(namespace: &str, name: &str, class: &str, base: &str) -> ComponentMeta {
        ComponentMeta {
            namespace: namespace.to_string(),
            component: name.to_string(),
            tag: ComponentMeta::tag_for(namespace, name),
            examples: vec![],
            class_name: class.to_string(),
            class_extends: base.to_string(),
            readme: String::new(),
        }
    }

    fn tree() -> Vec<NamespaceMeta> {
        let mut ui = NamespaceMeta::new("ui");
        ui.components.push(component("ui", "button", "Button", "HTMLElement"));
        ui.components.push(component("ui", "textField", "TextField", "InputBase"));
        let mut layout = NamespaceMeta::new("layout");
        layout.components.push(component("layout", "grid", "Grid", "HTMLElement"));
        layout.components.push(component("layout", "spacer", "Spacer", "HTMLElement"));
        vec![ui, layout]
    }

    fn list(values: &[&str]) -> Option<Vec<String>> {
        Some(values.iter().map(|v| v.to_string()).collect())
    }

    fn labels_of(nav: &Navigation, label: &str) -> Vec<String> {
        nav.groups
            .iter()
            .find(|g| g.label() == label)
            .unwrap()
            .items
            .iter()
            .map(|i| i.class_name.clone())
            .collect()
    }

    #[test]
    fn test_no_groups_synthesizes_components() {
        let nav = bucket(&tree(), &[]);

        assert_eq!(nav.groups.len(), 1);
        assert_eq!(nav.default_group().label(), DEFAULT_LABEL);
        assert_eq!(nav.item_count(), 4);
    }

    #[test]
    fn test_fallback_group_appended_when_no_default() {
        let declared = vec![NavigationGroup {
            label: "Inputs".to_string(),
            extends: list(&["InputBase"]),
            ..Default::default()
        }];

        let nav = bucket(&tree(), &declared);

        let labels: Vec<_> = nav.groups.iter().map(PopulatedGroup::label).collect();
        assert_eq!(labels, vec!["Inputs", FALLBACK_LABEL]);
        assert_eq!(labels_of(&nav, "Inputs"), vec!["TextField"]);
        assert_eq!(labels_of(&nav, FALLBACK_LABEL), vec!["Button", "Grid", "Spacer"]);
    }

    #[test]
    fn test_declared_default_group_used() {
        let declared = vec![
            NavigationGroup::labelled("Misc"),
            NavigationGroup {
                label: "Layout".to_string(),
                namespaces: list(&["layout"]),
                exclude: list(&["Spacer"]),
                ..Default::default()
            },
        ];

        let nav = bucket(&tree(), &declared);

        assert_eq!(nav.groups.len(), 2);
        assert_eq!(nav.default_group().label(), "Misc");
        assert_eq!(labels_of(&nav, "Layout"), vec!["Grid"]);
        assert_eq!(labels_of(&nav, "Misc"), vec!["Button", "TextField", "Spacer"]);
    }

    #[test]
    fn test_include_overrides_everything() {
        let declared = vec![
            NavigationGroup {
                label: "Layout".to_string(),
                namespaces: list(&["layout"]),
                ..Default::default()
            },
            NavigationGroup {
                label: "Featured".to_string(),
                namespaces: list(&["nowhere"]),
                extends: list(&["Nothing"]),
                include: list(&["Grid"]),
                exclude: list(&["Grid"]),
                ..Default::default()
            },
        ];

        let nav = bucket(&tree(), &declared);

        assert_eq!(labels_of(&nav, "Featured"), vec!["Grid"]);
        assert_eq!(labels_of(&nav, "Layout"), vec!["Spacer"]);
    }

    #[test]
    fn test_first_matching_group_wins() {
        let declared = vec![
            NavigationGroup {
                label: "Elements".to_string(),
                extends: list(&["HTMLElement"]),
                ..Default::default()
            },
            NavigationGroup {
                label: "Layout".to_string(),
                namespaces: list(&["layout"]),
                ..Default::default()
            },
        ];

        let nav = bucket(&tree(), &declared);

        assert_eq!(labels_of(&nav, "Elements"), vec!["Button", "Grid", "Spacer"]);
        assert!(labels_of(&nav, "Layout").is_empty());
    }

    #[test]
    fn test_every_item_placed_exactly_once() {
        let mut namespaces = tree();
        namespaces[0].components[0]
            .examples
            .push(ComponentExample::new("ui", "button", "basic"));
        let declared = vec![
            NavigationGroup {
                label: "Inputs".to_string(),
                extends: list(&["InputBase"]),
                include: list(&["Spacer"]),
                ..Default::default()
            },
            NavigationGroup {
                label: "UI".to_string(),
                namespaces: list(&["ui"]),
                ..Default::default()
            },
        ];

        let nav = bucket(&namespaces, &declared);

        for class in ["Button", "TextField", "Grid", "Spacer", "XUiButtonBasic"] {
            let holders = nav
                .groups
                .iter()
                .filter(|g| g.items.iter().any(|i| i.class_name == class))
                .count();
            assert_eq!(holders, 1, "{class}");
        }
        assert_eq!(nav.item_count(), 5);
        assert_eq!(nav.group_of("XUiButtonBasic"), Some("UI"));
    }

    #[test]
    fn test_example_never_matches_extends_filter() {
        let mut namespaces = tree();
        namespaces[0].components[0]
            .examples
            .push(ComponentExample::new("ui", "button", "basic"));
        let declared = vec![NavigationGroup {
            label: "Elements".to_string(),
            extends: list(&["HTMLElement"]),
            ..Default::default()
        }];

        let nav = bucket(&namespaces, &declared);

        assert_eq!(nav.group_of("Button"), Some("Elements"));
        assert_eq!(nav.group_of("XUiButtonBasic"), Some(FALLBACK_LABEL));
        let example = &nav.default_group().items[0];
        assert_eq!(example.label(), "basic");
    }

    #[test]
    fn test_declared_groups_not_mutated_between_runs() {
        let declared = vec![NavigationGroup::labelled("All")];

        let first = bucket(&tree(), &declared);
        let second = bucket(&tree(), &declared);

        assert_eq!(first, second);
        assert_eq!(declared, vec![NavigationGroup::labelled("All")]);
    }

    #[test]
    fn test_serialized_group_shape() {
        let declared = vec![NavigationGroup {
            label: "Layout".to_string(),
            namespaces: list(&["layout"]),
            ..Default::default()
        }];
        let nav = bucket(&tree()[1..], &declared);

        let json = serde_json::to_value(&nav.groups[0]).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "label": "Layout",
                "namespaces": ["layout"],
                "items": [
                    {"namespace": "layout", "component": "grid", "className": "Grid", "tag": "layout-grid"},
                    {"namespace": "layout", "component": "spacer", "className": "Spacer", "tag": "layout-spacer"}
                ]
            })
        );
    }
}
