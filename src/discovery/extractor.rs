//! Best-effort detection of a component's class and base class.

use std::sync::LazyLock;

use regex::Regex;

static CLASS_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"class (\w+) extends (\w+)").expect("valid class pattern"));

/// A `class <name> extends <extends>` declaration found in source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassDeclaration {
    pub name: String,
    pub extends: String,
}

/// Finds the declared class of a component from its source text.
///
/// The scanner only needs a name and a base; implementations may be as
/// naive or as syntax-aware as they like.
pub trait ClassDeclarationExtractor {
    fn extract(&self, source: &str) -> Option<ClassDeclaration>;
}

/// Text pattern extractor: the first `class X extends Y` in the file wins,
/// whether or not it is the exported class.
#[derive(Debug, Clone, Copy, Default)]
pub struct PatternExtractor;

impl ClassDeclarationExtractor for PatternExtractor {
    fn extract(&self, source: &str) -> Option<ClassDeclaration> {
        let caps = CLASS_PATTERN.captures(source)?;
        Some(ClassDeclaration {
            name: caps[1].to_string(),
            extends: caps[2].to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_class_and_base() {
        let source = r#"
import template from './button.html';

export default class Button extends HTMLElement {
  connectedCallback() {}
}
"#;
        let decl = PatternExtractor.extract(source).unwrap();
        assert_eq!(decl.name, "Button");
        assert_eq!(decl.extends, "HTMLElement");
    }

    #[test]
    fn test_first_declaration_wins() {
        let source = "class Helper extends Base {}\nexport default class Card extends HTMLElement {}";
        let decl = PatternExtractor.extract(source).unwrap();
        assert_eq!(decl.name, "Helper");
        assert_eq!(decl.extends, "Base");
    }

    #[test]
    fn test_no_declaration() {
        assert_eq!(PatternExtractor.extract("export const x = 1;"), None);
        assert_eq!(PatternExtractor.extract("class Lonely {}"), None);
    }
}
