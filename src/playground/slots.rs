//! Named insertion points in an HTML template.
//!
//! Each slot is a literal marker the bundled templates carry verbatim. A
//! custom template may drop any marker; filling an absent slot leaves the
//! text unchanged.

/// An insertion point in a playground or app template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Title,
    Heading,
    Navigation,
    RepoLink,
    RepoUrl,
    RepoComponent,
    RepoIcon,
    DevInfo,
    ComponentMap,
    NavigationData,
    AppElement,
}

impl Slot {
    /// The text the slot replaces.
    pub fn marker(self) -> &'static str {
        match self {
            Slot::Title => "<title>Default</title>",
            Slot::Heading => "<h1>Default</h1>",
            Slot::Navigation => "<!-- [Navigation] -->",
            Slot::RepoLink => "<!-- [Repo] -->",
            Slot::RepoUrl => "const repo = '';",
            Slot::RepoComponent => "const repoComponent = '';",
            Slot::RepoIcon => "const repoIcon = '';",
            Slot::DevInfo => "<!-- [info] -->",
            Slot::ComponentMap => "const componentMap = new Map();",
            Slot::NavigationData => "const navigation = [];",
            Slot::AppElement => "<namespace-app></namespace-app>",
        }
    }

    /// Block slots take over the spaces and tabs in front of the marker and receive
    /// them as the indent for every generated line.
    pub fn is_block(self) -> bool {
        matches!(
            self,
            Slot::Navigation
                | Slot::RepoLink
                | Slot::DevInfo
                | Slot::ComponentMap
                | Slot::NavigationData
        )
    }
}

/// Generates the text for one slot from the marker's indent.
pub type Render<'a> = Box<dyn FnOnce(&str) -> String + 'a>;

/// Where a marker sits in a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Span {
    /// Start of the replaced text (the indent for block slots).
    from: usize,
    marker: usize,
    to: usize,
}

fn locate(html: &str, slot: Slot) -> Option<Span> {
    let marker = html.find(slot.marker())?;
    let from = if slot.is_block() {
        html[..marker].trim_end_matches([' ', '\t']).len()
    } else {
        marker
    };
    Some(Span {
        from,
        marker,
        to: marker + slot.marker().len(),
    })
}

/// Replace the first occurrence of each slot's marker with its rendering.
///
/// Every marker is located in `html` before anything is inserted, so text
/// produced by one slot is never taken for another slot's marker. Block
/// slots take over the spaces and tabs in front of the marker and receive
/// them as `indent`; inline slots get an empty indent. Absent markers are
/// skipped.
pub fn fill_slots(html: &str, fills: Vec<(Slot, Render<'_>)>) -> String {
    let mut located: Vec<(Span, Slot, Render<'_>)> = Vec::new();
    for (slot, render) in fills {
        match locate(html, slot) {
            Some(span) => located.push((span, slot, render)),
            None => tracing::debug!("template has no {:?} marker; skipped", slot),
        }
    }
    located.sort_by_key(|(span, _, _)| span.marker);

    let mut out = String::with_capacity(html.len() + 1024);
    let mut cursor = 0;
    for (span, slot, render) in located {
        if span.from < cursor {
            tracing::debug!("{:?} marker overlaps another marker; skipped", slot);
            continue;
        }
        out.push_str(&html[cursor..span.from]);
        out.push_str(&render(&html[span.from..span.marker]));
        cursor = span.to;
    }
    out.push_str(&html[cursor..]);
    out
}

/// Join `lines`, each prefixed with `indent`, by newlines.
pub fn indent_lines<I, S>(indent: &str, lines: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    lines
        .into_iter()
        .map(|line| format!("{}{}", indent, line.as_ref()))
        .collect::<Vec<_>>()
        .join("\n")
}
