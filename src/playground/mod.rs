//! Playground index synthesis.
//!
//! Turns a template plus the scanned component tree into the playground's
//! `index.html`: title, navigation markup, repository link, dev banner, and
//! the `componentMap` / `navigation` data the page script reads.

mod component_map;
mod slots;
mod templates;

pub use component_map::{ComponentMap, ComponentMapEntry};
pub use slots::{fill_slots, indent_lines, Render, Slot};
pub use templates::{app_template, default_asset, favicon, playground_template, PLAYGROUND_TEMPLATE};

use crate::config::ProjectConfig;
use crate::discovery::NamespaceMeta;
use crate::error::Result;
use crate::navigation::{bucket, Navigation, NavigationGroup};

use component_map::script_json;

const GITHUB_ICON: &str = "M12,2A10,10 0 0,0 2,12C2,16.42 4.87,20.17 8.84,21.5C9.34,21.58 9.5,21.27 9.5,21C9.5,20.77 9.5,20.14 9.5,19.31C6.73,19.91 6.14,17.97 6.14,17.97C5.68,16.81 5.03,16.5 5.03,16.5C4.12,15.88 5.1,15.9 5.1,15.9C6.1,15.97 6.63,16.93 6.63,16.93C7.5,18.45 8.97,18 9.54,17.76C9.63,17.11 9.89,16.67 10.17,16.42C7.95,16.17 5.62,15.31 5.62,11.5C5.62,10.39 6,9.5 6.65,8.79C6.55,8.54 6.2,7.5 6.75,6.15C6.75,6.15 7.59,5.88 9.5,7.17C10.29,6.95 11.15,6.84 12,6.84C12.85,6.84 13.71,6.95 14.5,7.17C16.41,5.88 17.25,6.15 17.25,6.15C17.8,7.5 17.45,8.54 17.35,8.79C18,9.5 18.38,10.39 18.38,11.5C18.38,15.32 16.04,16.16 13.81,16.41C14.17,16.72 14.5,17.33 14.5,18.26C14.5,19.6 14.5,20.68 14.5,21C14.5,21.27 14.66,21.59 15.17,21.5C19.14,20.16 22,16.42 22,12A10,10 0 0,0 12,2Z";
const GENERIC_REPO_ICON: &str = "M6,2H18A2,2 0 0,1 20,4V20A2,2 0 0,1 18,22H6A2,2 0 0,1 4,20V4A2,2 0 0,1 6,2M12.75,13.5C15.5,13.5 16.24,11.47 16.43,10.4C17.34,10.11 18,9.26 18,8.25C18,7 17,6 15.75,6C14.5,6 13.5,7 13.5,8.25C13.5,9.19 14.07,10 14.89,10.33C14.67,11 14,12 12,12C10.62,12 9.66,12.35 9,12.84V8.87C9.87,8.56 10.5,7.73 10.5,6.75C10.5,5.5 9.5,4.5 8.25,4.5C7,4.5 6,5.5 6,6.75C6,7.73 6.63,8.56 7.5,8.87V15.13C6.63,15.44 6,16.27 6,17.25C6,18.5 7,19.5 8.25,19.5C9.5,19.5 10.5,18.5 10.5,17.25C10.5,16.32 9.94,15.5 9.13,15.18C9.41,14.5 10.23,13.5 12.75,13.5M8.25,16.5A0.75,0.75 0 0,1 9,17.25A0.75,0.75 0 0,1 8.25,18A0.75,0.75 0 0,1 7.5,17.25A0.75,0.75 0 0,1 8.25,16.5M8.25,6A0.75,0.75 0 0,1 9,6.75A0.75,0.75 0 0,1 8.25,7.5A0.75,0.75 0 0,1 7.5,6.75A0.75,0.75 0 0,1 8.25,6M15.75,7.5A0.75,0.75 0 0,1 16.5,8.25A0.75,0.75 0 0,1 15.75,9A0.75,0.75 0 0,1 15,8.25A0.75,0.75 0 0,1 15.75,7.5Z";

/// Build flavour; development pages carry a usage hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Development,
    Production,
}

/// Page-level settings for synthesis.
#[derive(Debug, Clone, Copy)]
pub struct PlaygroundOptions<'a> {
    pub title: &'a str,
    pub repo: Option<&'a str>,
    pub repo_component: Option<&'a str>,
    pub mode: Mode,
}

impl<'a> PlaygroundOptions<'a> {
    pub fn from_config(config: &'a ProjectConfig, mode: Mode) -> Self {
        Self {
            title: config.effective_title(),
            repo: config.repo.as_deref(),
            repo_component: config.repo_component.as_deref(),
            mode,
        }
    }
}

/// Produce the playground page from `template`.
///
/// Every marker is optional: a template missing one simply keeps that
/// region as written.
pub fn synthesize(
    template: &str,
    namespaces: &[NamespaceMeta],
    groups: &[NavigationGroup],
    options: &PlaygroundOptions<'_>,
) -> Result<String> {
    let component_map = ComponentMap::build(namespaces)?;
    let navigation = bucket(namespaces, groups);

    let statements = component_map.set_statements()?;
    let navigation_json = script_json(&navigation.groups, true)?;

    let mut fills: Vec<(Slot, Render<'_>)> = Vec::new();
    fills.push((Slot::Title, Box::new(|_: &str| format!("<title>{}</title>", options.title))));
    fills.push((Slot::Heading, Box::new(|_: &str| format!("<h1>{}</h1>", options.title))));
    fills.push((
        Slot::Navigation,
        Box::new(|indent: &str| navigation_markup(&navigation, indent)),
    ));

    if let Some(repo) = options.repo {
        let icon = repo_icon(repo);
        fills.push((
            Slot::RepoLink,
            Box::new(move |indent: &str| {
                indent_lines(
                    indent,
                    [
                        format!("<a href=\"{}\">", repo),
                        "  <svg viewBox=\"0 0 24 24\">".to_string(),
                        format!("    <path fill=\"currentColor\" d=\"{}\" />", icon),
                        "  </svg>".to_string(),
                        "  <span>View Repo</span>".to_string(),
                        "</a>".to_string(),
                    ],
                )
            }),
        ));
        fills.push((Slot::RepoUrl, Box::new(move |_: &str| format!("const repo = '{}';", repo))));
        if let Some(link) = options.repo_component {
            fills.push((
                Slot::RepoComponent,
                Box::new(move |_: &str| {
                    format!("const repoComponent = '{}';", link.replace("$repo", repo))
                }),
            ));
        }
        fills.push((
            Slot::RepoIcon,
            Box::new(move |_: &str| format!("const repoIcon = '{}';", icon)),
        ));
    }

    if options.mode == Mode::Development {
        fills.push((
            Slot::DevInfo,
            Box::new(|indent: &str| {
                indent_lines(
                    indent,
                    ["<p>This page is generated by <code>element start</code>. Pick a component on the left, or run <code>element build</code> for a production bundle.</p>"],
                )
            }),
        ));
    }

    fills.push((
        Slot::ComponentMap,
        Box::new(move |indent: &str| {
            indent_lines(
                indent,
                std::iter::once(Slot::ComponentMap.marker().to_string()).chain(statements),
            )
        }),
    ));
    fills.push((
        Slot::NavigationData,
        Box::new(|indent: &str| {
            let body = navigation_json.replace('\n', &format!("\n{}", indent));
            format!("{}const navigation = {};", indent, body)
        }),
    ));

    Ok(fill_slots(template, fills))
}

/// Icon path for the repository link: the GitHub mark for github.com hosts.
pub fn repo_icon(repo: &str) -> &'static str {
    if repo_host(repo).is_some_and(|host| host == "github.com" || host.ends_with(".github.com")) {
        GITHUB_ICON
    } else {
        GENERIC_REPO_ICON
    }
}

fn repo_host(repo: &str) -> Option<&str> {
    let rest = repo.split_once("://").map_or(repo, |(_, rest)| rest);
    let authority = rest.split(['/', '?', '#']).next()?;
    let host = authority.rsplit('@').next()?;
    let host = host.split(':').next()?;
    (!host.is_empty()).then_some(host)
}

fn navigation_markup(navigation: &Navigation, indent: &str) -> String {
    let mut lines = Vec::new();
    for group in &navigation.groups {
        lines.push(format!("<div>{}</div>", group.label()));
        lines.push("<ul>".to_string());
        for item in &group.items {
            lines.push(format!(
                "  <li data-tag=\"{tag}\" data-class-name=\"{class}\" data-component=\"{component}\"><a href=\"#{tag}\">{label}</a></li>",
                tag = item.tag,
                class = item.class_name,
                component = item.component,
                label = item.label(),
            ));
        }
        lines.push("</ul>".to_string());
    }
    indent_lines(indent, lines)
}
