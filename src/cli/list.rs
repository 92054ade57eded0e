//! List command implementation.
//!
//! Prints the scanned component tree, or the tree plus navigation groups as
//! JSON with `--json`.

use std::io::{self, Write};

use clap::Args;
use serde::Serialize;

use crate::discovery::{scan, NamespaceMeta};
use crate::error::{ElementError, Result};
use crate::navigation::{bucket, PopulatedGroup};
use crate::output::{display_path, plural, Printer};
use crate::project::Project;

use super::ProjectArgs;

/// List namespaces, components and examples
#[derive(Args, Debug)]
pub struct ListArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Print JSON to stdout
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct Listing<'a> {
    namespaces: &'a [NamespaceMeta],
    navigation: &'a [PopulatedGroup],
}

pub fn run(args: ListArgs, printer: &Printer) -> Result<()> {
    let project = Project::load(&args.project.root)?;
    let scanned = scan(&project)?;

    for missing in &scanned.missing_examples {
        printer.warning("Missing", &format!("example file {}", display_path(missing)));
    }

    let mut stdout = io::stdout().lock();
    if args.json {
        let navigation = bucket(&scanned.namespaces, &project.config.navigation);
        let listing = Listing {
            namespaces: &scanned.namespaces,
            navigation: &navigation.groups,
        };
        let json = serde_json::to_string_pretty(&listing).map_err(|e| ElementError::Build {
            message: format!("Failed to serialize listing: {}", e),
            help: None,
        })?;
        writeln!(stdout, "{}", json)?;
        return Ok(());
    }

    write_tree(&mut stdout, &scanned.namespaces, printer)?;
    printer.info(
        "Found",
        &format!(
            "{}, {}",
            plural(scanned.component_count(), "component", "components"),
            plural(scanned.example_count(), "example", "examples")
        ),
    );
    Ok(())
}

fn write_tree(out: &mut impl Write, namespaces: &[NamespaceMeta], printer: &Printer) -> io::Result<()> {
    for namespace in namespaces {
        writeln!(out, "{}", printer.bold(&namespace.namespace))?;
        for component in &namespace.components {
            writeln!(
                out,
                "  {} {} {}",
                component.component,
                printer.cyan(&format!("<{}>", component.tag)),
                printer.dim(&format!("{} extends {}", component.class_name, component.class_extends))
            )?;
            for example in &component.examples {
                writeln!(
                    out,
                    "    {} {}",
                    example.example,
                    printer.cyan(&format!("<{}>", example.tag))
                )?;
            }
        }
    }
    Ok(())
}
