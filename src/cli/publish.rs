//! Publish command implementation.

use clap::Args;

use crate::error::Result;
use crate::output::{display_path, plural, Printer};
use crate::project::Project;
use crate::publish::mirror_components;

use super::ProjectArgs;

/// Mirror src/components into publish/
#[derive(Args, Debug)]
pub struct PublishArgs {
    #[command(flatten)]
    pub project: ProjectArgs,
}

pub fn run(args: PublishArgs, printer: &Printer) -> Result<()> {
    let project = Project::load(&args.project.root)?;

    let copied = mirror_components(&project.layout)?;
    printer.success(
        "Published",
        &format!(
            "{} to {}",
            plural(copied, "file", "files"),
            display_path(&project.layout.publish_dir())
        ),
    );
    Ok(())
}
