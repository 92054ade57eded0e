//! Build command implementation.
//!
//! One-shot production build into `build/`.

use clap::Args;

use crate::bundler::EsbuildBundler;
use crate::error::Result;
use crate::output::{display_path, plural, Printer};
use crate::pipeline::Pipeline;
use crate::playground::Mode;
use crate::project::Project;

use super::ProjectArgs;

/// Production build into build/
#[derive(Args, Debug)]
pub struct BuildArgs {
    #[command(flatten)]
    pub project: ProjectArgs,
}

pub fn run(args: BuildArgs, printer: &Printer) -> Result<()> {
    let project = Project::load(&args.project.root)?;
    let bundler = EsbuildBundler::for_project(&project);

    let outcome = Pipeline::new(&project, &bundler, *printer).run(Mode::Production)?;

    if project.config.is_playground() {
        printer.success(
            "Built",
            &format!(
                "{} and {} to {}",
                plural(outcome.components, "component", "components"),
                plural(outcome.examples, "example", "examples"),
                display_path(&outcome.out_dir)
            ),
        );
    } else {
        printer.success("Built", &format!("app to {}", display_path(&outcome.out_dir)));
    }

    Ok(())
}
