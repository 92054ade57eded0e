//! Start command implementation.
//!
//! Initial development build into `dist/`, then a watcher on `src/` feeding
//! the rebuild queue while `dist/` is served over HTTP.

use std::thread;

use clap::Args;

use crate::bundler::EsbuildBundler;
use crate::dev::{server, RebuildQueue, SourceWatcher};
use crate::error::{ElementError, Result};
use crate::output::{plural, Printer};
use crate::pipeline::Pipeline;
use crate::playground::Mode;
use crate::project::Project;

use super::ProjectArgs;

/// Build into dist/, then watch src/ and serve dist/
#[derive(Args, Debug)]
pub struct StartArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Dev server port (default: `port` from config, else 8000)
    #[arg(long, short)]
    pub port: Option<u16>,
}

pub fn run(args: StartArgs, printer: &Printer) -> Result<()> {
    let project = Project::load(&args.project.root)?;
    let port = args.port.unwrap_or(project.config.port);
    let bundler = EsbuildBundler::for_project(&project);

    let outcome = Pipeline::new(&project, &bundler, *printer).run(Mode::Development)?;
    if project.config.is_playground() {
        printer.info(
            "Loaded",
            &format!(
                "{}, {}",
                plural(outcome.components, "component", "components"),
                plural(outcome.examples, "example", "examples")
            ),
        );
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| ElementError::Server {
            message: format!("Failed to start async runtime: {}", e),
            help: None,
        })?;
    let listener = runtime.block_on(server::bind(port))?;
    let addr = listener.local_addr()?;
    let (watcher, changes) = SourceWatcher::new(project.layout.src_dir())?;

    printer.success("Dev server", &format!("started at localhost:{}", addr.port()));

    let queue = RebuildQueue::new(
        Pipeline::new(&project, &bundler, *printer),
        Mode::Development,
        *printer,
    );
    let dist = outcome.out_dir;

    thread::scope(|scope| {
        scope.spawn(move || queue.run(changes));
        let served = runtime.block_on(server::serve(listener, dist));
        // Closing the watch channel lets the rebuild thread exit.
        drop(watcher);
        served
    })
}
