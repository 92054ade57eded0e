use clap::Parser;
use element::cli::{Cli, Commands};
use element::logger::init_logger;
use element::output::Printer;
use miette::Result;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose, cli.quiet);
    let printer = Printer::new().quiet(cli.quiet);

    match cli.command {
        Commands::Build(args) => element::cli::build::run(args, &printer)?,
        Commands::Start(args) => element::cli::start::run(args, &printer)?,
        Commands::Init(args) => element::cli::init::run(args, &printer)?,
        Commands::List(args) => element::cli::list::run(args, &printer)?,
        Commands::Publish(args) => element::cli::publish::run(args, &printer)?,
        Commands::Completions(args) => element::cli::completions::run(args)?,
    }

    Ok(())
}
