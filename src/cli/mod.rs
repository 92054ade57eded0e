pub mod build;
pub mod completions;
pub mod init;
pub mod list;
pub mod publish;
pub mod start;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// element - Web component library build tool
#[derive(Parser, Debug)]
#[command(name = "element")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Show debug logging
    #[arg(long, short, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only print errors
    #[arg(long, short, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Production build into build/
    Build(build::BuildArgs),

    /// Build into dist/, then watch src/ and serve dist/
    Start(start::StartArgs),

    /// Create a starter element.config.yaml
    Init(init::InitArgs),

    /// List namespaces, components and examples
    List(list::ListArgs),

    /// Mirror src/components into publish/
    Publish(publish::PublishArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

/// Location of the project, shared by every command that reads the config.
#[derive(Args, Debug, Clone)]
pub struct ProjectArgs {
    /// Project root containing element.config.yaml
    #[arg(long, default_value = ".")]
    pub root: PathBuf,
}
