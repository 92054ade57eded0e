//! Init command implementation.
//!
//! Writes a starter `element.config.yaml`.

use std::fs;
use std::path::PathBuf;

use clap::Args;

use crate::config::CONFIG_FILENAME;
use crate::error::{ElementError, Result, STARTER_CONFIG};
use crate::output::{display_path, Printer};

/// Create a starter element.config.yaml
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Project directory (default: current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Overwrite an existing element.config.yaml
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: InitArgs, printer: &Printer) -> Result<()> {
    let config_path = args.path.join(CONFIG_FILENAME);

    if config_path.exists() && !args.force {
        return Err(ElementError::Build {
            message: format!("{} already exists", CONFIG_FILENAME),
            help: Some("Use --force to overwrite".to_string()),
        });
    }

    fs::write(&config_path, STARTER_CONFIG).map_err(|e| ElementError::Io {
        path: config_path.clone(),
        message: format!("Failed to write config: {}", e),
    })?;

    printer.success("Created", &display_path(&config_path));
    Ok(())
}
