//! `element completions <shell>`: completion script on stdout.

use std::io::{self, Write};

use clap::{Args, CommandFactory};
use clap_complete::Shell;

use crate::error::Result;

use super::Cli;

/// Print a shell completion script
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Target shell, e.g. bash, zsh or fish
    #[arg(value_enum)]
    pub shell: Shell,
}

pub fn run(args: CompletionsArgs) -> Result<()> {
    let mut stdout = io::stdout().lock();
    write_completions(args.shell, &mut stdout)?;
    stdout.flush()?;
    Ok(())
}

/// Completion script for the `element` command tree.
pub fn write_completions(shell: Shell, out: &mut dyn Write) -> Result<()> {
    let mut command = Cli::command();
    let bin = command.get_name().to_string();
    clap_complete::generate(shell, &mut command, bin, out);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn script(shell: Shell) -> String {
        let mut out = Vec::new();
        write_completions(shell, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_bash_script_covers_subcommands() {
        let bash = script(Shell::Bash);
        assert!(bash.contains("_element()"));
        for command in ["build", "start", "init", "list", "publish"] {
            assert!(bash.contains(command), "missing {command}");
        }
        assert!(bash.contains("--root"));
    }

    #[test]
    fn test_zsh_script_names_binary() {
        assert!(script(Shell::Zsh).starts_with("#compdef element"));
    }
}
