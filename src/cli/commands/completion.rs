//! completion command - Generate shell completion scripts
//!
//! The script completes the `changesets` subcommands and global flags
//! (`--server`, `--region`, `--config`), so a configured server can be
//! overridden without retyping the whole invocation.

use crate::cli::args::{Cli, Shell};
use anyhow::{Context, Result};
use clap::CommandFactory;
use std::io::Write;

impl From<Shell> for clap_complete::Shell {
    fn from(shell: Shell) -> Self {
        match shell {
            Shell::Bash => clap_complete::Shell::Bash,
            Shell::Zsh => clap_complete::Shell::Zsh,
            Shell::Fish => clap_complete::Shell::Fish,
            Shell::PowerShell => clap_complete::Shell::PowerShell,
        }
    }
}

/// Generate a completion script for `shell` on stdout.
pub fn completion(shell: Shell) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    write_completion(shell, &mut out)?;
    out.flush().context("Failed to write completion script")
}

/// Write the completion script for the `changesets` binary to `out`.
pub fn write_completion(shell: Shell, out: &mut dyn Write) -> Result<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(clap_complete::Shell::from(shell), &mut cmd, name, out);
    Ok(())
}
