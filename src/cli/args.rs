//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--config <path>`: Read configuration from this file
//! - `--server <url>`: Override the server base URL
//! - `--region <id>`: Override the display region id
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Minimal output

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Fetch rendered changesets from a revert server
#[derive(Parser, Debug)]
#[command(name = "changesets")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Read configuration from this file instead of the default locations
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Server base URL (overrides the config file)
    #[arg(long, global = true, value_name = "URL")]
    pub server: Option<String>,

    /// Display region id (overrides the config file)
    #[arg(long, global = true, value_name = "ID")]
    pub region: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fetch changesets and write the returned fragment
    #[command(
        name = "load",
        long_about = "Fetch changesets and write the returned fragment.\n\n\
            Requests <server>/changesets/<tokens> and, if the server answers \
            with status 200, writes the response body to stdout or to the \
            --output file. Any other outcome writes nothing and still exits \
            successfully; run with --debug to see why a response was ignored.",
        after_help = "\
EXAMPLES:
    # Show two changesets
    changesets --server https://revert.example.org load 123 456

    # Accept pasted links and keep the fragment in a file
    changesets load --normalize https://www.openstreetmap.org/changeset/123 -o out.html"
    )]
    Load {
        /// Changeset tokens; joined with single spaces
        #[arg(required = true, num_args = 1..)]
        tokens: Vec<String>,

        /// Write the fragment to this file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Reduce links to ids and reject anything that is not numeric
        #[arg(long)]
        normalize: bool,
    },

    /// Print the request target for the given tokens
    Url {
        /// Changeset tokens; joined with single spaces
        #[arg(required = true, num_args = 1..)]
        tokens: Vec<String>,

        /// Reduce links to ids and reject anything that is not numeric
        #[arg(long)]
        normalize: bool,
    },

    /// Show or change configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,

    /// Store the server base URL in the user config file
    SetServer {
        /// Base URL, e.g. https://revert.example.org
        url: String,
    },
}

/// Shells supported by `completion`.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    #[value(name = "powershell")]
    PowerShell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_load_with_globals() {
        let cli = Cli::try_parse_from([
            "changesets",
            "--server",
            "http://srv",
            "load",
            "1",
            "2",
            "--normalize",
        ])
        .unwrap();

        assert_eq!(cli.server.as_deref(), Some("http://srv"));
        match cli.command {
            Command::Load {
                tokens,
                output,
                normalize,
            } => {
                assert_eq!(tokens, vec!["1", "2"]);
                assert!(output.is_none());
                assert!(normalize);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn load_requires_tokens() {
        assert!(Cli::try_parse_from(["changesets", "load"]).is_err());
    }

    #[test]
    fn parses_completion_shell() {
        let cli = Cli::try_parse_from(["changesets", "completion", "powershell"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Completion {
                shell: Shell::PowerShell
            }
        ));
    }
}
