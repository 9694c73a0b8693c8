//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Validates command-specific arguments
//! 2. Builds what the loader needs and runs it
//! 3. Formats and displays output
//!
//! # Async Commands
//!
//! `load` performs network I/O and is async; the others complete
//! synchronously but share the async dispatch signature.

mod completion;
mod config_cmd;
mod load;
mod url;

// Re-export command functions for testing and direct invocation
pub use completion::completion;
pub use config_cmd::{set_server as config_set_server, show as config_show};
pub use load::load;
pub use url::url;

use crate::cli::args::{Command, ConfigAction};
use crate::cli::Context;
use crate::core::query::ChangesetQuery;
use anyhow::Result;

/// Dispatch a command to its handler.
pub async fn dispatch(command: Command, ctx: &Context) -> Result<()> {
    match command {
        Command::Load {
            tokens,
            output,
            normalize,
        } => load::load(ctx, &tokens, output.as_deref(), normalize).await,
        Command::Url { tokens, normalize } => url::url(ctx, &tokens, normalize),
        Command::Config { action } => match action {
            ConfigAction::Show => config_cmd::show(ctx),
            ConfigAction::SetServer { url } => config_cmd::set_server(ctx, &url),
        },
        Command::Completion { shell } => completion::completion(shell),
    }
}

/// Build the query string the loader sends.
///
/// Tokens are joined with single spaces. With `normalize`, links are
/// reduced to ids and the configured maximum is enforced.
pub fn query_from_tokens(ctx: &Context, tokens: &[String], normalize: bool) -> Result<String> {
    let joined = tokens.join(" ");
    if !normalize {
        return Ok(joined);
    }
    let query = ChangesetQuery::parse(&joined, Some(ctx.config.max_changesets()))?;
    Ok(query.as_query())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::Config;
    use crate::ui::output::Verbosity;

    fn ctx() -> Context {
        Context {
            config: Config::default(),
            verbosity: Verbosity::Quiet,
        }
    }

    fn tokens(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn tokens_are_joined_verbatim() {
        let query = query_from_tokens(&ctx(), &tokens(&["abc", "d/e"]), false).unwrap();
        assert_eq!(query, "abc d/e");
    }

    #[test]
    fn normalize_reduces_links() {
        let query = query_from_tokens(
            &ctx(),
            &tokens(&["https://www.openstreetmap.org/changeset/10", "11"]),
            true,
        )
        .unwrap();
        assert_eq!(query, "10 11");
    }

    #[test]
    fn normalize_rejects_garbage() {
        assert!(query_from_tokens(&ctx(), &tokens(&["abc"]), true).is_err());
    }

    #[test]
    fn normalize_enforces_max() {
        let many: Vec<String> = (1..=21).map(|n| n.to_string()).collect();
        assert!(query_from_tokens(&ctx(), &many, true).is_err());
        assert!(query_from_tokens(&ctx(), &many, false).is_ok());
    }
}
