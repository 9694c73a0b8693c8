//! url command - Print the request target for a query

use anyhow::Result;

use super::query_from_tokens;
use crate::cli::Context;
use crate::loader;

/// Print the URL `load` would request for `tokens`.
pub fn url(ctx: &Context, tokens: &[String], normalize: bool) -> Result<()> {
    let query = query_from_tokens(ctx, tokens, normalize)?;
    println!("{}", loader::target_url(ctx.config.server(), &query));
    Ok(())
}
