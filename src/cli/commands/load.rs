//! load command - Fetch changesets and write the returned fragment

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context as _, Result};

use super::query_from_tokens;
use crate::cli::Context;
use crate::loader::ChangesetLoader;
use crate::page::{FilePage, Page, WriterPage};
use crate::transport::HttpTransport;

/// Fetch changesets for `tokens` and write the fragment to stdout or `output`.
///
/// A skipped response is not an error: nothing is written and the command
/// succeeds.
pub async fn load(
    ctx: &Context,
    tokens: &[String],
    output: Option<&Path>,
    normalize: bool,
) -> Result<()> {
    let query = query_from_tokens(ctx, tokens, normalize)?;
    let region = ctx.config.region();

    let page: Arc<dyn Page> = match output {
        Some(path) => Arc::new(FilePage::new(region, path)),
        None => Arc::new(WriterPage::new(region, std::io::stdout())),
    };

    let loader = ChangesetLoader::new(
        ctx.config.loader_options(),
        Arc::new(HttpTransport::new()),
        page,
    )
    .context("Failed to start loader")?;

    loader.load(&query);
    loader.idle().await;

    Ok(())
}
