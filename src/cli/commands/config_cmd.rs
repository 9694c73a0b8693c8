//! config command - Show or change configuration values

use anyhow::{Context as _, Result};

use crate::cli::Context;
use crate::core::config::{Config, FileConfig};
use crate::ui::output::{self, format_setting};

/// Print the effective configuration.
pub fn show(ctx: &Context) -> Result<()> {
    let config = &ctx.config;
    let source = config
        .loaded_from()
        .map(|p| p.display().to_string())
        .unwrap_or_default();

    println!("{}", format_setting("server", config.server()));
    println!("{}", format_setting("region", config.region()));
    println!(
        "{}",
        format_setting("max_changesets", &config.max_changesets().to_string())
    );
    output::print(format_setting("file", &source), ctx.verbosity);
    Ok(())
}

/// Store `url` as the server in the config file.
///
/// Writes to the file the configuration was loaded from, or to the user
/// config file if none was loaded. Other values in that file are kept.
pub fn set_server(ctx: &Context, url: &str) -> Result<()> {
    let path = match ctx.config.loaded_from() {
        Some(path) => path.to_path_buf(),
        None => Config::user_config_path().context("Failed to locate user config")?,
    };

    let mut file: FileConfig = if path.exists() {
        Config::load_from(&path)
            .context("Failed to load config")?
            .file
    } else {
        FileConfig::default()
    };
    file.server = Some(url.to_string());

    Config::write_to(&path, &file).context("Failed to write config")?;
    output::print(
        format!("Server set to {} in {}", url, path.display()),
        ctx.verbosity,
    );
    Ok(())
}
