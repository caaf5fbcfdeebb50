//! Metegiya command shell.
//!
//! Thin glue over `metegiya-core`: parse arguments, initialize logging,
//! load configuration, pick the locale for this invocation and run the
//! requested subcommand.

mod app;
mod cli;
mod config;

use anyhow::{Context, Result};
use clap::Parser;
use metegiya_core::Locale;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::init_logging(&cli)?;

    let config = config::Config::load(cli.config.as_deref())?;
    config.ensure_directories()?;

    // The --locale flag lasts one invocation; it is never written back.
    let locale = match &cli.locale {
        Some(code) => code
            .parse::<Locale>()
            .map_err(|e| anyhow::anyhow!(e.user_message()))?,
        None => config.general.default_locale,
    };

    let mut app = app::App::new(config, locale).context("Failed to start")?;
    app.run(cli.command).await
}
