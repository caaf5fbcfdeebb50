//! Command-line interface definition and logging setup.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use metegiya_core::DispatchChannel;
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::{fmt, EnvFilter};

/// Metegiya command-line interface
#[derive(Parser, Debug)]
#[command(name = "metegiya")]
#[command(about = "Emergency assistance companion for migrant domestic workers", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Set log level (error, warn, info, debug, trace)
    #[arg(short, long, value_name = "LEVEL", default_value = "warn")]
    pub log_level: String,

    /// Enable JSON structured logging
    #[arg(long)]
    pub json_logs: bool,

    /// Configuration file path
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Interface language for this invocation (am, om, ti)
    #[arg(long, value_name = "CODE")]
    pub locale: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Outbound channel selection on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ChannelArg {
    /// Native messaging intent (`sms:`)
    Sms,
    /// WhatsApp web intent
    Whatsapp,
}

impl From<ChannelArg> for DispatchChannel {
    fn from(arg: ChannelArg) -> Self {
        match arg {
            ChannelArg::Sms => DispatchChannel::Sms,
            ChannelArg::Whatsapp => DispatchChannel::WhatsApp,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resolve the current position and send an emergency alert
    Emergency {
        /// Outbound channel
        #[arg(long, value_enum, default_value = "sms")]
        channel: ChannelArg,

        /// Print the composed URI instead of handing it off
        #[arg(long)]
        dry_run: bool,
    },

    /// Dial a catalog contact by name, or any phone number
    Call {
        /// Contact name (case-insensitive) or phone number
        target: String,
    },

    /// Manage the trusted-numbers list
    Contacts {
        #[command(subcommand)]
        command: ContactsCommand,
    },

    /// List and download offline map packs
    Packs {
        #[command(subcommand)]
        command: PacksCommand,
    },

    /// Show the map view data
    Map {
        /// Open the map in the browser
        #[arg(long)]
        open: bool,
    },

    /// Show the localized safety reminders
    Reminders,

    /// List supported interface languages
    Locales,

    /// Show locale, connectivity and storage summary
    Status {
        /// Keep watching connectivity until interrupted
        #[arg(long)]
        watch: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum ContactsCommand {
    /// Show the emergency catalog and the trusted list
    List,
    /// Add a trusted number
    Add {
        /// Phone number to trust
        number: String,
    },
    /// Remove a trusted number
    Remove {
        /// Phone number to remove
        number: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum PacksCommand {
    /// Show the pack catalog for the active language with per-pack state
    List,
    /// Download a pack from the active language's catalog
    Download {
        /// Pack name exactly as shown by `packs list`
        name: String,
    },
}

/// Initialize logging based on CLI configuration
pub fn init_logging(cli: &Cli) -> Result<()> {
    let log_level = cli.log_level.parse::<Level>().with_context(|| {
        format!(
            "Invalid log level '{}'. Valid levels: error, warn, info, debug, trace",
            cli.log_level
        )
    })?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level.as_str()))
        .context("Failed to create log filter")?;

    let subscriber = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);

    if cli.json_logs {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    info!(
        "Logging initialized: level={}, json={}",
        log_level, cli.json_logs
    );
    Ok(())
}
