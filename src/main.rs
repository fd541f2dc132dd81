// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//
//! Distro picker CLI - browse and filter the Linux distribution catalog

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use distro_picker::commands::{self, Output};
use distro_picker::config;

#[derive(Parser)]
#[command(name = "distro-picker")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Configuration file path
    #[arg(short, long, env = "DISTRO_PICKER_CONFIG")]
    config: Option<std::path::PathBuf>,

    /// Read tags.json and distros.json from this directory
    #[arg(long, env = "DISTRO_PICKER_CATALOG_DIR")]
    catalog_dir: Option<std::path::PathBuf>,

    /// Disable colored output
    #[arg(long, env = "NO_COLOR", value_parser = clap::builder::FalseyValueParser::new())]
    no_color: bool,

    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every tag in the catalog
    Tags,

    /// List distros carrying all of the given tags, best first
    List {
        /// Tag ID to filter by (repeatable)
        #[arg(short, long = "tag")]
        tags: Vec<String>,
    },

    /// Show details for one distro
    Show {
        /// Distro ID
        id: String,
    },

    /// Validate catalog documents
    Validate {
        /// Tags document to check instead of the configured catalog
        #[arg(long)]
        tags: Option<std::path::PathBuf>,

        /// Distros document to check instead of the configured catalog
        #[arg(long)]
        distros: Option<std::path::PathBuf>,
    },

    /// Generate shell completions
    Completions {
        /// Shell type (bash, zsh, fish, powershell)
        shell: clap_complete::Shell,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Some(dir) = cli.catalog_dir {
        config.catalog_dir = Some(dir);
    }

    // Initialize logging
    let log_level = match cli.verbose {
        0 if cli.quiet => tracing::Level::ERROR,
        0 => config.log_level.parse().unwrap_or(tracing::Level::INFO),
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let output = Output {
        json: cli.json,
        color: !cli.no_color && !cli.json,
    };

    // Execute command
    match cli.command {
        Commands::Tags => commands::tags::run(&config, output).await,
        Commands::List { tags } => commands::list::run(&config, tags, output).await,
        Commands::Show { id } => commands::show::run(&config, &id, output).await,
        Commands::Validate { tags, distros } => {
            commands::validate::run(&config, tags, distros, output).await
        }
        Commands::Completions { shell } => commands::completions::run(shell, &mut Cli::command()),
    }
}
