//! voltpress - content builder for database-backed contractor sites.
//!
//! Resolves every page of the site from a read-only SQLite database and
//! exports one JSON document per route for the renderer.

mod cli;
mod config;
mod content;
mod core;
mod freshness;
mod logger;
mod routes;
mod store;
mod utils;

use anyhow::{Result, bail};
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::SiteConfig;

fn main() -> Result<()> {
    // Setup global Ctrl+C handler (before any blocking operations)
    core::setup_shutdown_handler()?;

    let cli: &'static Cli = Box::leak(Box::new(Cli::parse()));

    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    let config = SiteConfig::load(cli)?;

    match &cli.command {
        Commands::Init { dry, .. } => cli::init::new_site(&config, *dry),
        Commands::Build { .. } => {
            let summary = cli::build::build_site(&config, false)?;
            if summary.interrupted {
                bail!("build interrupted");
            }
            Ok(())
        }
        Commands::Query { args } => cli::query::run_query(args, &config),
        Commands::Validate { .. } => cli::validate::validate_site(&config),
    }
}
