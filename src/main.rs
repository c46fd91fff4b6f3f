//! Permakey - stable content identifiers and permalinks for flat-file sites.

#![allow(dead_code)]

mod auth;
mod cli;
mod config;
mod content;
mod core;
mod logger;
mod model;
mod uuid;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::SiteConfig;
use model::Site;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    let config = if cli.config.is_file() {
        SiteConfig::load(&cli.config)?
    } else {
        debug!("config"; "{} not found, using defaults", cli.config.display());
        let root = cli.config.parent().filter(|p| !p.as_os_str().is_empty());
        SiteConfig::with_root(root.unwrap_or_else(|| std::path::Path::new(".")))
    };

    let site = Site::load(config);

    match &cli.command {
        Commands::Resolve { uri } => cli::run_resolve(&site, uri),
        Commands::Url { uri } => cli::run_url(&site, uri),
        Commands::Assign { scheme, key } => cli::run_assign(&site, scheme, key),
        Commands::Index => cli::run_index(&site),
    }
}
