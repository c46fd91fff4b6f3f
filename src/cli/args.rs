//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Permakey stable-identifier CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Show debug output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file path (default: permakey.toml)
    #[arg(short = 'C', long, default_value = "permakey.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Resolve an identifier to its content-store key
    #[command(visible_alias = "r")]
    Resolve {
        /// Identifier, e.g. `page://abc123` or `page://abc123#blog`
        uri: String,
    },

    /// Print the public permalink for an identifier
    #[command(visible_alias = "u")]
    Url {
        /// Identifier, e.g. `page://abc123`
        uri: String,
    },

    /// Make sure a model carries a persisted identifier and print it
    #[command(visible_alias = "a")]
    Assign {
        /// Model kind: page, file or user
        scheme: String,

        /// Content-store key, e.g. `blog/hello`
        key: String,
    },

    /// Scan all models and list identifier-to-key mappings
    #[command(visible_alias = "i")]
    Index,
}
