//! Command-line interface definitions.
//!
//! Defines all CLI arguments and subcommands using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Postsmith static article generator CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Project root directory
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Output directory path (relative to project root)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Content directory path (relative to project root)
    #[arg(short, long)]
    pub content: Option<PathBuf>,

    /// Config file name (default: postsmith.toml)
    #[arg(short = 'C', long, default_value = "postsmith.toml")]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Shared arguments for commands that build absolute URLs
#[derive(clap::Args, Debug, Clone, Default)]
pub struct SiteArgs {
    /// Override base URL for the site.
    ///
    /// Takes precedence over `[base].url` and the CNAME file.
    ///
    /// Example:
    ///   postsmith build --base-url "https://staging.ethan.dev"
    #[arg(long = "base-url")]
    pub base_url: Option<String>,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Regenerate every article page, the listing page and the rss feed
    Build {
        #[command(flatten)]
        site: SiteArgs,

        /// Clean output directory completely before building
        #[arg(long)]
        clean: bool,

        /// Minify the html content
        #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
        minify: Option<bool>,

        /// enable rss feed generation
        #[arg(long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
        rss: Option<bool>,

        /// enable listing page generation
        #[arg(long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
        listing: Option<bool>,
    },

    /// Only regenerate the rss feed
    Feed {
        #[command(flatten)]
        site: SiteArgs,
    },

    /// Only regenerate the listing page
    Listing,

    /// Manage the gallery JSON file
    Gallery {
        #[command(subcommand)]
        action: GalleryAction,
    },
}

/// Gallery subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum GalleryAction {
    /// Append one image entry to the gallery
    Add {
        /// Public image URL
        #[arg(long)]
        url: String,

        /// Display name
        #[arg(long, default_value = "")]
        name: String,

        /// Latitude (written only together with --lng)
        #[arg(long, allow_negative_numbers = true)]
        lat: Option<f64>,

        /// Longitude (written only together with --lat)
        #[arg(long, allow_negative_numbers = true)]
        lng: Option<f64>,

        /// Capture date as YYYY-MM-DD
        #[arg(long = "date-taken")]
        date_taken: Option<String>,
    },
}

impl Cli {
    /// Site arguments of the current command, if it takes any.
    pub fn site_args(&self) -> Option<&SiteArgs> {
        match &self.command {
            Commands::Build { site, .. } | Commands::Feed { site } => Some(site),
            _ => None,
        }
    }
}
