//! Postsmith - a static article publisher for markdown posts.

mod build;
mod cli;
mod compiler;
mod config;
mod gallery;
mod generator;
mod logger;
mod utils;

use anyhow::Result;
use build::build_all;
use clap::Parser;
use cli::{Cli, Commands, GalleryAction};
use config::SiteConfig;
use gallery::{GalleryEntry, add_to_gallery};
use generator::{listing::build_listing, rss::build_rss};
use std::path::Path;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    match &cli.command {
        Commands::Build { .. } => build_all(&config).map(|_| ()),
        Commands::Feed { .. } => build_rss(&config).map(|_| ()),
        Commands::Listing => build_listing(&config).map(|_| ()),
        Commands::Gallery { action } => match action {
            GalleryAction::Add {
                url,
                name,
                lat,
                lng,
                date_taken,
            } => {
                let entry = GalleryEntry::new(url, name, *lat, *lng, date_taken.clone());
                add_to_gallery(&config, &entry)
            }
        },
    }
}

/// Load and validate configuration from CLI arguments.
///
/// A missing config file is not an error: defaults apply.
fn load_config(cli: &Cli) -> Result<SiteConfig> {
    let root = cli.root.as_deref().unwrap_or(Path::new("./"));
    let config_path = root.join(&cli.config);

    let mut config = if config_path.exists() {
        SiteConfig::from_path(&config_path)?
    } else {
        log!("config"; "{} not found, using defaults", config_path.display());
        SiteConfig::default()
    };
    config.update_with_cli(cli);
    config.resolve_url_from_cname();
    config.validate()?;

    Ok(config)
}
