//! Site configuration management for `postsmith.toml`.
//!
//! # Sections
//!
//! | Section           | Purpose                                        |
//! |-------------------|------------------------------------------------|
//! | `[base]`          | Site metadata (title, author, url, nav)        |
//! | `[build]`         | Paths, minify, head links                      |
//! | `[build.rss]`     | Feed output and channel fields                 |
//! | `[build.listing]` | JSON-driven listing page                       |
//! | `[gallery]`       | Gallery JSON file                              |
//!
//! # Example
//!
//! ```toml
//! [base]
//! title = "ethan"
//! url = "https://ethan.dev"
//!
//! [build]
//! content = "posts"
//! output = "public"
//!
//! [build.rss]
//! enable = true
//! ```

mod base;
mod build;
pub mod defaults;
mod error;
mod gallery;

pub use base::NavLink;
pub use error::ConfigError;

use base::BaseConfig;
use build::BuildConfig;
use gallery::GalleryConfig;

use crate::cli::{Cli, Commands};
use anyhow::{Result, bail};
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// File in the root naming the site's domain.
const CNAME_FILE: &str = "CNAME";

// ============================================================================
// Root Configuration
// ============================================================================

/// Root configuration structure representing postsmith.toml
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// Absolute path to the config file (set after loading)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Basic site information
    #[serde(default)]
    pub base: BaseConfig,

    /// Build settings
    #[serde(default)]
    pub build: BuildConfig,

    /// Gallery data file
    #[serde(default)]
    pub gallery: GalleryConfig,
}

impl SiteConfig {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: SiteConfig = toml::from_str(content).map_err(ConfigError::Toml)?;
        Ok(config)
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        Self::from_str(&content)
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        self.build.root.as_deref().unwrap_or(Path::new("./"))
    }

    /// Set the root directory path
    pub fn set_root(&mut self, path: &Path) {
        self.build.root = Some(path.to_path_buf())
    }

    /// Absolute site URL without a trailing slash.
    pub fn site_url(&self) -> String {
        self.base
            .url
            .as_deref()
            .map(|url| url.trim_end_matches('/').to_owned())
            .unwrap_or_else(defaults::base::fallback_url)
    }

    /// Path of the rss feed inside the output directory.
    pub fn rss_path(&self) -> PathBuf {
        self.build.output.join(&self.build.rss.path)
    }

    /// Path of the generated listing page inside the output directory.
    pub fn listing_output_path(&self) -> PathBuf {
        self.build.output.join(&self.build.listing.output)
    }

    /// Update configuration with CLI arguments
    pub fn update_with_cli(&mut self, cli: &Cli) {
        let root = cli
            .root
            .as_ref()
            .cloned()
            .unwrap_or_else(|| self.get_root().to_owned());

        Self::update_option(&mut self.build.content, cli.content.as_ref());
        Self::update_option(&mut self.build.output, cli.output.as_ref());
        self.config_path = cli.config.clone();
        self.update_path_with_root(&root);

        if let Commands::Build {
            clean,
            minify,
            rss,
            listing,
            ..
        } = &cli.command
        {
            self.build.clean |= *clean;
            Self::update_option(&mut self.build.minify, minify.as_ref());
            Self::update_option(&mut self.build.rss.enable, rss.as_ref());
            Self::update_option(&mut self.build.listing.enable, listing.as_ref());
        }

        if let Some(base_url) = cli.site_args().and_then(|site| site.base_url.as_ref()) {
            self.base.url = Some(base_url.clone());
        }
    }

    /// Update config option if CLI value is provided
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Update all paths relative to root directory and normalize to absolute paths
    pub fn update_path_with_root(&mut self, root: &Path) {
        let root = Self::normalize_path(root);
        self.set_root(&root);

        self.config_path = Self::normalize_path(&root.join(&self.config_path));
        self.build.content = Self::normalize_path(&root.join(&self.build.content));
        self.build.output = Self::normalize_path(&root.join(&self.build.output));
        self.build.listing.source = Self::normalize_path(&root.join(&self.build.listing.source));
        self.gallery.path = Self::normalize_path(&root.join(&self.gallery.path));
    }

    /// Fill `[base].url` from the root's CNAME file when it is not set.
    ///
    /// Only the first line is used; any scheme and surrounding slashes are
    /// stripped and `https://` is prefixed.
    pub fn resolve_url_from_cname(&mut self) {
        if self.base.url.is_some() {
            return;
        }
        let Ok(content) = fs::read_to_string(self.get_root().join(CNAME_FILE)) else {
            return;
        };
        if let Some(domain) = parse_cname(&content) {
            self.base.url = Some(format!("https://{domain}"));
        }
    }

    /// Normalize a path to absolute, using canonicalize if the path exists
    fn normalize_path(path: &Path) -> PathBuf {
        path.canonicalize().unwrap_or_else(|_| {
            // For non-existent paths, manually make them absolute
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                std::env::current_dir()
                    .map(|cwd| cwd.join(path))
                    .unwrap_or_else(|_| path.to_path_buf())
            }
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if let Some(base_url) = &self.base.url
            && !(base_url.starts_with("http://") || base_url.starts_with("https://"))
        {
            bail!(ConfigError::Validation(
                "[base.url] must start with http:// or https://".into()
            ));
        }

        if self.build.rss.path.as_os_str().is_empty() {
            bail!(ConfigError::Validation("[build.rss.path] must not be empty".into()));
        }

        if !self.build.listing.route.starts_with('/') {
            bail!(ConfigError::Validation(
                "[build.listing.route] must start with /".into()
            ));
        }

        Ok(())
    }
}

/// Extract a bare domain from CNAME file content.
fn parse_cname(content: &str) -> Option<String> {
    let line = content.lines().next()?.trim();
    let domain = line
        .trim_start_matches("https://")
        .trim_start_matches("http://")
        .trim_matches('/');
    (!domain.is_empty()).then(|| domain.to_owned())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::TempDir;

    #[test]
    fn test_from_str() {
        let config_str = r#"
            [base]
            title = "My Blog"
            author = "Test Author"
        "#;
        let config = SiteConfig::from_str(config_str).unwrap();

        assert_eq!(config.base.title, "My Blog");
        assert_eq!(config.base.author, "Test Author");
    }

    #[test]
    fn test_from_str_invalid_toml() {
        let result = SiteConfig::from_str("[base\ntitle = \"My Blog\"");
        assert!(result.is_err());
        assert!(result.unwrap_err().downcast_ref::<ConfigError>().is_some());
    }

    #[test]
    fn test_from_path_missing() {
        let err = SiteConfig::from_path(Path::new("/nonexistent/postsmith.toml")).unwrap_err();
        assert!(matches!(err.downcast_ref::<ConfigError>(), Some(ConfigError::Io(..))));
    }

    #[test]
    fn test_get_root_default() {
        let config = SiteConfig::default();
        assert_eq!(config.get_root(), Path::new("./"));
    }

    #[test]
    fn test_site_url() {
        let mut config = SiteConfig::default();
        assert_eq!(config.site_url(), "https://localhost");

        config.base.url = Some("https://ethan.dev/".into());
        assert_eq!(config.site_url(), "https://ethan.dev");
    }

    #[test]
    fn test_parse_cname() {
        assert_eq!(parse_cname("ethan.dev\n"), Some("ethan.dev".into()));
        assert_eq!(parse_cname("https://ethan.dev/\nwww.ethan.dev"), Some("ethan.dev".into()));
        assert_eq!(parse_cname("   \n"), None);
        assert_eq!(parse_cname(""), None);
    }

    #[test]
    fn test_resolve_url_from_cname() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("CNAME"), "blog.example.com\n").unwrap();

        let mut config = SiteConfig::default();
        config.set_root(dir.path());
        config.resolve_url_from_cname();
        assert_eq!(config.base.url.as_deref(), Some("https://blog.example.com"));

        // An explicit url wins
        let mut config = SiteConfig::default();
        config.set_root(dir.path());
        config.base.url = Some("https://other.dev".into());
        config.resolve_url_from_cname();
        assert_eq!(config.base.url.as_deref(), Some("https://other.dev"));
    }

    #[test]
    fn test_update_with_cli() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().to_str().unwrap();
        let cli = Cli::parse_from([
            "postsmith", "-r", root, "-o", "dist", "build", "--minify", "--rss=false",
            "--base-url", "https://ci.example.com",
        ]);

        let mut config = SiteConfig::default();
        config.update_with_cli(&cli);

        let root = dir.path().canonicalize().unwrap();
        assert_eq!(config.get_root(), root);
        assert_eq!(config.build.output, root.join("dist"));
        assert_eq!(config.build.content, root.join("posts"));
        assert_eq!(config.config_path, root.join("postsmith.toml"));
        assert!(config.build.minify);
        assert!(!config.build.rss.enable);
        assert!(config.build.listing.enable);
        assert_eq!(config.base.url.as_deref(), Some("https://ci.example.com"));
        assert_eq!(config.rss_path(), root.join("dist/rss.xml"));
    }

    #[test]
    fn test_validate_url_scheme() {
        let mut config = SiteConfig::default();
        assert!(config.validate().is_ok());

        config.base.url = Some("ethan.dev".into());
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("[base.url]"));
    }

    #[test]
    fn test_validate_listing_route() {
        let mut config = SiteConfig::default();
        config.build.listing.route = "utilities".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_full_config_all_sections() {
        let config = r#"
            [base]
            title = "My Blog"
            author = "Alice"
            url = "https://myblog.com"
            language = "en-GB"

            [build]
            content = "articles"
            output = "dist"
            minify = true

            [build.head]
            icon = "/favicon.png"

            [build.rss]
            path = "feed.xml"

            [build.listing]
            route = "/tools"

            [gallery]
            path = "photos.json"
        "#;
        let config: SiteConfig = toml::from_str(config).unwrap();

        assert_eq!(config.base.title, "My Blog");
        assert_eq!(config.build.content, PathBuf::from("articles"));
        assert_eq!(config.build.head.icon.as_deref(), Some("/favicon.png"));
        assert_eq!(config.build.rss.path, PathBuf::from("feed.xml"));
        assert_eq!(config.build.listing.route, "/tools");
        assert_eq!(config.gallery.path, PathBuf::from("photos.json"));
    }

    #[test]
    fn test_unknown_top_level_field_rejection() {
        let config = r#"
            [unknown_section]
            field = "value"
        "#;
        let result: Result<SiteConfig, _> = toml::from_str(config);
        assert!(result.is_err());
    }
}
