//! `[build]` section configuration.
//!
//! Contains build settings including paths, minification, head elements,
//! the rss feed and the listing page.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ============================================================================
// Main BuildConfig
// ============================================================================

/// `[build]` section in postsmith.toml - build pipeline configuration.
///
/// # Example
/// ```toml
/// [build]
/// content = "posts"        # Source directory
/// output = "public"        # Output directory
/// minify = true            # Minify HTML
///
/// [build.rss]
/// enable = true
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Project root directory (usually set via CLI `--root`).
    #[serde(default = "defaults::build::root")]
    #[educe(Default = defaults::build::root())]
    pub root: Option<PathBuf>,

    /// Markdown source directory.
    #[serde(default = "defaults::build::content")]
    #[educe(Default = defaults::build::content())]
    pub content: PathBuf,

    /// Build output directory.
    #[serde(default = "defaults::build::output")]
    #[educe(Default = defaults::build::output())]
    pub output: PathBuf,

    /// Minify HTML output (removes whitespace).
    #[serde(default = "defaults::r#false")]
    #[educe(Default = false)]
    pub minify: bool,

    /// Remove the output directory before building.
    #[serde(default = "defaults::r#false")]
    #[educe(Default = false)]
    pub clean: bool,

    /// Navigation href marked active on article pages.
    #[serde(default = "defaults::build::articles_route")]
    #[educe(Default = defaults::build::articles_route())]
    pub articles_route: String,

    /// Shared `<head>` elements.
    #[serde(default)]
    pub head: HeadConfig,

    /// RSS feed generation settings.
    #[serde(default)]
    pub rss: RssConfig,

    /// JSON-driven listing page settings.
    #[serde(default)]
    pub listing: ListingConfig,
}

// ============================================================================
// Sub-configurations
// ============================================================================

/// `[build.head]` section - links shared by every generated page.
///
/// Article pages additionally get `article_styles` and `icon`; the listing
/// page gets only the shared entries.
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct HeadConfig {
    /// Origins for `<link rel="preconnect">`.
    #[serde(default = "defaults::build::head::preconnect")]
    #[educe(Default = defaults::build::head::preconnect())]
    pub preconnect: Vec<String>,

    /// Origins preconnected with `crossorigin` (font files).
    #[serde(default = "defaults::build::head::preconnect_crossorigin")]
    #[educe(Default = defaults::build::head::preconnect_crossorigin())]
    pub preconnect_crossorigin: Vec<String>,

    /// Stylesheet hrefs on every page.
    #[serde(default = "defaults::build::head::styles")]
    #[educe(Default = defaults::build::head::styles())]
    pub styles: Vec<String>,

    /// Extra stylesheet hrefs on article pages.
    #[serde(default = "defaults::build::head::article_styles")]
    #[educe(Default = defaults::build::head::article_styles())]
    pub article_styles: Vec<String>,

    /// Favicon href for article pages.
    #[serde(default = "defaults::build::head::icon")]
    #[educe(Default = defaults::build::head::icon())]
    pub icon: Option<String>,
}

/// `[build.rss]` section - RSS feed generation configuration.
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct RssConfig {
    /// Enable RSS feed generation.
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub enable: bool,

    /// Output path for the feed, relative to the output directory.
    #[serde(default = "defaults::build::rss::path")]
    #[educe(Default = defaults::build::rss::path())]
    pub path: PathBuf,

    /// Channel title. Defaults to `"<base.title> - articles"`.
    #[serde(default)]
    pub title: Option<String>,

    /// Channel description.
    #[serde(default = "defaults::build::rss::description")]
    #[educe(Default = defaults::build::rss::description())]
    pub description: String,

    /// Channel link path, appended to the site URL.
    #[serde(default = "defaults::build::rss::link_path")]
    #[educe(Default = defaults::build::rss::link_path())]
    pub link_path: String,
}

/// `[build.listing]` section - JSON-driven listing page.
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct ListingConfig {
    /// Enable listing page generation.
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub enable: bool,

    /// JSON metadata file, relative to the root.
    #[serde(default = "defaults::build::listing::source")]
    #[educe(Default = defaults::build::listing::source())]
    pub source: PathBuf,

    /// URL path of the listing; cards link to `<route>/<slug>`.
    #[serde(default = "defaults::build::listing::route")]
    #[educe(Default = defaults::build::listing::route())]
    pub route: String,

    /// Output file, relative to the output directory.
    #[serde(default = "defaults::build::listing::output")]
    #[educe(Default = defaults::build::listing::output())]
    pub output: PathBuf,
}

// ============================================================================
// Tests
// ============================================================================
