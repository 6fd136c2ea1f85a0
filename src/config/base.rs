//! `[base]` section configuration.
//!
//! Contains basic site information like title, author, url and navigation.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[base]` section in postsmith.toml - basic site metadata.
///
/// # Example
/// ```toml
/// [base]
/// title = "ethan"
/// author = "Ethan Steininger"
/// url = "https://ethan.dev"
///
/// [[base.nav]]
/// label = "Articles"
/// href = "/articles"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct BaseConfig {
    /// Site name, used as the `<title>` prefix.
    #[serde(default = "defaults::base::title")]
    #[educe(Default = defaults::base::title())]
    pub title: String,

    /// Author name for meta tags and JSON-LD.
    #[serde(default = "defaults::base::author")]
    #[educe(Default = defaults::base::author())]
    pub author: String,

    /// Site description, used by the feed channel when `[build.rss]` has none.
    #[serde(default)]
    pub description: String,

    /// Absolute site URL for canonical links and the feed.
    /// Falls back to the `CNAME` file, then `https://localhost`.
    #[serde(default = "defaults::base::url")]
    #[educe(Default = defaults::base::url())]
    pub url: Option<String>,

    /// BCP 47 language code (e.g., "en-US").
    #[serde(default = "defaults::base::language")]
    #[educe(Default = defaults::base::language())]
    pub language: String,

    /// Footer text shown on every page.
    #[serde(default = "defaults::base::footer")]
    #[educe(Default = defaults::base::footer())]
    pub footer: String,

    /// Navigation entries, in display order.
    #[serde(default = "defaults::base::nav")]
    #[educe(Default = defaults::base::nav())]
    pub nav: Vec<NavLink>,
}

/// One navigation entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NavLink {
    pub label: String,
    pub href: String,
}

impl NavLink {
    pub fn new(label: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            href: href.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::SiteConfig;
    use super::NavLink;

    #[test]
    fn test_base_config_full() {
        let config = r#"
            [base]
            title = "KawaYww"
            author = "Kawa"
            description = "KawaYww's Blog"
            url = "https://kawayww.com"
            language = "zh-Hans"
            footer = "2025 KawaYww"
        "#;
        let config: SiteConfig = toml::from_str(config).unwrap();

        assert_eq!(config.base.title, "KawaYww");
        assert_eq!(config.base.author, "Kawa");
        assert_eq!(config.base.description, "KawaYww's Blog");
        assert_eq!(config.base.url, Some("https://kawayww.com".to_string()));
        assert_eq!(config.base.language, "zh-Hans");
        assert_eq!(config.base.footer, "2025 KawaYww");
    }

    #[test]
    fn test_base_config_defaults() {
        let config: SiteConfig = toml::from_str("[base]").unwrap();

        assert_eq!(config.base.title, "ethan");
        assert_eq!(config.base.author, "Ethan Steininger");
        assert_eq!(config.base.language, "en-US");
        assert_eq!(config.base.url, None);
        assert_eq!(config.base.nav.len(), 4);
        assert_eq!(config.base.nav[3], NavLink::new("Utilities", "/utilities"));
    }

    #[test]
    fn test_base_config_custom_nav() {
        let config = r#"
            [[base.nav]]
            label = "Home"
            href = "/"

            [[base.nav]]
            label = "Posts"
            href = "/posts"
        "#;
        let config: SiteConfig = toml::from_str(config).unwrap();

        assert_eq!(
            config.base.nav,
            vec![NavLink::new("Home", "/"), NavLink::new("Posts", "/posts")]
        );
    }

    #[test]
    fn test_unknown_field_rejection() {
        let config = r#"
            [base]
            title = "Test"
            unknown_field = "should_fail"
        "#;
        let result: Result<SiteConfig, _> = toml::from_str(config);

        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("unknown field"));
    }

    #[test]
    fn test_base_config_unicode() {
        let config = r#"
            [base]
            title = "My Blog 🚀"
            author = "René"
        "#;
        let config: SiteConfig = toml::from_str(config).unwrap();

        assert_eq!(config.base.title, "My Blog 🚀");
        assert_eq!(config.base.author, "René");
    }
}
