//! `[gallery]` section configuration.
//!
//! Location of the gallery JSON array consumed by the album page.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// `[gallery]` section in postsmith.toml.
///
/// # Example
/// ```toml
/// [gallery]
/// path = "images/gallery.json"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct GalleryConfig {
    /// Gallery JSON file, relative to the root.
    #[serde(default = "defaults::gallery::path")]
    #[educe(Default = defaults::gallery::path())]
    pub path: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::super::SiteConfig;
    use std::path::PathBuf;

    #[test]
    fn test_gallery_config_default() {
        let config: SiteConfig = toml::from_str("").unwrap();
        assert_eq!(config.gallery.path, PathBuf::from("images/gallery.json"));
    }

    #[test]
    fn test_gallery_config_custom() {
        let config: SiteConfig = toml::from_str("[gallery]\npath = \"album/photos.json\"").unwrap();
        assert_eq!(config.gallery.path, PathBuf::from("album/photos.json"));
    }
}
