//! Gallery JSON file.
//!
//! The published album page reads a top-level JSON array of image entries.
//! Entries are only ever appended; existing ones pass through untouched.

use crate::{config::SiteConfig, log, utils::date::parse_ymd};
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::{fs, io, path::Path};

/// One gallery image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalleryEntry {
    pub url: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lng: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_taken: Option<String>,
}

impl GalleryEntry {
    /// Coordinates are kept only when both are present.
    pub fn new(
        url: impl Into<String>,
        name: impl Into<String>,
        lat: Option<f64>,
        lng: Option<f64>,
        date_taken: Option<String>,
    ) -> Self {
        let (lat, lng) = match (lat, lng) {
            (Some(lat), Some(lng)) => (Some(lat), Some(lng)),
            _ => (None, None),
        };
        Self {
            url: url.into(),
            name: name.into(),
            lat,
            lng,
            date_taken,
        }
    }

    fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            bail!("gallery entry needs a non-empty url");
        }
        if let Some(lat) = self.lat
            && !(-90.0..=90.0).contains(&lat)
        {
            bail!("latitude {lat} is out of range");
        }
        if let Some(lng) = self.lng
            && !(-180.0..=180.0).contains(&lng)
        {
            bail!("longitude {lng} is out of range");
        }
        if let Some(date) = &self.date_taken
            && parse_ymd(date).is_none()
        {
            bail!("date taken `{date}` is not YYYY-MM-DD");
        }
        Ok(())
    }
}

/// Append `entry` to the gallery file configured in `[gallery]`.
pub fn add_to_gallery(config: &SiteConfig, entry: &GalleryEntry) -> Result<()> {
    let count = append_entry(&config.gallery.path, entry)?;
    log!("gallery"; "{} -> {} ({count} entries)", entry.url, config.gallery.path.display());
    Ok(())
}

/// Append `entry` to the JSON array at `path` and return the new length.
///
/// A missing file starts a new array; any other top-level value is an error.
pub fn append_entry(path: &Path, entry: &GalleryEntry) -> Result<usize> {
    entry.validate()?;

    let mut entries = match fs::read_to_string(path) {
        Ok(content) => parse_entries(&content)
            .with_context(|| format!("Invalid gallery file {}", path.display()))?,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            log!("gallery"; "creating {}", path.display());
            Vec::new()
        }
        Err(err) => {
            return Err(err).with_context(|| format!("Failed to read {}", path.display()));
        }
    };

    entries.push(serde_json::to_value(entry)?);

    let mut json = serde_json::to_string_pretty(&entries)?;
    json.push('\n');
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;

    Ok(entries.len())
}

/// Existing entries are kept as raw values so unknown fields survive.
fn parse_entries(content: &str) -> Result<Vec<Value>> {
    match serde_json::from_str::<Value>(content)? {
        Value::Array(entries) => Ok(entries),
        _ => bail!("gallery file must contain a top-level array"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_append_to_existing_array() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("gallery.json");
        fs::write(&path, r#"[{"url": "https://cdn/a.jpg", "name": "A", "custom": 1}]"#).unwrap();

        let entry = GalleryEntry::new(
            "https://cdn/b.jpg",
            "Golden Gate",
            Some(37.8199),
            Some(-122.4783),
            Some("2024-05-04".into()),
        );
        assert_eq!(append_entry(&path, &entry).unwrap(), 2);

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.ends_with("]\n"));
        assert!(content.contains("\n  {\n    \"url\": \"https://cdn/a.jpg\""));

        let value: Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value[0]["custom"], 1);
        assert_eq!(value[1]["name"], "Golden Gate");
        assert_eq!(value[1]["lng"], -122.4783);
        assert_eq!(value[1]["date_taken"], "2024-05-04");
    }

    #[test]
    fn test_optional_fields_omitted() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("images/gallery.json");

        // Only one coordinate: neither is written
        let entry = GalleryEntry::new("https://cdn/c.jpg", "", Some(1.0), None, None);
        assert_eq!(append_entry(&path, &entry).unwrap(), 1);

        let value: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        let object = value[0].as_object().unwrap();
        let keys: Vec<_> = object.keys().map(String::as_str).collect();
        assert_eq!(keys, ["url", "name"]);
    }

    #[test]
    fn test_non_array_file_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("gallery.json");
        fs::write(&path, r#"{"images": []}"#).unwrap();

        let entry = GalleryEntry::new("https://cdn/a.jpg", "", None, None, None);
        let err = append_entry(&path, &entry).unwrap_err();
        assert!(format!("{err:#}").contains("top-level array"));
        // File untouched
        assert_eq!(fs::read_to_string(&path).unwrap(), r#"{"images": []}"#);
    }

    #[test]
    fn test_invalid_entries_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("gallery.json");

        let bad_date = GalleryEntry::new("https://cdn/a.jpg", "", None, None, Some("May 4".into()));
        assert!(append_entry(&path, &bad_date).is_err());

        let bad_lat = GalleryEntry::new("https://cdn/a.jpg", "", Some(91.0), Some(0.0), None);
        assert!(append_entry(&path, &bad_lat).is_err());

        let no_url = GalleryEntry::new(" ", "", None, None, None);
        assert!(append_entry(&path, &no_url).is_err());

        assert!(!path.exists());
    }
}
