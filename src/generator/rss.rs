//! rss feed generation.
//!
//! Scans the source documents independently of the page build, sorts them
//! newest first and writes one RSS 2.0 channel.

use crate::{
    compiler::{
        collect_source_files,
        meta::{SourceDocument, page_url},
    },
    config::SiteConfig,
    log,
    utils::date::{DocDate, now_rfc2822, to_rfc2822},
};
use super::write_output;
use anyhow::{Result, anyhow};
use rss::{ChannelBuilder, GuidBuilder, ItemBuilder, validation::Validate};
use std::path::PathBuf;

// ============================================================================
// Public API
// ============================================================================

/// Build rss feed if enabled in config.
///
/// Returns the written path, or `None` when the feed is disabled.
pub fn build_rss(config: &SiteConfig) -> Result<Option<PathBuf>> {
    if !config.build.rss.enable {
        return Ok(None);
    }
    RssFeed::build(config).write().map(Some)
}

// ============================================================================
// RssFeed Implementation
// ============================================================================

/// One feed entry, derived from a source document's frontmatter.
#[derive(Debug, Clone)]
struct FeedEntry {
    slug: String,
    title: String,
    date: DocDate,
    description: String,
}

impl FeedEntry {
    fn from_source(doc: &SourceDocument) -> Self {
        Self {
            slug: doc.slug.clone(),
            title: doc.get("title").unwrap_or(&doc.slug).to_owned(),
            date: doc.date(),
            description: doc.get("description").unwrap_or_default().to_owned(),
        }
    }

    fn into_item(self, site_url: &str) -> rss::Item {
        let link = page_url(site_url, &self.slug);
        ItemBuilder::default()
            .title(self.title)
            .link(Some(link.clone()))
            .guid(GuidBuilder::default().permalink(true).value(link).build())
            .pub_date(self.date.rfc2822())
            .description(self.description)
            .build()
    }
}

/// rss feed builder
struct RssFeed<'a> {
    config: &'a SiteConfig,
    /// Newest first; undated entries last, ties in file-name order
    entries: Vec<FeedEntry>,
}

impl<'a> RssFeed<'a> {
    /// Scan the content directory. Templates and unreadable files are skipped.
    fn build(config: &'a SiteConfig) -> Self {
        let entries = collect_source_files(&config.build.content)
            .iter()
            .filter_map(|path| match SourceDocument::load(path) {
                Ok(doc) => Some(doc),
                Err(err) => {
                    log!("skip"; "rss: {err:#}");
                    None
                }
            })
            .filter(|doc| !doc.is_template())
            .map(|doc| FeedEntry::from_source(&doc))
            .collect();
        Self::from_entries(config, entries)
    }

    fn from_entries(config: &'a SiteConfig, mut entries: Vec<FeedEntry>) -> Self {
        // Stable, so equal dates keep scan order
        entries.sort_by(|a, b| b.date.cmp_chronological(&a.date));
        Self { config, entries }
    }

    /// Latest valid item date, or now when no item has one.
    fn last_build_date(&self) -> String {
        self.entries
            .iter()
            .filter_map(|entry| entry.date.parsed())
            .max()
            .map_or_else(now_rfc2822, to_rfc2822)
    }

    /// Generate rss xml string
    fn into_xml(self) -> Result<String> {
        let base = &self.config.base;
        let rss = &self.config.build.rss;
        let site_url = self.config.site_url();
        let last_build_date = self.last_build_date();

        let title = rss
            .title
            .clone()
            .unwrap_or_else(|| format!("{} - articles", base.title));
        let description = if rss.description.is_empty() {
            base.description.clone()
        } else {
            rss.description.clone()
        };
        let items: Vec<_> = self
            .entries
            .into_iter()
            .map(|entry| entry.into_item(&site_url))
            .collect();

        let channel = ChannelBuilder::default()
            .title(title)
            .link(format!("{site_url}{}", rss.link_path))
            .description(description)
            .language(base.language.clone())
            .last_build_date(last_build_date)
            .generator("postsmith".to_string())
            .items(items)
            .build();

        channel
            .validate()
            .map_err(|e| anyhow!("rss validation failed: {e}"))?;
        Ok(channel.to_string())
    }

    /// Write rss feed to file
    fn write(self) -> Result<PathBuf> {
        let rss_path = self.config.rss_path();
        let count = self.entries.len();
        let xml = self.into_xml()?;
        write_output(&rss_path, xml.as_bytes())?;

        log!("rss"; "{} ({count} items)", rss_path.display());
        Ok(rss_path)
    }
}

// ============================================================================
// Tests
// ============================================================================
