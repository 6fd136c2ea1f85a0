//! Source and page document models.
//!
//! ```text
//! posts/hello.md ──► SourceDocument ──► PageDocument ──► <output>/hello/index.html
//!                    (slug, metadata,    (title, dates,
//!                     markdown body)      canonical, html)
//! ```

use super::frontmatter::{Metadata, is_unterminated, parse_frontmatter};
use super::markdown::markdown_to_html;
use crate::utils::date::DocDate;
use anyhow::{Context, Result, anyhow};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Title used when a document has no `title` key.
pub const UNTITLED: &str = "Untitled";

// ============================================================================
// Source Document
// ============================================================================

/// One markdown file, parsed once per run and never written back.
#[derive(Debug, Clone)]
pub struct SourceDocument {
    /// File name without extension
    pub slug: String,
    pub metadata: Metadata,
    /// Markdown after the frontmatter block
    pub body: String,
    /// Opened a frontmatter block without closing it
    pub unterminated_frontmatter: bool,
}

impl SourceDocument {
    /// Read and parse a document from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let slug = slug_from_path(path)?;
        Ok(Self::parse(slug, &raw))
    }

    /// Parse already-loaded text.
    pub fn parse(slug: impl Into<String>, raw: &str) -> Self {
        let (metadata, body) = parse_frontmatter(raw);
        Self {
            slug: slug.into(),
            metadata,
            body: body.to_owned(),
            unterminated_frontmatter: is_unterminated(raw),
        }
    }

    /// Documents whose slug starts with `_` are templates, not content.
    pub fn is_template(&self) -> bool {
        is_template_slug(&self.slug)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).map(String::as_str)
    }

    pub fn date(&self) -> DocDate {
        DocDate::new(self.get("date").unwrap_or_default())
    }
}

/// Derive the slug (file stem) from a path.
pub fn slug_from_path(path: &Path) -> Result<String> {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .map(str::to_owned)
        .ok_or_else(|| anyhow!("Invalid file name: {}", path.display()))
}

#[inline]
pub fn is_template_slug(slug: &str) -> bool {
    slug.starts_with('_')
}

// ============================================================================
// Page Document
// ============================================================================

/// Everything the page assembler needs for one article.
#[derive(Debug, Clone)]
pub struct PageDocument {
    pub slug: String,
    pub title: String,
    pub date: DocDate,
    pub description: String,
    pub canonical_url: String,
    /// Rendered markdown body
    pub body_html: String,
}

impl PageDocument {
    /// Transform a source document, resolving its canonical URL against `site_url`.
    pub fn from_source(doc: &SourceDocument, site_url: &str) -> Self {
        Self {
            slug: doc.slug.clone(),
            title: doc.get("title").unwrap_or(UNTITLED).to_owned(),
            date: doc.date(),
            description: doc.get("description").unwrap_or_default().to_owned(),
            canonical_url: page_url(site_url, &doc.slug),
            body_html: markdown_to_html(&doc.body),
        }
    }
}

/// Absolute URL of the page for `slug`.
pub fn page_url(site_url: &str, slug: &str) -> String {
    format!("{}/{slug}", site_url.trim_end_matches('/'))
}

/// Output file for `slug`: `<output>/<slug>/index.html`.
pub fn page_output_path(output: &Path, slug: &str) -> PathBuf {
    output.join(slug).join("index.html")
}
