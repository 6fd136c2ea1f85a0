//! Site building orchestration.
//!
//! # Architecture
//!
//! ```text
//! build_all()
//!     │
//!     ├── prepare_output() ──► remove output dir when `[build].clean`
//!     │
//!     └── rayon::join
//!             ├── build_site() ──► par_iter over source documents
//!             │                    SourceDocument → PageDocument → assemble → write
//!             ├── build_listing()
//!             └── build_rss()
//! ```
//!
//! A failing document never stops the others. Outcomes are collected first
//! and reported in file-name order.

use crate::{
    compiler::{
        collect_source_files,
        meta::{PageDocument, SourceDocument, page_output_path},
    },
    config::SiteConfig,
    generator::{article, listing::build_listing, rss::build_rss, write_output},
    log,
    utils::minify::minify_html,
};
use anyhow::{Context, Result, bail};
use rayon::prelude::*;
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Per-run document counts.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BuildReport {
    /// Source documents found
    pub processed: usize,
    /// Article pages written
    pub produced: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// What happened to one source document.
enum PageOutcome {
    Written {
        path: PathBuf,
        unterminated_frontmatter: bool,
    },
    Skipped(&'static str),
    Failed(anyhow::Error),
}

// ============================================================================
// Public API
// ============================================================================

/// Build every article page, the listing page and the rss feed in parallel.
///
/// Fails after everything has been attempted if any output could not be
/// produced.
pub fn build_all(config: &SiteConfig) -> Result<BuildReport> {
    prepare_output(&config.build.output, config.build.clean)?;

    let (site_result, (listing_result, rss_result)) = rayon::join(
        || build_site(config),
        || rayon::join(|| build_listing(config), || build_rss(config)),
    );

    let report = site_result?;
    let listing_result = listing_result.context("listing page failed");
    let rss_result = rss_result.context("rss feed failed");
    if let Err(err) = &listing_result {
        log!("error"; "{err:#}");
    }
    if let Err(err) = &rss_result {
        log!("error"; "{err:#}");
    }

    if report.failed > 0 {
        bail!("{} of {} documents failed", report.failed, report.processed);
    }
    listing_result?;
    rss_result?;
    Ok(report)
}

/// Transform and write every source document.
///
/// Templates are skipped. Per-document failures are logged and counted, not
/// returned.
pub fn build_site(config: &SiteConfig) -> Result<BuildReport> {
    let content = &config.build.content;
    let files = collect_source_files(content);
    if files.is_empty() {
        log!("warn"; "no documents found in {}", content.display());
    }

    let site_url = config.site_url();
    let outcomes: Vec<_> = files
        .par_iter()
        .map(|path| build_page(path, config, &site_url))
        .collect();

    let mut report = BuildReport {
        processed: files.len(),
        ..BuildReport::default()
    };
    for (path, outcome) in files.iter().zip(outcomes) {
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy())
            .unwrap_or_default();
        match outcome {
            PageOutcome::Written {
                path,
                unterminated_frontmatter,
            } => {
                if unterminated_frontmatter {
                    log!("warn"; "{name}: unterminated frontmatter, whole file used as body");
                }
                let shown = path.strip_prefix(&config.build.output).unwrap_or(&path);
                log!("page"; "{name} -> {}", shown.display());
                report.produced += 1;
            }
            PageOutcome::Skipped(reason) => {
                log!("skip"; "{name}: {reason}");
                report.skipped += 1;
            }
            PageOutcome::Failed(err) => {
                log!("error"; "{name}: {err:#}");
                report.failed += 1;
            }
        }
    }

    match (report.skipped, report.failed) {
        (0, 0) => log!("build"; "processed {}, produced {}", report.processed, report.produced),
        (skipped, failed) => log!(
            "build";
            "processed {}, produced {} ({skipped} skipped, {failed} failed)",
            report.processed,
            report.produced
        ),
    }
    Ok(report)
}

// ============================================================================
// Helper Functions
// ============================================================================

fn build_page(path: &Path, config: &SiteConfig, site_url: &str) -> PageOutcome {
    let doc = match SourceDocument::load(path) {
        Ok(doc) => doc,
        Err(err) => return PageOutcome::Failed(err),
    };
    if doc.is_template() {
        return PageOutcome::Skipped("template");
    }

    let page = PageDocument::from_source(&doc, site_url);
    let html = article::assemble(&page, config);
    let out = page_output_path(&config.build.output, &page.slug);

    match write_output(&out, &minify_html(html.as_bytes(), config)) {
        Ok(()) => PageOutcome::Written {
            path: out,
            unterminated_frontmatter: doc.unterminated_frontmatter,
        },
        Err(err) => PageOutcome::Failed(err.into()),
    }
}

/// Ensure the output directory exists, clearing it first when `clean` is set.
fn prepare_output(output: &Path, clean: bool) -> Result<()> {
    if clean && output.exists() {
        fs::remove_dir_all(output).with_context(|| {
            format!("Failed to clear output directory: {}", output.display())
        })?;
        log!("build"; "cleared {}", output.display());
    }
    fs::create_dir_all(output)
        .with_context(|| format!("Failed to create output directory: {}", output.display()))
}

// ============================================================================
// Tests
// ============================================================================
