//! Document transformation for static site generation.
//!
//! - **frontmatter**: split `---` metadata from the markdown body
//! - **markdown**: ordered regex passes producing an HTML fragment
//! - **meta**: source/page document models, slugs and output paths
//!
//! # Flow
//!
//! ```text
//! collect_source_files() ──► SourceDocument::load() ──► PageDocument::from_source()
//!          │                        │                            │
//!          ▼                        ▼                            ▼
//!      *.md paths           metadata + body               html fragment
//! ```

pub mod frontmatter;
pub mod markdown;
pub mod meta;

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Extension of source documents.
const SOURCE_EXTENSION: &str = "md";

/// Files to ignore during directory traversal
const IGNORED_FILES: &[&str] = &[".DS_Store"];

/// Collect the source documents directly inside `dir`, sorted by file name.
///
/// The scan is not recursive. A missing directory yields no files.
pub fn collect_source_files(dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            let name = e.file_name().to_str().unwrap_or_default();
            !IGNORED_FILES.contains(&name)
        })
        .map(walkdir::DirEntry::into_path)
        .filter(|p| p.extension().is_some_and(|ext| ext == SOURCE_EXTENSION))
        .collect()
}
