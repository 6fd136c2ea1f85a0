//! Output generators: article pages, the listing page and the rss feed.

pub mod article;
mod error;
pub mod listing;
pub mod rss;
pub mod shell;

pub use error::BuildError;

use std::{fs, path::Path};

/// Write one fully rendered output file, creating parent directories.
pub fn write_output(path: &Path, content: &[u8]) -> Result<(), BuildError> {
    let write = || {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content)
    };
    write().map_err(|source| BuildError::OutputWrite {
        path: path.to_path_buf(),
        source,
    })
}
