//! Frontmatter splitting.
//!
//! A document may start with a metadata block fenced by lines that contain
//! only `---`:
//!
//! ```text
//! ---
//! title: "Hello"
//! date: 2024-03-01
//! ---
//! Body starts here.
//! ```
//!
//! Without such a block (or if the closing fence is missing) the whole text is
//! body and the metadata is empty. That is a valid document, not an error.

use std::collections::HashMap;

/// Parsed frontmatter keys. Unrecognized keys pass through unused.
pub type Metadata = HashMap<String, String>;

/// Fence line delimiting the metadata block.
const FENCE: &str = "---";

/// Split a raw document into its metadata map and body.
pub fn parse_frontmatter(content: &str) -> (Metadata, &str) {
    match split_block(content) {
        Some((block, body)) => (parse_block(block), body),
        None => (Metadata::new(), content),
    }
}

/// Whether `content` opens a metadata block that never closes.
///
/// Such a document still parses (as body only); callers may want to warn.
pub fn is_unterminated(content: &str) -> bool {
    content
        .split_inclusive('\n')
        .next()
        .is_some_and(|first| is_fence(first) && first.ends_with('\n'))
        && split_block(content).is_none()
}

/// Locate the fenced block at the very start of `content`.
///
/// Returns `(block, body)` where `block` excludes both fences and `body` is
/// everything after the closing fence's line break.
fn split_block(content: &str) -> Option<(&str, &str)> {
    let mut lines = content.split_inclusive('\n');

    let first = lines.next()?;
    if !is_fence(first) || !first.ends_with('\n') {
        return None;
    }

    let block_start = first.len();
    let mut offset = block_start;
    for line in lines {
        if is_fence(line) {
            let block = content[block_start..offset].trim_end_matches(['\n', '\r']);
            return Some((block, &content[offset + line.len()..]));
        }
        offset += line.len();
    }

    // Unterminated: degrade to "no metadata"
    None
}

#[inline]
fn is_fence(line: &str) -> bool {
    line.trim_end_matches(['\n', '\r']) == FENCE
}

/// Parse `key: value` lines. Lines without `:` are skipped, later keys win.
fn parse_block(block: &str) -> Metadata {
    block
        .lines()
        .filter_map(|line| line.split_once(':'))
        .map(|(key, value)| (key.trim().to_owned(), unquote(value.trim()).to_owned()))
        .collect()
}

/// Strip one layer of matching single or double quotes.
fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2
            && let Some(inner) = value
                .strip_prefix(quote)
                .and_then(|v| v.strip_suffix(quote))
        {
            return inner;
        }
    }
    value
}
