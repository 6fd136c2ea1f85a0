//! Markdown to HTML rewriting.
//!
//! The body is rewritten by an ordered list of regex passes. Each pass is a
//! pure `&str -> String` function, so every pass can be tested on its own and
//! the order stays visible in one place ([`PASSES`]).
//!
//! # Pass order
//!
//! ```text
//! fenced code ──► split into text and code segments
//!                      │
//!   text segment ──► images ──► links ──► headers ──► bold ──► italic
//!                                                                │
//!        paragraphs ◄── list wrap ◄── list items ◄── inline code ◄┘
//!            │
//!            └──► joined with the rendered code blocks ──► fragment
//! ```
//!
//! Fenced code runs first. The other passes only ever see the text between
//! code blocks, so no pattern can reach into code contents or pair a
//! delimiter across a block.
//!
//! # Heading levels
//!
//! `#` renders as `<h2>`; `##` and `###` both render as `<h3>`. The page
//! title already owns `<h1>`, and the second and third levels collapse on
//! purpose.

use crate::utils::escape::escape_code;
use regex::{Captures, Regex};
use std::sync::LazyLock;

/// Inline style applied to every image.
const IMAGE_STYLE: &str = "max-width: 100%; height: auto; margin: 1rem 0;";

/// A rewrite over one text segment.
pub type Pass = fn(&str) -> String;

/// Passes applied to every text segment, in order.
pub const PASSES: &[Pass] = &[
    images,
    links,
    headers,
    bold,
    italic,
    inline_code,
    list_items,
    list_wrap,
    paragraphs,
];

// ============================================================================
// Public API
// ============================================================================

/// Convert a markdown body to an HTML fragment.
pub fn markdown_to_html(markdown: &str) -> String {
    let markdown = markdown.replace("\r\n", "\n");

    split_fenced_code(&markdown)
        .into_iter()
        .map(|segment| match segment {
            Segment::Text(text) => PASSES.iter().fold(text.to_owned(), |text, pass| pass(&text)),
            Segment::Code(block) => block,
        })
        .filter(|html| !html.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

// ============================================================================
// Fenced code
// ============================================================================

/// A piece of the body: markdown text, or a fenced block already rendered.
#[derive(Debug, PartialEq, Eq)]
pub enum Segment<'a> {
    Text(&'a str),
    Code(String),
}

static RE_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```([\w#+-]*)\n(.*?)(?:```|\z)").unwrap());

/// Render fenced code blocks and split the body around them.
///
/// A fence without a closing marker runs to the end of the document.
pub fn split_fenced_code(text: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut last = 0;
    for caps in RE_FENCE.captures_iter(text) {
        let Some(fence) = caps.get(0) else { continue };
        segments.push(Segment::Text(&text[last..fence.start()]));
        segments.push(Segment::Code(format!(
            r#"<pre><code class="language-{}">{}</code></pre>"#,
            caps[1].trim(),
            escape_code(&caps[2])
        )));
        last = fence.end();
    }
    segments.push(Segment::Text(&text[last..]));
    segments
}

// ============================================================================
// Inline passes
// ============================================================================

/// `![alt](url)` to `<img>`. Runs before links so `[alt](url)` is consumed.
pub fn images(text: &str) -> String {
    static RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"!\[([^\]]*)\]\(([^)]+)\)").unwrap());

    RE.replace_all(
        text,
        format!(r#"<img src="${{2}}" alt="${{1}}" style="{IMAGE_STYLE}">"#).as_str(),
    )
    .into_owned()
}

/// `[text](http(s)://...)` to an anchor opened in a new tab.
///
/// Other schemes stay literal text.
pub fn links(text: &str) -> String {
    static RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\((https?://[^\s)]+)\)").unwrap());

    RE.replace_all(
        text,
        r#"<a href="${2}" target="_blank" rel="noopener noreferrer">${1}</a>"#,
    )
    .into_owned()
}

/// `#` to `<h2>`, `##` and `###` to `<h3>`.
pub fn headers(text: &str) -> String {
    static RE_H3: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^### (.+)$").unwrap());
    static RE_H2: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^## (.+)$").unwrap());
    static RE_H1: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^# (.+)$").unwrap());

    let text = RE_H3.replace_all(text, "<h3>${1}</h3>");
    let text = RE_H2.replace_all(&text, "<h3>${1}</h3>");
    RE_H1.replace_all(&text, "<h2>${1}</h2>").into_owned()
}

/// `**text**` to `<strong>`.
pub fn bold(text: &str) -> String {
    static RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*(.+?)\*\*").unwrap());
    RE.replace_all(text, "<strong>${1}</strong>").into_owned()
}

/// `*text*` to `<em>`. Runs after [`bold`].
pub fn italic(text: &str) -> String {
    static RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*(.+?)\*").unwrap());
    RE.replace_all(text, "<em>${1}</em>").into_owned()
}

/// `` `code` `` to `<code>` with escaped contents.
pub fn inline_code(text: &str) -> String {
    static RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`([^`]+?)`").unwrap());
    RE.replace_all(text, |caps: &Captures| {
        format!("<code>{}</code>", escape_code(&caps[1]))
    })
    .into_owned()
}

// ============================================================================
// Block passes
// ============================================================================

/// `* `, `- ` and `1. ` lines to `<li>`. List type is not preserved.
pub fn list_items(text: &str) -> String {
    static RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"(?m)^(?:[*-]|\d+\.) (.+)$").unwrap());
    RE.replace_all(text, "<li>${1}</li>").into_owned()
}

/// Wrap each run of line-adjacent `<li>` elements in one `<ul>`.
///
/// The line break after the last item stays outside the list, so a blank
/// line after the run still separates the next paragraph.
pub fn list_wrap(text: &str) -> String {
    static RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"<li>.*</li>(?:\n<li>.*</li>)*").unwrap());
    RE.replace_all(text, "<ul>${0}</ul>").into_owned()
}

/// Split on blank lines and wrap chunks that don't start with a tag in `<p>`.
pub fn paragraphs(text: &str) -> String {
    text.split("\n\n")
        .map(str::trim)
        .filter(|chunk| !chunk.is_empty())
        .map(|chunk| {
            if chunk.starts_with('<') {
                chunk.to_owned()
            } else {
                format!("<p>{chunk}</p>")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_body() {
        assert_eq!(markdown_to_html(""), "");
        assert_eq!(markdown_to_html("\n\n\n"), "");
    }

    #[test]
    fn test_pass_order_bold_before_italic() {
        assert_eq!(
            markdown_to_html("**a** *b*"),
            "<p><strong>a</strong> <em>b</em></p>"
        );
    }

    // ------------------------------------------------------------------------
    // Fenced code
    // ------------------------------------------------------------------------

    #[test]
    fn test_fenced_code_with_language() {
        let html = markdown_to_html("```rust\nfn main() { a < b && c > d }\n```");
        assert_eq!(
            html,
            "<pre><code class=\"language-rust\">fn main() { a &lt; b &amp;&amp; c &gt; d }\n</code></pre>"
        );
    }

    #[test]
    fn test_fenced_code_without_language() {
        let html = markdown_to_html("```\nplain\n```");
        assert_eq!(html, "<pre><code class=\"language-\">plain\n</code></pre>");
    }

    #[test]
    fn test_fenced_code_is_not_reprocessed() {
        let html = markdown_to_html("```md\n`![a](b.png)`\n**bold** [x](https://x.dev)\n# not a header\n- not a list\n```");

        assert!(!html.contains("<img"));
        assert!(!html.contains("<strong>"));
        assert!(!html.contains("<a "));
        assert!(!html.contains("<h2>"));
        assert!(!html.contains("<li>"));
        assert!(html.contains("`![a](b.png)`"));
    }

    #[test]
    fn test_fenced_code_escaped_once() {
        let html = markdown_to_html("```html\n<p>&amp;</p>\n```");
        assert!(html.contains("&lt;p&gt;&amp;amp;&lt;/p&gt;"));
        assert!(!html.contains("&amp;lt;"));
    }

    #[test]
    fn test_fenced_code_keeps_blank_lines() {
        let html = markdown_to_html("```\none\n\ntwo\n```");
        assert_eq!(html, "<pre><code class=\"language-\">one\n\ntwo\n</code></pre>");
    }

    #[test]
    fn test_unterminated_fence_runs_to_end() {
        let html = markdown_to_html("intro\n\n```py\nx = 1\n\n# still code");
        assert_eq!(
            html,
            "<p>intro</p>\n<pre><code class=\"language-py\">x = 1\n\n# still code</code></pre>"
        );
    }

    #[test]
    fn test_stray_backticks_around_fenced_block() {
        let html = markdown_to_html("Type a ` to start.\n\n```sh\necho hi\n```\n\nThen another ` here.");
        assert_eq!(
            html,
            concat!(
                "<p>Type a ` to start.</p>\n",
                "<pre><code class=\"language-sh\">echo hi\n</code></pre>\n",
                "<p>Then another ` here.</p>"
            )
        );
        assert!(!html.contains('\u{E000}'));
    }

    #[test]
    fn test_inline_delimiters_do_not_pair_across_blocks() {
        let html = markdown_to_html("a **b\n\n```\nx\n```\n\nc** [d\n```\ny\n```\n](https://e.dev)");
        assert!(!html.contains("<strong>"));
        assert!(!html.contains("<a "));
        assert_eq!(html.matches("<pre>").count(), 2);
    }

    #[test]
    fn test_split_fenced_code_segments() {
        let segments = split_fenced_code("a\n```\nx\n```\nb");
        assert_eq!(
            segments,
            [
                Segment::Text("a\n"),
                Segment::Code("<pre><code class=\"language-\">x\n</code></pre>".into()),
                Segment::Text("\nb"),
            ]
        );
    }

    // ------------------------------------------------------------------------
    // Inline passes
    // ------------------------------------------------------------------------

    #[test]
    fn test_image() {
        assert_eq!(
            images("![a cat](/img/cat.png)"),
            format!(r#"<img src="/img/cat.png" alt="a cat" style="{IMAGE_STYLE}">"#)
        );
    }

    #[test]
    fn test_image_not_matched_as_link() {
        let html = markdown_to_html("![pic](https://cdn.example.com/p.jpg)");
        assert!(html.starts_with("<img src=\"https://cdn.example.com/p.jpg\""));
        assert!(!html.contains("<a "));
    }

    #[test]
    fn test_link_http_only() {
        assert_eq!(
            links("[site](https://example.com)"),
            r#"<a href="https://example.com" target="_blank" rel="noopener noreferrer">site</a>"#
        );
        assert_eq!(links("[mail](mailto:a@b.c)"), "[mail](mailto:a@b.c)");
        assert_eq!(links("[rel](/about)"), "[rel](/about)");
    }

    #[test]
    fn test_heading_collapse() {
        let html = headers("# A\n## B\n### C");
        assert_eq!(html, "<h2>A</h2>\n<h3>B</h3>\n<h3>C</h3>");
    }

    #[test]
    fn test_heading_requires_space() {
        assert_eq!(headers("#hashtag"), "#hashtag");
        assert_eq!(headers("#### four"), "#### four");
    }

    #[test]
    fn test_bold_then_italic() {
        let text = italic(&bold("**strong** and *soft*"));
        assert_eq!(text, "<strong>strong</strong> and <em>soft</em>");
    }

    #[test]
    fn test_inline_code_escaped() {
        assert_eq!(inline_code("use `Vec<T>` here"), "use <code>Vec&lt;T&gt;</code> here");
    }

    // ------------------------------------------------------------------------
    // Block passes
    // ------------------------------------------------------------------------

    #[test]
    fn test_list_items_markers() {
        assert_eq!(
            list_items("* star\n- dash\n12. number"),
            "<li>star</li>\n<li>dash</li>\n<li>number</li>"
        );
    }

    #[test]
    fn test_list_merge() {
        let html = markdown_to_html("Intro\n\n- one\n- two\n- three\n\nOutro");
        assert_eq!(html.matches("<ul>").count(), 1);
        assert_eq!(html.matches("<li>").count(), 3);
        assert_eq!(
            html,
            "<p>Intro</p>\n<ul><li>one</li>\n<li>two</li>\n<li>three</li></ul>\n<p>Outro</p>"
        );
    }

    #[test]
    fn test_list_merge_without_surrounding_blank_lines() {
        let html = markdown_to_html("- a\n- b\n- c");
        assert_eq!(html, "<ul><li>a</li>\n<li>b</li>\n<li>c</li></ul>");
    }

    #[test]
    fn test_ordered_and_unordered_share_container() {
        let html = markdown_to_html("1. first\n- second");
        assert_eq!(html, "<ul><li>first</li>\n<li>second</li></ul>");
    }

    #[test]
    fn test_separate_runs_get_separate_lists() {
        let html = markdown_to_html("- a\n\n- b");
        assert_eq!(html.matches("<ul>").count(), 2);
    }

    #[test]
    fn test_paragraphs() {
        assert_eq!(
            paragraphs("first\nline\n\n\n<h2>T</h2>\n\n  second  "),
            "<p>first\nline</p>\n<h2>T</h2>\n<p>second</p>"
        );
    }

    #[test]
    fn test_full_document() {
        let md = "# Title\n\nSome **bold** text with a [link](https://a.dev).\n\n```sh\necho \"<hi>\"\n```\n\n## Part\n\n* x\n* y";
        let html = markdown_to_html(md);
        assert_eq!(
            html,
            concat!(
                "<h2>Title</h2>\n",
                "<p>Some <strong>bold</strong> text with a ",
                "<a href=\"https://a.dev\" target=\"_blank\" rel=\"noopener noreferrer\">link</a>.</p>\n",
                "<pre><code class=\"language-sh\">echo \"&lt;hi&gt;\"\n</code></pre>\n",
                "<h3>Part</h3>\n",
                "<ul><li>x</li>\n<li>y</li></ul>"
            )
        );
    }

    #[test]
    fn test_crlf_input() {
        assert_eq!(markdown_to_html("# A\r\n\r\ntext\r\n"), "<h2>A</h2>\n<p>text</p>");
    }
}
