//! Output-context escaping.
//!
//! Each output format gets its own function. They are not interchangeable:
//!
//! | Function                 | Context                                   |
//! |--------------------------|-------------------------------------------|
//! | [`escape_code`]          | contents of `<code>` (markdown code)      |
//! | [`escape_html`]          | HTML text and attribute values            |
//! | [`escape_json_for_script`] | serialized JSON inside `<script>`       |
//!
//! XML text in the feed is escaped by the `rss` writer itself.

use std::borrow::Cow;

/// Escape code contents: `&` first, then `<`, then `>`.
///
/// `&` goes first so the entities introduced by the later replacements
/// are not escaped a second time.
pub fn escape_code(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

/// Escape HTML special characters for text and quoted attribute values.
///
/// Uses `Cow` to avoid allocation when no escaping is needed.
#[inline]
pub fn escape_html(s: &str) -> Cow<'_, str> {
    // Fast path: check if escaping is needed
    if !s.contains(['<', '>', '&', '"', '\'']) {
        return Cow::Borrowed(s);
    }

    let mut result = String::with_capacity(s.len() + 8);
    for c in s.chars() {
        match c {
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '&' => result.push_str("&amp;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    Cow::Owned(result)
}

/// Make serialized JSON safe to embed in a `<script>` element.
///
/// Input must already be valid JSON (string escaping is serde_json's job).
/// `<`, `>` and `&` can only occur inside JSON strings, where their `\u`
/// forms are equivalent, so `</script>` can never close the element early.
pub fn escape_json_for_script(json: &str) -> String {
    let mut result = String::with_capacity(json.len());
    for c in json.chars() {
        match c {
            '<' => result.push_str("\\u003c"),
            '>' => result.push_str("\\u003e"),
            '&' => result.push_str("\\u0026"),
            _ => result.push(c),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_code_ampersand_first() {
        assert_eq!(escape_code("a && b"), "a &amp;&amp; b");
        assert_eq!(escape_code("<b>"), "&lt;b&gt;");
        // An existing entity is escaped exactly once
        assert_eq!(escape_code("&lt;"), "&amp;lt;");
    }

    #[test]
    fn test_escape_code_leaves_quotes() {
        assert_eq!(escape_code(r#"say "hi""#), r#"say "hi""#);
    }

    #[test]
    fn test_escape_html_borrowed_when_clean() {
        assert!(matches!(escape_html("plain text"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_escape_html_all_specials() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#x27;s&lt;/a&gt;"
        );
    }

    #[test]
    fn test_escape_json_for_script() {
        let json = serde_json::to_string(&serde_json::json!({ "t": "</script> & \"q\"" })).unwrap();
        let escaped = escape_json_for_script(&json);
        assert!(!escaped.contains("</script>"));
        assert!(escaped.contains("\\u003c/script\\u003e \\u0026 \\\"q\\\""));

        // Still parses back to the same value
        let value: serde_json::Value = serde_json::from_str(&escaped).unwrap();
        assert_eq!(value["t"], "</script> & \"q\"");
    }
}
