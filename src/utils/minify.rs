//! HTML minification.
//!
//! Feeds are never minified: the rss writer emits descriptions as CDATA and
//! line-based trimming would alter their content.

use crate::config::SiteConfig;
use std::borrow::Cow;

/// Minify an HTML page when `[build].minify` is enabled.
///
/// Returns `Cow::Borrowed` if minify disabled, `Cow::Owned` if minified.
pub fn minify_html<'a>(html: &'a [u8], config: &SiteConfig) -> Cow<'a, [u8]> {
    if config.build.minify {
        Cow::Owned(minify_html_inner(html))
    } else {
        Cow::Borrowed(html)
    }
}

fn minify_html_inner(html: &[u8]) -> Vec<u8> {
    let mut cfg = minify_html::Cfg::new();
    cfg.keep_closing_tags = true;
    cfg.keep_html_and_head_opening_tags = true;
    cfg.keep_comments = false;
    cfg.minify_css = true;
    cfg.minify_js = true;
    cfg.remove_bangs = true;
    cfg.remove_processing_instructions = true;
    minify_html::minify(html, &cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_minify(enabled: bool) -> SiteConfig {
        let mut config = SiteConfig::default();
        config.build.minify = enabled;
        config
    }

    #[test]
    fn test_minify_html_basic() {
        let html = b"<html>\n  <head>\n  </head>\n  <body>\n    <p>Hello</p>\n  </body>\n</html>";
        let result = minify_html(html, &config_with_minify(true));
        let result_str = String::from_utf8_lossy(&result);

        assert!(!result_str.contains("\n  "));
        assert!(result_str.contains("<p>Hello</p>"));
    }

    #[test]
    fn test_minify_html_keeps_json_ld_payload() {
        let html = br#"<html><head><script type="application/ld+json">{"headline": "A <b>"}</script></head></html>"#;
        let result = minify_html(html, &config_with_minify(true));
        let result_str = String::from_utf8_lossy(&result);

        assert!(result_str.contains("application/ld+json"));
        assert!(result_str.contains(r"<b>"));
    }

    #[test]
    fn test_minify_html_disabled() {
        let html = b"<html>\n  <body>\n  </body>\n</html>";
        let result = minify_html(html, &config_with_minify(false));

        assert!(matches!(result, Cow::Borrowed(_)));
        assert_eq!(&*result, html);
    }
}
