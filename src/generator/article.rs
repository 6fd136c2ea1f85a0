//! Article page assembly.
//!
//! Wraps a [`PageDocument`] into the site shell with search and social
//! metadata. Two escaping disciplines meet here and must stay apart:
//! attribute and text values use `escape_html`, the JSON-LD payload is
//! serialized by serde_json and then made script-safe with
//! `escape_json_for_script`.

use super::shell::{EARLY_THEME_SCRIPT, Shell};
use crate::{
    compiler::meta::PageDocument,
    config::SiteConfig,
    utils::escape::{escape_html, escape_json_for_script},
};
use serde_json::json;
use std::fmt::Write;

/// Render the complete HTML document for one article.
pub fn assemble(page: &PageDocument, config: &SiteConfig) -> String {
    let shell = Shell::new(config, &config.build.articles_route);
    let head = render_head(page, config, &shell);
    let main = render_main(page);
    shell.render(&head, &main)
}

fn render_head(page: &PageDocument, config: &SiteConfig, shell: &Shell<'_>) -> String {
    let author = escape_html(&config.base.author);
    let description = escape_html(&page.description);
    let social_title = format!("{} - {author}", escape_html(&page.title));
    let url = escape_html(&page.canonical_url);
    let date = escape_html(page.date.raw());

    let mut head = String::with_capacity(4 * 1024);
    _ = writeln!(
        head,
        "    <title>{} - {}</title>",
        escape_html(&config.base.title),
        escape_html(&page.slug)
    );
    _ = writeln!(head, r#"    <meta name="description" content="{description}">"#);
    _ = writeln!(head, r#"    <meta property="og:title" content="{social_title}">"#);
    _ = writeln!(head, r#"    <meta property="og:description" content="{description}">"#);
    _ = writeln!(head, r#"    <meta property="og:type" content="article">"#);
    _ = writeln!(head, r#"    <meta property="og:url" content="{url}">"#);
    _ = writeln!(head, r#"    <meta property="article:published_time" content="{date}">"#);
    _ = writeln!(head, r#"    <meta property="article:author" content="{author}">"#);
    _ = writeln!(head, r#"    <meta name="twitter:card" content="summary">"#);
    _ = writeln!(head, r#"    <meta name="twitter:title" content="{social_title}">"#);
    _ = writeln!(head, r#"    <meta name="twitter:description" content="{description}">"#);
    _ = writeln!(head, r#"    <link rel="canonical" href="{url}">"#);

    shell.push_head_links(&mut head, &config.build.head.article_styles);
    head.push_str(EARLY_THEME_SCRIPT);
    if let Some(icon) = &config.build.head.icon {
        _ = writeln!(
            head,
            r#"    <link rel="icon" href="{}" type="image/x-icon">"#,
            escape_html(icon)
        );
    }

    _ = writeln!(head, r#"    <script type="application/ld+json">"#);
    _ = writeln!(head, "{}", article_json_ld(page, config));
    _ = writeln!(head, "    </script>");
    head
}

/// JSON-LD `Article` payload, already safe to place inside `<script>`.
pub fn article_json_ld(page: &PageDocument, config: &SiteConfig) -> String {
    let author = &config.base.author;
    let payload = json!({
        "@context": "https://schema.org",
        "@type": "Article",
        "headline": page.title,
        "description": page.description,
        "datePublished": page.date.raw(),
        "author": {
            "@type": "Person",
            "name": author,
            "url": config.site_url(),
        },
        "publisher": {
            "@type": "Person",
            "name": author,
        },
        "url": page.canonical_url,
    });
    // Serializing a `Value` built by `json!` cannot fail
    let json = serde_json::to_string_pretty(&payload).unwrap_or_default();
    escape_json_for_script(&json)
}

fn render_main(page: &PageDocument) -> String {
    let mut main = String::with_capacity(page.body_html.len() + 512);
    main.push_str("        <div id=\"articles\" class=\"page active\">\n");
    main.push_str("            <div class=\"blog-post\">\n");
    main.push_str("                <div class=\"post-header\">\n");
    _ = writeln!(main, "                    <h1>{}</h1>", escape_html(&page.title));
    _ = writeln!(
        main,
        r#"                    <div class="post-date">{}</div>"#,
        escape_html(&page.date.display())
    );
    main.push_str("                </div>\n");
    main.push_str("                <div class=\"post-content\">\n");
    main.push_str(&page.body_html);
    main.push_str("\n                </div>\n");
    main.push_str("            </div>\n");
    main.push_str("        </div>\n");
    main
}
