//! JSON-driven listing page.
//!
//! Reads `[build.listing].source`:
//!
//! ```json
//! {
//!   "page": { "title": "...", "headline": "...", "blurb": "...", "meta": { ... } },
//!   "utilities": [ { "slug": "a", "name": "A", "teaser": "...", "tags": ["x"] } ]
//! }
//! ```
//!
//! and writes one page with a card per entry plus a JSON-LD `ItemList`, both
//! in array order. A missing or unparsable source skips only this page.

use super::{
    BuildError,
    shell::{EARLY_THEME_SCRIPT, Shell},
    write_output,
};
use crate::{
    config::SiteConfig,
    log,
    utils::{
        escape::{escape_html, escape_json_for_script},
        minify::minify_html,
    },
};
use anyhow::Result;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value, json};
use std::{
    fmt::Write,
    fs, io,
    path::{Path, PathBuf},
};

type Object = Map<String, Value>;

// ============================================================================
// Input Model
// ============================================================================

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ListingData {
    pub page: ListingPage,
    #[serde(rename = "utilities")]
    pub entries: Vec<ListingEntry>,
}

/// Page-level fields. `meta` keys read: `title`, `description`, `canonical`,
/// `twitterCard`, `ogType`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ListingPage {
    pub title: Option<String>,
    pub headline: Option<String>,
    pub description: Option<String>,
    pub blurb: Option<String>,
    #[serde(deserialize_with = "object_or_empty")]
    pub meta: Object,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ListingEntry {
    pub slug: Option<String>,
    pub name: Option<String>,
    pub teaser: Option<String>,
    #[serde(rename = "shortDescription")]
    pub short_description: Option<String>,
    pub tags: Option<Vec<String>>,
    #[serde(deserialize_with = "object_or_empty")]
    pub meta: Object,
    #[serde(deserialize_with = "object_or_empty")]
    pub schema: Object,
}

/// Accept any JSON value; non-objects become an empty map.
fn object_or_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Object, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Object(map) => map,
        _ => Object::new(),
    })
}

/// First non-empty string among the candidates.
fn first_non_empty<'a>(candidates: impl IntoIterator<Item = Option<&'a str>>) -> Option<&'a str> {
    candidates.into_iter().flatten().find(|s| !s.is_empty())
}

/// String value of `key` in a free-form object.
fn str_field<'a>(map: &'a Object, key: &str) -> Option<&'a str> {
    map.get(key).and_then(Value::as_str)
}

impl ListingEntry {
    fn slug(&self) -> &str {
        self.slug.as_deref().unwrap_or_default().trim_matches('/')
    }

    fn name(&self) -> Option<&str> {
        first_non_empty([self.name.as_deref()])
    }

    fn teaser(&self) -> &str {
        first_non_empty([self.teaser.as_deref(), self.short_description.as_deref()])
            .unwrap_or_default()
    }

    fn tags(&self) -> &[String] {
        self.tags.as_deref().unwrap_or_default()
    }
}

// ============================================================================
// Public API
// ============================================================================

/// Generate the listing page if enabled.
///
/// Returns the written path, or `None` when disabled or skipped. Skips are
/// logged; only an output write failure is returned as an error.
pub fn build_listing(config: &SiteConfig) -> Result<Option<PathBuf>> {
    if !config.build.listing.enable {
        return Ok(None);
    }

    let data = match load_listing(&config.build.listing.source) {
        Ok(data) => data,
        Err(err) if err.is_skip() => {
            log!("skip"; "listing page: {err}");
            return Ok(None);
        }
        Err(err) => return Err(err.into()),
    };

    let html = render_listing(&data, config);
    let path = config.listing_output_path();
    write_output(&path, &minify_html(html.as_bytes(), config))?;

    log!("listing"; "{} ({} entries)", path.display(), data.entries.len());
    Ok(Some(path))
}

/// Read and parse the listing source.
pub fn load_listing(path: &Path) -> Result<ListingData, BuildError> {
    let content = fs::read_to_string(path).map_err(|err| match err.kind() {
        io::ErrorKind::NotFound => BuildError::MissingResource(path.to_path_buf()),
        _ => BuildError::MalformedInput {
            path: path.to_path_buf(),
            reason: err.to_string(),
        },
    })?;
    serde_json::from_str(&content).map_err(|err| BuildError::MalformedInput {
        path: path.to_path_buf(),
        reason: err.to_string(),
    })
}

// ============================================================================
// Rendering
// ============================================================================

/// Resolved page-level text, with the fallbacks applied.
struct PageText<'a> {
    title: String,
    description: &'a str,
    canonical: &'a str,
    twitter_card: &'a str,
    og_type: &'a str,
    headline: &'a str,
    blurb: &'a str,
}

impl<'a> PageText<'a> {
    fn resolve(page: &'a ListingPage, config: &SiteConfig) -> Self {
        let meta = &page.meta;
        let title = match first_non_empty([str_field(meta, "title")]) {
            Some(title) => title.to_owned(),
            None => format!(
                "{} - {}",
                config.base.title,
                page.title.as_deref().unwrap_or("utilities")
            ),
        };
        let blurb = first_non_empty([page.blurb.as_deref(), page.description.as_deref()])
            .unwrap_or_default();

        Self {
            title,
            description: first_non_empty([str_field(meta, "description"), Some(blurb)])
                .unwrap_or_default(),
            canonical: first_non_empty([str_field(meta, "canonical")]).unwrap_or_default(),
            twitter_card: first_non_empty([str_field(meta, "twitterCard")]).unwrap_or("summary"),
            og_type: first_non_empty([str_field(meta, "ogType")]).unwrap_or("website"),
            headline: first_non_empty([page.headline.as_deref(), page.title.as_deref()])
                .unwrap_or("Utilities"),
            blurb,
        }
    }
}

/// Render the complete listing document.
pub fn render_listing(data: &ListingData, config: &SiteConfig) -> String {
    let route = &config.build.listing.route;
    let text = PageText::resolve(&data.page, config);
    let shell = Shell::new(config, route);

    let title = escape_html(&text.title);
    let description = escape_html(text.description);

    let mut head = String::with_capacity(4 * 1024);
    _ = writeln!(head, "    <title>{title}</title>");
    _ = writeln!(head, r#"    <meta name="description" content="{description}">"#);
    _ = writeln!(
        head,
        r#"    <meta name="twitter:card" content="{}">"#,
        escape_html(text.twitter_card)
    );
    _ = writeln!(head, r#"    <meta name="twitter:title" content="{title}">"#);
    _ = writeln!(head, r#"    <meta name="twitter:description" content="{description}">"#);
    _ = writeln!(head, r#"    <meta property="og:type" content="{}">"#, escape_html(text.og_type));
    _ = writeln!(head, r#"    <meta property="og:title" content="{title}">"#);
    _ = writeln!(head, r#"    <meta property="og:description" content="{description}">"#);
    if !text.canonical.is_empty() {
        let canonical = escape_html(text.canonical);
        _ = writeln!(head, r#"    <meta property="og:url" content="{canonical}">"#);
        _ = writeln!(head, r#"    <link rel="canonical" href="{canonical}">"#);
    }
    shell.push_head_links(&mut head, &[]);
    if !data.entries.is_empty() {
        _ = writeln!(head, r#"    <script type="application/ld+json">"#);
        _ = writeln!(head, "{}", item_list_json_ld(data, &text, route));
        _ = writeln!(head, "    </script>");
    }
    head.push_str(EARLY_THEME_SCRIPT);

    let mut main = String::with_capacity(2 * 1024);
    main.push_str("        <div id=\"utilities\" class=\"page active\">\n");
    main.push_str("            <div class=\"utilities-intro\">\n");
    _ = writeln!(main, "                <h1>{}</h1>", escape_html(text.headline));
    if !text.blurb.is_empty() {
        _ = writeln!(
            main,
            r#"                <p class="utilities-description">{}</p>"#,
            escape_html(text.blurb)
        );
    }
    main.push_str("            </div>\n");
    main.push_str("            <div class=\"utilities-list\">\n");
    if data.entries.is_empty() {
        main.push_str(
            "                <p class=\"utilities-empty\">Utilities will be available soon.</p>\n",
        );
    }
    for entry in &data.entries {
        push_card(&mut main, entry, route);
    }
    main.push_str("            </div>\n");
    main.push_str("        </div>\n");

    shell.render(&head, &main)
}

/// Link path of an entry: `<route>/<slug>`, or the route itself for an empty slug.
fn entry_href(route: &str, slug: &str) -> String {
    let route = route.trim_end_matches('/');
    if slug.is_empty() {
        route.to_owned()
    } else {
        format!("{route}/{slug}")
    }
}

fn push_card(out: &mut String, entry: &ListingEntry, route: &str) {
    let slug = entry.slug();
    let name = entry.name().unwrap_or(if slug.is_empty() { "Utility" } else { slug });

    _ = writeln!(
        out,
        r#"                <a class="utility-card" href="{}">"#,
        escape_html(&entry_href(route, slug))
    );
    _ = writeln!(out, "                    <h2>{}</h2>", escape_html(name));
    let teaser = entry.teaser();
    if !teaser.is_empty() {
        _ = writeln!(
            out,
            r#"                    <p class="utility-description">{}</p>"#,
            escape_html(teaser)
        );
    }
    let tags = entry.tags();
    if !tags.is_empty() {
        out.push_str("                    <div class=\"utility-tags\">");
        for tag in tags {
            _ = write!(out, r#"<span class="tag">{}</span>"#, escape_html(tag));
        }
        out.push_str("</div>\n");
    }
    out.push_str("                </a>\n");
}

/// Canonical URL of one entry: its own `meta.canonical`, else derived from
/// the page canonical, else its link path.
fn entry_canonical(entry: &ListingEntry, page_canonical: &str, href: String) -> String {
    if let Some(canonical) = first_non_empty([str_field(&entry.meta, "canonical")]) {
        return canonical.to_owned();
    }
    let base = page_canonical.trim_end_matches('/');
    match (base.is_empty(), entry.slug()) {
        (true, _) => href,
        (false, "") => base.to_owned(),
        (false, slug) => format!("{base}/{slug}"),
    }
}

/// Schema.org payload for one entry: its `schema` object without
/// `@context`, with `@type`, `name`, `description` defaulted and `url` set.
fn entry_schema(entry: &ListingEntry, url: &str) -> Object {
    let mut schema = entry.schema.clone();
    schema.shift_remove("@context");
    schema
        .entry("@type")
        .or_insert_with(|| json!("SoftwareApplication"));
    schema
        .entry("name")
        .or_insert_with(|| json!(entry.name.as_deref().unwrap_or_default()));
    schema.entry("description").or_insert_with(|| {
        json!(
            first_non_empty([
                str_field(&entry.meta, "description"),
                entry.short_description.as_deref(),
            ])
            .unwrap_or_default()
        )
    });
    schema.insert("url".into(), json!(url));
    schema
}

/// JSON-LD `ItemList`, already safe to place inside `<script>`.
fn item_list_json_ld(data: &ListingData, text: &PageText<'_>, route: &str) -> String {
    let elements: Vec<Value> = data
        .entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let position = index + 1;
            let slug = entry.slug();
            let url = entry_canonical(entry, text.canonical, entry_href(route, slug));
            let name = match entry.name() {
                Some(name) => name.to_owned(),
                None if !slug.is_empty() => slug.to_owned(),
                None => format!("Utility {position}"),
            };
            json!({
                "@type": "ListItem",
                "position": position,
                "url": url,
                "name": name,
                "item": entry_schema(entry, &url),
            })
        })
        .collect();

    let payload = json!({
        "@context": "https://schema.org",
        "@type": "ItemList",
        "name": text.headline,
        "description": first_non_empty([Some(text.description), Some(text.blurb)]).unwrap_or_default(),
        "itemListElement": elements,
    });
    // Serializing a `Value` cannot fail
    let json = serde_json::to_string_pretty(&payload).unwrap_or_default();
    escape_json_for_script(&json)
}

// ============================================================================
// Tests
// ============================================================================
