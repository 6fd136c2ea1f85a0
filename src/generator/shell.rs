//! Page shell shared by article and listing pages.
//!
//! ```text
//! <!DOCTYPE html>
//! <html lang>
//!   <head>  charset, viewport, caller's head lines
//!   <body>  nav (active entry + theme toggle), caller's main block, footer,
//!           theme-toggle script
//! ```
//!
//! Callers push head and main content line by line with four-space
//! indentation; every interpolated value goes through `escape_html`.

use crate::{
    config::{NavLink, SiteConfig},
    utils::escape::escape_html,
};
use std::fmt::Write;

/// Applies a saved theme before first paint.
pub const EARLY_THEME_SCRIPT: &str = r#"    <script>
        (function() {
            try {
                var saved = localStorage.getItem('theme');
                var root = document.documentElement;
                root.classList.remove('theme-light', 'theme-dark');
                if (saved === 'light' || saved === 'dark') {
                    root.classList.add('theme-' + saved);
                }
            } catch (e) { /* noop */ }
        })();
    </script>
"#;

/// Binds the nav theme switch and follows the system preference until the
/// reader picks a theme explicitly.
pub const THEME_TOGGLE_SCRIPT: &str = r#"    <script>
        (function() {
            const root = document.documentElement;
            const prefersLight = window.matchMedia('(prefers-color-scheme: light)');

            function currentExplicitTheme() {
                try { return localStorage.getItem('theme'); } catch (_) { return null; }
            }

            function applyTheme(theme) {
                root.classList.remove('theme-light', 'theme-dark');
                if (theme === 'light' || theme === 'dark') {
                    root.classList.add('theme-' + theme);
                }
                updateThemeToggleState();
            }

            function updateThemeToggleState() {
                const sw = document.getElementById('theme-toggle');
                if (!sw) return;
                const isLight = root.classList.contains('theme-light') || (!root.classList.contains('theme-dark') && prefersLight.matches);
                sw.setAttribute('aria-pressed', String(isLight));
            }

            function toggleTheme() {
                const explicit = currentExplicitTheme();
                let next;
                if (explicit) {
                    next = explicit === 'light' ? 'dark' : 'light';
                } else {
                    next = prefersLight.matches ? 'dark' : 'light';
                }
                try { localStorage.setItem('theme', next); } catch (_) {}
                applyTheme(next);
            }

            window.addEventListener('DOMContentLoaded', () => {
                const btn = document.getElementById('theme-toggle');
                if (btn && !btn.dataset.bound) {
                    btn.dataset.bound = '1';
                    btn.addEventListener('click', toggleTheme);
                    btn.addEventListener('keydown', (e) => {
                        if (e.key === 'Enter' || e.key === ' ') {
                            e.preventDefault();
                            toggleTheme();
                        }
                    });
                    updateThemeToggleState();
                }
            });

            try {
                prefersLight.addEventListener('change', () => {
                    if (!currentExplicitTheme()) {
                        applyTheme(null);
                    }
                });
            } catch (_) {}
        })();
    </script>
"#;

const THEME_SWITCH: &str = r#"                <div class="theme-toggle">
                    <div id="theme-toggle" class="theme-switch" role="button" tabindex="0" aria-label="Toggle theme" title="Toggle theme">
                        <i class="fa-solid fa-sun switch-icon sun" aria-hidden="true"></i>
                        <span class="switch-thumb"></span>
                        <i class="fa-solid fa-moon switch-icon moon" aria-hidden="true"></i>
                    </div>
                </div>
"#;

/// Site-wide page frame with one navigation entry marked active.
pub struct Shell<'a> {
    config: &'a SiteConfig,
    active: &'a str,
}

impl<'a> Shell<'a> {
    pub const fn new(config: &'a SiteConfig, active: &'a str) -> Self {
        Self { config, active }
    }

    /// Push preconnect and stylesheet links, followed by `extra_styles`.
    pub fn push_head_links(&self, out: &mut String, extra_styles: &[String]) {
        let head = &self.config.build.head;
        for origin in &head.preconnect {
            _ = writeln!(out, r#"    <link rel="preconnect" href="{}">"#, escape_html(origin));
        }
        for origin in &head.preconnect_crossorigin {
            _ = writeln!(
                out,
                r#"    <link rel="preconnect" href="{}" crossorigin>"#,
                escape_html(origin)
            );
        }
        for href in head.styles.iter().chain(extra_styles) {
            _ = writeln!(out, r#"    <link rel="stylesheet" href="{}">"#, escape_html(href));
        }
    }

    /// Wrap caller-built head lines and main block into a full document.
    pub fn render(&self, head: &str, main: &str) -> String {
        let base = &self.config.base;
        let mut html = String::with_capacity(head.len() + main.len() + 8 * 1024);

        _ = writeln!(html, "<!DOCTYPE html>");
        _ = writeln!(html, r#"<html lang="{}">"#, escape_html(&base.language));
        html.push_str("<head>\n");
        html.push_str("    <meta charset=\"UTF-8\">\n");
        html.push_str(
            "    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
        );
        html.push_str(head);
        html.push_str("</head>\n<body>\n    <div class=\"container\">\n");
        push_nav(&mut html, &base.nav, self.active);
        html.push_str(main);
        _ = writeln!(html, r#"        <div class="footer">{}</div>"#, escape_html(&base.footer));
        html.push_str("    </div>\n");
        html.push_str(THEME_TOGGLE_SCRIPT);
        html.push_str("</body>\n</html>\n");
        html
    }
}

fn push_nav(out: &mut String, nav: &[NavLink], active: &str) {
    out.push_str("        <nav>\n            <div class=\"nav-row\">\n                <ul>\n");
    for link in nav {
        let class = if link.href == active { "nav-link active" } else { "nav-link" };
        _ = writeln!(
            out,
            r#"                    <li><a href="{}" class="{class}">{}</a></li>"#,
            escape_html(&link.href),
            escape_html(&link.label),
        );
    }
    out.push_str("                </ul>\n");
    out.push_str(THEME_SWITCH);
    out.push_str("            </div>\n        </nav>\n");
}
