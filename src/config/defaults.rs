//! Default values for configuration fields.
//!
//! These functions are used by serde for default deserialization.

// ============================================================================
// Common Defaults
// ============================================================================

pub fn r#true() -> bool {
    true
}

pub fn r#false() -> bool {
    false
}

// ============================================================================
// [base] Section Defaults
// ============================================================================

pub mod base {
    use super::super::NavLink;

    pub fn title() -> String {
        "ethan".into()
    }

    pub fn author() -> String {
        "Ethan Steininger".into()
    }

    pub fn url() -> Option<String> {
        None
    }

    pub fn language() -> String {
        "en-US".into()
    }

    pub fn footer() -> String {
        "me (at) ethan (dot) dev".into()
    }

    pub fn nav() -> Vec<NavLink> {
        [
            ("About", "/about"),
            ("Articles", "/articles"),
            ("Album", "/album"),
            ("Utilities", "/utilities"),
        ]
        .into_iter()
        .map(|(label, href)| NavLink::new(label, href))
        .collect()
    }

    /// Fallback when neither `url` nor a CNAME file is present.
    pub fn fallback_url() -> String {
        "https://localhost".into()
    }
}

// ============================================================================
// [build] Section Defaults
// ============================================================================

pub mod build {
    use std::path::PathBuf;

    pub fn root() -> Option<PathBuf> {
        None
    }

    pub fn content() -> PathBuf {
        "posts".into()
    }

    pub fn output() -> PathBuf {
        "public".into()
    }

    pub fn articles_route() -> String {
        "/articles".into()
    }

    pub mod head {
        pub fn preconnect() -> Vec<String> {
            vec!["https://fonts.googleapis.com".into()]
        }

        pub fn preconnect_crossorigin() -> Vec<String> {
            vec!["https://fonts.gstatic.com".into()]
        }

        pub fn styles() -> Vec<String> {
            vec![
                "https://fonts.googleapis.com/css2?family=Lora:ital,wght@0,400;0,600;0,700;1,400;1,600;1,700&family=Montserrat:wght@400;500;600;700&display=swap".into(),
                "https://cdnjs.cloudflare.com/ajax/libs/font-awesome/6.5.2/css/all.min.css".into(),
                "/styles.css".into(),
            ]
        }

        pub fn article_styles() -> Vec<String> {
            vec!["/articles.css".into()]
        }

        pub fn icon() -> Option<String> {
            Some("/images/favicon.ico".into())
        }
    }

    pub mod rss {
        use std::path::PathBuf;

        pub fn path() -> PathBuf {
            "rss.xml".into()
        }

        pub fn description() -> String {
            "Articles by Ethan".into()
        }

        pub fn link_path() -> String {
            "/articles".into()
        }
    }

    pub mod listing {
        use std::path::PathBuf;

        pub fn source() -> PathBuf {
            "utilities/utilities.json".into()
        }

        pub fn route() -> String {
            "/utilities".into()
        }

        pub fn output() -> PathBuf {
            "utilities/index.html".into()
        }
    }
}

// ============================================================================
// [gallery] Section Defaults
// ============================================================================

pub mod gallery {
    use std::path::PathBuf;

    pub fn path() -> PathBuf {
        "images/gallery.json".into()
    }
}
