//! Resource link extraction from the root document
//!
//! This module scans a fetched HTML document for directly-referenced static
//! assets: stylesheet links, script sources, and image sources. Parsing is
//! best-effort; malformed markup never raises an error, unscannable
//! fragments are simply skipped.

use scraper::{Html, Selector};
use std::collections::HashSet;
use url::Url;

/// The kind of a discovered resource, which determines its archive subfolder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Stylesheet,
    Script,
    Image,
}

impl ResourceKind {
    /// Returns the archive subdirectory resources of this kind are stored in
    pub fn subdir(&self) -> &'static str {
        match self {
            Self::Stylesheet => "css",
            Self::Script => "js",
            Self::Image => "images",
        }
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Stylesheet => write!(f, "stylesheet"),
            Self::Script => write!(f, "script"),
            Self::Image => write!(f, "image"),
        }
    }
}

/// A discovered resource to fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRef {
    /// Absolute URL of the resource
    pub url: Url,

    /// What kind of resource this is
    pub kind: ResourceKind,
}

/// Extracts resource references from an HTML document
///
/// Scans `link[rel="stylesheet"]`, `script[src]`, and `img[src]` elements,
/// resolving each referenced value against the origin URL. Entries that
/// resolve to an empty or fragment-only URL, or to a non-HTTP(S) scheme,
/// are discarded. Within one kind, duplicate resolved URLs collapse to a
/// single `ResourceRef` (first occurrence wins).
///
/// This is a pure function of its inputs: no network access, no side
/// effects.
///
/// # Example
///
/// ```
/// use sitezip::mirror::extract_resources;
/// use url::Url;
///
/// let html = r#"<html><head><link rel="stylesheet" href="/main.css"></head></html>"#;
/// let origin = Url::parse("https://example.com/").unwrap();
/// let refs = extract_resources(html, &origin);
/// assert_eq!(refs.len(), 1);
/// assert_eq!(refs[0].url.as_str(), "https://example.com/main.css");
/// ```
pub fn extract_resources(html: &str, origin: &Url) -> Vec<ResourceRef> {
    let document = Html::parse_document(html);
    let mut refs = Vec::new();

    collect(
        &document,
        r#"link[rel="stylesheet"][href]"#,
        "href",
        ResourceKind::Stylesheet,
        origin,
        &mut refs,
    );
    collect(&document, "script[src]", "src", ResourceKind::Script, origin, &mut refs);
    collect(&document, "img[src]", "src", ResourceKind::Image, origin, &mut refs);

    refs
}

/// Collects resources matching one selector/attribute pair, deduplicated
/// within the kind
fn collect(
    document: &Html,
    selector: &str,
    attr: &str,
    kind: ResourceKind,
    origin: &Url,
    refs: &mut Vec<ResourceRef>,
) {
    let mut seen: HashSet<Url> = HashSet::new();

    if let Ok(selector) = Selector::parse(selector) {
        for element in document.select(&selector) {
            if let Some(value) = element.value().attr(attr) {
                if let Some(url) = resolve_resource(value, origin) {
                    if seen.insert(url.clone()) {
                        refs.push(ResourceRef { url, kind });
                    }
                }
            }
        }
    }
}

/// Resolves a resource reference to an absolute URL and validates it
///
/// Returns None if the reference should be excluded:
/// - Empty or fragment-only references
/// - Non-HTTP(S) URLs after resolution (data:, javascript:, mailto:, ...)
/// - Values that fail relative-URL resolution
fn resolve_resource(value: &str, origin: &Url) -> Option<Url> {
    let value = value.trim();

    // Skip empty references
    if value.is_empty() {
        return None;
    }

    // Skip fragment-only references (same page anchors)
    if value.starts_with('#') {
        return None;
    }

    match origin.join(value) {
        Ok(absolute_url) => {
            // Only accept HTTP and HTTPS URLs
            if absolute_url.scheme() == "http" || absolute_url.scheme() == "https" {
                Some(absolute_url)
            } else {
                None
            }
        }
        Err(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn origin() -> Url {
        Url::parse("https://example.com/page").unwrap()
    }

    #[test]
    fn test_extract_stylesheet() {
        let html = r#"<html><head><link rel="stylesheet" href="https://example.com/style.css"></head></html>"#;
        let refs = extract_resources(html, &origin());
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].kind, ResourceKind::Stylesheet);
        assert_eq!(refs[0].url.as_str(), "https://example.com/style.css");
    }

    #[test]
    fn test_extract_script_and_image() {
        let html = r#"<html><body>
            <script src="/app.js"></script>
            <img src="images/logo.png">
        </body></html>"#;
        let refs = extract_resources(html, &origin());
        assert_eq!(refs.len(), 2);
        assert_eq!(refs[0].kind, ResourceKind::Script);
        assert_eq!(refs[0].url.as_str(), "https://example.com/app.js");
        assert_eq!(refs[1].kind, ResourceKind::Image);
        assert_eq!(refs[1].url.as_str(), "https://example.com/images/logo.png");
    }

    #[test]
    fn test_relative_resolution_matches_contract() {
        // The worked example: one stylesheet, one absolute-path script, one
        // path-relative image
        let html = r#"<html><head>
            <link rel="stylesheet" href="https://example.com/style.css">
        </head><body>
            <script src="/app.js"></script>
            <img src="images/logo.png">
        </body></html>"#;
        let base = Url::parse("https://example.com/").unwrap();
        let refs = extract_resources(html, &base);

        let urls: Vec<&str> = refs.iter().map(|r| r.url.as_str()).collect();
        assert_eq!(
            urls,
            vec![
                "https://example.com/style.css",
                "https://example.com/app.js",
                "https://example.com/images/logo.png",
            ]
        );
    }

    #[test]
    fn test_scheme_relative_reference() {
        let html = r#"<html><body><script src="//cdn.example.net/lib.js"></script></body></html>"#;
        let refs = extract_resources(html, &origin());
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].url.as_str(), "https://cdn.example.net/lib.js");
    }

    #[test]
    fn test_skip_fragment_only_reference() {
        let html = r##"<html><body><img src="#anchor"></body></html>"##;
        let refs = extract_resources(html, &origin());
        assert!(refs.is_empty());
    }

    #[test]
    fn test_skip_empty_reference() {
        let html = r#"<html><body><img src=""></body></html>"#;
        let refs = extract_resources(html, &origin());
        assert!(refs.is_empty());
    }

    #[test]
    fn test_skip_data_uri() {
        let html = r#"<html><body><img src="data:image/png;base64,AAAA"></body></html>"#;
        let refs = extract_resources(html, &origin());
        assert!(refs.is_empty());
    }

    #[test]
    fn test_skip_non_stylesheet_link() {
        let html = r#"<html><head><link rel="icon" href="/favicon.ico"></head></html>"#;
        let refs = extract_resources(html, &origin());
        assert!(refs.is_empty());
    }

    #[test]
    fn test_skip_inline_script() {
        let html = r#"<html><body><script>console.log("hi")</script></body></html>"#;
        let refs = extract_resources(html, &origin());
        assert!(refs.is_empty());
    }

    #[test]
    fn test_dedup_within_kind() {
        let html = r#"<html><body>
            <img src="/logo.png">
            <img src="/logo.png">
            <img src="/other.png">
        </body></html>"#;
        let refs = extract_resources(html, &origin());
        assert_eq!(refs.len(), 2);
    }

    #[test]
    fn test_same_url_across_kinds_is_kept_per_kind() {
        // Cross-kind dedup is the coordinator's job, not the extractor's
        let html = r#"<html><body>
            <script src="/asset"></script>
            <img src="/asset">
        </body></html>"#;
        let refs = extract_resources(html, &origin());
        assert_eq!(refs.len(), 2);
    }

    #[test]
    fn test_malformed_html_does_not_panic() {
        let html = "<html><body><img src='/a.png'><div><p></body>";
        let refs = extract_resources(html, &origin());
        assert_eq!(refs.len(), 1);
    }

    #[test]
    fn test_empty_document() {
        let refs = extract_resources("", &origin());
        assert!(refs.is_empty());
    }
}
