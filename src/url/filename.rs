use url::Url;

/// Derives the destination filename for a resource URL
///
/// The filename is the final segment of the URL path. A URL whose path ends
/// in a slash (or has no path at all) has no derivable filename and returns
/// `None`; such resources are never materialized in the archive even when
/// their fetch succeeds.
///
/// Query strings and fragments never contribute to the filename.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use sitezip::url::file_name;
///
/// let url = Url::parse("https://example.com/assets/app.js?v=2").unwrap();
/// assert_eq!(file_name(&url), Some("app.js".to_string()));
///
/// let url = Url::parse("https://example.com/assets/").unwrap();
/// assert_eq!(file_name(&url), None);
/// ```
pub fn file_name(url: &Url) -> Option<String> {
    let last = url.path_segments()?.next_back()?;
    if last.is_empty() {
        None
    } else {
        Some(last.to_string())
    }
}
