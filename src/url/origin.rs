use crate::UrlError;
use url::Url;

/// The root URL being mirrored
///
/// An `Origin` is validated once, before any network activity, and is
/// immutable afterwards. Its host drives the archive's per-domain folder
/// name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Origin {
    url: Url,
    host: String,
}

impl Origin {
    /// Parses and validates a raw URL string into an `Origin`
    ///
    /// The URL must parse, carry a non-empty host, and use the `http` or
    /// `https` scheme. Anything else is rejected before any network call.
    ///
    /// # Examples
    ///
    /// ```
    /// use sitezip::url::Origin;
    ///
    /// let origin = Origin::parse("https://example.com/index.html").unwrap();
    /// assert_eq!(origin.host(), "example.com");
    /// assert_eq!(origin.folder_name(), "example_com");
    ///
    /// assert!(Origin::parse("not a url").is_err());
    /// ```
    pub fn parse(input: &str) -> Result<Self, UrlError> {
        let url = Url::parse(input.trim()).map_err(|e| UrlError::Parse(e.to_string()))?;

        let host = url
            .host_str()
            .map(|h| h.to_lowercase())
            .ok_or(UrlError::MissingHost)?;

        if host.is_empty() {
            return Err(UrlError::MissingHost);
        }

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(UrlError::InvalidScheme(url.scheme().to_string()));
        }

        Ok(Self { url, host })
    }

    /// Returns the parsed origin URL
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Returns the lowercase host of the origin
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Derives the archive's per-domain root folder name
    ///
    /// Dots in the host are replaced with underscores, so
    /// `https://example.com/` maps to `example_com`.
    pub fn folder_name(&self) -> String {
        self.host.replace('.', "_")
    }
}

impl std::fmt::Display for Origin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_https_url() {
        let origin = Origin::parse("https://example.com/page").unwrap();
        assert_eq!(origin.host(), "example.com");
        assert_eq!(origin.url().scheme(), "https");
    }

    #[test]
    fn test_parse_valid_http_url() {
        let origin = Origin::parse("http://example.com/").unwrap();
        assert_eq!(origin.host(), "example.com");
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let origin = Origin::parse("  https://example.com/  ").unwrap();
        assert_eq!(origin.host(), "example.com");
    }

    #[test]
    fn test_host_is_lowercased() {
        let origin = Origin::parse("https://EXAMPLE.COM/").unwrap();
        assert_eq!(origin.host(), "example.com");
    }

    #[test]
    fn test_reject_malformed_url() {
        let result = Origin::parse("not a url");
        assert!(matches!(result, Err(UrlError::Parse(_))));
    }

    #[test]
    fn test_reject_hostless_url() {
        let result = Origin::parse("data:text/plain,hello");
        assert!(matches!(result, Err(UrlError::MissingHost)));
    }

    #[test]
    fn test_reject_non_http_scheme() {
        let result = Origin::parse("ftp://example.com/file");
        assert!(matches!(result, Err(UrlError::InvalidScheme(_))));
    }

    #[test]
    fn test_folder_name_replaces_dots() {
        let origin = Origin::parse("https://www.example.co.uk/").unwrap();
        assert_eq!(origin.folder_name(), "www_example_co_uk");
    }

    #[test]
    fn test_folder_name_simple_domain() {
        let origin = Origin::parse("https://example.com/").unwrap();
        assert_eq!(origin.folder_name(), "example_com");
    }
}
