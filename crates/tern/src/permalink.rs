use std::fmt;

use url::Url;

/// The absolute URL of a page.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone)]
pub struct Permalink(Url);

impl Permalink {
    /// Resolves a route against the site's base URL.
    ///
    /// Rooted routes are appended to the base URL, so a base URL with a path
    /// prefix keeps it. A route that is already an absolute URL is used as-is.
    pub fn resolve(base_url: &Url, route: &str) -> Result<Self, url::ParseError> {
        if let Ok(url) = Url::parse(route) {
            return Ok(Self(url));
        }

        let base_url = base_url.as_str().trim_end_matches('/');
        let route = route.trim_start_matches('/');

        Url::parse(&format!("{base_url}/{route}")).map(Self)
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn path(&self) -> &str {
        self.0.path()
    }
}

impl fmt::Display for Permalink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn resolve(base_url: &str, route: &str) -> String {
        Permalink::resolve(&Url::parse(base_url).unwrap(), route)
            .unwrap()
            .to_string()
    }

    #[test]
    fn test_permalink() {
        assert_eq!(resolve("https://example.com/", "/"), "https://example.com/");
        assert_eq!(resolve("https://example.com", "/"), "https://example.com/");
        assert_eq!(resolve("https://example.com", ""), "https://example.com/");
        assert_eq!(
            resolve("https://example.com/", "/blog/"),
            "https://example.com/blog/"
        );
    }

    #[test]
    fn test_permalink_keeps_base_path() {
        assert_eq!(
            resolve("https://example.com/site/", "/notes/rust/"),
            "https://example.com/site/notes/rust/"
        );
    }

    #[test]
    fn test_permalink_verbatim_slug() {
        assert_eq!(
            resolve("https://example.com/", "/journey"),
            "https://example.com/journey"
        );
        assert_eq!(
            resolve("https://example.com/", "https://elsewhere.org/post/"),
            "https://elsewhere.org/post/"
        );
    }

    #[test]
    fn test_permalink_encodes_non_ascii() {
        assert_eq!(
            resolve("https://example.com/", "/生活/"),
            "https://example.com/%E7%94%9F%E6%B4%BB/"
        );
    }

    #[test]
    fn test_permalink_path() {
        let permalink = Permalink("https://example.com/this/is/a/cool/site/".parse().unwrap());
        assert_eq!(permalink.path(), "/this/is/a/cool/site/");
    }
}
