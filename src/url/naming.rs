//! Archive entry naming derived from page URLs

use url::Url;

/// Placeholder path segment for the site root
const INDEX_SEGMENT: &str = "index";

/// Turns a URL path into a flat file-name fragment
///
/// An empty or root path becomes `index`; otherwise leading and trailing
/// slashes are stripped and the remaining slashes become underscores.
pub fn sanitize_path(path: &str) -> String {
    let path = if path.is_empty() || path == "/" {
        INDEX_SEGMENT
    } else {
        path
    };

    path.trim_matches('/').replace('/', "_")
}

/// Builds the archive entry name for a page: `{host}_{sanitized-path}.pdf`
///
/// # Examples
///
/// ```
/// use scrapedf::url::entry_name;
/// use url::Url;
///
/// let url = Url::parse("https://example.com/docs/intro/").unwrap();
/// assert_eq!(entry_name(&url), "example.com_docs_intro.pdf");
///
/// let url = Url::parse("https://example.com/").unwrap();
/// assert_eq!(entry_name(&url), "example.com_index.pdf");
/// ```
pub fn entry_name(url: &Url) -> String {
    let host = url.host_str().unwrap_or_default();
    format!("{}_{}.pdf", host, sanitize_path(url.path()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_maps_to_index() {
        assert_eq!(sanitize_path("/"), "index");
        assert_eq!(sanitize_path(""), "index");
    }

    #[test]
    fn test_slashes_become_underscores() {
        assert_eq!(sanitize_path("/a/b/c"), "a_b_c");
        assert_eq!(sanitize_path("/a/b/c/"), "a_b_c");
    }

    #[test]
    fn test_only_slashes_collapse_to_empty() {
        assert_eq!(sanitize_path("//"), "");
    }

    #[test]
    fn test_entry_name_for_nested_page() {
        let url = Url::parse("https://example.com/blog/2024/post.html").unwrap();
        assert_eq!(entry_name(&url), "example.com_blog_2024_post.html.pdf");
    }

    #[test]
    fn test_entry_name_ignores_query_and_port() {
        let url = Url::parse("http://127.0.0.1:8080/search?q=rust").unwrap();
        assert_eq!(entry_name(&url), "127.0.0.1_search.pdf");
    }

    #[test]
    fn test_entry_name_for_root() {
        let url = Url::parse("https://example.com").unwrap();
        assert_eq!(entry_name(&url), "example.com_index.pdf");
    }
}
