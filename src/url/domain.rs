use url::Url;

/// Returns the lowercase host of `url`, without any port
///
/// This is the name used for the crawl restriction, archive entry names
/// and the archive file itself.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use scrapedf::url::extract_domain;
///
/// let url = Url::parse("https://Docs.Example.com:8443/guide").unwrap();
/// assert_eq!(extract_domain(&url), Some("docs.example.com".to_string()));
/// ```
pub fn extract_domain(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// Returns true if `url` is on the crawl's host
///
/// Ports are ignored, so `example.com:8080` and `example.com` are the same
/// host. Subdomains are distinct hosts.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use scrapedf::url::is_same_host;
///
/// let url = Url::parse("https://Example.com:8443/about").unwrap();
/// assert!(is_same_host(&url, "example.com"));
/// assert!(!is_same_host(&url, "blog.example.com"));
/// ```
pub fn is_same_host(url: &Url, host: &str) -> bool {
    url.host_str()
        .is_some_and(|candidate| candidate.eq_ignore_ascii_case(host))
}
