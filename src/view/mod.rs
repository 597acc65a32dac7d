pub mod rss_renderer;
pub mod sitemap_renderer;

pub use rss_renderer::RssChannel;
pub use sitemap_renderer::Sitemap;

/// Joins a site base URL and path segments with single slashes. An empty
/// segment list (or a single empty segment) yields the site root with a
/// trailing slash. Segments are percent-encoded, inner `/` are kept.
pub fn site_link(base_url: &str, segments: &[&str]) -> String {
    let mut link = base_url.trim_end_matches('/').to_string();
    let segments: Vec<&str> = segments
        .iter()
        .map(|s| s.trim_matches('/'))
        .filter(|s| !s.is_empty())
        .collect();
    if segments.is_empty() {
        link.push('/');
        return link;
    }
    for segment in segments {
        link.push('/');
        link.push_str(&urlencoding::encode(segment).replace("%2F", "/"));
    }
    link
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_site_link() {
        assert_eq!(site_link("https://example.com", &[]), "https://example.com/");
        assert_eq!(site_link("https://example.com/", &[""]), "https://example.com/");
        assert_eq!(site_link("https://example.com/", &["blog", "intro"]), "https://example.com/blog/intro");
        assert_eq!(site_link("https://example.com", &["/tags/", "web3"]), "https://example.com/tags/web3");
        assert_eq!(site_link("https://example.com", &["docs/intro"]), "https://example.com/docs/intro");
    }

    #[test]
    fn test_site_link_encodes_segments() {
        assert_eq!(site_link("https://example.com", &["tags", "c++-&-rust!"]), "https://example.com/tags/c%2B%2B-%26-rust%21");
        assert_eq!(site_link("https://example.com", &["tags", "c#?"]), "https://example.com/tags/c%23%3F");
        assert_eq!(site_link("https://example.com", &["blog", "bài-viết"]), "https://example.com/blog/b%C3%A0i-vi%E1%BA%BFt");
        assert_eq!(site_link("https://example.com", &["tags", "web3"]), "https://example.com/tags/web3");
    }
}
