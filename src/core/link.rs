//! Link classification.

use crate::core::UrlPath;
use crate::utils::path::route::{is_external_link, split_path_fragment, strip_query_fragment};

/// Syntactic classification of an href
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind<'a> {
    /// Link with a URL scheme (https://, mailto:, tel:, etc.)
    External(&'a str),
    /// Pure fragment link (#section). Value is the anchor without `#`.
    Fragment(&'a str),
    /// Site-root path (/about-us/, /service-areas/hollywood/).
    SiteRoot(&'a str),
    /// Relative path (contact-us, ../other).
    Relative(&'a str),
}

impl<'a> LinkKind<'a> {
    /// Parse an href into its syntactic kind.
    #[inline]
    pub fn parse(link: &'a str) -> Self {
        let link = link.trim();
        if is_external_link(link) {
            Self::External(link)
        } else if let Some(anchor) = link.strip_prefix('#') {
            Self::Fragment(anchor)
        } else if link.starts_with("//") {
            // Protocol-relative URL points at another host
            Self::External(link)
        } else if link.starts_with('/') {
            Self::SiteRoot(link)
        } else {
            Self::Relative(link)
        }
    }

    /// Route targeted by a site-root link, without query or fragment.
    ///
    /// Returns `None` for every other kind.
    pub fn target(&self) -> Option<UrlPath> {
        match self {
            Self::SiteRoot(link) => {
                let (path, _) = split_path_fragment(link);
                Some(UrlPath::from_browser(strip_query_fragment(path)))
            }
            _ => None,
        }
    }

    /// Whether the link points at the site's own host.
    ///
    /// Absolute http(s) links whose host matches `site_url` count as internal.
    pub fn internal_target(&self, site_url: Option<&url::Url>) -> Option<UrlPath> {
        match self {
            Self::SiteRoot(_) => self.target(),
            Self::External(link) if Self::is_http(link) => {
                let site = site_url?;
                let parsed = url::Url::parse(link).ok()?;
                (parsed.host_str() == site.host_str() && parsed.host_str().is_some())
                    .then(|| UrlPath::from_browser(parsed.path()))
            }
            _ => None,
        }
    }

    #[inline]
    pub fn is_http(link: &str) -> bool {
        link.starts_with("http://") || link.starts_with("https://")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_external() {
        assert!(matches!(
            LinkKind::parse("https://example.com"),
            LinkKind::External("https://example.com")
        ));
        assert!(matches!(
            LinkKind::parse("tel:(323) 642-8509"),
            LinkKind::External(_)
        ));
        assert!(matches!(
            LinkKind::parse("mailto:office@example.com"),
            LinkKind::External(_)
        ));
        assert!(matches!(
            LinkKind::parse("//cdn.example.com/x.js"),
            LinkKind::External(_)
        ));
    }

    #[test]
    fn test_parse_fragment() {
        assert!(matches!(LinkKind::parse("#faq"), LinkKind::Fragment("faq")));
        assert!(matches!(LinkKind::parse("#"), LinkKind::Fragment("")));
    }

    #[test]
    fn test_parse_site_root_and_relative() {
        assert!(matches!(
            LinkKind::parse("/about-us/"),
            LinkKind::SiteRoot("/about-us/")
        ));
        assert!(matches!(
            LinkKind::parse("contact-us"),
            LinkKind::Relative("contact-us")
        ));
        assert!(matches!(
            LinkKind::parse("  /contact-us/ "),
            LinkKind::SiteRoot("/contact-us/")
        ));
    }

    #[test]
    fn test_target() {
        let kind = LinkKind::parse("/service-areas/hollywood?utm=1#faq");
        assert_eq!(
            kind.target(),
            Some(UrlPath::from_page("/service-areas/hollywood/"))
        );
        assert_eq!(LinkKind::parse("#faq").target(), None);
        assert_eq!(LinkKind::parse("https://example.com/").target(), None);
    }

    #[test]
    fn test_internal_target_same_host() {
        let site = url::Url::parse("https://example.com").unwrap();
        let kind = LinkKind::parse("https://example.com/about-us");
        assert_eq!(
            kind.internal_target(Some(&site)),
            Some(UrlPath::from_page("/about-us/"))
        );

        let other = LinkKind::parse("https://other.com/about-us");
        assert_eq!(other.internal_target(Some(&site)), None);
        assert_eq!(kind.internal_target(None), None);
        assert_eq!(LinkKind::parse("tel:555").internal_target(Some(&site)), None);
    }

    #[test]
    fn test_is_http() {
        assert!(LinkKind::is_http("http://example.com"));
        assert!(LinkKind::is_http("https://example.com"));
        assert!(!LinkKind::is_http("mailto:a@b.c"));
        assert!(!LinkKind::is_http("/about-us/"));
    }
}
