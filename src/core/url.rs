//! Route URL path.
//!
//! Content is addressed by decoded page paths such as `/service-areas/culver-city/`.
//! Requests and links from outside (CLI arguments, stored HTML) are decoded
//! once at the boundary and normalized to the page form.

use std::borrow::Borrow;
use std::path::PathBuf;
use std::sync::{Arc, LazyLock};

use percent_encoding::percent_decode_str;
use serde::{Deserialize, Serialize};

/// Decoded page URL path
///
/// Invariants:
/// - Always decoded (no percent-encoding)
/// - Always starts and ends with `/`
/// - Never carries a query string or fragment
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UrlPath(Arc<str>);

static BASE: LazyLock<Option<url::Url>> = LazyLock::new(|| url::Url::parse("http://x").ok());

impl UrlPath {
    /// Create from an encoded URL (decode percent-encoding, strip query string).
    pub fn from_browser(encoded: &str) -> Self {
        let path = encoded.split('?').next().unwrap_or(encoded);
        let decoded = percent_decode_str(path)
            .decode_utf8()
            .map(|s| s.into_owned())
            .unwrap_or_else(|_| path.to_string());
        Self::from_page(&decoded)
    }

    /// Create from a decoded page path, adding the leading and trailing slash.
    ///
    /// Query string, fragment, and `.`/`..` segments are resolved away.
    pub fn from_page(decoded: &str) -> Self {
        let trimmed = decoded.trim();
        if trimmed.is_empty() || trimmed == "/" {
            return Self::root();
        }

        let path = resolve_path(trimmed);
        let mut normalized = String::with_capacity(path.len() + 2);
        if !path.starts_with('/') {
            normalized.push('/');
        }
        normalized.push_str(&path);
        if !normalized.ends_with('/') {
            normalized.push('/');
        }

        Self(Arc::from(normalized))
    }

    /// Build a page path from slug segments: `["service-areas", "hollywood"]`
    /// becomes `/service-areas/hollywood/`. Empty segments are skipped.
    pub fn from_segments<S: AsRef<str>>(segments: &[S]) -> Self {
        let mut path = String::from("/");
        for segment in segments.iter().map(AsRef::as_ref) {
            let segment = segment.trim_matches('/');
            if segment.is_empty() {
                continue;
            }
            path.push_str(segment);
            path.push('/');
        }
        Self(Arc::from(path))
    }

    pub fn root() -> Self {
        Self(Arc::from("/"))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Non-empty path segments, in order.
    pub fn segments(&self) -> Vec<&str> {
        self.0.split('/').filter(|s| !s.is_empty()).collect()
    }

    /// Last segment, or `None` for the root.
    pub fn last_segment(&self) -> Option<&str> {
        self.0.split('/').rev().find(|s| !s.is_empty())
    }

    /// Path without the surrounding slashes: `/blog/post/` -> `blog/post`.
    pub fn trimmed(&self) -> &str {
        self.0.trim_matches('/')
    }

    /// Relative directory for this page under an output root.
    pub fn output_dir(&self) -> PathBuf {
        self.segments().iter().collect()
    }
}

/// Resolve `.`/`..` and drop the query and fragment.
fn resolve_path(path: &str) -> String {
    match BASE.as_ref().and_then(|base| base.join(path).ok()) {
        Some(parsed) => percent_decode_str(parsed.path())
            .decode_utf8()
            .map(|s| s.into_owned())
            .unwrap_or_else(|_| parsed.path().to_string()),
        None => path.split(['?', '#']).next().unwrap_or(path).to_string(),
    }
}

impl std::fmt::Display for UrlPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl Default for UrlPath {
    fn default() -> Self {
        Self::root()
    }
}

impl AsRef<str> for UrlPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for UrlPath {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for UrlPath {
    fn from(s: &str) -> Self {
        Self::from_page(s)
    }
}

impl From<String> for UrlPath {
    fn from(s: String) -> Self {
        Self::from_page(&s)
    }
}

impl PartialEq<str> for UrlPath {
    fn eq(&self, other: &str) -> bool {
        self.0.as_ref() == other
    }
}

impl PartialEq<&str> for UrlPath {
    fn eq(&self, other: &&str) -> bool {
        self.0.as_ref() == *other
    }
}

impl Serialize for UrlPath {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for UrlPath {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Self::from_page(&s))
    }
}
