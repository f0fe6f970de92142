//! `[site.info]` configuration.

use crate::config::{ConfigDiagnostics, FieldPath};
use serde::{Deserialize, Serialize};

/// Site identity used in document meta and static page bodies.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteInfoConfig {
    /// Business / site name.
    pub title: String,

    /// Short slogan shown on the home page.
    pub tagline: String,

    /// Default meta description.
    pub description: String,

    /// Public site URL. Its path becomes the output prefix
    /// (e.g., "https://example.github.io/contractor").
    pub url: Option<String>,

    /// Language code (e.g., "en", "en-US").
    pub language: String,
}

pub struct SiteInfoFields {
    pub title: FieldPath,
    pub url: FieldPath,
    pub language: FieldPath,
}

impl SiteInfoConfig {
    pub const FIELDS: SiteInfoFields = SiteInfoFields {
        title: FieldPath::new("site.info.title"),
        url: FieldPath::new("site.info.url"),
        language: FieldPath::new("site.info.language"),
    };

    /// Validate site identity.
    ///
    /// # Checks
    /// - `title` is not blank
    /// - `url`, when set, is http(s) with a host
    /// - `language` is not blank
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.title.trim().is_empty() {
            diag.error_with_hint(
                Self::FIELDS.title,
                "site title is empty",
                "set the business name, e.g.: title = \"Acme Electric\"",
            );
        }

        if self.language.trim().is_empty() {
            diag.error(Self::FIELDS.language, "language code is empty");
        }

        let Some(url_str) = &self.url else {
            return;
        };
        match url::Url::parse(url_str) {
            Ok(parsed) => {
                if !matches!(parsed.scheme(), "http" | "https") {
                    diag.error_with_hint(
                        Self::FIELDS.url,
                        format!(
                            "scheme '{}' not supported, must be http or https",
                            parsed.scheme()
                        ),
                        "use format like https://example.com",
                    );
                }
                if parsed.host_str().is_none() {
                    diag.error_with_hint(
                        Self::FIELDS.url,
                        "URL must have a valid host",
                        "use format like https://example.com",
                    );
                }
            }
            Err(e) => {
                diag.error_with_hint(
                    Self::FIELDS.url,
                    format!("invalid URL: {}", e),
                    "use format like https://example.com",
                );
            }
        }
    }

    /// Parsed site URL, if configured and valid.
    pub fn parsed_url(&self) -> Option<url::Url> {
        self.url.as_deref().and_then(|u| url::Url::parse(u).ok())
    }
}

impl Default for SiteInfoConfig {
    fn default() -> Self {
        Self {
            title: String::new(),
            tagline: String::new(),
            description: String::new(),
            url: None,
            language: "en".into(),
        }
    }
}
