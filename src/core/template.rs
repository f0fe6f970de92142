//! URL pattern to template mapping.
//!
//! Every route of the site falls into one template. `Route::parse` reads the
//! URL segments in a fixed priority order and captures the slugs each
//! template needs to find its rows:
//!
//! | Pattern                                          | Template        |
//! |--------------------------------------------------|-----------------|
//! | `/`                                              | `Home`          |
//! | `/about-us/`, `/contact-us/`                     | `About`, `Contact` |
//! | `/service-areas/`                                | `ServiceAreas`  |
//! | `/service-areas/{location}/`                     | `Location`      |
//! | `/service-areas/{location}/{kind}-{service}/`    | `ServiceDetail` |
//! | `/industry-insights/`, `/industry-insights/{slug}/` | `Insights`, `Post` |
//! | `/blog/{slug}/`                                  | `LegacyPost`    |
//! | `/{landing}/` (allowlisted)                      | `Landing`       |
//! | anything else                                    | `Page`          |

use std::fmt;

use serde::{Deserialize, Serialize};

use super::UrlPath;
use crate::config::ContentConfig;
use crate::utils::slug::slugify;

pub const ABOUT_SLUG: &str = "about-us";
pub const CONTACT_SLUG: &str = "contact-us";
pub const SERVICE_AREAS_SLUG: &str = "service-areas";
pub const INSIGHTS_SLUG: &str = "industry-insights";
pub const BLOG_SLUG: &str = "blog";

/// Page template selected by URL shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Template {
    Home,
    About,
    Contact,
    ServiceAreas,
    Location,
    ServiceDetail,
    Landing,
    Insights,
    Post,
    LegacyPost,
    Page,
}

impl Template {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::About => "about",
            Self::Contact => "contact",
            Self::ServiceAreas => "service_areas",
            Self::Location => "location",
            Self::ServiceDetail => "service_detail",
            Self::Landing => "landing",
            Self::Insights => "insights",
            Self::Post => "post",
            Self::LegacyPost => "legacy_post",
            Self::Page => "page",
        }
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Residential or commercial service line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceKind {
    Residential,
    Commercial,
}

impl ServiceKind {
    /// Parse the lowercase URL form (`residential`, `commercial`).
    pub fn from_slug(s: &str) -> Option<Self> {
        match s {
            "residential" => Some(Self::Residential),
            "commercial" => Some(Self::Commercial),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Residential => "residential",
            Self::Commercial => "commercial",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Residential => "Residential",
            Self::Commercial => "Commercial",
        }
    }

    /// URL segment for a service of this kind: `residential-ev-charger-installation`.
    pub fn segment(self, service: &str) -> String {
        format!("{}-{}", self.as_str(), service)
    }

    /// Split a `{kind}-{service}` segment at the first `-`.
    ///
    /// Returns `None` when the kind is unknown or the service part is empty.
    pub fn split_segment(segment: &str) -> Option<(Self, &str)> {
        let (kind, service) = segment.split_once('-')?;
        let kind = Self::from_slug(kind)?;
        (!service.is_empty()).then_some((kind, service))
    }
}

impl fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse a related-service mention such as `"Residential Ev Charger Installation"`.
///
/// The first word must name a service kind (any case). The rest becomes
/// the service slug. Returns `None` otherwise.
pub fn parse_service_mention(mention: &str) -> Option<(ServiceKind, String)> {
    let mention = mention.trim();
    let (first, rest) = mention.split_once(char::is_whitespace)?;
    let kind = ServiceKind::from_slug(&first.to_ascii_lowercase())?;
    let service = slugify(rest);
    (!service.is_empty()).then_some((kind, service))
}

/// A parsed route with the slugs its template resolves against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    About,
    Contact,
    ServiceAreas,
    Location {
        location: String,
    },
    ServiceDetail {
        location: String,
        kind: ServiceKind,
        service: String,
    },
    Landing {
        slug: String,
    },
    Insights,
    Post {
        slug: String,
    },
    LegacyPost {
        slug: String,
    },
    /// Legacy page, looked up by the last URL segment.
    Page {
        slug: String,
    },
}

impl Route {
    /// Match URL segments against the route table, first match wins.
    pub fn parse(url: &UrlPath, content: &ContentConfig) -> Self {
        let segments = url.segments();
        let fallback = || Self::Page {
            slug: url.last_segment().unwrap_or_default().to_string(),
        };

        match segments.as_slice() {
            [] => Self::Home,
            [ABOUT_SLUG] => Self::About,
            [CONTACT_SLUG] => Self::Contact,
            [SERVICE_AREAS_SLUG] => Self::ServiceAreas,
            [SERVICE_AREAS_SLUG, location] => Self::Location {
                location: location.to_string(),
            },
            [SERVICE_AREAS_SLUG, location, service_segment] => {
                match ServiceKind::split_segment(service_segment) {
                    Some((kind, service)) => Self::ServiceDetail {
                        location: location.to_string(),
                        kind,
                        service: service.to_string(),
                    },
                    None => fallback(),
                }
            }
            [INSIGHTS_SLUG] => Self::Insights,
            [INSIGHTS_SLUG, slug] => Self::Post {
                slug: slug.to_string(),
            },
            [BLOG_SLUG, slug] => Self::LegacyPost {
                slug: slug.to_string(),
            },
            [slug] if content.is_landing(slug) => Self::Landing {
                slug: slug.to_string(),
            },
            _ => fallback(),
        }
    }

    pub const fn template(&self) -> Template {
        match self {
            Self::Home => Template::Home,
            Self::About => Template::About,
            Self::Contact => Template::Contact,
            Self::ServiceAreas => Template::ServiceAreas,
            Self::Location { .. } => Template::Location,
            Self::ServiceDetail { .. } => Template::ServiceDetail,
            Self::Landing { .. } => Template::Landing,
            Self::Insights => Template::Insights,
            Self::Post { .. } => Template::Post,
            Self::LegacyPost { .. } => Template::LegacyPost,
            Self::Page { .. } => Template::Page,
        }
    }
}

/// `/service-areas/{location}/`
pub fn location_url(location_slug: &str) -> UrlPath {
    UrlPath::from_segments(&[SERVICE_AREAS_SLUG, location_slug])
}

/// `/service-areas/{location}/{kind}-{service}/`
pub fn service_url(location_slug: &str, kind: ServiceKind, service: &str) -> UrlPath {
    let segment = kind.segment(service);
    UrlPath::from_segments(&[SERVICE_AREAS_SLUG, location_slug, segment.as_str()])
}

/// `/industry-insights/{slug}/`
pub fn post_url(slug: &str) -> UrlPath {
    UrlPath::from_segments(&[INSIGHTS_SLUG, slug])
}
