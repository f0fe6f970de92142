//! Resolved content documents.
//!
//! A [`Document`] is what gets exported for one route: shared metadata,
//! breadcrumbs, and a template-specific [`Body`]. Everything serializes to
//! JSON for the downstream renderer.

use serde::Serialize;

use super::section::LayoutItem;
use crate::core::{ServiceKind, Template, UrlPath};
use crate::store::PageRow;
use crate::utils::html::decode_entities;

/// Resolved content for one route.
#[derive(Debug, Clone, Serialize)]
pub struct Document {
    pub url: UrlPath,
    pub template: Template,
    pub meta: Meta,
    pub breadcrumbs: Vec<Link>,
    pub body: Body,
}

impl Document {
    /// Every link target in the document, in emission order.
    pub fn hrefs(&self) -> Vec<&UrlPath> {
        let mut out: Vec<&UrlPath> = self
            .breadcrumbs
            .iter()
            .filter_map(|l| l.href.as_ref())
            .collect();
        self.body.collect_hrefs(&mut out);
        out
    }
}

/// Page metadata. Stored fields pass through untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Meta {
    pub title: String,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub canonical_url: Option<String>,
    pub og_image: Option<String>,
    pub date: Option<String>,
}

impl Meta {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Meta from a `pages_all` row. Falls back to `fallback_title` when the
    /// row has no title.
    pub fn from_page(page: &PageRow, fallback_title: &str) -> Self {
        Self {
            title: page
                .title
                .as_deref()
                .map(|t| decode_entities(t).into_owned())
                .unwrap_or_else(|| fallback_title.to_string()),
            meta_title: page.meta_title.clone(),
            meta_description: page.meta_description.clone(),
            canonical_url: page.canonical_url.clone(),
            og_image: page.og_image.clone(),
            date: page.date.clone(),
        }
    }

    /// Replace each field the row sets.
    pub fn override_with(&mut self, page: &PageRow) {
        if let Some(title) = &page.title {
            self.title = decode_entities(title).into_owned();
        }
        let fields = [
            (&mut self.meta_title, &page.meta_title),
            (&mut self.meta_description, &page.meta_description),
            (&mut self.canonical_url, &page.canonical_url),
            (&mut self.og_image, &page.og_image),
            (&mut self.date, &page.date),
        ];
        for (target, value) in fields {
            if value.is_some() {
                target.clone_from(value);
            }
        }
    }
}

/// A label with an optional site-root target.
///
/// Used for breadcrumbs, service lists and anything else that may or may
/// not be clickable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<UrlPath>,
}

impl Link {
    pub fn new(label: impl Into<String>, href: UrlPath) -> Self {
        Self {
            label: label.into(),
            href: Some(href),
        }
    }

    pub fn text(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            href: None,
        }
    }
}

/// Template-specific payload.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Body {
    Home(HomeBody),
    About(AboutBody),
    Contact(ContactBody),
    ServiceAreas(ServiceAreasBody),
    Location(LocationBody),
    ServiceDetail(ServiceBody),
    Landing(LandingBody),
    Insights(InsightsBody),
    Post(PostBody),
    Page(LegacyPageBody),
}

impl Body {
    fn collect_hrefs<'a>(&'a self, out: &mut Vec<&'a UrlPath>) {
        fn links<'a>(items: &'a [Link], out: &mut Vec<&'a UrlPath>) {
            out.extend(items.iter().filter_map(|l| l.href.as_ref()));
        }

        match self {
            Self::Home(body) => links(&body.services, out),
            Self::About(_) | Self::Contact(_) => {}
            Self::ServiceAreas(body) => links(&body.locations, out),
            Self::Location(body) => {
                links(&body.residential.services, out);
                links(&body.commercial.services, out);
                links(&body.featured, out);
                links(&body.nearby, out);
            }
            Self::ServiceDetail(body) => {
                links(&body.offerings, out);
                links(&body.related, out);
                links(&body.nearby, out);
            }
            Self::Landing(_) => {}
            Self::Insights(body) => out.extend(body.posts.iter().map(|p| &p.href)),
            Self::Post(body) => out.push(&body.canonical),
            Self::Page(body) => {
                links(&body.residential, out);
                links(&body.commercial, out);
            }
        }
    }
}

/// Business contact block shown on static pages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContactBlock {
    pub phone: Option<String>,
    pub phone_href: Option<String>,
    pub email: Option<String>,
    pub email_href: Option<String>,
    pub address: Option<String>,
    pub hours: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HomeBody {
    pub tagline: Option<String>,
    pub description: Option<String>,
    pub contact: ContactBlock,
    pub licenses: Vec<String>,
    pub service_area: Option<String>,
    /// Landing pages present in the database.
    pub services: Vec<Link>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AboutBody {
    pub description: Option<String>,
    pub licenses: Vec<String>,
    pub service_area: Option<String>,
    pub sections: Vec<LayoutItem>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ContactBody {
    pub contact: ContactBlock,
    pub licenses: Vec<String>,
    pub service_area: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ServiceAreasBody {
    pub locations: Vec<Link>,
}

/// Catalog services of one kind offered at a location.
#[derive(Debug, Clone, Serialize)]
pub struct ServiceList {
    pub kind: ServiceKind,
    pub intro: Option<String>,
    pub services: Vec<Link>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LocationBody {
    pub name: String,
    pub tagline: Option<String>,
    pub about: Vec<String>,
    pub residential: ServiceList,
    pub commercial: ServiceList,
    pub featured: Vec<Link>,
    pub nearby: Vec<Link>,
    pub closing_cta: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Card {
    pub heading: Option<String>,
    pub body: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Faq {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ServiceBody {
    pub location: String,
    pub kind: ServiceKind,
    pub service: String,
    pub hero_intro: Option<String>,
    pub benefits: Vec<Card>,
    pub offerings: Vec<Link>,
    pub faqs: Vec<Faq>,
    pub related: Vec<Link>,
    pub closing: Option<String>,
    pub nearby: Vec<Link>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LandingBody {
    pub page_title: String,
    pub hero_text: Option<String>,
    pub hero_image: Option<String>,
    pub sections: Vec<LayoutItem>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PostSummary {
    pub title: String,
    pub href: UrlPath,
    pub date: Option<String>,
    pub display_date: Option<String>,
    pub excerpt: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct InsightsBody {
    pub posts: Vec<PostSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Heading {
    pub level: u8,
    pub text: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PostBody {
    pub markdown: String,
    pub summary: Option<String>,
    pub headings: Vec<Heading>,
    pub word_count: usize,
    pub display_date: Option<String>,
    /// Insight URL of the post, also for `/blog/` aliases.
    pub canonical: UrlPath,
}

#[derive(Debug, Clone, Serialize)]
pub struct LegacyPageBody {
    pub title: String,
    pub content: String,
    pub residential: Vec<Link>,
    pub commercial: Vec<Link>,
}
