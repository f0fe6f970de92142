//! Content resolution.
//!
//! Turns a URL into a [`Document`] by parsing the route, querying the rows
//! its template needs, and normalizing the text for rendering.
//!
//! ```text
//! UrlPath ──► Route::parse ──► template resolver ──► Document
//!                                     │
//!                                     └── store queries (read-only)
//! ```
//!
//! Every resolver returns [`ContentError::NotFound`] when its row is missing,
//! so callers can tell a bad URL from a broken database.

mod document;
mod error;
mod landing;
mod legacy;
mod location;
pub mod markdown;
mod pages;
mod posts;
pub mod section;
mod service;

use rusqlite::Connection;

pub use document::*;
pub use error::ContentError;
pub use section::{Block, LayoutItem, Section, SectionKind, TableData};

use crate::config::SiteConfig;
use crate::core::{Route, UrlPath};

pub type ContentResult<T> = Result<T, ContentError>;

/// Resolves URLs against the content database.
///
/// Holds only configuration. The connection is passed per call so each
/// worker thread can bring its own.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    config: &'a SiteConfig,
}

impl<'a> Resolver<'a> {
    pub fn new(config: &'a SiteConfig) -> Self {
        Self { config }
    }

    #[inline]
    pub fn route(&self, url: &UrlPath) -> Route {
        Route::parse(url, &self.config.content)
    }

    /// Resolve a URL into its document.
    pub fn resolve(&self, conn: &Connection, url: &UrlPath) -> ContentResult<Document> {
        let route = self.route(url);
        self.resolve_route(conn, url, &route)
    }

    /// Resolve an already parsed route.
    pub fn resolve_route(
        &self,
        conn: &Connection,
        url: &UrlPath,
        route: &Route,
    ) -> ContentResult<Document> {
        let (meta, breadcrumbs, body) = match route {
            Route::Home => self.home(conn)?,
            Route::About => self.about(conn, url)?,
            Route::Contact => self.contact(conn)?,
            Route::ServiceAreas => self.service_areas(conn)?,
            Route::Location { location } => self.location(conn, url, location)?,
            Route::ServiceDetail {
                location,
                kind,
                service,
            } => self.service(conn, url, location, *kind, service)?,
            Route::Landing { slug } => self.landing(conn, url, slug)?,
            Route::Insights => self.insights(conn)?,
            Route::Post { slug } | Route::LegacyPost { slug } => self.post(conn, url, slug)?,
            Route::Page { slug } => self.legacy_page(conn, url, slug)?,
        };

        Ok(Document {
            url: url.clone(),
            template: route.template(),
            meta,
            breadcrumbs,
            body,
        })
    }
}

/// What each template resolver produces; the URL and template are filled in
/// by [`Resolver::resolve_route`].
type Resolved = (Meta, Vec<Link>, Body);
