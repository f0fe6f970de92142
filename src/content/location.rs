//! Location and service detail pages.

use rusqlite::Connection;

use super::section::decoded;
use super::{Body, ContentError, ContentResult, Link, LocationBody, Meta, Resolved, Resolver, ServiceList};
use crate::core::template::{SERVICE_AREAS_SLUG, location_url, service_url};
use crate::core::{ServiceKind, UrlPath, parse_service_mention};
use crate::store;
use crate::utils::html::decode_entities;

impl Resolver<'_> {
    pub(super) fn location(
        &self,
        conn: &Connection,
        url: &UrlPath,
        location: &str,
    ) -> ContentResult<Resolved> {
        let row = store::location_by_slug(conn, location)?
            .ok_or_else(|| ContentError::NotFound(url.clone()))?;
        let slug = row.slug.as_str();
        let name = decode_entities(&row.name).into_owned();

        let service_list = |kind: ServiceKind, intro: Option<&String>| ServiceList {
            kind,
            intro: decoded(intro),
            services: self
                .config
                .content
                .catalog
                .iter()
                .map(|service| {
                    Link::new(
                        self.config.content.service_label(service),
                        service_url(slug, kind, service),
                    )
                })
                .collect(),
        };

        let featured = store::location_related_services(conn, row.id)?
            .iter()
            .map(|mention| mention_link(mention, slug))
            .collect();

        let nearby = store::location_nearby_areas(conn, row.id)?
            .into_iter()
            .map(|area| Link::new(decode_entities(&area.name), location_url(&area.slug)))
            .collect();

        let body = LocationBody {
            tagline: decoded(row.tagline.as_ref()),
            about: row.about.iter().filter_map(|p| decoded(p.as_ref())).collect(),
            residential: service_list(ServiceKind::Residential, row.residential_intro.as_ref()),
            commercial: service_list(ServiceKind::Commercial, row.commercial_intro.as_ref()),
            featured,
            nearby,
            closing_cta: decoded(row.closing_cta.as_ref()),
            name: name.clone(),
        };

        let meta = Meta::from_page(&row.page, &name);
        let crumbs = vec![service_areas_crumb(), Link::text(name)];
        Ok((meta, crumbs, Body::Location(body)))
    }
}

/// `Service Areas` breadcrumb linking to the index.
pub(super) fn service_areas_crumb() -> Link {
    Link::new("Service Areas", UrlPath::from_segments(&[SERVICE_AREAS_SLUG]))
}

/// Link a service mention such as `"Residential Ev Charger Installation"` to
/// its page at `location_slug`. Mentions without a service kind stay text.
pub(super) fn mention_link(mention: &str, location_slug: &str) -> Link {
    let label = decode_entities(mention.trim()).into_owned();
    match parse_service_mention(&label) {
        Some((kind, service)) => Link::new(label, service_url(location_slug, kind, &service)),
        None => Link::text(label),
    }
}
