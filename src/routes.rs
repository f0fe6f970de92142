//! Route table: every URL the site exports.
//!
//! Static routes come first, then one route per database row that has a
//! page of its own. Legacy WordPress pages and `/blog/` aliases still
//! resolve, but are never enumerated.

use rusqlite::Connection;

use crate::config::SiteConfig;
use crate::core::template::{
    ABOUT_SLUG, CONTACT_SLUG, INSIGHTS_SLUG, SERVICE_AREAS_SLUG, location_url, post_url,
    service_url,
};
use crate::core::{ServiceKind, Template, UrlPath};
use crate::debug;
use crate::store::{self, StoreResult};
use crate::utils::slug::slugify;

/// Enumerate every exported route, sorted by URL and deduplicated.
pub fn enumerate(conn: &Connection, config: &SiteConfig) -> StoreResult<Vec<(UrlPath, Template)>> {
    let mut routes = vec![
        (UrlPath::root(), Template::Home),
        (UrlPath::from_segments(&[ABOUT_SLUG]), Template::About),
        (UrlPath::from_segments(&[CONTACT_SLUG]), Template::Contact),
        (UrlPath::from_segments(&[SERVICE_AREAS_SLUG]), Template::ServiceAreas),
        (UrlPath::from_segments(&[INSIGHTS_SLUG]), Template::Insights),
    ];

    for slug in &config.content.landing {
        if store::landing_by_slug(conn, slug)?.is_some() {
            routes.push((UrlPath::from_segments(&[slug]), Template::Landing));
        } else {
            debug!("routes"; "no landing page stored for `{}`, skipping", slug);
        }
    }

    routes.extend(
        store::location_slugs(conn)?
            .iter()
            .map(|slug| (location_url(slug), Template::Location)),
    );

    for key in store::service_keys(conn)? {
        let Some(kind) = ServiceKind::from_slug(&key.service_type.to_ascii_lowercase()) else {
            debug!(
                "routes";
                "unknown service type `{}` for {}, skipping",
                key.service_type,
                key.location
            );
            continue;
        };
        let location = slugify(&key.location);
        if location.is_empty() || key.service_name.is_empty() {
            continue;
        }
        routes.push((
            service_url(&location, kind, &key.service_name),
            Template::ServiceDetail,
        ));
    }

    routes.extend(
        store::post_slugs(conn)?
            .iter()
            .map(|slug| (post_url(slug), Template::Post)),
    );

    routes.sort();
    routes.dedup_by(|a, b| a.0 == b.0);
    Ok(routes)
}
