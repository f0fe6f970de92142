//! Legacy WordPress pages kept in the optional `pages` table.
//!
//! Each row stores the WordPress REST payload as JSON. Only the rendered
//! title and content are used. Top-level location pages (slug without `/`)
//! also list their old `{location}/{kind}-{service}` children.

use rusqlite::Connection;
use serde::Deserialize;

use super::{Body, ContentError, ContentResult, LegacyPageBody, Link, Meta, Resolved, Resolver};
use crate::core::{ServiceKind, UrlPath};
use crate::store::{self, LEGACY_PAGES_TABLE};
use crate::utils::html::decode_entities;
use crate::utils::slug::title_case_slug;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WpPage {
    date: Option<String>,
    title: Rendered,
    content: Rendered,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Rendered {
    rendered: String,
}

impl Resolver<'_> {
    pub(super) fn legacy_page(
        &self,
        conn: &Connection,
        url: &UrlPath,
        slug: &str,
    ) -> ContentResult<Resolved> {
        let not_found = || ContentError::NotFound(url.clone());
        if !store::has_table(conn, LEGACY_PAGES_TABLE)? {
            return Err(not_found());
        }

        let (key, data) = lookup(conn, url, slug)?.ok_or_else(not_found)?;
        let page: WpPage =
            serde_json::from_str(&data).map_err(|source| ContentError::MalformedLegacy {
                url: url.clone(),
                source,
            })?;

        let title = decode_entities(page.title.rendered.trim()).into_owned();
        let title = if title.is_empty() {
            title_case_slug(key.rsplit('/').next().unwrap_or(&key))
        } else {
            title
        };

        let (residential, commercial) = if key.contains('/') {
            (Vec::new(), Vec::new())
        } else {
            (
                service_area_links(conn, &key, ServiceKind::Residential)?,
                service_area_links(conn, &key, ServiceKind::Commercial)?,
            )
        };

        let body = LegacyPageBody {
            title: title.clone(),
            content: page.content.rendered,
            residential,
            commercial,
        };
        let meta = Meta {
            date: page.date,
            ..Meta::titled(title.clone())
        };
        Ok((meta, vec![Link::text(title)], Body::Page(body)))
    }
}

/// Find a page by its full path, then by the last segment alone.
fn lookup(
    conn: &Connection,
    url: &UrlPath,
    slug: &str,
) -> ContentResult<Option<(String, String)>> {
    let mut keys = vec![url.trimmed()];
    if slug != url.trimmed() {
        keys.push(slug);
    }
    for key in keys.into_iter().filter(|k| !k.is_empty()) {
        if let Some(data) = store::legacy_page_by_slug(conn, key)? {
            return Ok(Some((key.to_string(), data)));
        }
    }
    Ok(None)
}

/// `encino/residential-panel-upgrades` becomes "Panel Upgrades" linking to
/// `/encino/residential-panel-upgrades/`.
fn service_area_links(
    conn: &Connection,
    location: &str,
    kind: ServiceKind,
) -> ContentResult<Vec<Link>> {
    let prefix = format!("{}-", kind.as_str());
    let links = store::legacy_service_area_pages(conn, location, kind.as_str())?
        .into_iter()
        .map(|slug| {
            let tail = slug.rsplit('/').next().unwrap_or(&slug);
            let label = title_case_slug(tail.strip_prefix(&prefix).unwrap_or(tail));
            Link::new(label, UrlPath::from_page(&slug))
        })
        .collect();
    Ok(links)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;
    use crate::content::Document;
    use crate::store::fixture::Fixture;

    fn resolve(fx: &Fixture, url: &str) -> ContentResult<Document> {
        let conn = fx.store.connect().unwrap();
        let config = test_parse_config("");
        Resolver::new(&config).resolve(&conn, &UrlPath::from_page(url))
    }

    #[test]
    fn test_legacy_location_page() {
        let fx = Fixture::new();
        let doc = resolve(&fx, "/encino/").unwrap();
        assert_eq!(doc.meta.title, "Encino – Electricians");

        let Body::Page(body) = doc.body else {
            panic!("expected page body");
        };
        assert!(body.content.contains("href=\"/service-areas/\""));

        let labels: Vec<_> = body.residential.iter().map(|l| l.label.as_str()).collect();
        assert_eq!(labels, vec!["Lighting", "Panel Upgrades"]);
        assert_eq!(
            body.residential[1].href.as_ref().unwrap(),
            "/encino/residential-panel-upgrades/"
        );
        assert_eq!(
            body.commercial,
            vec![Link::new(
                "Ev Chargers",
                UrlPath::from_page("/encino/commercial-ev-chargers/")
            )]
        );
    }

    #[test]
    fn test_nested_page_found_by_full_path() {
        let fx = Fixture::new();
        let doc = resolve(&fx, "/encino/residential-lighting/").unwrap();
        assert_eq!(doc.meta.title, "Lighting");
        let Body::Page(body) = doc.body else {
            panic!("expected page body");
        };
        assert!(body.residential.is_empty());
        assert!(body.commercial.is_empty());
    }

    #[test]
    fn test_last_segment_fallback() {
        let fx = Fixture::new();
        // not stored under this path, found by its last segment
        let doc = resolve(&fx, "/old-site/encino/").unwrap();
        assert_eq!(doc.breadcrumbs[0].label, "Encino – Electricians");

        let err = resolve(&fx, "/old-site/residential-lighting/").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_malformed_json() {
        let fx = Fixture::new();
        let err = resolve(&fx, "/broken/").unwrap_err();
        assert!(matches!(err, ContentError::MalformedLegacy { .. }));
    }

    #[test]
    fn test_missing_table_is_not_found() {
        let fx = Fixture::without_optional_tables();
        let err = resolve(&fx, "/encino/").unwrap_err();
        assert!(err.is_not_found());
    }
}
