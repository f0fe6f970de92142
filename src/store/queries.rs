//! Queries against the content database.
//!
//! Every query borrows a connection from the caller. Child rows always come
//! back sorted by their order column.

use rusqlite::{Connection, OptionalExtension, Row, params};

use super::StoreResult;
use super::rows::*;

// ============================================================================
// Helpers
// ============================================================================

fn collect<T>(
    conn: &Connection,
    sql: &str,
    params: impl rusqlite::Params,
    map: impl FnMut(&Row<'_>) -> rusqlite::Result<T>,
) -> StoreResult<Vec<T>> {
    let mut stmt = conn.prepare_cached(sql)?;
    let rows = stmt
        .query_map(params, map)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

fn strings(conn: &Connection, sql: &str, id: i64) -> StoreResult<Vec<String>> {
    collect(conn, sql, params![id], |row| row.get(0))
}

/// Escape `%`, `_` and `\` for a `LIKE ... ESCAPE '\'` pattern.
fn escape_like(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

// ============================================================================
// Pages
// ============================================================================

/// `pages_all` row by slug.
pub fn page_by_slug(conn: &Connection, slug: &str) -> StoreResult<Option<PageRow>> {
    let sql = format!("SELECT {PAGE_COLUMNS} FROM pages_all p WHERE p.slug = ?1");
    Ok(conn
        .prepare_cached(&sql)?
        .query_row(params![slug], PageRow::from_row)
        .optional()?)
}

/// Ordered `page_sections` of a page. The table is optional; check with
/// [`has_table`](super::has_table) first.
pub fn page_sections(conn: &Connection, page_id: i64) -> StoreResult<Vec<SectionRow>> {
    collect(
        conn,
        "SELECT section_type, heading, NULL, content, NULL
         FROM page_sections
         WHERE page_id = ?1
         ORDER BY section_order",
        params![page_id],
        SectionRow::from_row,
    )
}

// ============================================================================
// Locations
// ============================================================================

pub fn location_by_slug(conn: &Connection, slug: &str) -> StoreResult<Option<LocationRow>> {
    let sql = format!(
        "SELECT {PAGE_COLUMNS},
                lp.id, lp.location_name, lp.location_slug, lp.tagline,
                lp.about_paragraph_1, lp.about_paragraph_2,
                lp.residential_intro, lp.commercial_intro, lp.closing_cta
         FROM pages_all p
         JOIN location_pages lp ON p.id = lp.page_id
         WHERE lp.location_slug = ?1"
    );
    Ok(conn
        .prepare_cached(&sql)?
        .query_row(params![slug], LocationRow::from_row)
        .optional()?)
}

/// Every location slug, deduplicated and sorted.
pub fn location_slugs(conn: &Connection) -> StoreResult<Vec<String>> {
    collect(
        conn,
        "SELECT DISTINCT location_slug FROM location_pages ORDER BY location_slug",
        [],
        |row| row.get(0),
    )
}

/// Locations for the service-area index, sorted by name.
pub fn location_index(conn: &Connection) -> StoreResult<Vec<LocationEntry>> {
    collect(
        conn,
        "SELECT location_name, location_slug
         FROM location_pages
         ORDER BY location_name, location_slug",
        [],
        |row| {
            Ok(LocationEntry {
                name: row.get(0)?,
                slug: row.get(1)?,
            })
        },
    )
}

pub fn location_related_services(conn: &Connection, location_id: i64) -> StoreResult<Vec<String>> {
    strings(
        conn,
        "SELECT service_name FROM location_related_services
         WHERE location_page_id = ?1
         ORDER BY display_order",
        location_id,
    )
}

pub fn location_nearby_areas(conn: &Connection, location_id: i64) -> StoreResult<Vec<NearbyArea>> {
    collect(
        conn,
        "SELECT area_name, area_slug FROM location_nearby_areas
         WHERE location_page_id = ?1
         ORDER BY display_order",
        params![location_id],
        |row| {
            Ok(NearbyArea {
                name: row.get(0)?,
                slug: row.get(1)?,
            })
        },
    )
}

// ============================================================================
// Services
// ============================================================================

/// Every distinct `(location, type, name)` that has a service page.
///
/// Joins `pages_all` the same way [`services_by_kind`] does, so every key
/// listed here resolves.
pub fn service_keys(conn: &Connection) -> StoreResult<Vec<ServiceKey>> {
    collect(
        conn,
        "SELECT DISTINCT sp.location, sp.service_type, sp.service_name
         FROM service_pages sp
         JOIN pages_all p ON p.id = sp.page_id
         ORDER BY sp.location, sp.service_type, sp.service_name",
        [],
        |row| {
            Ok(ServiceKey {
                location: row.get(0)?,
                service_type: row.get(1)?,
                service_name: row.get(2)?,
            })
        },
    )
}

/// Service pages of one kind and name across all locations.
///
/// Locations are stored as display names, so the caller matches the URL
/// segment against the slugified location. `service_type` is compared
/// case-insensitively and must be passed lowercase.
pub fn services_by_kind(
    conn: &Connection,
    service_type: &str,
    service_name: &str,
) -> StoreResult<Vec<ServiceRow>> {
    let sql = format!(
        "SELECT {PAGE_COLUMNS},
                sp.id, sp.location, sp.service_type, sp.service_name,
                sp.hero_intro, sp.closing_content
         FROM pages_all p
         JOIN service_pages sp ON p.id = sp.page_id
         WHERE lower(sp.service_type) = ?1 AND sp.service_name = ?2
         ORDER BY sp.id"
    );
    collect(
        conn,
        &sql,
        params![service_type, service_name],
        ServiceRow::from_row,
    )
}

pub fn service_benefits(conn: &Connection, service_id: i64) -> StoreResult<Vec<BenefitRow>> {
    collect(
        conn,
        "SELECT heading, content FROM service_benefits
         WHERE service_page_id = ?1
         ORDER BY benefit_order",
        params![service_id],
        |row| {
            Ok(BenefitRow {
                heading: row.get(0)?,
                content: row.get(1)?,
            })
        },
    )
}

pub fn service_offerings(conn: &Connection, service_id: i64) -> StoreResult<Vec<String>> {
    strings(
        conn,
        "SELECT offering FROM service_offerings
         WHERE service_page_id = ?1
         ORDER BY offering_order",
        service_id,
    )
}

pub fn service_faqs(conn: &Connection, service_id: i64) -> StoreResult<Vec<FaqRow>> {
    collect(
        conn,
        "SELECT question, answer FROM service_faqs
         WHERE service_page_id = ?1
         ORDER BY faq_order",
        params![service_id],
        |row| {
            Ok(FaqRow {
                question: row.get(0)?,
                answer: row.get(1)?,
            })
        },
    )
}

pub fn service_related_services(conn: &Connection, service_id: i64) -> StoreResult<Vec<String>> {
    strings(
        conn,
        "SELECT service_name FROM service_related_services
         WHERE service_page_id = ?1
         ORDER BY display_order",
        service_id,
    )
}

pub fn service_nearby_areas(conn: &Connection, service_id: i64) -> StoreResult<Vec<String>> {
    strings(
        conn,
        "SELECT area_name FROM service_nearby_areas
         WHERE service_page_id = ?1
         ORDER BY display_order",
        service_id,
    )
}

// ============================================================================
// Landing pages
// ============================================================================

pub fn landing_by_slug(conn: &Connection, slug: &str) -> StoreResult<Option<LandingRow>> {
    let sql = format!(
        "SELECT {PAGE_COLUMNS},
                slp.id, slp.page_title, slp.hero_text, slp.hero_image
         FROM pages_all p
         JOIN service_landing_pages slp ON p.id = slp.page_id
         WHERE p.slug = ?1"
    );
    Ok(conn
        .prepare_cached(&sql)?
        .query_row(params![slug], LandingRow::from_row)
        .optional()?)
}

pub fn landing_sections(conn: &Connection, landing_id: i64) -> StoreResult<Vec<SectionRow>> {
    collect(
        conn,
        "SELECT section_type, heading, subheading, content, table_data
         FROM service_landing_sections
         WHERE landing_page_id = ?1
         ORDER BY section_order",
        params![landing_id],
        SectionRow::from_row,
    )
}

// ============================================================================
// Posts
// ============================================================================

pub fn post_slugs(conn: &Connection) -> StoreResult<Vec<String>> {
    collect(conn, "SELECT slug FROM posts ORDER BY slug", [], |row| {
        row.get(0)
    })
}

pub fn post_by_slug(conn: &Connection, slug: &str) -> StoreResult<Option<PostRow>> {
    let sql = format!("SELECT {} FROM posts WHERE slug = ?1", PostRow::COLUMNS);
    Ok(conn
        .prepare_cached(&sql)?
        .query_row(params![slug], PostRow::from_row)
        .optional()?)
}

/// Posts, newest first. `None` lists every post.
pub fn post_index(conn: &Connection, limit: Option<usize>) -> StoreResult<Vec<PostRow>> {
    // SQLite treats a negative LIMIT as no limit.
    let limit = limit.map_or(-1, |n| i64::try_from(n).unwrap_or(i64::MAX));
    let sql = format!(
        "SELECT {} FROM posts ORDER BY date DESC, slug LIMIT ?1",
        PostRow::COLUMNS
    );
    collect(conn, &sql, params![limit], PostRow::from_row)
}

// ============================================================================
// Legacy pages
// ============================================================================

/// Raw WordPress JSON of a legacy page.
pub fn legacy_page_by_slug(conn: &Connection, slug: &str) -> StoreResult<Option<String>> {
    Ok(conn
        .prepare_cached("SELECT data FROM pages WHERE slug = ?1")?
        .query_row(params![slug], |row| row.get(0))
        .optional()?)
}

/// Every legacy page slug, ordered.
pub fn legacy_page_slugs(conn: &Connection) -> StoreResult<Vec<String>> {
    collect(conn, "SELECT slug FROM pages ORDER BY slug", [], |row| {
        row.get(0)
    })
}

/// Slugs of legacy service-area pages under `{location}/{kind}-`.
pub fn legacy_service_area_pages(
    conn: &Connection,
    location: &str,
    kind: &str,
) -> StoreResult<Vec<String>> {
    let pattern = format!("{}/{}-%", escape_like(location), escape_like(kind));
    collect(
        conn,
        "SELECT slug FROM pages WHERE slug LIKE ?1 ESCAPE '\\' ORDER BY slug",
        params![pattern],
        |row| row.get(0),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::fixture::Fixture;

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("los_angeles"), "los\\_angeles");
        assert_eq!(escape_like("100%"), "100\\%");
        assert_eq!(escape_like("plain"), "plain");
    }

    #[test]
    fn test_page_by_slug() {
        let fx = Fixture::new();
        let conn = fx.store.connect().unwrap();
        let page = page_by_slug(&conn, "about-us").unwrap().unwrap();
        assert_eq!(page.title.as_deref(), Some("About Us"));
        assert_eq!(page.meta_title.as_deref(), Some("About Voltline Electric"));
        assert!(page_by_slug(&conn, "nope").unwrap().is_none());
    }

    #[test]
    fn test_location_queries() {
        let fx = Fixture::new();
        let conn = fx.store.connect().unwrap();

        assert_eq!(
            location_slugs(&conn).unwrap(),
            vec!["culver-city", "hollywood"]
        );
        let index = location_index(&conn).unwrap();
        assert_eq!(index[0].name, "Culver City");
        assert_eq!(index[1].slug, "hollywood");

        let loc = location_by_slug(&conn, "hollywood").unwrap().unwrap();
        assert_eq!(loc.name, "Hollywood");
        assert_eq!(loc.page.slug, "service-areas/hollywood");

        // stored out of order, returned by display_order
        let related = location_related_services(&conn, loc.id).unwrap();
        assert_eq!(related[0], "Commercial Electrical Panel Upgrades");
        let nearby = location_nearby_areas(&conn, loc.id).unwrap();
        assert_eq!(nearby[0].slug, "los-feliz");
        assert_eq!(nearby[1].name, "West Hollywood");
    }

    #[test]
    fn test_service_queries() {
        let fx = Fixture::new();
        let conn = fx.store.connect().unwrap();

        let keys = service_keys(&conn).unwrap();
        assert_eq!(keys.len(), 2);
        assert_eq!(keys[0].location, "culver city");

        let rows = services_by_kind(&conn, "residential", "ev-charger-installation").unwrap();
        assert_eq!(rows.len(), 1);
        let id = rows[0].id;

        let benefits = service_benefits(&conn, id).unwrap();
        assert_eq!(benefits[0].heading.as_deref(), Some("Licensed &amp; Insured"));
        assert_eq!(service_offerings(&conn, id).unwrap().len(), 2);
        assert_eq!(service_faqs(&conn, id).unwrap().len(), 1);
        assert_eq!(
            service_nearby_areas(&conn, id).unwrap(),
            vec!["Palms", "Mar Vista"]
        );
        assert!(services_by_kind(&conn, "industrial", "x").unwrap().is_empty());
    }

    #[test]
    fn test_landing_queries() {
        let fx = Fixture::new();
        let conn = fx.store.connect().unwrap();
        let landing = landing_by_slug(&conn, "led-retrofit-services")
            .unwrap()
            .unwrap();
        let sections = landing_sections(&conn, landing.id).unwrap();
        let kinds: Vec<_> = sections
            .iter()
            .map(|s| s.section_type.as_deref().unwrap_or_default())
            .collect();
        assert_eq!(kinds, vec!["content", "info_card", "info_card", "table"]);
    }

    #[test]
    fn test_post_index_order_and_limit() {
        let fx = Fixture::new();
        let conn = fx.store.connect().unwrap();
        let all = post_index(&conn, None).unwrap();
        let slugs: Vec<_> = all.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["panel-upgrade-signs", "ev-charging-at-home"]);

        let one = post_index(&conn, Some(1)).unwrap();
        assert_eq!(one.len(), 1);
        assert_eq!(one[0].slug, "panel-upgrade-signs");

        assert_eq!(post_slugs(&conn).unwrap().len(), 2);
        assert!(post_by_slug(&conn, "ev-charging-at-home").unwrap().is_some());
    }

    #[test]
    fn test_legacy_queries() {
        let fx = Fixture::new();
        let conn = fx.store.connect().unwrap();
        assert!(legacy_page_by_slug(&conn, "encino").unwrap().is_some());

        let residential = legacy_service_area_pages(&conn, "encino", "residential").unwrap();
        assert_eq!(
            residential,
            vec!["encino/residential-lighting", "encino/residential-panel-upgrades"]
        );
        let commercial = legacy_service_area_pages(&conn, "encino", "commercial").unwrap();
        assert_eq!(commercial.len(), 1);

        let slugs = legacy_page_slugs(&conn).unwrap();
        assert_eq!(slugs.len(), 5);
        assert_eq!(slugs[0], "broken");
    }
}
