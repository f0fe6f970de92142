use rusqlite::Connection;

use super::location::{mention_link, service_areas_crumb};
use super::section::decoded;
use super::{
    Body, Card, ContentError, ContentResult, Faq, Link, Meta, Resolved, Resolver, ServiceBody,
};
use crate::core::template::{location_url, service_url};
use crate::core::{ServiceKind, UrlPath};
use crate::store::{self, ServiceRow};
use crate::utils::html::decode_entities;
use crate::utils::slug::{slugify, title_case_slug};

impl Resolver<'_> {
    pub(super) fn service(
        &self,
        conn: &Connection,
        url: &UrlPath,
        location: &str,
        kind: ServiceKind,
        service: &str,
    ) -> ContentResult<Resolved> {
        let location = location.to_ascii_lowercase();
        let row = store::services_by_kind(conn, kind.as_str(), service)?
            .into_iter()
            .find(|row| matches_location(row, &location))
            .ok_or_else(|| ContentError::NotFound(url.clone()))?;

        let location_title = title_case_slug(&location);
        let full_name = format!("{} {}", kind.label(), title_case_slug(service));

        let benefits = store::service_benefits(conn, row.id)?
            .into_iter()
            .map(|b| Card {
                heading: decoded(b.heading),
                body: decoded(b.content),
            })
            .filter(|card| card.heading.is_some() || card.body.is_some())
            .collect();

        let offerings = store::service_offerings(conn, row.id)?
            .iter()
            .map(|offering| mention_link(offering, &location))
            .collect();

        let faqs = store::service_faqs(conn, row.id)?
            .into_iter()
            .filter_map(|faq| {
                Some(Faq {
                    question: decoded(faq.question)?,
                    answer: decoded(faq.answer).unwrap_or_default(),
                })
            })
            .collect();

        let related = store::service_related_services(conn, row.id)?
            .iter()
            .map(|mention| mention_link(mention, &location))
            .collect();

        let nearby = store::service_nearby_areas(conn, row.id)?
            .into_iter()
            .map(|area| {
                let area = decode_entities(&area).into_owned();
                let href = service_url(&slugify(&area), kind, service);
                Link::new(area, href)
            })
            .collect();

        let body = ServiceBody {
            location: location_title.clone(),
            kind,
            service: self.config.content.service_label(service),
            hero_intro: decoded(row.hero_intro.as_ref()),
            benefits,
            offerings,
            faqs,
            related,
            closing: decoded(row.closing_content.as_ref()),
            nearby,
        };

        let meta = Meta::from_page(&row.page, &full_name);
        let crumbs = vec![
            service_areas_crumb(),
            Link::new(location_title, location_url(&location)),
            Link::text(full_name),
        ];
        Ok((meta, crumbs, Body::ServiceDetail(body)))
    }
}

/// Service rows store the location as a display name (`"culver city"`).
fn matches_location(row: &ServiceRow, segment: &str) -> bool {
    slugify(&row.location) == segment
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;
    use crate::content::Document;
    use crate::store::fixture::Fixture;

    fn resolve(fx: &Fixture, url: &str) -> crate::content::ContentResult<Document> {
        let conn = fx.store.connect().unwrap();
        let config = test_parse_config("");
        Resolver::new(&config).resolve(&conn, &UrlPath::from_page(url))
    }

    #[test]
    fn test_service_detail() {
        let fx = Fixture::new();
        let doc = resolve(
            &fx,
            "/service-areas/culver-city/residential-ev-charger-installation/",
        )
        .unwrap();

        assert_eq!(doc.meta.title, "EV Charger Installation in Culver City");
        assert_eq!(
            doc.meta.meta_description.as_deref(),
            Some("Home EV charging in Culver City.")
        );
        let labels: Vec<_> = doc.breadcrumbs.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(
            labels,
            vec![
                "Service Areas",
                "Culver City",
                "Residential Ev Charger Installation"
            ]
        );
        assert_eq!(
            doc.breadcrumbs[1].href.as_ref().unwrap(),
            "/service-areas/culver-city/"
        );

        let Body::ServiceDetail(body) = doc.body else {
            panic!("expected service body");
        };
        assert_eq!(body.hero_intro.as_deref(), Some("Fast & safe home charging."));
        assert_eq!(body.benefits[0].heading.as_deref(), Some("Licensed & Insured"));
        assert_eq!(body.benefits.len(), 2);

        assert_eq!(
            body.offerings[0].href.as_ref().unwrap(),
            "/service-areas/culver-city/residential-electrical-panel-upgrades/"
        );
        assert_eq!(body.offerings[1], Link::text("Level 2 charger mounting"));
        assert_eq!(body.faqs[0].answer, "Usually one day.");
        assert_eq!(body.related.len(), 1);
        assert_eq!(body.closing.as_deref(), Some("Book your install."));

        assert_eq!(body.nearby[0].label, "Palms");
        assert_eq!(
            body.nearby[1].href.as_ref().unwrap(),
            "/service-areas/mar-vista/residential-ev-charger-installation/"
        );
    }

    #[test]
    fn test_location_segment_case_insensitive() {
        let fx = Fixture::new();
        let doc = resolve(
            &fx,
            "/service-areas/Culver-City/residential-ev-charger-installation/",
        )
        .unwrap();
        assert_eq!(doc.breadcrumbs[1].label, "Culver City");
    }

    #[test]
    fn test_display_name_location_matches_slug() {
        let fx = Fixture::new();
        fx.execute(
            "INSERT INTO pages_all (id, slug, title) VALUES (40, 'x', 'Panels in La Cañada');
             INSERT INTO service_pages VALUES
                (3, 40, 'La Cañada Flintridge', 'residential', 'electrical-panel-upgrades', NULL, NULL);",
        );
        let doc = resolve(
            &fx,
            "/service-areas/la-canada-flintridge/residential-electrical-panel-upgrades/",
        )
        .unwrap();
        assert_eq!(doc.meta.title, "Panels in La Cañada");
    }

    #[test]
    fn test_wrong_kind_or_location_not_found() {
        let fx = Fixture::new();
        // exists only as residential
        let err = resolve(
            &fx,
            "/service-areas/culver-city/commercial-ev-charger-installation/",
        )
        .unwrap_err();
        assert!(err.is_not_found());

        let err = resolve(
            &fx,
            "/service-areas/hollywood/residential-ev-charger-installation/",
        )
        .unwrap_err();
        assert!(err.is_not_found());
    }
}
