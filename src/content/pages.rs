//! Config-driven pages: home, about, contact and the service-area index.
//!
//! Bodies come from `[site.*]`. A `pages_all` row with the page's slug, when
//! present, overrides the default meta.

use rusqlite::Connection;

use super::section::{Section, layout, non_empty};
use super::{
    AboutBody, Body, ContactBlock, ContactBody, ContentError, ContentResult, HomeBody, Link, Meta,
    Resolved, Resolver, ServiceAreasBody,
};
use crate::config::SiteConfig;
use crate::core::UrlPath;
use crate::core::template::{ABOUT_SLUG, CONTACT_SLUG, SERVICE_AREAS_SLUG, location_url};
use crate::store::{self, PAGE_SECTIONS_TABLE};
use crate::utils::html::decode_entities;
use crate::utils::slug::title_case_slug;

const HOME_SLUG: &str = "home";

impl Resolver<'_> {
    pub(super) fn home(&self, conn: &Connection) -> ContentResult<Resolved> {
        let info = &self.config.site.info;
        let meta = self.static_meta(conn, HOME_SLUG, &info.title)?;

        let mut services = Vec::new();
        for slug in &self.config.content.landing {
            if let Some(row) = store::landing_by_slug(conn, slug)? {
                let label = row
                    .page_title
                    .or(row.page.title)
                    .map(|t| decode_entities(&t).into_owned())
                    .unwrap_or_else(|| title_case_slug(slug));
                services.push(Link::new(label, UrlPath::from_segments(&[slug])));
            }
        }

        let body = HomeBody {
            tagline: non_empty(Some(&info.tagline)),
            description: non_empty(Some(&info.description)),
            contact: contact_block(self.config),
            licenses: self.config.site.business.all_licenses(),
            service_area: non_empty(Some(&self.config.site.business.service_area)),
            services,
        };
        Ok((meta, Vec::new(), Body::Home(body)))
    }

    pub(super) fn about(&self, conn: &Connection, url: &UrlPath) -> ContentResult<Resolved> {
        let meta = self.static_meta(conn, ABOUT_SLUG, "About Us")?;

        let mut sections = Vec::new();
        if store::has_table(conn, PAGE_SECTIONS_TABLE)?
            && let Some(page) = store::page_by_slug(conn, ABOUT_SLUG)?
        {
            for (index, row) in store::page_sections(conn, page.id)?.iter().enumerate() {
                let section =
                    Section::from_row(row).map_err(|source| ContentError::MalformedTable {
                        url: url.clone(),
                        index,
                        source,
                    })?;
                sections.push(section);
            }
        }

        let business = &self.config.site.business;
        let body = AboutBody {
            description: non_empty(Some(&self.config.site.info.description)),
            licenses: business.all_licenses(),
            service_area: non_empty(Some(&business.service_area)),
            sections: layout(sections),
        };
        let crumbs = vec![Link::text(meta.title.clone())];
        Ok((meta, crumbs, Body::About(body)))
    }

    pub(super) fn contact(&self, conn: &Connection) -> ContentResult<Resolved> {
        let meta = self.static_meta(conn, CONTACT_SLUG, "Contact Us")?;
        let business = &self.config.site.business;
        let body = ContactBody {
            contact: contact_block(self.config),
            licenses: business.all_licenses(),
            service_area: non_empty(Some(&business.service_area)),
        };
        let crumbs = vec![Link::text(meta.title.clone())];
        Ok((meta, crumbs, Body::Contact(body)))
    }

    pub(super) fn service_areas(&self, conn: &Connection) -> ContentResult<Resolved> {
        let meta = self.static_meta(conn, SERVICE_AREAS_SLUG, "Service Areas")?;
        let locations = store::location_index(conn)?
            .into_iter()
            .map(|loc| Link::new(decode_entities(&loc.name), location_url(&loc.slug)))
            .collect();
        let crumbs = vec![Link::text(meta.title.clone())];
        Ok((
            meta,
            crumbs,
            Body::ServiceAreas(ServiceAreasBody { locations }),
        ))
    }

    /// Default meta for a config-driven page, overridden by its stored row.
    pub(super) fn static_meta(
        &self,
        conn: &Connection,
        slug: &str,
        title: &str,
    ) -> ContentResult<Meta> {
        let mut meta = Meta {
            title: title.to_string(),
            meta_description: non_empty(Some(&self.config.site.info.description)),
            ..Meta::default()
        };
        if let Some(page) = store::page_by_slug(conn, slug)? {
            meta.override_with(&page);
        }
        Ok(meta)
    }
}

fn contact_block(config: &SiteConfig) -> ContactBlock {
    let contact = &config.site.contact;
    ContactBlock {
        phone: non_empty(Some(&contact.phone)),
        phone_href: contact.phone_href(),
        email: non_empty(Some(&contact.email)),
        email_href: contact.email_href(),
        address: non_empty(Some(&contact.address_line())),
        hours: non_empty(Some(&contact.hours)),
    }
}

#[cfg(test)]
mod tests {
    use crate::config::{SiteConfig, test_parse_config};
    use crate::content::{Body, LayoutItem, Resolver};
    use crate::core::UrlPath;
    use crate::store::fixture::Fixture;

    const SITE: &str = r#"
[site.contact]
phone = "(323) 555-0100"
email = "office@voltline.test"
city = "Los Angeles"
state = "CA"

[site.business]
license = "C-10 #100200"
licenses = ["C-10 #100200", "B #300400"]
service_area = "Los Angeles County"
"#;

    fn site_config() -> SiteConfig {
        let mut config = test_parse_config(SITE);
        config.site.info.title = "Voltline Electric".into();
        config.site.info.tagline = "Power done right".into();
        config.site.info.description = "Licensed electricians in Los Angeles.".into();
        config
    }

    #[test]
    fn test_home_uses_config_and_stored_meta() {
        let fx = Fixture::new();
        let conn = fx.store.connect().unwrap();
        let config = site_config();
        let doc = Resolver::new(&config)
            .resolve(&conn, &UrlPath::root())
            .unwrap();

        // stored row overrides the config title
        assert_eq!(doc.meta.title, "Home");
        assert_eq!(
            doc.meta.meta_title.as_deref(),
            Some("Voltline Electric | Los Angeles Electricians")
        );
        assert_eq!(
            doc.meta.meta_description.as_deref(),
            Some("Licensed electricians in Los Angeles.")
        );
        assert!(doc.breadcrumbs.is_empty());

        let Body::Home(body) = doc.body else {
            panic!("expected home body");
        };
        assert_eq!(body.tagline.as_deref(), Some("Power done right"));
        assert_eq!(body.licenses, vec!["C-10 #100200", "B #300400"]);
        assert_eq!(body.contact.phone_href.as_deref(), Some("tel:3235550100"));
        assert_eq!(body.contact.address.as_deref(), Some("Los Angeles, CA"));
        assert_eq!(body.contact.hours, None);
        // only the landing page present in the database
        assert_eq!(body.services.len(), 1);
        assert_eq!(body.services[0].label, "LED Retrofit Services for Business");
        assert_eq!(
            body.services[0].href.as_ref().unwrap(),
            "/led-retrofit-services/"
        );
    }

    #[test]
    fn test_contact_without_stored_row() {
        let fx = Fixture::new();
        let conn = fx.store.connect().unwrap();
        let config = site_config();
        let doc = Resolver::new(&config)
            .resolve(&conn, &UrlPath::from_page("/contact-us/"))
            .unwrap();
        assert_eq!(doc.meta.title, "Contact Us");
        assert_eq!(doc.meta.meta_title, None);
        assert_eq!(doc.breadcrumbs[0].label, "Contact Us");
        assert!(matches!(doc.body, Body::Contact(_)));
    }

    #[test]
    fn test_about_sections_from_optional_table() {
        let fx = Fixture::new();
        let conn = fx.store.connect().unwrap();
        let config = site_config();
        let resolver = Resolver::new(&config);
        let doc = resolver
            .resolve(&conn, &UrlPath::from_page("/about-us/"))
            .unwrap();
        assert_eq!(doc.meta.meta_title.as_deref(), Some("About Voltline Electric"));
        let Body::About(body) = doc.body else {
            panic!("expected about body");
        };
        assert_eq!(body.sections.len(), 1);
        assert!(matches!(&body.sections[0], LayoutItem::Single(s) if s.body.len() == 2));

        let bare = Fixture::without_optional_tables();
        let conn = bare.store.connect().unwrap();
        let doc = resolver
            .resolve(&conn, &UrlPath::from_page("/about-us/"))
            .unwrap();
        let Body::About(body) = doc.body else {
            panic!("expected about body");
        };
        assert!(body.sections.is_empty());
    }

    #[test]
    fn test_service_area_index_sorted_by_name() {
        let fx = Fixture::new();
        let conn = fx.store.connect().unwrap();
        let config = test_parse_config("");
        let doc = Resolver::new(&config)
            .resolve(&conn, &UrlPath::from_page("/service-areas/"))
            .unwrap();
        let Body::ServiceAreas(body) = doc.body else {
            panic!("expected service areas body");
        };
        let labels: Vec<_> = body.locations.iter().map(|l| l.label.as_str()).collect();
        assert_eq!(labels, vec!["Culver City", "Hollywood"]);
    }
}
