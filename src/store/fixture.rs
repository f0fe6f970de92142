//! Test database builder.
//!
//! Creates the content schema in a temp directory and seeds a small site:
//! two locations, two service pages, one landing page, two posts and a few
//! legacy WordPress pages.

use std::path::PathBuf;

use rusqlite::Connection;
use tempfile::TempDir;

use super::ContentStore;

const SCHEMA: &str = r#"
CREATE TABLE pages_all (
    id INTEGER PRIMARY KEY,
    slug TEXT UNIQUE NOT NULL,
    title TEXT,
    date TEXT,
    meta_title TEXT,
    meta_description TEXT,
    canonical_url TEXT,
    og_image TEXT
);
CREATE TABLE location_pages (
    id INTEGER PRIMARY KEY,
    page_id INTEGER NOT NULL,
    location_name TEXT NOT NULL,
    location_slug TEXT NOT NULL,
    tagline TEXT,
    about_paragraph_1 TEXT,
    about_paragraph_2 TEXT,
    residential_intro TEXT,
    commercial_intro TEXT,
    closing_cta TEXT
);
CREATE TABLE location_related_services (
    location_page_id INTEGER NOT NULL,
    service_name TEXT NOT NULL,
    display_order INTEGER NOT NULL
);
CREATE TABLE location_nearby_areas (
    location_page_id INTEGER NOT NULL,
    area_name TEXT NOT NULL,
    area_slug TEXT NOT NULL,
    display_order INTEGER NOT NULL
);
CREATE TABLE service_pages (
    id INTEGER PRIMARY KEY,
    page_id INTEGER NOT NULL,
    location TEXT NOT NULL,
    service_type TEXT NOT NULL,
    service_name TEXT NOT NULL,
    hero_intro TEXT,
    closing_content TEXT
);
CREATE TABLE service_benefits (
    service_page_id INTEGER NOT NULL,
    heading TEXT,
    content TEXT,
    benefit_order INTEGER NOT NULL
);
CREATE TABLE service_offerings (
    service_page_id INTEGER NOT NULL,
    offering TEXT NOT NULL,
    offering_order INTEGER NOT NULL
);
CREATE TABLE service_faqs (
    service_page_id INTEGER NOT NULL,
    question TEXT,
    answer TEXT,
    faq_order INTEGER NOT NULL
);
CREATE TABLE service_related_services (
    service_page_id INTEGER NOT NULL,
    service_name TEXT NOT NULL,
    display_order INTEGER NOT NULL
);
CREATE TABLE service_nearby_areas (
    service_page_id INTEGER NOT NULL,
    area_name TEXT NOT NULL,
    display_order INTEGER NOT NULL
);
CREATE TABLE service_landing_pages (
    id INTEGER PRIMARY KEY,
    page_id INTEGER NOT NULL,
    page_title TEXT,
    hero_text TEXT,
    hero_image TEXT
);
CREATE TABLE service_landing_sections (
    landing_page_id INTEGER NOT NULL,
    section_type TEXT,
    heading TEXT,
    subheading TEXT,
    content TEXT,
    table_data TEXT,
    section_order INTEGER NOT NULL
);
CREATE TABLE posts (
    id INTEGER PRIMARY KEY,
    slug TEXT UNIQUE NOT NULL,
    title TEXT,
    date TEXT,
    markdown TEXT,
    meta_title TEXT,
    meta_description TEXT,
    canonical_url TEXT,
    og_image TEXT
);
"#;

const OPTIONAL_SCHEMA: &str = r#"
CREATE TABLE page_sections (
    page_id INTEGER NOT NULL,
    section_type TEXT,
    heading TEXT,
    content TEXT,
    section_order INTEGER NOT NULL
);
CREATE TABLE pages (
    id INTEGER PRIMARY KEY,
    date TEXT,
    slug TEXT UNIQUE NOT NULL,
    title TEXT,
    content TEXT,
    data TEXT
);
"#;

const SEED: &str = r#"
INSERT INTO pages_all (id, slug, title, date, meta_title, meta_description) VALUES
    (1, 'home', 'Home', NULL, 'Voltline Electric | Los Angeles Electricians', NULL),
    (2, 'about-us', 'About Us', NULL, 'About Voltline Electric', 'Family owned since 1998.'),
    (10, 'service-areas/hollywood', 'Hollywood', NULL, NULL, NULL),
    (11, 'service-areas/culver-city', 'Culver City', NULL, NULL, NULL),
    (20, 'service-areas/culver-city/residential-ev-charger-installation',
        'EV Charger Installation in Culver City', '2024-03-01', NULL, 'Home EV charging in Culver City.'),
    (21, 'service-areas/hollywood/commercial-electrical-panel-upgrades',
        'Panel Upgrades in Hollywood', NULL, NULL, NULL),
    (30, 'led-retrofit-services', 'LED Retrofit Services', NULL, 'LED Retrofits', NULL);

INSERT INTO location_pages VALUES
    (1, 10, 'Hollywood', 'hollywood', 'Electricians in Hollywood',
        'Hollywood homes &amp; studios.', '', 'Residential intro.', 'Commercial intro.', 'Call today.'),
    (2, 11, 'Culver City', 'culver-city', NULL, 'Culver City crews.', NULL, NULL, NULL, NULL);

INSERT INTO location_related_services VALUES
    (1, 'Residential Ev Charger Installation', 2),
    (1, 'Commercial Electrical Panel Upgrades', 1),
    (1, 'Solar Consulting', 3);

INSERT INTO location_nearby_areas VALUES
    (1, 'West Hollywood', 'west-hollywood', 2),
    (1, 'Los Feliz', 'los-feliz', 1);

INSERT INTO service_pages VALUES
    (1, 20, 'culver city', 'residential', 'ev-charger-installation',
        'Fast &amp; safe home charging.', 'Book your install.'),
    (2, 21, 'hollywood', 'commercial', 'electrical-panel-upgrades', NULL, NULL);

INSERT INTO service_benefits VALUES
    (1, 'Code-Compliant Wiring', 'Every install is permitted.', 2),
    (1, 'Licensed &amp; Insured', 'Fully bonded crews.', 1);

INSERT INTO service_offerings VALUES
    (1, 'Level 2 charger mounting', 2),
    (1, 'Residential Electrical Panel Upgrades', 1);

INSERT INTO service_faqs VALUES
    (1, 'How long does it take?', 'Usually one day.', 1);

INSERT INTO service_related_services VALUES
    (1, 'Residential Electrical Panel Upgrades', 1);

INSERT INTO service_nearby_areas VALUES
    (1, 'Mar Vista', 2),
    (1, 'Palms', 1);

INSERT INTO service_landing_pages VALUES
    (1, 30, 'LED Retrofit Services for Business', 'Cut lighting costs.', '/led.mp4');

INSERT INTO service_landing_sections VALUES
    (1, 'table', 'Savings', NULL, NULL,
        '{"headers":["Fixture","Savings"],"rows":[["T8","40%"],["Metal halide","60%"]]}', 4),
    (1, 'content', 'Why Retrofit', NULL,
        'Why Retrofit
LED fixtures last longer.

• Lower bills
• Lower bills
• Less maintenance', NULL, 1),
    (1, 'info_card', 'Warehouses', 'High bay', 'High bay | Bright, even light.', NULL, 2),
    (1, 'info_card', 'Offices', '', 'Flicker-free panels.', NULL, 3);

INSERT INTO posts (id, slug, title, date, markdown, meta_description) VALUES
    (1, 'ev-charging-at-home', 'EV Charging at Home', '2019-11-05T10:00:00',
        '# EV Charging at Home

Level 2 chargers need a **dedicated** circuit.

## Permits

Most cities require one.', NULL),
    (2, 'panel-upgrade-signs', 'Signs You Need a Panel Upgrade', '2021-02-14',
        'Flickering lights are the first sign.', 'Five warning signs.');

"#;

const OPTIONAL_SEED: &str = r#"
INSERT INTO page_sections VALUES
    (2, 'content', 'Our Story', 'Founded in 1998.

Family owned.', 1);

INSERT INTO pages (id, date, slug, title, content, data) VALUES
    (100, '2019-01-01', 'encino', NULL, NULL,
        '{"id":100,"slug":"encino","title":{"rendered":"Encino &#8211; Electricians"},"content":{"rendered":"<p>Serving <a href=\"/service-areas/\">Encino</a>.</p>"}}'),
    (101, '2019-01-01', 'encino/residential-panel-upgrades', NULL, NULL,
        '{"id":101,"slug":"encino/residential-panel-upgrades","title":{"rendered":"Panel Upgrades"},"content":{"rendered":""}}'),
    (102, '2019-01-01', 'encino/residential-lighting', NULL, NULL,
        '{"id":102,"slug":"encino/residential-lighting","title":{"rendered":"Lighting"},"content":{"rendered":""}}'),
    (103, '2019-01-01', 'encino/commercial-ev-chargers', NULL, NULL,
        '{"id":103,"slug":"encino/commercial-ev-chargers","title":{"rendered":"EV Chargers"},"content":{"rendered":""}}'),
    (104, '2019-01-01', 'broken', NULL, NULL, '{not json');
"#;

/// A seeded content database that lives as long as the fixture.
pub struct Fixture {
    _dir: TempDir,
    pub path: PathBuf,
    pub store: ContentStore,
}

impl Fixture {
    /// Full schema with seed rows.
    pub fn new() -> Self {
        Self::build(&[SCHEMA, OPTIONAL_SCHEMA, SEED, OPTIONAL_SEED])
    }

    /// Required tables only, no rows.
    pub fn empty() -> Self {
        Self::build(&[SCHEMA])
    }

    /// Seed rows without the optional `pages` and `page_sections` tables.
    pub fn without_optional_tables() -> Self {
        Self::build(&[SCHEMA, SEED])
    }

    fn build(batches: &[&str]) -> Self {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("site.db");
        let conn = Connection::open(&path).unwrap();
        for batch in batches {
            conn.execute_batch(batch).unwrap();
        }
        drop(conn);

        let store = ContentStore::open(&path).unwrap();
        Self {
            _dir: dir,
            path,
            store,
        }
    }

    /// Run extra SQL through a writable connection.
    pub fn execute(&self, sql: &str) {
        let conn = Connection::open(&self.path).unwrap();
        conn.execute_batch(sql).unwrap();
    }
}
