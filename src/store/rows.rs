//! Plain row types returned by the store queries.
//!
//! Text columns that the database may leave NULL are `Option<String>`.
//! Nothing here is decoded or normalized; that happens during resolution.

use rusqlite::Row;

/// Columns shared by every `pages_all` row, selected first in joins.
pub(crate) const PAGE_COLUMNS: &str =
    "p.id, p.slug, p.title, p.date, p.meta_title, p.meta_description, p.canonical_url, p.og_image";

/// Number of columns in [`PAGE_COLUMNS`].
pub(crate) const PAGE_COLUMN_COUNT: usize = 8;

/// A `pages_all` row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageRow {
    pub id: i64,
    pub slug: String,
    pub title: Option<String>,
    pub date: Option<String>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub canonical_url: Option<String>,
    pub og_image: Option<String>,
}

impl PageRow {
    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            slug: row.get(1)?,
            title: row.get(2)?,
            date: row.get(3)?,
            meta_title: row.get(4)?,
            meta_description: row.get(5)?,
            canonical_url: row.get(6)?,
            og_image: row.get(7)?,
        })
    }
}

/// A `location_pages` row joined with its page.
#[derive(Debug, Clone, Default)]
pub struct LocationRow {
    pub page: PageRow,
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub tagline: Option<String>,
    pub about: [Option<String>; 2],
    pub residential_intro: Option<String>,
    pub commercial_intro: Option<String>,
    pub closing_cta: Option<String>,
}

impl LocationRow {
    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        let n = PAGE_COLUMN_COUNT;
        Ok(Self {
            page: PageRow::from_row(row)?,
            id: row.get(n)?,
            name: row.get(n + 1)?,
            slug: row.get(n + 2)?,
            tagline: row.get(n + 3)?,
            about: [row.get(n + 4)?, row.get(n + 5)?],
            residential_intro: row.get(n + 6)?,
            commercial_intro: row.get(n + 7)?,
            closing_cta: row.get(n + 8)?,
        })
    }
}

/// Entry of the service-area index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationEntry {
    pub name: String,
    pub slug: String,
}

/// Nearby area of a location page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NearbyArea {
    pub name: String,
    pub slug: String,
}

/// Distinct `(location, service_type, service_name)` of a service page.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct ServiceKey {
    pub location: String,
    pub service_type: String,
    pub service_name: String,
}

/// A `service_pages` row joined with its page.
#[derive(Debug, Clone, Default)]
pub struct ServiceRow {
    pub page: PageRow,
    pub id: i64,
    pub location: String,
    pub service_type: String,
    pub service_name: String,
    pub hero_intro: Option<String>,
    pub closing_content: Option<String>,
}

impl ServiceRow {
    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        let n = PAGE_COLUMN_COUNT;
        Ok(Self {
            page: PageRow::from_row(row)?,
            id: row.get(n)?,
            location: row.get(n + 1)?,
            service_type: row.get(n + 2)?,
            service_name: row.get(n + 3)?,
            hero_intro: row.get(n + 4)?,
            closing_content: row.get(n + 5)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenefitRow {
    pub heading: Option<String>,
    pub content: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaqRow {
    pub question: Option<String>,
    pub answer: Option<String>,
}

/// A `service_landing_pages` row joined with its page.
#[derive(Debug, Clone, Default)]
pub struct LandingRow {
    pub page: PageRow,
    pub id: i64,
    pub page_title: Option<String>,
    pub hero_text: Option<String>,
    pub hero_image: Option<String>,
}

impl LandingRow {
    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        let n = PAGE_COLUMN_COUNT;
        Ok(Self {
            page: PageRow::from_row(row)?,
            id: row.get(n)?,
            page_title: row.get(n + 1)?,
            hero_text: row.get(n + 2)?,
            hero_image: row.get(n + 3)?,
        })
    }
}

/// Raw section row, shared by landing and about pages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionRow {
    pub section_type: Option<String>,
    pub heading: Option<String>,
    pub subheading: Option<String>,
    pub content: Option<String>,
    pub table_data: Option<String>,
}

impl SectionRow {
    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            section_type: row.get(0)?,
            heading: row.get(1)?,
            subheading: row.get(2)?,
            content: row.get(3)?,
            table_data: row.get(4)?,
        })
    }
}

/// A `posts` row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostRow {
    pub id: i64,
    pub slug: String,
    pub title: Option<String>,
    pub date: Option<String>,
    pub markdown: Option<String>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub canonical_url: Option<String>,
    pub og_image: Option<String>,
}

impl PostRow {
    pub(crate) const COLUMNS: &'static str = "id, slug, title, date, markdown, meta_title, meta_description, canonical_url, og_image";

    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            slug: row.get(1)?,
            title: row.get(2)?,
            date: row.get(3)?,
            markdown: row.get(4)?,
            meta_title: row.get(5)?,
            meta_description: row.get(6)?,
            canonical_url: row.get(7)?,
            og_image: row.get(8)?,
        })
    }
}
