use rusqlite::Connection;

use super::section::{Section, decoded, layout, non_empty};
use super::{Body, ContentError, ContentResult, LandingBody, Link, Meta, Resolved, Resolver};
use crate::core::UrlPath;
use crate::store;
use crate::utils::slug::title_case_slug;

impl Resolver<'_> {
    pub(super) fn landing(
        &self,
        conn: &Connection,
        url: &UrlPath,
        slug: &str,
    ) -> ContentResult<Resolved> {
        let not_found = || ContentError::NotFound(url.clone());
        if !self.config.content.is_landing(slug) {
            return Err(not_found());
        }
        let row = store::landing_by_slug(conn, slug)?.ok_or_else(not_found)?;

        let page_title = decoded(row.page_title.as_ref())
            .or_else(|| decoded(row.page.title.as_ref()))
            .unwrap_or_else(|| title_case_slug(slug));

        let sections = store::landing_sections(conn, row.id)?
            .iter()
            .enumerate()
            .map(|(index, section)| {
                Section::from_row(section).map_err(|source| ContentError::MalformedTable {
                    url: url.clone(),
                    index,
                    source,
                })
            })
            .collect::<ContentResult<Vec<_>>>()?;

        let body = LandingBody {
            page_title: page_title.clone(),
            hero_text: decoded(row.hero_text.as_ref()),
            hero_image: non_empty(row.hero_image.as_ref()),
            sections: layout(sections),
        };

        let meta = Meta::from_page(&row.page, &page_title);
        Ok((meta, vec![Link::text(title_case_slug(slug))], Body::Landing(body)))
    }
}
