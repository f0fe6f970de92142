//! Industry insight posts and their index.

use rusqlite::Connection;

use super::markdown::scan;
use super::section::{decoded, non_empty};
use super::{
    Body, ContentError, ContentResult, InsightsBody, Link, Meta, PostBody, PostSummary, Resolved,
    Resolver,
};
use crate::core::UrlPath;
use crate::core::template::{INSIGHTS_SLUG, post_url};
use crate::store::{self, PostRow};
use crate::utils::date::DateTimeUtc;
use crate::utils::slug::title_case_slug;

const INSIGHTS_TITLE: &str = "Industry Insights";

impl Resolver<'_> {
    pub(super) fn insights(&self, conn: &Connection) -> ContentResult<Resolved> {
        let meta = self.static_meta(conn, INSIGHTS_SLUG, INSIGHTS_TITLE)?;
        let posts = store::post_index(conn, self.config.content.insights_limit())?
            .iter()
            .map(|post| PostSummary {
                title: post_title(post),
                href: post_url(&post.slug),
                date: post.date.clone(),
                display_date: display_date(post.date.as_deref()),
                excerpt: decoded(post.meta_description.as_ref())
                    .or_else(|| scan(post.markdown.as_deref().unwrap_or_default()).summary),
            })
            .collect();

        let crumbs = vec![Link::text(meta.title.clone())];
        Ok((meta, crumbs, Body::Insights(InsightsBody { posts })))
    }

    /// Resolve a post. `/blog/{slug}/` aliases land here too.
    pub(super) fn post(
        &self,
        conn: &Connection,
        url: &UrlPath,
        slug: &str,
    ) -> ContentResult<Resolved> {
        let post = store::post_by_slug(conn, slug)?
            .ok_or_else(|| ContentError::NotFound(url.clone()))?;

        let markdown = post.markdown.clone().unwrap_or_default();
        let scanned = scan(&markdown);
        let title = post_title(&post);

        let body = PostBody {
            summary: scanned.summary,
            headings: scanned.headings,
            word_count: scanned.word_count,
            display_date: display_date(post.date.as_deref()),
            canonical: post_url(&post.slug),
            markdown,
        };

        let meta = Meta {
            title: title.clone(),
            meta_title: post.meta_title,
            meta_description: post.meta_description,
            canonical_url: post.canonical_url,
            og_image: post.og_image,
            date: post.date,
        };
        let crumbs = vec![
            Link::new(INSIGHTS_TITLE, UrlPath::from_segments(&[INSIGHTS_SLUG])),
            Link::text(title),
        ];
        Ok((meta, crumbs, Body::Post(body)))
    }
}

fn post_title(post: &PostRow) -> String {
    decoded(post.title.as_ref()).unwrap_or_else(|| title_case_slug(&post.slug))
}

/// `2019-11-05T10:00:00` -> `November 5, 2019`. Unparseable dates are dropped.
fn display_date(date: Option<&str>) -> Option<String> {
    let date = non_empty(date)?;
    DateTimeUtc::parse(&date).map(DateTimeUtc::to_long_date)
}
