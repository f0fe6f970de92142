//! Link and shape scanning of resolved documents.

use rustc_hash::FxHashSet;

use crate::content::{Body, Document, LayoutItem, markdown};
use crate::core::LinkKind;
use crate::utils::html;
use crate::utils::plural_count;

/// A link found in a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedLink {
    pub dest: String,
    /// Where it came from: `href`, `html` or `markdown`.
    pub attr: &'static str,
}

impl ScannedLink {
    #[inline]
    pub fn kind(&self) -> LinkKind<'_> {
        LinkKind::parse(&self.dest)
    }
}

/// Every distinct link in a document, in first-seen order.
///
/// Covers structured hrefs, anchors inside legacy HTML and links in post
/// markdown.
pub fn scan_links(doc: &Document) -> Vec<ScannedLink> {
    let mut seen = FxHashSet::default();
    let mut links = Vec::new();
    let mut push = |dest: String, attr: &'static str| {
        if seen.insert(dest.clone()) {
            links.push(ScannedLink { dest, attr });
        }
    };

    for href in doc.hrefs() {
        push(href.as_str().to_string(), "href");
    }
    match &doc.body {
        Body::Page(body) => {
            for dest in html::extract_links(&body.content) {
                push(dest, "html");
            }
        }
        Body::Post(body) => {
            for dest in markdown::extract_links(&body.markdown) {
                push(dest, "markdown");
            }
        }
        _ => {}
    }

    links
}

/// Shape problems of a document as `(target, reason)` pairs.
pub fn scan_shape(doc: &Document) -> Vec<(String, String)> {
    let mut issues = Vec::new();

    match &doc.body {
        Body::Landing(body) => {
            if body.sections.is_empty() {
                issues.push(("sections".to_string(), "landing page has no sections".to_string()));
            }
            check_tables(&body.sections, &mut issues);
        }
        Body::About(body) => check_tables(&body.sections, &mut issues),
        Body::ServiceDetail(body) if body.benefits.is_empty() && body.offerings.is_empty() => {
            issues.push((
                "body".to_string(),
                "service page has no benefits and no offerings".to_string(),
            ));
        }
        _ => {}
    }

    issues
}

fn check_tables(items: &[LayoutItem], issues: &mut Vec<(String, String)>) {
    let sections = items.iter().flat_map(LayoutItem::sections);
    for (index, section) in sections.enumerate() {
        let Some(table) = &section.table else {
            continue;
        };
        let target = match &section.heading {
            Some(heading) => format!("table `{heading}`"),
            None => format!("table in section {}", index + 1),
        };
        for row in table.ragged_rows() {
            issues.push((
                target.clone(),
                format!(
                    "row {} has {}, expected {}",
                    row + 1,
                    plural_count(table.rows[row].len(), "cell"),
                    table.headers.len()
                ),
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;
    use crate::content::Resolver;
    use crate::core::UrlPath;
    use crate::store::fixture::Fixture;

    fn resolve(fx: &Fixture, url: &str) -> Document {
        let conn = fx.store.connect().unwrap();
        let config = test_parse_config("");
        Resolver::new(&config)
            .resolve(&conn, &UrlPath::from_page(url))
            .unwrap()
    }

    #[test]
    fn test_scan_links_legacy_html() {
        let fx = Fixture::new();
        let links = scan_links(&resolve(&fx, "/encino/"));
        assert!(links.contains(&ScannedLink {
            dest: "/service-areas/".to_string(),
            attr: "html",
        }));
        assert!(links.iter().any(|l| l.dest == "/encino/residential-lighting/"));
    }

    #[test]
    fn test_scan_links_deduplicates() {
        let fx = Fixture::new();
        let links = scan_links(&resolve(&fx, "/service-areas/hollywood/"));
        let count = links
            .iter()
            .filter(|l| l.dest == "/service-areas/hollywood/commercial-electrical-panel-upgrades/")
            .count();
        // listed in the catalog and among featured services
        assert_eq!(count, 1);
    }

    #[test]
    fn test_scan_shape_ragged_table() {
        let fx = Fixture::new();
        fx.execute(
            r#"INSERT INTO service_landing_sections VALUES
                (1, 'table', 'Costs', NULL, NULL, '{"headers":["Item","Cost"],"rows":[["Panel"]]}', 5);"#,
        );
        let issues = scan_shape(&resolve(&fx, "/led-retrofit-services/"));
        assert_eq!(
            issues,
            vec![(
                "table `Costs`".to_string(),
                "row 1 has 1 cell, expected 2".to_string()
            )]
        );
    }

    #[test]
    fn test_scan_shape_empty_service() {
        let fx = Fixture::new();
        let issues = scan_shape(&resolve(
            &fx,
            "/service-areas/hollywood/commercial-electrical-panel-upgrades/",
        ));
        assert_eq!(issues.len(), 1);
        assert!(issues[0].1.contains("no benefits"));

        let issues = scan_shape(&resolve(
            &fx,
            "/service-areas/culver-city/residential-ev-charger-installation/",
        ));
        assert!(issues.is_empty());
    }
}
