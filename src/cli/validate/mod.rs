//! Site validation command.
//!
//! Resolves every route, then checks internal links and content shape.
//! Link targets outside the route table are resolved once and cached, so a
//! catalog link repeated on every location page costs a single lookup.

mod report;
mod scan;

use anyhow::{Result, anyhow, bail};
use parking_lot::RwLock;
use rayon::prelude::*;
use rusqlite::Connection;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::cli::common::{ParallelCollector, open_site};
use crate::config::{SiteConfig, ValidateConfig};
use crate::content::Resolver;
use crate::core::{Template, UrlPath};
use crate::log;
use crate::store::{self, ContentStore, LEGACY_PAGES_TABLE};
use crate::utils::plural_count;

use report::{Check, Finding, ValidationReport};
use scan::{ScannedLink, scan_links, scan_shape};

/// Validate internal links and content shape of every route
pub fn validate_site(config: &SiteConfig) -> Result<()> {
    let checks = &config.validate;
    if !checks.internal.enable && !checks.content.enable {
        log!("validate"; "no checks enabled");
        return Ok(());
    }

    let (store, routes) = open_site(config)?;
    log!("validate"; "validating {}", plural_count(routes.len(), "route"));

    let report = check_routes(config, &store, &routes)?;

    if checks.internal.enable {
        let count = report.error_count(Check::Internal);
        if count > 0 {
            log!("validate"; "found {}", plural_count(count, "broken internal link"));
        } else {
            log!("validate"; "all internal links valid");
        }
    }
    if checks.content.enable {
        let count = report.error_count(Check::Content);
        if count > 0 {
            log!("validate"; "found {}", plural_count(count, "content issue"));
        } else {
            log!("validate"; "all content valid");
        }
    }

    report.print();
    print_summary(&report, checks)
}

/// Run the enabled checks over every route.
///
/// A route that fails to resolve is reported as a content issue.
fn check_routes(
    config: &SiteConfig,
    store: &ContentStore,
    routes: &[(UrlPath, Template)],
) -> Result<ValidationReport> {
    let checks = &config.validate;
    let resolver = Resolver::new(config);
    let targets = TargetIndex::new(&store.connect()?, routes, config)?;
    let findings = ParallelCollector::new();

    routes
        .par_iter()
        .map_init(
            || store.connect(),
            |conn, (url, _)| -> Result<()> {
                let conn = conn.as_ref().map_err(|e| anyhow!("{e}"))?;
                let route = url.as_str();

                let doc = match resolver.resolve(conn, url) {
                    Ok(doc) => doc,
                    Err(e) => {
                        findings.push(Finding::new(Check::Content, route, "document", e.to_string()));
                        return Ok(());
                    }
                };

                if checks.internal.enable {
                    for link in scan_links(&doc) {
                        if let Some(reason) = targets.check(&link, &resolver, conn) {
                            let reason = format!("{reason} (in {})", link.attr);
                            findings.push(Finding::new(Check::Internal, route, link.dest, reason));
                        }
                    }
                }
                if checks.content.enable {
                    for (target, reason) in scan_shape(&doc) {
                        findings.push(Finding::new(Check::Content, route, target, reason));
                    }
                }
                Ok(())
            },
        )
        .collect::<Result<()>>()?;

    let mut report = ValidationReport::default();
    for finding in findings.drain() {
        report.add(finding);
    }
    Ok(report)
}

/// Known link targets plus a cache of resolution results for the rest.
struct TargetIndex {
    known: FxHashSet<String>,
    site_url: Option<url::Url>,
    /// Target -> failure reason (`None` when it resolved).
    resolved: RwLock<FxHashMap<UrlPath, Option<String>>>,
}

impl TargetIndex {
    fn new(conn: &Connection, routes: &[(UrlPath, Template)], config: &SiteConfig) -> Result<Self> {
        let mut known: FxHashSet<String> =
            routes.iter().map(|(url, _)| url.as_str().to_string()).collect();

        if store::has_table(conn, LEGACY_PAGES_TABLE)? {
            known.extend(
                store::legacy_page_slugs(conn)?
                    .iter()
                    .map(|slug| UrlPath::from_page(slug).as_str().to_string()),
            );
        }

        Ok(Self {
            known,
            site_url: config.site.info.parsed_url(),
            resolved: RwLock::new(FxHashMap::default()),
        })
    }

    /// Why a link is broken, or `None` when it is fine or not internal.
    fn check(&self, link: &ScannedLink, resolver: &Resolver, conn: &Connection) -> Option<String> {
        let target = link.kind().internal_target(self.site_url.as_ref())?;
        if self.known.contains(target.as_str()) {
            return None;
        }
        if let Some(cached) = self.resolved.read().get(&target) {
            return cached.clone();
        }

        let reason = match resolver.resolve(conn, &target) {
            Ok(_) => None,
            Err(e) if e.is_not_found() => Some("not found".to_string()),
            Err(e) => Some(e.to_string()),
        };
        self.resolved.write().insert(target, reason.clone());
        reason
    }
}

/// Fail when a check at `error` level found anything.
fn print_summary(report: &ValidationReport, checks: &ValidateConfig) -> Result<()> {
    let mut parts = Vec::new();
    for (check, config) in [
        (Check::Internal, &checks.internal),
        (Check::Content, &checks.content),
    ] {
        let routes = report.route_count(check);
        if routes > 0 && config.is_fatal() {
            parts.push(format!(
                "{} with {} issues",
                plural_count(routes, "route"),
                check.name()
            ));
        }
    }

    if !parts.is_empty() {
        bail!("found {}", parts.join(", "));
    }
    log!("validate"; "{}", report);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ValidateLevel, test_parse_config};
    use crate::routes;
    use crate::store::fixture::Fixture;

    fn run(fx: &Fixture, config: &SiteConfig) -> ValidationReport {
        let conn = fx.store.connect().unwrap();
        let routes = routes::enumerate(&conn, config).unwrap();
        check_routes(config, &fx.store, &routes).unwrap()
    }

    fn targets<'a>(report: &'a ValidationReport, route: &str) -> Vec<&'a str> {
        report
            .internal
            .get(route)
            .map(|errs| errs.iter().map(|e| e.target.as_str()).collect())
            .unwrap_or_default()
    }

    #[test]
    fn test_broken_internal_links() {
        let fx = Fixture::new();
        let config = test_parse_config("[content]\ncatalog = [\"ev-charger-installation\"]");
        let report = run(&fx, &config);

        let hollywood = targets(&report, "/service-areas/hollywood/");
        assert!(hollywood.contains(&"/service-areas/hollywood/residential-ev-charger-installation/"));
        assert!(hollywood.contains(&"/service-areas/los-feliz/"));
        // enumerated service page
        assert!(!hollywood.contains(&"/service-areas/hollywood/commercial-electrical-panel-upgrades/"));

        let culver = targets(&report, "/service-areas/culver-city/");
        assert!(!culver.contains(&"/service-areas/culver-city/residential-ev-charger-installation/"));
        assert!(culver.contains(&"/service-areas/culver-city/commercial-ev-charger-installation/"));

        // breadcrumbs and post links all resolve
        assert!(targets(&report, "/industry-insights/").is_empty());
    }

    #[test]
    fn test_content_issues_reported() {
        let fx = Fixture::new();
        let config = test_parse_config("");
        let report = run(&fx, &config);

        let issues = &report.content["/service-areas/hollywood/commercial-electrical-panel-upgrades/"];
        assert_eq!(issues[0].target, "body");
        assert!(!report.content.contains_key("/led-retrofit-services/"));
    }

    #[test]
    fn test_disabled_checks_report_nothing() {
        let fx = Fixture::new();
        let mut config = test_parse_config("");
        config.validate.internal.enable = false;
        config.validate.content.enable = false;
        let report = run(&fx, &config);
        assert_eq!(report.error_count(Check::Internal), 0);
        assert_eq!(report.error_count(Check::Content), 0);
    }

    #[test]
    fn test_legacy_targets_are_known() {
        let fx = Fixture::new();
        let conn = fx.store.connect().unwrap();
        let config = test_parse_config("");
        let routes = routes::enumerate(&conn, &config).unwrap();
        let index = TargetIndex::new(&conn, &routes, &config).unwrap();
        let resolver = Resolver::new(&config);

        let link = |dest: &str| ScannedLink {
            dest: dest.to_string(),
            attr: "html",
        };
        assert_eq!(index.check(&link("/encino/residential-lighting/"), &resolver, &conn), None);
        assert_eq!(index.check(&link("/blog/ev-charging-at-home/"), &resolver, &conn), None);
        assert_eq!(index.check(&link("mailto:hi@example.com"), &resolver, &conn), None);
        assert_eq!(index.check(&link("#top"), &resolver, &conn), None);
        assert_eq!(
            index.check(&link("/gone/?ref=nav#top"), &resolver, &conn),
            Some("not found".to_string())
        );
        // cached on the second lookup
        assert!(index.resolved.read().contains_key(&UrlPath::from_page("/gone/")));
    }

    #[test]
    fn test_same_host_links_are_internal() {
        let fx = Fixture::new();
        let conn = fx.store.connect().unwrap();
        let config = test_parse_config("url = \"https://voltline.example\"");
        let routes = routes::enumerate(&conn, &config).unwrap();
        let index = TargetIndex::new(&conn, &routes, &config).unwrap();
        let resolver = Resolver::new(&config);

        let link = |dest: &str| ScannedLink {
            dest: dest.to_string(),
            attr: "html",
        };
        assert_eq!(
            index.check(&link("https://voltline.example/nowhere/"), &resolver, &conn),
            Some("not found".to_string())
        );
        assert_eq!(index.check(&link("https://other.example/nowhere/"), &resolver, &conn), None);
    }

    #[test]
    fn test_summary_levels() {
        let mut report = ValidationReport::default();
        report.add(Finding::new(Check::Content, "/", "body", "empty"));

        let mut checks = ValidateConfig::default();
        assert!(print_summary(&report, &checks).is_err());

        checks.content.level = ValidateLevel::Warn;
        assert!(print_summary(&report, &checks).is_ok());
        assert!(print_summary(&ValidationReport::default(), &ValidateConfig::default()).is_ok());
    }
}
