use anyhow::{Context, Result, anyhow};
use rayon::prelude::*;

use crate::config::SiteConfig;
use crate::content::{ContentError, Resolver};
use crate::core::UrlPath;
use crate::log;
use crate::store::ContentStore;

use super::types::QueryResult;

/// Resolve each URL in input order. Unknown URLs are warned about and skipped.
pub(super) fn query_urls(
    urls: &[UrlPath],
    store: &ContentStore,
    config: &SiteConfig,
) -> Result<QueryResult> {
    let resolver = Resolver::new(config);

    let resolved: Vec<_> = urls
        .par_iter()
        .map_init(
            || store.connect(),
            |conn, url| -> Result<_> {
                let conn = conn.as_ref().map_err(|e| anyhow!("{e}"))?;
                match resolver.resolve(conn, url) {
                    Ok(doc) => Ok(Some(doc)),
                    Err(ContentError::NotFound(url)) => {
                        log!("warn"; "no content for {}, skipping", url);
                        Ok(None)
                    }
                    Err(e) => Err(e).with_context(|| format!("failed to resolve {url}")),
                }
            },
        )
        .collect::<Result<_>>()?;

    Ok(QueryResult {
        documents: resolved.into_iter().flatten().collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;
    use crate::store::fixture::Fixture;

    #[test]
    fn test_query_skips_unknown_urls() {
        let fx = Fixture::new();
        let config = test_parse_config("");
        let urls = [
            UrlPath::from_browser("/about-us"),
            UrlPath::from_browser("/no-such-page/"),
            UrlPath::from_browser("/service-areas/hollywood/"),
        ];

        let result = query_urls(&urls, &fx.store, &config).unwrap();
        let found: Vec<_> = result.documents.iter().map(|d| d.url.as_str()).collect();
        assert_eq!(found, vec!["/about-us/", "/service-areas/hollywood/"]);
    }

    #[test]
    fn test_query_propagates_broken_content() {
        let fx = Fixture::new();
        let config = test_parse_config("");
        let urls = [UrlPath::from_browser("/broken/")];
        let err = query_urls(&urls, &fx.store, &config).unwrap_err();
        assert!(err.to_string().contains("/broken/"));
    }
}
