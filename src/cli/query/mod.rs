//! Query command implementation.
//!
//! Resolves URL paths against the content database and prints their
//! documents as a JSON array. With `--list`, prints the route table instead.
//! Without URLs, every enumerated route is resolved.

mod collect;
mod output;
mod types;

use anyhow::Result;

use crate::cli::args::QueryArgs;
use crate::cli::common::{expand_stdin_args, open_site};
use crate::config::SiteConfig;
use crate::core::UrlPath;
use crate::log;
use crate::utils::plural_count;

use types::RouteRow;

/// Execute query command
pub fn run_query(args: &QueryArgs, config: &SiteConfig) -> Result<()> {
    let (store, routes) = open_site(config)?;

    if args.list {
        let rows: Vec<_> = routes
            .into_iter()
            .map(|(url, template)| RouteRow { url, template })
            .collect();
        log!("query"; "{}", plural_count(rows.len(), "route"));
        return output::output_results(&rows, args);
    }

    let urls: Vec<UrlPath> = expand_stdin_args(&args.urls)?
        .iter()
        .map(|url| UrlPath::from_browser(url))
        .collect();
    let urls = if urls.is_empty() {
        routes.into_iter().map(|(url, _)| url).collect()
    } else {
        urls
    };

    log!("query"; "querying {}", plural_count(urls.len(), "url"));
    let results = collect::query_urls(&urls, &store, config)?;
    log!("query"; "found {}", plural_count(results.documents.len(), "document"));

    if results.is_empty() {
        return Ok(());
    }
    output::output_results(&results, args)
}
