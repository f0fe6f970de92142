//! Content export.
//!
//! Build phases:
//! - **Init** - open the database, clean the output when asked
//! - **Enumerate** - collect the route table
//! - **Export** - resolve routes in parallel, write changed documents
//! - **Finalize** - route manifest, stale document pruning, summary

mod pipeline;

use anyhow::{Context, Result};
use rustc_hash::FxHashSet;

use crate::{
    cli::common::open_site,
    config::SiteConfig,
    core::is_shutdown,
    freshness::{WriteOutcome, prune_stale},
    log,
    logger::ProgressLine,
    utils::plural_count,
};

pub use pipeline::MANIFEST_FILE;

/// Counts reported at the end of a build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildSummary {
    pub routes: usize,
    pub written: usize,
    pub unchanged: usize,
    pub removed: usize,
    pub interrupted: bool,
}

/// Export every route of the site.
///
/// Pipeline: init -> enumerate -> export -> manifest -> prune
pub fn build_site(config: &SiteConfig, quiet: bool) -> Result<BuildSummary> {
    pipeline::init_output(config)?;
    let (store, routes) = open_site(config)?;
    let output_dir = config.build.output_dir();

    if !quiet {
        log!(
            "build";
            "exporting {} from {}",
            plural_count(routes.len(), "route"),
            store.path().display()
        );
    }

    let progress = (!quiet).then(|| ProgressLine::new("build", &[("routes", routes.len())]));
    let results =
        pipeline::export_routes(config, &store, &routes, &output_dir, progress.as_ref());
    if let Some(p) = progress {
        p.finish();
    }
    let exported: Vec<_> = results?.into_iter().flatten().collect();

    let mut summary = BuildSummary {
        routes: routes.len(),
        ..BuildSummary::default()
    };
    for e in &exported {
        match e.outcome {
            WriteOutcome::Written => summary.written += 1,
            WriteOutcome::Unchanged => summary.unchanged += 1,
        }
    }

    // partial export: leave the manifest and older documents alone
    if is_shutdown() || exported.len() < routes.len() {
        summary.interrupted = true;
        log!("build"; "interrupted after {}", plural_count(exported.len(), "route"));
        return Ok(summary);
    }

    pipeline::write_manifest(&output_dir, &exported, config.build.pretty)?;

    let keep: FxHashSet<_> = exported.into_iter().map(|e| e.path).collect();
    summary.removed = prune_stale(&output_dir, &keep)
        .with_context(|| format!("failed to prune {}", output_dir.display()))?;

    if !quiet {
        log!(
            "build";
            "done: {}, {} written, {} unchanged, {} removed",
            plural_count(summary.routes, "route"),
            summary.written,
            summary.unchanged,
            summary.removed
        );
    }
    Ok(summary)
}
