use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use rayon::prelude::*;
use serde::Serialize;

use crate::{
    config::SiteConfig,
    content::Resolver,
    core::{Template, UrlPath, is_shutdown},
    debug,
    freshness::{ContentHash, DOCUMENT_FILE, WriteOutcome, write_if_changed},
    logger::ProgressLine,
    store::ContentStore,
};

/// File name of the route manifest, written at the output root.
pub const MANIFEST_FILE: &str = "routes.json";

/// One exported document.
#[derive(Debug, Clone)]
pub(super) struct Exported {
    pub url: UrlPath,
    pub template: Template,
    pub hash: ContentHash,
    pub path: PathBuf,
    pub outcome: WriteOutcome,
}

#[derive(Debug, Serialize)]
struct ManifestEntry<'a> {
    url: &'a UrlPath,
    template: Template,
    hash: ContentHash,
}

/// Remove the whole output directory when `--clean` is set.
pub(super) fn init_output(config: &SiteConfig) -> Result<()> {
    let output = &config.build.output;
    if config.build.clean && output.exists() {
        fs::remove_dir_all(output)
            .with_context(|| format!("failed to clean output directory {}", output.display()))?;
        debug!("build"; "cleaned {}", output.display());
    }
    Ok(())
}

/// Resolve and write every route in parallel.
///
/// Returns `None` for routes skipped after Ctrl+C. The first resolution
/// failure aborts the export.
pub(super) fn export_routes(
    config: &SiteConfig,
    store: &ContentStore,
    routes: &[(UrlPath, Template)],
    output_dir: &Path,
    progress: Option<&ProgressLine>,
) -> Result<Vec<Option<Exported>>> {
    let resolver = Resolver::new(config);
    let pretty = config.build.pretty;

    routes
        .par_iter()
        .map_init(
            || store.connect(),
            |conn, (url, template)| -> Result<Option<Exported>> {
                if is_shutdown() {
                    return Ok(None);
                }
                let conn = conn.as_ref().map_err(|e| anyhow!("{e}"))?;

                let doc = resolver
                    .resolve(conn, url)
                    .with_context(|| format!("failed to resolve {url}"))?;
                let json = if pretty {
                    serde_json::to_vec_pretty(&doc)?
                } else {
                    serde_json::to_vec(&doc)?
                };

                let path = output_dir.join(url.output_dir()).join(DOCUMENT_FILE);
                let (hash, outcome) = write_if_changed(&path, &json)
                    .with_context(|| format!("failed to write {}", path.display()))?;

                if let Some(p) = progress {
                    p.inc("routes");
                }
                Ok(Some(Exported {
                    url: url.clone(),
                    template: *template,
                    hash,
                    path,
                    outcome,
                }))
            },
        )
        .collect()
}

/// Write `routes.json`, sorted by URL.
pub(super) fn write_manifest(
    output_dir: &Path,
    exported: &[Exported],
    pretty: bool,
) -> Result<WriteOutcome> {
    let entries: Vec<_> = exported
        .iter()
        .map(|e| ManifestEntry {
            url: &e.url,
            template: e.template,
            hash: e.hash,
        })
        .collect();
    let json = if pretty {
        serde_json::to_vec_pretty(&entries)?
    } else {
        serde_json::to_vec(&entries)?
    };

    let path = output_dir.join(MANIFEST_FILE);
    let (_, outcome) = write_if_changed(&path, &json)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(outcome)
}
