//! Site initialization.
//!
//! Writes a default `voltpress.toml` (and ignore files) into the target
//! directory. An existing config file is never overwritten.

mod config;

use anyhow::{Context, Result, bail};
use std::fs;
use std::path::Path;

use crate::{config::SiteConfig, log};

/// Initialize a site at the configured root.
///
/// If `dry_run` is true, only prints the config template to stdout.
pub fn new_site(site_config: &SiteConfig, dry_run: bool) -> Result<()> {
    if dry_run {
        print!("{}", config::generate_config_template()?);
        return Ok(());
    }

    let root = site_config.get_root();
    let config_path = &site_config.config_path;
    ensure_absent(config_path)?;

    fs::create_dir_all(root)
        .with_context(|| format!("Failed to create directory '{}'", root.display()))?;
    config::write_config(config_path)?;

    let output = site_config.root_relative(&site_config.build.output);
    config::write_ignore_files(root, &output)?;

    log!("init"; "wrote {}", config_path.display());
    Ok(())
}

/// Refuse to overwrite an existing config file.
fn ensure_absent(config_path: &Path) -> Result<()> {
    if config_path.exists() {
        bail!(
            "'{}' already exists.\n\
             Remove it first or choose a different directory.",
            config_path.display()
        );
    }
    Ok(())
}
