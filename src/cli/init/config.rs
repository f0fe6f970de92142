//! Configuration file generation.
//!
//! Creates voltpress.toml and ignore files for new sites.

use anyhow::{Context, Result};
use std::{fs, path::Path};

use crate::config::SiteConfig;

/// Files to write ignore patterns to
const IGNORE_FILES: &[&str] = &[".gitignore", ".ignore"];

/// Generate voltpress.toml content from the default configuration.
pub fn generate_config_template() -> Result<String> {
    let mut config = SiteConfig::default();
    config.site.info.title = "Acme Electric".into();
    config.site.info.description = "Licensed electricians for homes and businesses.".into();

    // through a sorted table so map-valued fields come out in a stable order
    let table = toml::Table::try_from(&config).context("failed to serialize default config")?;
    let body = toml::to_string_pretty(&table)?;

    let mut out = format!(
        "# voltpress configuration file (v{})\n",
        env!("CARGO_PKG_VERSION")
    );
    out.push_str("# `database` and `output` are relative to this file.\n\n");
    out.push_str(&body);
    Ok(out)
}

/// Write the default configuration to `path`.
pub fn write_config(path: &Path) -> Result<()> {
    let content = generate_config_template()?;
    fs::write(path, content)
        .with_context(|| format!("Failed to write config file '{}'", path.display()))?;
    Ok(())
}

/// Write .gitignore and .ignore files that exclude the output directory
///
/// Existing ignore files are left untouched.
pub fn write_ignore_files(root: &Path, output_dir: &Path) -> Result<()> {
    let output_pattern = Path::new("/").join(output_dir);
    let content = format!("{}\n", output_pattern.to_string_lossy());

    for filename in IGNORE_FILES {
        let path = root.join(filename);
        if !path.exists() {
            fs::write(&path, &content)
                .with_context(|| format!("Failed to write '{}'", path.display()))?;
        }
    }

    Ok(())
}
