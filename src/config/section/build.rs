//! `[build]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [build]
//! database = "data/site.db"   # SQLite content database (relative to site root, `~` expanded)
//! output = "public"           # Export directory (relative to site root)
//! clean = false               # Remove the output directory before exporting
//! pretty = false              # Pretty-print exported JSON
//! ```

use crate::config::{ConfigDiagnostics, FieldPath};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildSectionConfig {
    /// URL path prefix for subdirectory deployment.
    /// Derived from the path component of `[site.info].url`.
    #[serde(skip)]
    pub path_prefix: PathBuf,

    /// Content database file.
    pub database: PathBuf,

    /// Export directory.
    pub output: PathBuf,

    /// Remove the output directory before exporting.
    pub clean: bool,

    /// Pretty-print exported documents.
    pub pretty: bool,
}

pub struct BuildFields {
    pub database: FieldPath,
    pub output: FieldPath,
}

impl BuildSectionConfig {
    pub const FIELDS: BuildFields = BuildFields {
        database: FieldPath::new("build.database"),
        output: FieldPath::new("build.output"),
    };

    /// Validate normalized build paths.
    ///
    /// # Checks
    /// - `database` exists and is a file
    /// - `output` is not the database's own directory tree root
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if !self.database.exists() {
            diag.error_with_hint(
                Self::FIELDS.database,
                format!("database not found: {}", self.database.display()),
                "point `build.database` at the site's SQLite file, or pass --database",
            );
        } else if !self.database.is_file() {
            diag.error(
                Self::FIELDS.database,
                format!("not a file: {}", self.database.display()),
            );
        }

        if self
            .database
            .parent()
            .is_some_and(|parent| parent == self.output)
            && self.clean
        {
            diag.error_with_hint(
                Self::FIELDS.output,
                "output directory contains the database and `clean` would delete it",
                "use a separate output directory",
            );
        }
    }

    /// Directory documents are written to, including the path prefix.
    pub fn output_dir(&self) -> PathBuf {
        self.output.join(&self.path_prefix)
    }
}

impl Default for BuildSectionConfig {
    fn default() -> Self {
        Self {
            path_prefix: PathBuf::new(),
            database: "data/site.db".into(),
            output: "public".into(),
            clean: false,
            pretty: false,
        }
    }
}
