//! Read-only access to the content database.
//!
//! The database is produced elsewhere and never written here. A
//! [`ContentStore`] only remembers where the file lives; every worker opens
//! its own [`Connection`] through [`ContentStore::connect`] so rayon threads
//! never share a handle.
//!
//! # Tables
//!
//! | Table                        | Used by                          |
//! |------------------------------|----------------------------------|
//! | `pages_all`                  | meta for every structured page   |
//! | `page_sections`              | about page sections (optional)   |
//! | `location_pages` (+ children)| location template                |
//! | `service_pages` (+ children) | service detail template          |
//! | `service_landing_pages`      | landing template                 |
//! | `posts`                      | insights, posts, legacy aliases  |
//! | `pages`                      | legacy WordPress pages (optional)|

mod queries;
mod rows;

#[cfg(test)]
pub mod fixture;

use std::path::{Path, PathBuf};
use std::time::Duration;

use rusqlite::{Connection, OpenFlags, OptionalExtension, params};
use thiserror::Error;

pub use queries::*;
pub use rows::*;

/// Optional table holding legacy WordPress page JSON.
pub const LEGACY_PAGES_TABLE: &str = "pages";

/// Optional table holding about-page sections.
pub const PAGE_SECTIONS_TABLE: &str = "page_sections";

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("content database not found: {}", .0.display())]
    Missing(PathBuf),

    #[error("failed to open content database {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("query failed: {0}")]
    Query(#[from] rusqlite::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Handle to the content database file.
#[derive(Debug, Clone)]
pub struct ContentStore {
    path: PathBuf,
}

impl ContentStore {
    /// Check that the database exists and can be opened.
    pub fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();
        if !path.is_file() {
            return Err(StoreError::Missing(path));
        }

        let store = Self { path };
        let conn = store.connect()?;
        conn.query_row("SELECT count(*) FROM sqlite_master", [], |row| {
            row.get::<_, i64>(0)
        })
        .map_err(|source| store.open_error(source))?;

        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open a read-only connection for the calling thread.
    pub fn connect(&self) -> StoreResult<Connection> {
        let conn = Connection::open_with_flags(
            &self.path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|source| self.open_error(source))?;

        conn.busy_timeout(BUSY_TIMEOUT)
            .map_err(|source| self.open_error(source))?;
        conn.pragma_update(None, "query_only", true)
            .map_err(|source| self.open_error(source))?;

        Ok(conn)
    }

    fn open_error(&self, source: rusqlite::Error) -> StoreError {
        StoreError::Open {
            path: self.path.clone(),
            source,
        }
    }
}

/// Whether a table or view exists in the database.
pub fn has_table(conn: &Connection, name: &str) -> StoreResult<bool> {
    let found = conn
        .query_row(
            "SELECT 1 FROM sqlite_master WHERE type IN ('table', 'view') AND name = ?1",
            params![name],
            |_| Ok(()),
        )
        .optional()?;
    Ok(found.is_some())
}
