use thiserror::Error;

use crate::core::UrlPath;
use crate::store::StoreError;

/// Why a route could not be resolved into a document.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("no content for {0}")]
    NotFound(UrlPath),

    #[error("{url}: section {index} has malformed table data: {source}")]
    MalformedTable {
        url: UrlPath,
        index: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("{url}: malformed legacy page data: {source}")]
    MalformedLegacy {
        url: UrlPath,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ContentError {
    #[inline]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

impl From<rusqlite::Error> for ContentError {
    fn from(err: rusqlite::Error) -> Self {
        Self::Store(StoreError::Query(err))
    }
}
