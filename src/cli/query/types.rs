use serde::Serialize;

use crate::content::Document;
use crate::core::{Template, UrlPath};

/// One row of `query --list`.
#[derive(Debug, Clone, Serialize)]
pub struct RouteRow {
    pub url: UrlPath,
    pub template: Template,
}

/// Result for batch query
#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct QueryResult {
    pub documents: Vec<Document>,
}

impl QueryResult {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}
