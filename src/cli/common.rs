//! Common utilities shared across CLI commands.

use std::io::{self, BufRead};

use anyhow::{Context, Result};
use crossbeam::queue::SegQueue;

use crate::config::SiteConfig;
use crate::core::{Template, UrlPath};
use crate::routes;
use crate::store::ContentStore;

/// Lock-free parallel result collector using `SegQueue`
pub struct ParallelCollector<T> {
    queue: SegQueue<T>,
}

impl<T> ParallelCollector<T> {
    #[inline]
    pub fn new() -> Self {
        Self {
            queue: SegQueue::new(),
        }
    }

    /// Push an item (lock-free).
    #[inline]
    pub fn push(&self, item: T) {
        self.queue.push(item);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Drain all items into a Vec, in push order.
    pub fn drain(self) -> Vec<T> {
        let capacity = self.queue.len();
        self.drain_with_capacity(capacity)
    }

    /// Drain all items with pre-allocated capacity.
    pub fn drain_with_capacity(self, capacity: usize) -> Vec<T> {
        let mut results = Vec::with_capacity(capacity);
        while let Some(item) = self.queue.pop() {
            results.push(item);
        }
        results
    }
}

impl<T> Default for ParallelCollector<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Open the configured database and enumerate its routes.
pub fn open_site(config: &SiteConfig) -> Result<(ContentStore, Vec<(UrlPath, Template)>)> {
    let store = ContentStore::open(&config.build.database)?;
    let conn = store.connect()?;
    let routes = routes::enumerate(&conn, config).context("failed to enumerate routes")?;
    Ok((store, routes))
}

/// Expand `-` into lines read from stdin; other arguments pass through.
pub fn expand_stdin_args(args: &[String]) -> Result<Vec<String>> {
    if args.len() == 1 && args[0] == "-" {
        read_lines(io::stdin().lock())
    } else {
        Ok(args.to_vec())
    }
}

/// Non-empty trimmed lines of a reader.
fn read_lines(reader: impl BufRead) -> Result<Vec<String>> {
    let mut lines = Vec::new();
    for line in reader.lines() {
        let line = line.context("failed to read from stdin")?;
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            lines.push(trimmed.to_string());
        }
    }
    Ok(lines)
}
