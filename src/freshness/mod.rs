//! Output freshness: blake3 content hashes and stale document pruning.

mod hash;
mod prune;

pub use hash::{ContentHash, WriteOutcome, write_if_changed};
pub use prune::{DOCUMENT_FILE, prune_stale};
