//! Stale output removal.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use jwalk::WalkDir;
use rustc_hash::FxHashSet;

/// File name of an exported document.
pub const DOCUMENT_FILE: &str = "index.json";

/// Remove every `index.json` under `root` that is not in `keep`, then remove
/// the directories those documents leave empty.
///
/// Other files and directories are never touched. Returns the number of
/// documents removed.
pub fn prune_stale(root: &Path, keep: &FxHashSet<PathBuf>) -> io::Result<usize> {
    if !root.is_dir() {
        return Ok(0);
    }

    let mut removed = 0;
    let mut emptied = FxHashSet::default();

    for entry in WalkDir::new(root).skip_hidden(false).into_iter().flatten() {
        let path = entry.path();
        let stale = entry.file_type().is_file()
            && entry.file_name() == DOCUMENT_FILE
            && !keep.contains(&path);
        if stale {
            fs::remove_file(&path)?;
            removed += 1;
            if let Some(parent) = path.parent() {
                emptied.insert(parent.to_path_buf());
            }
        }
    }

    // deepest first, so parents see their children gone
    let mut dirs: Vec<_> = emptied.into_iter().collect();
    dirs.sort_by_key(|dir| std::cmp::Reverse(dir.components().count()));
    for dir in &dirs {
        remove_empty_ancestors(dir, root)?;
    }

    Ok(removed)
}

/// Remove `dir` and its ancestors below `root` while they are empty.
fn remove_empty_ancestors(mut dir: &Path, root: &Path) -> io::Result<()> {
    while dir != root && dir.starts_with(root) {
        let is_empty = fs::read_dir(dir).is_ok_and(|mut entries| entries.next().is_none());
        if !is_empty {
            break;
        }
        fs::remove_dir(dir)?;
        match dir.parent() {
            Some(parent) => dir = parent,
            None => break,
        }
    }
    Ok(())
}
