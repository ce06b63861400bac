//! Recursive file discovery
//!
//! `FileWalker` descends from a root directory and yields every entry that is
//! not a directory. Nothing is filtered: hidden files and paths matched by
//! `.gitignore` or `.ignore` files are listed like any other. Symbolic links
//! are never followed, so link cycles cannot cause a loop.

use std::path::{Path, PathBuf};

use ignore::{DirEntry, Walk, WalkBuilder};
use tracing::{debug, warn};

/// A file discovered during traversal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkEntry {
    /// Path as produced by the traversal (rooted at the walker's root).
    pub path: PathBuf,
    /// `path` with the root prefix removed.
    pub relative: PathBuf,
}

/// Walker over all files beneath a root directory.
#[derive(Debug, Clone)]
pub struct FileWalker {
    root: PathBuf,
    sorted: bool,
}

impl FileWalker {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            sorted: false,
        }
    }

    /// Visit siblings in file name order instead of directory scan order.
    pub fn sorted(mut self, sorted: bool) -> Self {
        self.sorted = sorted;
        self
    }

    /// Start the traversal.
    pub fn files(&self) -> Files {
        let mut builder = WalkBuilder::new(&self.root);
        builder.standard_filters(false).follow_links(false);
        if self.sorted {
            builder.sort_by_file_name(|a, b| a.cmp(b));
        }

        Files {
            root: self.root.clone(),
            inner: builder.build(),
            skipped: 0,
        }
    }
}

/// Iterator returned by [`FileWalker::files`].
///
/// Entries that cannot be read are logged and skipped; the count is available
/// from [`Files::skipped`] once iteration is done.
pub struct Files {
    root: PathBuf,
    inner: Walk,
    skipped: usize,
}

impl Files {
    /// Number of traversal errors skipped so far.
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}

impl Iterator for Files {
    type Item = WalkEntry;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entry = match self.inner.next()? {
                Ok(entry) => entry,
                Err(err) => {
                    warn!("skipping unreadable entry: {}", err);
                    self.skipped += 1;
                    continue;
                }
            };

            if entry.depth() == 0 || !is_listed(&entry) {
                continue;
            }

            let Some(relative) = relative_path(&self.root, entry.path()) else {
                debug!("{} is outside the root, skipping", entry.path().display());
                continue;
            };

            return Some(WalkEntry {
                path: entry.into_path(),
                relative,
            });
        }
    }
}

/// Everything except directories is listed. A symlink counts as a directory
/// when its target is one; broken links are listed as files.
fn is_listed(entry: &DirEntry) -> bool {
    match entry.file_type() {
        Some(ft) if ft.is_dir() => false,
        Some(ft) if ft.is_symlink() => !entry.path().is_dir(),
        Some(_) => true,
        // stdin, never produced for a filesystem root
        None => false,
    }
}

/// Strip `root` from `path`.
///
/// Returns `None` when `path` is not beneath `root`. The root itself maps to
/// an empty path.
pub fn relative_path(root: &Path, path: &Path) -> Option<PathBuf> {
    path.strip_prefix(root).ok().map(Path::to_path_buf)
}
