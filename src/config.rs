//! Configuration for a listing run

use std::path::{Path, PathBuf};

use crate::error::{ListError, Result};

/// File name written when no output path is given.
pub const DEFAULT_OUTPUT_FILE: &str = "file_paths.txt";

/// Where to list from, where to write, and in what order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListConfig {
    /// Directory to descend into. Relative paths are resolved against the
    /// current working directory.
    pub root: PathBuf,
    /// Output file. Relative paths are resolved against the current working
    /// directory, not against `root`.
    pub output: PathBuf,
    /// Sort entries by file name at every directory level.
    pub sorted: bool,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            output: PathBuf::from(DEFAULT_OUTPUT_FILE),
            sorted: false,
        }
    }
}

impl ListConfig {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Default::default()
        }
    }

    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }

    pub fn with_sorted(mut self, sorted: bool) -> Self {
        self.sorted = sorted;
        self
    }

    /// Absolute root directory.
    ///
    /// Fails if the working directory cannot be determined or the root is not
    /// a readable directory.
    pub fn resolve_root(&self) -> Result<PathBuf> {
        let root = absolutize(&self.root).map_err(|source| ListError::RootInaccessible {
            path: self.root.clone(),
            source,
        })?;

        let metadata = std::fs::metadata(&root).map_err(|source| ListError::RootInaccessible {
            path: root.clone(),
            source,
        })?;
        if !metadata.is_dir() {
            return Err(ListError::RootInaccessible {
                path: root,
                source: std::io::Error::new(std::io::ErrorKind::NotADirectory, "not a directory"),
            });
        }

        // Opening the directory surfaces permission problems before the
        // output file gets truncated.
        std::fs::read_dir(&root).map_err(|source| ListError::RootInaccessible {
            path: root.clone(),
            source,
        })?;

        Ok(root)
    }
}

fn absolutize(path: &Path) -> std::io::Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = std::env::current_dir()?;
    if path == Path::new(".") {
        Ok(cwd)
    } else {
        Ok(cwd.join(path))
    }
}
