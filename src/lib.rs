//! Pathlist - write the relative path of every file under a directory to a text file

pub mod config;
pub mod error;
pub mod listing;
pub mod output;
pub mod walker;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use config::{DEFAULT_OUTPUT_FILE, ListConfig};
pub use error::{ListError, Result};
pub use listing::{ListSummary, write_file_list};
pub use output::{LineWriter, PathSink};
pub use walker::{FileWalker, WalkEntry, relative_path};
