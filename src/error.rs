//! Errors that abort a listing run

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ListError {
    #[error("cannot access '{}': {source}", path.display())]
    RootInaccessible {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot open '{}' for writing: {source}", path.display())]
    OutputUnwritable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("error writing '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, ListError>;
