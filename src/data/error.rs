use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong while loading the order export.
///
/// `FileAccess` is the file-access class of failure; every other variant is
/// a parse failure. Both are fatal to startup and never retried.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read {}: {source}", .path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("row {row}, column '{column}': {reason} (value: '{value}')")]
    Parse {
        row: usize,
        column: &'static str,
        value: String,
        reason: String,
    },

    #[error("row {row}, column '{column}': invalid {encoding} bytes")]
    Encoding {
        row: usize,
        column: &'static str,
        encoding: &'static str,
    },

    #[error("malformed CSV record: {0}")]
    Csv(#[from] csv::Error),
}

impl LoadError {
    /// Whether the source could not be opened or read at all.
    pub fn is_file_access(&self) -> bool {
        match self {
            LoadError::FileAccess { .. } => true,
            LoadError::Csv(e) => matches!(e.kind(), csv::ErrorKind::Io(_)),
            _ => false,
        }
    }

    /// Whether the source was readable but its contents were rejected.
    pub fn is_parse(&self) -> bool {
        !self.is_file_access()
    }
}
