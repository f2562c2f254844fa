//! Ingestion errors.

use std::path::PathBuf;

use fwdcurve_curves::CurveError;
use thiserror::Error;

/// Result type for ingestion.
pub type IngestResult<T> = Result<T, IngestError>;

/// Errors raised while reading settlement files.
#[derive(Debug, Error)]
pub enum IngestError {
    /// A file or directory could not be read.
    #[error("Cannot read {}: {source}", .path.display())]
    Io {
        /// The path that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The CSV stream itself is unreadable.
    #[error("CSV error in {file}: {source}")]
    Csv {
        /// File or stream name.
        file: String,
        /// Underlying CSV error.
        #[source]
        source: csv::Error,
    },

    /// A data row does not describe a valid observation.
    #[error("{file}: {error}")]
    Malformed {
        /// File or stream name.
        file: String,
        /// 1-based data row, header excluded.
        row: usize,
        /// What is wrong with the row.
        #[source]
        error: CurveError,
    },
}

impl IngestError {
    /// Creates an I/O error for a path.
    #[must_use]
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Creates a malformed row error.
    #[must_use]
    pub fn malformed(file: impl Into<String>, row: usize, error: CurveError) -> Self {
        Self::Malformed {
            file: file.into(),
            row,
            error: error.at_row(row),
        }
    }
}
