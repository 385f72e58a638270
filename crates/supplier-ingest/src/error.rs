//! Error types for registry and ledger ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading or writing registry and ledger files.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Input file not found.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read a file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse delimited text.
    #[error("failed to parse {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Failed to write the output table.
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// File has no header row.
    #[error("file is empty: {path}")]
    Empty { path: PathBuf },

    /// Delimiters must be a single ASCII character.
    #[error("delimiter {delimiter:?} is not a single ASCII character")]
    InvalidDelimiter { delimiter: char },

    /// A required column could not be located.
    #[error("required column '{column}' not found in {path} (available: {available})")]
    MissingColumn {
        column: String,
        path: PathBuf,
        available: String,
    },
}

impl IngestError {
    pub(crate) fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::FileNotFound { path }
        } else {
            Self::FileRead { path, source }
        }
    }

    pub(crate) fn csv(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        if let csv::ErrorKind::Io(io) = source.kind()
            && io.kind() == std::io::ErrorKind::NotFound
        {
            return Self::FileNotFound { path: path.into() };
        }
        Self::Csv {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn missing_column(column: &str, path: &std::path::Path, headers: &[String]) -> Self {
        Self::MissingColumn {
            column: column.to_string(),
            path: path.to_path_buf(),
            available: headers.join(", "),
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IngestError::FileNotFound {
            path: PathBuf::from("/path/to/suppliers.txt"),
        };
        assert_eq!(err.to_string(), "file not found: /path/to/suppliers.txt");
    }

    #[test]
    fn test_not_found_io_error_maps_to_file_not_found() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = IngestError::read("ledger.csv", io);
        assert!(matches!(err, IngestError::FileNotFound { .. }));
    }

    #[test]
    fn test_missing_column_lists_headers() {
        let err = IngestError::missing_column(
            "pembekal",
            std::path::Path::new("ledger.csv"),
            &["No Aset".to_string(), "Lokasi".to_string()],
        );
        assert_eq!(
            err.to_string(),
            "required column 'pembekal' not found in ledger.csv (available: No Aset, Lokasi)"
        );
    }
}
