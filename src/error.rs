//! Error handling for record sorting

use std::io;
use thiserror::Error;

/// Custom error type for sort operations
#[derive(Error, Debug)]
pub enum SortError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("No such file or directory: {file}")]
    FileNotFound { file: String },

    #[error("Permission denied: {file}")]
    PermissionDenied { file: String },

    #[error("Invalid JSON in {source_name}: {source}")]
    Json {
        source_name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Invalid sort specification: {message}")]
    InvalidSpecification { message: String },

    #[error("Record {index} has no field '{key}'")]
    MissingField { key: String, index: usize },

    #[error("Input is not sorted at record {index}")]
    NotSorted { index: usize },
}

impl SortError {
    /// Returns the appropriate exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            SortError::Io(_)
            | SortError::FileNotFound { .. }
            | SortError::PermissionDenied { .. }
            | SortError::Json { .. }
            | SortError::InvalidInput { .. } => crate::SORT_FAILURE,

            SortError::NotSorted { .. } => crate::EXIT_FAILURE,

            _ => crate::EXIT_FAILURE,
        }
    }

    /// Create an invalid specification error
    pub fn invalid_spec(message: &str) -> Self {
        SortError::InvalidSpecification {
            message: message.to_string(),
        }
    }

    /// Create a missing field error
    pub fn missing_field(key: &str, index: usize) -> Self {
        SortError::MissingField {
            key: key.to_string(),
            index,
        }
    }

    /// Create a not sorted error
    pub fn not_sorted(index: usize) -> Self {
        SortError::NotSorted { index }
    }

    /// Create an invalid input error
    pub fn invalid_input(message: &str) -> Self {
        SortError::InvalidInput {
            message: message.to_string(),
        }
    }

    /// Create a JSON error attributed to a named input
    pub fn json(source_name: &str, source: serde_json::Error) -> Self {
        SortError::Json {
            source_name: source_name.to_string(),
            source,
        }
    }

    pub fn file_not_found(file: &str) -> Self {
        SortError::FileNotFound {
            file: file.to_string(),
        }
    }

    pub fn permission_denied(file: &str) -> Self {
        SortError::PermissionDenied {
            file: file.to_string(),
        }
    }
}

/// Result type for sort operations
pub type SortResult<T> = Result<T, SortError>;

/// Context trait for attributing I/O errors to a file
pub trait SortContext<T> {
    fn with_file_context(self, filename: &str) -> SortResult<T>;
}

impl<T> SortContext<T> for Result<T, io::Error> {
    fn with_file_context(self, filename: &str) -> SortResult<T> {
        self.map_err(|io_err| match io_err.kind() {
            io::ErrorKind::PermissionDenied => SortError::permission_denied(filename),
            io::ErrorKind::NotFound => SortError::file_not_found(filename),
            _ => SortError::Io(io::Error::new(
                io_err.kind(),
                format!("{filename}: {io_err}"),
            )),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(SortError::invalid_spec("no keys").exit_code(), crate::EXIT_FAILURE);
        assert_eq!(SortError::not_sorted(3).exit_code(), crate::EXIT_FAILURE);
        assert_eq!(SortError::invalid_input("bad").exit_code(), crate::SORT_FAILURE);
    }

    #[test]
    fn test_file_context_maps_not_found() {
        let result: Result<(), io::Error> = Err(io::Error::new(io::ErrorKind::NotFound, "gone"));
        let err = result
            .with_file_context("records.json")
            .expect_err("expected an error");
        assert!(matches!(err, SortError::FileNotFound { ref file } if file == "records.json"));
        assert_eq!(err.exit_code(), crate::SORT_FAILURE);
    }

    #[test]
    fn test_missing_field_message() {
        let err = SortError::missing_field("price", 4);
        assert_eq!(err.to_string(), "Record 4 has no field 'price'");
    }
}
