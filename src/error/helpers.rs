use super::{AnalysisError, ErrorCode};
use std::path::Path;

/// Extension trait for convenient error conversion
pub trait ErrorExt<T> {
    /// Convert to a rendering error with the given message
    fn to_render_error(self, message: impl Into<String>) -> Result<T, AnalysisError>;
}

impl<T, E> ErrorExt<T> for Result<T, E>
where
    E: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    fn to_render_error(self, message: impl Into<String>) -> Result<T, AnalysisError> {
        self.map_err(|e| AnalysisError::render(message).with_source(e))
    }
}

/// Helper functions for common error scenarios
pub mod common {
    use super::*;

    /// Create a not found error for a configuration file
    pub fn config_not_found(path: impl AsRef<Path>) -> AnalysisError {
        AnalysisError::config_with_code(
            ErrorCode::CONFIG_NOT_FOUND,
            format!("Configuration file not found: {}", path.as_ref().display()),
            Some(path.as_ref().to_path_buf()),
        )
    }

    /// Create an error for a delimiter that is not a single ASCII byte
    pub fn invalid_delimiter(delimiter: &str) -> AnalysisError {
        AnalysisError::config_with_code(
            ErrorCode::CONFIG_INVALID_DELIMITER,
            format!(
                "Delimiter must be a single ASCII character, got '{}'",
                delimiter
            ),
            None,
        )
    }

    /// Create a schema error for a file lacking the timestamp or grouping column
    pub fn missing_required_columns(columns: &[&str]) -> AnalysisError {
        AnalysisError::schema_with_code(
            ErrorCode::SCHEMA_MISSING_COLUMNS,
            format!(
                "Input data must contain {} columns",
                columns
                    .iter()
                    .map(|c| format!("'{}'", c))
                    .collect::<Vec<_>>()
                    .join(" and ")
            ),
            None,
        )
    }

    /// Create a schema error for input with no usable rows at all
    pub fn empty_input() -> AnalysisError {
        AnalysisError::schema_with_code(
            ErrorCode::SCHEMA_EMPTY_INPUT,
            "No recognizable columns found in input",
            None,
        )
    }

    /// Create a parse error for a timestamp cell
    pub fn invalid_timestamp(line: Option<u64>, value: &str) -> AnalysisError {
        AnalysisError::parse_with_code(
            ErrorCode::PARSE_TIMESTAMP,
            "Value is not a recognizable timestamp",
            line,
            Some(value.to_string()),
        )
    }
}
