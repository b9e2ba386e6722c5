use std::fmt::Display;
use std::path::PathBuf;
use thiserror::Error;

pub mod codes;
pub mod helpers;

pub use codes::{describe_error_code, ErrorCode};
pub use helpers::{common, ErrorExt};

type BoxedSource = Box<dyn std::error::Error + Send + Sync>;

/// The unified error type for interval analysis
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("[E{code:04}] Configuration error: {message}")]
    Config {
        code: u16,
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<BoxedSource>,
    },

    #[error("[E{code:04}] Schema error: {message}")]
    Schema {
        code: u16,
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<BoxedSource>,
    },

    #[error("[E{code:04}] Parse error: {message}")]
    Parse {
        code: u16,
        message: String,
        line: Option<u64>,
        value: Option<String>,
        #[source]
        source: Option<BoxedSource>,
    },

    #[error("[E{code:04}] Insufficient data: {message}")]
    InsufficientData {
        code: u16,
        message: String,
        count: usize,
        #[source]
        source: Option<BoxedSource>,
    },

    #[error("[E{code:04}] I/O error: {message}")]
    Io {
        code: u16,
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<BoxedSource>,
    },

    #[error("[E{code:04}] Render error: {message}")]
    Render {
        code: u16,
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },
}

impl AnalysisError {
    /// Create a configuration error with default code
    pub fn config(message: impl Into<String>) -> Self {
        Self::config_with_code(ErrorCode::CONFIG_GENERIC, message, None)
    }

    /// Create a configuration error with specific code and file path
    pub fn config_with_code(code: u16, message: impl Into<String>, path: Option<PathBuf>) -> Self {
        Self::Config {
            code,
            message: message.into(),
            path,
            source: None,
        }
    }

    /// Create a schema error with default code
    pub fn schema(message: impl Into<String>) -> Self {
        Self::schema_with_code(ErrorCode::SCHEMA_GENERIC, message, None)
    }

    /// Create a schema error with specific code and input path
    pub fn schema_with_code(code: u16, message: impl Into<String>, path: Option<PathBuf>) -> Self {
        Self::Schema {
            code,
            message: message.into(),
            path,
            source: None,
        }
    }

    /// Create a parse error with default code
    pub fn parse(message: impl Into<String>) -> Self {
        Self::parse_with_code(ErrorCode::PARSE_GENERIC, message, None, None)
    }

    /// Create a parse error pointing at the offending line and value
    pub fn parse_with_code(
        code: u16,
        message: impl Into<String>,
        line: Option<u64>,
        value: Option<String>,
    ) -> Self {
        Self::Parse {
            code,
            message: message.into(),
            line,
            value,
            source: None,
        }
    }

    /// Create an insufficient-data error for a sequence of `count` values
    pub fn insufficient_data(message: impl Into<String>, count: usize) -> Self {
        Self::InsufficientData {
            code: ErrorCode::DATA_INSUFFICIENT,
            message: message.into(),
            count,
            source: None,
        }
    }

    /// Create an I/O error with default code
    pub fn io(message: impl Into<String>) -> Self {
        Self::io_with_code(ErrorCode::IO_GENERIC, message, None)
    }

    /// Create an I/O error with specific code and path
    pub fn io_with_code(code: u16, message: impl Into<String>, path: Option<PathBuf>) -> Self {
        Self::Io {
            code,
            message: message.into(),
            path,
            source: None,
        }
    }

    /// Create a rendering error with default code
    pub fn render(message: impl Into<String>) -> Self {
        Self::render_with_code(ErrorCode::RENDER_GENERIC, message)
    }

    /// Create a rendering error with specific code
    pub fn render_with_code(code: u16, message: impl Into<String>) -> Self {
        Self::Render {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Add a source error to this error
    pub fn with_source(mut self, source: impl Into<BoxedSource>) -> Self {
        match &mut self {
            Self::Config { source: src, .. }
            | Self::Schema { source: src, .. }
            | Self::Parse { source: src, .. }
            | Self::InsufficientData { source: src, .. }
            | Self::Io { source: src, .. }
            | Self::Render { source: src, .. } => {
                *src = Some(source.into());
            }
        }
        self
    }

    /// Add context to the error message
    pub fn with_context(mut self, context: impl Display) -> Self {
        match &mut self {
            Self::Config { message, .. }
            | Self::Schema { message, .. }
            | Self::Parse { message, .. }
            | Self::InsufficientData { message, .. }
            | Self::Io { message, .. }
            | Self::Render { message, .. } => {
                *message = format!("{}: {}", message, context);
            }
        }
        self
    }

    /// Attach the path of the file being processed
    pub fn with_path(mut self, new_path: impl Into<PathBuf>) -> Self {
        match &mut self {
            Self::Config { path, .. } | Self::Schema { path, .. } | Self::Io { path, .. } => {
                *path = Some(new_path.into());
            }
            _ => {}
        }
        self
    }

    /// Get the process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config { .. } => 2,
            Self::Schema { .. } => 3,
            Self::Parse { .. } => 4,
            Self::InsufficientData { .. } => 5,
            Self::Io { .. } => 6,
            Self::Render { .. } => 7,
        }
    }

    /// Get the error code
    pub fn code(&self) -> u16 {
        match self {
            Self::Config { code, .. }
            | Self::Schema { code, .. }
            | Self::Parse { code, .. }
            | Self::InsufficientData { code, .. }
            | Self::Io { code, .. }
            | Self::Render { code, .. } => *code,
        }
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            Self::Config { message, path, .. } => match path {
                Some(p) => format!("Configuration problem in {}: {}", p.display(), message),
                None => format!("Configuration problem: {}", message),
            },
            Self::Schema { message, path, .. } => match path {
                Some(p) => format!("Unrecognized log layout in {}: {}", p.display(), message),
                None => format!("Unrecognized log layout: {}", message),
            },
            Self::Parse {
                message,
                line,
                value,
                ..
            } => {
                let mut msg = String::from("Could not parse input");
                if let Some(l) = line {
                    msg.push_str(&format!(" at line {}", l));
                }
                if let Some(v) = value {
                    msg.push_str(&format!(" (value '{}')", v));
                }
                format!("{}: {}", msg, message)
            }
            Self::InsufficientData { message, count, .. } => {
                format!("Not enough data ({} values): {}", count, message)
            }
            Self::Io { message, path, .. } => match path {
                Some(p) => format!("I/O error at {}: {}", p.display(), message),
                None => format!("I/O error: {}", message),
            },
            Self::Render { message, .. } => format!("Could not render report: {}", message),
        }
    }

    /// Check if this error means the input layout was not recognized
    pub fn is_schema_error(&self) -> bool {
        matches!(self, Self::Schema { .. })
    }

    /// Check if this error came from a value that failed to parse
    pub fn is_parse_error(&self) -> bool {
        matches!(self, Self::Parse { .. })
    }
}

impl From<std::io::Error> for AnalysisError {
    fn from(err: std::io::Error) -> Self {
        let code = match err.kind() {
            std::io::ErrorKind::NotFound => ErrorCode::IO_FILE_NOT_FOUND,
            _ => ErrorCode::IO_GENERIC,
        };
        Self::io_with_code(code, err.to_string(), None).with_source(err)
    }
}

impl From<csv::Error> for AnalysisError {
    fn from(err: csv::Error) -> Self {
        let line = err.position().map(|p| p.line());
        if err.is_io_error() {
            return Self::io_with_code(ErrorCode::IO_READ_FAILED, err.to_string(), None)
                .with_source(err);
        }
        Self::parse_with_code(ErrorCode::PARSE_MALFORMED_ROW, err.to_string(), line, None)
            .with_source(err)
    }
}

/// Type alias for Results using AnalysisError
pub type Result<T> = std::result::Result<T, AnalysisError>;
