/// Error code registry for interval-stats
///
/// Error codes are organized by category:
/// - 1000-1999: Configuration errors
/// - 2000-2999: Schema errors
/// - 3000-3999: Parse errors
/// - 4000-4999: Data errors
/// - 5000-5999: I/O errors
/// - 6000-6999: Rendering errors
#[allow(dead_code)]
pub struct ErrorCode;

impl ErrorCode {
    // Configuration errors (1000-1999)
    pub const CONFIG_GENERIC: u16 = 1000;
    pub const CONFIG_NOT_FOUND: u16 = 1001;
    pub const CONFIG_INVALID_TOML: u16 = 1002;
    pub const CONFIG_INVALID_VALUE: u16 = 1003;
    pub const CONFIG_INVALID_DELIMITER: u16 = 1004;

    // Schema errors (2000-2999)
    pub const SCHEMA_GENERIC: u16 = 2000;
    pub const SCHEMA_MISSING_COLUMNS: u16 = 2001;
    pub const SCHEMA_EMPTY_INPUT: u16 = 2002;
    pub const SCHEMA_UNKNOWN: u16 = 2003;

    // Parse errors (3000-3999)
    pub const PARSE_GENERIC: u16 = 3000;
    pub const PARSE_TIMESTAMP: u16 = 3001;
    pub const PARSE_MALFORMED_ROW: u16 = 3002;

    // Data errors (4000-4999)
    pub const DATA_INSUFFICIENT: u16 = 4000;

    // I/O errors (5000-5999)
    pub const IO_GENERIC: u16 = 5000;
    pub const IO_FILE_NOT_FOUND: u16 = 5001;
    pub const IO_READ_FAILED: u16 = 5002;
    pub const IO_WRITE_FAILED: u16 = 5003;

    // Rendering errors (6000-6999)
    pub const RENDER_GENERIC: u16 = 6000;
    pub const RENDER_PLOT_FAILED: u16 = 6001;
    pub const RENDER_SERIALIZATION: u16 = 6002;
}

/// Get a human-readable description for an error code
pub fn describe_error_code(code: u16) -> &'static str {
    match code {
        ErrorCode::CONFIG_GENERIC => "General configuration error",
        ErrorCode::CONFIG_NOT_FOUND => "Configuration file not found",
        ErrorCode::CONFIG_INVALID_TOML => "Configuration file is not valid TOML",
        ErrorCode::CONFIG_INVALID_VALUE => "Configuration value is out of range",
        ErrorCode::CONFIG_INVALID_DELIMITER => "Delimiter must be a single ASCII character",

        ErrorCode::SCHEMA_GENERIC => "General schema error",
        ErrorCode::SCHEMA_MISSING_COLUMNS => "Required timestamp or grouping column is missing",
        ErrorCode::SCHEMA_EMPTY_INPUT => "Input contains no recognizable columns",
        ErrorCode::SCHEMA_UNKNOWN => "Unknown log schema name",

        ErrorCode::PARSE_GENERIC => "General parse error",
        ErrorCode::PARSE_TIMESTAMP => "Value is not a recognizable timestamp",
        ErrorCode::PARSE_MALFORMED_ROW => "Row could not be read",

        ErrorCode::DATA_INSUFFICIENT => "Not enough data points",

        ErrorCode::IO_GENERIC => "General I/O error",
        ErrorCode::IO_FILE_NOT_FOUND => "Input file not found",
        ErrorCode::IO_READ_FAILED => "Failed to read file",
        ErrorCode::IO_WRITE_FAILED => "Failed to write file",

        ErrorCode::RENDER_GENERIC => "General rendering error",
        ErrorCode::RENDER_PLOT_FAILED => "Failed to draw histogram",
        ErrorCode::RENDER_SERIALIZATION => "Failed to serialize report",

        _ => "Unknown error code",
    }
}
