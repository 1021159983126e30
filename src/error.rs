use thiserror::Error;

pub type Result<T> = std::result::Result<T, FieldToolsError>;

#[derive(Error, Debug)]
pub enum FieldToolsError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Coordinate(#[from] CoordinateError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Settings error: {0}")]
    Settings(#[from] config::ConfigError),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid period: {0}")]
    InvalidPeriod(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid timezone data: {0}")]
    InvalidTimeZone(String),

    #[error("Timezone {name} not found")]
    TimeZoneNotFound { name: String },
}

/// Failure kinds for coordinate parsing.
///
/// `Format` means no layout matched the whole input; `Range` means a layout
/// matched but a component (or the signed result) fell outside its bounds.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoordinateError {
    #[error("String '{input}' did not match any DMS pattern")]
    Format { input: String },

    #[error("DMS not given in valid range ({degrees}°{minutes}'{seconds}\" = {value})")]
    Range {
        degrees: f64,
        minutes: f64,
        seconds: f64,
        value: f64,
    },
}

impl CoordinateError {
    pub fn is_format(&self) -> bool {
        matches!(self, CoordinateError::Format { .. })
    }

    pub fn is_range(&self) -> bool {
        matches!(self, CoordinateError::Range { .. })
    }
}
