/// Error types for the forecast dashboard
use thiserror::Error;

/// Main error type for dashboard operations
#[derive(Error, Debug)]
pub enum DashboardError {
    /// Failed to parse CSV data
    #[error("Failed to parse CSV: {0}")]
    CsvParse(#[from] csv::Error),

    /// Failed to decode a JSON payload
    #[error("Failed to decode JSON: {0}")]
    JsonDecode(#[from] serde_json::Error),

    /// The uploaded file had no header row
    #[error("CSV file has no header row")]
    EmptyCsv,

    /// Request to the forecasting backend failed
    #[error("Request failed: {0}")]
    Request(String),

    /// A browser API call failed
    #[error("Browser call failed: {0}")]
    Browser(String),

    /// A required DOM element is missing
    #[error("Element not found: #{0}")]
    MissingElement(String),
}

/// Type alias for Results using DashboardError
pub type Result<T> = std::result::Result<T, DashboardError>;
