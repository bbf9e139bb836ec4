//! Core types for the forecast dashboard.
//!
//! This crate is target-independent so it can be tested natively and shared
//! between the WASM dashboard and the CLI:
//! - `forecast`: upload response model and chart series derivation
//! - `plotly`: Plotly figure (traces, layout, config) for the forecast chart
//! - `preview`: local CSV preview and date-column guessing
//! - `particles`: the decorative particle background simulation

pub mod error;
pub mod forecast;
pub mod particles;
pub mod plotly;
pub mod preview;

pub use error::{DashboardError, Result};

/// API paths served by the forecasting backend.
pub mod endpoints {
    /// Multipart upload that trains a model and returns chart data.
    pub const UPLOAD: &str = "/api/upload";
    /// Multipart upload that returns the first rows of a CSV.
    pub const PREVIEW: &str = "/api/preview";
    /// Prefix for the forecast CSV download; the target column is appended.
    pub const DOWNLOAD_PREFIX: &str = "/download";
}
