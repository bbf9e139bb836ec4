//! Application state managed via Dioxus context.
//!
//! `AppState` bundles all reactive signals into a single struct provided via
//! `use_context_provider`. Child components retrieve it with `use_context::<AppState>()`.

use dioxus::prelude::*;
use fcst_core::forecast::UploadOutcome;
use fcst_core::preview::CsvPreview;

/// Shared state of the dashboard page.
#[derive(Clone, Copy)]
pub struct AppState {
    /// Whether an upload request is in flight
    pub submitting: Signal<bool>,
    /// Result of the latest upload (None until the first response arrives)
    pub outcome: Signal<Option<UploadOutcome>>,
    /// Preview of the currently selected file
    pub preview: Signal<Option<CsvPreview>>,
    /// Name of the selected file
    pub file_name: Signal<String>,
    /// Date column input, pre-filled from the preview when left empty
    pub date_col: Signal<String>,
    /// Error message if the preview could not be built
    pub error_msg: Signal<Option<String>>,
}

impl AppState {
    /// Create a new AppState with default signal values.
    pub fn new() -> Self {
        Self {
            submitting: Signal::new(false),
            outcome: Signal::new(None),
            preview: Signal::new(None),
            file_name: Signal::new(String::new()),
            date_col: Signal::new(String::new()),
            error_msg: Signal::new(None),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
