//! Shared Dioxus components and browser glue for the forecast dashboard.
//!
//! This crate provides:
//! - `js_bridge`: Rust wrappers for Plotly via `js_sys::eval()`
//! - `upload`: `fetch`-based upload client and local file reading
//! - `canvas` / `background`: the particle background on a 2D canvas
//! - `state`: Reactive AppState with Dioxus Signals
//! - `components`: Reusable RSX components (form, response area, containers)

pub mod background;
pub mod canvas;
pub mod components;
pub mod js_bridge;
pub mod state;
pub mod upload;

use fcst_core::DashboardError;
use wasm_bindgen::JsValue;

/// DOM id of the upload form.
pub const UPLOAD_FORM_ID: &str = "uploadForm";
/// DOM id of the file input inside the upload form.
pub const FILE_INPUT_ID: &str = "file";
/// DOM id of the response area.
pub const RESPONSE_ID: &str = "response";
/// DOM id of the Plotly chart container.
pub const CHART_CONTAINER_ID: &str = "forecastChart";
/// DOM id of the full-viewport background canvas.
pub const BACKGROUND_CANVAS_ID: &str = "bg";

/// Describe a thrown JS value.
pub(crate) fn js_error(err: JsValue) -> DashboardError {
    DashboardError::Browser(
        err.as_string()
            .unwrap_or_else(|| format!("{:?}", err)),
    )
}
