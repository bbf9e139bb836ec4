//! Reusable Dioxus RSX components for the forecast dashboard.

mod chart_container;
mod error_display;
mod loading_spinner;
mod particle_canvas;
mod preview_table;
mod response_panel;
mod upload_form;

pub use chart_container::ChartContainer;
pub use error_display::ErrorDisplay;
pub use loading_spinner::LoadingSpinner;
pub use particle_canvas::ParticleCanvas;
pub use preview_table::PreviewTable;
pub use response_panel::{ResponsePanel, ResponseView};
pub use upload_form::UploadForm;
