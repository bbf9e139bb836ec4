//! Forecast Dashboard
//!
//! Upload a CSV, pick the target column and get back a forecast chart with
//! confidence bounds, drawn over an animated particle background.
//!
//! Data flow:
//! 1. Choosing a file parses its first rows locally for the preview table and
//!    pre-fills the date column.
//! 2. Submitting posts the whole form to `/api/upload`.
//! 3. The response becomes an `UploadOutcome` in `AppState`.
//! 4. An effect hands the outcome's chart to Plotly; a response without chart
//!    data only shows the fixed error message.

use dioxus::prelude::*;
use fcst_core::forecast::UploadOutcome;
use fcst_dashboard_ui::components::{
    ChartContainer, ErrorDisplay, LoadingSpinner, ParticleCanvas, PreviewTable, ResponsePanel,
    UploadForm,
};
use fcst_dashboard_ui::js_bridge;
use fcst_dashboard_ui::state::AppState;
use fcst_dashboard_ui::CHART_CONTAINER_ID;
use log::info;

fn main() {
    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");
    dioxus::LaunchBuilder::new()
        .with_cfg(dioxus::web::Config::new().rootname("forecast-dashboard-root"))
        .launch(App);
}

#[component]
fn App() -> Element {
    let state = use_context_provider(AppState::new);

    // ─── Effect 1: Make sure Plotly is available (one-time) ───
    use_effect(move || {
        js_bridge::init_plotly();
    });

    // ─── Effect 2: Render the chart for each new outcome ───
    // Re-runs whenever outcome changes. Outcomes without plottable rows make
    // no chart call.
    use_effect(move || {
        let outcome = state.outcome.read().clone();
        if let Some(chart) = outcome.as_ref().and_then(UploadOutcome::chart) {
            info!("Rendering forecast chart ({} points)", chart.len());
            js_bridge::render_forecast_chart(CHART_CONTAINER_ID, &chart.figure());
        }
    });

    // ─── Render ───
    rsx! {
        ParticleCanvas {}

        div {
            style: "position: relative; max-width: 960px; margin: 0 auto; padding: 24px 16px; font-family: system-ui, -apple-system, sans-serif; color: #e6edf3;",

            h1 {
                style: "margin: 0 0 4px 0; font-size: 24px; color: #FFFFFF;",
                "Forecast Dashboard"
            }
            p {
                style: "margin: 0 0 20px 0; font-size: 13px; color: #9aa4b2;",
                "Upload a CSV with a date column and a numeric target to forecast it with confidence bounds."
            }

            div {
                style: "padding: 16px; background: rgba(13, 17, 23, 0.75); border: 1px solid #30363d; border-radius: 8px;",
                UploadForm {}

                if let Some(err) = state.error_msg.read().as_ref() {
                    ErrorDisplay { message: err.clone() }
                }

                PreviewTable {}
            }

            if *state.submitting.read() {
                LoadingSpinner {}
            }

            ResponsePanel {}

            div {
                style: "margin-top: 16px; background: #000000; border-radius: 8px;",
                ChartContainer {
                    id: CHART_CONTAINER_ID.to_string(),
                    min_height: 450,
                }
            }
        }
    }
}
