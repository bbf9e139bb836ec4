//! Response area: status message and download link, or the fixed error.

use dioxus::prelude::*;
use fcst_core::forecast::{UploadOutcome, FORECAST_ERROR_MESSAGE};

use crate::state::AppState;
use crate::RESPONSE_ID;

/// Renders the latest upload outcome. Empty until the first response.
#[component]
pub fn ResponsePanel() -> Element {
    let state = use_context::<AppState>();
    let outcome = state.outcome.read().clone();

    rsx! {
        ResponseView { outcome }
    }
}

/// The response area for a given outcome.
#[component]
pub fn ResponseView(outcome: Option<UploadOutcome>) -> Element {
    let content = match outcome {
        None => rsx! {},
        Some(UploadOutcome::Failed) => rsx! {
            p { style: "color:red;", "{FORECAST_ERROR_MESSAGE}" }
        },
        Some(UploadOutcome::Rendered {
            message,
            download_url,
            metrics,
            ..
        }) => {
            let metrics = metrics.map(|m| m.summary());
            rsx! {
                p { style: "color:#00C6FF;font-weight:600;", "{message}" }
                if let Some(summary) = metrics {
                    p { style: "color:#9aa4b2;font-size:13px;margin-top:0;", "{summary}" }
                }
                a { href: "{download_url}", class: "btn", "⬇️ Download Forecast CSV" }
            }
        }
    };

    rsx! {
        div {
            id: RESPONSE_ID,
            style: "margin-top: 16px;",
            {content}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(outcome: Option<UploadOutcome>) -> String {
        dioxus_ssr::render_element(rsx! {
            ResponseView { outcome }
        })
    }

    #[test]
    fn test_failed_outcome_shows_fixed_message() {
        let html = render(Some(UploadOutcome::Failed));
        assert!(html.contains(">Error generating forecast.</p>"), "{}", html);
        assert!(html.contains("color:red;"), "{}", html);
        assert!(!html.contains("Download Forecast CSV"));
    }

    #[test]
    fn test_rendered_outcome_shows_message_and_link() {
        let html = render(Some(UploadOutcome::Rendered {
            message: "Forecast generated".to_string(),
            download_url: "/download/sales".to_string(),
            metrics: None,
            chart: None,
        }));
        assert!(html.contains("Forecast generated"), "{}", html);
        assert!(html.contains("href=\"/download/sales\""), "{}", html);
        assert!(!html.contains(FORECAST_ERROR_MESSAGE));
    }

    #[test]
    fn test_no_outcome_is_empty() {
        let html = render(None);
        assert!(!html.contains("<p"), "{}", html);
    }
}
