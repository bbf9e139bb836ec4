//! Upload form: CSV file, target column, date column and horizon.

use dioxus::prelude::*;
use fcst_core::preview::{CsvPreview, PREVIEW_ROWS};
use log::{error, info};

use crate::state::AppState;
use crate::upload;
use crate::{FILE_INPUT_ID, UPLOAD_FORM_ID};

/// Default forecast horizon in days.
const DEFAULT_HORIZON: u32 = 30;

const FIELD_STYLE: &str = "display: flex; flex-direction: column; gap: 4px; font-size: 13px; color: #c9d1d9;";
const INPUT_STYLE: &str = "padding: 6px 8px; background: #0d1117; color: #e6edf3; border: 1px solid #30363d; border-radius: 4px;";

/// The upload form. Submitting posts every field to the upload endpoint
/// without validation; choosing a file refreshes the preview.
#[component]
pub fn UploadForm() -> Element {
    let mut state = use_context::<AppState>();
    let date_col = (state.date_col)();
    let submitting = (state.submitting)();

    let on_submit = move |evt: FormEvent| {
        evt.prevent_default();
        spawn(async move {
            state.submitting.set(true);
            match upload::submit_form(UPLOAD_FORM_ID).await {
                Ok(outcome) => state.outcome.set(Some(outcome)),
                Err(e) => error!("Upload failed: {}", e),
            }
            state.submitting.set(false);
        });
    };

    let on_file_change = move |_evt: Event<FormData>| {
        spawn(async move {
            match upload::read_selected_file(FILE_INPUT_ID).await {
                Ok(Some((name, bytes))) => match CsvPreview::from_bytes(&bytes, PREVIEW_ROWS) {
                    Ok(preview) => {
                        info!("Previewing {} ({} rows)", name, preview.rows.len());
                        if state.date_col.peek().is_empty() {
                            if let Some(guess) = preview.guess_date_column() {
                                state.date_col.set(guess.to_string());
                            }
                        }
                        state.error_msg.set(None);
                        state.file_name.set(name);
                        state.preview.set(Some(preview));
                    }
                    Err(e) => {
                        state.preview.set(None);
                        state
                            .error_msg
                            .set(Some(format!("Could not preview {}: {}", name, e)));
                    }
                },
                Ok(None) => {
                    state.preview.set(None);
                    state.file_name.set(String::new());
                }
                Err(e) => error!("Reading selected file failed: {}", e),
            }
        });
    };

    let on_date_input = move |evt: Event<FormData>| {
        state.date_col.set(evt.value());
    };

    rsx! {
        form {
            id: UPLOAD_FORM_ID,
            novalidate: true,
            onsubmit: on_submit,
            style: "display: grid; grid-template-columns: repeat(auto-fit, minmax(180px, 1fr)); gap: 12px; align-items: end;",
            label {
                style: FIELD_STYLE,
                "CSV file"
                input {
                    r#type: "file",
                    id: FILE_INPUT_ID,
                    name: "file",
                    accept: ".csv,text/csv",
                    style: INPUT_STYLE,
                    onchange: on_file_change,
                }
            }
            label {
                style: FIELD_STYLE,
                "Target column"
                input {
                    r#type: "text",
                    name: "target_col",
                    placeholder: "sales",
                    style: INPUT_STYLE,
                }
            }
            label {
                style: FIELD_STYLE,
                "Date column"
                input {
                    r#type: "text",
                    name: "date_col",
                    placeholder: "date",
                    value: "{date_col}",
                    style: INPUT_STYLE,
                    oninput: on_date_input,
                }
            }
            label {
                style: FIELD_STYLE,
                "Horizon (days)"
                input {
                    r#type: "number",
                    name: "horizon",
                    value: "{DEFAULT_HORIZON}",
                    style: INPUT_STYLE,
                }
            }
            button {
                r#type: "submit",
                class: "btn",
                disabled: submitting,
                style: "padding: 8px 16px; background: #00C6FF; color: #000; font-weight: 600; border: none; border-radius: 4px; cursor: pointer;",
                if submitting { "Working..." } else { "Generate Forecast" }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[component]
    fn FormHarness() -> Element {
        use_context_provider(AppState::new);
        rsx! {
            UploadForm {}
        }
    }

    #[test]
    fn test_form_skips_browser_validation() {
        let html = dioxus_ssr::render_element(rsx! {
            FormHarness {}
        });
        assert!(html.contains("id=\"uploadForm\""), "{}", html);
        assert!(html.contains("novalidate"), "{}", html);
        assert!(!html.contains("min="), "{}", html);
        assert!(!html.contains("required"), "{}", html);
        assert!(html.contains("name=\"horizon\""), "{}", html);
    }
}
