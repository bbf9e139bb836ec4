//! Table preview of the selected CSV file.

use dioxus::prelude::*;

use crate::state::AppState;

/// Number of preview rows rendered in the page; the rest stay in state.
const VISIBLE_ROWS: usize = 20;

/// Shows the header and first rows of the selected file, with the guessed
/// date column highlighted.
#[component]
pub fn PreviewTable() -> Element {
    let state = use_context::<AppState>();
    let Some(preview) = state.preview.read().clone() else {
        return rsx! {};
    };
    let file_name = (state.file_name)();
    let date_col = preview.guess_date_column();
    let total = preview.rows.len();
    let shown = total.min(VISIBLE_ROWS);
    let headers: Vec<(String, &str)> = preview
        .headers
        .iter()
        .map(|h| {
            let style = if Some(h.as_str()) == date_col {
                "padding: 4px 8px; border-bottom: 1px solid #00C6FF; color: #00C6FF; text-align: left;"
            } else {
                "padding: 4px 8px; border-bottom: 1px solid #30363d; text-align: left;"
            };
            (h.clone(), style)
        })
        .collect();

    rsx! {
        div {
            style: "margin-top: 16px; overflow-x: auto;",
            p {
                style: "font-size: 12px; color: #9aa4b2; margin: 0 0 4px 0;",
                "{file_name}: showing {shown} of {total} preview rows"
            }
            table {
                style: "border-collapse: collapse; font-size: 12px; color: #e6edf3;",
                thead {
                    tr {
                        for (header, style) in headers.iter() {
                            th { style: "{style}", "{header}" }
                        }
                    }
                }
                tbody {
                    for row in preview.rows.iter().take(VISIBLE_ROWS) {
                        tr {
                            for cell in row.iter() {
                                td {
                                    style: "padding: 2px 8px; border-bottom: 1px solid #161b22;",
                                    "{cell}"
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
