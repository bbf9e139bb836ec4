//! Loading indicator shown while a forecast is being generated.

use dioxus::prelude::*;

/// Simple loading indicator.
#[component]
pub fn LoadingSpinner() -> Element {
    rsx! {
        div {
            style: "display: flex; justify-content: center; align-items: center; padding: 24px; color: #9aa4b2;",
            "Generating forecast..."
        }
    }
}
