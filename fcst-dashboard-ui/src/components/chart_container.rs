//! Chart container component for the Plotly forecast chart.

use dioxus::prelude::*;

use crate::js_bridge;

/// Props for ChartContainer
#[derive(Props, Clone, PartialEq)]
pub struct ChartContainerProps {
    /// The DOM id for the chart container (Plotly will render into this)
    pub id: String,
    /// Optional minimum height in pixels
    #[props(default = 450)]
    pub min_height: u32,
}

/// A container div for Plotly charts. The chart is purged when the
/// container unmounts.
#[component]
pub fn ChartContainer(props: ChartContainerProps) -> Element {
    let style = format!(
        "min-height: {}px; position: relative; width: 100%;",
        props.min_height
    );

    let id = props.id.clone();
    use_drop(move || js_bridge::destroy_chart(&id));

    rsx! {
        div {
            style: "{style}",
            div {
                id: "{props.id}",
                style: "width: 100%;",
            }
        }
    }
}
