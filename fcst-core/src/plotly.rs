//! Plotly figure for the forecast chart.
//!
//! The chart is drawn by Plotly on the JS side; this module only builds the
//! `data`, `layout` and `config` arguments of `Plotly.newPlot` as JSON.

use log::warn;
use serde::Serialize;
use serde_json::Value;

use crate::forecast::ForecastChart;

pub const CHART_TITLE: &str = "Sales Forecast with Confidence Bounds";
pub const FORECAST_COLOR: &str = "#00C6FF";
pub const BOUND_COLOR: &str = "#AAAAAA";
pub const BACKGROUND_COLOR: &str = "#000000";
pub const TEXT_COLOR: &str = "#FFFFFF";

/// Line styling of a single trace.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineStyle {
    pub color: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dash: Option<&'static str>,
}

/// A `scatter` trace drawn as a line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trace {
    pub x: Vec<Value>,
    pub y: Vec<Value>,
    pub mode: &'static str,
    pub name: &'static str,
    pub line: LineStyle,
}

/// Arguments for `Plotly.newPlot(container, data, layout, config)`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlotlyFigure {
    pub data: Vec<Trace>,
    pub layout: Value,
    pub config: Value,
}

impl PlotlyFigure {
    /// Traces as a JSON array. Falls back to `[]` so the bridge always
    /// receives parseable JSON.
    pub fn data_json(&self) -> String {
        serde_json::to_string(&self.data).unwrap_or_else(|e| {
            warn!("Failed to serialize chart traces: {}", e);
            "[]".to_string()
        })
    }

    pub fn layout_json(&self) -> String {
        self.layout.to_string()
    }

    pub fn config_json(&self) -> String {
        self.config.to_string()
    }

    /// Look up a trace by its legend name.
    pub fn trace(&self, name: &str) -> Option<&Trace> {
        self.data.iter().find(|t| t.name == name)
    }
}

fn bound_line() -> LineStyle {
    LineStyle {
        color: BOUND_COLOR,
        width: None,
        dash: Some("dot"),
    }
}

impl ForecastChart {
    /// Build the three-series dark-theme figure.
    pub fn figure(&self) -> PlotlyFigure {
        let data = vec![
            Trace {
                x: self.dates.clone(),
                y: self.forecast.clone(),
                mode: "lines",
                name: "Forecast",
                line: LineStyle {
                    color: FORECAST_COLOR,
                    width: Some(3.0),
                    dash: None,
                },
            },
            Trace {
                x: self.dates.clone(),
                y: self.upper.clone(),
                mode: "lines",
                name: "Upper Bound",
                line: bound_line(),
            },
            Trace {
                x: self.dates.clone(),
                y: self.lower.clone(),
                mode: "lines",
                name: "Lower Bound",
                line: bound_line(),
            },
        ];

        let layout = serde_json::json!({
            "title": { "text": CHART_TITLE, "font": { "color": TEXT_COLOR } },
            "paper_bgcolor": BACKGROUND_COLOR,
            "plot_bgcolor": BACKGROUND_COLOR,
            "font": { "color": TEXT_COLOR },
            "xaxis": { "title": "Date" },
            "yaxis": { "title": "Value" },
            "legend": { "font": { "color": TEXT_COLOR } },
        });

        PlotlyFigure {
            data,
            layout,
            config: serde_json::json!({ "responsive": true }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forecast::ForecastResponse;
    use serde_json::json;

    fn figure() -> PlotlyFigure {
        let resp = ForecastResponse::from_json(
            r#"{"message": "ok", "date_col": "date", "target_col": "sales",
                "chart_data": [{"date": "2024-01-01", "sales": 10, "sales_upper": 12, "sales_lower": 8}]}"#,
        )
        .unwrap();
        resp.chart().unwrap().figure()
    }

    #[test]
    fn test_figure_series() {
        let fig = figure();
        assert_eq!(fig.data.len(), 3);

        let forecast = fig.trace("Forecast").unwrap();
        assert_eq!(forecast.x, vec![json!("2024-01-01")]);
        assert_eq!(forecast.y, vec![json!(10)]);
        assert_eq!(forecast.line.color, FORECAST_COLOR);

        assert_eq!(fig.trace("Upper Bound").unwrap().y, vec![json!(12)]);
        assert_eq!(fig.trace("Lower Bound").unwrap().y, vec![json!(8)]);
    }

    #[test]
    fn test_data_json_shape() {
        let data: Value = serde_json::from_str(&figure().data_json()).unwrap();
        assert_eq!(data[0]["line"], json!({"color": "#00C6FF", "width": 3.0}));
        assert_eq!(data[1]["line"], json!({"color": "#AAAAAA", "dash": "dot"}));
        assert_eq!(data[2]["mode"], json!("lines"));
    }

    #[test]
    fn test_dark_layout() {
        let fig = figure();
        assert_eq!(fig.layout["paper_bgcolor"], json!("#000000"));
        assert_eq!(fig.layout["plot_bgcolor"], json!("#000000"));
        assert_eq!(fig.layout["font"]["color"], json!("#FFFFFF"));
        assert_eq!(fig.layout["title"]["text"], json!(CHART_TITLE));
        assert_eq!(fig.config_json(), r#"{"responsive":true}"#);
    }

    #[test]
    fn test_data_json_is_parseable_without_traces() {
        let fig = PlotlyFigure {
            data: Vec::new(),
            layout: json!({}),
            config: json!({}),
        };
        assert_eq!(fig.data_json(), "[]");
        let parsed: Value = serde_json::from_str(&figure().data_json()).unwrap();
        assert!(parsed.is_array());
    }

    #[test]
    fn test_gap_serializes_as_null() {
        let chart = ForecastChart::from_records(&[json!({"d": "x", "y": 1})], "d", "y");
        let data: Value = serde_json::from_str(&chart.figure().data_json()).unwrap();
        assert_eq!(data[1]["y"], json!([null]));
    }
}
