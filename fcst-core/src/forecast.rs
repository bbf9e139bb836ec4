//! Upload response model and chart series derivation.
//!
//! The backend answers `POST /api/upload` with the forecast rows as loosely
//! typed records (column name -> value). The chart needs four parallel
//! vectors: the x values from the date column, the forecast from the target
//! column, and the two confidence bounds from `<target>_upper` and
//! `<target>_lower`.

use log::warn;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::endpoints;

/// Message shown in the response area when the backend returns no chart data.
pub const FORECAST_ERROR_MESSAGE: &str = "Error generating forecast.";

/// Column suffix of the upper confidence bound.
pub const UPPER_SUFFIX: &str = "_upper";

/// Column suffix of the lower confidence bound.
pub const LOWER_SUFFIX: &str = "_lower";

/// Evaluation metrics computed by the backend for the fitted model.
///
/// A metric that is missing, null or not a number is `None`; numbers sent as
/// strings are parsed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    #[serde(rename = "MAE", default, deserialize_with = "lenient_number")]
    pub mae: Option<f64>,
    #[serde(rename = "RMSE", default, deserialize_with = "lenient_number")]
    pub rmse: Option<f64>,
    #[serde(rename = "MAPE", default, deserialize_with = "lenient_number")]
    pub mape: Option<f64>,
}

impl Metrics {
    /// One-line summary, e.g. "MAE 1.20 · RMSE 2.00 · MAPE 3.50%".
    /// Metrics the backend could not compute are shown as "n/a".
    pub fn summary(&self) -> String {
        let fmt = |v: Option<f64>| v.map_or_else(|| "n/a".to_string(), |v| format!("{:.2}", v));
        let mape = self
            .mape
            .map_or_else(|| "n/a".to_string(), |v| format!("{:.2}%", v));
        format!("MAE {} · RMSE {} · MAPE {}", fmt(self.mae), fmt(self.rmse), mape)
    }
}

/// JSON body returned by `POST /api/upload`.
///
/// `chart_data` is kept as a raw value: the backend may omit it, send null,
/// or send any other falsy value on failure, and all of those mean "no chart".
/// The other fields never fail the decode: null text fields are empty and a
/// malformed `metrics` object is dropped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForecastResponse {
    #[serde(default, deserialize_with = "lenient_string")]
    pub message: String,
    #[serde(default)]
    pub chart_data: Option<Value>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub date_col: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub target_col: String,
    #[serde(
        default,
        deserialize_with = "lenient_metrics",
        skip_serializing_if = "Option::is_none"
    )]
    pub metrics: Option<Metrics>,
}

/// Null becomes empty; other non-string values keep their JSON text.
fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

fn lenient_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    })
}

fn lenient_metrics<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Metrics>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        value @ Value::Object(_) => serde_json::from_value(value).ok(),
        _ => None,
    })
}

impl ForecastResponse {
    /// Parse a response body.
    pub fn from_json(body: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(body)?)
    }

    /// Whether `chart_data` is present and truthy. Only a response without
    /// it is a failed upload.
    pub fn has_chart_data(&self) -> bool {
        self.chart_data.as_ref().is_some_and(is_truthy)
    }

    /// Derive the chart series, or `None` when the response carries no
    /// plottable chart data.
    pub fn chart(&self) -> Option<ForecastChart> {
        let data = self.chart_data.as_ref().filter(|v| is_truthy(v))?;
        let Some(records) = data.as_array() else {
            warn!("chart_data is not an array; nothing to plot");
            return None;
        };
        Some(ForecastChart::from_records(
            records,
            &self.date_col,
            &self.target_col,
        ))
    }
}

/// JavaScript truthiness of a JSON value.
///
/// Empty arrays and objects are truthy; `0`, `""`, `false`, null and NaN
/// are not.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// The three chart series sharing one x axis.
///
/// All vectors have one entry per record. Values missing from a record are
/// null; bound values that are missing or falsy are null too, which Plotly
/// draws as a gap.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ForecastChart {
    pub dates: Vec<Value>,
    pub forecast: Vec<Value>,
    pub upper: Vec<Value>,
    pub lower: Vec<Value>,
}

impl ForecastChart {
    pub fn from_records(records: &[Value], date_col: &str, target_col: &str) -> Self {
        let upper_col = format!("{}{}", target_col, UPPER_SUFFIX);
        let lower_col = format!("{}{}", target_col, LOWER_SUFFIX);

        let mut chart = ForecastChart {
            dates: Vec::with_capacity(records.len()),
            forecast: Vec::with_capacity(records.len()),
            upper: Vec::with_capacity(records.len()),
            lower: Vec::with_capacity(records.len()),
        };

        for record in records {
            chart.dates.push(lookup(record, date_col));
            chart.forecast.push(lookup(record, target_col));
            chart.upper.push(bound(record, &upper_col));
            chart.lower.push(bound(record, &lower_col));
        }

        chart
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

fn lookup(record: &Value, column: &str) -> Value {
    record.get(column).cloned().unwrap_or(Value::Null)
}

fn bound(record: &Value, column: &str) -> Value {
    match record.get(column) {
        Some(v) if is_truthy(v) => v.clone(),
        _ => Value::Null,
    }
}

/// URL of the forecast CSV for a target column.
pub fn download_url(target_col: &str) -> String {
    format!("{}/{}", endpoints::DOWNLOAD_PREFIX, target_col)
}

/// What the response area and chart should show after an upload.
#[derive(Debug, Clone, PartialEq)]
pub enum UploadOutcome {
    /// Chart data was returned: show the message, the download link and the
    /// chart. `chart` is `None` when the chart data is not a list of rows;
    /// the message and link are still shown but nothing is drawn.
    Rendered {
        message: String,
        download_url: String,
        metrics: Option<Metrics>,
        chart: Option<ForecastChart>,
    },
    /// No usable chart data: show the fixed error message, draw nothing.
    Failed,
}

impl UploadOutcome {
    pub fn chart(&self) -> Option<&ForecastChart> {
        match self {
            UploadOutcome::Rendered { chart, .. } => chart.as_ref(),
            UploadOutcome::Failed => None,
        }
    }
}

/// Decide what to render for an upload response.
///
/// The download link uses the target column as submitted in the form, not
/// the one echoed back by the backend.
pub fn interpret_response(response: &ForecastResponse, form_target_col: &str) -> UploadOutcome {
    if !response.has_chart_data() {
        return UploadOutcome::Failed;
    }
    UploadOutcome::Rendered {
        message: response.message.clone(),
        download_url: download_url(form_target_col),
        metrics: response.metrics.clone(),
        chart: response.chart(),
    }
}
