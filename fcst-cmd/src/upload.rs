//! Upload a CSV for forecasting.

use anyhow::Context;
use fcst_core::endpoints;
use fcst_core::forecast::{
    interpret_response, ForecastChart, ForecastResponse, UploadOutcome, FORECAST_ERROR_MESSAGE,
};
use log::{info, warn};
use serde_json::Value;

use crate::{client, download, endpoint_url, file_part};

/// Fields of the upload form.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub file: String,
    pub target_col: String,
    pub date_col: Option<String>,
    pub horizon: Option<u32>,
}

impl UploadRequest {
    async fn form(&self) -> anyhow::Result<reqwest::multipart::Form> {
        let mut form = reqwest::multipart::Form::new()
            .part("file", file_part(&self.file).await?)
            .text("target_col", self.target_col.clone());
        if let Some(date_col) = &self.date_col {
            form = form.text("date_col", date_col.clone());
        }
        if let Some(horizon) = self.horizon {
            form = form.text("horizon", horizon.to_string());
        }
        Ok(form)
    }
}

/// Post the upload form and print the outcome.
///
/// Fails with the dashboard's error message when the backend returns no
/// chart data. When `download_to` is set the forecast CSV is saved there.
pub async fn run_upload(
    server: &str,
    request: &UploadRequest,
    download_to: Option<&str>,
) -> anyhow::Result<()> {
    let client = client()?;
    let url = endpoint_url(server, endpoints::UPLOAD);
    info!(
        "Uploading {} to {} (target column '{}')",
        request.file, url, request.target_col
    );

    let response = client.post(&url).multipart(request.form().await?).send().await?;
    let status = response.status();
    let body = response.text().await?;
    let parsed = ForecastResponse::from_json(&body)
        .with_context(|| format!("Unexpected response from {} ({})", url, status))?;

    match interpret_response(&parsed, &request.target_col) {
        UploadOutcome::Failed => anyhow::bail!(FORECAST_ERROR_MESSAGE),
        UploadOutcome::Rendered {
            message,
            download_url,
            metrics,
            chart,
        } => {
            println!("{}", message);
            if let Some(metrics) = metrics {
                println!("{}", metrics.summary());
            }
            match &chart {
                Some(chart) => println!("{}", chart_summary(chart)),
                None => warn!("chart_data is not a list of rows; no series to summarize"),
            }
            println!("Download: {}", endpoint_url(server, &download_url));

            if let Some(path) = download_to {
                download::fetch_to_file(&client, &endpoint_url(server, &download_url), path).await?;
            }
            Ok(())
        }
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "-".to_string(),
        other => other.to_string(),
    }
}

/// One-line description of the returned series.
pub fn chart_summary(chart: &ForecastChart) -> String {
    if chart.is_empty() {
        return "No forecast rows returned".to_string();
    }
    let gaps = |series: &[Value]| series.iter().filter(|v| v.is_null()).count();
    format!(
        "{} rows from {} to {} ({} upper / {} lower bound gaps)",
        chart.len(),
        chart.dates.first().map(display_value).unwrap_or_default(),
        chart.dates.last().map(display_value).unwrap_or_default(),
        gaps(&chart.upper),
        gaps(&chart.lower),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_chart_summary() {
        let records = vec![
            json!({"ds": "2024-01-01", "y": 1, "y_upper": 2, "y_lower": 0}),
            json!({"ds": "2024-01-02", "y": 2, "y_upper": 3, "y_lower": 1}),
        ];
        let chart = ForecastChart::from_records(&records, "ds", "y");
        assert_eq!(
            chart_summary(&chart),
            "2 rows from 2024-01-01 to 2024-01-02 (0 upper / 1 lower bound gaps)"
        );
    }

    #[test]
    fn test_chart_summary_empty() {
        assert_eq!(chart_summary(&ForecastChart::default()), "No forecast rows returned");
    }
}
