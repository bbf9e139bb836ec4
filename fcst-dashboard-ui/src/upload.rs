//! Browser-side upload client.
//!
//! The upload form is posted as-is: `FormData` is built from the form element
//! so every field (file, target column, date column, horizon) goes out in one
//! multipart request, without client-side validation.

use fcst_core::endpoints;
use fcst_core::forecast::{interpret_response, ForecastResponse, UploadOutcome};
use fcst_core::{DashboardError, Result};
use log::{info, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{FormData, HtmlFormElement, HtmlInputElement, RequestInit, Response};

use crate::js_error;

fn window() -> Result<web_sys::Window> {
    web_sys::window().ok_or_else(|| DashboardError::Browser("no window".to_string()))
}

fn element_by_id<T: JsCast>(id: &str) -> Result<T> {
    window()?
        .document()
        .and_then(|doc| doc.get_element_by_id(id))
        .and_then(|el| el.dyn_into::<T>().ok())
        .ok_or_else(|| DashboardError::MissingElement(id.to_string()))
}

/// POST a form and return the response body as text.
///
/// The status code is not inspected; error bodies are returned like any
/// other body.
pub async fn post_form(url: &str, form: &FormData) -> Result<String> {
    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_body(form);

    let response = JsFuture::from(window()?.fetch_with_str_and_init(url, &opts))
        .await
        .map_err(|e| DashboardError::Request(format!("{:?}", e)))?;
    let response: Response = response.dyn_into().map_err(js_error)?;

    let text = JsFuture::from(response.text().map_err(js_error)?)
        .await
        .map_err(js_error)?;
    text.as_string()
        .ok_or_else(|| DashboardError::Request("response body is not text".to_string()))
}

/// Submit the upload form with the given id and decide what to render.
pub async fn submit_form(form_id: &str) -> Result<UploadOutcome> {
    let form: HtmlFormElement = element_by_id(form_id)?;
    let data = FormData::new_with_form(&form).map_err(js_error)?;
    let target_col = data.get("target_col").as_string().unwrap_or_default();

    info!("Uploading to {} (target column '{}')", endpoints::UPLOAD, target_col);
    let body = post_form(endpoints::UPLOAD, &data).await?;
    let response = ForecastResponse::from_json(&body)?;

    let outcome = interpret_response(&response, &target_col);
    match &outcome {
        UploadOutcome::Rendered {
            chart: Some(chart), ..
        } => info!("Forecast returned {} rows", chart.len()),
        UploadOutcome::Rendered { chart: None, .. } => {
            warn!("Upload response chart data is not a list of rows")
        }
        UploadOutcome::Failed => info!("Upload response carried no chart data"),
    }
    Ok(outcome)
}

/// Read the first file selected in a file input, if any.
pub async fn read_selected_file(input_id: &str) -> Result<Option<(String, Vec<u8>)>> {
    let input: HtmlInputElement = element_by_id(input_id)?;
    let Some(file) = input.files().and_then(|files| files.item(0)) else {
        return Ok(None);
    };

    let buf = JsFuture::from(file.array_buffer()).await.map_err(js_error)?;
    let u8arr = js_sys::Uint8Array::new(&buf);
    let mut bytes = vec![0u8; u8arr.length() as usize];
    u8arr.copy_to(&mut bytes[..]);
    Ok(Some((file.name(), bytes)))
}
