//! HTTP service for submitting an image to the prediction endpoint.

use gloo_net::http::Request;
use serde_json::Value;
use web_sys::{File, FormData};

use crate::config::{endpoint, UPLOAD_ENDPOINT, UPLOAD_FIELD};
use crate::types::{AppError, AppResult};

/// Upload an image and return the decoded JSON body.
///
/// The HTTP status is not inspected: an error reply such as
/// `{"message": "Unauthorized access"}` still decodes and is classified as
/// malformed by the caller. Only network and JSON failures are errors here.
pub async fn request_prediction(file: &File) -> AppResult<Value> {
    let form_data = FormData::new()
        .map_err(|e| AppError::Transport(format!("Failed to create FormData: {:?}", e)))?;

    form_data
        .append_with_blob(UPLOAD_FIELD, file)
        .map_err(|e| AppError::Transport(format!("Failed to append file: {:?}", e)))?;

    log::info!("📤 Uploading {} ({} bytes)", file.name(), file.size());

    let response = Request::post(&endpoint(UPLOAD_ENDPOINT))
        .body(form_data)?
        .send()
        .await?;

    log::debug!("Prediction endpoint answered {}", response.status());

    Ok(response.json::<Value>().await?)
}
