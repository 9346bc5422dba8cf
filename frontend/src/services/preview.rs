//! Local rendering of the selected file.

use js_sys::Promise;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{File, FileReader};

use crate::types::{AppError, AppResult};

/// Read `file` into a `data:` URL suitable for an `<img>` source.
pub async fn read_as_data_url(file: &File) -> AppResult<String> {
    let reader = FileReader::new()
        .map_err(|e| AppError::Preview(format!("Failed to create FileReader: {:?}", e)))?;

    let promise = Promise::new(&mut |resolve, reject| {
        let source = reader.clone();
        let onload = Closure::once_into_js(move || {
            let result = source.result().unwrap_or(JsValue::UNDEFINED);
            let _ = resolve.call1(&JsValue::NULL, &result);
        });
        let failed = reader.clone();
        let onerror = Closure::once_into_js(move || {
            let error = failed.error().map(JsValue::from).unwrap_or(JsValue::UNDEFINED);
            let _ = reject.call1(&JsValue::NULL, &error);
        });
        reader.set_onload(Some(onload.unchecked_ref()));
        reader.set_onerror(Some(onerror.unchecked_ref()));
    });

    reader
        .read_as_data_url(file)
        .map_err(|e| AppError::Preview(format!("Failed to read {}: {:?}", file.name(), e)))?;

    let value = JsFuture::from(promise)
        .await
        .map_err(|e| AppError::Preview(format!("Failed to read {}: {:?}", file.name(), e)))?;

    value
        .as_string()
        .ok_or_else(|| AppError::Preview("FileReader result is not a string".to_string()))
}
