//! CRD conversion webhook
//!
//! The API server posts an `apiextensions.k8s.io/v1` `ConversionReview` to
//! `/convert` whenever it needs an object at a version other than the one it
//! is stored or submitted at. Every object in the request is converted in
//! order; the first failure fails the whole review and no objects are
//! returned.

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use kube::core::Status;
use kube::core::conversion::{ConversionRequest, ConversionResponse, ConversionReview};
use serde_json::Value;
use tracing::{info, warn};

use crate::metrics::Metrics;
use crate::server::ServerState;

/// namespace/name of an object, for error messages
fn object_context(object: &Value) -> String {
    let metadata = object.get("metadata");
    let name = metadata.and_then(|m| m.get("name")).and_then(Value::as_str);
    let namespace = metadata.and_then(|m| m.get("namespace")).and_then(Value::as_str);
    match (namespace, name) {
        (Some(namespace), Some(name)) => format!(" ({namespace}/{name})"),
        (None, Some(name)) => format!(" ({name})"),
        _ => String::new(),
    }
}

/// Convert every object of a request to the desired version
pub fn convert_request(mut request: ConversionRequest, metrics: &Metrics) -> ConversionResponse {
    let objects = std::mem::take(&mut request.objects);
    let desired_api_version = request.desired_api_version.clone();

    let mut converted_objects = Vec::with_capacity(objects.len());
    for (index, object) in objects.into_iter().enumerate() {
        let kind = object
            .get("kind")
            .and_then(Value::as_str)
            .unwrap_or("Unknown")
            .to_string();
        let context = object_context(&object);
        match crds::convert(object, &desired_api_version) {
            Ok(converted) => {
                metrics.record_object(&kind);
                converted_objects.push(converted);
            }
            Err(e) => {
                let message = format!("Conversion of {kind} object {index}{context} failed: {e}");
                return ConversionResponse::for_request(request)
                    .failure(Status::failure(&message, "ConversionFailed"));
            }
        }
    }

    ConversionResponse::for_request(request).success(converted_objects)
}

/// `Success` or `Failure`, as the API server reads it
fn result_label(status: &Status) -> &'static str {
    if status.is_success() { "Success" } else { "Failure" }
}

/// Axum handler for `POST /convert`
pub async fn handle_convert(
    State(state): State<ServerState>,
    Json(review): Json<ConversionReview>,
) -> impl IntoResponse {
    let metrics = state.metrics();
    let request = match ConversionRequest::from_review(review) {
        Ok(request) => request,
        Err(e) => {
            warn!(error = %e, "Rejecting ConversionReview");
            metrics.record_request("Failure");
            let status = Status::failure(&e.to_string(), "InvalidRequest");
            return (StatusCode::OK, Json(ConversionResponse::invalid(status).into_review()));
        }
    };
    info!(
        uid = %request.uid,
        desired_api_version = %request.desired_api_version,
        object_count = request.objects.len(),
        "Processing conversion request"
    );

    let response = convert_request(request, metrics);
    metrics.record_request(result_label(&response.result));

    if response.result.is_success() {
        info!(
            uid = %response.uid,
            converted_count = response.converted_objects.len(),
            "Conversion successful"
        );
    } else {
        warn!(uid = %response.uid, error = %response.result.message, "Conversion failed");
    }

    (StatusCode::OK, Json(response.into_review()))
}

#[cfg(test)]
#[path = "webhook_test.rs"]
mod tests;
