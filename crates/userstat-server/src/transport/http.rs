//! HTTP binding for the classifier.
//!
//! The route is registered for every method so that the classifier, not the
//! router, decides on 405 and records the sample for it.

use axum::{
    extract::State,
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use serde_json::json;

use userstat_core::error::UserstatError;
use userstat_core::protocol::StatusBody;

use crate::app_state::AppState;

/// Error wrapper rendering `UserstatError` as an HTTP response.
#[derive(Debug)]
pub struct ApiError(pub UserstatError);

impl From<UserstatError> for ApiError {
    fn from(e: UserstatError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self.0 {
            e @ UserstatError::MethodNotAllowed => {
                (StatusCode::METHOD_NOT_ALLOWED, e.to_string()).into_response()
            }
            UserstatError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": msg }))).into_response()
            }
            e @ (UserstatError::Config(_) | UserstatError::Internal(_)) => {
                tracing::error!(code = e.client_code().as_str(), error = %e, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": e.to_string() })),
                )
                    .into_response()
            }
        }
    }
}

/// `POST /`. The label is never reflected in the HTTP status.
pub async fn classify(
    State(state): State<AppState>,
    method: Method,
    body: Bytes,
) -> Result<Json<StatusBody>, ApiError> {
    let outcome = state.classifier().classify(&method, &body)?;
    Ok(Json(StatusBody {
        status: outcome.as_str().to_string(),
    }))
}
