//! # Error Handling Middleware
//!
//! Maps the domain error taxonomy to HTTP status codes and a JSON body of the
//! form `{"error": "<message>"}`.
//!
//! Validation failures (missing field, bad value, bad date/time) become 400,
//! missing rows become 404, and persistence failures become 500. The cause of
//! a 500 is logged but never sent to the caller.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use cleanops_core::errors::OpsError;
use serde_json::json;
use tracing::error;

/// Application error wrapper that provides HTTP status code mapping
///
/// # Example
///
/// ```
/// use axum::Json;
/// use cleanops_api::middleware::error_handling::AppError;
/// use cleanops_core::errors::OpsError;
///
/// async fn handler(found: bool) -> Result<Json<&'static str>, AppError> {
///     if !found {
///         return Err(OpsError::NotFound("Client").into());
///     }
///     Ok(Json("ok"))
/// }
/// # fn main() {}
/// ```
#[derive(Debug)]
pub struct AppError(pub OpsError);

impl AppError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            OpsError::MissingField(_) => StatusCode::BAD_REQUEST,
            OpsError::InvalidDateTime => StatusCode::BAD_REQUEST,
            OpsError::Validation(_) => StatusCode::BAD_REQUEST,
            OpsError::NotFound(_) => StatusCode::NOT_FOUND,
            OpsError::Persistence { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            OpsError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        match &self.0 {
            OpsError::Persistence { source, .. } => error!("{}: {:?}", self.0, source),
            OpsError::Database(report) => error!("Database error: {:?}", report),
            _ => {}
        }

        let body = Json(json!({ "error": self.0.to_string() }));
        (status, body).into_response()
    }
}

impl From<OpsError> for AppError {
    fn from(err: OpsError) -> Self {
        AppError(err)
    }
}

impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(OpsError::Database(err))
    }
}

/// A request body that is not JSON, or not the expected shape, is a 400.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError(OpsError::Validation(rejection.body_text()))
    }
}

/// Maps an `OpsError` straight to an HTTP response.
pub fn map_error(err: OpsError) -> Response {
    AppError(err).into_response()
}
