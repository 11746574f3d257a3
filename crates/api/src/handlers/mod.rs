pub mod client;
pub mod employee;
pub mod schedule;
pub mod service;

use axum::extract::{rejection::PathRejection, Path};
use cleanops_core::errors::OpsError;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::middleware::error_handling::AppError;

/// Body returned by successful deletes.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Resolves an `{id}` segment. A segment that is not an integer names no row,
/// so it answers with the entity's 404 like any other unknown id.
pub(crate) fn path_id(
    path: Result<Path<i64>, PathRejection>,
    entity: &'static str,
) -> Result<i64, AppError> {
    match path {
        Ok(Path(id)) => Ok(id),
        Err(rejection) => {
            debug!("Rejected {} path: {}", entity, rejection.body_text());
            Err(OpsError::NotFound(entity).into())
        }
    }
}
