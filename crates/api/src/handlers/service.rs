use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};
use cleanops_core::{
    errors::OpsError,
    models::{
        service::{CreateServiceRequest, UpdateServiceRequest},
        Service,
    },
};
use std::sync::Arc;
use tracing::info;

use crate::{
    handlers::{path_id, MessageResponse},
    middleware::error_handling::AppError,
    ApiState,
};

async fn find_service(state: &ApiState, id: i64) -> Result<Service, AppError> {
    let service = state
        .services
        .get_by_id(id)
        .await
        .map_err(OpsError::Database)?
        .ok_or(OpsError::NotFound("Service"))?;

    Ok(service)
}

#[axum::debug_handler]
pub async fn list_services(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<Service>>, AppError> {
    let services = state.services.list_all().await.map_err(OpsError::Database)?;
    Ok(Json(services))
}

#[axum::debug_handler]
pub async fn get_service(
    State(state): State<Arc<ApiState>>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<Service>, AppError> {
    let id = path_id(path, "Service")?;
    Ok(Json(find_service(&state, id).await?))
}

#[axum::debug_handler]
pub async fn create_service(
    State(state): State<Arc<ApiState>>,
    payload: Result<Json<CreateServiceRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Service>), AppError> {
    let Json(payload) = payload?;
    let new_service = payload.validate()?;

    let service = state
        .services
        .insert(&new_service)
        .await
        .map_err(OpsError::persistence("create", "service"))?;

    info!("Created service {} ({})", service.id, service.name);
    Ok((StatusCode::CREATED, Json(service)))
}

#[axum::debug_handler]
pub async fn update_service(
    State(state): State<Arc<ApiState>>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<UpdateServiceRequest>, JsonRejection>,
) -> Result<Json<Service>, AppError> {
    let id = path_id(path, "Service")?;
    let mut service = find_service(&state, id).await?;

    let Json(payload) = payload?;
    service.apply(payload.validate()?);

    let service = state
        .services
        .update(&service)
        .await
        .map_err(OpsError::persistence("update", "service"))?;

    info!("Updated service {}", service.id);
    Ok(Json(service))
}

#[axum::debug_handler]
pub async fn delete_service(
    State(state): State<Arc<ApiState>>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    let id = path_id(path, "Service")?;
    find_service(&state, id).await?;

    let deleted = state
        .services
        .delete(id)
        .await
        .map_err(OpsError::persistence("delete", "service"))?;
    if !deleted {
        return Err(OpsError::NotFound("Service").into());
    }

    info!("Deleted service {}", id);
    Ok(Json(MessageResponse::new("Service deleted successfully")))
}
