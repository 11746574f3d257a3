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
        client::{CreateClientRequest, UpdateClientRequest},
        Client,
    },
};
use std::sync::Arc;
use tracing::info;

use crate::{
    handlers::{path_id, MessageResponse},
    middleware::error_handling::AppError,
    ApiState,
};

async fn find_client(state: &ApiState, id: i64) -> Result<Client, AppError> {
    let client = state
        .clients
        .get_by_id(id)
        .await
        .map_err(OpsError::Database)?
        .ok_or(OpsError::NotFound("Client"))?;

    Ok(client)
}

#[axum::debug_handler]
pub async fn list_clients(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<Client>>, AppError> {
    let clients = state.clients.list_all().await.map_err(OpsError::Database)?;
    Ok(Json(clients))
}

#[axum::debug_handler]
pub async fn get_client(
    State(state): State<Arc<ApiState>>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<Client>, AppError> {
    let id = path_id(path, "Client")?;
    Ok(Json(find_client(&state, id).await?))
}

#[axum::debug_handler]
pub async fn create_client(
    State(state): State<Arc<ApiState>>,
    payload: Result<Json<CreateClientRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Client>), AppError> {
    let Json(payload) = payload?;
    let new_client = payload.validate()?;

    let client = state
        .clients
        .insert(&new_client)
        .await
        .map_err(OpsError::persistence("create", "client"))?;

    info!("Created client {} ({})", client.id, client.name);
    Ok((StatusCode::CREATED, Json(client)))
}

#[axum::debug_handler]
pub async fn update_client(
    State(state): State<Arc<ApiState>>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<UpdateClientRequest>, JsonRejection>,
) -> Result<Json<Client>, AppError> {
    let id = path_id(path, "Client")?;
    let mut client = find_client(&state, id).await?;

    let Json(payload) = payload?;
    client.apply(payload.validate()?);

    let client = state
        .clients
        .update(&client)
        .await
        .map_err(OpsError::persistence("update", "client"))?;

    info!("Updated client {}", client.id);
    Ok(Json(client))
}

#[axum::debug_handler]
pub async fn delete_client(
    State(state): State<Arc<ApiState>>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    let id = path_id(path, "Client")?;
    find_client(&state, id).await?;

    let deleted = state
        .clients
        .delete(id)
        .await
        .map_err(OpsError::persistence("delete", "client"))?;
    if !deleted {
        return Err(OpsError::NotFound("Client").into());
    }

    info!("Deleted client {}", id);
    Ok(Json(MessageResponse::new("Client deleted successfully")))
}
