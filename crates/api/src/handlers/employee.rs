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
        employee::{CreateEmployeeRequest, UpdateEmployeeRequest},
        Employee,
    },
};
use std::sync::Arc;
use tracing::info;

use crate::{
    handlers::{path_id, MessageResponse},
    middleware::error_handling::AppError,
    ApiState,
};

async fn find_employee(state: &ApiState, id: i64) -> Result<Employee, AppError> {
    let employee = state
        .employees
        .get_by_id(id)
        .await
        .map_err(OpsError::Database)?
        .ok_or(OpsError::NotFound("Employee"))?;

    Ok(employee)
}

#[axum::debug_handler]
pub async fn list_employees(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<Employee>>, AppError> {
    let employees = state.employees.list_all().await.map_err(OpsError::Database)?;
    Ok(Json(employees))
}

#[axum::debug_handler]
pub async fn get_employee(
    State(state): State<Arc<ApiState>>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<Employee>, AppError> {
    let id = path_id(path, "Employee")?;
    Ok(Json(find_employee(&state, id).await?))
}

#[axum::debug_handler]
pub async fn create_employee(
    State(state): State<Arc<ApiState>>,
    payload: Result<Json<CreateEmployeeRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Employee>), AppError> {
    let Json(payload) = payload?;
    let new_employee = payload.validate()?;

    let employee = state
        .employees
        .insert(&new_employee)
        .await
        .map_err(OpsError::persistence("create", "employee"))?;

    info!("Created employee {} ({})", employee.id, employee.name);
    Ok((StatusCode::CREATED, Json(employee)))
}

#[axum::debug_handler]
pub async fn update_employee(
    State(state): State<Arc<ApiState>>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<UpdateEmployeeRequest>, JsonRejection>,
) -> Result<Json<Employee>, AppError> {
    let id = path_id(path, "Employee")?;
    let mut employee = find_employee(&state, id).await?;

    let Json(payload) = payload?;
    employee.apply(payload.validate()?);

    let employee = state
        .employees
        .update(&employee)
        .await
        .map_err(OpsError::persistence("update", "employee"))?;

    info!("Updated employee {}", employee.id);
    Ok(Json(employee))
}

#[axum::debug_handler]
pub async fn delete_employee(
    State(state): State<Arc<ApiState>>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    let id = path_id(path, "Employee")?;
    find_employee(&state, id).await?;

    let deleted = state
        .employees
        .delete(id)
        .await
        .map_err(OpsError::persistence("delete", "employee"))?;
    if !deleted {
        return Err(OpsError::NotFound("Employee").into());
    }

    info!("Deleted employee {}", id);
    Ok(Json(MessageResponse::new("Employee deleted successfully")))
}
