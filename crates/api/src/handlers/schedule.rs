//! Schedule handlers.
//!
//! Every schedule leaves the API with its client, employee and service
//! embedded. A relation whose row has been deleted renders as `null`.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};
use cleanops_core::{
    errors::{OpsError, OpsResult},
    models::{
        schedule::{is_known_status, CreateScheduleRequest, UpdateScheduleRequest},
        Client, Employee, Schedule, ScheduleResponse, Service,
    },
};
use cleanops_db::repositories::ScheduleFilter;
use std::{collections::HashMap, sync::Arc};
use tracing::{info, warn};

use crate::{
    handlers::{path_id, MessageResponse},
    middleware::error_handling::AppError,
    validation,
    ApiState,
};

/// Relation lookups memoized across one response.
#[derive(Default)]
struct Relations {
    clients: HashMap<i64, Option<Client>>,
    employees: HashMap<i64, Option<Employee>>,
    services: HashMap<i64, Option<Service>>,
}

impl Relations {
    async fn embed(&mut self, state: &ApiState, schedule: Schedule) -> OpsResult<ScheduleResponse> {
        if !self.clients.contains_key(&schedule.client_id) {
            let client = state.clients.get_by_id(schedule.client_id).await?;
            self.clients.insert(schedule.client_id, client);
        }
        if !self.employees.contains_key(&schedule.employee_id) {
            let employee = state.employees.get_by_id(schedule.employee_id).await?;
            self.employees.insert(schedule.employee_id, employee);
        }
        if !self.services.contains_key(&schedule.service_id) {
            let service = state.services.get_by_id(schedule.service_id).await?;
            self.services.insert(schedule.service_id, service);
        }

        let client = self.clients.get(&schedule.client_id).cloned().flatten();
        let employee = self.employees.get(&schedule.employee_id).cloned().flatten();
        let service = self.services.get(&schedule.service_id).cloned().flatten();

        Ok(ScheduleResponse::new(schedule, client, employee, service))
    }
}

async fn render_one(state: &ApiState, schedule: Schedule) -> OpsResult<ScheduleResponse> {
    Relations::default().embed(state, schedule).await
}

async fn render_all(state: &ApiState, schedules: Vec<Schedule>) -> OpsResult<Vec<ScheduleResponse>> {
    let mut relations = Relations::default();
    let mut responses = Vec::with_capacity(schedules.len());
    for schedule in schedules {
        responses.push(relations.embed(state, schedule).await?);
    }
    Ok(responses)
}

async fn find_schedule(state: &ApiState, id: i64) -> Result<Schedule, AppError> {
    let schedule = state
        .schedules
        .get_by_id(id)
        .await
        .map_err(OpsError::Database)?
        .ok_or(OpsError::NotFound("Schedule"))?;

    Ok(schedule)
}

fn warn_on_unknown_status(status: &str) {
    if !is_known_status(status) {
        warn!("Storing schedule with unrecognized status '{}'", status);
    }
}

#[axum::debug_handler]
pub async fn list_schedules(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<ScheduleResponse>>, AppError> {
    let schedules = state.schedules.list_all().await.map_err(OpsError::Database)?;
    Ok(Json(render_all(&state, schedules).await?))
}

#[axum::debug_handler]
pub async fn get_schedule(
    State(state): State<Arc<ApiState>>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<ScheduleResponse>, AppError> {
    let id = path_id(path, "Schedule")?;
    let schedule = find_schedule(&state, id).await?;
    Ok(Json(render_one(&state, schedule).await?))
}

/// Schedules assigned to an employee. An unknown employee yields an empty list.
#[axum::debug_handler]
pub async fn list_employee_schedules(
    State(state): State<Arc<ApiState>>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<Vec<ScheduleResponse>>, AppError> {
    let employee_id = path_id(path, "Employee")?;
    let schedules = state
        .schedules
        .find_by(ScheduleFilter::Employee(employee_id))
        .await
        .map_err(OpsError::Database)?;
    Ok(Json(render_all(&state, schedules).await?))
}

/// Schedules booked for a client. An unknown client yields an empty list.
#[axum::debug_handler]
pub async fn list_client_schedules(
    State(state): State<Arc<ApiState>>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<Vec<ScheduleResponse>>, AppError> {
    let client_id = path_id(path, "Client")?;
    let schedules = state
        .schedules
        .find_by(ScheduleFilter::Client(client_id))
        .await
        .map_err(OpsError::Database)?;
    Ok(Json(render_all(&state, schedules).await?))
}

#[axum::debug_handler]
pub async fn create_schedule(
    State(state): State<Arc<ApiState>>,
    payload: Result<Json<CreateScheduleRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ScheduleResponse>), AppError> {
    let Json(payload) = payload?;

    // Presence first, then the referenced rows, then date/time formats
    let references = payload.references()?;
    let service = validation::ensure_references(&state, references).await?;
    let new_schedule = payload.validate(service.base_price)?;
    warn_on_unknown_status(&new_schedule.status);

    let schedule = state
        .schedules
        .insert(&new_schedule)
        .await
        .map_err(OpsError::persistence("create", "schedule"))?;

    info!(
        "Created schedule {} for client {} with employee {}",
        schedule.id, schedule.client_id, schedule.employee_id
    );
    let response = render_one(&state, schedule).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[axum::debug_handler]
pub async fn update_schedule(
    State(state): State<Arc<ApiState>>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<UpdateScheduleRequest>, JsonRejection>,
) -> Result<Json<ScheduleResponse>, AppError> {
    let id = path_id(path, "Schedule")?;
    let mut schedule = find_schedule(&state, id).await?;

    let Json(payload) = payload?;
    let references = payload.references()?;
    validation::ensure_reference_changes(&state, references).await?;
    let changes = payload.validate()?;
    if let Some(status) = &changes.status {
        warn_on_unknown_status(status);
    }
    schedule.apply(changes);

    let schedule = state
        .schedules
        .update(&schedule)
        .await
        .map_err(OpsError::persistence("update", "schedule"))?;

    info!("Updated schedule {} (status {})", schedule.id, schedule.status);
    Ok(Json(render_one(&state, schedule).await?))
}

#[axum::debug_handler]
pub async fn delete_schedule(
    State(state): State<Arc<ApiState>>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    let id = path_id(path, "Schedule")?;
    find_schedule(&state, id).await?;

    let deleted = state
        .schedules
        .delete(id)
        .await
        .map_err(OpsError::persistence("delete", "schedule"))?;
    if !deleted {
        return Err(OpsError::NotFound("Schedule").into());
    }

    info!("Deleted schedule {}", id);
    Ok(Json(MessageResponse::new("Schedule deleted successfully")))
}
