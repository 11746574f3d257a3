//! Foreign key checks for schedule writes.
//!
//! References are checked in the order client, employee, service, and the
//! first one that does not resolve is reported.

use cleanops_core::{
    errors::{OpsError, OpsResult},
    models::{
        schedule::{ReferenceChanges, ScheduleReferences},
        Service,
    },
};

use crate::ApiState;

async fn ensure_client(state: &ApiState, id: i64) -> OpsResult<()> {
    state
        .clients
        .get_by_id(id)
        .await?
        .map(|_| ())
        .ok_or(OpsError::NotFound("Client"))
}

async fn ensure_employee(state: &ApiState, id: i64) -> OpsResult<()> {
    state
        .employees
        .get_by_id(id)
        .await?
        .map(|_| ())
        .ok_or(OpsError::NotFound("Employee"))
}

async fn ensure_service(state: &ApiState, id: i64) -> OpsResult<Service> {
    state
        .services
        .get_by_id(id)
        .await?
        .ok_or(OpsError::NotFound("Service"))
}

/// Resolves all three references of a new schedule. The service is returned
/// since its base price seeds the schedule's final price.
pub async fn ensure_references(state: &ApiState, refs: ScheduleReferences) -> OpsResult<Service> {
    ensure_client(state, refs.client_id).await?;
    ensure_employee(state, refs.employee_id).await?;
    ensure_service(state, refs.service_id).await
}

/// Resolves only the references an update actually changes.
pub async fn ensure_reference_changes(state: &ApiState, refs: ReferenceChanges) -> OpsResult<()> {
    if let Some(client_id) = refs.client_id {
        ensure_client(state, client_id).await?;
    }
    if let Some(employee_id) = refs.employee_id {
        ensure_employee(state, employee_id).await?;
    }
    if let Some(service_id) = refs.service_id {
        ensure_service(state, service_id).await?;
    }
    Ok(())
}
