use axum::{routing::get, Router};
use std::sync::Arc;

use crate::{handlers::schedule, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/schedules",
            get(schedule::list_schedules).post(schedule::create_schedule),
        )
        .route(
            "/api/schedules/:id",
            get(schedule::get_schedule)
                .put(schedule::update_schedule)
                .delete(schedule::delete_schedule),
        )
        .route(
            "/api/schedules/employee/:employee_id",
            get(schedule::list_employee_schedules),
        )
        .route(
            "/api/schedules/client/:client_id",
            get(schedule::list_client_schedules),
        )
}
