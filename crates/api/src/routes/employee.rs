use axum::{routing::get, Router};
use std::sync::Arc;

use crate::{handlers::employee, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/employees", get(employee::list_employees).post(employee::create_employee))
        .route(
            "/api/employees/:id",
            get(employee::get_employee)
                .put(employee::update_employee)
                .delete(employee::delete_employee),
        )
}
