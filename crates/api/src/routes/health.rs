use axum::{routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;

use crate::ApiState;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

#[derive(Serialize)]
struct Endpoints {
    clients: &'static str,
    employees: &'static str,
    services: &'static str,
    schedules: &'static str,
}

#[derive(Serialize)]
struct IndexResponse {
    message: &'static str,
    name: &'static str,
    version: &'static str,
    endpoints: Endpoints,
}

async fn index() -> Json<IndexResponse> {
    Json(IndexResponse {
        message: "Operations management system for cleaning companies",
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        endpoints: Endpoints {
            clients: "/api/clients",
            employees: "/api/employees",
            services: "/api/services",
            schedules: "/api/schedules",
        },
    })
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse { status: "healthy" })
}

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health_check))
}
