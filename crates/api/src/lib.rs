//! # CleanOps API
//!
//! The API crate provides the web server for the cleaning operations backend.
//! It exposes RESTful CRUD endpoints for clients, employees, services and
//! schedules.
//!
//! ## Paths
//!
//! Every resource is mounted under the `/api` prefix (`/api/clients`,
//! `/api/schedules/employee/{id}` and so on). Only the index `/` and the
//! `/health` check sit at the root. An id segment that is not an integer
//! answers with the same JSON 404 as an unknown id.
//!
//! ## Architecture
//!
//! This crate follows a layered architecture:
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Implement request processing logic
//! - **Middleware**: Map domain errors to HTTP responses
//! - **Config**: Handle environment and application configuration
//!
//! The API uses Axum as the web framework. Handlers reach storage only through
//! the repository traits of `cleanops-db`, so tests can swap in mocks.

/// Configuration module for API settings
pub mod config;
/// Request handlers that implement business logic
pub mod handlers;
/// Error mapping for handler results
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;
/// Reference checks that need the database
pub mod validation;

use std::{sync::Arc, time::Duration};

use axum::{
    http::{header, HeaderValue, Method},
    Router,
};
use cleanops_db::{
    repositories::{
        ClientRepository, EmployeeRepository, ScheduleRepository, ServiceRepository,
        SqliteClientRepo, SqliteEmployeeRepo, SqliteScheduleRepo, SqliteServiceRepo,
    },
    DbPool,
};
use eyre::{Result, WrapErr};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::FmtSubscriber;

/// Shared application state that is accessible to all request handlers
///
/// # Example
///
/// ```no_run
/// # async fn example(pool: cleanops_db::DbPool) {
/// use std::sync::Arc;
/// use cleanops_api::{app, ApiState};
///
/// let state = Arc::new(ApiState::new(pool));
/// let router = app(state);
/// # }
/// ```
pub struct ApiState {
    pub clients: Arc<dyn ClientRepository>,
    pub employees: Arc<dyn EmployeeRepository>,
    pub services: Arc<dyn ServiceRepository>,
    pub schedules: Arc<dyn ScheduleRepository>,
}

impl ApiState {
    /// Builds the state on top of the SQLite repositories.
    pub fn new(db_pool: DbPool) -> Self {
        Self {
            clients: Arc::new(SqliteClientRepo::new(db_pool.clone())),
            employees: Arc::new(SqliteEmployeeRepo::new(db_pool.clone())),
            services: Arc::new(SqliteServiceRepo::new(db_pool.clone())),
            schedules: Arc::new(SqliteScheduleRepo::new(db_pool)),
        }
    }

    pub fn from_repositories(
        clients: Arc<dyn ClientRepository>,
        employees: Arc<dyn EmployeeRepository>,
        services: Arc<dyn ServiceRepository>,
        schedules: Arc<dyn ScheduleRepository>,
    ) -> Self {
        Self {
            clients,
            employees,
            services,
            schedules,
        }
    }
}

/// Builds the application router with every route attached to `state`.
pub fn app(state: Arc<ApiState>) -> Router {
    Router::new()
        // Service metadata and health check
        .merge(routes::health::routes())
        // Entity management endpoints
        .merge(routes::client::routes())
        .merge(routes::employee::routes())
        .merge(routes::service::routes())
        .merge(routes::schedule::routes())
        // Attach shared state to all routes
        .with_state(state)
}

/// CORS policy: the configured origins, or any origin when none are set.
pub fn cors_layer(origins: Option<&[String]>) -> Result<CorsLayer> {
    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    match origins {
        Some(origins) => {
            let origins = origins
                .iter()
                .map(|origin| {
                    origin
                        .parse::<HeaderValue>()
                        .wrap_err_with(|| format!("Invalid CORS origin: {}", origin))
                })
                .collect::<Result<Vec<_>>>()?;
            Ok(cors.allow_origin(origins))
        }
        None => Ok(cors.allow_origin(Any)),
    }
}

/// Starts the API server with the provided configuration and database connection
///
/// Sets up logging, wraps the router in tracing, CORS and timeout layers,
/// and serves until the process is stopped.
///
/// # Example
///
/// ```no_run
/// # async fn example() -> eyre::Result<()> {
/// use cleanops_api::{config::ApiConfig, start_server};
///
/// let config = ApiConfig::from_env()?;
/// let db_pool = cleanops_db::create_pool(&config.database_url).await?;
/// start_server(config, db_pool).await?;
/// # Ok(())
/// # }
/// ```
pub async fn start_server(config: config::ApiConfig, db_pool: DbPool) -> Result<()> {
    // Initialize tracing for logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let state = Arc::new(ApiState::new(db_pool));
    let cors = cors_layer(config.cors_origins.as_deref())?;

    let app = app(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout)))
            .layer(cors),
    );

    // Start the HTTP server
    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
