use axum::{routing::get, Router};
use std::sync::Arc;

use crate::{handlers::client, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/clients", get(client::list_clients).post(client::create_client))
        .route(
            "/api/clients/:id",
            get(client::get_client)
                .put(client::update_client)
                .delete(client::delete_client),
        )
}
