use axum::{body::to_bytes, http::StatusCode};
use chrono::{DateTime, NaiveTime, Utc};
use cleanops_api::{cors_layer, middleware::error_handling::map_error};
use cleanops_core::{errors::OpsError, models::Schedule};
use mockall::predicate;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::test_utils::{
    client_payload, sample_client, sample_employee, schedule_payload, test_server, TestContext,
};

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_error_handling_missing_field() {
    let response = map_error(OpsError::MissingField("email"));

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await,
        json!({ "error": "Missing required field: email" })
    );
}

#[tokio::test]
async fn test_error_handling_not_found() {
    let response = map_error(OpsError::NotFound("Schedule"));

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        body_json(response).await,
        json!({ "error": "Schedule not found" })
    );
}

#[tokio::test]
async fn test_error_handling_invalid_datetime() {
    let response = map_error(OpsError::InvalidDateTime);

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_error_handling_persistence_hides_cause() {
    let error = OpsError::persistence("update", "service")(eyre::eyre!("database is locked"));

    let response = map_error(error);

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_json(response).await,
        json!({ "error": "Failed to update service" })
    );
}

#[tokio::test]
async fn test_error_handling_database() {
    let response = map_error(OpsError::Database(eyre::eyre!("connection reset")));

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(response).await, json!({ "error": "Database error" }));
}

#[tokio::test]
async fn test_health_and_index() {
    let server = test_server().await;

    let health = server.get("/health").await;
    health.assert_status_ok();
    assert_eq!(health.json::<Value>(), json!({ "status": "healthy" }));

    let index = server.get("/").await.json::<Value>();
    assert_eq!(index["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(index["endpoints"]["clients"], "/api/clients");
    assert_eq!(index["endpoints"]["schedules"], "/api/schedules");
}

#[test]
fn test_cors_layer_rejects_invalid_origin() {
    assert!(cors_layer(None).is_ok());
    assert!(cors_layer(Some(&["http://localhost:3000".to_string()])).is_ok());
    assert!(cors_layer(Some(&["bad\norigin".to_string()])).is_err());
}

#[tokio::test]
async fn test_failed_insert_returns_generic_error() {
    let mut ctx = TestContext::new();
    ctx.clients
        .expect_insert()
        .times(1)
        .returning(|_| Err(eyre::eyre!("disk I/O error")));

    let response = ctx
        .server()
        .post("/api/clients")
        .json(&client_payload())
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.json::<Value>(),
        json!({ "error": "Failed to create client" })
    );
}

#[tokio::test]
async fn test_validation_failure_never_reaches_storage() {
    let mut ctx = TestContext::new();
    ctx.clients.expect_insert().never();

    let response = ctx
        .server()
        .post("/api/clients")
        .json(&json!({ "name": "Acme" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_reference_never_inserts_schedule() {
    let mut ctx = TestContext::new();
    ctx.clients
        .expect_get_by_id()
        .with(predicate::eq(1))
        .returning(|id| Ok(Some(sample_client(id))));
    ctx.employees
        .expect_get_by_id()
        .with(predicate::eq(2))
        .returning(|_| Ok(None));
    ctx.services.expect_get_by_id().never();
    ctx.schedules.expect_insert().never();

    let response = ctx
        .server()
        .post("/api/schedules")
        .json(&schedule_payload(1, 2, 3))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["error"], "Employee not found");
}

fn stored_schedule(id: i64) -> Schedule {
    Schedule {
        id,
        client_id: 1,
        employee_id: 2,
        service_id: 3,
        scheduled_date: DateTime::parse_from_rfc3339("2024-05-20T10:00:00+02:00").unwrap(),
        start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
        end_time: NaiveTime::from_hms_opt(13, 0, 0).unwrap(),
        status: "scheduled".to_string(),
        notes: Some("Gate code 1234".to_string()),
        actual_duration: None,
        final_price: Some(80.0),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

#[tokio::test]
async fn test_list_looks_up_each_relation_once() {
    let mut ctx = TestContext::new();
    ctx.schedules
        .expect_list_all()
        .returning(|| Ok(vec![stored_schedule(1), stored_schedule(2)]));
    ctx.clients
        .expect_get_by_id()
        .with(predicate::eq(1))
        .times(1)
        .returning(|id| Ok(Some(sample_client(id))));
    ctx.employees
        .expect_get_by_id()
        .with(predicate::eq(2))
        .times(1)
        .returning(|id| Ok(Some(sample_employee(id))));
    ctx.services
        .expect_get_by_id()
        .with(predicate::eq(3))
        .times(1)
        .returning(|_| Ok(None));

    let response = ctx.server().get("/api/schedules").await;

    response.assert_status_ok();
    let schedules = response.json::<Vec<Value>>();
    assert_eq!(schedules.len(), 2);
    assert_eq!(schedules[1]["client"]["name"], "Acme");
    assert_eq!(schedules[1]["service"], Value::Null);
}

#[tokio::test]
async fn test_failed_schedule_update_returns_generic_error() {
    let mut ctx = TestContext::new();
    let existing = stored_schedule(8);
    ctx.schedules
        .expect_get_by_id()
        .with(predicate::eq(8))
        .returning(move |_| Ok(Some(existing.clone())));
    ctx.schedules
        .expect_update()
        .withf(|schedule| schedule.status == "completed")
        .returning(|_| Err(eyre::eyre!("constraint failed")));

    let response = ctx
        .server()
        .put("/api/schedules/8")
        .json(&json!({ "status": "completed" }))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.json::<Value>(),
        json!({ "error": "Failed to update schedule" })
    );
}
