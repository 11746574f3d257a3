use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{json, Value};

use crate::test_utils::{count, create, service_payload, test_server};

#[tokio::test]
async fn test_create_service_without_description() {
    let server = test_server().await;
    let mut payload = service_payload();
    payload.as_object_mut().unwrap().remove("description");

    let service = create(&server, "/api/services", &payload).await;

    assert_eq!(service["description"], Value::Null);
    assert_eq!(service["base_price"], 120.0);
    assert_eq!(service["estimated_duration"], 240);
    assert_eq!(service["is_active"], true);
}

#[rstest]
#[case("name")]
#[case("base_price")]
#[case("estimated_duration")]
#[tokio::test]
async fn test_create_service_requires_field(#[case] field: &str) {
    let server = test_server().await;
    let mut payload = service_payload();
    payload.as_object_mut().unwrap().remove(field);

    let response = server.post("/api/services").json(&payload).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["error"],
        format!("Missing required field: {}", field)
    );
}

#[rstest]
#[case("base_price", json!(-5))]
#[case("estimated_duration", json!(0))]
#[case("estimated_duration", json!(90.5))]
#[tokio::test]
async fn test_create_service_rejects_out_of_range(#[case] field: &str, #[case] value: Value) {
    let server = test_server().await;
    let mut payload = service_payload();
    payload[field] = value;

    let response = server.post("/api/services").json(&payload).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(count(&server, "/api/services").await, 0);
}

#[tokio::test]
async fn test_update_service_clears_description() {
    let server = test_server().await;
    let service = create(&server, "/api/services", &service_payload()).await;
    let path = format!("/api/services/{}", service["id"]);

    let response = server
        .put(&path)
        .json(&json!({ "description": null, "base_price": "135.5" }))
        .await;

    response.assert_status_ok();
    let updated = response.json::<Value>();
    assert_eq!(updated["description"], Value::Null);
    assert_eq!(updated["base_price"], 135.5);
    assert_eq!(updated["name"], service["name"]);
}

#[tokio::test]
async fn test_get_and_delete_service() {
    let server = test_server().await;
    let service = create(&server, "/api/services", &service_payload()).await;
    let path = format!("/api/services/{}", service["id"]);

    assert_eq!(server.get(&path).await.json::<Value>(), service);

    let response = server.delete(&path).await;
    response.assert_status_ok();
    assert_eq!(
        response.json::<Value>()["message"],
        "Service deleted successfully"
    );
    assert_eq!(
        server.get(&path).await.json::<Value>(),
        json!({ "error": "Service not found" })
    );
}
