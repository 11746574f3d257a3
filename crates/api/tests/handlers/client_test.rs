use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{json, Value};
use std::time::Duration;

use crate::test_utils::{client_payload, count, create, test_server};

#[tokio::test]
async fn test_create_client_echoes_fields() {
    let server = test_server().await;
    let payload = client_payload();

    let client = create(&server, "/api/clients", &payload).await;

    assert!(client["id"].as_i64().unwrap() > 0);
    for field in ["name", "email", "phone", "address"] {
        assert_eq!(client[field], payload[field]);
    }
    assert!(client["created_at"].is_string());
    assert!(client["updated_at"].is_string());
}

#[rstest]
#[case("name")]
#[case("email")]
#[case("phone")]
#[case("address")]
#[tokio::test]
async fn test_create_client_requires_field(#[case] field: &str) {
    let server = test_server().await;
    let mut payload = client_payload();
    payload.as_object_mut().unwrap().remove(field);

    let response = server.post("/api/clients").json(&payload).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>(),
        json!({ "error": format!("Missing required field: {}", field) })
    );
    assert_eq!(count(&server, "/api/clients").await, 0);
}

#[tokio::test]
async fn test_create_client_reports_first_missing_field() {
    let server = test_server().await;

    let response = server
        .post("/api/clients")
        .json(&json!({ "phone": "+1-555-0100" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["error"],
        "Missing required field: name"
    );
}

#[tokio::test]
async fn test_create_client_rejects_malformed_json() {
    let server = test_server().await;

    let response = server
        .post("/api/clients")
        .text("{\"name\": ")
        .content_type("application/json")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert!(response.json::<Value>()["error"].is_string());
    assert_eq!(count(&server, "/api/clients").await, 0);
}

#[tokio::test]
async fn test_get_missing_client() {
    let server = test_server().await;

    let response = server.get("/api/clients/42").await;

    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>(), json!({ "error": "Client not found" }));
}

#[tokio::test]
async fn test_list_clients_in_creation_order() {
    let server = test_server().await;
    let first = create(&server, "/api/clients", &client_payload()).await;
    let second = create(&server, "/api/clients", &client_payload()).await;

    let clients = server.get("/api/clients").await.json::<Vec<Value>>();

    assert_eq!(clients.len(), 2);
    assert_eq!(clients[0]["id"], first["id"]);
    assert_eq!(clients[1]["id"], second["id"]);
}

#[tokio::test]
async fn test_partial_update_keeps_other_fields() {
    let server = test_server().await;
    let client = create(&server, "/api/clients", &client_payload()).await;
    let path = format!("/api/clients/{}", client["id"]);

    let response = server
        .put(&path)
        .json(&json!({ "phone": "+1-555-0199" }))
        .await;

    response.assert_status_ok();
    let updated = response.json::<Value>();
    assert_eq!(updated["phone"], "+1-555-0199");
    assert_eq!(updated["name"], client["name"]);
    assert_eq!(updated["email"], client["email"]);
    assert_eq!(updated["address"], client["address"]);
    assert_eq!(updated["created_at"], client["created_at"]);

    let fetched = server.get(&path).await.json::<Value>();
    assert_eq!(fetched, updated);
}

#[tokio::test]
async fn test_update_advances_updated_at() {
    let server = test_server().await;
    let client = create(&server, "/api/clients", &client_payload()).await;
    let path = format!("/api/clients/{}", client["id"]);
    let timestamp =
        |value: &Value| serde_json::from_value::<DateTime<Utc>>(value.clone()).unwrap();

    tokio::time::sleep(Duration::from_millis(20)).await;
    let updated = server
        .put(&path)
        .json(&json!({ "address": "9 Harbour Road" }))
        .await
        .json::<Value>();

    assert!(timestamp(&updated["updated_at"]) > timestamp(&client["updated_at"]));
    assert_eq!(updated["created_at"], client["created_at"]);
}

#[tokio::test]
async fn test_update_rejects_null_for_required_field() {
    let server = test_server().await;
    let client = create(&server, "/api/clients", &client_payload()).await;
    let path = format!("/api/clients/{}", client["id"]);

    let response = server.put(&path).json(&json!({ "name": null })).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["error"],
        "Field name cannot be null"
    );
    assert_eq!(server.get(&path).await.json::<Value>()["name"], client["name"]);
}

#[tokio::test]
async fn test_update_missing_client() {
    let server = test_server().await;

    let response = server
        .put("/api/clients/7")
        .json(&json!({ "name": "Nobody" }))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["error"], "Client not found");
}

#[tokio::test]
async fn test_delete_client() {
    let server = test_server().await;
    let client = create(&server, "/api/clients", &client_payload()).await;
    let path = format!("/api/clients/{}", client["id"]);

    let response = server.delete(&path).await;

    response.assert_status_ok();
    assert_eq!(
        response.json::<Value>(),
        json!({ "message": "Client deleted successfully" })
    );
    server.get(&path).await.assert_status(StatusCode::NOT_FOUND);
    server.delete(&path).await.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_ids_are_not_reused() {
    let server = test_server().await;
    let first = create(&server, "/api/clients", &client_payload()).await;
    server
        .delete(&format!("/api/clients/{}", first["id"]))
        .await
        .assert_status_ok();

    let second = create(&server, "/api/clients", &client_payload()).await;

    assert!(second["id"].as_i64().unwrap() > first["id"].as_i64().unwrap());
}

#[rstest]
#[case::get("get", "/api/clients/abc")]
#[case::update("put", "/api/clients/1.5")]
#[case::delete("delete", "/api/clients/-x")]
#[tokio::test]
async fn test_non_integer_id_is_not_found(#[case] method: &str, #[case] path: &str) {
    let server = test_server().await;

    let response = match method {
        "get" => server.get(path).await,
        "put" => server.put(path).json(&json!({ "name": "Nobody" })).await,
        _ => server.delete(path).await,
    };

    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>(), json!({ "error": "Client not found" }));
}
