use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{json, Value};

use crate::test_utils::{count, create, employee_payload, test_server};

#[tokio::test]
async fn test_create_employee_defaults_to_active() {
    let server = test_server().await;

    let employee = create(&server, "/api/employees", &employee_payload()).await;

    assert_eq!(employee["is_active"], true);
    assert_eq!(employee["hourly_rate"], 18.5);
    assert_eq!(employee["position"], "cleaner");
}

#[tokio::test]
async fn test_create_employee_coerces_numeric_text() {
    let server = test_server().await;
    let mut payload = employee_payload();
    payload["hourly_rate"] = json!("21.75");
    payload["is_active"] = json!(false);

    let employee = create(&server, "/api/employees", &payload).await;

    assert_eq!(employee["hourly_rate"], 21.75);
    assert_eq!(employee["is_active"], false);
}

#[rstest]
#[case("name")]
#[case("email")]
#[case("phone")]
#[case("position")]
#[case("hourly_rate")]
#[tokio::test]
async fn test_create_employee_requires_field(#[case] field: &str) {
    let server = test_server().await;
    let mut payload = employee_payload();
    payload.as_object_mut().unwrap().remove(field);

    let response = server.post("/api/employees").json(&payload).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["error"],
        format!("Missing required field: {}", field)
    );
    assert_eq!(count(&server, "/api/employees").await, 0);
}

#[rstest]
#[case(json!(-1.0))]
#[case(json!("twelve"))]
#[tokio::test]
async fn test_create_employee_rejects_bad_rate(#[case] rate: Value) {
    let server = test_server().await;
    let mut payload = employee_payload();
    payload["hourly_rate"] = rate;

    let response = server.post("/api/employees").json(&payload).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(count(&server, "/api/employees").await, 0);
}

#[tokio::test]
async fn test_deactivate_employee() {
    let server = test_server().await;
    let employee = create(&server, "/api/employees", &employee_payload()).await;
    let path = format!("/api/employees/{}", employee["id"]);

    let response = server
        .put(&path)
        .json(&json!({ "is_active": false, "hourly_rate": 20 }))
        .await;

    response.assert_status_ok();
    let updated = response.json::<Value>();
    assert_eq!(updated["is_active"], false);
    assert_eq!(updated["hourly_rate"], 20.0);
    assert_eq!(updated["name"], employee["name"]);
}

#[tokio::test]
async fn test_delete_employee() {
    let server = test_server().await;
    let employee = create(&server, "/api/employees", &employee_payload()).await;
    let path = format!("/api/employees/{}", employee["id"]);

    let response = server.delete(&path).await;

    response.assert_status_ok();
    assert_eq!(
        response.json::<Value>()["message"],
        "Employee deleted successfully"
    );
    let response = server.get(&path).await;
    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["error"], "Employee not found");
}
