mod common;

use actix_web::http::StatusCode;
use actix_web::middleware::NormalizePath;
use actix_web::test::{self, TestRequest};
use actix_web::App;
use serde_json::{Value, json};

use hrms_lite::routes;

macro_rules! app {
    () => {{
        let (services, _) = common::services();
        test::init_service(
            App::new()
                .wrap(NormalizePath::trim())
                .configure(move |cfg| routes::configure(cfg, &services)),
        )
        .await
    }};
}

/// Sends the request and returns the status with the decoded JSON body
/// (`Null` for empty bodies).
macro_rules! send {
    ($app:expr, $req:expr) => {{
        let resp = test::call_service(&$app, $req.to_request()).await;
        let status = resp.status();
        let body = test::read_body(resp).await;
        let json: Value = if body.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body).unwrap()
        };
        (status, json)
    }};
}

fn post(uri: &str, body: Value) -> TestRequest {
    TestRequest::post().uri(uri).set_json(body)
}

fn get(uri: &str) -> TestRequest {
    TestRequest::get().uri(uri)
}

fn delete(uri: &str) -> TestRequest {
    TestRequest::delete().uri(uri)
}

fn patch(uri: &str, body: Value) -> TestRequest {
    TestRequest::patch().uri(uri).set_json(body)
}

fn employee(id: &str, email: &str) -> Value {
    json!({
        "employee_id": id,
        "full_name": "John Doe",
        "email": email,
        "department": "Engineering"
    })
}

#[actix_web::test]
async fn employee_lifecycle() {
    let app = app!();

    let (status, body) = send!(app, post("/employees/", employee("emp001", "john@company.com")));
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["employee_id"], "EMP001");
    assert!(body["created_at"].is_string());

    let (status, body) = send!(app, post("/employees", employee("EMP001", "other@company.com")));
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "conflict");

    let (status, body) = send!(app, get("/employees/"));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (status, body) = send!(app, get("/employees/emp001"));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "john@company.com");

    let (status, body) = send!(app, delete("/employees/EMP001"));
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_null());

    let (status, body) = send!(app, delete("/employees/EMP001"));
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
}

#[actix_web::test]
async fn invalid_employee_payloads_are_rejected() {
    let app = app!();

    let (status, body) = send!(app, post("/employees/", employee("EMP-01", "john@company.com")));
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "invalid_input");

    let (status, _) = send!(app, post("/employees/", employee("EMP001", "not-an-email")));
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, body) = send!(app, post("/employees/", json!({ "employee_id": "EMP001" })));
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "invalid_input");
}

#[actix_web::test]
async fn attendance_flow() {
    let app = app!();
    send!(app, post("/employees/", employee("EMP001", "john@company.com")));

    let mark = |date: &str, status: &str| json!({ "employee_id": "EMP001", "date": date, "status": status });

    let (status, first) = send!(app, post("/attendance/", mark("2024-01-01", "Present")));
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(first["date"], "2024-01-01");
    assert_eq!(first["status"], "Present");

    let (status, body) = send!(app, post("/attendance/", mark("2024-01-01", "Absent")));
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "conflict");

    send!(app, post("/attendance/", mark("2024-01-02", "Present")));
    send!(app, post("/attendance/", mark("2024-02-01", "Absent")));

    let unknown = json!({ "employee_id": "EMP404", "date": "2024-01-01", "status": "Present" });
    let (status, body) = send!(app, post("/attendance/", unknown));
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");

    let (status, _) = send!(app, post("/attendance/", mark("2024-13-01", "Present")));
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let (status, _) = send!(app, post("/attendance/", mark("2024-01-03", "Late")));
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, body) = send!(app, get("/attendance/employee/EMP001"));
    assert_eq!(status, StatusCode::OK);
    let days: Vec<_> = body.as_array().unwrap().iter().map(|r| r["date"].clone()).collect();
    assert_eq!(days, [json!("2024-02-01"), json!("2024-01-02"), json!("2024-01-01")]);

    let (status, _) = send!(app, get("/attendance/employee/EMP404"));
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send!(app, get("/attendance/all"));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 3);

    let (status, body) = send!(app, get("/attendance/filter?start_date=2024-01-01&end_date=2024-01-31"));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);

    let (status, _) = send!(app, get("/attendance/filter?start_date=2024-01-01"));
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, body) = send!(app, get("/attendance/summary?employee_id=EMP001"));
    assert_eq!(status, StatusCode::OK);
    let summary = &body.as_array().unwrap()[0];
    assert_eq!(summary["full_name"], "John Doe");
    assert_eq!(summary["total_present"], 2);
    assert_eq!(summary["total_absent"], 1);
    let pct = summary["attendance_percentage"].as_f64().unwrap();
    assert!((pct - 66.67).abs() <= 0.01);

    let uri = format!("/attendance/{}", first["id"]);
    let (status, updated) = send!(app, patch(&uri, json!({ "status": "Absent" })));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["status"], "Absent");
    assert_eq!(updated["date"], "2024-01-01");

    let (status, _) = send!(app, patch("/attendance/9999", json!({ "status": "Absent" })));
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send!(app, patch(&uri, json!({ "status": "Sick" })));
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[actix_web::test]
async fn deleting_an_employee_removes_their_attendance() {
    let app = app!();
    send!(app, post("/employees/", employee("EMP001", "john@company.com")));
    send!(app, post("/employees/", employee("EMP002", "jane@company.com")));
    for id in ["EMP001", "EMP002"] {
        let body = json!({ "employee_id": id, "date": "2024-01-01", "status": "Present" });
        send!(app, post("/attendance/", body));
    }

    let (status, _) = send!(app, delete("/employees/EMP001"));
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, body) = send!(app, get("/attendance/all"));
    let records = body.as_array().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["employee_id"], "EMP002");

    let (_, body) = send!(app, get("/attendance/summary"));
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[actix_web::test]
async fn health_endpoints() {
    let app = app!();

    let (status, body) = send!(app, get("/health"));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    let (status, body) = send!(app, get("/"));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["endpoints"]["employees"], "/employees");
}
