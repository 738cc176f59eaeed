mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use common::{admin_auth_header, employee_auth_header};
use serde_json::{json, Value};

fn import_payload() -> Value {
    json!([
        {
            "fullName": "Ravi Kumar",
            "employeeId": "EMP201",
            "email": "ravi@example.com",
            "phone": "9876543210",
            "password": "initial-pass",
            "branch": "Headquarters"
        },
        {
            "fullName": "Meera Shah",
            "employeeId": "EMP202",
            "email": "meera@example.com",
            "phone": "9876500000",
            "password": "initial-pass",
            "branch": "Headquarters"
        }
    ])
}

#[actix_rt::test]
async fn import_is_admin_only() {
    let (app, fixtures, _db) = common::setup_api_app().await;

    let req = test::TestRequest::post()
        .uri("/employees/import")
        .insert_header(employee_auth_header(&fixtures.employee_id))
        .set_json(import_payload())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[actix_rt::test]
async fn imports_a_batch_and_the_accounts_work() {
    let (app, fixtures, _db) = common::setup_api_app().await;

    let req = test::TestRequest::post()
        .uri("/employees/import")
        .insert_header(admin_auth_header(&fixtures.admin_id))
        .set_json(import_payload())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["importedCount"], 2);

    let req = test::TestRequest::post()
        .uri("/auth/login")
        .set_json(json!({"employeeId": "EMP201", "password": "initial-pass"}))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::OK
    );
}

#[actix_rt::test]
async fn import_reports_field_errors_with_row_numbers() {
    let (app, fixtures, _db) = common::setup_api_app().await;

    let payload = json!([
        {
            "fullName": "",
            "employeeId": "EMP201",
            "email": "not-an-email",
            "phone": "12345",
            "password": "x",
            "branch": "Headquarters"
        }
    ]);
    let req = test::TestRequest::post()
        .uri("/employees/import")
        .insert_header(admin_auth_header(&fixtures.admin_id))
        .set_json(payload)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    let errors = body["errors"].as_array().unwrap();
    assert!(errors.iter().any(|e| e.as_str().unwrap().contains("Row 1")));
    assert!(errors
        .iter()
        .any(|e| e.as_str().unwrap().contains("invalid email")));
    assert!(errors
        .iter()
        .any(|e| e.as_str().unwrap().contains("10 digits")));
}

#[actix_rt::test]
async fn import_rejects_collisions_with_existing_accounts() {
    let (app, fixtures, _db) = common::setup_api_app().await;

    let payload = json!([
        {
            "fullName": "Shadow Account",
            "employeeId": fixtures.employee_id,
            "email": "shadow@example.com",
            "phone": "9876543210",
            "password": "x-pass",
            "branch": "Headquarters"
        }
    ]);
    let req = test::TestRequest::post()
        .uri("/employees/import")
        .insert_header(admin_auth_header(&fixtures.admin_id))
        .set_json(payload)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .any(|e| e.as_str().unwrap().contains("EMP001")));
}

#[actix_rt::test]
async fn export_and_stats() {
    let (app, fixtures, _db) = common::setup_api_app().await;

    let req = test::TestRequest::get()
        .uri("/employees/export")
        .insert_header(admin_auth_header(&fixtures.admin_id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    let employees = body["employees"].as_array().unwrap();
    assert_eq!(employees.len(), 2);
    assert!(employees[0].get("passwordHash").is_none());

    let req = test::TestRequest::get()
        .uri("/employees/stats")
        .insert_header(admin_auth_header(&fixtures.admin_id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["totalEmployees"], 2);
    assert_eq!(body["branchStats"][0]["branch"], "Headquarters");
    assert_eq!(body["branchStats"][0]["count"], 2);
}
