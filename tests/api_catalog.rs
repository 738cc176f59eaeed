mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use common::{admin_auth_header, employee_auth_header};
use serde_json::{json, Value};

#[actix_rt::test]
async fn employees_can_browse_the_catalog() {
    let (app, fixtures, _db) = common::setup_api_app().await;

    let req = test::TestRequest::get()
        .uri("/menu/branches")
        .insert_header(employee_auth_header(&fixtures.employee_id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["branches"][0]["name"], "Headquarters");

    let req = test::TestRequest::get()
        .uri("/menu/cafeterias")
        .insert_header(employee_auth_header(&fixtures.employee_id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri(&format!(
            "/menu/menu-items?cafeteriaId={}",
            fixtures.cafeteria_id
        ))
        .insert_header(employee_auth_header(&fixtures.employee_id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    let items = body["menuItems"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["name"], "Filter Coffee");
    assert_eq!(items[0]["categoryKey"], "beverages");
}

#[actix_rt::test]
async fn catalog_writes_are_admin_only() {
    let (app, fixtures, _db) = common::setup_api_app().await;

    let req = test::TestRequest::post()
        .uri("/menu/branches")
        .insert_header(employee_auth_header(&fixtures.employee_id))
        .set_json(json!({"name": "Annex"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::post()
        .uri("/menu/branches")
        .insert_header(admin_auth_header(&fixtures.admin_id))
        .set_json(json!({"name": "Annex"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["id"].is_number());
}

#[actix_rt::test]
async fn admin_builds_a_cafeteria_menu_end_to_end() {
    let (app, fixtures, _db) = common::setup_api_app().await;
    let admin = admin_auth_header(&fixtures.admin_id);

    let req = test::TestRequest::post()
        .uri("/menu/cafeterias")
        .insert_header(admin.clone())
        .set_json(json!({"branchId": fixtures.branch_id, "name": "Annex Cafe"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    let cafeteria_id = body["id"].as_i64().unwrap();

    let req = test::TestRequest::post()
        .uri("/menu/menu-categories")
        .insert_header(admin.clone())
        .set_json(json!({
            "cafeteriaId": cafeteria_id,
            "name": "South Indian",
            "key": "south-indian"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    let category_id = body["id"].as_i64().unwrap();

    let req = test::TestRequest::post()
        .uri("/menu/menu-items")
        .insert_header(admin.clone())
        .set_json(json!({
            "categoryId": category_id,
            "cafeteriaId": cafeteria_id,
            "name": "Masala Dosa",
            "price": 60.0,
            "cgst": 2.5,
            "sgst": 2.5
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let req = test::TestRequest::get()
        .uri(&format!("/menu/menu-items?cafeteriaId={}", cafeteria_id))
        .insert_header(admin.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;
    let items = body["menuItems"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["name"], "Masala Dosa");

    // Deleting the cafeteria clears its menu too.
    let req = test::TestRequest::delete()
        .uri(&format!("/menu/cafeterias/{}", cafeteria_id))
        .insert_header(admin.clone())
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::OK
    );

    let req = test::TestRequest::get()
        .uri(&format!("/menu/menu-items?cafeteriaId={}", cafeteria_id))
        .insert_header(admin)
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;
    assert!(body["menuItems"].as_array().unwrap().is_empty());
}

#[actix_rt::test]
async fn unknown_references_are_bad_requests() {
    let (app, fixtures, _db) = common::setup_api_app().await;

    let req = test::TestRequest::post()
        .uri("/menu/cafeterias")
        .insert_header(admin_auth_header(&fixtures.admin_id))
        .set_json(json!({"branchId": 9999, "name": "Orphan Cafe"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::delete()
        .uri("/menu/menu-items/9999")
        .insert_header(admin_auth_header(&fixtures.admin_id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
