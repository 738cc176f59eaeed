//! Test conventions:
//! - Every test gets its own SQLite file in a tempdir, so test binaries run
//!   in parallel without sharing state.
//! - Seed data comes from `mealdesk::test_utils::seed_basic_fixtures`.
//! - No environment variables are read; configs are built directly.

#![allow(dead_code)]

use std::sync::Arc;

use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::header;
use actix_web::{test, App, Error};
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::SqliteConnection;
use tempfile::TempDir;

use mealdesk::auth::jwt::issue_session_jwt;
use mealdesk::auth::AuthLayer;
use mealdesk::db::{CatalogOperations, EmployeeOperations, OrderOperations};
use mealdesk::models::employee::{ROLE_ADMIN, ROLE_EMPLOYEE};
use mealdesk::payment::PaymentGate;
use mealdesk::services::LogMailer;
use mealdesk::test_utils::{
    build_test_pool, seed_basic_fixtures, test_auth_config, TestFixtures, TEST_PAYMENT_SECRET,
};
use mealdesk::{api, AppState};

pub struct TestDb {
    pub pool: Pool<ConnectionManager<SqliteConnection>>,
    _dir: TempDir,
}

pub fn setup_pool() -> TestDb {
    let dir = tempfile::tempdir().expect("tempdir");
    let db_path = dir.path().join("test.sqlite3");
    let pool = build_test_pool(db_path.to_str().expect("utf-8 temp path"));
    TestDb { pool, _dir: dir }
}

pub fn setup_pool_with_fixtures() -> (TestDb, TestFixtures) {
    let db = setup_pool();
    let fixtures = seed_basic_fixtures(&db.pool);
    (db, fixtures)
}

pub fn test_state(pool: &Pool<ConnectionManager<SqliteConnection>>) -> AppState {
    AppState {
        order_ops: OrderOperations::new(pool.clone()),
        catalog_ops: CatalogOperations::new(pool.clone()),
        employee_ops: EmployeeOperations::new(pool.clone()),
        payment_gate: PaymentGate::new(TEST_PAYMENT_SECRET.to_string()),
        auth_cfg: test_auth_config(),
        mailer: Arc::new(LogMailer),
    }
}

pub async fn setup_api_app() -> (
    impl Service<actix_http::Request, Response = ServiceResponse<impl MessageBody>, Error = Error>,
    TestFixtures,
    TestDb,
) {
    let (db, fixtures) = setup_pool_with_fixtures();
    let state = test_state(&db.pool);
    let app = test::init_service(
        App::new()
            .wrap(AuthLayer::new(state.auth_cfg.clone()))
            .configure(|cfg| api::configure(cfg, &state)),
    )
    .await;
    (app, fixtures, db)
}

pub fn employee_auth_header(employee_id: &str) -> (header::HeaderName, String) {
    let token =
        issue_session_jwt(employee_id, ROLE_EMPLOYEE, &test_auth_config()).expect("issue jwt");
    (header::AUTHORIZATION, format!("Bearer {}", token))
}

pub fn admin_auth_header(employee_id: &str) -> (header::HeaderName, String) {
    let token = issue_session_jwt(employee_id, ROLE_ADMIN, &test_auth_config()).expect("issue jwt");
    (header::AUTHORIZATION, format!("Bearer {}", token))
}
