//! Shared fixtures for unit and integration tests. Each test builds its own
//! SQLite database file, so tests are independent and can run in parallel.

use crate::auth::AuthConfig;
use crate::db::{establish_connection_pool, run_db_migrations};
use crate::models::employee::{NewEmployeeRow, ROLE_ADMIN, ROLE_EMPLOYEE};
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHasher, SaltString};
use argon2::Argon2;
use chrono::Utc;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::SqliteConnection;

pub const TEST_JWT_SECRET: &str = "test-session-secret";
pub const TEST_PAYMENT_SECRET: &str = "test-razorpay-secret";
pub const TEST_PASSWORD: &str = "correct horse battery staple";

pub fn test_auth_config() -> AuthConfig {
    AuthConfig {
        secret: TEST_JWT_SECRET.to_string(),
        issuer: "mealdesk-auth".to_string(),
        audience: "mealdesk".to_string(),
        expiry_secs: 3600,
    }
}

pub fn build_test_pool(database_url: &str) -> Pool<ConnectionManager<SqliteConnection>> {
    let pool = establish_connection_pool(database_url);
    run_db_migrations(pool.clone()).expect("failed to run migrations on test database");
    pool
}

pub struct TestFixtures {
    pub branch_id: i32,
    pub cafeteria_id: i32,
    pub category_id: i32,
    pub menu_item_id: i32,
    pub employee_id: String,
    pub admin_id: String,
}

pub fn insert_branch(pool: &Pool<ConnectionManager<SqliteConnection>>, branch_name: &str) -> i32 {
    use crate::db::schema::branches::dsl::*;
    let mut conn = pool.get().unwrap();
    diesel::insert_into(branches)
        .values(name.eq(branch_name))
        .returning(id)
        .get_result(&mut conn)
        .unwrap()
}

pub fn insert_cafeteria(
    pool: &Pool<ConnectionManager<SqliteConnection>>,
    for_branch_id: i32,
    cafeteria_name: &str,
) -> i32 {
    use crate::db::schema::cafeterias::dsl::*;
    let mut conn = pool.get().unwrap();
    diesel::insert_into(cafeterias)
        .values((branch_id.eq(for_branch_id), name.eq(cafeteria_name)))
        .returning(id)
        .get_result(&mut conn)
        .unwrap()
}

pub fn insert_menu_category(
    pool: &Pool<ConnectionManager<SqliteConnection>>,
    for_cafeteria_id: i32,
    category_name: &str,
    category_key: &str,
) -> i32 {
    use crate::db::schema::menu_categories::dsl::*;
    let mut conn = pool.get().unwrap();
    diesel::insert_into(menu_categories)
        .values((
            cafeteria_id.eq(for_cafeteria_id),
            name.eq(category_name),
            key.eq(category_key),
        ))
        .returning(id)
        .get_result(&mut conn)
        .unwrap()
}

pub fn insert_menu_item(
    pool: &Pool<ConnectionManager<SqliteConnection>>,
    for_category_id: i32,
    for_cafeteria_id: i32,
    item_name: &str,
    item_price: &str,
) -> i32 {
    use crate::db::schema::menu_items::dsl::*;
    let mut conn = pool.get().unwrap();
    diesel::insert_into(menu_items)
        .values((
            category_id.eq(for_category_id),
            cafeteria_id.eq(for_cafeteria_id),
            name.eq(item_name),
            description.eq(""),
            price.eq(item_price),
            cgst_rate.eq("2.5"),
            sgst_rate.eq("2.5"),
        ))
        .returning(id)
        .get_result(&mut conn)
        .unwrap()
}

pub fn insert_employee(
    pool: &Pool<ConnectionManager<SqliteConnection>>,
    new_employee_id: &str,
    employee_branch: &str,
    employee_role: &str,
) {
    use crate::db::schema::employees::dsl::*;
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(TEST_PASSWORD.as_bytes(), &salt)
        .unwrap()
        .to_string();
    let mut conn = pool.get().unwrap();
    diesel::insert_into(employees)
        .values(&NewEmployeeRow {
            employee_id: new_employee_id.to_string(),
            full_name: format!("Test {}", new_employee_id),
            email: format!("{}@example.com", new_employee_id.to_lowercase()),
            phone: "9876543210".to_string(),
            password_hash: hash,
            branch: employee_branch.to_string(),
            role: employee_role.to_string(),
            created_at: Utc::now(),
        })
        .execute(&mut conn)
        .unwrap();
}

/// One branch, one cafeteria, one category with a single 50.00 item, one
/// employee account and one admin account.
pub fn seed_basic_fixtures(pool: &Pool<ConnectionManager<SqliteConnection>>) -> TestFixtures {
    let branch_id = insert_branch(pool, "Headquarters");
    let cafeteria_id = insert_cafeteria(pool, branch_id, "Main Cafeteria");
    let category_id = insert_menu_category(pool, cafeteria_id, "Beverages", "beverages");
    let menu_item_id = insert_menu_item(pool, category_id, cafeteria_id, "Filter Coffee", "50");

    insert_employee(pool, "EMP001", "Headquarters", ROLE_EMPLOYEE);
    insert_employee(pool, "ADM001", "Headquarters", ROLE_ADMIN);

    TestFixtures {
        branch_id,
        cafeteria_id,
        category_id,
        menu_item_id,
        employee_id: "EMP001".to_string(),
        admin_id: "ADM001".to_string(),
    }
}
