use chrono::{DateTime, Utc};
use diesel::{Identifiable, Insertable, Queryable, Selectable};
use serde::Serialize;
use utoipa::ToSchema;

pub const ROLE_EMPLOYEE: &str = "employee";
pub const ROLE_ADMIN: &str = "admin";

#[derive(Queryable, Selectable, Identifiable, Debug)]
#[diesel(table_name = crate::db::schema::employees)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Employee {
    pub id: i32,
    pub employee_id: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub password_hash: String,
    pub branch: String,
    pub role: String,
    pub reset_token: Option<String>,
    pub reset_expires: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = crate::db::schema::employees)]
pub struct NewEmployeeRow {
    pub employee_id: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub password_hash: String,
    pub branch: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

/// Password-free projection used by `/employees/export`.
#[derive(Queryable, Serialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeExportRow {
    pub full_name: String,
    pub employee_id: String,
    pub email: String,
    pub phone: String,
    pub branch: String,
}
