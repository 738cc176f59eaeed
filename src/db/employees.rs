use crate::db::{DbConnection, RepositoryError};
use crate::enums::auth::RegisterRequest;
use crate::enums::employees::ImportEmployeeRow;
use crate::models::employee::{Employee, EmployeeExportRow, NewEmployeeRow, ROLE_EMPLOYEE};
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use chrono::{Duration, Utc};
use diesel::dsl::count_star;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::SqliteConnection;
use log::{error, warn};
use rand::RngCore;
use std::collections::HashSet;

/// Outcome of a bulk import that made it past validation.
#[derive(Debug)]
pub struct ImportSummary {
    pub imported: usize,
}

fn hash_password(plain: &str) -> Result<String, RepositoryError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| {
            error!("failed to hash password: {}", e);
            RepositoryError::HashingError(e.to_string())
        })
}

fn password_matches(plain: &str, stored_hash: &str) -> bool {
    match PasswordHash::new(stored_hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(plain.as_bytes(), &parsed)
            .is_ok(),
        Err(e) => {
            warn!("stored password hash is unreadable: {}", e);
            false
        }
    }
}

fn generate_reset_token() -> String {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

#[derive(Clone)]
pub struct EmployeeOperations {
    pool: Pool<ConnectionManager<SqliteConnection>>,
}

impl EmployeeOperations {
    pub fn new(pool: Pool<ConnectionManager<SqliteConnection>>) -> Self {
        Self { pool }
    }

    pub fn create_employee(&self, request: &RegisterRequest) -> Result<i32, RepositoryError> {
        if request.employee_id.trim().is_empty()
            || request.password.is_empty()
            || request.email.trim().is_empty()
        {
            return Err(RepositoryError::ValidationError(
                "employeeId, email, and password are required".to_string(),
            ));
        }
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("create_employee: failed to acquire DB connection: {}", e);
            e
        })?;

        use crate::db::schema::employees::dsl::*;

        let taken = employees
            .filter(
                employee_id
                    .eq(&request.employee_id)
                    .or(email.eq(&request.email)),
            )
            .select(id)
            .first::<i32>(conn.connection())
            .optional()
            .map_err(RepositoryError::DatabaseError)?;
        if taken.is_some() {
            return Err(RepositoryError::ValidationError(
                "Employee ID or email already registered".to_string(),
            ));
        }

        let new_row = NewEmployeeRow {
            employee_id: request.employee_id.clone(),
            full_name: request.full_name.clone(),
            email: request.email.clone(),
            phone: request.phone.clone(),
            password_hash: hash_password(&request.password)?,
            branch: request.branch.clone(),
            role: ROLE_EMPLOYEE.to_string(),
            created_at: Utc::now(),
        };

        diesel::insert_into(employees)
            .values(&new_row)
            .returning(id)
            .get_result(conn.connection())
            .map_err(|e| {
                error!(
                    "create_employee: error inserting '{}': {}",
                    request.employee_id, e
                );
                RepositoryError::DatabaseError(e)
            })
    }

    /// Checks a login attempt. `Ok(None)` covers both an unknown employee id
    /// and a wrong password, so callers cannot tell the two apart.
    pub fn verify_credentials(
        &self,
        login_employee_id: &str,
        password: &str,
    ) -> Result<Option<Employee>, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!(
                "verify_credentials: failed to acquire DB connection: {}",
                e
            );
            e
        })?;

        use crate::db::schema::employees::dsl::*;

        let found = employees
            .filter(employee_id.eq(login_employee_id))
            .select(Employee::as_select())
            .first::<Employee>(conn.connection())
            .optional()
            .map_err(RepositoryError::DatabaseError)?;

        Ok(found.filter(|e| password_matches(password, &e.password_hash)))
    }

    pub fn get_by_employee_id(
        &self,
        lookup_employee_id: &str,
    ) -> Result<Employee, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool)?;

        use crate::db::schema::employees::dsl::*;

        employees
            .filter(employee_id.eq(lookup_employee_id))
            .select(Employee::as_select())
            .first::<Employee>(conn.connection())
            .map_err(|e| match e {
                diesel::result::Error::NotFound => {
                    RepositoryError::NotFound(format!("employees: {}", lookup_employee_id))
                }
                _ => RepositoryError::DatabaseError(e),
            })
    }

    /// Stamps a fresh reset token onto the account, valid for one hour.
    /// Returns `Ok(None)` when no such employee exists; the caller responds
    /// the same way either way.
    pub fn create_reset_token(
        &self,
        reset_employee_id: &str,
    ) -> Result<Option<(String, String)>, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!(
                "create_reset_token: failed to acquire DB connection: {}",
                e
            );
            e
        })?;

        use crate::db::schema::employees::dsl::*;

        let found = employees
            .filter(employee_id.eq(reset_employee_id))
            .select((id, email))
            .first::<(i32, String)>(conn.connection())
            .optional()
            .map_err(RepositoryError::DatabaseError)?;

        let Some((row_id, account_email)) = found else {
            return Ok(None);
        };

        let token = generate_reset_token();
        diesel::update(employees.filter(id.eq(row_id)))
            .set((
                reset_token.eq(Some(token.clone())),
                reset_expires.eq(Some(Utc::now() + Duration::hours(1))),
            ))
            .execute(conn.connection())
            .map_err(|e| {
                error!(
                    "create_reset_token: error storing token for '{}': {}",
                    reset_employee_id, e
                );
                RepositoryError::DatabaseError(e)
            })?;

        Ok(Some((account_email, token)))
    }

    pub fn reset_password(&self, token: &str, new_password: &str) -> Result<(), RepositoryError> {
        if new_password.is_empty() {
            return Err(RepositoryError::ValidationError(
                "Password is required".to_string(),
            ));
        }
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("reset_password: failed to acquire DB connection: {}", e);
            e
        })?;

        use crate::db::schema::employees::dsl::*;

        let found = employees
            .filter(reset_token.eq(token))
            .select((id, reset_expires))
            .first::<(i32, Option<chrono::DateTime<Utc>>)>(conn.connection())
            .optional()
            .map_err(RepositoryError::DatabaseError)?;

        let row_id = match found {
            Some((row_id, Some(expires))) if expires > Utc::now() => row_id,
            _ => {
                return Err(RepositoryError::ValidationError(
                    "Invalid or expired token".to_string(),
                ));
            }
        };

        diesel::update(employees.filter(id.eq(row_id)))
            .set((
                password_hash.eq(hash_password(new_password)?),
                reset_token.eq(None::<String>),
                reset_expires.eq(None::<chrono::DateTime<Utc>>),
            ))
            .execute(conn.connection())
            .map_err(|e| {
                error!("reset_password: error updating password: {}", e);
                RepositoryError::DatabaseError(e)
            })?;
        Ok(())
    }

    /// Inserts a batch of pre-validated rows. Rejects the whole batch when
    /// the payload repeats an identifier or collides with an existing
    /// account; partial imports would leave the caller guessing.
    pub fn import_employees(
        &self,
        rows: &[ImportEmployeeRow],
    ) -> Result<ImportSummary, RepositoryError> {
        if rows.is_empty() {
            return Err(RepositoryError::ValidationError(
                "No employee rows in payload".to_string(),
            ));
        }

        let mut problems: Vec<String> = Vec::new();
        let mut seen_ids: HashSet<&str> = HashSet::new();
        let mut seen_emails: HashSet<&str> = HashSet::new();
        for (idx, row) in rows.iter().enumerate() {
            let row_no = idx + 1;
            if !seen_ids.insert(row.employee_id.as_str()) {
                problems.push(format!(
                    "Row {}: duplicate employeeId {} in payload",
                    row_no, row.employee_id
                ));
            }
            if !seen_emails.insert(row.email.as_str()) {
                problems.push(format!(
                    "Row {}: duplicate email {} in payload",
                    row_no, row.email
                ));
            }
        }

        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("import_employees: failed to acquire DB connection: {}", e);
            e
        })?;

        use crate::db::schema::employees::dsl::*;

        let payload_ids: Vec<&str> = rows.iter().map(|r| r.employee_id.as_str()).collect();
        let payload_emails: Vec<&str> = rows.iter().map(|r| r.email.as_str()).collect();
        let existing = employees
            .filter(
                employee_id
                    .eq_any(payload_ids.iter().copied())
                    .or(email.eq_any(payload_emails.iter().copied())),
            )
            .select((employee_id, email))
            .load::<(String, String)>(conn.connection())
            .map_err(RepositoryError::DatabaseError)?;
        for (existing_id, existing_email) in &existing {
            if payload_ids.contains(&existing_id.as_str()) {
                problems.push(format!("employeeId {} already registered", existing_id));
            } else {
                problems.push(format!("email {} already registered", existing_email));
            }
        }

        if !problems.is_empty() {
            return Err(RepositoryError::ValidationError(problems.join("; ")));
        }

        let now = Utc::now();
        let mut new_rows = Vec::with_capacity(rows.len());
        for row in rows {
            new_rows.push(NewEmployeeRow {
                employee_id: row.employee_id.clone(),
                full_name: row.full_name.clone(),
                email: row.email.clone(),
                phone: row.phone.clone(),
                password_hash: hash_password(&row.password)?,
                branch: row.branch.clone(),
                role: ROLE_EMPLOYEE.to_string(),
                created_at: now,
            });
        }

        let inserted = conn.connection().immediate_transaction(|conn| {
            diesel::insert_into(employees).values(&new_rows).execute(conn)
        })?;

        Ok(ImportSummary { imported: inserted })
    }

    pub fn list_for_export(&self) -> Result<Vec<EmployeeExportRow>, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("list_for_export: failed to acquire DB connection: {}", e);
            e
        })?;

        use crate::db::schema::employees::dsl::*;

        employees
            .order_by(employee_id.asc())
            .select((full_name, employee_id, email, phone, branch))
            .load::<EmployeeExportRow>(conn.connection())
            .map_err(|e| {
                error!("list_for_export: error fetching employees: {}", e);
                RepositoryError::DatabaseError(e)
            })
    }

    pub fn stats(&self) -> Result<(i64, Vec<(String, i64)>), RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("stats: failed to acquire DB connection: {}", e);
            e
        })?;

        use crate::db::schema::employees::dsl::*;

        let total = employees
            .select(count_star())
            .first::<i64>(conn.connection())
            .map_err(RepositoryError::DatabaseError)?;
        let per_branch = employees
            .group_by(branch)
            .select((branch, count_star()))
            .order_by(branch.asc())
            .load::<(String, i64)>(conn.connection())
            .map_err(|e| {
                error!("stats: error aggregating per-branch counts: {}", e);
                RepositoryError::DatabaseError(e)
            })?;
        Ok((total, per_branch))
    }
}
