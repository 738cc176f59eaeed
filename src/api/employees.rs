use crate::api::errors::error_response;
use crate::auth::AdminPrincipal;
use crate::db::{EmployeeOperations, RepositoryError};
use crate::enums::employees::{
    BranchStat, ExportResponse, ImportEmployeeRow, ImportResponse, StatsResponse,
};
use actix_web::{get, post, web, HttpResponse, Responder};

fn validate_import_rows(rows: &[ImportEmployeeRow]) -> Vec<String> {
    let mut problems = Vec::new();
    for (idx, row) in rows.iter().enumerate() {
        let row_no = idx + 1;
        if row.employee_id.trim().is_empty() {
            problems.push(format!("Row {}: employeeId is required", row_no));
        }
        if row.full_name.trim().is_empty() {
            problems.push(format!("Row {}: fullName is required", row_no));
        }
        if !row.email.contains('@') || !row.email.contains('.') {
            problems.push(format!("Row {}: invalid email '{}'", row_no, row.email));
        }
        let digits = row.phone.chars().filter(|c| c.is_ascii_digit()).count();
        if digits != 10 {
            problems.push(format!("Row {}: phone must have 10 digits", row_no));
        }
        if row.password.is_empty() {
            problems.push(format!("Row {}: password is required", row_no));
        }
    }
    problems
}

#[utoipa::path(
    post,
    tag = "Employees",
    path = "/employees/import",
    request_body = Vec<ImportEmployeeRow>,
    responses(
        (status = 200, description = "All rows imported", body = ImportResponse),
        (status = 400, description = "One or more rows rejected, nothing imported", body = ImportResponse),
    ),
    summary = "Bulk import employee accounts"
)]
#[post("/import")]
pub(super) async fn import_employees(
    employee_ops: web::Data<EmployeeOperations>,
    _admin: AdminPrincipal,
    req_data: web::Json<Vec<ImportEmployeeRow>>,
) -> impl Responder {
    let rows = req_data.into_inner();

    let problems = validate_import_rows(&rows);
    if !problems.is_empty() {
        return HttpResponse::BadRequest().json(ImportResponse {
            success: false,
            message: "Import rejected".to_string(),
            imported_count: None,
            errors: Some(problems),
        });
    }

    match employee_ops.import_employees(&rows) {
        Ok(summary) => {
            info!("import_employees: imported {} accounts", summary.imported);
            HttpResponse::Ok().json(ImportResponse {
                success: true,
                message: format!("Imported {} employees", summary.imported),
                imported_count: Some(summary.imported),
                errors: None,
            })
        }
        Err(RepositoryError::ValidationError(msg)) => HttpResponse::BadRequest().json(
            ImportResponse {
                success: false,
                message: "Import rejected".to_string(),
                imported_count: None,
                errors: Some(msg.split("; ").map(str::to_string).collect()),
            },
        ),
        Err(e) => error_response("import_employees", e),
    }
}

#[utoipa::path(
    get,
    tag = "Employees",
    path = "/employees/export",
    responses((status = 200, description = "All accounts without credentials", body = ExportResponse)),
    summary = "Export employee accounts"
)]
#[get("/export")]
pub(super) async fn export_employees(
    employee_ops: web::Data<EmployeeOperations>,
    _admin: AdminPrincipal,
) -> impl Responder {
    match employee_ops.list_for_export() {
        Ok(employees) => {
            debug!("export_employees: exported {} accounts", employees.len());
            HttpResponse::Ok().json(ExportResponse {
                success: true,
                employees,
            })
        }
        Err(e) => error_response("export_employees", e),
    }
}

#[utoipa::path(
    get,
    tag = "Employees",
    path = "/employees/stats",
    responses((status = 200, description = "Headcount overall and per branch", body = StatsResponse)),
    summary = "Employee headcount statistics"
)]
#[get("/stats")]
pub(super) async fn employee_stats(
    employee_ops: web::Data<EmployeeOperations>,
    _admin: AdminPrincipal,
) -> impl Responder {
    match employee_ops.stats() {
        Ok((total, per_branch)) => HttpResponse::Ok().json(StatsResponse {
            success: true,
            total_employees: total,
            branch_stats: per_branch
                .into_iter()
                .map(|(branch, count)| BranchStat { branch, count })
                .collect(),
        }),
        Err(e) => error_response("employee_stats", e),
    }
}
