use crate::models::employee::EmployeeExportRow;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One row of a bulk import payload. The upload UI parses the spreadsheet;
/// the backend only sees structured rows.
#[derive(Deserialize, Clone, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImportEmployeeRow {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub employee_id: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub branch: String,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImportResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub imported_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

#[derive(Serialize, ToSchema)]
pub struct ExportResponse {
    pub success: bool,
    pub employees: Vec<EmployeeExportRow>,
}

#[derive(Serialize, ToSchema)]
pub struct BranchStat {
    pub branch: String,
    pub count: i64,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub success: bool,
    pub total_employees: i64,
    pub branch_stats: Vec<BranchStat>,
}
