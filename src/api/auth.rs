use crate::api::errors::error_response;
use crate::auth::jwt::issue_session_jwt;
use crate::auth::{AuthConfig, PrincipalExtractor};
use crate::db::{CatalogOperations, EmployeeOperations};
use crate::enums::auth::{
    ForgotPasswordRequest, LoginRequest, LoginResponse, LoginUser, ProfileResponse,
    RegisterRequest, ResetPasswordRequest,
};
use crate::enums::ApiMessage;
use crate::services::ResetMailer;
use actix_web::{get, post, web, HttpResponse, Responder};
use std::sync::Arc;

const RESET_REQUESTED_MESSAGE: &str =
    "If the account exists, a password reset link has been sent";

#[utoipa::path(
    post,
    tag = "Auth",
    path = "/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = ApiMessage),
        (status = 400, description = "Missing fields or duplicate account", body = ApiMessage),
    ),
    summary = "Register a new employee account"
)]
#[post("/register")]
pub(super) async fn register(
    employee_ops: web::Data<EmployeeOperations>,
    req_data: web::Json<RegisterRequest>,
) -> impl Responder {
    let req_data = req_data.into_inner();
    match employee_ops.create_employee(&req_data) {
        Ok(_) => {
            info!("register: created account for {}", req_data.employee_id);
            HttpResponse::Created().json(ApiMessage::ok("Account created"))
        }
        Err(e) => error_response("register", e),
    }
}

#[utoipa::path(
    post,
    tag = "Auth",
    path = "/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "Bad credentials", body = ApiMessage),
    ),
    summary = "Exchange credentials for a session token"
)]
#[post("/login")]
pub(super) async fn login(
    employee_ops: web::Data<EmployeeOperations>,
    catalog_ops: web::Data<CatalogOperations>,
    auth_cfg: web::Data<AuthConfig>,
    req_data: web::Json<LoginRequest>,
) -> impl Responder {
    let req_data = req_data.into_inner();
    let employee = match employee_ops.verify_credentials(&req_data.employee_id, &req_data.password)
    {
        Ok(Some(employee)) => employee,
        Ok(None) => {
            debug!("login: rejected credentials for {}", req_data.employee_id);
            return HttpResponse::Unauthorized().json(ApiMessage::err("Invalid credentials"));
        }
        Err(e) => return error_response("login", e),
    };

    let token = match issue_session_jwt(&employee.employee_id, &employee.role, &auth_cfg) {
        Ok(token) => token,
        Err(e) => {
            error!("login: could not issue token: {}", e);
            return HttpResponse::InternalServerError()
                .json(ApiMessage::err("Internal server error"));
        }
    };

    // The stored branch is free text; it may not match any catalog entry.
    let branch_id = match catalog_ops.branch_id_by_name(&employee.branch) {
        Ok(found) => found,
        Err(e) => return error_response("login", e),
    };

    info!("login: {} authenticated", employee.employee_id);
    HttpResponse::Ok().json(LoginResponse {
        success: true,
        message: "Login successful".to_string(),
        token,
        user: LoginUser {
            employee_id: employee.employee_id,
            full_name: employee.full_name,
            email: employee.email,
            branch: employee.branch,
            branch_id,
            role: employee.role,
        },
    })
}

#[utoipa::path(
    post,
    tag = "Auth",
    path = "/auth/forgot-password",
    request_body = ForgotPasswordRequest,
    responses(
        (status = 200, description = "Reset link sent if the account exists", body = ApiMessage),
    ),
    summary = "Request a password reset link"
)]
#[post("/forgot-password")]
pub(super) async fn forgot_password(
    employee_ops: web::Data<EmployeeOperations>,
    mailer: web::Data<Arc<dyn ResetMailer + Send + Sync>>,
    req_data: web::Json<ForgotPasswordRequest>,
) -> impl Responder {
    match employee_ops.create_reset_token(&req_data.employee_id) {
        Ok(Some((email, token))) => {
            let reset_link = format!("/reset-password?token={}", token);
            mailer.send_reset(&email, &reset_link);
        }
        Ok(None) => {
            debug!(
                "forgot_password: no account for {}",
                req_data.employee_id
            );
        }
        Err(e) => return error_response("forgot_password", e),
    }
    // Identical response whether or not the account exists.
    HttpResponse::Ok().json(ApiMessage::ok(RESET_REQUESTED_MESSAGE))
}

#[utoipa::path(
    post,
    tag = "Auth",
    path = "/auth/reset-password",
    request_body = ResetPasswordRequest,
    responses(
        (status = 200, description = "Password updated", body = ApiMessage),
        (status = 400, description = "Invalid or expired token", body = ApiMessage),
    ),
    summary = "Set a new password using a reset token"
)]
#[post("/reset-password")]
pub(super) async fn reset_password(
    employee_ops: web::Data<EmployeeOperations>,
    req_data: web::Json<ResetPasswordRequest>,
) -> impl Responder {
    match employee_ops.reset_password(&req_data.token, &req_data.password) {
        Ok(()) => {
            info!("reset_password: password updated via reset token");
            HttpResponse::Ok().json(ApiMessage::ok("Password updated"))
        }
        Err(e) => error_response("reset_password", e),
    }
}

#[utoipa::path(
    get,
    tag = "Auth",
    path = "/auth/profile",
    responses(
        (status = 200, description = "The authenticated principal", body = ProfileResponse),
        (status = 401, description = "Missing or invalid token"),
    ),
    summary = "Who am I"
)]
#[get("/profile")]
pub(super) async fn profile(principal: PrincipalExtractor) -> impl Responder {
    let principal = principal.0;
    HttpResponse::Ok().json(ProfileResponse {
        success: true,
        employee_id: principal.employee_id().to_string(),
        role: principal.role().to_string(),
    })
}
