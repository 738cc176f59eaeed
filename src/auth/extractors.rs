use crate::auth::principal::Principal;
use actix_web::dev::Payload;
use actix_web::{error::ErrorUnauthorized, Error, FromRequest, HttpMessage, HttpRequest};
use futures::future::{ready, Ready};

pub struct PrincipalExtractor(pub Principal);

impl FromRequest for PrincipalExtractor {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        if let Some(p) = req.extensions().get::<Principal>() {
            return ready(Ok(PrincipalExtractor(p.clone())));
        }
        ready(Err(ErrorUnauthorized("missing principal")))
    }
}

pub struct EmployeePrincipal {
    employee_id: String,
}

impl EmployeePrincipal {
    pub fn employee_id(&self) -> &str {
        &self.employee_id
    }
}

impl FromRequest for EmployeePrincipal {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        if let Some(p) = req.extensions().get::<Principal>() {
            // Admins can do anything an employee can.
            let employee_id = p.employee_id().to_string();
            return ready(Ok(EmployeePrincipal { employee_id }));
        }
        ready(Err(ErrorUnauthorized("missing principal")))
    }
}

pub struct AdminPrincipal {
    pub employee_id: String,
}

impl FromRequest for AdminPrincipal {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        if let Some(p) = req.extensions().get::<Principal>() {
            if let Principal::Admin { employee_id } = p.clone() {
                return ready(Ok(AdminPrincipal { employee_id }));
            }
            return ready(Err(actix_web::error::ErrorForbidden(
                "admin role required",
            )));
        }
        ready(Err(ErrorUnauthorized("missing principal")))
    }
}
