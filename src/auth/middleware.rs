use std::future::{ready, Ready};
use std::rc::Rc;

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{error::ErrorUnauthorized, http::header, Error, HttpMessage};
use futures::future::LocalBoxFuture;

use crate::auth::config::AuthConfig;
use crate::auth::jwt::verify_session_jwt;
use crate::auth::Principal;
use crate::models::employee::ROLE_ADMIN;

#[derive(Clone)]
pub struct AuthLayer {
    cfg: AuthConfig,
}

impl AuthLayer {
    pub fn new(cfg: AuthConfig) -> Self {
        Self { cfg }
    }
}

// Open endpoints: liveness, account entry points, the payment callback
// confirmation, and public order status lookups for display boards.
fn is_public_path(path: &str) -> bool {
    matches!(
        path,
        "/" | "/health"
            | "/auth/register"
            | "/auth/login"
            | "/auth/forgot-password"
            | "/auth/reset-password"
            | "/orders/confirm"
    ) || path.starts_with("/orders/public/")
}

impl<S, B> Transform<S, ServiceRequest> for AuthLayer
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = AuthMiddleware<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddleware {
            service: Rc::new(service),
            inner: self.clone(),
        }))
    }
}

pub struct AuthMiddleware<S> {
    service: Rc<S>,
    inner: AuthLayer,
}

impl<S, B> Service<ServiceRequest> for AuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        if is_public_path(req.path()) {
            let fut = self.service.call(req);
            #[allow(clippy::redundant_async_block)]
            return Box::pin(async move { fut.await });
        }

        let token_opt = req
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.strip_prefix("Bearer "))
            .map(|s| s.to_string());
        if token_opt.as_deref().unwrap_or("").is_empty() {
            return Box::pin(async { Err(ErrorUnauthorized("missing or invalid auth header")) });
        }

        let token = token_opt.unwrap();
        let inner = self.inner.clone();
        let srv = self.service.clone();
        Box::pin(async move {
            match verify_session_jwt(&token, &inner.cfg) {
                Ok(claims) => {
                    let principal = if claims.role == ROLE_ADMIN {
                        Principal::Admin {
                            employee_id: claims.sub,
                        }
                    } else {
                        Principal::Employee {
                            employee_id: claims.sub,
                        }
                    };
                    req.extensions_mut().insert(principal);
                    srv.call(req).await
                }
                Err(_) => Err(ErrorUnauthorized("unauthorized")),
            }
        })
    }
}
