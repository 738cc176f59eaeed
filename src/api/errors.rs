use crate::db::RepositoryError;
use crate::enums::ApiMessage;
use actix_web::error::JsonPayloadError;
use actix_web::{Error, HttpRequest, HttpResponse};

pub fn default_error_handler(err: JsonPayloadError, req: &HttpRequest) -> Error {
    error!("Error in request: {} \n Error: {}", req.full_url(), err);
    actix_web::error::InternalError::from_response("", HttpResponse::BadRequest().finish()).into()
}

/// Map a repository failure to the HTTP envelope. Validation problems carry
/// their message back to the client; infrastructure failures are logged with
/// context and answered with a generic 500 so internals never leak.
pub(crate) fn error_response(context: &str, err: RepositoryError) -> HttpResponse {
    match err {
        RepositoryError::ValidationError(msg) => HttpResponse::BadRequest().json(ApiMessage::err(msg)),
        RepositoryError::InvalidStatus(status) => HttpResponse::BadRequest().json(ApiMessage::err(
            format!("Invalid order status: {}", status),
        )),
        RepositoryError::ReferenceNotFound(what) => {
            HttpResponse::BadRequest().json(ApiMessage::err(format!("Unknown reference: {}", what)))
        }
        RepositoryError::NotFound(what) => {
            debug!("{}: not found: {}", context, what);
            HttpResponse::NotFound().json(ApiMessage::err("Not found"))
        }
        other => {
            error!("{}: {}", context, other);
            HttpResponse::InternalServerError().json(ApiMessage::err("Internal server error"))
        }
    }
}
