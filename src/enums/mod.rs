pub mod auth;
pub mod catalog;
pub mod employees;
pub mod orders;
pub mod payments;

use serde::Serialize;
use utoipa::ToSchema;

/// Generic `{success, message}` envelope used for error responses and
/// endpoints with no payload.
#[derive(Serialize, ToSchema)]
pub struct ApiMessage {
    pub success: bool,
    pub message: String,
}

impl ApiMessage {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}
