use crate::models::order::OrderView;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Field names match what the payment provider posts back; they stay
/// snake_case on the wire.
#[derive(Deserialize, Debug, ToSchema)]
pub struct VerifyPaymentRequest {
    pub razorpay_order_id: String,
    pub razorpay_payment_id: String,
    pub razorpay_signature: String,
    pub order_id: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct VerifyPaymentResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<OrderView>,
}
