use crate::api::errors::error_response;
use crate::auth::PrincipalExtractor;
use crate::db::{OrderOperations, PaymentCorrelation, RepositoryError};
use crate::enums::payments::{VerifyPaymentRequest, VerifyPaymentResponse};
use crate::payment::PaymentGate;
use actix_web::{post, web, HttpResponse, Responder};

#[utoipa::path(
    post,
    tag = "Payments",
    path = "/payments/verify",
    request_body = VerifyPaymentRequest,
    responses(
        (status = 200, description = "Signature valid, order marked paid", body = VerifyPaymentResponse),
        (status = 400, description = "Signature rejected", body = VerifyPaymentResponse),
    ),
    summary = "Verify a Razorpay checkout signature"
)]
#[post("/verify")]
pub(super) async fn verify_payment(
    gate: web::Data<PaymentGate>,
    order_ops: web::Data<OrderOperations>,
    _principal: PrincipalExtractor,
    req_data: web::Json<VerifyPaymentRequest>,
) -> impl Responder {
    let req_data = req_data.into_inner();

    if !gate.verify_signature(
        &req_data.razorpay_order_id,
        &req_data.razorpay_payment_id,
        &req_data.razorpay_signature,
    ) {
        warn!(
            "verify_payment: bad signature for provider order {}",
            req_data.razorpay_order_id
        );
        if let Some(internal_order_id) = &req_data.order_id {
            match order_ops.record_payment_failure(internal_order_id, &req_data.razorpay_signature)
            {
                Ok(()) | Err(RepositoryError::NotFound(_)) => {}
                Err(e) => error!("verify_payment: could not record failure: {}", e),
            }
        }
        // Same message no matter which field mismatched.
        return HttpResponse::BadRequest().json(VerifyPaymentResponse {
            success: false,
            message: "Payment verification failed".to_string(),
            payment_id: None,
            order: None,
        });
    }

    let order = match &req_data.order_id {
        Some(internal_order_id) => {
            let correlation = PaymentCorrelation {
                razorpay_order_id: req_data.razorpay_order_id.clone(),
                razorpay_payment_id: req_data.razorpay_payment_id.clone(),
                razorpay_signature: req_data.razorpay_signature.clone(),
            };
            match order_ops.record_payment_success(internal_order_id, &correlation) {
                Ok(view) => Some(view),
                Err(e) => return error_response("verify_payment", e),
            }
        }
        None => None,
    };

    info!(
        "verify_payment: verified payment {} for provider order {}",
        req_data.razorpay_payment_id, req_data.razorpay_order_id
    );
    HttpResponse::Ok().json(VerifyPaymentResponse {
        success: true,
        message: "Payment verified successfully".to_string(),
        payment_id: Some(req_data.razorpay_payment_id),
        order,
    })
}
