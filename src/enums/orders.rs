use crate::models::order::{CartItem, OrderView};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Deserialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderRequest {
    pub branch_id: i32,
    pub cafeteria_id: i32,
    pub cart: Vec<CartItem>,
    pub item_amount: Decimal,
    pub cgst_amount: Decimal,
    pub sgst_amount: Decimal,
    pub total: Decimal,
    pub qr_value: Option<String>,
    pub user_email: Option<String>,
    pub user_name: Option<String>,
}

/// An order with an allocated id, echoed to the client for payment
/// initiation and sent back verbatim on `/orders/confirm`.
#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlacedOrder {
    pub order_id: String,
    pub employee_id: String,
    pub branch_id: i32,
    pub cafeteria_id: i32,
    pub cart: Vec<CartItem>,
    pub item_amount: Decimal,
    pub cgst_amount: Decimal,
    pub sgst_amount: Decimal,
    pub total: Decimal,
    pub qr_value: Option<String>,
    pub user_email: Option<String>,
    pub user_name: Option<String>,
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct ConfirmOrderRequest {
    pub order: PlacedOrder,
    #[allow(dead_code)]
    pub payment_id: Option<String>,
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct UpdateStatusRequest {
    pub order_status: String,
}

#[derive(Serialize, ToSchema)]
pub struct PlacedOrderResponse {
    pub success: bool,
    pub order: PlacedOrder,
}

#[derive(Serialize, ToSchema)]
pub struct OrderResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub order: OrderView,
}

#[derive(Serialize, ToSchema)]
pub struct OrdersResponse {
    pub success: bool,
    pub orders: Vec<OrderView>,
}
