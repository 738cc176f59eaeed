use chrono::{DateTime, Utc};
use diesel::{Identifiable, Insertable, Queryable, Selectable};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use utoipa::ToSchema;

/// External order status progression. `Delivered` is stored as `completed`
/// in the database; the translation happens only in `as_db_str` /
/// `from_db_str`, never in handler or query code.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OrderStatus {
    Pending,
    Preparing,
    Ready,
    Delivered,
}

impl OrderStatus {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(Self::Pending),
            "preparing" => Some(Self::Preparing),
            "ready" => Some(Self::Ready),
            "delivered" => Some(Self::Delivered),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Preparing => "preparing",
            Self::Ready => "ready",
            Self::Delivered => "delivered",
        }
    }

    pub fn as_db_str(&self) -> &'static str {
        match self {
            Self::Delivered => "completed",
            other => other.as_str(),
        }
    }

    pub fn from_db_str(value: &str) -> Option<Self> {
        match value {
            "completed" => Some(Self::Delivered),
            other => Self::parse(other),
        }
    }

    /// Position in the fixed progression; status never moves to a lower rank.
    pub fn rank(&self) -> u8 {
        match self {
            Self::Pending => 0,
            Self::Preparing => 1,
            Self::Ready => 2,
            Self::Delivered => 3,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PaymentStatus {
    Pending,
    Paid,
    Failed,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
            Self::Failed => "failed",
        }
    }
}

/// One cart line item, serialized as an opaque JSON blob in the `cart`
/// column and reconstructed on read.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub item_id: i32,
    pub name: String,
    pub quantity: u32,
    pub price: Decimal,
}

#[derive(Queryable, Selectable, Identifiable, Debug)]
#[diesel(table_name = crate::db::schema::orders)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct OrderRow {
    pub id: i32,
    pub order_id: String,
    pub employee_id: String,
    pub branch_id: i32,
    pub branch_name: Option<String>,
    pub cafeteria_id: i32,
    pub cafeteria_name: Option<String>,
    pub cart: String,
    pub item_amount: String,
    pub cgst_amount: String,
    pub sgst_amount: String,
    pub total_amount: String,
    pub qr_value: Option<String>,
    pub user_email: Option<String>,
    pub user_name: Option<String>,
    pub payment_status: String,
    pub order_status: String,
    pub razorpay_order_id: Option<String>,
    pub razorpay_payment_id: Option<String>,
    pub razorpay_signature: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = crate::db::schema::orders)]
pub struct NewOrderRow {
    pub order_id: String,
    pub employee_id: String,
    pub branch_id: i32,
    pub branch_name: Option<String>,
    pub cafeteria_id: i32,
    pub cafeteria_name: Option<String>,
    pub cart: String,
    pub item_amount: String,
    pub cgst_amount: String,
    pub sgst_amount: String,
    pub total_amount: String,
    pub qr_value: Option<String>,
    pub user_email: Option<String>,
    pub user_name: Option<String>,
    pub payment_status: String,
    pub order_status: String,
    pub created_at: DateTime<Utc>,
}

/// camelCase view of an order as returned over the wire.
#[derive(Clone, Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderView {
    pub id: i32,
    pub order_id: String,
    pub employee_id: String,
    pub branch_id: i32,
    pub branch_name: Option<String>,
    pub cafeteria_id: i32,
    pub cafeteria_name: Option<String>,
    pub cart: Vec<CartItem>,
    pub item_amount: Decimal,
    pub cgst_amount: Decimal,
    pub sgst_amount: Decimal,
    pub total: Decimal,
    pub qr_value: Option<String>,
    pub user_email: Option<String>,
    pub user_name: Option<String>,
    pub payment_status: String,
    pub order_status: String,
    pub razorpay_order_id: Option<String>,
    pub razorpay_payment_id: Option<String>,
    pub order_time: DateTime<Utc>,
}

fn parse_amount(raw: &str, order_id: &str, field: &str) -> Decimal {
    Decimal::from_str(raw).unwrap_or_else(|e| {
        warn!("order {}: unreadable {} amount '{}': {}", order_id, field, raw, e);
        Decimal::ZERO
    })
}

impl From<OrderRow> for OrderView {
    fn from(row: OrderRow) -> Self {
        // Tolerant read: a corrupt cart blob degrades to an empty cart
        // instead of failing the whole request.
        let cart: Vec<CartItem> = serde_json::from_str(&row.cart).unwrap_or_else(|e| {
            warn!("order {}: unreadable cart blob: {}", row.order_id, e);
            Vec::new()
        });

        let order_status = OrderStatus::from_db_str(&row.order_status)
            .map(|s| s.as_str().to_string())
            .unwrap_or_else(|| row.order_status.clone());

        OrderView {
            item_amount: parse_amount(&row.item_amount, &row.order_id, "item"),
            cgst_amount: parse_amount(&row.cgst_amount, &row.order_id, "cgst"),
            sgst_amount: parse_amount(&row.sgst_amount, &row.order_id, "sgst"),
            total: parse_amount(&row.total_amount, &row.order_id, "total"),
            id: row.id,
            order_id: row.order_id,
            employee_id: row.employee_id,
            branch_id: row.branch_id,
            branch_name: row.branch_name,
            cafeteria_id: row.cafeteria_id,
            cafeteria_name: row.cafeteria_name,
            cart,
            qr_value: row.qr_value,
            user_email: row.user_email,
            user_name: row.user_name,
            payment_status: row.payment_status,
            order_status,
            razorpay_order_id: row.razorpay_order_id,
            razorpay_payment_id: row.razorpay_payment_id,
            order_time: row.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_status_round_trips_through_db_representation() {
        for status in [
            OrderStatus::Pending,
            OrderStatus::Preparing,
            OrderStatus::Ready,
            OrderStatus::Delivered,
        ] {
            assert_eq!(OrderStatus::from_db_str(status.as_db_str()), Some(status));
        }
        assert_eq!(OrderStatus::Delivered.as_db_str(), "completed");
        assert_eq!(OrderStatus::parse("completed"), None);
        assert_eq!(OrderStatus::parse("cancelled"), None);
    }

    #[test]
    fn rank_follows_progression() {
        assert!(OrderStatus::Pending.rank() < OrderStatus::Preparing.rank());
        assert!(OrderStatus::Preparing.rank() < OrderStatus::Ready.rank());
        assert!(OrderStatus::Ready.rank() < OrderStatus::Delivered.rank());
    }
}
