use crate::db::{DbConnection, RepositoryError};
use crate::enums::orders::PlacedOrder;
use crate::models::order::{
    CartItem, NewOrderRow, OrderRow, OrderStatus, OrderView, PaymentStatus,
};
use chrono::Utc;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::Error;
use diesel::SqliteConnection;
use log::{debug, error};
use rust_decimal::Decimal;

/// Parse a sequence number out of a well-formed order id. Anything that is
/// not `ORD` followed by a zero-padded number is ignored, so legacy or
/// hand-edited identifiers never feed the allocator.
pub(crate) fn parse_order_seq(order_id: &str) -> Option<i32> {
    let digits = order_id.strip_prefix("ORD")?;
    if digits.len() < 3 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

pub(crate) fn format_order_id(seq: i32) -> String {
    format!("ORD{:03}", seq)
}

/// Rejects carts whose client-supplied amounts do not add up. The original
/// system trusted the client here; recomputing server-side closes that hole.
pub(crate) fn validate_order_pricing(
    cart: &[CartItem],
    item_amount: Decimal,
    cgst_amount: Decimal,
    sgst_amount: Decimal,
    total: Decimal,
) -> Result<(), RepositoryError> {
    if cart.is_empty() {
        return Err(RepositoryError::ValidationError(
            "Cart must contain at least one item".to_string(),
        ));
    }
    let computed: Decimal = cart
        .iter()
        .map(|line| line.price * Decimal::from(line.quantity))
        .sum();
    if computed != item_amount {
        return Err(RepositoryError::ValidationError(format!(
            "Item amount {} does not match cart total {}",
            item_amount, computed
        )));
    }
    if item_amount + cgst_amount + sgst_amount != total {
        return Err(RepositoryError::ValidationError(format!(
            "Total {} does not equal item + CGST + SGST",
            total
        )));
    }
    Ok(())
}

pub struct PaymentCorrelation {
    pub razorpay_order_id: String,
    pub razorpay_payment_id: String,
    pub razorpay_signature: String,
}

#[derive(Clone)]
pub struct OrderOperations {
    pool: Pool<ConnectionManager<SqliteConnection>>,
}

impl OrderOperations {
    pub fn new(pool: Pool<ConnectionManager<SqliteConnection>>) -> Self {
        Self { pool }
    }

    /// Allocate the next sequential order id.
    ///
    /// Runs inside an immediate transaction so the write lock is held from
    /// the first read; two concurrent calls serialize instead of both
    /// computing the same next number. The counter is reconciled against
    /// the maximum already stored in `orders` in case rows were imported
    /// out of band.
    pub fn allocate_order_id(&self) -> Result<String, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("allocate_order_id: failed to acquire DB connection: {}", e);
            e
        })?;

        conn.connection().immediate_transaction(|conn| {
            use crate::db::schema::{order_sequence, orders};

            let counter: i32 = order_sequence::table
                .select(order_sequence::last_seq)
                .first(conn)?;

            let stored_max = orders::table
                .select(orders::order_id)
                .load::<String>(conn)?
                .iter()
                .filter_map(|oid| parse_order_seq(oid))
                .max()
                .unwrap_or(0);

            let next = counter.max(stored_max) + 1;
            diesel::update(order_sequence::table.filter(order_sequence::id.eq(0)))
                .set(order_sequence::last_seq.eq(next))
                .execute(conn)?;

            Ok(format_order_id(next))
        })
    }

    /// Persist a confirmed order with `payment_status = paid`.
    ///
    /// Idempotent: confirming an order id that already exists returns the
    /// stored order unchanged. Branch and cafeteria must resolve; their
    /// names are snapshotted so later catalog edits do not rewrite history.
    pub fn confirm_order(&self, order: &PlacedOrder) -> Result<OrderView, RepositoryError> {
        if parse_order_seq(&order.order_id).is_none() {
            return Err(RepositoryError::ValidationError(format!(
                "Malformed order id: {}",
                order.order_id
            )));
        }
        validate_order_pricing(
            &order.cart,
            order.item_amount,
            order.cgst_amount,
            order.sgst_amount,
            order.total,
        )?;

        let cart_blob = serde_json::to_string(&order.cart)
            .map_err(|e| RepositoryError::ValidationError(format!("Unserializable cart: {}", e)))?;

        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!(
                "confirm_order: failed to acquire DB connection for {}: {}",
                order.order_id, e
            );
            e
        })?;

        conn.connection().immediate_transaction(|conn| {
            use crate::db::schema::{branches, cafeterias, orders};

            let existing = orders::table
                .filter(orders::order_id.eq(&order.order_id))
                .select(OrderRow::as_select())
                .first::<OrderRow>(conn)
                .optional()?;
            if let Some(row) = existing {
                debug!("confirm_order: {} already persisted", order.order_id);
                return Ok(row.into());
            }

            let branch_name = branches::table
                .find(order.branch_id)
                .select(branches::name)
                .first::<String>(conn)
                .optional()?
                .ok_or_else(|| {
                    RepositoryError::ReferenceNotFound(format!("branch {}", order.branch_id))
                })?;
            let cafeteria_name = cafeterias::table
                .find(order.cafeteria_id)
                .select(cafeterias::name)
                .first::<String>(conn)
                .optional()?
                .ok_or_else(|| {
                    RepositoryError::ReferenceNotFound(format!("cafeteria {}", order.cafeteria_id))
                })?;

            let new_row = NewOrderRow {
                order_id: order.order_id.clone(),
                employee_id: order.employee_id.clone(),
                branch_id: order.branch_id,
                branch_name: Some(branch_name),
                cafeteria_id: order.cafeteria_id,
                cafeteria_name: Some(cafeteria_name),
                cart: cart_blob.clone(),
                item_amount: order.item_amount.to_string(),
                cgst_amount: order.cgst_amount.to_string(),
                sgst_amount: order.sgst_amount.to_string(),
                total_amount: order.total.to_string(),
                qr_value: order.qr_value.clone(),
                user_email: order.user_email.clone(),
                user_name: order.user_name.clone(),
                payment_status: PaymentStatus::Paid.as_str().to_string(),
                order_status: OrderStatus::Pending.as_db_str().to_string(),
                created_at: Utc::now(),
            };

            diesel::insert_into(orders::table)
                .values(&new_row)
                .execute(conn)?;

            let row = orders::table
                .filter(orders::order_id.eq(&order.order_id))
                .select(OrderRow::as_select())
                .first::<OrderRow>(conn)?;
            Ok(row.into())
        })
    }

    /// Mark an order paid and attach the provider correlation fields.
    /// A repeat of the same confirmation is a no-op update, never a second row.
    pub fn record_payment_success(
        &self,
        search_order_id: &str,
        correlation: &PaymentCorrelation,
    ) -> Result<OrderView, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!(
                "record_payment_success: failed to acquire DB connection for {}: {}",
                search_order_id, e
            );
            e
        })?;

        use crate::db::schema::orders::dsl::*;

        let affected = diesel::update(orders.filter(order_id.eq(search_order_id)))
            .set((
                payment_status.eq(PaymentStatus::Paid.as_str()),
                razorpay_order_id.eq(&correlation.razorpay_order_id),
                razorpay_payment_id.eq(&correlation.razorpay_payment_id),
                razorpay_signature.eq(&correlation.razorpay_signature),
            ))
            .execute(conn.connection())
            .map_err(RepositoryError::DatabaseError)?;
        if affected == 0 {
            return Err(RepositoryError::NotFound(format!(
                "orders: {}",
                search_order_id
            )));
        }

        let row = orders
            .filter(order_id.eq(search_order_id))
            .select(OrderRow::as_select())
            .first::<OrderRow>(conn.connection())
            .map_err(RepositoryError::DatabaseError)?;
        Ok(row.into())
    }

    /// Record a rejected confirmation attempt. The attempted signature is
    /// kept for audit. Missing orders are not an error here: the gate
    /// rejects before knowing whether the internal id is real.
    pub fn record_payment_failure(
        &self,
        search_order_id: &str,
        attempted_signature: &str,
    ) -> Result<(), RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!(
                "record_payment_failure: failed to acquire DB connection for {}: {}",
                search_order_id, e
            );
            e
        })?;

        use crate::db::schema::orders::dsl::*;

        diesel::update(orders.filter(order_id.eq(search_order_id)))
            .set((
                payment_status.eq(PaymentStatus::Failed.as_str()),
                razorpay_signature.eq(attempted_signature),
            ))
            .execute(conn.connection())
            .map_err(RepositoryError::DatabaseError)?;
        Ok(())
    }

    /// Advance the kitchen status. Unrecognized values fail with
    /// `InvalidStatus`; moving backward through the progression is rejected.
    pub fn advance_status(
        &self,
        search_order_id: &str,
        new_status: &str,
    ) -> Result<OrderView, RepositoryError> {
        let target = OrderStatus::parse(new_status)
            .ok_or_else(|| RepositoryError::InvalidStatus(new_status.to_string()))?;

        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!(
                "advance_status: failed to acquire DB connection for {}: {}",
                search_order_id, e
            );
            e
        })?;

        conn.connection().immediate_transaction(|conn| {
            use crate::db::schema::orders::dsl::*;

            let current_raw = orders
                .filter(order_id.eq(search_order_id))
                .select(order_status)
                .first::<String>(conn)
                .optional()?
                .ok_or_else(|| {
                    RepositoryError::NotFound(format!("orders: {}", search_order_id))
                })?;

            if let Some(current) = OrderStatus::from_db_str(&current_raw) {
                if target.rank() < current.rank() {
                    return Err(RepositoryError::ValidationError(format!(
                        "Order {} is already {}; cannot move back to {}",
                        search_order_id,
                        current.as_str(),
                        target.as_str()
                    )));
                }
            }

            diesel::update(orders.filter(order_id.eq(search_order_id)))
                .set(order_status.eq(target.as_db_str()))
                .execute(conn)?;

            let row = orders
                .filter(order_id.eq(search_order_id))
                .select(OrderRow::as_select())
                .first::<OrderRow>(conn)?;
            Ok(row.into())
        })
    }

    pub fn get_by_order_id(&self, search_order_id: &str) -> Result<OrderView, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!(
                "get_by_order_id: failed to acquire DB connection for {}: {}",
                search_order_id, e
            );
            e
        })?;

        use crate::db::schema::orders::dsl::*;

        let row = orders
            .filter(order_id.eq(search_order_id))
            .select(OrderRow::as_select())
            .first::<OrderRow>(conn.connection())
            .map_err(|e| {
                error!(
                    "get_by_order_id: error fetching order {}: {}",
                    search_order_id, e
                );
                match e {
                    Error::NotFound => {
                        RepositoryError::NotFound(format!("orders: {}", search_order_id))
                    }
                    other => RepositoryError::DatabaseError(other),
                }
            })?;
        Ok(row.into())
    }

    pub fn list_by_employee(
        &self,
        search_employee_id: &str,
    ) -> Result<Vec<OrderView>, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!(
                "list_by_employee: failed to acquire DB connection for {}: {}",
                search_employee_id, e
            );
            e
        })?;

        use crate::db::schema::orders::dsl::*;

        let rows = orders
            .filter(employee_id.eq(search_employee_id))
            .order_by(id.desc())
            .select(OrderRow::as_select())
            .load::<OrderRow>(conn.connection())
            .map_err(|e| {
                error!(
                    "list_by_employee: error loading orders for {}: {}",
                    search_employee_id, e
                );
                RepositoryError::DatabaseError(e)
            })?;
        Ok(rows.into_iter().map(OrderView::from).collect())
    }

    pub fn list_all(&self) -> Result<Vec<OrderView>, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("list_all: failed to acquire DB connection: {}", e);
            e
        })?;

        use crate::db::schema::orders::dsl::*;

        let rows = orders
            .order_by(id.desc())
            .select(OrderRow::as_select())
            .load::<OrderRow>(conn.connection())
            .map_err(|e| {
                error!("list_all: error loading orders: {}", e);
                RepositoryError::DatabaseError(e)
            })?;
        Ok(rows.into_iter().map(OrderView::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(value: &str) -> Decimal {
        Decimal::from_str(value).unwrap()
    }

    fn cart_line(price: &str, quantity: u32) -> CartItem {
        CartItem {
            item_id: 1,
            name: "Masala Dosa".to_string(),
            quantity,
            price: Decimal::from_str(price).unwrap(),
        }
    }

    #[test]
    fn parses_only_well_formed_order_ids() {
        assert_eq!(parse_order_seq("ORD001"), Some(1));
        assert_eq!(parse_order_seq("ORD042"), Some(42));
        assert_eq!(parse_order_seq("ORD1000"), Some(1000));
        assert_eq!(parse_order_seq("ORD1"), None);
        assert_eq!(parse_order_seq("ORDxyz"), None);
        assert_eq!(parse_order_seq("ORDER-42"), None);
        assert_eq!(parse_order_seq("42"), None);
    }

    #[test]
    fn formats_with_zero_padding() {
        assert_eq!(format_order_id(1), "ORD001");
        assert_eq!(format_order_id(999), "ORD999");
        assert_eq!(format_order_id(1000), "ORD1000");
    }

    #[test]
    fn pricing_must_add_up() {
        let cart = vec![cart_line("50", 2)];
        assert!(
            validate_order_pricing(&cart, dec("100"), dec("2.5"), dec("2.5"), dec("105")).is_ok()
        );

        let err = validate_order_pricing(&cart, dec("90"), dec("2.5"), dec("2.5"), dec("95"))
            .expect_err("wrong item amount");
        assert!(matches!(err, RepositoryError::ValidationError(_)));

        let err = validate_order_pricing(&cart, dec("100"), dec("2.5"), dec("2.5"), dec("110"))
            .expect_err("wrong total");
        assert!(matches!(err, RepositoryError::ValidationError(_)));

        let err = validate_order_pricing(&[], dec("0"), dec("0"), dec("0"), dec("0"))
            .expect_err("empty cart");
        assert!(matches!(err, RepositoryError::ValidationError(_)));
    }
}
