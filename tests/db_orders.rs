mod common;

use chrono::Utc;
use diesel::prelude::*;
use mealdesk::db::{OrderOperations, PaymentCorrelation, RepositoryError};
use mealdesk::enums::orders::PlacedOrder;
use mealdesk::models::order::CartItem;
use mealdesk::test_utils::TestFixtures;
use rust_decimal::Decimal;
use std::str::FromStr;

fn dec(value: &str) -> Decimal {
    Decimal::from_str(value).unwrap()
}

fn sample_order(order_id: &str, fixtures: &TestFixtures) -> PlacedOrder {
    PlacedOrder {
        order_id: order_id.to_string(),
        employee_id: fixtures.employee_id.clone(),
        branch_id: fixtures.branch_id,
        cafeteria_id: fixtures.cafeteria_id,
        cart: vec![CartItem {
            item_id: fixtures.menu_item_id,
            name: "Filter Coffee".to_string(),
            quantity: 2,
            price: dec("50"),
        }],
        item_amount: dec("100"),
        cgst_amount: dec("2.5"),
        sgst_amount: dec("2.5"),
        total: dec("105"),
        qr_value: Some("qr-blob".to_string()),
        user_email: Some("emp001@example.com".to_string()),
        user_name: Some("Test EMP001".to_string()),
    }
}

#[test]
fn allocates_dense_sequential_ids() {
    let (db, _fixtures) = common::setup_pool_with_fixtures();
    let ops = OrderOperations::new(db.pool.clone());

    assert_eq!(ops.allocate_order_id().unwrap(), "ORD001");
    assert_eq!(ops.allocate_order_id().unwrap(), "ORD002");
    assert_eq!(ops.allocate_order_id().unwrap(), "ORD003");
}

#[test]
fn concurrent_allocations_never_collide() {
    let (db, _fixtures) = common::setup_pool_with_fixtures();
    let ops = OrderOperations::new(db.pool.clone());

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let ops = ops.clone();
            std::thread::spawn(move || ops.allocate_order_id().unwrap())
        })
        .collect();

    let mut ids: Vec<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 8);
    assert!(ids.contains(&"ORD001".to_string()));
    assert!(ids.contains(&"ORD008".to_string()));
}

#[test]
fn allocator_skips_past_stored_order_ids() {
    let (db, fixtures) = common::setup_pool_with_fixtures();
    let ops = OrderOperations::new(db.pool.clone());

    // An order confirmed elsewhere occupies ORD007; the counter knows nothing
    // about it.
    ops.confirm_order(&sample_order("ORD007", &fixtures))
        .unwrap();
    assert_eq!(ops.allocate_order_id().unwrap(), "ORD008");
}

#[test]
fn allocator_ignores_legacy_identifiers() {
    let (db, fixtures) = common::setup_pool_with_fixtures();
    let ops = OrderOperations::new(db.pool.clone());

    // Hand-migrated rows with foreign id shapes must not feed the sequence.
    {
        use mealdesk::db::schema::orders::dsl::*;
        let mut conn = db.pool.get().unwrap();
        diesel::insert_into(orders)
            .values((
                order_id.eq("LEGACY-042"),
                employee_id.eq(&fixtures.employee_id),
                branch_id.eq(fixtures.branch_id),
                branch_name.eq("Headquarters"),
                cafeteria_id.eq(fixtures.cafeteria_id),
                cafeteria_name.eq("Main Cafeteria"),
                cart.eq("[]"),
                item_amount.eq("0"),
                cgst_amount.eq("0"),
                sgst_amount.eq("0"),
                total_amount.eq("0"),
                payment_status.eq("paid"),
                order_status.eq("pending"),
                created_at.eq(Utc::now()),
            ))
            .execute(&mut conn)
            .unwrap();
    }

    assert_eq!(ops.allocate_order_id().unwrap(), "ORD001");
}

#[test]
fn confirm_round_trips_the_order() {
    let (db, fixtures) = common::setup_pool_with_fixtures();
    let ops = OrderOperations::new(db.pool.clone());

    let placed = sample_order(&ops.allocate_order_id().unwrap(), &fixtures);
    let view = ops.confirm_order(&placed).unwrap();

    assert_eq!(view.order_id, "ORD001");
    assert_eq!(view.branch_name.as_deref(), Some("Headquarters"));
    assert_eq!(view.cafeteria_name.as_deref(), Some("Main Cafeteria"));
    assert_eq!(view.payment_status, "paid");
    assert_eq!(view.order_status, "pending");
    assert_eq!(view.item_amount, dec("100"));
    assert_eq!(view.total, dec("105"));
    assert_eq!(view.cart.len(), 1);
    assert_eq!(view.cart[0].quantity, 2);

    let fetched = ops.get_by_order_id("ORD001").unwrap();
    assert_eq!(fetched.total, dec("105"));
}

#[test]
fn confirm_is_idempotent() {
    let (db, fixtures) = common::setup_pool_with_fixtures();
    let ops = OrderOperations::new(db.pool.clone());

    let placed = sample_order("ORD001", &fixtures);
    ops.confirm_order(&placed).unwrap();
    ops.confirm_order(&placed).unwrap();

    assert_eq!(ops.list_all().unwrap().len(), 1);
}

#[test]
fn confirm_rejects_unknown_cafeteria() {
    let (db, fixtures) = common::setup_pool_with_fixtures();
    let ops = OrderOperations::new(db.pool.clone());

    let mut placed = sample_order("ORD001", &fixtures);
    placed.cafeteria_id = 9999;
    let err = ops.confirm_order(&placed).unwrap_err();
    assert!(matches!(err, RepositoryError::ReferenceNotFound(_)));
}

#[test]
fn confirm_rejects_amounts_that_do_not_add_up() {
    let (db, fixtures) = common::setup_pool_with_fixtures();
    let ops = OrderOperations::new(db.pool.clone());

    let mut placed = sample_order("ORD001", &fixtures);
    placed.total = dec("999");
    let err = ops.confirm_order(&placed).unwrap_err();
    assert!(matches!(err, RepositoryError::ValidationError(_)));
}

#[test]
fn confirm_rejects_malformed_order_ids() {
    let (db, fixtures) = common::setup_pool_with_fixtures();
    let ops = OrderOperations::new(db.pool.clone());

    let placed = sample_order("ORDER-42", &fixtures);
    let err = ops.confirm_order(&placed).unwrap_err();
    assert!(matches!(err, RepositoryError::ValidationError(_)));
}

#[test]
fn records_payment_success_with_correlation_fields() {
    let (db, fixtures) = common::setup_pool_with_fixtures();
    let ops = OrderOperations::new(db.pool.clone());

    ops.confirm_order(&sample_order("ORD001", &fixtures))
        .unwrap();

    let correlation = PaymentCorrelation {
        razorpay_order_id: "order_ABC".to_string(),
        razorpay_payment_id: "pay_XYZ".to_string(),
        razorpay_signature: "deadbeef".to_string(),
    };
    let view = ops.record_payment_success("ORD001", &correlation).unwrap();
    assert_eq!(view.payment_status, "paid");

    // Replays of the same confirmation change nothing.
    let again = ops.record_payment_success("ORD001", &correlation).unwrap();
    assert_eq!(again.payment_status, "paid");
    assert_eq!(ops.list_all().unwrap().len(), 1);

    let missing = ops.record_payment_success("ORD999", &correlation);
    assert!(matches!(missing, Err(RepositoryError::NotFound(_))));
}

#[test]
fn records_payment_failure_without_requiring_the_order() {
    let (db, fixtures) = common::setup_pool_with_fixtures();
    let ops = OrderOperations::new(db.pool.clone());

    ops.confirm_order(&sample_order("ORD001", &fixtures))
        .unwrap();
    ops.record_payment_failure("ORD001", "bad-signature").unwrap();
    let view = ops.get_by_order_id("ORD001").unwrap();
    assert_eq!(view.payment_status, "failed");

    // Unknown ids are silently ignored.
    ops.record_payment_failure("ORD404", "bad-signature").unwrap();
}

#[test]
fn status_moves_forward_but_never_backward() {
    let (db, fixtures) = common::setup_pool_with_fixtures();
    let ops = OrderOperations::new(db.pool.clone());

    ops.confirm_order(&sample_order("ORD001", &fixtures))
        .unwrap();

    let view = ops.advance_status("ORD001", "preparing").unwrap();
    assert_eq!(view.order_status, "preparing");
    let view = ops.advance_status("ORD001", "ready").unwrap();
    assert_eq!(view.order_status, "ready");
    let view = ops.advance_status("ORD001", "delivered").unwrap();
    assert_eq!(view.order_status, "delivered");

    let backward = ops.advance_status("ORD001", "preparing");
    assert!(matches!(backward, Err(RepositoryError::ValidationError(_))));
}

#[test]
fn delivered_orders_are_stored_as_completed() {
    let (db, fixtures) = common::setup_pool_with_fixtures();
    let ops = OrderOperations::new(db.pool.clone());

    ops.confirm_order(&sample_order("ORD001", &fixtures))
        .unwrap();
    ops.advance_status("ORD001", "delivered").unwrap();

    use mealdesk::db::schema::orders::dsl::*;
    let mut conn = db.pool.get().unwrap();
    let stored: String = orders
        .filter(order_id.eq("ORD001"))
        .select(order_status)
        .first(&mut conn)
        .unwrap();
    assert_eq!(stored, "completed");

    // The wire value stays "delivered".
    let view = ops.get_by_order_id("ORD001").unwrap();
    assert_eq!(view.order_status, "delivered");
}

#[test]
fn rejects_unknown_statuses_and_orders() {
    let (db, fixtures) = common::setup_pool_with_fixtures();
    let ops = OrderOperations::new(db.pool.clone());

    ops.confirm_order(&sample_order("ORD001", &fixtures))
        .unwrap();

    let unknown_status = ops.advance_status("ORD001", "teleported");
    assert!(matches!(
        unknown_status,
        Err(RepositoryError::InvalidStatus(_))
    ));

    let unknown_order = ops.advance_status("ORD999", "preparing");
    assert!(matches!(unknown_order, Err(RepositoryError::NotFound(_))));
}

#[test]
fn corrupt_cart_blob_degrades_to_an_empty_cart() {
    let (db, fixtures) = common::setup_pool_with_fixtures();
    let ops = OrderOperations::new(db.pool.clone());

    ops.confirm_order(&sample_order("ORD001", &fixtures))
        .unwrap();
    {
        use mealdesk::db::schema::orders::dsl::*;
        let mut conn = db.pool.get().unwrap();
        diesel::update(orders.filter(order_id.eq("ORD001")))
            .set(cart.eq("{not json"))
            .execute(&mut conn)
            .unwrap();
    }

    let view = ops.get_by_order_id("ORD001").unwrap();
    assert!(view.cart.is_empty());
    assert_eq!(view.total, dec("105"));
}

#[test]
fn lists_orders_for_one_employee_newest_first() {
    let (db, fixtures) = common::setup_pool_with_fixtures();
    let ops = OrderOperations::new(db.pool.clone());

    ops.confirm_order(&sample_order("ORD001", &fixtures))
        .unwrap();
    ops.confirm_order(&sample_order("ORD002", &fixtures))
        .unwrap();
    let mut other = sample_order("ORD003", &fixtures);
    other.employee_id = "SOMEONE_ELSE".to_string();
    ops.confirm_order(&other).unwrap();

    let mine = ops.list_by_employee(&fixtures.employee_id).unwrap();
    assert_eq!(mine.len(), 2);
    assert_eq!(mine[0].order_id, "ORD002");
    assert_eq!(mine[1].order_id, "ORD001");

    assert_eq!(ops.list_all().unwrap().len(), 3);
}
