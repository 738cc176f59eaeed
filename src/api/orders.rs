use crate::api::errors::error_response;
use crate::auth::{AdminPrincipal, EmployeePrincipal};
use crate::db::{validate_order_pricing, OrderOperations};
use crate::enums::orders::{
    ConfirmOrderRequest, OrderResponse, OrdersResponse, PlaceOrderRequest, PlacedOrder,
    PlacedOrderResponse, UpdateStatusRequest,
};
use actix_web::{get, patch, post, web, HttpResponse, Responder};

#[utoipa::path(
    post,
    tag = "Orders",
    path = "/orders",
    request_body = PlaceOrderRequest,
    responses(
        (status = 200, description = "Order id allocated", body = PlacedOrderResponse),
        (status = 400, description = "Cart amounts do not add up"),
    ),
    summary = "Place an order and allocate its id"
)]
#[post("")]
pub(super) async fn place_order(
    order_ops: web::Data<OrderOperations>,
    principal: EmployeePrincipal,
    req_data: web::Json<PlaceOrderRequest>,
) -> impl Responder {
    let req_data = req_data.into_inner();
    if let Err(e) = validate_order_pricing(
        &req_data.cart,
        req_data.item_amount,
        req_data.cgst_amount,
        req_data.sgst_amount,
        req_data.total,
    ) {
        return error_response("place_order", e);
    }

    match order_ops.allocate_order_id() {
        Ok(new_order_id) => {
            info!(
                "place_order: allocated {} for employee {}",
                new_order_id,
                principal.employee_id()
            );
            HttpResponse::Ok().json(PlacedOrderResponse {
                success: true,
                order: PlacedOrder {
                    order_id: new_order_id,
                    employee_id: principal.employee_id().to_string(),
                    branch_id: req_data.branch_id,
                    cafeteria_id: req_data.cafeteria_id,
                    cart: req_data.cart,
                    item_amount: req_data.item_amount,
                    cgst_amount: req_data.cgst_amount,
                    sgst_amount: req_data.sgst_amount,
                    total: req_data.total,
                    qr_value: req_data.qr_value,
                    user_email: req_data.user_email,
                    user_name: req_data.user_name,
                },
            })
        }
        Err(e) => error_response("place_order", e),
    }
}

#[utoipa::path(
    post,
    tag = "Orders",
    path = "/orders/confirm",
    request_body = ConfirmOrderRequest,
    responses(
        (status = 201, description = "Order persisted", body = OrderResponse),
        (status = 400, description = "Malformed order or unknown branch/cafeteria"),
    ),
    summary = "Persist a placed order after checkout"
)]
#[post("/confirm")]
pub(super) async fn confirm_order(
    order_ops: web::Data<OrderOperations>,
    req_data: web::Json<ConfirmOrderRequest>,
) -> impl Responder {
    let placed = req_data.into_inner().order;
    match order_ops.confirm_order(&placed) {
        Ok(view) => {
            info!("confirm_order: stored {}", view.order_id);
            HttpResponse::Created().json(OrderResponse {
                success: true,
                message: Some("Order confirmed".to_string()),
                order: view,
            })
        }
        Err(e) => error_response("confirm_order", e),
    }
}

#[utoipa::path(
    patch,
    tag = "Orders",
    path = "/orders/{order_id}/status",
    params(("order_id", description = "Public order id, e.g. ORD042")),
    request_body = UpdateStatusRequest,
    responses(
        (status = 200, description = "Status updated", body = OrderResponse),
        (status = 400, description = "Unknown status or backward transition"),
        (status = 404, description = "No such order"),
    ),
    summary = "Advance an order through the kitchen workflow"
)]
#[patch("/{order_id}/status")]
pub(super) async fn update_order_status(
    order_ops: web::Data<OrderOperations>,
    _admin: AdminPrincipal,
    path: web::Path<(String,)>,
    req_data: web::Json<UpdateStatusRequest>,
) -> impl Responder {
    let search_order_id = path.into_inner().0;
    match order_ops.advance_status(&search_order_id, &req_data.order_status) {
        Ok(view) => {
            info!(
                "update_order_status: {} is now {}",
                search_order_id, view.order_status
            );
            HttpResponse::Ok().json(OrderResponse {
                success: true,
                message: None,
                order: view,
            })
        }
        Err(e) => error_response("update_order_status", e),
    }
}

#[utoipa::path(
    get,
    tag = "Orders",
    path = "/orders/mine",
    responses(
        (status = 200, description = "Orders for the authenticated employee", body = OrdersResponse),
    ),
    summary = "List the caller's orders, newest first"
)]
#[get("/mine")]
pub(super) async fn my_orders(
    order_ops: web::Data<OrderOperations>,
    principal: EmployeePrincipal,
) -> impl Responder {
    match order_ops.list_by_employee(principal.employee_id()) {
        Ok(views) => {
            debug!(
                "my_orders: {} orders for {}",
                views.len(),
                principal.employee_id()
            );
            HttpResponse::Ok().json(OrdersResponse {
                success: true,
                orders: views,
            })
        }
        Err(e) => error_response("my_orders", e),
    }
}

#[utoipa::path(
    get,
    tag = "Orders",
    path = "/orders/all",
    responses(
        (status = 200, description = "All orders, newest first", body = OrdersResponse),
    ),
    summary = "List every order"
)]
#[get("/all")]
pub(super) async fn all_orders(
    order_ops: web::Data<OrderOperations>,
    _admin: AdminPrincipal,
) -> impl Responder {
    match order_ops.list_all() {
        Ok(views) => HttpResponse::Ok().json(OrdersResponse {
            success: true,
            orders: views,
        }),
        Err(e) => error_response("all_orders", e),
    }
}

#[utoipa::path(
    get,
    tag = "Orders",
    path = "/orders/public/{order_id}",
    params(("order_id", description = "Public order id, e.g. ORD042")),
    responses(
        (status = 200, description = "Order found", body = OrderResponse),
        (status = 404, description = "No such order"),
    ),
    summary = "Fetch one order for status display boards"
)]
#[get("/public/{order_id}")]
pub(super) async fn public_order(
    order_ops: web::Data<OrderOperations>,
    path: web::Path<(String,)>,
) -> impl Responder {
    let search_order_id = path.into_inner().0;
    match order_ops.get_by_order_id(&search_order_id) {
        Ok(view) => HttpResponse::Ok().json(OrderResponse {
            success: true,
            message: None,
            order: view,
        }),
        Err(e) => error_response("public_order", e),
    }
}
