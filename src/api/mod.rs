mod auth;
mod catalog;
mod employees;
mod errors;
mod orders;
mod payments;

use actix_web::{get, web, HttpResponse, Responder};
pub use errors::default_error_handler;

use crate::AppState;

#[get("/")]
async fn root_endpoint() -> impl Responder {
    HttpResponse::Ok().body("Server up!")
}

#[get("/health")]
async fn health() -> impl Responder {
    HttpResponse::Ok().body("ok")
}

pub fn configure(cfg: &mut web::ServiceConfig, state: &AppState) {
    cfg.service(root_endpoint)
        .service(health)
        .service(
            web::scope("/auth")
                .app_data(web::Data::new(state.employee_ops.clone()))
                .app_data(web::Data::new(state.catalog_ops.clone()))
                .app_data(web::Data::new(state.auth_cfg.clone()))
                .app_data(web::Data::new(state.mailer.clone()))
                .service(auth::register)
                .service(auth::login)
                .service(auth::forgot_password)
                .service(auth::reset_password)
                .service(auth::profile),
        )
        .service(
            web::scope("/orders")
                .app_data(web::Data::new(state.order_ops.clone()))
                .service(orders::confirm_order)
                .service(orders::my_orders)
                .service(orders::all_orders)
                .service(orders::public_order)
                .service(orders::update_order_status)
                .service(orders::place_order),
        )
        .service(
            web::scope("/payments")
                .app_data(web::Data::new(state.order_ops.clone()))
                .app_data(web::Data::new(state.payment_gate.clone()))
                .service(payments::verify_payment),
        )
        .service(
            web::scope("/menu")
                .app_data(web::Data::new(state.catalog_ops.clone()))
                .service(catalog::get_branches)
                .service(catalog::create_branch)
                .service(catalog::get_cafeterias)
                .service(catalog::create_cafeteria)
                .service(catalog::update_cafeteria)
                .service(catalog::delete_cafeteria)
                .service(catalog::get_menu_categories)
                .service(catalog::create_menu_category)
                .service(catalog::get_menu_items)
                .service(catalog::create_menu_item)
                .service(catalog::update_menu_item)
                .service(catalog::delete_menu_item),
        )
        .service(
            web::scope("/employees")
                .app_data(web::Data::new(state.employee_ops.clone()))
                .service(employees::import_employees)
                .service(employees::export_employees)
                .service(employees::employee_stats),
        );
}
