#[macro_use]
extern crate log;

pub mod api;
pub mod auth;
pub mod db;
pub mod enums;
pub mod models;
pub mod payment;
pub mod services;
pub mod test_utils;

use std::sync::Arc;

use crate::auth::AuthConfig;
use crate::db::{
    establish_connection_pool, run_db_migrations, CatalogOperations, EmployeeOperations,
    OrderOperations,
};
use crate::payment::PaymentGate;
use crate::services::{LogMailer, ResetMailer};

#[derive(Clone)]
pub struct AppState {
    pub order_ops: OrderOperations,
    pub catalog_ops: CatalogOperations,
    pub employee_ops: EmployeeOperations,
    pub payment_gate: PaymentGate,
    pub auth_cfg: AuthConfig,
    pub mailer: Arc<dyn ResetMailer + Send + Sync>,
}

impl AppState {
    pub fn new(url: &str) -> Self {
        let db = establish_connection_pool(url);
        run_db_migrations(db.clone()).expect("Unable to run migrations");

        AppState {
            order_ops: OrderOperations::new(db.clone()),
            catalog_ops: CatalogOperations::new(db.clone()),
            employee_ops: EmployeeOperations::new(db),
            payment_gate: PaymentGate::from_env(),
            auth_cfg: AuthConfig::from_env(),
            mailer: Arc::new(LogMailer),
        }
    }
}
