pub mod config;
pub mod extractors;
pub mod jwt;
pub mod middleware;
pub mod principal;

pub use config::AuthConfig;
pub use extractors::{AdminPrincipal, EmployeePrincipal, PrincipalExtractor};
pub use middleware::AuthLayer;
pub use principal::Principal;
