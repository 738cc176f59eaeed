#[derive(Clone, Debug)]
pub enum Principal {
    Employee { employee_id: String },
    Admin { employee_id: String },
}

impl Principal {
    pub fn employee_id(&self) -> &str {
        match self {
            Principal::Employee { employee_id } => employee_id,
            Principal::Admin { employee_id } => employee_id,
        }
    }

    pub fn role(&self) -> &'static str {
        match self {
            Principal::Employee { .. } => crate::models::employee::ROLE_EMPLOYEE,
            Principal::Admin { .. } => crate::models::employee::ROLE_ADMIN,
        }
    }
}
