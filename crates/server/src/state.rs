use std::sync::Arc;

use sea_orm::DatabaseConnection;
use service::company::{CompanyService, SeaOrmCompanyRepository};
use service::employee::{EmployeeService, SeaOrmEmployeeRepository};

/// Shared handler state; cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub employees: Arc<EmployeeService<SeaOrmEmployeeRepository>>,
    pub companies: Arc<CompanyService<SeaOrmCompanyRepository>>,
}

impl AppState {
    pub fn new(db: DatabaseConnection) -> Self {
        let employees = EmployeeService::new(Arc::new(SeaOrmEmployeeRepository::new(db.clone())));
        let companies = CompanyService::new(Arc::new(SeaOrmCompanyRepository::new(db.clone())));
        Self { db, employees: Arc::new(employees), companies: Arc::new(companies) }
    }
}
