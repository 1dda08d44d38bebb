pub mod domain;
pub mod repository;
pub mod service;

pub use domain::{Employee, EmployeePatch, Gender, NewEmployee};
pub use repository::{EmployeeRepository, SeaOrmEmployeeRepository};
pub use service::EmployeeService;
