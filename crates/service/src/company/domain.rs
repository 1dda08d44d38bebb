use common::utils::lenient;
use serde::{Deserialize, Serialize};

use crate::employee::{Employee, Gender};

/// Company with its employees in store order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub id: i32,
    pub name: String,
    pub employees: Vec<Employee>,
}

impl Company {
    pub fn from_parts(company: models::company::Model, employees: Vec<models::employee::Model>) -> Self {
        Self {
            id: company.id,
            name: company.name,
            employees: employees.into_iter().map(Employee::from).collect(),
        }
    }
}

/// Entry of a company's employee list. With an `id` it refers to an
/// existing employee whose fields are overwritten; without one a new
/// employee is created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyEmployee {
    #[serde(default, deserialize_with = "lenient::optional_number")]
    pub id: Option<i32>,
    pub name: String,
    #[serde(deserialize_with = "lenient::number")]
    pub age: i32,
    pub gender: Gender,
    #[serde(deserialize_with = "lenient::number")]
    pub salary: f64,
}

impl From<Employee> for CompanyEmployee {
    fn from(e: Employee) -> Self {
        Self { id: Some(e.id), name: e.name, age: e.age, gender: e.gender, salary: e.salary }
    }
}

/// Nested employees are created with the company; entries carrying an
/// `id` are rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCompany {
    pub name: String,
    #[serde(default)]
    pub employees: Vec<CompanyEmployee>,
}

/// Partial update: an absent `name` or `employees` keeps the stored value.
/// A present `employees` list replaces the company's current list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub employees: Option<Vec<CompanyEmployee>>,
}
