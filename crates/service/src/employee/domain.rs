use common::utils::lenient;
use serde::{Deserialize, Serialize};

pub use models::employee::Gender;

/// Employee as exposed to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: i32,
    pub name: String,
    pub age: i32,
    pub gender: Gender,
    pub salary: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_id: Option<i32>,
}

impl From<models::employee::Model> for Employee {
    fn from(m: models::employee::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            age: m.age,
            gender: m.gender,
            salary: m.salary,
            company_id: m.company_id,
        }
    }
}

/// Create input; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEmployee {
    pub name: String,
    #[serde(deserialize_with = "lenient::number")]
    pub age: i32,
    pub gender: Gender,
    #[serde(deserialize_with = "lenient::number")]
    pub salary: f64,
    #[serde(default, deserialize_with = "lenient::optional_number")]
    pub company_id: Option<i32>,
}

/// Partial update: absent or null fields keep the stored value.
/// An `id` in the payload is ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeePatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_number")]
    pub age: Option<i32>,
    #[serde(default)]
    pub gender: Option<Gender>,
    #[serde(default, deserialize_with = "lenient::optional_number")]
    pub salary: Option<f64>,
    #[serde(default, deserialize_with = "lenient::optional_number")]
    pub company_id: Option<i32>,
}

impl EmployeePatch {
    /// Merge the set fields over `current`. The id is never touched.
    pub fn apply(self, current: Employee) -> Employee {
        Employee {
            id: current.id,
            name: self.name.unwrap_or(current.name),
            age: self.age.unwrap_or(current.age),
            gender: self.gender.unwrap_or(current.gender),
            salary: self.salary.unwrap_or(current.salary),
            company_id: self.company_id.or(current.company_id),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.age.is_none()
            && self.gender.is_none()
            && self.salary.is_none()
            && self.company_id.is_none()
    }
}
