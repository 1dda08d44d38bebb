use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct ErrorDoc { pub error: String, pub message: Option<String> }

#[derive(ToSchema)]
#[schema(rename_all = "UPPERCASE")]
pub enum GenderDoc { Male, Female }

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct EmployeeDoc {
    pub id: i32,
    pub name: String,
    pub age: i32,
    pub gender: GenderDoc,
    pub salary: f64,
    pub company_id: Option<i32>,
}

/// Numbers may also be sent as numeric strings.
#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct NewEmployeeDoc {
    pub name: String,
    pub age: i32,
    pub gender: GenderDoc,
    pub salary: f64,
    pub company_id: Option<i32>,
}

/// Every field is optional; absent or null keeps the stored value.
#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct EmployeePatchDoc {
    pub name: Option<String>,
    pub age: Option<i32>,
    pub gender: Option<GenderDoc>,
    pub salary: Option<f64>,
    pub company_id: Option<i32>,
}

/// Without `id` a new employee is created.
#[derive(ToSchema)]
pub struct CompanyEmployeeDoc {
    pub id: Option<i32>,
    pub name: String,
    pub age: i32,
    pub gender: GenderDoc,
    pub salary: f64,
}

#[derive(ToSchema)]
pub struct CompanyDoc {
    pub id: i32,
    pub name: String,
    pub employees: Vec<EmployeeDoc>,
}

/// Employees listed here must not carry an `id`.
#[derive(ToSchema)]
pub struct NewCompanyDoc {
    pub name: String,
    pub employees: Option<Vec<CompanyEmployeeDoc>>,
}

/// A present `employees` list replaces the current one.
#[derive(ToSchema)]
pub struct CompanyPatchDoc {
    pub name: Option<String>,
    pub employees: Option<Vec<CompanyEmployeeDoc>>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::employees::list,
        crate::routes::employees::get,
        crate::routes::employees::create,
        crate::routes::employees::update,
        crate::routes::employees::delete,
        crate::routes::companies::list,
        crate::routes::companies::get,
        crate::routes::companies::employees,
        crate::routes::companies::create,
        crate::routes::companies::update,
        crate::routes::companies::delete,
    ),
    components(
        schemas(
            HealthResponse,
            ErrorDoc,
            GenderDoc,
            EmployeeDoc,
            NewEmployeeDoc,
            EmployeePatchDoc,
            CompanyEmployeeDoc,
            CompanyDoc,
            NewCompanyDoc,
            CompanyPatchDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "employees"),
        (name = "companies")
    )
)]
pub struct ApiDoc;
