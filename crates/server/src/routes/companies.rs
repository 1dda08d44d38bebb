use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use service::company::{Company, CompanyPatch, NewCompany};
use service::employee::Employee;
use service::pagination::PageRequest;
use tracing::info;

use crate::{errors::JsonApiError, state::AppState};

#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    pub page_index: Option<i64>,
    pub page_size: Option<i64>,
}

#[utoipa::path(
    get, path = "/companies", tag = "companies",
    params(PageQuery),
    responses(
        (status = 200, description = "Companies with their employees", body = [crate::openapi::CompanyDoc]),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn list(
    State(state): State<AppState>,
    Query(q): Query<PageQuery>,
) -> Result<Json<Vec<Company>>, JsonApiError> {
    let list = match PageRequest::from_query(q.page_index, q.page_size)? {
        Some(page) => state.companies.page(page).await?,
        None => state.companies.find_all().await?,
    };
    info!(count = list.len(), "list companies");
    Ok(Json(list))
}

#[utoipa::path(
    get, path = "/companies/{id}", tag = "companies",
    params(("id" = i32, Path, description = "Company id")),
    responses(
        (status = 200, description = "Found", body = crate::openapi::CompanyDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn get(State(state): State<AppState>, Path(id): Path<i32>) -> Result<Json<Company>, JsonApiError> {
    match state.companies.find_by_id(id).await? {
        Some(c) => Ok(Json(c)),
        None => Err(JsonApiError::new(StatusCode::NOT_FOUND, "Not Found", Some(format!("company {id} not found")))),
    }
}

/// An unknown company has no employees; this never answers 404.
#[utoipa::path(
    get, path = "/companies/{id}/employees", tag = "companies",
    params(("id" = i32, Path, description = "Company id")),
    responses((status = 200, description = "Employees of the company", body = [crate::openapi::EmployeeDoc]))
)]
pub async fn employees(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Vec<Employee>>, JsonApiError> {
    Ok(Json(state.companies.get_employees_by_company_id(id).await?))
}

#[utoipa::path(
    post, path = "/companies", tag = "companies",
    request_body = crate::openapi::NewCompanyDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::CompanyDoc),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<NewCompany>,
) -> Result<(StatusCode, Json<Company>), JsonApiError> {
    let created = state.companies.create(input).await?;
    info!(id = created.id, employees = created.employees.len(), "company created");
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    put, path = "/companies/{id}", tag = "companies",
    params(("id" = i32, Path, description = "Company id")),
    request_body = crate::openapi::CompanyPatchDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::CompanyDoc),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(patch): Json<CompanyPatch>,
) -> Result<Json<Company>, JsonApiError> {
    Ok(Json(state.companies.update(id, patch).await?))
}

#[utoipa::path(
    delete, path = "/companies/{id}", tag = "companies",
    params(("id" = i32, Path, description = "Company id")),
    responses(
        (status = 204, description = "Deleted; its employees are kept without a company"),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn delete(State(state): State<AppState>, Path(id): Path<i32>) -> Result<StatusCode, JsonApiError> {
    state.companies.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
