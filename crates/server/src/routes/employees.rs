use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use service::employee::{Employee, EmployeePatch, Gender, NewEmployee};
use service::pagination::PageRequest;
use tracing::info;

use crate::{errors::JsonApiError, state::AppState};

#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct EmployeeQuery {
    /// MALE or FEMALE
    #[param(value_type = Option<String>, example = "FEMALE")]
    pub gender: Option<Gender>,
    /// 1-based page number
    pub page_index: Option<i64>,
    pub page_size: Option<i64>,
}

#[utoipa::path(
    get, path = "/employees", tag = "employees",
    params(EmployeeQuery),
    responses(
        (status = 200, description = "Employees ordered by id", body = [crate::openapi::EmployeeDoc]),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn list(
    State(state): State<AppState>,
    Query(q): Query<EmployeeQuery>,
) -> Result<Json<Vec<Employee>>, JsonApiError> {
    let page = PageRequest::from_query(q.page_index, q.page_size)?;
    let list = match (q.gender, page) {
        (gender, Some(page)) => state.employees.page(gender, page).await?,
        (Some(gender), None) => state.employees.find_by_gender(gender).await?,
        (None, None) => state.employees.find_all().await?,
    };
    info!(count = list.len(), "list employees");
    Ok(Json(list))
}

#[utoipa::path(
    get, path = "/employees/{id}", tag = "employees",
    params(("id" = i32, Path, description = "Employee id")),
    responses(
        (status = 200, description = "Found", body = crate::openapi::EmployeeDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn get(State(state): State<AppState>, Path(id): Path<i32>) -> Result<Json<Employee>, JsonApiError> {
    match state.employees.find_by_id(id).await? {
        Some(e) => Ok(Json(e)),
        None => Err(JsonApiError::new(StatusCode::NOT_FOUND, "Not Found", Some(format!("employee {id} not found")))),
    }
}

#[utoipa::path(
    post, path = "/employees", tag = "employees",
    request_body = crate::openapi::NewEmployeeDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::EmployeeDoc),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<NewEmployee>,
) -> Result<(StatusCode, Json<Employee>), JsonApiError> {
    let created = state.employees.create(input).await?;
    info!(id = created.id, "employee created");
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    put, path = "/employees/{id}", tag = "employees",
    params(("id" = i32, Path, description = "Employee id")),
    request_body = crate::openapi::EmployeePatchDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::EmployeeDoc),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(patch): Json<EmployeePatch>,
) -> Result<Json<Employee>, JsonApiError> {
    let updated = state.employees.update(id, patch).await?;
    Ok(Json(updated))
}

#[utoipa::path(
    delete, path = "/employees/{id}", tag = "employees",
    params(("id" = i32, Path, description = "Employee id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn delete(State(state): State<AppState>, Path(id): Path<i32>) -> Result<StatusCode, JsonApiError> {
    state.employees.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
