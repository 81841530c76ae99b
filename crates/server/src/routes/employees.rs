use axum::{extract::State, http::StatusCode, Json};
use common::types::{DataResponse, SuccessResponse};
use models::{Employee, EmployeeId, EmployeeInput, EmployeePatch};
use service::stores::Balance;

use crate::errors::JsonApiError;
use crate::extract::{ApiJson, ApiPath};
use crate::state::ServerState;

/// List employees; seeds the example employee on an empty store.
pub async fn list(State(state): State<ServerState>) -> Result<Json<DataResponse<Vec<Employee>>>, JsonApiError> {
    let employees = state.stores.employees.get_all().await?;
    Ok(Json(DataResponse::new(employees)))
}

pub async fn create(
    State(state): State<ServerState>,
    ApiJson(input): ApiJson<EmployeeInput>,
) -> Result<(StatusCode, Json<DataResponse<Employee>>), JsonApiError> {
    input.validate()?;
    let created = state.stores.employees.create(input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse::new(created))))
}

pub async fn get(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<EmployeeId>,
) -> Result<Json<DataResponse<Employee>>, JsonApiError> {
    match state.stores.employees.get(id).await? {
        Some(employee) => Ok(Json(DataResponse::new(employee))),
        None => Err(JsonApiError::not_found("employee")),
    }
}

pub async fn update(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<EmployeeId>,
    ApiJson(patch): ApiJson<EmployeePatch>,
) -> Result<Json<SuccessResponse>, JsonApiError> {
    patch.validate()?;
    match state.stores.employees.update(id, patch).await? {
        Some(_) => Ok(Json(SuccessResponse::ok())),
        None => Err(JsonApiError::not_found("employee")),
    }
}

/// Delete an employee together with its vacations.
pub async fn delete(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<EmployeeId>,
) -> Result<Json<SuccessResponse>, JsonApiError> {
    if state.stores.employees.delete(id).await? {
        Ok(Json(SuccessResponse::ok()))
    } else {
        Err(JsonApiError::not_found("employee"))
    }
}

pub async fn balance(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<EmployeeId>,
) -> Result<Json<DataResponse<Balance>>, JsonApiError> {
    match state.stores.vacations.balance(id).await? {
        Some(balance) => Ok(Json(DataResponse::new(balance))),
        None => Err(JsonApiError::not_found("employee")),
    }
}
