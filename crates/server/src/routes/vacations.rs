use axum::{extract::State, http::StatusCode, Json};
use chrono::NaiveDate;
use common::types::{DataResponse, SuccessResponse};
use models::{vacation, EmployeeId, Vacation, VacationId, VacationInput};
use serde::Deserialize;
use service::stores::BalanceCorrection;

use crate::errors::JsonApiError;
use crate::extract::{ApiJson, ApiPath};
use crate::state::ServerState;

/// Booking request. Same fields as a stored vacation; `work_days` may be
/// omitted, in which case it is counted from the date range.
#[derive(Debug, Deserialize)]
pub struct BookVacation {
    #[serde(deserialize_with = "models::ids::lenient_id")]
    pub employee_id: EmployeeId,
    pub employee_name: String,
    pub employee_color: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default, deserialize_with = "models::ids::lenient_count_opt")]
    pub work_days: Option<u32>,
}

pub async fn list(State(state): State<ServerState>) -> Result<Json<DataResponse<Vec<Vacation>>>, JsonApiError> {
    let vacations = state.stores.vacations.get_all().await?;
    Ok(Json(DataResponse::new(vacations)))
}

pub async fn create(
    State(state): State<ServerState>,
    ApiJson(req): ApiJson<BookVacation>,
) -> Result<(StatusCode, Json<DataResponse<Vacation>>), JsonApiError> {
    vacation::validate_range(req.start_date, req.end_date)?;
    let work_days = req
        .work_days
        .unwrap_or_else(|| state.holidays.work_days(req.start_date, req.end_date));
    let input = VacationInput {
        employee_id: req.employee_id,
        employee_name: req.employee_name,
        employee_color: req.employee_color,
        start_date: req.start_date,
        end_date: req.end_date,
        work_days,
    };
    input.validate()?;
    let created = state.stores.vacations.create(input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse::new(created))))
}

/// Cancel a booking and give the days back to the employee.
pub async fn delete(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<VacationId>,
) -> Result<Json<SuccessResponse>, JsonApiError> {
    if state.stores.vacations.delete(id).await? {
        Ok(Json(SuccessResponse::ok()))
    } else {
        Err(JsonApiError::not_found("vacation"))
    }
}

pub async fn reconcile(
    State(state): State<ServerState>,
) -> Result<Json<DataResponse<Vec<BalanceCorrection>>>, JsonApiError> {
    let corrections = state.stores.vacations.reconcile().await?;
    Ok(Json(DataResponse::new(corrections)))
}
