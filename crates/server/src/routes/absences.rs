use axum::{extract::State, http::StatusCode, Json};
use common::types::DataResponse;
use models::{Absence, AbsenceInput};
use tracing::info;

use crate::errors::JsonApiError;
use crate::extract::ApiJson;
use crate::state::ServerState;

pub async fn list(State(state): State<ServerState>) -> Result<Json<DataResponse<Vec<Absence>>>, JsonApiError> {
    let absences = state.stores.absences.get_all().await?;
    Ok(Json(DataResponse::new(absences)))
}

/// Record an absence. Dates on the holiday calendar are refused before
/// anything is written.
pub async fn create(
    State(state): State<ServerState>,
    ApiJson(input): ApiJson<AbsenceInput>,
) -> Result<(StatusCode, Json<DataResponse<Absence>>), JsonApiError> {
    input.validate()?;
    if let Err(e) = state.holidays.ensure_not_holiday(input.absence_date) {
        info!(employee_id = input.employee_id, date = %input.absence_date, "absence on holiday rejected");
        return Err(e.into());
    }
    let created = state.stores.absences.create(input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse::new(created))))
}
