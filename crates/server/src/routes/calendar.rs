use axum::{extract::State, Json};
use chrono::NaiveDate;
use common::types::DataResponse;
use serde::Serialize;
use service::calendar::{calendar_events, CalendarEvent};

use crate::errors::JsonApiError;
use crate::state::ServerState;

#[derive(Debug, Serialize)]
pub struct HolidayList {
    pub year: i32,
    pub holidays: Vec<NaiveDate>,
}

/// Bookings as calendar widget events.
pub async fn events(State(state): State<ServerState>) -> Result<Json<DataResponse<Vec<CalendarEvent>>>, JsonApiError> {
    let vacations = state.stores.vacations.get_all().await?;
    Ok(Json(DataResponse::new(calendar_events(&vacations))))
}

pub async fn holidays(State(state): State<ServerState>) -> Json<DataResponse<HolidayList>> {
    let list = HolidayList {
        year: state.holidays.year(),
        holidays: state.holidays.holidays().copied().collect(),
    };
    Json(DataResponse::new(list))
}
