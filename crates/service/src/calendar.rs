//! Projection of bookings into the event feed the calendar widget renders.

use chrono::NaiveDate;
use models::{Vacation, VacationId};
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub id: VacationId,
    pub title: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub background_color: String,
    pub border_color: String,
    pub all_day: bool,
}

impl From<&Vacation> for CalendarEvent {
    fn from(v: &Vacation) -> Self {
        Self {
            id: v.id,
            title: v.employee_name.clone(),
            start: v.start_date,
            end: v.end_date,
            background_color: v.employee_color.clone(),
            border_color: v.employee_color.clone(),
            all_day: true,
        }
    }
}

pub fn calendar_events(vacations: &[Vacation]) -> Vec<CalendarEvent> {
    vacations.iter().map(CalendarEvent::from).collect()
}
