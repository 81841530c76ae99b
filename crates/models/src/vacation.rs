use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::ids::{lenient_count, lenient_id, EmployeeId, VacationId};

/// A booked vacation period.
///
/// `employee_name` and `employee_color` are copied from the employee at
/// booking time and are not refreshed when the employee changes later.
/// The date range is inclusive and informational; `work_days` is what
/// counts against the balance.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vacation {
    #[serde(deserialize_with = "lenient_id")]
    pub id: VacationId,
    #[serde(deserialize_with = "lenient_id")]
    pub employee_id: EmployeeId,
    pub employee_name: String,
    pub employee_color: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default, deserialize_with = "lenient_count")]
    pub work_days: u32,
}

impl Vacation {
    pub fn from_input(id: VacationId, input: VacationInput) -> Self {
        Self {
            id,
            employee_id: input.employee_id,
            employee_name: input.employee_name,
            employee_color: input.employee_color,
            start_date: input.start_date,
            end_date: input.end_date,
            work_days: input.work_days,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VacationInput {
    #[serde(deserialize_with = "lenient_id")]
    pub employee_id: EmployeeId,
    pub employee_name: String,
    pub employee_color: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default, deserialize_with = "lenient_count")]
    pub work_days: u32,
}

/// Longest bookable period, inclusive of both ends.
pub const MAX_VACATION_DAYS: i64 = 366;

/// Check an inclusive booking range: ordered and at most a year long.
pub fn validate_range(start: NaiveDate, end: NaiveDate) -> Result<(), ModelError> {
    if end < start {
        return Err(ModelError::Validation("end_date must not be before start_date".into()));
    }
    if (end - start).num_days() >= MAX_VACATION_DAYS {
        return Err(ModelError::Validation(format!(
            "vacation cannot span more than {MAX_VACATION_DAYS} days"
        )));
    }
    Ok(())
}

impl VacationInput {
    pub fn validate(&self) -> Result<(), ModelError> {
        validate_range(self.start_date, self.end_date)
    }
}
