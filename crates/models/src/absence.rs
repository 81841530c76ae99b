use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::ids::{lenient_id, AbsenceId, EmployeeId};

/// A recorded absence. Does not touch the vacation balance and is never
/// edited or removed once written.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Absence {
    #[serde(deserialize_with = "lenient_id")]
    pub id: AbsenceId,
    #[serde(deserialize_with = "lenient_id")]
    pub employee_id: EmployeeId,
    pub employee_name: String,
    pub absence_date: NaiveDate,
    pub reason: String,
}

impl Absence {
    pub fn from_input(id: AbsenceId, input: AbsenceInput) -> Self {
        Self {
            id,
            employee_id: input.employee_id,
            employee_name: input.employee_name,
            absence_date: input.absence_date,
            reason: input.reason,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbsenceInput {
    #[serde(deserialize_with = "lenient_id")]
    pub employee_id: EmployeeId,
    pub employee_name: String,
    pub absence_date: NaiveDate,
    pub reason: String,
}

impl AbsenceInput {
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.reason.trim().is_empty() {
            return Err(ModelError::Validation("reason required".into()));
        }
        Ok(())
    }
}
