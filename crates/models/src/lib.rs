//! Record types shared by the stores and the HTTP layer.
//!
//! Field names follow the JSON layout already persisted by deployed
//! browsers, so existing data loads unchanged.

pub mod errors;
pub mod ids;
pub mod employee;
pub mod vacation;
pub mod absence;

pub use absence::{Absence, AbsenceInput};
pub use employee::{Employee, EmployeeInput, EmployeePatch, Role};
pub use ids::{AbsenceId, EmployeeId, VacationId};
pub use vacation::{Vacation, VacationInput};
