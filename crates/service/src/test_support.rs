#![cfg(test)]
use std::sync::Arc;

use chrono::NaiveDate;
use models::{Employee, VacationInput};

use crate::storage::memory::MemoryStorage;
use crate::Stores;

/// Fresh stores over an empty in-memory storage. The storage handle is
/// returned too so tests can inspect raw keys or inject write failures.
pub fn memory_stores() -> (Arc<MemoryStorage>, Stores) {
    let storage = MemoryStorage::new();
    let stores = Stores::new(storage.clone());
    (storage, stores)
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
}

/// A booking for `employee` with its current name/color snapshot.
pub fn vacation_for(employee: &Employee, work_days: u32) -> VacationInput {
    VacationInput {
        employee_id: employee.id,
        employee_name: employee.name.clone(),
        employee_color: employee.color.clone(),
        start_date: date(2026, 8, 3),
        end_date: date(2026, 8, 3 + work_days.saturating_sub(1).min(27)),
        work_days,
    }
}
