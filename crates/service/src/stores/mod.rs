//! The three record stores. All of them share one `Collections`, so they see
//! the same storage, id generator and write lock.

pub mod employee;
pub mod vacation;
pub mod absence;

use std::sync::Arc;

use crate::collections::Collections;
use crate::storage::KvStorage;

pub use absence::AbsenceStore;
pub use employee::EmployeeStore;
pub use vacation::{Balance, BalanceCorrection, VacationStore};

#[derive(Clone)]
pub struct Stores {
    pub employees: EmployeeStore,
    pub vacations: VacationStore,
    pub absences: AbsenceStore,
}

impl Stores {
    pub fn new(storage: Arc<dyn KvStorage>) -> Self {
        let collections = Collections::new(storage);
        Self {
            employees: EmployeeStore::new(Arc::clone(&collections)),
            vacations: VacationStore::new(Arc::clone(&collections)),
            absences: AbsenceStore::new(collections),
        }
    }
}
