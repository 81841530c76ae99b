use std::sync::Arc;

use models::{Employee, EmployeeId, EmployeeInput, EmployeePatch, Vacation};
use tracing::{debug, info};

use crate::collections::{Batch, Collections};
use crate::errors::ServiceError;
use crate::storage::keys;

/// Employee records and their vacation balances.
#[derive(Clone)]
pub struct EmployeeStore {
    collections: Arc<Collections>,
}

impl EmployeeStore {
    pub fn new(collections: Arc<Collections>) -> Self { Self { collections } }

    /// All employees. An empty collection is seeded with the example
    /// employee, which is persisted before being returned.
    pub async fn get_all(&self) -> Result<Vec<Employee>, ServiceError> {
        let employees: Vec<Employee> = self.collections.load(keys::EMPLOYEES).await?;
        if !employees.is_empty() {
            debug!(count = employees.len(), "employees loaded");
            return Ok(employees);
        }

        let _guard = self.collections.lock().await;
        // another writer may have filled the collection while we waited
        let employees: Vec<Employee> = self.collections.load(keys::EMPLOYEES).await?;
        if !employees.is_empty() {
            return Ok(employees);
        }
        let seeded = vec![Employee::seed()];
        self.collections.commit(Batch::new().put(keys::EMPLOYEES, &seeded)?).await?;
        info!(employee_id = seeded[0].id, "empty employee store seeded");
        Ok(seeded)
    }

    /// Employee by id. Does not seed.
    pub async fn get(&self, id: EmployeeId) -> Result<Option<Employee>, ServiceError> {
        let employees: Vec<Employee> = self.collections.load(keys::EMPLOYEES).await?;
        Ok(employees.into_iter().find(|e| e.id == id))
    }

    /// Append a new employee with a fresh id and `used = 0`.
    pub async fn create(&self, input: EmployeeInput) -> Result<Employee, ServiceError> {
        let _guard = self.collections.lock().await;
        let mut employees: Vec<Employee> = self.collections.load(keys::EMPLOYEES).await?;
        let id = self.collections.next_id(|c| employees.iter().any(|e| e.id == c));
        let employee = Employee::from_input(id, input);
        employees.push(employee.clone());
        self.collections.commit(Batch::new().put(keys::EMPLOYEES, &employees)?).await?;
        info!(employee_id = id, name = %employee.name, role = %employee.role, "employee created");
        Ok(employee)
    }

    /// Merge `patch` onto the employee. `None` when no employee has this id,
    /// in which case nothing is written.
    pub async fn update(&self, id: EmployeeId, patch: EmployeePatch) -> Result<Option<Employee>, ServiceError> {
        let _guard = self.collections.lock().await;
        let mut employees: Vec<Employee> = self.collections.load(keys::EMPLOYEES).await?;
        let Some(employee) = employees.iter_mut().find(|e| e.id == id) else {
            debug!(employee_id = id, "update of unknown employee ignored");
            return Ok(None);
        };
        employee.apply(patch);
        let updated = employee.clone();
        self.collections.commit(Batch::new().put(keys::EMPLOYEES, &employees)?).await?;
        info!(employee_id = id, "employee updated");
        Ok(Some(updated))
    }

    /// Remove the employee and every vacation booked for it, in one commit.
    /// Absences are left in place. Returns whether the employee existed; the
    /// vacation cleanup runs either way.
    pub async fn delete(&self, id: EmployeeId) -> Result<bool, ServiceError> {
        let _guard = self.collections.lock().await;
        let mut employees: Vec<Employee> = self.collections.load(keys::EMPLOYEES).await?;
        let mut vacations: Vec<Vacation> = self.collections.load(keys::VACATIONS).await?;

        let before = employees.len();
        employees.retain(|e| e.id != id);
        let existed = employees.len() != before;

        let booked = vacations.len();
        vacations.retain(|v| v.employee_id != id);
        let cascaded = booked - vacations.len();

        let batch = Batch::new()
            .put(keys::EMPLOYEES, &employees)?
            .put(keys::VACATIONS, &vacations)?;
        self.collections.commit(batch).await?;
        info!(employee_id = id, existed, vacations_removed = cascaded, "employee deleted");
        Ok(existed)
    }
}
