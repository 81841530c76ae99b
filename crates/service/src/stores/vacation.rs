use std::collections::HashMap;
use std::sync::Arc;

use models::{Employee, EmployeeId, Vacation, VacationId, VacationInput};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::collections::{Batch, Collections};
use crate::errors::ServiceError;
use crate::storage::keys;

/// Balance of one employee, with the value recomputed from bookings next to
/// the stored one so drift is visible.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Balance {
    pub employee_id: EmployeeId,
    pub total_days: u32,
    pub used: u32,
    pub remaining: u32,
    pub derived_used: u32,
}

/// An employee whose stored `used` was rewritten by `reconcile`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceCorrection {
    pub employee_id: EmployeeId,
    pub before: u32,
    pub after: u32,
}

/// Booked vacations. Booking and cancelling adjust the owning employee's
/// `used`; the vacation list and the employee list are written in the same
/// commit.
#[derive(Clone)]
pub struct VacationStore {
    collections: Arc<Collections>,
}

fn used_by_employee(vacations: &[Vacation]) -> HashMap<EmployeeId, u32> {
    let mut totals: HashMap<EmployeeId, u32> = HashMap::new();
    for v in vacations {
        let total = totals.entry(v.employee_id).or_default();
        *total = total.saturating_add(v.work_days);
    }
    totals
}

impl VacationStore {
    pub fn new(collections: Arc<Collections>) -> Self { Self { collections } }

    pub async fn get_all(&self) -> Result<Vec<Vacation>, ServiceError> {
        let vacations: Vec<Vacation> = self.collections.load(keys::VACATIONS).await?;
        debug!(count = vacations.len(), "vacations loaded");
        Ok(vacations)
    }

    pub async fn get(&self, id: VacationId) -> Result<Option<Vacation>, ServiceError> {
        let vacations: Vec<Vacation> = self.collections.load(keys::VACATIONS).await?;
        Ok(vacations.into_iter().find(|v| v.id == id))
    }

    /// Book a vacation and add its `work_days` to the employee's `used`.
    /// A booking for an unknown employee is stored without touching any balance.
    pub async fn create(&self, input: VacationInput) -> Result<Vacation, ServiceError> {
        let _guard = self.collections.lock().await;
        let mut vacations: Vec<Vacation> = self.collections.load(keys::VACATIONS).await?;
        let mut employees: Vec<Employee> = self.collections.load(keys::EMPLOYEES).await?;

        let id = self.collections.next_id(|c| vacations.iter().any(|v| v.id == c));
        let vacation = Vacation::from_input(id, input);
        vacations.push(vacation.clone());

        match employees.iter_mut().find(|e| e.id == vacation.employee_id) {
            Some(employee) => employee.used = employee.used.saturating_add(vacation.work_days),
            None => warn!(
                vacation_id = id,
                employee_id = vacation.employee_id,
                "vacation booked for unknown employee; no balance updated"
            ),
        }

        let batch = Batch::new()
            .put(keys::VACATIONS, &vacations)?
            .put(keys::EMPLOYEES, &employees)?;
        self.collections.commit(batch).await?;
        info!(
            vacation_id = id,
            employee_id = vacation.employee_id,
            work_days = vacation.work_days,
            start = %vacation.start_date,
            end = %vacation.end_date,
            "vacation booked"
        );
        Ok(vacation)
    }

    /// Cancel a vacation. The employee's `used` drops by its `work_days`,
    /// floored at zero. Returns whether the vacation existed.
    pub async fn delete(&self, id: VacationId) -> Result<bool, ServiceError> {
        let _guard = self.collections.lock().await;
        let mut vacations: Vec<Vacation> = self.collections.load(keys::VACATIONS).await?;
        let Some(pos) = vacations.iter().position(|v| v.id == id) else {
            debug!(vacation_id = id, "cancel of unknown vacation ignored");
            return Ok(false);
        };
        let cancelled = vacations.remove(pos);

        let mut employees: Vec<Employee> = self.collections.load(keys::EMPLOYEES).await?;
        match employees.iter_mut().find(|e| e.id == cancelled.employee_id) {
            Some(employee) => employee.used = employee.used.saturating_sub(cancelled.work_days),
            None => warn!(
                vacation_id = id,
                employee_id = cancelled.employee_id,
                "cancelled vacation has no employee; no balance updated"
            ),
        }

        let batch = Batch::new()
            .put(keys::VACATIONS, &vacations)?
            .put(keys::EMPLOYEES, &employees)?;
        self.collections.commit(batch).await?;
        info!(vacation_id = id, employee_id = cancelled.employee_id, work_days = cancelled.work_days, "vacation cancelled");
        Ok(true)
    }

    /// Stored and recomputed balance of one employee.
    pub async fn balance(&self, employee_id: EmployeeId) -> Result<Option<Balance>, ServiceError> {
        let _guard = self.collections.lock().await;
        let employees: Vec<Employee> = self.collections.load(keys::EMPLOYEES).await?;
        let Some(employee) = employees.into_iter().find(|e| e.id == employee_id) else {
            return Ok(None);
        };
        let vacations: Vec<Vacation> = self.collections.load(keys::VACATIONS).await?;
        let derived_used = used_by_employee(&vacations).get(&employee_id).copied().unwrap_or(0);
        Ok(Some(Balance {
            employee_id,
            total_days: employee.total_days,
            used: employee.used,
            remaining: employee.remaining_days(),
            derived_used,
        }))
    }

    /// Rewrite every employee's `used` as the sum of its bookings. Nothing is
    /// written when all balances already agree.
    pub async fn reconcile(&self) -> Result<Vec<BalanceCorrection>, ServiceError> {
        let _guard = self.collections.lock().await;
        let mut employees: Vec<Employee> = self.collections.load(keys::EMPLOYEES).await?;
        let vacations: Vec<Vacation> = self.collections.load(keys::VACATIONS).await?;
        let totals = used_by_employee(&vacations);

        let mut corrections = Vec::new();
        for employee in employees.iter_mut() {
            let derived = totals.get(&employee.id).copied().unwrap_or(0);
            if employee.used != derived {
                corrections.push(BalanceCorrection { employee_id: employee.id, before: employee.used, after: derived });
                employee.used = derived;
            }
        }

        if corrections.is_empty() {
            debug!("balances consistent; nothing to reconcile");
            return Ok(corrections);
        }
        self.collections.commit(Batch::new().put(keys::EMPLOYEES, &employees)?).await?;
        for c in &corrections {
            warn!(employee_id = c.employee_id, before = c.before, after = c.after, "employee balance corrected");
        }
        Ok(corrections)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use models::{EmployeeInput, Role};

    use crate::storage::KvStorage;
    use crate::test_support::{memory_stores, vacation_for};

    use super::*;

    async fn used_of(stores: &crate::Stores, id: EmployeeId) -> u32 {
        stores.employees.get(id).await.unwrap().unwrap().used
    }

    #[tokio::test]
    async fn booking_and_cancelling_scenario() -> Result<(), anyhow::Error> {
        let (_, stores) = memory_stores();
        let seed = stores.employees.get_all().await?.remove(0);
        assert_eq!((seed.used, seed.total_days), (0, 22));

        let first = stores.vacations.create(vacation_for(&seed, 5)).await?;
        assert_eq!(used_of(&stores, seed.id).await, 5);

        let second = stores.vacations.create(vacation_for(&seed, 3)).await?;
        assert_eq!(used_of(&stores, seed.id).await, 8);

        assert!(stores.vacations.delete(first.id).await?);
        assert_eq!(used_of(&stores, seed.id).await, 3);

        stores.employees.delete(seed.id).await?;
        let remaining = stores.vacations.get_all().await?;
        assert!(!remaining.iter().any(|v| v.id == second.id));
        Ok(())
    }

    #[tokio::test]
    async fn create_then_delete_restores_balance() -> Result<(), anyhow::Error> {
        let (_, stores) = memory_stores();
        let emp = stores.employees.create(EmployeeInput::new("Ana", Role::Condutor)).await?;
        stores.vacations.create(vacation_for(&emp, 4)).await?;
        let before = used_of(&stores, emp.id).await;

        let v = stores.vacations.create(vacation_for(&emp, 6)).await?;
        assert!(stores.vacations.delete(v.id).await?);
        assert_eq!(used_of(&stores, emp.id).await, before);
        Ok(())
    }

    #[tokio::test]
    async fn booking_for_unknown_employee_changes_no_balance() -> Result<(), anyhow::Error> {
        let (_, stores) = memory_stores();
        let before = stores.employees.get_all().await?;
        let mut ghost = before[0].clone();
        ghost.id = 424242;

        let v = stores.vacations.create(vacation_for(&ghost, 7)).await?;
        assert_eq!(stores.vacations.get(v.id).await?, Some(v));
        assert_eq!(stores.employees.get_all().await?, before);
        Ok(())
    }

    #[tokio::test]
    async fn cancel_floors_used_at_zero() -> Result<(), anyhow::Error> {
        let (storage, stores) = memory_stores();
        let seed = stores.employees.get_all().await?.remove(0);
        let v = stores.vacations.create(vacation_for(&seed, 5)).await?;

        // simulate drift: someone lowered the stored balance by hand
        let mut employees = stores.employees.get_all().await?;
        employees[0].used = 2;
        storage.set(keys::EMPLOYEES, serde_json::to_value(&employees)?).await?;

        assert!(stores.vacations.delete(v.id).await?);
        assert_eq!(used_of(&stores, seed.id).await, 0);
        Ok(())
    }

    #[tokio::test]
    async fn cancel_of_unknown_vacation_is_reported() -> Result<(), anyhow::Error> {
        let (_, stores) = memory_stores();
        let seed = stores.employees.get_all().await?.remove(0);
        stores.vacations.create(vacation_for(&seed, 2)).await?;
        assert!(!stores.vacations.delete(1).await?);
        assert_eq!(used_of(&stores, seed.id).await, 2);
        assert_eq!(stores.vacations.get_all().await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn used_tracks_sum_over_mixed_sequence() -> Result<(), anyhow::Error> {
        let (_, stores) = memory_stores();
        let a = stores.employees.create(EmployeeInput::new("A", Role::Condutor)).await?;
        let b = stores.employees.create(EmployeeInput::new("B", Role::Armazem)).await?;

        let mut live: Vec<Vacation> = Vec::new();
        let plan: [(bool, u32); 10] = [
            (true, 3), (false, 1), (true, 5), (true, 2), (false, 4),
            (true, 1), (false, 2), (true, 6), (false, 3), (true, 1),
        ];
        for (step, (for_a, days)) in plan.into_iter().enumerate() {
            let owner = if for_a { &a } else { &b };
            live.push(stores.vacations.create(vacation_for(owner, days)).await?);
            if step % 3 == 2 {
                let gone = live.remove(0);
                assert!(stores.vacations.delete(gone.id).await?);
            }
            for emp in [&a, &b] {
                let expected: u32 = live.iter().filter(|v| v.employee_id == emp.id).map(|v| v.work_days).sum();
                assert_eq!(used_of(&stores, emp.id).await, expected, "after step {step}");
            }
        }
        Ok(())
    }

    #[tokio::test]
    async fn failed_commit_leaves_both_collections_untouched() -> Result<(), anyhow::Error> {
        let (storage, stores) = memory_stores();
        let seed = stores.employees.get_all().await?.remove(0);
        let booked = stores.vacations.create(vacation_for(&seed, 5)).await?;

        storage.fail_writes(true);
        assert!(matches!(
            stores.vacations.create(vacation_for(&seed, 3)).await,
            Err(ServiceError::Storage(_))
        ));
        assert!(stores.vacations.delete(booked.id).await.is_err());
        storage.fail_writes(false);

        assert_eq!(stores.vacations.get_all().await?, vec![booked]);
        assert_eq!(used_of(&stores, seed.id).await, 5);
        Ok(())
    }

    #[tokio::test]
    async fn balance_reports_stored_and_derived() -> Result<(), anyhow::Error> {
        let (_, stores) = memory_stores();
        let seed = stores.employees.get_all().await?.remove(0);
        stores.vacations.create(vacation_for(&seed, 5)).await?;
        stores.vacations.create(vacation_for(&seed, 3)).await?;

        let balance = stores.vacations.balance(seed.id).await?.unwrap();
        assert_eq!(
            balance,
            Balance { employee_id: seed.id, total_days: 22, used: 8, remaining: 14, derived_used: 8 }
        );
        assert!(stores.vacations.balance(9).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn balance_waits_for_in_flight_writes() -> Result<(), anyhow::Error> {
        let (_, stores) = memory_stores();
        let seed = stores.employees.get_all().await?.remove(0);

        let guard = stores.vacations.collections.lock().await;
        let blocked = tokio::time::timeout(Duration::from_millis(50), stores.vacations.balance(seed.id)).await;
        assert!(blocked.is_err());
        drop(guard);

        assert!(stores.vacations.balance(seed.id).await?.is_some());
        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn balance_never_sees_half_applied_bookings() -> Result<(), anyhow::Error> {
        let (_, stores) = memory_stores();
        let seed = stores.employees.get_all().await?.remove(0);

        let writer = {
            let stores = stores.clone();
            let seed = seed.clone();
            tokio::spawn(async move {
                for _ in 0..20 {
                    let v = stores.vacations.create(vacation_for(&seed, 2)).await?;
                    stores.vacations.delete(v.id).await?;
                }
                Ok::<_, ServiceError>(())
            })
        };
        for _ in 0..40 {
            let balance = stores.vacations.balance(seed.id).await?.unwrap();
            assert_eq!(balance.used, balance.derived_used);
        }
        writer.await??;
        Ok(())
    }

    #[tokio::test]
    async fn legacy_records_with_string_counts_stay_usable() -> Result<(), anyhow::Error> {
        let (storage, stores) = memory_stores();
        storage
            .set(
                keys::EMPLOYEES,
                serde_json::json!([
                    {"id": 1, "name": "Exemplo AAF", "role": "Administrativo", "color": "#1e3a8a", "totalDays": null, "used": "5"}
                ]),
            )
            .await?;
        storage
            .set(
                keys::VACATIONS,
                serde_json::json!([
                    {"id": 7, "employee_id": "1", "employee_name": "Exemplo AAF", "employee_color": "#1e3a8a",
                     "start_date": "2026-08-03", "end_date": "2026-08-07", "work_days": "5"}
                ]),
            )
            .await?;

        let vacations = stores.vacations.get_all().await?;
        assert_eq!(vacations[0].work_days, 5);
        let employee = stores.employees.get(1).await?.unwrap();
        assert_eq!((employee.total_days, employee.used), (22, 5));

        assert!(stores.vacations.delete(7).await?);
        assert_eq!(used_of(&stores, 1).await, 0);
        assert!(stores.employees.delete(1).await?);
        assert!(stores.vacations.get_all().await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn reconcile_repairs_drift() -> Result<(), anyhow::Error> {
        let (storage, stores) = memory_stores();
        let seed = stores.employees.get_all().await?.remove(0);
        let other = stores.employees.create(EmployeeInput::new("Rui", Role::Armazem)).await?;
        stores.vacations.create(vacation_for(&seed, 5)).await?;
        stores.vacations.create(vacation_for(&seed, 2)).await?;

        assert!(stores.vacations.reconcile().await?.is_empty());

        let mut employees = stores.employees.get_all().await?;
        for e in employees.iter_mut() {
            e.used = if e.id == seed.id { 1 } else { 9 };
        }
        storage.set(keys::EMPLOYEES, serde_json::to_value(&employees)?).await?;

        let mut corrections = stores.vacations.reconcile().await?;
        corrections.sort_by_key(|c| c.employee_id);
        assert_eq!(
            corrections,
            vec![
                BalanceCorrection { employee_id: seed.id, before: 1, after: 7 },
                BalanceCorrection { employee_id: other.id, before: 9, after: 0 },
            ]
        );
        assert_eq!(used_of(&stores, seed.id).await, 7);
        assert_eq!(used_of(&stores, other.id).await, 0);
        Ok(())
    }
}
