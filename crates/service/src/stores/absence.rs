use std::sync::Arc;

use models::{Absence, AbsenceInput};
use tracing::{debug, info};

use crate::collections::{Batch, Collections};
use crate::errors::ServiceError;
use crate::storage::keys;

/// Append-only absence log. Absences carry no balance effect and the store
/// performs no date checks; the holiday rule is applied by callers.
#[derive(Clone)]
pub struct AbsenceStore {
    collections: Arc<Collections>,
}

impl AbsenceStore {
    pub fn new(collections: Arc<Collections>) -> Self { Self { collections } }

    pub async fn get_all(&self) -> Result<Vec<Absence>, ServiceError> {
        let absences: Vec<Absence> = self.collections.load(keys::ABSENCES).await?;
        debug!(count = absences.len(), "absences loaded");
        Ok(absences)
    }

    pub async fn create(&self, input: AbsenceInput) -> Result<Absence, ServiceError> {
        let _guard = self.collections.lock().await;
        let mut absences: Vec<Absence> = self.collections.load(keys::ABSENCES).await?;
        let id = self.collections.next_id(|c| absences.iter().any(|a| a.id == c));
        let absence = Absence::from_input(id, input);
        absences.push(absence.clone());
        self.collections.commit(Batch::new().put(keys::ABSENCES, &absences)?).await?;
        info!(absence_id = id, employee_id = absence.employee_id, date = %absence.absence_date, "absence recorded");
        Ok(absence)
    }
}
