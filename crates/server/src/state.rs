use std::sync::Arc;

use service::holidays::HolidayCalendar;
use service::storage::KvStorage;
use service::Stores;

/// Shared handler state: the stores and the holiday calendar the absence
/// rule checks against.
#[derive(Clone)]
pub struct ServerState {
    pub stores: Stores,
    pub holidays: Arc<HolidayCalendar>,
}

impl ServerState {
    pub fn new(storage: Arc<dyn KvStorage>, holidays: HolidayCalendar) -> Self {
        Self { stores: Stores::new(storage), holidays: Arc::new(holidays) }
    }
}
