//! Data layer of the vacation tracker.
//! - Three stores (employees, vacations, absences) over one injected key-value storage.
//! - Vacation bookings keep the owning employee's `used` balance in step, in one commit.
//! - Holiday rule and calendar projection used by the HTTP layer.

pub mod errors;
pub mod ids;
pub mod runtime;
pub mod storage;
pub mod collections;
pub mod stores;
pub mod holidays;
pub mod calendar;
#[cfg(test)]
pub mod test_support;

pub use collections::Collections;
pub use errors::ServiceError;
pub use stores::Stores;
