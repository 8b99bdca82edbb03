//! Domain operations over a shared [`RecordStore`](crate::store::RecordStore).
//!
//! Each service holds its own `Arc` to the process-wide store and never
//! opens or closes it.

mod employee;
mod ledger;
mod summary;

pub use employee::EmployeeRegistry;
pub use ledger::AttendanceLedger;
pub use summary::SummaryAggregator;

use std::sync::Arc;

use crate::store::RecordStore;

/// All services built over one store handle.
#[derive(Clone)]
pub struct Services {
    pub employees: EmployeeRegistry,
    pub ledger: AttendanceLedger,
    pub summary: SummaryAggregator,
}

impl Services {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            employees: EmployeeRegistry::new(store.clone()),
            ledger: AttendanceLedger::new(store.clone()),
            summary: SummaryAggregator::new(store),
        }
    }
}
