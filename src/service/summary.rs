use std::sync::Arc;

use tracing::debug;

use crate::error::HrmResult;
use crate::model::{AttendanceSummary, EmployeeId};
use crate::store::RecordStore;

/// Per-employee attendance statistics, computed on every call.
#[derive(Clone)]
pub struct SummaryAggregator {
    store: Arc<dyn RecordStore>,
}

impl SummaryAggregator {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// One entry per employee that has at least one matching record, ordered
    /// by employee id. Employees with no attendance are left out entirely.
    pub async fn summarize(
        &self,
        employee_id: Option<&EmployeeId>,
    ) -> HrmResult<Vec<AttendanceSummary>> {
        let tallies = self.store.tally_attendance(employee_id).await?;
        debug!(count = tallies.len(), "Computed attendance summary");
        Ok(tallies.into_iter().map(AttendanceSummary::from).collect())
    }
}
