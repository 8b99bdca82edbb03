use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::error::{HrmError, HrmResult, StoreError};
use crate::model::{AttendanceRecord, AttendanceStatus, DateRange, EmployeeId, NewAttendance};
use crate::store::{RecordStore, SortOrder};

/// Create, read and correct attendance records.
///
/// At most one record exists per employee and day. The store's unique key is
/// the only thing enforcing that; the employee lookup in [`mark`](Self::mark)
/// exists so a missing employee is reported as such instead of as a failed
/// insert.
#[derive(Clone)]
pub struct AttendanceLedger {
    store: Arc<dyn RecordStore>,
}

impl AttendanceLedger {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    pub async fn mark(&self, new: NewAttendance) -> HrmResult<AttendanceRecord> {
        self.ensure_employee(&new.employee_id).await?;

        match self.store.insert_attendance(&new).await {
            Ok(record) => {
                info!(
                    employee_id = %record.employee_id,
                    date = %record.date,
                    status = %record.status,
                    "Attendance marked"
                );
                Ok(record)
            }
            Err(StoreError::Duplicate(_)) => {
                warn!(employee_id = %new.employee_id, date = %new.date, "Attendance already marked");
                Err(HrmError::DuplicateAttendance {
                    employee_id: new.employee_id,
                    date: new.date,
                })
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Newest date first. An employee without records yields an empty list.
    pub async fn by_employee(&self, employee_id: &EmployeeId) -> HrmResult<Vec<AttendanceRecord>> {
        self.ensure_employee(employee_id).await?;
        let records = self
            .store
            .list_attendance(Some(employee_id), SortOrder::Descending)
            .await?;
        debug!(%employee_id, count = records.len(), "Fetched employee attendance");
        Ok(records)
    }

    /// Every record, newest date first.
    pub async fn all(&self) -> HrmResult<Vec<AttendanceRecord>> {
        Ok(self.store.list_attendance(None, SortOrder::Descending).await?)
    }

    pub async fn update_status(
        &self,
        record_id: u64,
        status: AttendanceStatus,
    ) -> HrmResult<AttendanceRecord> {
        if !self.store.update_attendance_status(record_id, status).await? {
            return Err(HrmError::RecordNotFound(record_id));
        }
        info!(record_id, %status, "Attendance status updated");

        self.store
            .find_attendance(record_id)
            .await?
            .ok_or(HrmError::RecordNotFound(record_id))
    }

    /// Records whose date lies in `range`, both ends included, newest first.
    ///
    /// Loads every record and filters in process, O(n) in the table size.
    /// A range whose start is after its end matches nothing.
    pub async fn filter_by_date_range(&self, range: DateRange) -> HrmResult<Vec<AttendanceRecord>> {
        let records: Vec<_> = self
            .all()
            .await?
            .into_iter()
            .filter(|r| range.contains(r.date))
            .collect();
        debug!(start = %range.start, end = %range.end, count = records.len(), "Filtered attendance");
        Ok(records)
    }

    async fn ensure_employee(&self, employee_id: &EmployeeId) -> HrmResult<()> {
        match self.store.find_employee(employee_id).await? {
            Some(_) => Ok(()),
            None => Err(HrmError::EmployeeNotFound(employee_id.clone())),
        }
    }
}
