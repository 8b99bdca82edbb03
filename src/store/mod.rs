//! Persistence of employees and attendance records.
//!
//! Every backend declares three uniqueness constraints and reports a
//! violation as [`StoreError::Duplicate`](crate::error::StoreError::Duplicate):
//! - `employees.employee_id`
//! - `employees.email`
//! - `attendance(employee_id, date)`
//!
//! The store handle is opened once at startup, shared as `Arc<dyn RecordStore>`
//! and closed once at shutdown.

mod memory;
mod mysql;

pub use memory::MemoryStore;
pub use mysql::MySqlStore;

use async_trait::async_trait;

use crate::error::StoreResult;
use crate::model::{
    AttendanceRecord, AttendanceStatus, AttendanceTally, Employee, EmployeeId, NewAttendance,
    NewEmployee,
};

pub const EMPLOYEE_ID_KEY: &str = "uq_employees_employee_id";
pub const EMPLOYEE_EMAIL_KEY: &str = "uq_employees_email";
pub const ATTENDANCE_DAY_KEY: &str = "uq_attendance_employee_date";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Inserts an employee, failing with `Duplicate` on a taken id or email.
    async fn insert_employee(&self, employee: &NewEmployee) -> StoreResult<Employee>;

    async fn find_employee(&self, employee_id: &EmployeeId) -> StoreResult<Option<Employee>>;

    async fn find_employee_by_email(&self, email: &str) -> StoreResult<Option<Employee>>;

    /// All employees ordered by creation time.
    async fn list_employees(&self, order: SortOrder) -> StoreResult<Vec<Employee>>;

    /// Returns whether a row was removed.
    async fn delete_employee(&self, employee_id: &EmployeeId) -> StoreResult<bool>;

    /// Inserts an attendance record, failing with `Duplicate` when the
    /// employee already has one for that day.
    async fn insert_attendance(&self, attendance: &NewAttendance) -> StoreResult<AttendanceRecord>;

    async fn find_attendance(&self, id: u64) -> StoreResult<Option<AttendanceRecord>>;

    /// Attendance ordered by date, optionally restricted to one employee.
    async fn list_attendance(
        &self,
        employee_id: Option<&EmployeeId>,
        order: SortOrder,
    ) -> StoreResult<Vec<AttendanceRecord>>;

    /// Returns whether a record matched.
    async fn update_attendance_status(&self, id: u64, status: AttendanceStatus) -> StoreResult<bool>;

    /// Returns the number of records removed.
    async fn delete_attendance_for(&self, employee_id: &EmployeeId) -> StoreResult<u64>;

    /// Present/absent counts grouped by employee and joined with the employee's
    /// name. Only employees with at least one matching record appear.
    async fn tally_attendance(
        &self,
        employee_id: Option<&EmployeeId>,
    ) -> StoreResult<Vec<AttendanceTally>>;

    /// Releases the underlying connections.
    async fn close(&self);
}
