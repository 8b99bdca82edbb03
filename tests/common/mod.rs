#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use hrms_lite::error::StoreResult;
use hrms_lite::model::{
    AttendanceRecord, AttendanceStatus, AttendanceTally, CreateEmployee, Employee, EmployeeId,
    NewAttendance, NewEmployee,
};
use hrms_lite::service::Services;
use hrms_lite::store::{MemoryStore, RecordStore, SortOrder};

pub fn services() -> (Services, Arc<dyn RecordStore>) {
    let store: Arc<dyn RecordStore> = Arc::new(MemoryStore::new());
    (Services::new(store.clone()), store)
}

pub fn employee_request(id: &str, name: &str) -> CreateEmployee {
    CreateEmployee {
        employee_id: id.to_string(),
        full_name: name.to_string(),
        email: format!("{}@company.com", id.to_lowercase()),
        department: "Engineering".to_string(),
    }
}

pub async fn hire(services: &Services, id: &str, name: &str) -> Employee {
    let new = NewEmployee::try_from(employee_request(id, name)).unwrap();
    services.employees.create(new).await.unwrap()
}

pub fn attendance(id: &str, date: &str, status: AttendanceStatus) -> NewAttendance {
    NewAttendance::new(EmployeeId::parse(id).unwrap(), date.parse().unwrap(), status)
}

pub async fn mark(services: &Services, id: &str, date: &str, status: AttendanceStatus) -> AttendanceRecord {
    services
        .ledger
        .mark(attendance(id, date, status))
        .await
        .unwrap()
}

pub fn dates(records: &[AttendanceRecord]) -> Vec<String> {
    records.iter().map(|r| r.date.to_string()).collect()
}

/// In-memory store that can hide employees from point lookups, so inserts
/// reach the unique keys as they would when racing another writer, and that
/// remembers whether it was closed.
#[derive(Default)]
pub struct TrackedStore {
    inner: MemoryStore,
    hide_employees: bool,
    closed: AtomicBool,
}

impl TrackedStore {
    pub fn hiding_employees() -> Self {
        Self {
            hide_employees: true,
            ..Self::default()
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RecordStore for TrackedStore {
    async fn insert_employee(&self, employee: &NewEmployee) -> StoreResult<Employee> {
        self.inner.insert_employee(employee).await
    }

    async fn find_employee(&self, employee_id: &EmployeeId) -> StoreResult<Option<Employee>> {
        if self.hide_employees {
            return Ok(None);
        }
        self.inner.find_employee(employee_id).await
    }

    async fn find_employee_by_email(&self, email: &str) -> StoreResult<Option<Employee>> {
        if self.hide_employees {
            return Ok(None);
        }
        self.inner.find_employee_by_email(email).await
    }

    async fn list_employees(&self, order: SortOrder) -> StoreResult<Vec<Employee>> {
        self.inner.list_employees(order).await
    }

    async fn delete_employee(&self, employee_id: &EmployeeId) -> StoreResult<bool> {
        self.inner.delete_employee(employee_id).await
    }

    async fn insert_attendance(&self, attendance: &NewAttendance) -> StoreResult<AttendanceRecord> {
        self.inner.insert_attendance(attendance).await
    }

    async fn find_attendance(&self, id: u64) -> StoreResult<Option<AttendanceRecord>> {
        self.inner.find_attendance(id).await
    }

    async fn list_attendance(
        &self,
        employee_id: Option<&EmployeeId>,
        order: SortOrder,
    ) -> StoreResult<Vec<AttendanceRecord>> {
        self.inner.list_attendance(employee_id, order).await
    }

    async fn update_attendance_status(&self, id: u64, status: AttendanceStatus) -> StoreResult<bool> {
        self.inner.update_attendance_status(id, status).await
    }

    async fn delete_attendance_for(&self, employee_id: &EmployeeId) -> StoreResult<u64> {
        self.inner.delete_attendance_for(employee_id).await
    }

    async fn tally_attendance(
        &self,
        employee_id: Option<&EmployeeId>,
    ) -> StoreResult<Vec<AttendanceTally>> {
        self.inner.tally_attendance(employee_id).await
    }

    async fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
        self.inner.close().await;
    }
}
