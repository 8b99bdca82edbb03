use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::error::{HrmError, HrmResult, StoreError};
use crate::model::{Employee, EmployeeId, NewEmployee};
use crate::store::{EMPLOYEE_EMAIL_KEY, RecordStore, SortOrder};

#[derive(Clone)]
pub struct EmployeeRegistry {
    store: Arc<dyn RecordStore>,
}

impl EmployeeRegistry {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Registers an employee. The id is checked before the email so the caller
    /// learns which of the two is taken.
    pub async fn create(&self, new: NewEmployee) -> HrmResult<Employee> {
        if self.store.find_employee(&new.employee_id).await?.is_some() {
            warn!(employee_id = %new.employee_id, "Employee id already taken");
            return Err(HrmError::DuplicateEmployeeId(new.employee_id));
        }
        if self.store.find_employee_by_email(&new.email).await?.is_some() {
            warn!(employee_id = %new.employee_id, "Employee email already taken");
            return Err(HrmError::DuplicateEmail(new.email));
        }

        match self.store.insert_employee(&new).await {
            Ok(employee) => {
                info!(employee_id = %employee.employee_id, "Employee created");
                Ok(employee)
            }
            // lost a race against a concurrent insert
            Err(StoreError::Duplicate(key)) if key == EMPLOYEE_EMAIL_KEY => {
                Err(HrmError::DuplicateEmail(new.email))
            }
            Err(StoreError::Duplicate(_)) => Err(HrmError::DuplicateEmployeeId(new.employee_id)),
            Err(e) => Err(e.into()),
        }
    }

    /// Newest-created first.
    pub async fn list(&self) -> HrmResult<Vec<Employee>> {
        let employees = self.store.list_employees(SortOrder::Descending).await?;
        debug!(count = employees.len(), "Listed employees");
        Ok(employees)
    }

    pub async fn get(&self, employee_id: &EmployeeId) -> HrmResult<Employee> {
        self.store
            .find_employee(employee_id)
            .await?
            .ok_or_else(|| HrmError::EmployeeNotFound(employee_id.clone()))
    }

    /// Removes the employee and then all of their attendance.
    ///
    /// The two deletes are independent store calls: if the second fails the
    /// employee is already gone and orphaned attendance rows remain. Orphans
    /// never show up in summaries because those join against the roster.
    pub async fn delete(&self, employee_id: &EmployeeId) -> HrmResult<()> {
        if !self.store.delete_employee(employee_id).await? {
            return Err(HrmError::EmployeeNotFound(employee_id.clone()));
        }

        let removed = self.store.delete_attendance_for(employee_id).await?;
        info!(%employee_id, attendance_removed = removed, "Employee deleted");
        Ok(())
    }
}
