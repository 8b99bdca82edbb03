use std::collections::BTreeMap;
use std::sync::RwLock;

use async_trait::async_trait;

use super::{ATTENDANCE_DAY_KEY, EMPLOYEE_EMAIL_KEY, EMPLOYEE_ID_KEY, RecordStore, SortOrder};
use crate::error::{StoreError, StoreResult};
use crate::model::{
    AttendanceRecord, AttendanceStatus, AttendanceTally, Employee, EmployeeId, NewAttendance,
    NewEmployee,
};

#[derive(Default)]
struct Tables {
    employees: Vec<Employee>,
    attendance: Vec<AttendanceRecord>,
    next_employee_id: u64,
    next_attendance_id: u64,
}

/// Process-local store. Each operation runs under a single lock, so a
/// uniqueness check and the insert it guards are atomic.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read<R>(&self, f: impl FnOnce(&Tables) -> R) -> StoreResult<R> {
        let tables = self
            .tables
            .read()
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".to_string()))?;
        Ok(f(&tables))
    }

    fn write<R>(&self, f: impl FnOnce(&mut Tables) -> StoreResult<R>) -> StoreResult<R> {
        let mut tables = self
            .tables
            .write()
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".to_string()))?;
        f(&mut tables)
    }
}

fn sorted<T, K: Ord>(mut items: Vec<T>, order: SortOrder, key: impl Fn(&T) -> K) -> Vec<T> {
    items.sort_by(|a, b| match order {
        SortOrder::Ascending => key(a).cmp(&key(b)),
        SortOrder::Descending => key(b).cmp(&key(a)),
    });
    items
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn insert_employee(&self, employee: &NewEmployee) -> StoreResult<Employee> {
        self.write(|t| {
            if t.employees.iter().any(|e| e.employee_id == employee.employee_id) {
                return Err(StoreError::Duplicate(EMPLOYEE_ID_KEY.to_string()));
            }
            if t.employees.iter().any(|e| e.email == employee.email) {
                return Err(StoreError::Duplicate(EMPLOYEE_EMAIL_KEY.to_string()));
            }

            t.next_employee_id += 1;
            let row = Employee {
                id: t.next_employee_id,
                employee_id: employee.employee_id.clone(),
                full_name: employee.full_name.clone(),
                email: employee.email.clone(),
                department: employee.department.clone(),
                created_at: employee.created_at,
            };
            t.employees.push(row.clone());
            Ok(row)
        })
    }

    async fn find_employee(&self, employee_id: &EmployeeId) -> StoreResult<Option<Employee>> {
        self.read(|t| {
            t.employees
                .iter()
                .find(|e| &e.employee_id == employee_id)
                .cloned()
        })
    }

    async fn find_employee_by_email(&self, email: &str) -> StoreResult<Option<Employee>> {
        self.read(|t| t.employees.iter().find(|e| e.email == email).cloned())
    }

    async fn list_employees(&self, order: SortOrder) -> StoreResult<Vec<Employee>> {
        let employees = self.read(|t| t.employees.clone())?;
        Ok(sorted(employees, order, |e| (e.created_at, e.id)))
    }

    async fn delete_employee(&self, employee_id: &EmployeeId) -> StoreResult<bool> {
        self.write(|t| {
            let before = t.employees.len();
            t.employees.retain(|e| &e.employee_id != employee_id);
            Ok(t.employees.len() < before)
        })
    }

    async fn insert_attendance(&self, attendance: &NewAttendance) -> StoreResult<AttendanceRecord> {
        self.write(|t| {
            let taken = t
                .attendance
                .iter()
                .any(|a| a.employee_id == attendance.employee_id && a.date == attendance.date);
            if taken {
                return Err(StoreError::Duplicate(ATTENDANCE_DAY_KEY.to_string()));
            }

            t.next_attendance_id += 1;
            let row = AttendanceRecord {
                id: t.next_attendance_id,
                employee_id: attendance.employee_id.clone(),
                date: attendance.date,
                status: attendance.status,
                created_at: attendance.created_at,
            };
            t.attendance.push(row.clone());
            Ok(row)
        })
    }

    async fn find_attendance(&self, id: u64) -> StoreResult<Option<AttendanceRecord>> {
        self.read(|t| t.attendance.iter().find(|a| a.id == id).cloned())
    }

    async fn list_attendance(
        &self,
        employee_id: Option<&EmployeeId>,
        order: SortOrder,
    ) -> StoreResult<Vec<AttendanceRecord>> {
        let records = self.read(|t| {
            t.attendance
                .iter()
                .filter(|a| employee_id.is_none_or(|id| &a.employee_id == id))
                .cloned()
                .collect::<Vec<_>>()
        })?;
        Ok(sorted(records, order, |a| (a.date, a.id)))
    }

    async fn update_attendance_status(&self, id: u64, status: AttendanceStatus) -> StoreResult<bool> {
        self.write(|t| {
            Ok(match t.attendance.iter_mut().find(|a| a.id == id) {
                Some(record) => {
                    record.status = status;
                    true
                }
                None => false,
            })
        })
    }

    async fn delete_attendance_for(&self, employee_id: &EmployeeId) -> StoreResult<u64> {
        self.write(|t| {
            let before = t.attendance.len();
            t.attendance.retain(|a| &a.employee_id != employee_id);
            Ok((before - t.attendance.len()) as u64)
        })
    }

    async fn tally_attendance(
        &self,
        employee_id: Option<&EmployeeId>,
    ) -> StoreResult<Vec<AttendanceTally>> {
        self.read(|t| {
            // pass one: group attendance rows by employee
            let mut groups: BTreeMap<&EmployeeId, (u64, u64)> = BTreeMap::new();
            for record in t
                .attendance
                .iter()
                .filter(|a| employee_id.is_none_or(|id| &a.employee_id == id))
            {
                let counts = groups.entry(&record.employee_id).or_default();
                match record.status {
                    AttendanceStatus::Present => counts.0 += 1,
                    AttendanceStatus::Absent => counts.1 += 1,
                }
            }

            // pass two: inner join against the roster
            groups
                .into_iter()
                .filter_map(|(id, (present, absent))| {
                    let employee = t.employees.iter().find(|e| &e.employee_id == id)?;
                    Some(AttendanceTally {
                        employee_id: id.clone(),
                        full_name: employee.full_name.clone(),
                        total_present: present,
                        total_absent: absent,
                        total_records: present + absent,
                    })
                })
                .collect()
        })
    }

    async fn close(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn new_employee(id: &str, email: &str) -> NewEmployee {
        NewEmployee {
            employee_id: EmployeeId::parse(id).unwrap(),
            full_name: format!("Employee {id}"),
            email: email.to_string(),
            department: "Engineering".to_string(),
            created_at: Utc::now(),
        }
    }

    #[actix_web::test]
    async fn employee_keys_are_unique() {
        let store = MemoryStore::new();
        store.insert_employee(&new_employee("EMP001", "a@x.io")).await.unwrap();

        let err = store
            .insert_employee(&new_employee("EMP001", "b@x.io"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Duplicate(ref key) if key == EMPLOYEE_ID_KEY));

        let err = store
            .insert_employee(&new_employee("EMP002", "a@x.io"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Duplicate(ref key) if key == EMPLOYEE_EMAIL_KEY));
    }

    #[actix_web::test]
    async fn tally_skips_rows_without_an_employee() {
        let store = MemoryStore::new();
        store.insert_employee(&new_employee("EMP001", "a@x.io")).await.unwrap();
        for (id, day) in [("EMP001", "2024-01-01"), ("GHOST1", "2024-01-01")] {
            let new = NewAttendance::new(
                EmployeeId::parse(id).unwrap(),
                day.parse().unwrap(),
                AttendanceStatus::Present,
            );
            store.insert_attendance(&new).await.unwrap();
        }

        let tallies = store.tally_attendance(None).await.unwrap();
        assert_eq!(tallies.len(), 1);
        assert_eq!(tallies[0].employee_id.as_str(), "EMP001");
        assert_eq!(tallies[0].total_records, 1);
    }
}
