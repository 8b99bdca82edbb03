use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::mysql::{MySqlConnectOptions, MySqlPoolOptions};
use sqlx::{FromRow, MySqlPool};
use tracing::{debug, info};

use super::{RecordStore, SortOrder};
use crate::error::{StoreError, StoreResult};
use crate::model::{
    AttendanceRecord, AttendanceStatus, AttendanceTally, Employee, EmployeeId, NewAttendance,
    NewEmployee,
};

/// MySQL backed store. Uniqueness is enforced by the table's unique keys.
#[derive(Clone)]
pub struct MySqlStore {
    pool: MySqlPool,
}

#[derive(FromRow)]
struct EmployeeRow {
    id: u64,
    employee_id: String,
    full_name: String,
    email: String,
    department: String,
    created_at: DateTime<Utc>,
}

impl From<EmployeeRow> for Employee {
    fn from(row: EmployeeRow) -> Self {
        Self {
            id: row.id,
            employee_id: EmployeeId::from_stored(row.employee_id),
            full_name: row.full_name,
            email: row.email,
            department: row.department,
            created_at: row.created_at,
        }
    }
}

#[derive(FromRow)]
struct AttendanceRow {
    id: u64,
    employee_id: String,
    date: NaiveDate,
    status: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<AttendanceRow> for AttendanceRecord {
    type Error = StoreError;

    fn try_from(row: AttendanceRow) -> Result<Self, Self::Error> {
        let status = AttendanceStatus::from_str(&row.status)
            .map_err(|e| StoreError::Database(sqlx::Error::Decode(Box::new(e))))?;

        Ok(Self {
            id: row.id,
            employee_id: EmployeeId::from_stored(row.employee_id),
            date: row.date.into(),
            status,
            created_at: row.created_at,
        })
    }
}

#[derive(FromRow)]
struct TallyRow {
    employee_id: String,
    full_name: String,
    total_present: i64,
    total_absent: i64,
    total_records: i64,
}

impl From<TallyRow> for AttendanceTally {
    fn from(row: TallyRow) -> Self {
        Self {
            employee_id: EmployeeId::from_stored(row.employee_id),
            full_name: row.full_name,
            total_present: row.total_present.unsigned_abs(),
            total_absent: row.total_absent.unsigned_abs(),
            total_records: row.total_records.unsigned_abs(),
        }
    }
}

const CREATE_EMPLOYEES: &str = r#"
    CREATE TABLE IF NOT EXISTS employees (
        id BIGINT UNSIGNED NOT NULL AUTO_INCREMENT PRIMARY KEY,
        employee_id VARCHAR(20) NOT NULL,
        full_name VARCHAR(100) NOT NULL,
        email VARCHAR(255) NOT NULL,
        department VARCHAR(50) NOT NULL,
        created_at DATETIME(6) NOT NULL,
        CONSTRAINT uq_employees_employee_id UNIQUE (employee_id),
        CONSTRAINT uq_employees_email UNIQUE (email),
        INDEX ix_employees_created_at (created_at)
    )
"#;

const CREATE_ATTENDANCE: &str = r#"
    CREATE TABLE IF NOT EXISTS attendance (
        id BIGINT UNSIGNED NOT NULL AUTO_INCREMENT PRIMARY KEY,
        employee_id VARCHAR(20) NOT NULL,
        date DATE NOT NULL,
        status VARCHAR(10) NOT NULL,
        created_at DATETIME(6) NOT NULL,
        CONSTRAINT uq_attendance_employee_date UNIQUE (employee_id, date),
        CONSTRAINT ck_attendance_status CHECK (status IN ('Present', 'Absent')),
        INDEX ix_attendance_date (date)
    )
"#;

const EMPLOYEE_COLUMNS: &str = "id, employee_id, full_name, email, department, created_at";
const ATTENDANCE_COLUMNS: &str = "id, employee_id, date, status, created_at";

fn direction(order: SortOrder) -> &'static str {
    match order {
        SortOrder::Ascending => "ASC",
        SortOrder::Descending => "DESC",
    }
}

/// Separates unique key violations from every other driver failure.
fn classify(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            return StoreError::Duplicate(duplicate_key(db_err.message()));
        }
    }
    match err {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            StoreError::Unavailable(err.to_string())
        }
        other => StoreError::Database(other),
    }
}

/// Pulls the key name out of "Duplicate entry 'x' for key 'employees.uq_employees_email'".
fn duplicate_key(message: &str) -> String {
    let key = message
        .rsplit_once("for key '")
        .map(|(_, rest)| rest.trim_end_matches('\''))
        .unwrap_or(message);
    key.rsplit_once('.')
        .map_or(key, |(_, name)| name)
        .to_string()
}

impl MySqlStore {
    /// Opens the pool and selects `database` on every connection.
    pub async fn connect(
        database_url: &str,
        database: &str,
        max_connections: u32,
    ) -> Result<Self, sqlx::Error> {
        let options = MySqlConnectOptions::from_str(database_url)?.database(database);
        let pool = MySqlPoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;

        info!(database, max_connections, "Connected to MySQL");
        Ok(Self { pool })
    }

    /// Creates both tables and their unique keys when missing.
    pub async fn ensure_schema(&self) -> Result<(), sqlx::Error> {
        for ddl in [CREATE_EMPLOYEES, CREATE_ATTENDANCE] {
            sqlx::query(ddl).execute(&self.pool).await?;
        }
        debug!("Schema ready");
        Ok(())
    }

    async fn fetch_employee_where(&self, column: &str, value: &str) -> StoreResult<Option<Employee>> {
        let sql = format!("SELECT {EMPLOYEE_COLUMNS} FROM employees WHERE {column} = ?");
        let row = sqlx::query_as::<_, EmployeeRow>(&sql)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(classify)?;
        Ok(row.map(Employee::from))
    }
}

#[async_trait]
impl RecordStore for MySqlStore {
    async fn insert_employee(&self, employee: &NewEmployee) -> StoreResult<Employee> {
        sqlx::query(
            r#"
            INSERT INTO employees (employee_id, full_name, email, department, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(employee.employee_id.as_str())
        .bind(&employee.full_name)
        .bind(&employee.email)
        .bind(&employee.department)
        .bind(employee.created_at)
        .execute(&self.pool)
        .await
        .map_err(classify)?;

        self.find_employee(&employee.employee_id)
            .await?
            .ok_or_else(|| StoreError::Database(sqlx::Error::RowNotFound))
    }

    async fn find_employee(&self, employee_id: &EmployeeId) -> StoreResult<Option<Employee>> {
        self.fetch_employee_where("employee_id", employee_id.as_str()).await
    }

    async fn find_employee_by_email(&self, email: &str) -> StoreResult<Option<Employee>> {
        self.fetch_employee_where("email", email).await
    }

    async fn list_employees(&self, order: SortOrder) -> StoreResult<Vec<Employee>> {
        let dir = direction(order);
        let sql = format!(
            "SELECT {EMPLOYEE_COLUMNS} FROM employees ORDER BY created_at {dir}, id {dir}"
        );
        let rows = sqlx::query_as::<_, EmployeeRow>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(classify)?;
        Ok(rows.into_iter().map(Employee::from).collect())
    }

    async fn delete_employee(&self, employee_id: &EmployeeId) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM employees WHERE employee_id = ?")
            .bind(employee_id.as_str())
            .execute(&self.pool)
            .await
            .map_err(classify)?;
        Ok(result.rows_affected() > 0)
    }

    async fn insert_attendance(&self, attendance: &NewAttendance) -> StoreResult<AttendanceRecord> {
        let result = sqlx::query(
            r#"
            INSERT INTO attendance (employee_id, date, status, created_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(attendance.employee_id.as_str())
        .bind(attendance.date.as_naive())
        .bind(attendance.status.to_string())
        .bind(attendance.created_at)
        .execute(&self.pool)
        .await
        .map_err(classify)?;

        self.find_attendance(result.last_insert_id())
            .await?
            .ok_or_else(|| StoreError::Database(sqlx::Error::RowNotFound))
    }

    async fn find_attendance(&self, id: u64) -> StoreResult<Option<AttendanceRecord>> {
        let sql = format!("SELECT {ATTENDANCE_COLUMNS} FROM attendance WHERE id = ?");
        sqlx::query_as::<_, AttendanceRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(classify)?
            .map(AttendanceRecord::try_from)
            .transpose()
    }

    async fn list_attendance(
        &self,
        employee_id: Option<&EmployeeId>,
        order: SortOrder,
    ) -> StoreResult<Vec<AttendanceRecord>> {
        let where_clause = if employee_id.is_some() {
            "WHERE employee_id = ?"
        } else {
            ""
        };
        let dir = direction(order);
        let sql = format!(
            "SELECT {ATTENDANCE_COLUMNS} FROM attendance {where_clause} ORDER BY date {dir}, id {dir}"
        );
        debug!(sql = %sql, "Listing attendance");

        let mut query = sqlx::query_as::<_, AttendanceRow>(&sql);
        if let Some(id) = employee_id {
            query = query.bind(id.as_str());
        }

        query
            .fetch_all(&self.pool)
            .await
            .map_err(classify)?
            .into_iter()
            .map(AttendanceRecord::try_from)
            .collect()
    }

    async fn update_attendance_status(&self, id: u64, status: AttendanceStatus) -> StoreResult<bool> {
        // connections negotiate CLIENT_FOUND_ROWS, so an unchanged status still counts as matched
        let result = sqlx::query("UPDATE attendance SET status = ? WHERE id = ?")
            .bind(status.to_string())
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(classify)?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_attendance_for(&self, employee_id: &EmployeeId) -> StoreResult<u64> {
        let result = sqlx::query("DELETE FROM attendance WHERE employee_id = ?")
            .bind(employee_id.as_str())
            .execute(&self.pool)
            .await
            .map_err(classify)?;
        Ok(result.rows_affected())
    }

    async fn tally_attendance(
        &self,
        employee_id: Option<&EmployeeId>,
    ) -> StoreResult<Vec<AttendanceTally>> {
        let where_clause = if employee_id.is_some() {
            "WHERE a.employee_id = ?"
        } else {
            ""
        };
        let sql = format!(
            r#"
            SELECT
                a.employee_id,
                e.full_name,
                CAST(SUM(a.status = 'Present') AS SIGNED) AS total_present,
                CAST(SUM(a.status = 'Absent') AS SIGNED) AS total_absent,
                COUNT(*) AS total_records
            FROM attendance a
            INNER JOIN employees e ON e.employee_id = a.employee_id
            {where_clause}
            GROUP BY a.employee_id, e.full_name
            ORDER BY a.employee_id ASC
            "#
        );

        let mut query = sqlx::query_as::<_, TallyRow>(&sql);
        if let Some(id) = employee_id {
            query = query.bind(id.as_str());
        }

        let rows = query.fetch_all(&self.pool).await.map_err(classify)?;
        Ok(rows.into_iter().map(AttendanceTally::from).collect())
    }

    async fn close(&self) {
        self.pool.close().await;
        info!("Disconnected from MySQL");
    }
}
