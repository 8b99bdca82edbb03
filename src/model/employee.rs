use chrono::{DateTime, Utc};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::HrmError;

const EMPLOYEE_ID_LEN: std::ops::RangeInclusive<usize> = 3..=20;
const FULL_NAME_LEN: std::ops::RangeInclusive<usize> = 2..=100;
const DEPARTMENT_LEN: std::ops::RangeInclusive<usize> = 2..=50;

/// Business identifier of an employee, e.g. `EMP001`.
///
/// Always ASCII alphanumeric, 3 to 20 characters, stored uppercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Display, Serialize)]
pub struct EmployeeId(String);

impl EmployeeId {
    /// Validates and normalizes a caller supplied identifier.
    pub fn parse(raw: &str) -> Result<Self, HrmError> {
        let len = raw.chars().count();
        if !EMPLOYEE_ID_LEN.contains(&len) {
            return Err(HrmError::InvalidInput(format!(
                "employee_id must be between {} and {} characters",
                EMPLOYEE_ID_LEN.start(),
                EMPLOYEE_ID_LEN.end()
            )));
        }
        if !raw.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(HrmError::InvalidInput(
                "Employee ID must be alphanumeric".to_string(),
            ));
        }
        Ok(Self(raw.to_ascii_uppercase()))
    }

    /// Wraps a value read back from the store, which only ever holds
    /// normalized identifiers.
    pub(crate) fn from_stored(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A persisted employee.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[schema(example = json!({
    "id": 1,
    "employee_id": "EMP001",
    "full_name": "John Doe",
    "email": "john.doe@company.com",
    "department": "Engineering",
    "created_at": "2024-01-15T09:30:00Z"
}))]
pub struct Employee {
    pub id: u64,
    #[schema(value_type = String, example = "EMP001")]
    pub employee_id: EmployeeId,
    pub full_name: String,
    pub email: String,
    pub department: String,
    #[schema(value_type = String, format = "date-time")]
    pub created_at: DateTime<Utc>,
}

/// Request body of `POST /employees/`.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct CreateEmployee {
    #[schema(example = "EMP001")]
    pub employee_id: String,
    #[schema(example = "John Doe")]
    pub full_name: String,
    #[schema(example = "john.doe@company.com", format = "email")]
    pub email: String,
    #[schema(example = "Engineering")]
    pub department: String,
}

/// A validated employee ready to be inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEmployee {
    pub employee_id: EmployeeId,
    pub full_name: String,
    pub email: String,
    pub department: String,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<CreateEmployee> for NewEmployee {
    type Error = HrmError;

    fn try_from(req: CreateEmployee) -> Result<Self, Self::Error> {
        let employee_id = EmployeeId::parse(&req.employee_id)?;
        let full_name = bounded_text("full_name", &req.full_name, FULL_NAME_LEN)?;
        let department = bounded_text("department", &req.department, DEPARTMENT_LEN)?;
        let email = normalize_email(&req.email)?;

        Ok(Self {
            employee_id,
            full_name,
            email,
            department,
            created_at: Utc::now(),
        })
    }
}

fn bounded_text(
    field: &str,
    value: &str,
    bounds: std::ops::RangeInclusive<usize>,
) -> Result<String, HrmError> {
    let value = value.trim();
    if bounds.contains(&value.chars().count()) {
        Ok(value.to_string())
    } else {
        Err(HrmError::InvalidInput(format!(
            "{field} must be between {} and {} characters",
            bounds.start(),
            bounds.end()
        )))
    }
}

/// Lowercases the address so uniqueness does not depend on the backend's
/// collation.
pub fn normalize_email(raw: &str) -> Result<String, HrmError> {
    let email = raw.trim();
    let invalid = || HrmError::InvalidInput(format!("'{email}' is not a valid email address"));

    if email.chars().any(char::is_whitespace) {
        return Err(invalid());
    }
    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') {
        return Err(invalid());
    }
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 || labels.iter().any(|l| l.is_empty()) {
        return Err(invalid());
    }

    Ok(email.to_lowercase())
}
