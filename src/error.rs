use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde_json::json;
use strum_macros::Display;
use thiserror::Error;
use tracing::error;

use crate::model::{AttendanceDate, EmployeeId};

pub type HrmResult<T> = Result<T, HrmError>;
pub type StoreResult<T> = Result<T, StoreError>;

/// Failures reported by a [`RecordStore`](crate::store::RecordStore).
#[derive(Debug, Error)]
pub enum StoreError {
    /// A declared uniqueness constraint rejected the write. Carries the key name.
    #[error("duplicate key: {0}")]
    Duplicate(String),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    pub fn is_duplicate(&self) -> bool {
        matches!(self, StoreError::Duplicate(_))
    }
}

/// Coarse classification callers branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    NotFound,
    Conflict,
    InvalidInput,
    Unavailable,
}

#[derive(Debug, Error)]
pub enum HrmError {
    #[error("Employee with ID {0} not found")]
    EmployeeNotFound(EmployeeId),

    #[error("Attendance record {0} not found")]
    RecordNotFound(u64),

    #[error("Employee with ID {0} already exists")]
    DuplicateEmployeeId(EmployeeId),

    #[error("Employee with email {0} already exists")]
    DuplicateEmail(String),

    #[error("Attendance for employee {employee_id} on {date} already exists")]
    DuplicateAttendance {
        employee_id: EmployeeId,
        date: AttendanceDate,
    },

    #[error("{0}")]
    InvalidInput(String),

    #[error(transparent)]
    Unavailable(#[from] StoreError),
}

impl HrmError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            HrmError::EmployeeNotFound(_) | HrmError::RecordNotFound(_) => ErrorKind::NotFound,
            HrmError::DuplicateEmployeeId(_)
            | HrmError::DuplicateEmail(_)
            | HrmError::DuplicateAttendance { .. } => ErrorKind::Conflict,
            HrmError::InvalidInput(_) => ErrorKind::InvalidInput,
            HrmError::Unavailable(_) => ErrorKind::Unavailable,
        }
    }
}

impl ResponseError for HrmError {
    fn status_code(&self) -> StatusCode {
        match self.kind() {
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Conflict => StatusCode::BAD_REQUEST,
            ErrorKind::InvalidInput => StatusCode::UNPROCESSABLE_ENTITY,
            ErrorKind::Unavailable => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let detail = match self {
            HrmError::Unavailable(e) => {
                error!(error = %e, "Store failure while serving request");
                "Something went wrong, Contact with system admin".to_string()
            }
            other => other.to_string(),
        };

        HttpResponse::build(self.status_code()).json(json!({
            "error": self.kind().to_string(),
            "detail": detail,
        }))
    }
}
