use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};

use crate::error::HrmError;
use crate::model::employee::EmployeeId;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Calendar day of an attendance entry, always rendered as `YYYY-MM-DD`.
///
/// Ordering matches the lexicographic order of the rendered form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct AttendanceDate(NaiveDate);

impl AttendanceDate {
    pub fn as_naive(&self) -> NaiveDate {
        self.0
    }
}

impl From<NaiveDate> for AttendanceDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl FromStr for AttendanceDate {
    type Err = HrmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || HrmError::InvalidInput(format!("Date must be in YYYY-MM-DD format, got '{s}'"));

        // chrono accepts unpadded fields, the wire format does not
        let well_formed = s.len() == 10
            && s.bytes().enumerate().all(|(i, b)| match i {
                4 | 7 => b == b'-',
                _ => b.is_ascii_digit(),
            });
        if !well_formed {
            return Err(invalid());
        }

        NaiveDate::parse_from_str(s, DATE_FORMAT)
            .map(Self)
            .map_err(|_| invalid())
    }
}

impl fmt::Display for AttendanceDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
pub enum AttendanceStatus {
    Present,
    Absent,
}

impl AttendanceStatus {
    pub fn parse(raw: &str) -> Result<Self, HrmError> {
        raw.parse().map_err(|_| {
            HrmError::InvalidInput(format!("status must be 'Present' or 'Absent', got '{raw}'"))
        })
    }
}

/// A persisted attendance entry. At most one exists per employee and day.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[schema(example = json!({
    "id": 12,
    "employee_id": "EMP001",
    "date": "2024-01-15",
    "status": "Present",
    "created_at": "2024-01-15T09:30:00Z"
}))]
pub struct AttendanceRecord {
    pub id: u64,
    #[schema(value_type = String, example = "EMP001")]
    pub employee_id: EmployeeId,
    #[schema(value_type = String, format = "date")]
    pub date: AttendanceDate,
    pub status: AttendanceStatus,
    #[schema(value_type = String, format = "date-time")]
    pub created_at: DateTime<Utc>,
}

/// Request body of `POST /attendance/`.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct MarkAttendance {
    #[schema(example = "EMP001")]
    pub employee_id: String,
    #[schema(example = "2024-01-15", format = "date")]
    pub date: String,
    #[schema(example = "Present")]
    pub status: String,
}

/// Request body of `PATCH /attendance/{record_id}`.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct UpdateAttendance {
    #[schema(example = "Absent")]
    pub status: String,
}

/// A validated attendance entry ready to be inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAttendance {
    pub employee_id: EmployeeId,
    pub date: AttendanceDate,
    pub status: AttendanceStatus,
    pub created_at: DateTime<Utc>,
}

impl NewAttendance {
    pub fn new(employee_id: EmployeeId, date: AttendanceDate, status: AttendanceStatus) -> Self {
        Self {
            employee_id,
            date,
            status,
            created_at: Utc::now(),
        }
    }
}

impl TryFrom<MarkAttendance> for NewAttendance {
    type Error = HrmError;

    fn try_from(req: MarkAttendance) -> Result<Self, Self::Error> {
        Ok(Self::new(
            EmployeeId::parse(&req.employee_id)?,
            req.date.parse()?,
            AttendanceStatus::parse(&req.status)?,
        ))
    }
}

/// Query of `GET /attendance/summary`.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SummaryQuery {
    /// Restrict the summary to a single employee
    pub employee_id: Option<String>,
}

/// Query of `GET /attendance/filter`.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DateRangeQuery {
    /// First day included, `YYYY-MM-DD`
    pub start_date: String,
    /// Last day included, `YYYY-MM-DD`
    pub end_date: String,
}

/// Inclusive range of days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: AttendanceDate,
    pub end: AttendanceDate,
}

impl DateRange {
    pub fn contains(&self, date: AttendanceDate) -> bool {
        self.start <= date && date <= self.end
    }
}

impl TryFrom<&DateRangeQuery> for DateRange {
    type Error = HrmError;

    fn try_from(query: &DateRangeQuery) -> Result<Self, Self::Error> {
        Ok(Self {
            start: query.start_date.parse()?,
            end: query.end_date.parse()?,
        })
    }
}

/// Per-employee counts as produced by the store's grouped query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendanceTally {
    pub employee_id: EmployeeId,
    pub full_name: String,
    pub total_present: u64,
    pub total_absent: u64,
    pub total_records: u64,
}

/// Derived attendance statistics for one employee.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[schema(example = json!({
    "employee_id": "EMP001",
    "full_name": "John Doe",
    "total_present": 2,
    "total_absent": 1,
    "total_records": 3,
    "attendance_percentage": 66.66666666666667
}))]
pub struct AttendanceSummary {
    #[schema(value_type = String)]
    pub employee_id: EmployeeId,
    pub full_name: String,
    pub total_present: u64,
    pub total_absent: u64,
    pub total_records: u64,
    pub attendance_percentage: f64,
}

impl From<AttendanceTally> for AttendanceSummary {
    fn from(tally: AttendanceTally) -> Self {
        // a tally only exists for employees with at least one record
        let attendance_percentage = if tally.total_records == 0 {
            0.0
        } else {
            tally.total_present as f64 / tally.total_records as f64 * 100.0
        };

        Self {
            employee_id: tally.employee_id,
            full_name: tally.full_name,
            total_present: tally.total_present,
            total_absent: tally.total_absent,
            total_records: tally.total_records,
            attendance_percentage,
        }
    }
}
