use actix_web::{HttpResponse, web};

use crate::error::HrmError;
use crate::model::{
    AttendanceStatus, DateRange, DateRangeQuery, EmployeeId, MarkAttendance, NewAttendance,
    SummaryQuery, UpdateAttendance,
};
use crate::service::{AttendanceLedger, SummaryAggregator};

/// Mark attendance for one employee and day
#[utoipa::path(
    post,
    path = "/attendance/",
    request_body = MarkAttendance,
    responses(
        (status = 201, description = "Attendance marked", body = AttendanceRecord),
        (status = 400, description = "Attendance already marked for that day", body = Object, example = json!({
            "error": "conflict",
            "detail": "Attendance for employee EMP001 on 2024-01-15 already exists"
        })),
        (status = 404, description = "Employee not found"),
        (status = 422, description = "Malformed date, status or employee id"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
pub async fn mark_attendance(
    ledger: web::Data<AttendanceLedger>,
    payload: web::Json<MarkAttendance>,
) -> Result<HttpResponse, HrmError> {
    let new = NewAttendance::try_from(payload.into_inner())?;
    let record = ledger.mark(new).await?;
    Ok(HttpResponse::Created().json(record))
}

/// Attendance of one employee, newest date first
#[utoipa::path(
    get,
    path = "/attendance/employee/{employee_id}",
    params(
        ("employee_id", Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Attendance records", body = [AttendanceRecord]),
        (status = 404, description = "Employee not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
pub async fn employee_attendance(
    ledger: web::Data<AttendanceLedger>,
    path: web::Path<String>,
) -> Result<HttpResponse, HrmError> {
    let employee_id = EmployeeId::parse(&path.into_inner())?;
    Ok(HttpResponse::Ok().json(ledger.by_employee(&employee_id).await?))
}

/// Every attendance record, newest date first
#[utoipa::path(
    get,
    path = "/attendance/all",
    responses(
        (status = 200, description = "Attendance records", body = [AttendanceRecord]),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
pub async fn all_attendance(ledger: web::Data<AttendanceLedger>) -> Result<HttpResponse, HrmError> {
    Ok(HttpResponse::Ok().json(ledger.all().await?))
}

/// Present/absent totals per employee
#[utoipa::path(
    get,
    path = "/attendance/summary",
    params(SummaryQuery),
    responses(
        (status = 200, description = "Summary per employee with at least one record", body = [AttendanceSummary]),
        (status = 422, description = "Malformed employee id"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
pub async fn attendance_summary(
    aggregator: web::Data<SummaryAggregator>,
    query: web::Query<SummaryQuery>,
) -> Result<HttpResponse, HrmError> {
    let employee_id = query
        .employee_id
        .as_deref()
        .map(EmployeeId::parse)
        .transpose()?;
    Ok(HttpResponse::Ok().json(aggregator.summarize(employee_id.as_ref()).await?))
}

/// Attendance within an inclusive date range
#[utoipa::path(
    get,
    path = "/attendance/filter",
    params(DateRangeQuery),
    responses(
        (status = 200, description = "Attendance records in range", body = [AttendanceRecord]),
        (status = 422, description = "Malformed date"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
pub async fn filter_attendance(
    ledger: web::Data<AttendanceLedger>,
    query: web::Query<DateRangeQuery>,
) -> Result<HttpResponse, HrmError> {
    let range = DateRange::try_from(&*query)?;
    Ok(HttpResponse::Ok().json(ledger.filter_by_date_range(range).await?))
}

/// Correct the status of an existing record
#[utoipa::path(
    patch,
    path = "/attendance/{record_id}",
    params(
        ("record_id", Path, description = "Attendance record ID")
    ),
    request_body = UpdateAttendance,
    responses(
        (status = 200, description = "Attendance updated", body = AttendanceRecord),
        (status = 404, description = "Attendance record not found"),
        (status = 422, description = "Malformed status"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
pub async fn update_attendance(
    ledger: web::Data<AttendanceLedger>,
    path: web::Path<u64>,
    payload: web::Json<UpdateAttendance>,
) -> Result<HttpResponse, HrmError> {
    let status = AttendanceStatus::parse(&payload.status)?;
    let record = ledger.update_status(path.into_inner(), status).await?;
    Ok(HttpResponse::Ok().json(record))
}
