use crate::model::{
    AttendanceRecord, AttendanceStatus, AttendanceSummary, CreateEmployee, Employee,
    MarkAttendance, UpdateAttendance,
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "HRMS Lite API",
        version = "1.0.0",
        description = r#"
## Lightweight Human Resource Management

Two resources are exposed:
- **Employees**: create, list, view and delete (deleting also removes the employee's attendance)
- **Attendance**: one record per employee per day, status `Present` or `Absent`,
  with per-employee summaries and date range filtering

### Errors
Every failure is returned as `{"error": "<kind>", "detail": "<message>"}` where kind is one of
`not_found`, `conflict`, `invalid_input` or `unavailable`.
"#,
    ),
    paths(
        crate::api::health::index,
        crate::api::health::health,

        crate::api::employee::create_employee,
        crate::api::employee::list_employees,
        crate::api::employee::get_employee,
        crate::api::employee::delete_employee,

        crate::api::attendance::mark_attendance,
        crate::api::attendance::employee_attendance,
        crate::api::attendance::all_attendance,
        crate::api::attendance::attendance_summary,
        crate::api::attendance::filter_attendance,
        crate::api::attendance::update_attendance
    ),
    components(
        schemas(
            Employee,
            CreateEmployee,
            AttendanceRecord,
            AttendanceStatus,
            AttendanceSummary,
            MarkAttendance,
            UpdateAttendance
        )
    ),
    tags(
        (name = "Employee", description = "Employee management APIs"),
        (name = "Attendance", description = "Attendance management APIs"),
        (name = "Health", description = "Liveness and service info"),
    )
)]
pub struct ApiDoc;
