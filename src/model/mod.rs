pub mod attendance;
pub mod employee;

pub use attendance::{
    AttendanceDate, AttendanceRecord, AttendanceStatus, AttendanceSummary, AttendanceTally,
    DateRange, DateRangeQuery, MarkAttendance, NewAttendance, SummaryQuery, UpdateAttendance,
};
pub use employee::{CreateEmployee, Employee, EmployeeId, NewEmployee};
