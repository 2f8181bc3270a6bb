use crate::api::attendance::{AttendanceListResponse, MarkAttendance};
use crate::api::employee::{CreateEmployee, EmployeeListResponse};
use crate::api::reports::{AttendanceReport, DashboardReport, EmployeeAttendanceReport};
use crate::model::attendance::{AttendanceRecord, AttendanceStatus};
use crate::model::employee::Employee;
use crate::stats::{
    AttendanceSummary, DailyAttendance, DepartmentStat, EmployeeStat, TodaySummary,
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "HRMS Lite API",
        version = "1.0.0",
        description = r#"
## HRMS Lite

A lightweight Human Resource Management System API.

### 🔹 Key Features
- **Employee Management**
  - Register, list, view, and delete employees
- **Attendance Management**
  - Mark daily Present/Absent records, list them globally or per employee
- **Reports**
  - Dashboard aggregates, per-day breakdowns, and per-employee summaries,
    recomputed from the live data on every request

### 📦 Response Format
- JSON-based RESTful responses
- Errors carry a human-readable `message` field

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::employee::create_employee,
        crate::api::employee::list_employees,
        crate::api::employee::get_employee,
        crate::api::employee::delete_employee,

        crate::api::attendance::mark_attendance,
        crate::api::attendance::list_attendance,
        crate::api::attendance::employee_attendance,

        crate::api::reports::dashboard_report,
        crate::api::reports::attendance_report,
        crate::api::reports::employee_report
    ),
    components(
        schemas(
            CreateEmployee,
            Employee,
            EmployeeListResponse,
            MarkAttendance,
            AttendanceStatus,
            AttendanceRecord,
            AttendanceListResponse,
            DashboardReport,
            AttendanceReport,
            EmployeeAttendanceReport,
            EmployeeStat,
            DepartmentStat,
            DailyAttendance,
            TodaySummary,
            AttendanceSummary
        )
    ),
    tags(
        (name = "Employee", description = "Employee management APIs"),
        (name = "Attendance", description = "Attendance management APIs"),
        (name = "Reports", description = "Derived attendance statistics"),
    )
)]
pub struct ApiDoc;
