use actix_web::{HttpResponse, Responder, error::ErrorInternalServerError, web};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::MySqlPool;
use tracing::error;
use utoipa::{IntoParams, ToSchema};

use crate::api::attendance::{fetch_all_attendance, fetch_employee_attendance};
use crate::api::employee::find_employee;
use crate::model::attendance::AttendanceRecord;
use crate::model::employee::Employee;
use crate::stats::{
    self, AttendanceSummary, DailyAttendance, DepartmentStat, EmployeeStat, TodaySummary,
};

/// How many records the dashboard's recent-activity panel shows.
const RECENT_LIMIT: usize = 5;

#[derive(Serialize, ToSchema)]
pub struct DashboardReport {
    #[schema(example = 12)]
    pub total_employees: i64,
    #[schema(example = 240)]
    pub total_records: i64,
    pub today: TodaySummary,
    /// Departments in first-seen registration order
    pub departments: Vec<DepartmentStat>,
    /// One row per employee, best attendance rate first
    pub employees: Vec<EmployeeStat>,
    /// Most recent records, newest date first
    pub recent: Vec<AttendanceRecord>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct AttendanceReportQuery {
    /// Exact-date filter (YYYY-MM-DD)
    #[param(example = "2026-02-04", value_type = Option<String>, format = "date")]
    pub date: Option<NaiveDate>,
}

#[derive(Serialize, ToSchema)]
pub struct AttendanceReport {
    #[schema(example = 240)]
    pub total: i64,
    #[schema(example = 200)]
    pub present: u32,
    #[schema(example = 40)]
    pub absent: u32,
    /// Every date with at least one record, most recent first; unaffected by
    /// the date filter so selectors can offer the full set
    #[schema(value_type = Vec<String>)]
    pub dates: Vec<NaiveDate>,
    /// Per-day breakdown of the (possibly filtered) records
    pub days: Vec<DailyAttendance>,
}

#[derive(Serialize, ToSchema)]
pub struct EmployeeAttendanceReport {
    pub employee: Employee,
    pub summary: AttendanceSummary,
    /// Full history, most recent date first
    pub records: Vec<AttendanceRecord>,
}

/// Dashboard report
///
/// Recomputes every aggregate from a fresh snapshot on each call. "Today" is
/// the server-local date, taken once per request.
#[utoipa::path(
    get,
    path = "/api/reports/dashboard",
    responses(
        (status = 200, description = "Dashboard aggregates", body = DashboardReport),
        (status = 500, description = "Internal server error")
    ),
    tag = "Reports"
)]
pub async fn dashboard_report(pool: web::Data<MySqlPool>) -> actix_web::Result<impl Responder> {
    let employees = fetch_employees(pool.get_ref()).await.map_err(|e| {
        error!(error = %e, "Failed to fetch employees for dashboard");
        ErrorInternalServerError("Database error")
    })?;
    let attendance = fetch_all_attendance(pool.get_ref()).await.map_err(|e| {
        error!(error = %e, "Failed to fetch attendance for dashboard");
        ErrorInternalServerError("Database error")
    })?;

    let today = Local::now().date_naive();
    let mut recent = stats::sorted_by_date_desc(&attendance);
    recent.truncate(RECENT_LIMIT);

    Ok(HttpResponse::Ok().json(DashboardReport {
        total_employees: employees.len() as i64,
        total_records: attendance.len() as i64,
        today: stats::today_summary(&attendance, today),
        departments: stats::department_distribution(&employees),
        employees: stats::per_employee_stats(&employees, &attendance),
        recent,
    }))
}

/// Date-grouped attendance report
#[utoipa::path(
    get,
    path = "/api/reports/attendance",
    params(AttendanceReportQuery),
    responses(
        (status = 200, description = "Per-day attendance breakdown", body = AttendanceReport),
        (status = 500, description = "Internal server error")
    ),
    tag = "Reports"
)]
pub async fn attendance_report(
    pool: web::Data<MySqlPool>,
    query: web::Query<AttendanceReportQuery>,
) -> actix_web::Result<impl Responder> {
    let attendance = fetch_all_attendance(pool.get_ref()).await.map_err(|e| {
        error!(error = %e, "Failed to fetch attendance for report");
        ErrorInternalServerError("Database error")
    })?;

    let dates = stats::distinct_dates(&attendance);
    let filtered: Vec<AttendanceRecord> = match query.date {
        Some(date) => attendance.into_iter().filter(|r| r.date == date).collect(),
        None => attendance,
    };
    let days = stats::group_by_date(&filtered);

    Ok(HttpResponse::Ok().json(AttendanceReport {
        total: filtered.len() as i64,
        present: days.iter().map(|d| d.present).sum(),
        absent: days.iter().map(|d| d.absent).sum(),
        dates,
        days,
    }))
}

/// Single-employee attendance report
#[utoipa::path(
    get,
    path = "/api/reports/employees/{employee_id}",
    params(
        ("employee_id", Path, description = "Employee business key")
    ),
    responses(
        (status = 200, description = "Summary and history for one employee", body = EmployeeAttendanceReport),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "message": "Employee with ID 'EMP001' not found"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Reports"
)]
pub async fn employee_report(
    pool: web::Data<MySqlPool>,
    path: web::Path<String>,
) -> actix_web::Result<impl Responder> {
    let employee_id = path.into_inner();

    let employee = find_employee(pool.get_ref(), &employee_id).await.map_err(|e| {
        error!(error = %e, %employee_id, "Failed to look up employee");
        ErrorInternalServerError("Internal Server Error")
    })?;

    let Some(employee) = employee else {
        return Ok(HttpResponse::NotFound().json(json!({
            "message": format!("Employee with ID '{}' not found", employee_id)
        })));
    };

    let records = fetch_employee_attendance(pool.get_ref(), &employee_id)
        .await
        .map_err(|e| {
            error!(error = %e, %employee_id, "Failed to fetch attendance history");
            ErrorInternalServerError("Database error")
        })?;

    Ok(HttpResponse::Ok().json(EmployeeAttendanceReport {
        summary: stats::attendance_summary(&records),
        records: stats::sorted_by_date_desc(&records),
        employee,
    }))
}

async fn fetch_employees(pool: &MySqlPool) -> Result<Vec<Employee>, sqlx::Error> {
    sqlx::query_as::<_, Employee>(
        r#"
        SELECT id, employee_id, full_name, email, department, created_at
        FROM employees
        ORDER BY created_at, id
        "#,
    )
    .fetch_all(pool)
    .await
}
