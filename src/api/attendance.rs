use actix_web::{HttpResponse, Responder, error::ErrorInternalServerError, web};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::MySqlPool;
use tracing::{error, info};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::api::employee::find_employee;
use crate::model::attendance::{AttendanceRecord, AttendanceStatus};

#[derive(Deserialize, ToSchema)]
pub struct MarkAttendance {
    #[schema(example = "EMP001", value_type = String)]
    pub employee_id: String,
    #[schema(example = "2026-02-04", format = "date", value_type = String)]
    pub date: NaiveDate,
    #[schema(example = "Present")]
    pub status: AttendanceStatus,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct AttendanceQuery {
    /// Exact-date filter (YYYY-MM-DD)
    #[param(example = "2026-02-04", value_type = Option<String>, format = "date")]
    pub date: Option<NaiveDate>,
}

#[derive(Serialize, ToSchema)]
pub struct AttendanceListResponse {
    #[schema(
    example = json!([{
        "id": "9b2f1c3a-5d6e-4f70-8a91-b2c3d4e5f607",
        "employee_id": "EMP001",
        "employee_name": "John Doe",
        "date": "2026-02-04",
        "status": "Present"
    }])
)]
    pub records: Vec<AttendanceRecord>,
    #[schema(example = 1)]
    pub total: i64,
}

/// Mark attendance
///
/// Captures the employee's display name as of now. Marking the same employee
/// twice for one day creates two records; nothing deduplicates them.
#[utoipa::path(
    post,
    path = "/api/attendance",
    request_body = MarkAttendance,
    responses(
        (status = 201, description = "Attendance marked", body = AttendanceRecord),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "message": "Employee with ID 'EMP001' not found"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
pub async fn mark_attendance(
    pool: web::Data<MySqlPool>,
    payload: web::Json<MarkAttendance>,
) -> actix_web::Result<impl Responder> {
    let payload = payload.into_inner();

    let employee = find_employee(pool.get_ref(), &payload.employee_id)
        .await
        .map_err(|e| {
            error!(error = %e, employee_id = %payload.employee_id, "Failed to look up employee");
            ErrorInternalServerError("Internal Server Error")
        })?;

    let Some(employee) = employee else {
        return Ok(HttpResponse::NotFound().json(json!({
            "message": format!("Employee with ID '{}' not found", payload.employee_id)
        })));
    };

    let record = AttendanceRecord {
        id: Uuid::new_v4().to_string(),
        employee_id: payload.employee_id,
        employee_name: employee.full_name,
        date: payload.date,
        status: payload.status,
    };

    let result = sqlx::query(
        r#"
        INSERT INTO attendance (id, employee_id, employee_name, date, status, created_at)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&record.id)
    .bind(&record.employee_id)
    .bind(&record.employee_name)
    .bind(record.date)
    .bind(record.status)
    .bind(Utc::now().naive_utc())
    .execute(pool.get_ref())
    .await;

    match result {
        Ok(_) => {
            info!(
                employee_id = %record.employee_id,
                date = %record.date,
                status = %record.status,
                "Attendance marked"
            );
            Ok(HttpResponse::Created().json(record))
        }

        Err(e) => {
            error!(error = %e, employee_id = %record.employee_id, "Failed to mark attendance");
            Ok(HttpResponse::InternalServerError().json(json!({
                "message": "Internal Server Error"
            })))
        }
    }
}

/// List attendance records, optionally for a single date
#[utoipa::path(
    get,
    path = "/api/attendance",
    params(AttendanceQuery),
    responses(
        (status = 200, description = "Attendance records", body = AttendanceListResponse),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
pub async fn list_attendance(
    pool: web::Data<MySqlPool>,
    query: web::Query<AttendanceQuery>,
) -> actix_web::Result<impl Responder> {
    let records = match query.date {
        Some(date) => fetch_attendance_for_date(pool.get_ref(), date).await,
        None => fetch_all_attendance(pool.get_ref()).await,
    }
    .map_err(|e| {
        error!(error = %e, "Failed to fetch attendance records");
        ErrorInternalServerError("Database error")
    })?;

    let total = records.len() as i64;
    Ok(HttpResponse::Ok().json(AttendanceListResponse { records, total }))
}

/// List one employee's attendance records
#[utoipa::path(
    get,
    path = "/api/attendance/{employee_id}",
    params(
        ("employee_id", Path, description = "Employee business key")
    ),
    responses(
        (status = 200, description = "Attendance records for the employee", body = AttendanceListResponse),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "message": "Employee with ID 'EMP001' not found"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
pub async fn employee_attendance(
    pool: web::Data<MySqlPool>,
    path: web::Path<String>,
) -> actix_web::Result<impl Responder> {
    let employee_id = path.into_inner();

    let employee = find_employee(pool.get_ref(), &employee_id).await.map_err(|e| {
        error!(error = %e, %employee_id, "Failed to look up employee");
        ErrorInternalServerError("Internal Server Error")
    })?;

    if employee.is_none() {
        return Ok(HttpResponse::NotFound().json(json!({
            "message": format!("Employee with ID '{}' not found", employee_id)
        })));
    }

    let records = fetch_employee_attendance(pool.get_ref(), &employee_id)
        .await
        .map_err(|e| {
            error!(error = %e, %employee_id, "Failed to fetch attendance records");
            ErrorInternalServerError("Database error")
        })?;

    let total = records.len() as i64;
    Ok(HttpResponse::Ok().json(AttendanceListResponse { records, total }))
}

const SELECT_ATTENDANCE: &str = r#"
    SELECT id, employee_id, employee_name, date, status
    FROM attendance
"#;

/// Full attendance snapshot, in marking order.
pub(crate) async fn fetch_all_attendance(
    pool: &MySqlPool,
) -> Result<Vec<AttendanceRecord>, sqlx::Error> {
    let sql = format!("{SELECT_ATTENDANCE} ORDER BY created_at, id");
    sqlx::query_as::<_, AttendanceRecord>(&sql).fetch_all(pool).await
}

async fn fetch_attendance_for_date(
    pool: &MySqlPool,
    date: NaiveDate,
) -> Result<Vec<AttendanceRecord>, sqlx::Error> {
    let sql = format!("{SELECT_ATTENDANCE} WHERE date = ? ORDER BY created_at, id");
    sqlx::query_as::<_, AttendanceRecord>(&sql)
        .bind(date)
        .fetch_all(pool)
        .await
}

pub(crate) async fn fetch_employee_attendance(
    pool: &MySqlPool,
    employee_id: &str,
) -> Result<Vec<AttendanceRecord>, sqlx::Error> {
    let sql = format!("{SELECT_ATTENDANCE} WHERE employee_id = ? ORDER BY created_at, id");
    sqlx::query_as::<_, AttendanceRecord>(&sql)
        .bind(employee_id)
        .fetch_all(pool)
        .await
}
