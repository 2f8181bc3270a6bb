use std::str::FromStr;

use actix_web::{HttpResponse, Responder, error::ErrorInternalServerError, web};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::MySqlPool;
use tracing::{error, info};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::model::department::Department;
use crate::model::employee::Employee;

#[derive(Deserialize, ToSchema)]
pub struct CreateEmployee {
    #[schema(example = "EMP001", value_type = String)]
    pub employee_id: String,
    #[schema(example = "John Doe", value_type = String)]
    pub full_name: String,
    #[schema(example = "john.doe@example.com", format = "email", value_type = String)]
    pub email: String,
    #[schema(example = "Engineering", value_type = String)]
    pub department: String,
}

#[derive(Serialize, ToSchema)]
pub struct EmployeeListResponse {
    #[schema(
    example = json!([{
        "id": "550e8400-e29b-41d4-a716-446655440000",
        "employee_id": "EMP001",
        "full_name": "John Doe",
        "email": "john.doe@example.com",
        "department": "Engineering",
        "created_at": "2026-01-01T09:00:00"
    }])
)]
    pub employees: Vec<Employee>,
    #[schema(example = 1)]
    pub total: i64,
}

fn validate_new_employee(payload: &CreateEmployee) -> Result<(), String> {
    if payload.employee_id.is_empty() || payload.employee_id.len() > 20 {
        return Err("Employee ID must be 1-20 characters".to_string());
    }
    if payload.full_name.is_empty() || payload.full_name.len() > 100 {
        return Err("Full name must be 1-100 characters".to_string());
    }
    if payload.email.is_empty() || !payload.email.contains('@') {
        return Err("A valid email address is required".to_string());
    }
    if payload.department.is_empty() || payload.department.len() > 50 {
        return Err("Department must be 1-50 characters".to_string());
    }
    if Department::from_str(&payload.department).is_err() {
        return Err(format!(
            "Unknown department '{}'. Accepted values: {}",
            payload.department,
            Department::accepted_values()
        ));
    }
    Ok(())
}

/// Create Employee
#[utoipa::path(
    post,
    path = "/api/employees",
    request_body = CreateEmployee,
    responses(
        (status = 201, description = "Employee created", body = Employee),
        (status = 400, description = "Validation failed", body = Object, example = json!({
            "message": "Employee ID must be 1-20 characters"
        })),
        (status = 409, description = "Employee ID or email already taken", body = Object, example = json!({
            "message": "Employee with ID 'EMP001' already exists"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Employee"
)]
pub async fn create_employee(
    pool: web::Data<MySqlPool>,
    payload: web::Json<CreateEmployee>,
) -> actix_web::Result<impl Responder> {
    let payload = payload.into_inner();

    if let Err(message) = validate_new_employee(&payload) {
        return Ok(HttpResponse::BadRequest().json(json!({ "message": message })));
    }

    let employee = Employee {
        id: Uuid::new_v4().to_string(),
        employee_id: payload.employee_id,
        full_name: payload.full_name,
        email: payload.email,
        department: payload.department,
        created_at: Utc::now().naive_utc(),
    };

    let result = sqlx::query(
        r#"
        INSERT INTO employees (id, employee_id, full_name, email, department, created_at)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&employee.id)
    .bind(&employee.employee_id)
    .bind(&employee.full_name)
    .bind(&employee.email)
    .bind(&employee.department)
    .bind(employee.created_at)
    .execute(pool.get_ref())
    .await;

    match result {
        Ok(_) => {
            info!(employee_id = %employee.employee_id, department = %employee.department, "Employee created");
            Ok(HttpResponse::Created().json(employee))
        }

        Err(e) => {
            // Unique key collision on employee_id or email
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.code().as_deref() == Some("23000") {
                    let message = if db_err.message().contains("uq_employees_employee_id") {
                        format!("Employee with ID '{}' already exists", employee.employee_id)
                    } else if db_err.message().contains("uq_employees_email") {
                        format!("Employee with email '{}' already exists", employee.email)
                    } else {
                        "Employee with this ID or email already exists".to_string()
                    };
                    return Ok(HttpResponse::Conflict().json(json!({ "message": message })));
                }
            }

            error!(error = %e, employee_id = %employee.employee_id, "Failed to create employee");
            Ok(HttpResponse::InternalServerError().json(json!({
                "message": "Internal Server Error"
            })))
        }
    }
}

/// List all employees, oldest first
#[utoipa::path(
    get,
    path = "/api/employees",
    responses(
        (status = 200, description = "Employee list", body = EmployeeListResponse),
        (status = 500, description = "Internal server error")
    ),
    tag = "Employee"
)]
pub async fn list_employees(pool: web::Data<MySqlPool>) -> actix_web::Result<impl Responder> {
    let employees = sqlx::query_as::<_, Employee>(
        r#"
        SELECT id, employee_id, full_name, email, department, created_at
        FROM employees
        ORDER BY created_at, id
        "#,
    )
    .fetch_all(pool.get_ref())
    .await
    .map_err(|e| {
        error!(error = %e, "Failed to fetch employees");
        ErrorInternalServerError("Database error")
    })?;

    let total = employees.len() as i64;
    Ok(HttpResponse::Ok().json(EmployeeListResponse { employees, total }))
}

/// Get Employee by business key
#[utoipa::path(
    get,
    path = "/api/employees/{employee_id}",
    params(
        ("employee_id", Path, description = "Employee business key")
    ),
    responses(
        (status = 200, description = "Employee found", body = Employee),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "message": "Employee with ID 'EMP001' not found"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Employee"
)]
pub async fn get_employee(
    pool: web::Data<MySqlPool>,
    path: web::Path<String>,
) -> actix_web::Result<impl Responder> {
    let employee_id = path.into_inner();

    let employee = find_employee(pool.get_ref(), &employee_id).await.map_err(|e| {
        error!(error = %e, %employee_id, "Failed to fetch employee");
        ErrorInternalServerError("Internal Server Error")
    })?;

    match employee {
        Some(emp) => Ok(HttpResponse::Ok().json(emp)),
        None => Ok(HttpResponse::NotFound().json(json!({
            "message": format!("Employee with ID '{}' not found", employee_id)
        }))),
    }
}

/// Delete Employee
///
/// Removes the employee and every attendance record marked for them.
#[utoipa::path(
    delete,
    path = "/api/employees/{employee_id}",
    params(
        ("employee_id", Path, description = "Employee business key")
    ),
    responses(
        (status = 200, description = "Successfully deleted", body = Object, example = json!({
            "message": "Employee 'EMP001' deleted successfully"
        })),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "message": "Employee with ID 'EMP001' not found"
        })),
        (status = 500, description = "Internal server error", body = Object)
    ),
    tag = "Employee"
)]
pub async fn delete_employee(
    pool: web::Data<MySqlPool>,
    path: web::Path<String>,
) -> actix_web::Result<impl Responder> {
    let employee_id = path.into_inner();

    let result = sqlx::query(r#"DELETE FROM employees WHERE employee_id = ?"#)
        .bind(&employee_id)
        .execute(pool.get_ref())
        .await;

    match result {
        Ok(res) => {
            if res.rows_affected() == 0 {
                return Ok(HttpResponse::NotFound().json(json!({
                    "message": format!("Employee with ID '{}' not found", employee_id)
                })));
            }

            // Attendance rows for the deleted employee go with it
            sqlx::query(r#"DELETE FROM attendance WHERE employee_id = ?"#)
                .bind(&employee_id)
                .execute(pool.get_ref())
                .await
                .map_err(|e| {
                    error!(error = %e, %employee_id, "Failed to delete attendance for employee");
                    ErrorInternalServerError("Internal Server Error")
                })?;

            info!(%employee_id, "Employee deleted");
            Ok(HttpResponse::Ok().json(json!({
                "message": format!("Employee '{}' deleted successfully", employee_id)
            })))
        }

        Err(e) => {
            error!(error = %e, %employee_id, "Failed to delete employee");
            Ok(HttpResponse::InternalServerError().json(json!({
                "message": "Internal Server Error"
            })))
        }
    }
}

/// Look up one employee by business key.
pub(crate) async fn find_employee(
    pool: &MySqlPool,
    employee_id: &str,
) -> Result<Option<Employee>, sqlx::Error> {
    sqlx::query_as::<_, Employee>(
        r#"
        SELECT id, employee_id, full_name, email, department, created_at
        FROM employees
        WHERE employee_id = ?
        "#,
    )
    .bind(employee_id)
    .fetch_optional(pool)
    .await
}
