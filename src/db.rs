use anyhow::Result;
use sqlx::MySqlPool;

pub async fn init_db(database_url: &str) -> MySqlPool {
    MySqlPool::connect(database_url)
        .await
        .expect("Failed to connect to database")
}

/// Create tables and indexes if they do not exist yet. Runs once at startup.
///
/// `attendance` carries no unique key on (employee_id, date); repeated
/// markings for the same employee and day are stored as separate rows.
pub async fn ensure_schema(pool: &MySqlPool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS employees (
            id CHAR(36) NOT NULL,
            employee_id VARCHAR(20) NOT NULL,
            full_name VARCHAR(100) NOT NULL,
            email VARCHAR(255) NOT NULL,
            department VARCHAR(50) NOT NULL,
            created_at DATETIME(6) NOT NULL,
            PRIMARY KEY (id),
            UNIQUE KEY uq_employees_employee_id (employee_id),
            UNIQUE KEY uq_employees_email (email)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS attendance (
            id CHAR(36) NOT NULL,
            employee_id VARCHAR(20) NOT NULL,
            employee_name VARCHAR(100) NOT NULL,
            date DATE NOT NULL,
            status VARCHAR(10) NOT NULL,
            created_at DATETIME(6) NOT NULL,
            PRIMARY KEY (id),
            KEY ix_attendance_employee_id (employee_id),
            KEY ix_attendance_date (date)
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
