use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Daily attendance status.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    sqlx::Type,
    strum_macros::Display,
    strum_macros::EnumString,
    ToSchema,
)]
pub enum AttendanceStatus {
    Present,
    Absent,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "id": "9b2f1c3a-5d6e-4f70-8a91-b2c3d4e5f607",
        "employee_id": "EMP001",
        "employee_name": "John Doe",
        "date": "2026-02-04",
        "status": "Present"
    })
)]
pub struct AttendanceRecord {
    /// Store-assigned opaque id
    #[schema(example = "9b2f1c3a-5d6e-4f70-8a91-b2c3d4e5f607")]
    pub id: String,

    #[schema(example = "EMP001")]
    pub employee_id: String,

    /// Display name captured when the record was marked; not re-synced
    /// against later employee changes.
    #[schema(example = "John Doe")]
    pub employee_name: String,

    #[schema(example = "2026-02-04", value_type = String, format = "date")]
    pub date: NaiveDate,

    #[schema(example = "Present")]
    pub status: AttendanceStatus,
}
