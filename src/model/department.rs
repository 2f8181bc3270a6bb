use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use utoipa::ToSchema;

/// Departments accepted at employee registration. Stored as plain strings;
/// aggregation code must tolerate values outside this set.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum_macros::Display,
    strum_macros::EnumString,
    strum_macros::EnumIter,
    ToSchema,
)]
pub enum Department {
    Engineering,
    Marketing,
    #[serde(rename = "Human Resources")]
    #[strum(serialize = "Human Resources")]
    HumanResources,
    Finance,
    Sales,
    Operations,
}

impl Department {
    /// Comma-separated list of accepted names, for validation messages.
    pub fn accepted_values() -> String {
        Department::iter()
            .map(|d| d.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}
