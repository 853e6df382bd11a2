//! Raw request payloads.
//!
//! Every field is kept as an untyped JSON value so the backend can tell a
//! missing field from a field of the wrong type and report the right message.

use serde::Deserialize;
use serde_json::Value;

/// Candidate fields for creating or partially updating a teacher.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct TeacherPayload {
    #[serde(default)]
    pub name: Option<Value>,
    #[serde(default)]
    pub last_name: Option<Value>,
    #[serde(default)]
    pub birth_date: Option<Value>,
    #[serde(default)]
    pub salary: Option<Value>,
    /// Name of the university, resolved by the backend.
    #[serde(default)]
    pub university: Option<Value>,
}

/// Candidate fields for creating or partially updating a university.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct UniversityPayload {
    #[serde(default)]
    pub name: Option<Value>,
    #[serde(default)]
    pub location: Option<Value>,
}

/// Inclusive birth date range used by the teacher search.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct DateRangeRequest {
    #[serde(default)]
    pub date_from: Option<Value>,
    #[serde(default)]
    pub date_to: Option<Value>,
}
