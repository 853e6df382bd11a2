use serde::{Deserialize, Serialize};

/// A university and the cached average salary of the teachers working there.
///
/// `average_salary` is a projection over `Teacher::salary`. It is refreshed
/// whenever the university collection is listed, so between a teacher change
/// and the next listing it may be stale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct University {
    pub id: i64,
    pub name: String,
    pub location: String,
    #[serde(default)]
    pub average_salary: i64,
}
