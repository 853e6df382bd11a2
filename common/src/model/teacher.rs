use crate::model::university::University;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A teacher together with the university it references.
///
/// `birth_date` serializes as `YYYY-MM-DD`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Teacher {
    pub id: i64,
    pub name: String,
    pub last_name: String,
    pub birth_date: NaiveDate,
    pub salary: i64,
    pub university: University,
}
