//! Per-field predicates applied before any write.
//!
//! Candidate values arrive as raw JSON values (forms are converted to the same
//! shape by the HTML adapter). A value is *absent* when it is missing, `null`
//! or an empty string; absent values are never validated.

use crate::error::{Field, ValidationError};
use chrono::NaiveDate;
use common::model::DATE_FORMAT;
use serde_json::Value;

/// Returns the value unless it counts as absent.
pub fn present(value: &Option<Value>) -> Option<&Value> {
    match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) if s.is_empty() => None,
        Some(other) => Some(other),
    }
}

/// Letters and digits only, at least one character.
pub fn is_alphanumeric(text: &str) -> bool {
    !text.is_empty() && text.chars().all(char::is_alphanumeric)
}

/// Empty or made only of whitespace.
pub fn is_blank(text: &str) -> bool {
    text.chars().all(char::is_whitespace)
}

/// The value as a string, or `WrongType` for any other JSON type.
pub fn text(value: &Value, field: Field) -> Result<&str, ValidationError> {
    value.as_str().ok_or(ValidationError::WrongType(field))
}

/// Text restricted to letters and digits, as required for teacher and
/// university names on update.
pub fn alphanumeric(value: &Value, field: Field) -> Result<&str, ValidationError> {
    let text = text(value, field)?;
    if is_alphanumeric(text) {
        Ok(text)
    } else {
        Err(ValidationError::Symbols(field))
    }
}

/// Parses a `YYYY-MM-DD` date. Surrounding whitespace and non-string values
/// are format errors too.
pub fn birth_date(value: &Value) -> Result<NaiveDate, ValidationError> {
    value
        .as_str()
        .filter(|s| s.trim() == *s)
        .and_then(|s| NaiveDate::parse_from_str(s, DATE_FORMAT).ok())
        .ok_or(ValidationError::DateFormat)
}

/// Accepts JSON integers only. Booleans, floats and strings are rejected
/// with `err`.
pub fn salary(value: &Value, err: ValidationError) -> Result<i64, ValidationError> {
    match value {
        Value::Number(n) => n.as_i64().ok_or(err),
        _ => Err(err),
    }
}

/// Converts a salary typed into an HTML form into the JSON shape the
/// validators expect. Text that is not an integer stays text and is rejected
/// later.
pub fn salary_from_form(raw: &str) -> Value {
    let trimmed = raw.trim();
    match trimmed.parse::<i64>() {
        Ok(n) => Value::from(n),
        Err(_) => Value::String(raw.to_string()),
    }
}
