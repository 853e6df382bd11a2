//! Error types shared by the storage layer, the core services and both adapters.
//!
//! - `ValidationError`: a user supplied a missing, malformed or unknown value.
//!   Its `Display` is the message shown to the user.
//! - `StoreError`: the database refused a statement.
//! - `ServiceError`: what every core operation returns. It maps onto the HTTP
//!   status used by the JSON API (`400` for user errors, `412` for persistence).

use std::fmt;
use thiserror::Error;

/// Field named in a validation message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    LastName,
    Location,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Field::Name => "name",
            Field::LastName => "last name",
            Field::Location => "location",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Some data was not written.")]
    MissingFields,

    #[error("Some date was not given.")]
    MissingDates,

    #[error("Symbols in {0} are not allowed.")]
    Symbols(Field),

    #[error("Some fields contain not allowed symbols.")]
    UniversitySymbols,

    #[error("Field {0} has an incorrect data type.")]
    WrongType(Field),

    #[error("Incorrect date format.")]
    DateFormat,

    /// Partial update received a salary that is not an integer.
    #[error("Salary is not integer.")]
    SalaryNotInteger,

    /// Creation received a salary that is not an integer.
    #[error("Incorrect salary format. Salary must be integer.")]
    SalaryFormat,

    #[error("Wrong university name.")]
    UnknownUniversity,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Kind of record an id lookup was made for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    University,
    Teacher,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::University => f.write_str("university"),
            EntityKind::Teacher => f.write_str("teacher"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("No {0} was found with given id.")]
    NotFound(EntityKind),

    #[error("No new data was given.")]
    NothingToUpdate,

    #[error("failed to write to the database: {0}")]
    Persistence(#[from] StoreError),
}

impl From<rusqlite::Error> for ServiceError {
    fn from(err: rusqlite::Error) -> Self {
        ServiceError::Persistence(StoreError::Sqlite(err))
    }
}

impl ServiceError {
    /// Status code carried by the JSON error envelope.
    pub fn status(&self) -> u16 {
        match self {
            ServiceError::Persistence(_) => 412,
            _ => 400,
        }
    }

    /// Message safe to show to a user. Storage details are only logged.
    pub fn user_message(&self) -> String {
        match self {
            ServiceError::Persistence(_) => "Failed to write to the database.".to_string(),
            other => other.to_string(),
        }
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_messages() {
        assert_eq!(
            ValidationError::Symbols(Field::LastName).to_string(),
            "Symbols in last name are not allowed."
        );
        assert_eq!(
            ValidationError::UnknownUniversity.to_string(),
            "Wrong university name."
        );
    }

    fn sqlite_failure() -> StoreError {
        StoreError::Sqlite(rusqlite::Error::QueryReturnedNoRows)
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(ServiceError::from(ValidationError::DateFormat).status(), 400);
        assert_eq!(ServiceError::NotFound(EntityKind::Teacher).status(), 400);
        assert_eq!(ServiceError::NothingToUpdate.status(), 400);
        assert_eq!(ServiceError::Persistence(sqlite_failure()).status(), 412);
    }

    #[test]
    fn test_persistence_message_hides_details() {
        let err = ServiceError::Persistence(sqlite_failure());
        assert_eq!(err.user_message(), "Failed to write to the database.");
        assert_eq!(
            ServiceError::NotFound(EntityKind::University).user_message(),
            "No university was found with given id."
        );
    }
}
