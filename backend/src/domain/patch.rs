//! Partial updates.
//!
//! A patch is applied field by field in a fixed order. For every field:
//! absent values are skipped, present values are validated, and valid values
//! that differ from the current one are assigned. The first invalid field
//! stops the patch; fields after it are not looked at.
//!
//! The functions mutate a detached copy of the record and report whether it
//! changed. Persisting the copy is left to the caller, so a rejected patch
//! never reaches the database.

use crate::domain::validation::{self, present};
use crate::error::{Field, ServiceResult, StoreError, ValidationError};
use common::model::{Teacher, University};
use common::requests::{TeacherPayload, UniversityPayload};

/// Assigns `value` when it differs from the current one.
fn assign<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        false
    } else {
        *slot = value;
        true
    }
}

/// Applies `patch` to `teacher` in the order
/// university → name → last_name → salary → birth_date.
///
/// `resolve` looks a university up by name.
pub fn apply_to_teacher<F>(
    teacher: &mut Teacher,
    patch: &TeacherPayload,
    mut resolve: F,
) -> ServiceResult<bool>
where
    F: FnMut(&str) -> Result<Option<University>, StoreError>,
{
    let mut changed = false;

    if let Some(value) = present(&patch.university) {
        let name = value.as_str().ok_or(ValidationError::UnknownUniversity)?;
        // Names are not unique, so the current name keeps the current university.
        if name != teacher.university.name {
            teacher.university = resolve(name)?.ok_or(ValidationError::UnknownUniversity)?;
            changed = true;
        }
    }
    if let Some(value) = present(&patch.name) {
        let name = validation::alphanumeric(value, Field::Name)?;
        changed |= assign(&mut teacher.name, name.to_string());
    }
    if let Some(value) = present(&patch.last_name) {
        let last_name = validation::alphanumeric(value, Field::LastName)?;
        changed |= assign(&mut teacher.last_name, last_name.to_string());
    }
    if let Some(value) = present(&patch.salary) {
        let salary = validation::salary(value, ValidationError::SalaryNotInteger)?;
        changed |= assign(&mut teacher.salary, salary);
    }
    if let Some(value) = present(&patch.birth_date) {
        let birth_date = validation::birth_date(value)?;
        changed |= assign(&mut teacher.birth_date, birth_date);
    }

    Ok(changed)
}

/// Applies `patch` to `university` in the order name → location.
pub fn apply_to_university(
    university: &mut University,
    patch: &UniversityPayload,
) -> ServiceResult<bool> {
    let mut changed = false;

    if let Some(value) = present(&patch.name) {
        let name = validation::alphanumeric(value, Field::Name)?;
        changed |= assign(&mut university.name, name.to_string());
    }
    if let Some(value) = present(&patch.location) {
        let location = validation::text(value, Field::Location)?;
        if validation::is_blank(location) {
            return Err(ValidationError::Symbols(Field::Location).into());
        }
        changed |= assign(&mut university.location, location.to_string());
    }

    Ok(changed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ServiceError;
    use chrono::NaiveDate;
    use serde_json::{json, Value};

    fn kpi() -> University {
        University {
            id: 1,
            name: "KPI".to_string(),
            location: "Kirpichova 17".to_string(),
            average_salary: 0,
        }
    }

    fn nure() -> University {
        University {
            id: 2,
            name: "NURE".to_string(),
            location: "Nauchna 14".to_string(),
            average_salary: 0,
        }
    }

    fn teacher() -> Teacher {
        Teacher {
            id: 7,
            name: "Andriy".to_string(),
            last_name: "Kovalenko".to_string(),
            birth_date: NaiveDate::from_ymd_opt(1987, 10, 12).unwrap(),
            salary: 1500,
            university: kpi(),
        }
    }

    fn resolver(name: &str) -> Result<Option<University>, StoreError> {
        Ok([kpi(), nure()].into_iter().find(|u| u.name == name))
    }

    fn validation_err(result: ServiceResult<bool>) -> ValidationError {
        match result {
            Err(ServiceError::Validation(err)) => err,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_absent_fields_are_a_no_op() {
        let mut t = teacher();
        let patch = TeacherPayload {
            name: Some(json!("")),
            last_name: Some(Value::Null),
            ..Default::default()
        };
        assert!(!apply_to_teacher(&mut t, &patch, resolver).unwrap());
        assert_eq!(t, teacher());

        let mut u = kpi();
        assert!(!apply_to_university(&mut u, &UniversityPayload::default()).unwrap());
    }

    #[test]
    fn test_same_values_are_a_no_op() {
        let mut t = teacher();
        let patch = TeacherPayload {
            name: Some(json!("Andriy")),
            salary: Some(json!(1500)),
            birth_date: Some(json!("1987-10-12")),
            university: Some(json!("KPI")),
            ..Default::default()
        };
        assert!(!apply_to_teacher(&mut t, &patch, resolver).unwrap());
    }

    #[test]
    fn test_changed_fields_are_applied() {
        let mut t = teacher();
        let patch = TeacherPayload {
            salary: Some(json!(1600)),
            university: Some(json!("NURE")),
            ..Default::default()
        };
        assert!(apply_to_teacher(&mut t, &patch, resolver).unwrap());
        assert_eq!(t.salary, 1600);
        assert_eq!(t.university, nure());
        assert_eq!(t.name, "Andriy");
    }

    #[test]
    fn test_university_is_checked_first() {
        let mut t = teacher();
        let patch = TeacherPayload {
            university: Some(json!("Unknown")),
            name: Some(json!("Bad!")),
            ..Default::default()
        };
        assert_eq!(
            validation_err(apply_to_teacher(&mut t, &patch, resolver)),
            ValidationError::UnknownUniversity
        );
    }

    #[test]
    fn test_current_university_name_keeps_university() {
        let mut t = teacher();
        t.university.id = 3;
        let patch = TeacherPayload {
            university: Some(json!("KPI")),
            salary: Some(json!(1600)),
            ..Default::default()
        };
        // The resolver knows another "KPI" with a lower id.
        assert!(apply_to_teacher(&mut t, &patch, resolver).unwrap());
        assert_eq!(t.university.id, 3);
        assert_eq!(t.salary, 1600);
    }

    #[test]
    fn test_name_is_checked_before_last_name() {
        let mut t = teacher();
        let patch = TeacherPayload {
            name: Some(json!("Andr!y")),
            last_name: Some(json!("Koval-enko")),
            ..Default::default()
        };
        assert_eq!(
            validation_err(apply_to_teacher(&mut t, &patch, resolver)),
            ValidationError::Symbols(Field::Name)
        );
        assert_eq!(t, teacher());
    }

    #[test]
    fn test_first_rejected_field_stops_the_patch() {
        let mut t = teacher();
        let patch = TeacherPayload {
            last_name: Some(json!("Kovalenko-Perova")),
            salary: Some(json!("abc")),
            birth_date: Some(json!("not-a-date")),
            ..Default::default()
        };
        assert_eq!(
            validation_err(apply_to_teacher(&mut t, &patch, resolver)),
            ValidationError::Symbols(Field::LastName)
        );

        let patch = TeacherPayload {
            salary: Some(json!(true)),
            birth_date: Some(json!("not-a-date")),
            ..Default::default()
        };
        assert_eq!(
            validation_err(apply_to_teacher(&mut t, &patch, resolver)),
            ValidationError::SalaryNotInteger
        );

        let patch = TeacherPayload {
            salary: Some(json!(2000)),
            birth_date: Some(json!("not-a-date")),
            ..Default::default()
        };
        assert_eq!(
            validation_err(apply_to_teacher(&mut t, &patch, resolver)),
            ValidationError::DateFormat
        );
    }

    #[test]
    fn test_university_patch() {
        let mut u = kpi();
        let patch = UniversityPayload {
            name: Some(json!("KPI")),
            location: Some(json!("Peremohy 37")),
        };
        assert!(apply_to_university(&mut u, &patch).unwrap());
        assert_eq!(u.location, "Peremohy 37");

        let patch = UniversityPayload {
            name: Some(json!("K P I")),
            location: Some(json!("   ")),
        };
        assert_eq!(
            validation_err(apply_to_university(&mut u, &patch)),
            ValidationError::Symbols(Field::Name)
        );

        let patch = UniversityPayload {
            name: None,
            location: Some(json!("   ")),
        };
        assert_eq!(
            validation_err(apply_to_university(&mut u, &patch)),
            ValidationError::Symbols(Field::Location)
        );

        let patch = UniversityPayload {
            name: Some(json!(5)),
            location: None,
        };
        assert_eq!(
            validation_err(apply_to_university(&mut u, &patch)),
            ValidationError::WrongType(Field::Name)
        );
    }
}
