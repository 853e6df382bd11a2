//! Teacher operations used by both the JSON API and the HTML views.

use crate::db::{teachers, universities, Database};
use crate::domain::patch;
use crate::domain::validation::{self, present};
use crate::error::{EntityKind, Field, ServiceError, ServiceResult, ValidationError};
use common::model::Teacher;
use common::requests::{DateRangeRequest, TeacherPayload};
use log::debug;

/// Every teacher, ordered by id.
pub fn list(db: &Database) -> ServiceResult<Vec<Teacher>> {
    db.with_connection(|conn| teachers::list(conn).map_err(ServiceError::from))
}

/// The teacher with this id, or `NotFound`.
pub fn get(db: &Database, id: i64) -> ServiceResult<Teacher> {
    db.with_connection(|conn| teachers::get(conn, id).map_err(ServiceError::from))?
        .ok_or(ServiceError::NotFound(EntityKind::Teacher))
}

/// Creates a teacher. Every field is required.
///
/// Checks run in this order, the first failure wins: all fields present,
/// university name resolves, birth date parses, salary is an integer.
pub fn create(db: &Database, payload: &TeacherPayload) -> ServiceResult<Teacher> {
    let (Some(name), Some(last_name), Some(birth_date), Some(salary), Some(university)) = (
        present(&payload.name),
        present(&payload.last_name),
        present(&payload.birth_date),
        present(&payload.salary),
        present(&payload.university),
    ) else {
        return Err(ValidationError::MissingFields.into());
    };

    db.with_connection(|conn| -> ServiceResult<Teacher> {
        let tx = conn.transaction()?;

        let university_name = university
            .as_str()
            .ok_or(ValidationError::UnknownUniversity)?;
        let university = universities::find_by_name(&tx, university_name)?
            .ok_or(ValidationError::UnknownUniversity)?;
        let birth_date = validation::birth_date(birth_date)?;
        let salary = validation::salary(salary, ValidationError::SalaryFormat)?;
        let name = validation::text(name, Field::Name)?;
        let last_name = validation::text(last_name, Field::LastName)?;

        let id = teachers::insert(&tx, name, last_name, birth_date, salary, university.id)?;
        tx.commit()?;
        debug!("Teacher {} was added", id);

        Ok(Teacher {
            id,
            name: name.to_string(),
            last_name: last_name.to_string(),
            birth_date,
            salary,
            university,
        })
    })
}

/// Applies a partial update. Fails with `NothingToUpdate` when no field changed.
pub fn update(db: &Database, id: i64, payload: &TeacherPayload) -> ServiceResult<Teacher> {
    db.with_connection(|conn| -> ServiceResult<Teacher> {
        let tx = conn.transaction()?;
        let mut teacher =
            teachers::get(&tx, id)?.ok_or(ServiceError::NotFound(EntityKind::Teacher))?;

        let changed = patch::apply_to_teacher(&mut teacher, payload, |name| {
            universities::find_by_name(&tx, name)
        })?;
        if !changed {
            return Err(ServiceError::NothingToUpdate);
        }

        teachers::update(&tx, &teacher)?;
        tx.commit()?;
        debug!("Teacher {} was updated", id);
        Ok(teacher)
    })
}

/// Deletes a teacher and returns the deleted record.
pub fn delete(db: &Database, id: i64) -> ServiceResult<Teacher> {
    db.with_connection(|conn| -> ServiceResult<Teacher> {
        let tx = conn.transaction()?;
        let teacher =
            teachers::get(&tx, id)?.ok_or(ServiceError::NotFound(EntityKind::Teacher))?;
        teachers::delete(&tx, id)?;
        tx.commit()?;
        debug!("Teacher {} was deleted", id);
        Ok(teacher)
    })
}

/// Teachers born between `date_from` and `date_to`, both inclusive.
pub fn search_by_birth_date(db: &Database, range: &DateRangeRequest) -> ServiceResult<Vec<Teacher>> {
    let (Some(from), Some(to)) = (present(&range.date_from), present(&range.date_to)) else {
        return Err(ValidationError::MissingDates.into());
    };
    let from = validation::birth_date(from)?;
    let to = validation::birth_date(to)?;

    db.with_connection(|conn| teachers::born_between(conn, from, to).map_err(ServiceError::from))
}
