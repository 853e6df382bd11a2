//! University operations used by both the JSON API and the HTML views.

use crate::db::{universities, Database};
use crate::domain::aggregate;
use crate::domain::patch;
use crate::domain::validation::{self, present};
use crate::error::{EntityKind, Field, ServiceError, ServiceResult, ValidationError};
use common::model::University;
use common::requests::UniversityPayload;
use log::debug;

/// All universities with their average salary refreshed.
pub fn list(db: &Database) -> ServiceResult<Vec<University>> {
    let refresh = db.with_connection(|conn| {
        aggregate::refresh_average_salaries(conn).map_err(ServiceError::from)
    })?;
    Ok(refresh.universities)
}

/// The university with this id, or `NotFound`.
pub fn get(db: &Database, id: i64) -> ServiceResult<University> {
    db.with_connection(|conn| universities::get(conn, id).map_err(ServiceError::from))?
        .ok_or(ServiceError::NotFound(EntityKind::University))
}

/// Creates a university from a name and a location.
///
/// Both are required. The name must be alphanumeric and the location must not
/// be blank.
pub fn create(db: &Database, payload: &UniversityPayload) -> ServiceResult<University> {
    let (Some(name), Some(location)) = (present(&payload.name), present(&payload.location)) else {
        return Err(ValidationError::MissingFields.into());
    };
    let name = validation::text(name, Field::Name)?;
    let location = validation::text(location, Field::Location)?;
    if !validation::is_alphanumeric(name) || validation::is_blank(location) {
        return Err(ValidationError::UniversitySymbols.into());
    }

    let university = db.with_connection(|conn| {
        let tx = conn.transaction()?;
        let university = universities::insert(&tx, name, location)?;
        tx.commit()?;
        Ok::<_, ServiceError>(university)
    })?;
    debug!("University {} was added", university.id);
    Ok(university)
}

/// Applies a partial update. Fails with `NothingToUpdate` when no field changed.
pub fn update(db: &Database, id: i64, payload: &UniversityPayload) -> ServiceResult<University> {
    db.with_connection(|conn| -> ServiceResult<University> {
        let tx = conn.transaction()?;
        let mut university = universities::get(&tx, id)?
            .ok_or(ServiceError::NotFound(EntityKind::University))?;
        if !patch::apply_to_university(&mut university, payload)? {
            return Err(ServiceError::NothingToUpdate);
        }
        universities::update(&tx, &university)?;
        tx.commit()?;
        debug!("University {} was updated", id);
        Ok(university)
    })
}

/// Deletes a university and, through the cascade, its teachers.
/// Returns the deleted record.
pub fn delete(db: &Database, id: i64) -> ServiceResult<University> {
    db.with_connection(|conn| -> ServiceResult<University> {
        let tx = conn.transaction()?;
        let university = universities::get(&tx, id)?
            .ok_or(ServiceError::NotFound(EntityKind::University))?;
        universities::delete(&tx, id)?;
        tx.commit()?;
        debug!("University {} was deleted", id);
        Ok(university)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::teachers;
    use common::requests::TeacherPayload;
    use serde_json::json;

    fn payload(name: &str, location: &str) -> UniversityPayload {
        UniversityPayload {
            name: Some(json!(name)),
            location: Some(json!(location)),
        }
    }

    #[test]
    fn test_create_then_list_has_zero_average() {
        let db = Database::open_in_memory().unwrap();
        let created = create(&db, &payload("NURE", "Nauchna 14")).unwrap();
        assert_eq!(created.average_salary, 0);

        let all = list(&db).unwrap();
        assert_eq!(all, vec![created.clone()]);
        assert_eq!(get(&db, created.id).unwrap(), created);
    }

    #[test]
    fn test_create_validation() {
        let db = Database::open_in_memory().unwrap();
        let missing = UniversityPayload {
            name: Some(json!("KPI")),
            location: None,
        };
        assert!(matches!(
            create(&db, &missing),
            Err(ServiceError::Validation(ValidationError::MissingFields))
        ));
        assert!(matches!(
            create(&db, &payload("K.P.I.", "Kirpichova 17")),
            Err(ServiceError::Validation(ValidationError::UniversitySymbols))
        ));
        assert!(matches!(
            create(&db, &payload("KPI", "   ")),
            Err(ServiceError::Validation(ValidationError::UniversitySymbols))
        ));
        let wrong_type = UniversityPayload {
            name: Some(json!(["KPI"])),
            location: Some(json!("Kirpichova 17")),
        };
        assert!(matches!(
            create(&db, &wrong_type),
            Err(ServiceError::Validation(ValidationError::WrongType(Field::Name)))
        ));
        assert!(list(&db).unwrap().is_empty());
    }

    #[test]
    fn test_create_too_long_name_is_persistence_failure() {
        let db = Database::open_in_memory().unwrap();
        let err = create(&db, &payload(&"a".repeat(60), "Kirpichova 17")).unwrap_err();
        assert_eq!(err.status(), 412);
    }

    #[test]
    fn test_update() {
        let db = Database::open_in_memory().unwrap();
        let kpi = create(&db, &payload("KPI", "Kirpichova 17")).unwrap();

        assert!(matches!(
            update(&db, kpi.id, &payload("KPI", "Kirpichova 17")),
            Err(ServiceError::NothingToUpdate)
        ));
        assert!(matches!(
            update(&db, kpi.id, &UniversityPayload::default()),
            Err(ServiceError::NothingToUpdate)
        ));
        assert!(matches!(
            update(&db, 999, &payload("KPI", "Kirpichova 17")),
            Err(ServiceError::NotFound(EntityKind::University))
        ));

        let updated = update(&db, kpi.id, &payload("Politech", "Kirpichova 2")).unwrap();
        assert_eq!(updated.name, "Politech");
        assert_eq!(get(&db, kpi.id).unwrap().location, "Kirpichova 2");
    }

    #[test]
    fn test_rejected_update_leaves_record_untouched() {
        let db = Database::open_in_memory().unwrap();
        let kpi = create(&db, &payload("KPI", "Kirpichova 17")).unwrap();
        let patch = UniversityPayload {
            name: Some(json!("Politech")),
            location: Some(json!(" ")),
        };
        assert!(update(&db, kpi.id, &patch).is_err());
        assert_eq!(get(&db, kpi.id).unwrap(), kpi);
    }

    #[test]
    fn test_delete_cascades_to_teachers() {
        let db = Database::open_in_memory().unwrap();
        let nure = create(&db, &payload("NURE", "Nauchna 14")).unwrap();
        let teacher = teachers::create(
            &db,
            &TeacherPayload {
                name: Some(json!("Genadiy")),
                last_name: Some(json!("Gorin")),
                birth_date: Some(json!("1997-08-06")),
                salary: Some(json!(900)),
                university: Some(json!("NURE")),
            },
        )
        .unwrap();

        assert_eq!(delete(&db, nure.id).unwrap(), nure);
        assert!(matches!(
            teachers::get(&db, teacher.id),
            Err(ServiceError::NotFound(EntityKind::Teacher))
        ));
        assert!(teachers::list(&db).unwrap().is_empty());
        assert!(matches!(
            delete(&db, nure.id),
            Err(ServiceError::NotFound(EntityKind::University))
        ));
    }
}
