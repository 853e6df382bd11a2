use crate::error::StoreError;
use chrono::NaiveDate;
use common::model::{Teacher, University};
use rusqlite::{params, Connection, OptionalExtension, Row};

const SELECT: &str = "
SELECT t.teacher_id, t.name, t.last_name, t.birth_date, t.salary,
       u.id, u.name, u.location, u.average_salary
FROM teacher t
JOIN university u ON u.id = t.university_id";

fn from_row(row: &Row<'_>) -> rusqlite::Result<Teacher> {
    Ok(Teacher {
        id: row.get(0)?,
        name: row.get(1)?,
        last_name: row.get(2)?,
        birth_date: row.get(3)?,
        salary: row.get(4)?,
        university: University {
            id: row.get(5)?,
            name: row.get(6)?,
            location: row.get(7)?,
            average_salary: row.get(8)?,
        },
    })
}

/// Every teacher with their university, ordered by id.
pub fn list(conn: &Connection) -> Result<Vec<Teacher>, StoreError> {
    let mut stmt = conn.prepare(&format!("{SELECT} ORDER BY t.teacher_id"))?;
    let rows = stmt.query_map([], from_row)?;
    Ok(rows.collect::<Result<_, _>>()?)
}

/// The teacher with this id, if any.
pub fn get(conn: &Connection, id: i64) -> Result<Option<Teacher>, StoreError> {
    let teacher = conn
        .query_row(
            &format!("{SELECT} WHERE t.teacher_id = ?1"),
            params![id],
            from_row,
        )
        .optional()?;
    Ok(teacher)
}

/// Teachers born within `[from, to]`, both ends inclusive.
pub fn born_between(
    conn: &Connection,
    from: NaiveDate,
    to: NaiveDate,
) -> Result<Vec<Teacher>, StoreError> {
    let mut stmt = conn.prepare(&format!(
        "{SELECT} WHERE t.birth_date BETWEEN ?1 AND ?2 ORDER BY t.teacher_id"
    ))?;
    let rows = stmt.query_map(params![from, to], from_row)?;
    Ok(rows.collect::<Result<_, _>>()?)
}

/// Inserts a teacher and returns its new id.
pub fn insert(
    conn: &Connection,
    name: &str,
    last_name: &str,
    birth_date: NaiveDate,
    salary: i64,
    university_id: i64,
) -> Result<i64, StoreError> {
    conn.execute(
        "INSERT INTO teacher (name, last_name, birth_date, salary, university_id)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![name, last_name, birth_date, salary, university_id],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Writes every mutable column of `teacher` back to its row.
pub fn update(conn: &Connection, teacher: &Teacher) -> Result<(), StoreError> {
    conn.execute(
        "UPDATE teacher
         SET name = ?1, last_name = ?2, birth_date = ?3, salary = ?4, university_id = ?5
         WHERE teacher_id = ?6",
        params![
            teacher.name,
            teacher.last_name,
            teacher.birth_date,
            teacher.salary,
            teacher.university.id,
            teacher.id
        ],
    )?;
    Ok(())
}

/// Deletes the teacher. Returns `false` when no row had this id.
pub fn delete(conn: &Connection, id: i64) -> Result<bool, StoreError> {
    let affected = conn.execute("DELETE FROM teacher WHERE teacher_id = ?1", params![id])?;
    Ok(affected > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{universities, Database};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_born_between_is_inclusive() {
        let db = Database::open_in_memory().unwrap();
        db.with_connection(|conn| {
            let u = universities::insert(conn, "KPI", "Kirpichova 17")?;
            insert(conn, "Oleg", "Strochak", date(1990, 4, 4), 1300, u.id)?;
            insert(conn, "Irina", "Perova", date(1999, 5, 3), 1000, u.id)?;
            insert(conn, "Vitaliy", "Puchkov", date(1967, 9, 21), 1800, u.id)?;

            let found = born_between(conn, date(1990, 4, 4), date(1999, 5, 3))?;
            let names: Vec<_> = found.iter().map(|t| t.name.as_str()).collect();
            assert_eq!(names, vec!["Oleg", "Irina"]);
            Ok::<_, StoreError>(())
        })
        .unwrap();
    }

    #[test]
    fn test_delete_university_cascades_to_teachers() {
        let db = Database::open_in_memory().unwrap();
        db.with_connection(|conn| {
            let u = universities::insert(conn, "NURE", "Nauchna 14")?;
            let id = insert(conn, "Genadiy", "Gorin", date(1997, 8, 6), 900, u.id)?;

            assert!(universities::delete(conn, u.id)?);
            assert!(get(conn, id)?.is_none());
            assert!(list(conn)?.is_empty());
            Ok::<_, StoreError>(())
        })
        .unwrap();
    }

    #[test]
    fn test_unknown_university_is_rejected_by_foreign_key() {
        let db = Database::open_in_memory().unwrap();
        let result = db.with_connection(|conn| {
            insert(conn, "Anton", "Ostapenko", date(1985, 12, 12), 2200, 42)
        });
        assert!(matches!(result, Err(StoreError::Sqlite(_))));
    }
}
