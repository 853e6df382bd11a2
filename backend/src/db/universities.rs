use crate::error::StoreError;
use common::model::University;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::collections::HashMap;

const COLUMNS: &str = "id, name, location, average_salary";

fn from_row(row: &Row<'_>) -> rusqlite::Result<University> {
    Ok(University {
        id: row.get(0)?,
        name: row.get(1)?,
        location: row.get(2)?,
        average_salary: row.get(3)?,
    })
}

/// Every university, ordered by id.
pub fn list(conn: &Connection) -> Result<Vec<University>, StoreError> {
    let mut stmt = conn.prepare(&format!("SELECT {COLUMNS} FROM university ORDER BY id"))?;
    let rows = stmt.query_map([], from_row)?;
    Ok(rows.collect::<Result<_, _>>()?)
}

/// The university with this id, if any.
pub fn get(conn: &Connection, id: i64) -> Result<Option<University>, StoreError> {
    let university = conn
        .query_row(
            &format!("SELECT {COLUMNS} FROM university WHERE id = ?1"),
            params![id],
            from_row,
        )
        .optional()?;
    Ok(university)
}

/// First university with exactly this name, if any.
pub fn find_by_name(conn: &Connection, name: &str) -> Result<Option<University>, StoreError> {
    let university = conn
        .query_row(
            &format!("SELECT {COLUMNS} FROM university WHERE name = ?1 ORDER BY id LIMIT 1"),
            params![name],
            from_row,
        )
        .optional()?;
    Ok(university)
}

/// Inserts a university with a zero average salary and returns it.
pub fn insert(conn: &Connection, name: &str, location: &str) -> Result<University, StoreError> {
    conn.execute(
        "INSERT INTO university (name, location) VALUES (?1, ?2)",
        params![name, location],
    )?;
    Ok(University {
        id: conn.last_insert_rowid(),
        name: name.to_string(),
        location: location.to_string(),
        average_salary: 0,
    })
}

/// Writes the name and location of `university` back to its row.
pub fn update(conn: &Connection, university: &University) -> Result<(), StoreError> {
    conn.execute(
        "UPDATE university SET name = ?1, location = ?2 WHERE id = ?3",
        params![university.name, university.location, university.id],
    )?;
    Ok(())
}

/// Stores a recomputed average salary.
pub fn set_average_salary(conn: &Connection, id: i64, average: i64) -> Result<(), StoreError> {
    conn.execute(
        "UPDATE university SET average_salary = ?1 WHERE id = ?2",
        params![average, id],
    )?;
    Ok(())
}

/// Deletes the university. Dependent teachers go with it (`ON DELETE CASCADE`).
///
/// Returns `false` when no row had this id.
pub fn delete(conn: &Connection, id: i64) -> Result<bool, StoreError> {
    let affected = conn.execute("DELETE FROM university WHERE id = ?1", params![id])?;
    Ok(affected > 0)
}

/// Mean teacher salary per university, rounded half away from zero.
///
/// Only universities with at least one teacher appear in the map.
pub fn salary_averages(conn: &Connection) -> Result<HashMap<i64, i64>, StoreError> {
    let mut stmt = conn.prepare(
        "SELECT university_id, CAST(ROUND(AVG(salary)) AS INTEGER)
         FROM teacher
         GROUP BY university_id",
    )?;
    let rows = stmt.query_map([], |row| Ok((row.get::<_, i64>(0)?, row.get::<_, i64>(1)?)))?;
    Ok(rows.collect::<Result<_, _>>()?)
}
