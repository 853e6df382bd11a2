//! Demo data inserted into a freshly created database.

use crate::db::{teachers, universities};
use crate::error::StoreError;
use chrono::NaiveDate;
use rusqlite::Connection;

const UNIVERSITIES: [(&str, &str); 5] = [
    ("NURE", "Nauchna 14"),
    ("KPI", "Kirpichova 17"),
    ("Karazina", "Independence Avenue 6"),
    ("KNMU", "Nauchna 4"),
    ("KHAI", "Chkalova 17"),
];

/// Evaluated in const context only, so an invalid date fails the build.
const fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    match NaiveDate::from_ymd_opt(year, month, day) {
        Some(date) => date,
        None => panic!("invalid seed date"),
    }
}

/// `(name, last_name, birth_date, salary, index into UNIVERSITIES)`
const TEACHERS: [(&str, &str, NaiveDate, i64, usize); 10] = [
    ("Andriy", "Kovalenko", date(1987, 10, 12), 1500, 0),
    ("Irina", "Perova", date(1999, 5, 3), 1000, 2),
    ("Vitaliy", "Puchkov", date(1967, 9, 21), 1800, 1),
    ("Oleg", "Strochak", date(1990, 4, 4), 1300, 1),
    ("Genadiy", "Gorin", date(1997, 8, 6), 900, 0),
    ("Alexander", "Hryapkin", date(1970, 6, 25), 1900, 2),
    ("Andriy", "Kovalenko", date(1987, 10, 12), 1500, 3),
    ("Sergey", "Chaynikov", date(1969, 2, 21), 2000, 2),
    ("Svitlana", "Ponomarova", date(1999, 9, 5), 700, 4),
    ("Anton", "Ostapenko", date(1985, 12, 12), 2200, 4),
];

/// Inserts the demo universities and teachers in one transaction.
pub fn populate(conn: &mut Connection) -> Result<(), StoreError> {
    let tx = conn.transaction()?;

    let mut ids = Vec::with_capacity(UNIVERSITIES.len());
    for (name, location) in UNIVERSITIES {
        ids.push(universities::insert(&tx, name, location)?.id);
    }

    for (name, last_name, birth_date, salary, university) in TEACHERS {
        teachers::insert(&tx, name, last_name, birth_date, salary, ids[university])?;
    }

    tx.commit()?;
    Ok(())
}
