//! Read-time refresh of `University::average_salary`.
//!
//! The average is a cached projection over teacher salaries. Teacher writes do
//! not touch it; it is recomputed every time the university collection is
//! listed, and only rows whose value drifted are written back.

use crate::db::universities;
use crate::error::StoreError;
use common::model::University;
use log::debug;
use rusqlite::Connection;

/// Result of one refresh pass.
#[derive(Debug)]
pub struct Refresh {
    pub universities: Vec<University>,
    /// Number of rows whose stored average was rewritten.
    pub updated: usize,
}

/// Lists all universities with their averages brought up to date.
///
/// Universities without teachers keep whatever average they had stored.
/// All write-backs share one transaction, committed once.
pub fn refresh_average_salaries(conn: &mut Connection) -> Result<Refresh, StoreError> {
    let tx = conn.transaction()?;
    let mut all = universities::list(&tx)?;
    let averages = universities::salary_averages(&tx)?;

    let mut updated = 0;
    for university in all.iter_mut() {
        let Some(&average) = averages.get(&university.id) else {
            continue;
        };
        if university.average_salary != average {
            universities::set_average_salary(&tx, university.id, average)?;
            university.average_salary = average;
            updated += 1;
        }
    }

    tx.commit()?;
    if updated > 0 {
        debug!("Refreshed average salary of {} universities", updated);
    }
    Ok(Refresh {
        universities: all,
        updated,
    })
}
