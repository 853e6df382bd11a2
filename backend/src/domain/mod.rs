//! Business rules shared by the JSON API and the HTML views.
//!
//! Adapters extract raw values, call into these modules and render the
//! result; they never validate or mutate records themselves.

pub mod aggregate;
pub mod patch;
pub mod teachers;
pub mod universities;
pub mod validation;
