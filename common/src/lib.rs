//! Types shared between the campus backend and its clients.
//!
//! - `model`: the persisted entities as they appear on the wire.
//! - `requests`: raw, unvalidated payloads accepted by the API and the HTML forms.
//! - `responses`: the JSON error envelope.

pub mod model;
pub mod requests;
pub mod responses;
