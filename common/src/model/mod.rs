pub mod teacher;
pub mod university;

pub use teacher::Teacher;
pub use university::University;

/// Date format used for `birth_date` both on the wire and in forms.
pub const DATE_FORMAT: &str = "%Y-%m-%d";
