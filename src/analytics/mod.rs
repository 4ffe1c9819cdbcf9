//! Grade analytics and aggregation.
//!
//! Turns a flat collection of [`GradeRecord`](crate::models::GradeRecord)s
//! into overall and per-subject statistics, a monthly progression series and
//! filtered/sorted views. Every function here is pure and total: malformed
//! records are classified out, empty inputs degrade to `None`.

pub mod aggregate;
pub mod filter;
pub mod grade;
pub mod progression;
pub mod types;
pub mod utility;
pub mod validate;

/// Canonical passing grade, applied to every pass count.
pub const PASSING_GRADE: f64 = 6.0;
