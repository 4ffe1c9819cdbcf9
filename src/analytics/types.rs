//! Derived values produced by the analytics engine.
//!
//! All of these are recomputed from the record collection on demand; none
//! is mutated after construction.

use chrono::NaiveDate;
use serde::Serialize;

/// Statistics over every countable record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverallStats {
    /// Mean of countable results, `None` when there are none.
    pub average: Option<f64>,
    pub passed_count: usize,
    pub countable_total: usize,
    /// Highest countable result, `None` when there are none.
    pub highest: Option<f64>,
    /// Distinct subject names across all records, countable or not.
    pub subject_count: usize,
    /// Countable records whose entry date does not parse. They count towards
    /// `average` but cannot be placed in a monthly progression bucket.
    pub undated_count: usize,
}

/// Direction of the last two countable results of a subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Improving,
    Declining,
    Stable,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubjectAggregate {
    pub name: String,
    pub short_code: String,
    /// All records of the subject, countable or not.
    pub count: usize,
    pub countable_count: usize,
    pub average: Option<f64>,
    pub highest: Option<f64>,
    pub latest: Option<f64>,
    pub trend: Trend,
}

/// One calendar month of countable grades.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressionPoint {
    /// First day of the bucketed month.
    pub month: NaiveDate,
    pub month_label: String,
    pub month_average: f64,
    /// Mean of every dated countable result up to and including this month.
    /// On the last point this equals [`OverallStats::average`] when
    /// [`OverallStats::undated_count`] is zero.
    pub cumulative_average: f64,
    pub count: usize,
    pub month_highest: f64,
}

/// A single countable grade of one subject, in chronological order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubjectPoint {
    pub day_label: String,
    pub value: f64,
    pub kind: String,
}
